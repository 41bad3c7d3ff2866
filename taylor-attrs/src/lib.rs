//! Derive macro for `taylor-error`'s `ErrorKind` trait.
//!
//! Each error kind describes its user-facing report declaratively through the `error` attribute,
//! and the derive generates the `build_report` implementation that assembles the corresponding
//! `ariadne` report.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned};
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input,
    Attribute,
    Expr,
    Fields,
    Ident,
    ItemStruct,
    Result,
    Token,
};

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// The report is described with the `error` attribute:
/// ```
/// use taylor_attrs::ErrorKind;
/// use taylor_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unexpected end of input", labels = ["add something here"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | The text of the labels that point to the spans of the error.                 |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression. For structs with named fields, the expression is evaluated
/// with the members of the struct in scope, so they can be used in the expression (tuple structs
/// are not supported).
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let spec = parse_macro_input!(item as ReportSpec);
    let name = &spec.name;
    let body = spec.build_report_body();
    quote! {
        impl ErrorKind for #name {
            #body
        }
    }.into()
}

/// The report description parsed from the derive target: the struct itself plus the tags of its
/// `error` attribute.
struct ReportSpec {
    name: Ident,
    fields: Fields,
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl Parse for ReportSpec {
    fn parse(input: ParseStream) -> Result<Self> {
        let attributes = input.call(Attribute::parse_outer)?;
        let target = input.parse::<ItemStruct>()?;

        let mut spec = ReportSpec {
            name: target.ident,
            fields: target.fields,
            message: None,
            labels: None,
            help: None,
        };

        if let Some(attr) = attributes.iter().find(|attr| attr.path().is_ident("error")) {
            attr.parse_args_with(|input: ParseStream| spec.parse_tags(input))?;
        }

        Ok(spec)
    }
}

impl ReportSpec {
    /// Parses the comma-separated `tag = expr` list inside the `error` attribute.
    fn parse_tags(&mut self, input: ParseStream) -> Result<()> {
        while !input.is_empty() {
            let tag: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match tag.to_string().as_str() {
                "message" => self.message = Some(input.parse()?),
                "labels" => self.labels = Some(input.parse()?),
                "help" => self.help = Some(input.parse()?),
                other => {
                    return Err(syn::Error::new_spanned(tag, format!("unknown tag `{}`", other)));
                },
            }

            if input.parse::<Token![,]>().is_err() {
                break;
            }
        }

        Ok(())
    }

    /// Generates a `let` binding that brings the struct's named fields into scope, so tag
    /// expressions can refer to them directly.
    fn destructure(&self) -> TokenStream2 {
        let name = &self.name;
        match &self.fields {
            Fields::Named(fields) => {
                let names = fields.named.iter().map(|field| field.ident.as_ref());
                quote! { let #name { #(#names),* } = self; }
            },
            Fields::Unnamed(_) => quote_spanned! {
                name.span() => compile_error!("`ErrorKind` cannot be derived for tuple structs")
            },
            Fields::Unit => quote! {},
        }
    }

    /// Generates the body of the `build_report` implementation.
    fn build_report_body(&self) -> TokenStream2 {
        let destructure = self.destructure();
        let message = self.message.as_ref();
        let labels = self.labels.as_ref();
        let help = self.help.as_ref().map(|expr| quote! { builder.set_help(#expr); });

        quote! {
            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #[allow(unused_variables)]
                #destructure

                let mut builder = ariadne::Report::build(ariadne::ReportKind::Error, src_id, spans[0].start)
                    .with_message(#message)
                    .with_labels(
                        #labels
                            .into_iter()
                            .enumerate()
                            .map(|(i, label_str)| {
                                let mut label = ariadne::Label::new((src_id, spans[i].clone()))
                                    .with_color(taylor_error::EXPR);

                                let label_str = label_str.to_string();
                                if !label_str.is_empty() {
                                    label = label.with_message(label_str);
                                }

                                label
                            })
                            .collect::<Vec<_>>()
                    );

                #help
                builder.finish()
            }
        }
    }
}
