//! Contains the common [`ErrorKind`] trait used by all diagnostic errors in the workspace to
//! display user-facing error messages.

use ariadne::{Color, Report};
use std::{fmt::Debug, ops::Range};

/// The color used to highlight expressions in error output.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur while processing user input.
pub trait ErrorKind: Debug + Send {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of the input expression that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the input that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,

    /// Whether the error is fatal, i.e. parsing should stop immediately instead of trying
    /// alternate interpretations of the input.
    pub fatal: bool,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind), fatal: false }
    }

    /// Creates a new fatal error with the given spans and kind.
    pub fn new_fatal(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind), fatal: true }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}
