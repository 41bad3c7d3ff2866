//! Functions to construct [`Integer`]s and [`Rational`]s from various types.
//!
//! The engine computes with exact numbers only: series coefficients are arbitrary-precision
//! rationals (or expressions over symbolic constants). Decimal input is converted to its exact
//! rational value, so `0.1` really is `1/10`.

use rug::{ops::Pow, Integer, Rational};

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rat<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates an [`Integer`] from a string slice containing decimal digits.
pub fn int_from_str(s: &str) -> Integer {
    // the tokenizer only produces digit sequences here
    Integer::from_str_radix(s, 10).unwrap()
}

/// Creates a [`Rational`] from a string slice containing either an integer or a decimal literal,
/// such as `3.14`. The result is the exact value of the literal (`157/50`).
pub fn rat_from_str(s: &str) -> Rational {
    match s.split_once('.') {
        Some((whole, frac)) => {
            let digits = format!("{}{}", whole, frac);
            let denom = int(10).pow(frac.len() as u32);
            Rational::from((int_from_str(&digits), denom))
        },
        None => Rational::from(int_from_str(s)),
    }
}

/// Creates an [`Integer`] holding `n!`.
pub fn factorial(n: usize) -> Integer {
    Integer::from(Integer::factorial(n as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorials() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(5), 120);
    }

    #[test]
    fn decimal_to_rational() {
        assert_eq!(rat_from_str("3.14"), rat((157, 50)));
        assert_eq!(rat_from_str("0.1"), rat((1, 10)));
        assert_eq!(rat_from_str("2.50"), rat((5, 2)));
        assert_eq!(rat_from_str("17"), rat(17));
    }
}
