//! Text rendering of polynomials.
//!
//! Terms print in ascending order, `c_0 + c_1*x + c_2*x^2`. A coefficient
//! of a non-constant term is parenthesised unless it is a bare unsigned
//! integer, decimal or fraction.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use exacta_rings::Ring;

use crate::polynomial::Polynomial;

static SIMPLE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]+\.?[0-9]*(?:[eE][+-][0-9]+)?|[0-9]+/[0-9]+)$")
        .expect("simple number pattern is a valid regex")
});

/// Returns true if `s` prints without parentheses next to `*x`.
pub(crate) fn is_simple_number(s: &str) -> bool {
    SIMPLE_NUMBER.is_match(s)
}

impl<B: Ring> fmt::Display for Polynomial<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }

        for (i, (exponent, coefficient)) in self.terms().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            let c = coefficient.to_string();
            if exponent == 0 || is_simple_number(&c) {
                write!(f, "{c}")?;
            } else {
                write!(f, "({c})")?;
            }
            if exponent > 0 {
                write!(f, "*x")?;
            }
            if exponent > 1 {
                write!(f, "^{exponent}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PolynomialRegistry;
    use exacta_rings::{FieldRegistry, Rational, RationalField, RingFactory};

    #[test]
    fn test_simple_numbers() {
        for s in ["0", "12", "3.5", "1.", "2e+5", "1/3"] {
            assert!(is_simple_number(s), "{s}");
        }
        for s in ["-1", "-1/3", "x", "1 + x", "2e5"] {
            assert!(!is_simple_number(s), "{s}");
        }
    }

    #[test]
    fn test_display_over_rationals() {
        let qx = PolynomialRegistry::global().factory(&RationalField);
        assert_eq!(qx.zero().to_string(), "0");

        let p = qx
            .get([
                (0, Rational::from(-1)),
                (1, Rational::from_i64(1, 2)),
                (3, Rational::from(-2)),
            ])
            .unwrap();
        assert_eq!(p.to_string(), "-1 + 1/2*x + (-2)*x^3");
    }

    #[test]
    fn test_display_nested() {
        let f7 = FieldRegistry::global().field(7).unwrap();
        let f7x = PolynomialRegistry::global().factory(&f7);
        let f7xy = PolynomialRegistry::global().factory(&f7x);

        // coefficients that are themselves polynomials get parentheses
        let inner = f7x.from_coefficients([f7.get(1), f7.get(1)]).unwrap();
        let p = f7xy.monomial(inner, 2).unwrap();
        assert_eq!(p.to_string(), "(1 + 1*x)*x^2");
        assert_eq!(format!("{p:?}"), "Polynomial((1 + 1*x)*x^2)");
    }
}
