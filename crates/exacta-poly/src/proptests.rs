//! Property-based tests for polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use exacta_rings::{
        DivisionResult, EuclideanDomain, FieldRegistry, Rational, RationalField, Ring,
    };

    use crate::{Polynomial, PolynomialFactory, PolynomialRegistry};

    fn qx() -> PolynomialFactory<Rational> {
        PolynomialRegistry::global().factory(&RationalField)
    }

    // Strategy for generating small rational coefficients
    fn small_coeff() -> impl Strategy<Value = Rational> {
        (-100i64..100i64, 1i64..10i64).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    // Strategy for generating sparse polynomials of degree at most 8
    fn small_poly() -> impl Strategy<Value = Polynomial<Rational>> {
        proptest::collection::vec((0u32..9u32, small_coeff()), 0..=5)
            .prop_map(|terms| qx().get(terms).unwrap())
    }

    // Strategy for generating non-zero polynomials
    fn nonzero_poly() -> impl Strategy<Value = Polynomial<Rational>> {
        small_poly().prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    proptest! {
        // Polynomial ring axioms

        #[test]
        fn poly_add_then_subtract(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.add(&b).unwrap().subtract(&b).unwrap(), a);
        }

        #[test]
        fn poly_mul_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.multiply(&b).unwrap(), b.multiply(&a).unwrap());
        }

        #[test]
        fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            // a * (b + c) = a * b + a * c
            let left = a.multiply(&b.add(&c).unwrap()).unwrap();
            let right = a.multiply(&b).unwrap().add(&a.multiply(&c).unwrap()).unwrap();
            prop_assert_eq!(left, right);
        }

        #[test]
        fn poly_has_no_zero_terms(a in small_poly(), b in small_poly()) {
            let product = a.multiply(&b).unwrap();
            prop_assert!(product.terms().all(|(_, c)| !c.is_zero()));
            let sum = a.add(&b.negate()).unwrap();
            prop_assert!(sum.terms().all(|(_, c)| !c.is_zero()));
        }

        // Euclidean division

        #[test]
        fn poly_division_identity(a in small_poly(), b in nonzero_poly()) {
            let DivisionResult { quotient, remainder } = a.euclidean_division(&b).unwrap();
            let back = quotient.multiply(&b).unwrap().add(&remainder).unwrap();
            prop_assert_eq!(back, a);
            prop_assert!(remainder.is_zero() || remainder.degree() < b.degree());
        }

        #[test]
        fn poly_exact_division(a in nonzero_poly(), b in nonzero_poly()) {
            let product = a.multiply(&b).unwrap();
            prop_assert_eq!(product.divide(&b).unwrap(), a);
        }

        // GCD

        #[test]
        fn poly_gcd_idempotent(a in nonzero_poly()) {
            prop_assert_eq!(a.gcd(&a).unwrap(), a.monic().unwrap());
        }

        #[test]
        fn poly_gcd_divides_both(a in nonzero_poly(), b in nonzero_poly()) {
            let g = a.gcd(&b).unwrap();
            prop_assert!(a.remainder(&g).unwrap().is_zero());
            prop_assert!(b.remainder(&g).unwrap().is_zero());
            prop_assert!(g.leading_coefficient().is_one());
        }

        // Calculus

        #[test]
        fn poly_integral_then_derivative(a in small_poly()) {
            prop_assert_eq!(a.integrate().unwrap().derivative().unwrap(), a);
        }

        #[test]
        fn poly_over_prime_field(coeffs in proptest::collection::vec(-50i64..50i64, 1..6)) {
            let f = FieldRegistry::global().field(101).unwrap();
            let fx = PolynomialRegistry::global().factory(&f);
            let p = fx.from_coefficients(coeffs.into_iter().map(|c| f.get(c))).unwrap();
            let square = p.multiply(&p).unwrap();
            if !p.is_zero() {
                prop_assert_eq!(square.divide(&p).unwrap(), p);
            }
        }
    }
}
