//! Property-based tests for arbitrary precision arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::One;
    use proptest::prelude::*;

    use crate::modular::{add_word, inv_big, inv_word, mul_word, pow_word};
    use crate::{Integer, Rational};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    // Denominators large enough that unreduced products would grow quickly
    fn large_denominator() -> impl Strategy<Value = i64> {
        prop_oneof![(1i64..=1_000_000_000_000i64), (-1_000_000_000_000i64..=-1i64)]
    }

    fn is_canonical(r: &Rational) -> bool {
        r.denominator() > &Integer::ZERO && r.numerator().gcd(r.denominator()).is_one()
    }

    /// `10^e` as a rational, for any sign of `e`.
    fn power_of_ten(e: i32) -> Rational {
        Rational::from(10).pow(e).unwrap()
    }

    proptest! {
        // Construction

        #[test]
        fn from_parts_trusts_reduced_pairs(n in small_int(), d in non_zero_int()) {
            let (n, d) = (Integer::new(n), Integer::new(d));
            prop_assume!(n.gcd(&d).is_one());
            let trusted = Rational::from_parts(n.clone(), d.clone(), false).unwrap();
            let reduced = Rational::new(n, d).unwrap();
            prop_assert!(is_canonical(&trusted));
            prop_assert_eq!(trusted, reduced);
        }

        #[test]
        fn new_ignores_common_factors(n in small_int(), d in non_zero_int(), k in non_zero_int()) {
            let k = Integer::new(k);
            let scaled = Rational::new(Integer::new(n) * &k, Integer::new(d) * &k).unwrap();
            prop_assert_eq!(scaled, Rational::from_i64(n, d));
        }

        // Parsing goes through decimal digits

        #[test]
        fn parse_exponential_scales_by_ten(m in small_int(), e in -40i32..40i32) {
            let parsed = Rational::parse(&format!("{m}e{e}")).unwrap();
            prop_assert_eq!(parsed, Rational::from(m) * power_of_ten(e));
        }

        #[test]
        fn parse_decimal_matches_fraction(whole in 0i64..100_000i64, digits in "[0-9]{1,9}") {
            let parsed = Rational::parse(&format!("{whole}.{digits}")).unwrap();
            let fraction: i64 = digits.parse().unwrap();
            let places = i32::try_from(digits.len()).unwrap();
            let expected = Rational::from(whole) + Rational::from(fraction) * power_of_ten(-places);
            prop_assert!(is_canonical(&parsed));
            prop_assert_eq!(parsed, expected);
        }

        #[test]
        fn parse_mantissa_with_exponent(whole in small_int(), digits in "[0-9]{1,4}", e in -20i32..20i32) {
            let plain = Rational::parse(&format!("{whole}.{digits}")).unwrap();
            let scaled = Rational::parse(&format!("{whole}.{digits}E{e}")).unwrap();
            prop_assert_eq!(scaled, plain * power_of_ten(e));
        }

        #[test]
        fn from_f64_of_dyadic_is_exact(k in small_int(), j in 0u32..10u32) {
            let scale = 1i64 << j;
            let value = k as f64 / scale as f64;
            prop_assert_eq!(Rational::from_f64(value).unwrap(), Rational::from_i64(k, scale));
        }

        #[test]
        fn display_parses_back(num in small_int(), den in non_zero_int()) {
            let a = Rational::from_i64(num, den);
            prop_assert_eq!(Rational::parse(&a.to_string()).unwrap(), a);
        }

        // Arithmetic keeps lowest terms

        #[test]
        fn chained_operations_stay_canonical(
            terms in prop::collection::vec((small_int(), large_denominator()), 1..12)
        ) {
            // reference: unreduced numerator and denominator
            let (mut num, mut den) = (Integer::ZERO, Integer::ONE);
            let mut sum = Rational::ZERO;
            let mut product = Rational::ONE;
            for (n, d) in terms {
                let term = Rational::from_i64(n, d);
                num = num * Integer::new(d) + Integer::new(n) * &den;
                den = den * Integer::new(d);
                sum = &sum + &term;
                product = &product * &term;
                prop_assert!(is_canonical(&sum));
                prop_assert!(is_canonical(&product));
            }
            prop_assert_eq!(sum, Rational::new(num, den).unwrap());
        }

        #[test]
        fn subtract_then_add_restores(
            num_a in small_int(),
            den_a in large_denominator(),
            num_b in small_int(),
            den_b in large_denominator()
        ) {
            let a = Rational::from_i64(num_a, den_a);
            let b = Rational::from_i64(num_b, den_b);
            let difference = &a - &b;
            prop_assert!(is_canonical(&difference));
            prop_assert_eq!(&difference + &b, a);
        }

        #[test]
        fn negative_powers_invert(num in non_zero_int(), den in non_zero_int(), e in 0i32..6i32) {
            let a = Rational::from_i64(num, den);
            let product = a.pow(e).unwrap() * a.pow(-e).unwrap();
            prop_assert!(product.is_one());
        }

        #[test]
        fn order_agrees_with_difference_sign(
            num_a in small_int(),
            den_a in non_zero_int(),
            num_b in small_int(),
            den_b in non_zero_int()
        ) {
            let a = Rational::from_i64(num_a, den_a);
            let b = Rational::from_i64(num_b, den_b);
            prop_assert_eq!(a < b, (&a - &b).is_negative());
            prop_assert_eq!(a == b, (&a - &b) == Rational::ZERO);
        }

        // Integers

        #[test]
        fn gcd_times_lcm_is_product(a in non_zero_int(), b in non_zero_int()) {
            let (a, b) = (Integer::new(a), Integer::new(b));
            prop_assert_eq!(a.gcd(&b) * a.lcm(&b), (&a * &b).abs());
        }

        // Word-level modular arithmetic

        #[test]
        fn modular_add_commutative(a in 0u64..1000u64, b in 0u64..1000u64) {
            const P: u64 = 998_244_353;
            prop_assert_eq!(add_word(a, b, P), add_word(b, a, P));
        }

        #[test]
        fn modular_inverse(a in 1u64..1000u64) {
            const P: u64 = 998_244_353;
            let inv = inv_word(a, P).unwrap();
            prop_assert_eq!(mul_word(a, inv, P), 1);
        }

        #[test]
        fn modular_word_and_big_agree(a in 1u64..100_000u64) {
            const P: u64 = 65_521;
            prop_assume!(a % P != 0);
            let word = inv_word(a % P, P).unwrap();
            let big = inv_big(&Integer::from(a), &Integer::from(P)).unwrap();
            prop_assert_eq!(Integer::from(word), big);
        }

        #[test]
        fn modular_fermat_little_theorem(a in 1u64..1000u64) {
            const P: u64 = 998_244_353;
            prop_assert_eq!(pow_word(a, P - 1, P), 1);
        }
    }
}
