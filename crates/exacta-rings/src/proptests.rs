//! Property-based tests for the ring implementations.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::euclid::{extended_gcd, gcd};
    use crate::{Field, FieldRegistry, Integer, Rational, Ring, RingFactory};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn prime() -> impl Strategy<Value = u64> {
        prop::sample::select(vec![2u64, 3, 7, 101, 65_521, 1_000_003, 998_244_353])
    }

    proptest! {
        // Rational field laws

        #[test]
        fn rational_divide_then_multiply(
            num_a in small_int(),
            den_a in non_zero_int(),
            num_b in non_zero_int(),
            den_b in non_zero_int()
        ) {
            let a = Rational::from_i64(num_a, den_a);
            let b = Rational::from_i64(num_b, den_b);
            let back = Ring::multiply(&Field::divide(&a, &b).unwrap(), &b).unwrap();
            prop_assert_eq!(back, a);
        }

        // Prime field laws

        #[test]
        fn field_inverse_law(p in prime(), x in 1i64..1_000_000i64) {
            let field = FieldRegistry::global().field(p).unwrap();
            let x = field.get(x);
            prop_assume!(!x.is_zero());
            prop_assert!(x.multiply(&x.invert().unwrap()).unwrap() == field.one());
        }

        #[test]
        fn field_double_inverse(p in prime(), x in 1i64..1_000_000i64) {
            let field = FieldRegistry::global().field(p).unwrap();
            let x = field.get(x);
            prop_assume!(!x.is_zero());
            let inv = x.invert().unwrap();
            prop_assert!(field.is_inverse_cached(&inv));
            prop_assert_eq!(inv.invert().unwrap(), x);
        }

        #[test]
        fn field_distributive(p in prime(), a in small_int(), b in small_int(), c in small_int()) {
            let field = FieldRegistry::global().field(p).unwrap();
            let (a, b, c) = (field.get(a), field.get(b), field.get(c));
            prop_assert_eq!(
                a.multiply(&b.add(&c).unwrap()).unwrap(),
                a.multiply(&b).unwrap().add(&a.multiply(&c).unwrap()).unwrap()
            );
        }

        #[test]
        fn field_residues_are_reduced(p in prime(), a in any::<i64>()) {
            let field = FieldRegistry::global().field(p).unwrap();
            let x = field.get(a);
            prop_assert!(x.value() >= Integer::ZERO);
            prop_assert!(x.value() < field.characteristic());
        }

        // Euclidean algorithm over the integers

        #[test]
        fn integer_bezout(a in small_int(), b in small_int()) {
            let (a, b) = (Integer::new(a), Integer::new(b));
            let (g, s, t) = extended_gcd(&a, &b).unwrap();
            prop_assert_eq!(&a * &s + &b * &t, g.clone());
            prop_assert_eq!(g.abs(), gcd(&a, &b).unwrap().abs());
        }
    }
}
