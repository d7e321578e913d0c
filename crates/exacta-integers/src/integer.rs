//! Arbitrary precision integers.
//!
//! This module provides a wrapper around `dashu::IBig` with the
//! operations the rational and modular layers are built from.

use dashu::base::{Abs, BitTest, Gcd, Signed as DashuSigned};
use dashu::integer::{IBig, UBig};
use num_traits::{One, Zero};
use rand::Rng;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;

use crate::error::{AlgebraError, Result};

/// An arbitrary precision integer.
///
/// Division and remainder truncate toward zero, matching the primitive
/// integer types. Use [`Integer::rem_euclid`] for a non-negative residue.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// The integer 0.
    pub const ZERO: Self = Self(IBig::ZERO);

    /// The integer 1.
    pub const ONE: Self = Self(IBig::ONE);

    /// The integer -1.
    pub const MINUS_ONE: Self = Self(IBig::NEG_ONE);

    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Creates an integer from a string in the given base.
    ///
    /// An optional leading `+` or `-` is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidOperation`] if the string is not a
    /// valid integer.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self> {
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        if digits.is_empty() || digits.starts_with(['+', '-']) {
            return Err(AlgebraError::invalid(format!("{s:?} is not an integer")));
        }
        let magnitude = IBig::from_str_radix(digits, radix)
            .map_err(|e| AlgebraError::invalid(format!("{s:?} is not an integer ({e})")))?;
        Ok(Self(if negative { -magnitude } else { magnitude }))
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns true if this integer is even.
    #[must_use]
    pub fn is_even(&self) -> bool {
        !self.0.bit(0)
    }

    /// Returns the number of bits needed to represent the magnitude.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.0.bit_len()
    }

    /// Computes the (non-negative) greatest common divisor.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        Self(IBig::from(self.0.clone().gcd(other.0.clone())))
    }

    /// Computes the least common multiple.
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let g = self.gcd(other);
        Self(&self.0 / &g.0 * &other.0).abs()
    }

    /// Returns the residue of `self` modulo `|modulus|` in `[0, |modulus|)`.
    ///
    /// # Panics
    ///
    /// Panics if `modulus` is zero.
    #[must_use]
    pub fn rem_euclid(&self, modulus: &Self) -> Self {
        let r = &self.0 % &modulus.0;
        if DashuSigned::is_negative(&r) {
            Self(r + modulus.0.clone().abs())
        } else {
            Self(r)
        }
    }

    /// Multiplies by `2^bits`.
    #[must_use]
    pub fn shl(&self, bits: usize) -> Self {
        Self(self.0.clone() << bits)
    }

    /// Returns the inner `dashu::IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// Returns a reference to the inner `dashu::IBig`.
    #[must_use]
    pub fn as_inner(&self) -> &IBig {
        &self.0
    }

    /// Attempts to convert to an i64.
    ///
    /// Returns `None` if the value doesn't fit in an i64.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Attempts to convert to a u64.
    ///
    /// Returns `None` if the value is negative or too large.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        self.0.clone().try_into().ok()
    }

    /// Computes self^exp for non-negative exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Computes `self^exp mod modulus` by square-and-multiply.
    ///
    /// The result lies in `[0, |modulus|)`.
    #[must_use]
    pub fn pow_mod(&self, exp: &Self, modulus: &Self) -> Self {
        let mut result = Self::one().rem_euclid(modulus);
        let mut base = self.rem_euclid(modulus);
        let mut e = exp.clone();
        let two = Self::new(2);

        while !e.is_zero() {
            if !e.is_even() {
                result = (&result * &base).rem_euclid(modulus);
            }
            base = (&base * &base).rem_euclid(modulus);
            e = e / &two;
        }

        result
    }

    /// Draws a uniformly distributed integer from `[0, bound)`.
    ///
    /// 64 surplus random bits keep the modulo bias negligible.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is not positive.
    pub fn random_below<R: Rng + ?Sized>(bound: &Self, rng: &mut R) -> Self {
        assert!(bound.signum() > 0, "random bound must be positive");
        let mut bytes = vec![0u8; bound.bit_len() / 8 + 9];
        rng.fill(bytes.as_mut_slice());
        Self(IBig::from(UBig::from_le_bytes(&bytes))).rem_euclid(bound)
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Self::ONE
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Integer {
    type Err = AlgebraError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_radix(s, 10)
    }
}

/// Forwards a binary operator to `IBig` for owned, mixed and borrowed
/// operands.
macro_rules! forward_binop {
    ($($trait:ident :: $method:ident),* $(,)?) => {$(
        impl $trait for Integer {
            type Output = Integer;

            fn $method(self, rhs: Integer) -> Integer {
                Integer($trait::$method(self.0, rhs.0))
            }
        }

        impl $trait<&Integer> for Integer {
            type Output = Integer;

            fn $method(self, rhs: &Integer) -> Integer {
                Integer($trait::$method(self.0, &rhs.0))
            }
        }

        impl $trait for &Integer {
            type Output = Integer;

            fn $method(self, rhs: &Integer) -> Integer {
                Integer($trait::$method(&self.0, &rhs.0))
            }
        }
    )*};
}

forward_binop!(Add::add, Sub::sub, Mul::mul, Div::div, Rem::rem);

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        Integer(-&self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self(IBig::from(value))
    }
}

impl From<u32> for Integer {
    fn from(value: u32) -> Self {
        Self(IBig::from(value))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_basic_ops() {
        let a = Integer::new(10);
        let b = Integer::new(3);

        assert_eq!((a.clone() + b.clone()).to_i64(), Some(13));
        assert_eq!((a.clone() - b.clone()).to_i64(), Some(7));
        assert_eq!((a.clone() * b.clone()).to_i64(), Some(30));
        assert_eq!((a.clone() / b.clone()).to_i64(), Some(3));
        assert_eq!((a % b).to_i64(), Some(1));
    }

    #[test]
    fn test_operand_forms_agree() {
        let a = Integer::new(-17);
        let b = Integer::new(5);

        // truncating division, like i64
        assert_eq!(&a / &b, Integer::new(-3));
        assert_eq!(a.clone() % &b, Integer::new(-2));
        assert_eq!(&a % &b, a.clone() % b.clone());
        assert_eq!(a.clone() - &b, &a - &b);
        assert_eq!(a.clone() * &b, Integer::new(-85));
        assert_eq!(-&a, Integer::new(17));
    }

    #[test]
    fn test_truncating_division() {
        let a = Integer::new(-7);
        let b = Integer::new(2);
        assert_eq!((&a / &b).to_i64(), Some(-3));
        assert_eq!((&a % &b).to_i64(), Some(-1));
        assert_eq!(a.rem_euclid(&b).to_i64(), Some(1));
    }

    #[test]
    fn test_gcd() {
        let a = Integer::new(48);
        let b = Integer::new(-18);
        assert_eq!(a.gcd(&b).to_i64(), Some(6));
        assert_eq!(a.lcm(&b).to_i64(), Some(144));
    }

    #[test]
    fn test_signed_parsing() {
        assert_eq!("-42".parse::<Integer>().unwrap().to_i64(), Some(-42));
        assert_eq!("+42".parse::<Integer>().unwrap().to_i64(), Some(42));
        assert!("".parse::<Integer>().is_err());
        assert!("--1".parse::<Integer>().is_err());
        assert!("12a".parse::<Integer>().is_err());
    }

    #[test]
    fn test_large_numbers() {
        let a = Integer::from_str_radix("123456789012345678901234567890", 10).unwrap();
        let b = Integer::from_str_radix("987654321098765432109876543210", 10).unwrap();
        let sum = a + b;
        assert_eq!(sum.to_string(), "1111111110111111111011111111100");
        assert_eq!(sum.to_i64(), None);
    }

    #[test]
    fn test_pow_mod() {
        // 3^6 = 729 = 104 * 7 + 1
        let r = Integer::new(3).pow_mod(&Integer::new(6), &Integer::new(7));
        assert!(r.is_one());
        let r = Integer::new(-2).pow_mod(&Integer::new(3), &Integer::new(5));
        assert_eq!(r.to_i64(), Some(2));
    }

    #[test]
    fn test_random_below() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let bound = Integer::new(1000);
        for _ in 0..100 {
            let r = Integer::random_below(&bound, &mut rng);
            assert!(r >= Integer::ZERO && r < bound);
        }
    }
}
