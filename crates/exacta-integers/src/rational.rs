//! Arbitrary precision rational numbers.
//!
//! A [`Rational`] is always in canonical form: the denominator is
//! positive, numerator and denominator are coprime, and zero is `0/1`.
//! Every constructor and every operation re-establishes that form, so
//! equality and hashing can compare the two parts directly.

use num_traits::{One, Zero};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{AlgebraError, Result};
use crate::Integer;

/// `[+-]?\d+\.?\d*([eE][+-]?\d+)?`: integers, decimals and exponential notation.
static EXPONENTIAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]?[0-9]+)\.?([0-9]*)(?:[eE]([+-]?[0-9]+))?$")
        .expect("exponential grammar is a valid regex")
});

/// `[+-]?\d+/[+-]?\d+`: fractions.
static FRACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]?[0-9]+)/([+-]?[0-9]+)$").expect("fraction grammar is a valid regex")
});

/// Largest power of ten a decimal or exponential string may scale by.
///
/// `1e1000000` already has a million digits; larger exponents are
/// rejected instead of allocating without bound.
pub const MAX_DECIMAL_EXPONENT: u64 = 1_000_000;

/// An arbitrary precision rational number in lowest terms.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numerator: Integer,
    denominator: Integer,
}

impl Rational {
    /// The rational 0.
    pub const ZERO: Self = Self {
        numerator: Integer::ZERO,
        denominator: Integer::ONE,
    };

    /// The rational 1.
    pub const ONE: Self = Self {
        numerator: Integer::ONE,
        denominator: Integer::ONE,
    };

    /// The rational -1.
    pub const MINUS_ONE: Self = Self {
        numerator: Integer::MINUS_ONE,
        denominator: Integer::ONE,
    };

    /// Builds `numerator / denominator`.
    ///
    /// When `cancel` is false the caller guarantees that the pair is
    /// already coprime; only the sign is normalised. Arithmetic that is
    /// known to preserve reduction uses this to skip a gcd.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] if the denominator is zero.
    pub fn from_parts(numerator: Integer, denominator: Integer, cancel: bool) -> Result<Self> {
        if denominator.is_zero() {
            return Err(AlgebraError::division_by_zero(format!(
                "{numerator}/0 has a zero denominator"
            )));
        }
        Ok(Self::canonical(numerator, denominator, cancel))
    }

    /// Builds the reduced fraction `numerator / denominator`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] if the denominator is zero.
    pub fn new(numerator: Integer, denominator: Integer) -> Result<Self> {
        Self::from_parts(numerator, denominator, true)
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        assert!(denominator != 0, "denominator cannot be zero");
        Self::canonical(Integer::new(numerator), Integer::new(denominator), true)
    }

    /// Creates a rational from an integer (denominator = 1).
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self::canonical(n, Integer::ONE, false)
    }

    /// Creates the exact value of a finite `f64`.
    ///
    /// The value goes through the shortest decimal string that round-trips
    /// to the same double, so `0.1` becomes `1/10` rather than the binary
    /// fraction nearest to it.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidOperation`] for NaN or infinities.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(AlgebraError::invalid(format!(
                "{value} does not represent a rational number"
            )));
        }
        if value == 0.0 {
            return Ok(Self::ZERO);
        }
        Self::parse(&format!("{value:e}"))
    }

    /// Parses an integer (`-12`), a decimal (`0.125`), an exponential
    /// (`22e-4`, `1.5E3`) or a fraction (`-3/4`).
    ///
    /// Decimal and exponential forms are converted through their decimal
    /// digits, never through a binary float.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidOperation`] if the string matches none
    /// of the grammars or scales by more than [`MAX_DECIMAL_EXPONENT`]
    /// powers of ten, and [`AlgebraError::DivisionByZero`] for a fraction
    /// with a zero denominator.
    pub fn parse(s: &str) -> Result<Self> {
        if let Some(caps) = EXPONENTIAL.captures(s) {
            let fraction = caps.get(2).map_or("", |m| m.as_str());
            let exponent = match caps.get(3) {
                Some(m) => m.as_str().parse::<i64>().map_err(|_| {
                    AlgebraError::invalid(format!("exponent of {s:?} is out of range"))
                })?,
                None => 0,
            };
            let power = i64::try_from(fraction.len())
                .ok()
                .and_then(|digits| exponent.checked_sub(digits))
                .filter(|power| power.unsigned_abs() <= MAX_DECIMAL_EXPONENT)
                .ok_or_else(|| {
                    AlgebraError::invalid(format!("exponent of {s:?} is out of range"))
                })?;
            let mantissa: Integer = format!("{}{}", &caps[1], fraction).parse()?;
            // bounded by MAX_DECIMAL_EXPONENT above
            let magnitude = u32::try_from(power.unsigned_abs()).unwrap_or(u32::MAX);
            let scale = Integer::new(10).pow(magnitude);
            return if power >= 0 {
                Ok(Self::canonical(mantissa * scale, Integer::ONE, false))
            } else {
                Ok(Self::canonical(mantissa, scale, true))
            };
        }

        if let Some(caps) = FRACTION.captures(s) {
            let numerator: Integer = caps[1].parse()?;
            let denominator: Integer = caps[2].parse()?;
            return Self::new(numerator, denominator);
        }

        Err(AlgebraError::invalid(format!(
            "{s:?} does not represent a rational number"
        )))
    }

    /// Builds a canonical rational from a non-zero denominator.
    fn canonical(mut numerator: Integer, mut denominator: Integer, cancel: bool) -> Self {
        if numerator.is_zero() {
            return Self::ZERO;
        }
        if cancel {
            let g = numerator.gcd(&denominator);
            if !g.is_one() {
                numerator = numerator / &g;
                denominator = denominator / &g;
            }
        }
        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }
        if denominator.is_one() {
            if numerator.is_one() {
                return Self::ONE;
            }
            if numerator == Integer::MINUS_ONE {
                return Self::MINUS_ONE;
            }
        }
        Self {
            numerator,
            denominator,
        }
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> &Integer {
        &self.numerator
    }

    /// Returns the (always positive) denominator.
    #[must_use]
    pub fn denominator(&self) -> &Integer {
        &self.denominator
    }

    /// Returns true if this rational is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    /// Converts to an integer if the denominator is 1.
    #[must_use]
    pub fn to_integer(&self) -> Option<Integer> {
        if self.is_integer() {
            Some(self.numerator.clone())
        } else {
            None
        }
    }

    /// Returns the sum of two rationals.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        let g = self.denominator.gcd(&other.denominator);
        let numerator = &self.numerator * &(&other.denominator / &g)
            + &other.numerator * &(&self.denominator / &g);
        let denominator = &self.denominator * &other.denominator / &g;
        Self::canonical(numerator, denominator, true)
    }

    /// Returns the difference of two rationals.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        Rational::add(self, &other.negate())
    }

    /// Returns the product of two rationals.
    ///
    /// Cancelling the cross gcds first keeps the result reduced without a
    /// gcd on the (larger) product.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::ZERO;
        }
        let d1 = self.numerator.gcd(&other.denominator);
        let d2 = self.denominator.gcd(&other.numerator);
        let numerator = (&self.numerator / &d1) * (&other.numerator / &d2);
        let denominator = (&self.denominator / &d2) * (&other.denominator / &d1);
        Self::canonical(numerator, denominator, false)
    }

    /// Returns the quotient of two rationals.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] if `other` is zero.
    pub fn divide(&self, other: &Self) -> Result<Self> {
        Ok(self.multiply(&other.invert()?))
    }

    /// Returns the additive inverse.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::canonical(-&self.numerator, self.denominator.clone(), false)
    }

    /// Returns the reciprocal: `6/5` becomes `5/6`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] if the rational is zero.
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(AlgebraError::division_by_zero("tried to invert zero"));
        }
        Ok(Self::canonical(
            self.denominator.clone(),
            self.numerator.clone(),
            false,
        ))
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            self.negate()
        } else {
            self.clone()
        }
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        self.numerator.signum()
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    /// Computes `self^exp`; negative exponents invert first.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] for zero raised to a
    /// negative power.
    pub fn pow(&self, exp: i32) -> Result<Self> {
        let base = if exp < 0 { self.invert()? } else { self.clone() };
        let e = exp.unsigned_abs();
        Ok(Self::canonical(
            base.numerator.pow(e),
            base.denominator.pow(e),
            false,
        ))
    }

    /// Returns `self * self`.
    #[must_use]
    pub fn square(&self) -> Self {
        self.multiply(self)
    }

    /// Returns the nearest-ish `f64`, with about 60 significant bits of the
    /// quotient carried into the conversion.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let shift = self.numerator.bit_len() as i64 - self.denominator.bit_len() as i64 - 60;
        let quotient = if shift >= 0 {
            &self.numerator / &self.denominator.shl(shift.unsigned_abs() as usize)
        } else {
            &self.numerator.shl(shift.unsigned_abs() as usize) / &self.denominator
        };
        let mantissa = quotient.to_i64().unwrap_or(0) as f64;
        let exponent = i32::try_from(shift).unwrap_or(if shift > 0 { i32::MAX } else { i32::MIN });
        // two steps, so 2^exponent alone cannot underflow a subnormal result
        let half = exponent / 2;
        mantissa * 2f64.powi(half) * 2f64.powi(exponent - half)
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self::ONE
    }

    fn is_one(&self) -> bool {
        self.numerator.is_one() && self.denominator.is_one()
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.denominator == other.denominator {
            return self.numerator.cmp(&other.numerator);
        }
        // denominators are positive, so cross multiplication keeps the order
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({}/{})", self.numerator, self.denominator)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl FromStr for Rational {
    type Err = AlgebraError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Arithmetic operations
impl std::ops::Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Rational::add(&self, &rhs)
    }
}

impl std::ops::Add<&Rational> for Rational {
    type Output = Self;

    fn add(self, rhs: &Rational) -> Self::Output {
        Rational::add(&self, rhs)
    }
}

impl std::ops::Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        Rational::add(self, rhs)
    }
}

impl std::ops::Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(&rhs)
    }
}

impl std::ops::Sub<&Rational> for Rational {
    type Output = Self;

    fn sub(self, rhs: &Rational) -> Self::Output {
        self.subtract(rhs)
    }
}

impl std::ops::Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(rhs)
    }
}

impl std::ops::Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&Rational> for Rational {
    type Output = Self;

    fn mul(self, rhs: &Rational) -> Self::Output {
        self.multiply(rhs)
    }
}

impl std::ops::Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs)
    }
}

impl std::ops::Div for Rational {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if `rhs` is zero; use [`Rational::divide`] to get an error.
    fn div(self, rhs: Self) -> Self::Output {
        match self.divide(&rhs) {
            Ok(q) => q,
            Err(e) => panic!("{e}"),
        }
    }
}

impl std::ops::Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::ops::Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(Integer::new(n))
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from_integer(Integer::from(n))
    }
}
