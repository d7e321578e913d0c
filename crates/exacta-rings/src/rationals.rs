//! The field of rational numbers Q.

use num_traits::{One, Zero};
use rand::Rng;
use rand_distr::StandardNormal;
use std::cmp::Ordering;

use exacta_integers::{AlgebraError, Rational, Result};

use crate::traits::{DivisionResult, EuclideanDomain, Field, Ring, RingFactory};

/// The factory of the field of rational numbers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct RationalField;

impl RationalField {
    /// Creates the reduced fraction `numerator / denominator`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] if the denominator is zero.
    pub fn fraction(self, numerator: i64, denominator: i64) -> Result<Rational> {
        Rational::new(numerator.into(), denominator.into())
    }
}

impl Ring for Rational {
    type Factory = RationalField;

    fn factory(&self) -> RationalField {
        RationalField
    }

    fn add(&self, other: &Self) -> Result<Self> {
        Ok(Rational::add(self, other))
    }

    fn subtract(&self, other: &Self) -> Result<Self> {
        Ok(Rational::subtract(self, other))
    }

    fn multiply(&self, other: &Self) -> Result<Self> {
        Ok(Rational::multiply(self, other))
    }

    fn negate(&self) -> Self {
        Rational::negate(self)
    }

    fn is_zero(&self) -> bool {
        Zero::is_zero(self)
    }

    fn is_one(&self) -> bool {
        One::is_one(self)
    }

    fn abs(&self) -> Result<Self> {
        Ok(Rational::abs(self))
    }

    fn compare(&self, other: &Self) -> Result<Ordering> {
        Ok(self.cmp(other))
    }

    fn square(&self) -> Result<Self> {
        Ok(Rational::square(self))
    }
}

impl EuclideanDomain for Rational {
    /// Division in a field is exact, so the remainder is always zero.
    fn euclidean_division(&self, divisor: &Self) -> Result<DivisionResult<Self>> {
        Ok(DivisionResult {
            quotient: Rational::divide(self, divisor)?,
            remainder: Rational::ZERO,
        })
    }
}

impl Field for Rational {
    fn invert(&self) -> Result<Self> {
        Rational::invert(self)
    }

    fn divide(&self, other: &Self) -> Result<Self> {
        Rational::divide(self, other)
    }
}

impl RingFactory for RationalField {
    type Element = Rational;

    fn zero(&self) -> Rational {
        Rational::ZERO
    }

    fn one(&self) -> Rational {
        Rational::ONE
    }

    fn m_one(&self) -> Rational {
        Rational::MINUS_ONE
    }

    fn from_i64(&self, n: i64) -> Rational {
        Rational::from(n)
    }

    fn from_f64(&self, value: f64) -> Result<Rational> {
        Rational::from_f64(value)
    }

    fn parse(&self, s: &str) -> Result<Rational> {
        Rational::parse(s)
    }

    /// A uniform double in `[0, 1)`, taken exactly.
    fn random_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Rational> {
        Rational::from_f64(rng.gen::<f64>())
    }

    fn random_value_between<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        min: &Rational,
        max: &Rational,
    ) -> Result<Rational> {
        if max < min {
            return Err(AlgebraError::invalid(format!(
                "empty range [{min}, {max}]"
            )));
        }
        let t = self.random_value(rng)?;
        Ok(Rational::add(&t.multiply(&max.subtract(min)), min))
    }

    fn gaussian_random_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Rational> {
        Rational::from_f64(rng.sample(StandardNormal))
    }
}
