//! The ring of integers Z.

use num_traits::{One, Zero};
use rand::Rng;
use rand_distr::StandardNormal;
use std::cmp::Ordering;

use exacta_integers::{AlgebraError, Integer, Rational, Result};

use crate::traits::{DivisionResult, EuclideanDomain, Ring, RingFactory};

/// The factory of the ring of integers.
///
/// There is exactly one ring of integers, so every `IntegerRing` is equal
/// to every other.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct IntegerRing;

impl Ring for Integer {
    type Factory = IntegerRing;

    fn factory(&self) -> IntegerRing {
        IntegerRing
    }

    fn add(&self, other: &Self) -> Result<Self> {
        Ok(self + other)
    }

    fn subtract(&self, other: &Self) -> Result<Self> {
        Ok(self - other)
    }

    fn multiply(&self, other: &Self) -> Result<Self> {
        Ok(self * other)
    }

    fn negate(&self) -> Self {
        -self
    }

    fn is_zero(&self) -> bool {
        Zero::is_zero(self)
    }

    fn is_one(&self) -> bool {
        One::is_one(self)
    }

    fn abs(&self) -> Result<Self> {
        Ok(Integer::abs(self))
    }

    fn compare(&self, other: &Self) -> Result<Ordering> {
        Ok(self.cmp(other))
    }
}

impl EuclideanDomain for Integer {
    /// Truncating division: the remainder has the sign of the dividend.
    fn euclidean_division(&self, divisor: &Self) -> Result<DivisionResult<Self>> {
        if Zero::is_zero(divisor) {
            return Err(AlgebraError::division_by_zero(format!(
                "{self} divided by zero"
            )));
        }
        Ok(DivisionResult {
            quotient: self / divisor,
            remainder: self % divisor,
        })
    }
}

impl RingFactory for IntegerRing {
    type Element = Integer;

    fn zero(&self) -> Integer {
        Integer::ZERO
    }

    fn one(&self) -> Integer {
        Integer::ONE
    }

    fn m_one(&self) -> Integer {
        Integer::MINUS_ONE
    }

    fn from_i64(&self, n: i64) -> Integer {
        Integer::new(n)
    }

    /// Truncates towards zero.
    fn from_f64(&self, value: f64) -> Result<Integer> {
        let exact = Rational::from_f64(value.trunc())?;
        Ok(exact.numerator().clone())
    }

    fn parse(&self, s: &str) -> Result<Integer> {
        s.parse()
    }

    fn random_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Integer> {
        Ok(Integer::from(rng.gen::<i32>()))
    }

    fn random_value_between<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        min: &Integer,
        max: &Integer,
    ) -> Result<Integer> {
        if max < min {
            return Err(AlgebraError::invalid(format!(
                "empty range [{min}, {max}]"
            )));
        }
        let span = max - min + Integer::ONE;
        Ok(Integer::random_below(&span, rng) + min)
    }

    fn gaussian_random_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Integer> {
        let sample: f64 = rng.sample(StandardNormal);
        self.from_f64(sample.round())
    }
}
