//! Algebraic structure traits.
//!
//! This module defines the element and factory contracts that every
//! value type of the kernel implements, and that the polynomial ring is
//! generic over.
//!
//! Every value knows the factory it came from. Two values can only be
//! combined when their factories are equal; mixing them is reported as
//! [`AlgebraError::IncompatibleOperands`], never coerced.

use rand::Rng;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use exacta_integers::{AlgebraError, Result};

/// A ring element.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `factory().zero()`
/// - Multiplication is associative with identity `factory().one()`
/// - Multiplication distributes over addition
/// - Every element has an additive inverse (`negate`)
///
/// Binary operations return `Result` because the operands may belong to
/// different instances of the same structure (two prime fields, two
/// polynomial rings over different bases).
pub trait Ring: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static {
    /// The factory that creates elements of this ring.
    type Factory: RingFactory<Element = Self>;

    /// Returns the factory this element belongs to.
    fn factory(&self) -> Self::Factory;

    /// Returns `self + other`.
    ///
    /// # Errors
    ///
    /// Fails with [`AlgebraError::IncompatibleOperands`] if the operands
    /// come from different factories.
    fn add(&self, other: &Self) -> Result<Self>;

    /// Returns `self - other`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Ring::add`].
    fn subtract(&self, other: &Self) -> Result<Self> {
        self.add(&other.negate())
    }

    /// Returns `self * other`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Ring::add`].
    fn multiply(&self, other: &Self) -> Result<Self>;

    /// Returns the additive inverse.
    fn negate(&self) -> Self;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// Returns true if this is the multiplicative identity.
    fn is_one(&self) -> bool;

    /// Returns the absolute value.
    ///
    /// # Errors
    ///
    /// Fails with [`AlgebraError::InvalidOperation`] for rings without a
    /// meaningful absolute value.
    fn abs(&self) -> Result<Self>;

    /// Compares two elements of the same ring.
    ///
    /// # Errors
    ///
    /// Fails with [`AlgebraError::IncompatibleOperands`] if the operands
    /// come from different factories.
    fn compare(&self, other: &Self) -> Result<Ordering>;

    /// Returns true if `self < other`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Ring::compare`].
    fn lt(&self, other: &Self) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    /// Returns true if `self > other`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Ring::compare`].
    fn gt(&self, other: &Self) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Greater)
    }

    /// Returns `self * self`.
    ///
    /// # Errors
    ///
    /// Never fails for a well-formed element; the `Result` follows
    /// [`Ring::multiply`].
    fn square(&self) -> Result<Self> {
        self.multiply(self)
    }

    /// Computes self^n for non-negative n.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Ring::multiply`].
    fn pow(&self, n: u32) -> Result<Self> {
        let mut result = self.factory().one();
        if n == 0 {
            return Ok(result);
        }

        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.multiply(&base)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.square()?;
            }
        }

        Ok(result)
    }

    /// Computes self + self + ... (n times).
    ///
    /// # Errors
    ///
    /// Same conditions as [`Ring::multiply`].
    fn mul_by_scalar(&self, n: i64) -> Result<Self> {
        self.multiply(&self.factory().from_i64(n))
    }
}

/// Creates the elements of one ring.
///
/// Factories are cheap handles. Two factories compare equal exactly when
/// they create elements that may be combined.
pub trait RingFactory: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// The type of the elements this factory creates.
    type Element: Ring;

    /// The additive identity.
    fn zero(&self) -> Self::Element;

    /// The multiplicative identity.
    fn one(&self) -> Self::Element;

    /// The additive inverse of one.
    fn m_one(&self) -> Self::Element;

    /// The image of an integer in this ring.
    fn from_i64(&self, n: i64) -> Self::Element;

    /// The image of a floating point value in this ring.
    ///
    /// # Errors
    ///
    /// Fails with [`AlgebraError::InvalidOperation`] for values the ring
    /// cannot represent.
    fn from_f64(&self, value: f64) -> Result<Self::Element>;

    /// Parses an element from its textual form.
    ///
    /// # Errors
    ///
    /// Fails with [`AlgebraError::InvalidOperation`] if the string cannot
    /// be parsed.
    fn parse(&self, s: &str) -> Result<Self::Element>;

    /// Draws a random element.
    ///
    /// # Errors
    ///
    /// Fails with [`AlgebraError::InvalidOperation`] if the ring has no
    /// meaningful distribution.
    fn random_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self::Element>;

    /// Draws a random element between `min` and `max`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`RingFactory::random_value`], plus
    /// [`AlgebraError::IncompatibleOperands`] for bounds from another ring.
    fn random_value_between<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        min: &Self::Element,
        max: &Self::Element,
    ) -> Result<Self::Element>;

    /// Draws a normally distributed element.
    ///
    /// # Errors
    ///
    /// Same conditions as [`RingFactory::random_value`].
    fn gaussian_random_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self::Element> {
        let _ = rng;
        Err(AlgebraError::invalid(format!(
            "{self:?} has no gaussian distribution"
        )))
    }
}

/// A Euclidean domain supports division with remainder.
///
/// For any a, b with b ≠ 0, there exist q, r such that:
/// - a = b*q + r
/// - Either r = 0 or φ(r) < φ(b) for some Euclidean function φ
pub trait EuclideanDomain: Ring {
    /// Computes the quotient and remainder of division.
    ///
    /// # Errors
    ///
    /// Fails with [`AlgebraError::DivisionByZero`] if `divisor` is zero.
    fn euclidean_division(&self, divisor: &Self) -> Result<DivisionResult<Self>>;

    /// Computes the remainder of division.
    ///
    /// # Errors
    ///
    /// Same conditions as [`EuclideanDomain::euclidean_division`].
    fn remainder(&self, divisor: &Self) -> Result<Self> {
        Ok(self.euclidean_division(divisor)?.remainder)
    }
}

/// A field is a ring where every non-zero element has a multiplicative inverse.
pub trait Field: EuclideanDomain {
    /// Computes the multiplicative inverse.
    ///
    /// # Errors
    ///
    /// Fails with [`AlgebraError::DivisionByZero`] if the element is zero.
    fn invert(&self) -> Result<Self>;

    /// Divides by another element.
    ///
    /// # Errors
    ///
    /// Fails with [`AlgebraError::DivisionByZero`] if `other` is zero.
    fn divide(&self, other: &Self) -> Result<Self> {
        self.multiply(&other.invert()?)
    }
}

/// Quotient and remainder of a Euclidean division.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DivisionResult<T> {
    /// The quotient.
    pub quotient: T,
    /// The remainder; zero or of smaller measure than the divisor.
    pub remainder: T,
}

impl<T> DivisionResult<T> {
    /// Splits into `(quotient, remainder)`.
    pub fn into_parts(self) -> (T, T) {
        (self.quotient, self.remainder)
    }
}

impl<T: Display> Display for DivisionResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rem {}", self.quotient, self.remainder)
    }
}
