//! The Euclidean algorithm over any Euclidean domain.
//!
//! Both routines only need [`EuclideanDomain::euclidean_division`], so the
//! same code computes integer gcds and polynomial gcds.

use exacta_integers::Result;

use crate::traits::{DivisionResult, EuclideanDomain, Ring, RingFactory};

/// Computes a greatest common divisor of `a` and `b`.
///
/// The result is not normalised: over the integers its sign depends on
/// the inputs, over a polynomial ring it is defined up to a unit. Callers
/// that need a canonical representative normalise afterwards.
///
/// # Errors
///
/// Propagates errors from the division step (incompatible operands).
pub fn gcd<T: EuclideanDomain>(a: &T, b: &T) -> Result<T> {
    let mut a = a.clone();
    let mut b = b.clone();

    while !b.is_zero() {
        let r = a.remainder(&b)?;
        a = b;
        b = r;
    }

    Ok(a)
}

/// Extended Euclidean algorithm.
///
/// Returns `(g, s, t)` such that `g = a*s + b*t` and `g` is the same
/// (unnormalised) gcd that [`gcd`] returns.
///
/// # Errors
///
/// Propagates errors from the division step (incompatible operands).
pub fn extended_gcd<T: EuclideanDomain>(a: &T, b: &T) -> Result<(T, T, T)> {
    let factory = a.factory();
    let mut old_r = a.clone();
    let mut r = b.clone();
    let mut old_s = factory.one();
    let mut s = factory.zero();
    let mut old_t = factory.zero();
    let mut t = factory.one();

    while !r.is_zero() {
        let DivisionResult {
            quotient,
            remainder,
        } = old_r.euclidean_division(&r)?;
        old_r = std::mem::replace(&mut r, remainder);

        let next_s = old_s.subtract(&quotient.multiply(&s)?)?;
        old_s = std::mem::replace(&mut s, next_s);

        let next_t = old_t.subtract(&quotient.multiply(&t)?)?;
        old_t = std::mem::replace(&mut t, next_t);
    }

    Ok((old_r, old_s, old_t))
}
