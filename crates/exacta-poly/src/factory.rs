//! Factories of polynomial rings.

use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use exacta_rings::{AlgebraError, Result, Ring, RingFactory};

use crate::polynomial::Polynomial;

struct FactoryInner<B: Ring> {
    base: B::Factory,
}

/// The factory of the polynomial ring `B[x]`.
///
/// One factory exists per base factory, handed out by a
/// [`PolynomialRegistry`](crate::PolynomialRegistry). Factories compare
/// equal when their base factories do.
pub struct PolynomialFactory<B: Ring> {
    inner: Arc<FactoryInner<B>>,
}

impl<B: Ring> PolynomialFactory<B> {
    pub(crate) fn new(base: B::Factory) -> Self {
        Self {
            inner: Arc::new(FactoryInner { base }),
        }
    }

    /// Returns the factory of the coefficients.
    #[must_use]
    pub fn base(&self) -> &B::Factory {
        &self.inner.base
    }

    /// Returns true if both handles share the same state.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Builds a polynomial from `(exponent, coefficient)` pairs.
    ///
    /// Coefficients of repeated exponents are summed and zero coefficients
    /// are dropped, so the result is canonical whatever the input.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::IncompatibleOperands`] if a coefficient was
    /// not created by this factory's base.
    pub fn get<I>(&self, terms: I) -> Result<Polynomial<B>>
    where
        I: IntoIterator<Item = (u32, B)>,
    {
        let mut map: BTreeMap<u32, B> = BTreeMap::new();
        for (exponent, coefficient) in terms {
            self.check_coefficient(&coefficient)?;
            match map.get_mut(&exponent) {
                Some(existing) => *existing = existing.add(&coefficient)?,
                None => {
                    map.insert(exponent, coefficient);
                }
            }
        }
        map.retain(|_, c| !c.is_zero());
        Ok(Polynomial::from_map(map, self.clone()))
    }

    /// Builds `c_0 + c_1*x + c_2*x^2 + ...` from ascending coefficients.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PolynomialFactory::get`].
    pub fn from_coefficients<I>(&self, coefficients: I) -> Result<Polynomial<B>>
    where
        I: IntoIterator<Item = B>,
    {
        let mut terms = Vec::new();
        for (exponent, coefficient) in coefficients.into_iter().enumerate() {
            let exponent = u32::try_from(exponent)
                .map_err(|_| AlgebraError::invalid("too many coefficients"))?;
            terms.push((exponent, coefficient));
        }
        self.get(terms)
    }

    /// The constant polynomial `c`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PolynomialFactory::get`].
    pub fn constant(&self, c: B) -> Result<Polynomial<B>> {
        self.monomial(c, 0)
    }

    /// The monomial `c*x^exponent`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PolynomialFactory::get`].
    pub fn monomial(&self, c: B, exponent: u32) -> Result<Polynomial<B>> {
        self.get([(exponent, c)])
    }

    /// The indeterminate `x`.
    #[must_use]
    pub fn x(&self) -> Polynomial<B> {
        self.term(1, self.inner.base.one())
    }

    /// A monomial from a coefficient known to belong to the base.
    pub(crate) fn term(&self, exponent: u32, c: B) -> Polynomial<B> {
        let mut map = BTreeMap::new();
        if !c.is_zero() {
            map.insert(exponent, c);
        }
        Polynomial::from_map(map, self.clone())
    }

    fn check_coefficient(&self, c: &B) -> Result<()> {
        if c.factory() == self.inner.base {
            Ok(())
        } else {
            Err(AlgebraError::incompatible(format!(
                "{c:?} is not an element of {:?}",
                self.inner.base
            )))
        }
    }
}

impl<B: Ring> Clone for PolynomialFactory<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: Ring> PartialEq for PolynomialFactory<B> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner.base == other.inner.base
    }
}

impl<B: Ring> Eq for PolynomialFactory<B> {}

impl<B: Ring> Hash for PolynomialFactory<B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.base.hash(state);
    }
}

impl<B: Ring> fmt::Debug for PolynomialFactory<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PolynomialFactory({:?})", self.inner.base)
    }
}

impl<B: Ring> RingFactory for PolynomialFactory<B> {
    type Element = Polynomial<B>;

    fn zero(&self) -> Polynomial<B> {
        Polynomial::from_map(BTreeMap::new(), self.clone())
    }

    fn one(&self) -> Polynomial<B> {
        self.term(0, self.inner.base.one())
    }

    fn m_one(&self) -> Polynomial<B> {
        self.term(0, self.inner.base.m_one())
    }

    fn from_i64(&self, n: i64) -> Polynomial<B> {
        self.term(0, self.inner.base.from_i64(n))
    }

    fn from_f64(&self, value: f64) -> Result<Polynomial<B>> {
        Ok(self.term(0, self.inner.base.from_f64(value)?))
    }

    /// Parses a constant polynomial in the base's grammar.
    fn parse(&self, s: &str) -> Result<Polynomial<B>> {
        Ok(self.term(0, self.inner.base.parse(s)?))
    }

    fn random_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Polynomial<B>> {
        let _ = rng;
        Err(AlgebraError::invalid(format!(
            "{self:?} has no random distribution"
        )))
    }

    fn random_value_between<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        min: &Polynomial<B>,
        max: &Polynomial<B>,
    ) -> Result<Polynomial<B>> {
        let _ = (rng, min, max);
        Err(AlgebraError::invalid(format!(
            "{self:?} has no random distribution"
        )))
    }
}
