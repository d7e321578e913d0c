//! Sparse univariate polynomials.
//!
//! A [`Polynomial`] stores only its non-zero terms, keyed by exponent.
//! Operations never mutate a polynomial; each one assembles a fresh term
//! map, so every value is canonical: no zero coefficients, and the zero
//! polynomial is the empty map.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use exacta_rings::euclid;
use exacta_rings::{
    AlgebraError, DivisionResult, EuclideanDomain, Field, Result, Ring, RingFactory,
};

use crate::factory::PolynomialFactory;

/// A sparse polynomial in one indeterminate over the ring `B`.
#[derive(Clone)]
pub struct Polynomial<B: Ring> {
    /// Non-zero coefficients by exponent.
    terms: BTreeMap<u32, B>,
    factory: PolynomialFactory<B>,
}

impl<B: Ring> Polynomial<B> {
    pub(crate) fn from_map(terms: BTreeMap<u32, B>, factory: PolynomialFactory<B>) -> Self {
        debug_assert!(terms.values().all(|c| !c.is_zero()));
        Self { terms, factory }
    }

    fn with_terms(&self, terms: BTreeMap<u32, B>) -> Self {
        Self::from_map(terms, self.factory.clone())
    }

    /// Returns the factory of this polynomial's ring.
    #[must_use]
    pub fn polynomial_factory(&self) -> &PolynomialFactory<B> {
        &self.factory
    }

    /// Returns the factory of the coefficients.
    #[must_use]
    pub fn base_factory(&self) -> &B::Factory {
        self.factory.base()
    }

    /// Returns the highest exponent, or 0 for the zero polynomial.
    #[must_use]
    pub fn degree(&self) -> u32 {
        self.terms.keys().next_back().copied().unwrap_or(0)
    }

    /// Returns the number of non-zero terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if the polynomial is a constant (including zero).
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.degree() == 0
    }

    /// Iterates over `(exponent, coefficient)` in ascending exponent order.
    pub fn terms(&self) -> impl DoubleEndedIterator<Item = (u32, &B)> + '_ {
        self.terms.iter().map(|(e, c)| (*e, c))
    }

    /// Returns the coefficient of `x^exponent`.
    #[must_use]
    pub fn coefficient(&self, exponent: u32) -> B {
        self.terms
            .get(&exponent)
            .cloned()
            .unwrap_or_else(|| self.base_factory().zero())
    }

    /// Returns the coefficient of the highest power, or zero.
    #[must_use]
    pub fn leading_coefficient(&self) -> B {
        self.terms
            .values()
            .next_back()
            .cloned()
            .unwrap_or_else(|| self.base_factory().zero())
    }

    /// Returns the coefficient of the lowest power, or zero.
    #[must_use]
    pub fn lowest_coefficient(&self) -> B {
        self.terms
            .values()
            .next()
            .cloned()
            .unwrap_or_else(|| self.base_factory().zero())
    }

    /// Returns the polynomial without its leading term.
    #[must_use]
    pub fn without_highest_power(&self) -> Self {
        let mut terms = self.terms.clone();
        terms.pop_last();
        self.with_terms(terms)
    }

    /// The degree as a constant polynomial; a Euclidean norm.
    #[must_use]
    pub fn norm(&self) -> Self {
        self.factory
            .term(0, self.base_factory().from_i64(i64::from(self.degree())))
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        if self.factory == other.factory {
            Ok(())
        } else {
            Err(AlgebraError::incompatible(format!(
                "{:?} and {:?} differ",
                self.factory, other.factory
            )))
        }
    }

    fn check_coefficient(&self, c: &B) -> Result<()> {
        if c.factory() == *self.base_factory() {
            Ok(())
        } else {
            Err(AlgebraError::incompatible(format!(
                "{c:?} is not an element of {:?}",
                self.base_factory()
            )))
        }
    }

    /// Merges two sorted term sequences, summing coefficients of equal
    /// exponents and dropping sums that vanish.
    fn merge_add(&self, other: &Self) -> Result<Self> {
        let left: Vec<(u32, &B)> = self.terms().collect();
        let right: Vec<(u32, &B)> = other.terms().collect();
        let mut merged = Vec::with_capacity(left.len() + right.len());

        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            let (el, cl) = left[i];
            let (er, cr) = right[j];
            match el.cmp(&er) {
                Ordering::Less => {
                    merged.push((el, cl.clone()));
                    i += 1;
                }
                Ordering::Greater => {
                    merged.push((er, cr.clone()));
                    j += 1;
                }
                Ordering::Equal => {
                    let sum = cl.add(cr)?;
                    if !sum.is_zero() {
                        merged.push((el, sum));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend(left[i..].iter().map(|(e, c)| (*e, (*c).clone())));
        merged.extend(right[j..].iter().map(|(e, c)| (*e, (*c).clone())));

        Ok(self.with_terms(merged.into_iter().collect()))
    }

    /// Computes `c * x^shift * self`.
    fn shift_scale(&self, c: &B, shift: u32) -> Result<Self> {
        let mut terms = BTreeMap::new();
        for (e, coefficient) in &self.terms {
            let exponent = e.checked_add(shift).ok_or_else(|| {
                AlgebraError::invalid(format!("exponent {e} + {shift} overflows"))
            })?;
            let product = coefficient.multiply(c)?;
            if !product.is_zero() {
                terms.insert(exponent, product);
            }
        }
        Ok(self.with_terms(terms))
    }

    /// Multiplies every coefficient by `c`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::IncompatibleOperands`] if `c` is not an
    /// element of the base.
    pub fn scale(&self, c: &B) -> Result<Self> {
        self.check_coefficient(c)?;
        self.shift_scale(c, 0)
    }

    /// Evaluates the polynomial at `x` with Horner's scheme.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::IncompatibleOperands`] if `x` is not an
    /// element of the base.
    pub fn evaluate(&self, x: &B) -> Result<B> {
        self.check_coefficient(x)?;
        let mut acc = self.base_factory().zero();
        let mut previous: Option<u32> = None;
        for (e, c) in self.terms.iter().rev() {
            if let Some(p) = previous {
                acc = acc.multiply(&x.pow(p - e)?)?;
            }
            acc = acc.add(c)?;
            previous = Some(*e);
        }
        if let Some(p) = previous {
            acc = acc.multiply(&x.pow(p)?)?;
        }
        Ok(acc)
    }

    /// Returns the formal derivative.
    ///
    /// # Errors
    ///
    /// Propagates coefficient arithmetic errors.
    pub fn derivative(&self) -> Result<Self> {
        let mut terms = BTreeMap::new();
        for (e, c) in self.terms.range(1..) {
            let d = c.multiply(&self.base_factory().from_i64(i64::from(*e)))?;
            if !d.is_zero() {
                terms.insert(e - 1, d);
            }
        }
        Ok(self.with_terms(terms))
    }
}

impl<B: Field> Polynomial<B> {
    /// Scales the polynomial so its leading coefficient is one.
    ///
    /// The zero polynomial stays zero.
    ///
    /// # Errors
    ///
    /// Propagates coefficient arithmetic errors.
    pub fn monic(&self) -> Result<Self> {
        if self.terms.is_empty() {
            return Ok(self.clone());
        }
        self.shift_scale(&self.leading_coefficient().invert()?, 0)
    }

    /// Returns the monic greatest common divisor.
    ///
    /// `gcd(p, p)` is `p.monic()`, and `gcd(0, 0)` is zero.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::IncompatibleOperands`] for polynomials over
    /// different bases.
    pub fn gcd(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        euclid::gcd(self, other)?.monic()
    }

    /// Returns `(g, s, t)` with `g = self*s + other*t` and `g` monic.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::IncompatibleOperands`] for polynomials over
    /// different bases.
    pub fn extended_gcd(&self, other: &Self) -> Result<(Self, Self, Self)> {
        self.check_compatible(other)?;
        let (g, s, t) = euclid::extended_gcd(self, other)?;
        if g.terms.is_empty() {
            return Ok((g, s, t));
        }
        let unit = g.leading_coefficient().invert()?;
        Ok((
            g.shift_scale(&unit, 0)?,
            s.shift_scale(&unit, 0)?,
            t.shift_scale(&unit, 0)?,
        ))
    }

    /// Returns the antiderivative with zero constant term.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] if some `exponent + 1`
    /// vanishes in the base (a multiple of the characteristic).
    ///
    /// Only polynomials over a field can be integrated:
    ///
    /// ```compile_fail
    /// use exacta_poly::PolynomialRegistry;
    /// use exacta_rings::IntegerRing;
    ///
    /// let zx = PolynomialRegistry::global().factory(&IntegerRing);
    /// let _ = zx.x().integrate();
    /// ```
    pub fn integrate(&self) -> Result<Self> {
        let mut terms = BTreeMap::new();
        for (e, c) in &self.terms {
            let exponent = e.checked_add(1).ok_or_else(|| {
                AlgebraError::invalid(format!("exponent {e} + 1 overflows"))
            })?;
            let divisor = self.base_factory().from_i64(i64::from(exponent));
            terms.insert(exponent, c.divide(&divisor)?);
        }
        Ok(self.with_terms(terms))
    }

    /// Returns the squarefree part `p / gcd(p, p')`, made monic.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] for the zero polynomial.
    pub fn minimal_polynomial(&self) -> Result<Self> {
        if self.degree() <= 1 {
            return self.divide_scalar(&self.leading_coefficient());
        }
        let g = self.gcd(&self.derivative()?)?;
        let DivisionResult { quotient, .. } = self.euclidean_division(&g)?;
        quotient.monic()
    }

    /// Exact division by another polynomial.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidOperation`] if the division leaves a
    /// remainder; use [`EuclideanDomain::euclidean_division`] for that.
    pub fn divide(&self, divisor: &Self) -> Result<Self> {
        let DivisionResult {
            quotient,
            remainder,
        } = self.euclidean_division(divisor)?;
        if remainder.terms.is_empty() {
            Ok(quotient)
        } else {
            Err(AlgebraError::invalid(format!(
                "{self} cannot be divided by {divisor} without a remainder"
            )))
        }
    }

    /// Divides every coefficient by `c`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] if `c` is zero.
    pub fn divide_scalar(&self, c: &B) -> Result<Self> {
        self.check_coefficient(c)?;
        self.shift_scale(&c.invert()?, 0)
    }

    /// Inverts a non-zero constant polynomial.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidOperation`] for positive degree, since
    /// the inverse is not a polynomial, and
    /// [`AlgebraError::DivisionByZero`] for the zero polynomial.
    pub fn invert(&self) -> Result<Self> {
        if self.degree() > 0 {
            return Err(AlgebraError::invalid(format!(
                "{self} inverted does not result in a polynomial"
            )));
        }
        let inverse = self.leading_coefficient().invert()?;
        Ok(self.factory.term(0, inverse))
    }
}

impl<B: Ring> Ring for Polynomial<B> {
    type Factory = PolynomialFactory<B>;

    fn factory(&self) -> PolynomialFactory<B> {
        self.factory.clone()
    }

    fn add(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        self.merge_add(other)
    }

    fn subtract(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        self.merge_add(&other.negate())
    }

    /// Convolution: each term of `other` scales and shifts a copy of
    /// `self`, which is merged into the running sum.
    fn multiply(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        let mut result = self.factory.zero();
        if self.terms.is_empty() || other.terms.is_empty() {
            return Ok(result);
        }
        for (e, c) in &other.terms {
            result = result.merge_add(&self.shift_scale(c, *e)?)?;
        }
        Ok(result)
    }

    fn negate(&self) -> Self {
        self.with_terms(
            self.terms
                .iter()
                .map(|(e, c)| (*e, c.negate()))
                .collect(),
        )
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    fn is_one(&self) -> bool {
        self.terms.len() == 1 && self.terms.get(&0).is_some_and(Ring::is_one)
    }

    fn abs(&self) -> Result<Self> {
        Err(AlgebraError::invalid(
            "the absolute value of a polynomial is not a polynomial",
        ))
    }

    /// Orders by degree, then by leading coefficient, then by the
    /// remaining terms in descending order.
    fn compare(&self, other: &Self) -> Result<Ordering> {
        self.check_compatible(other)?;
        let zero = self.base_factory().zero();
        let mut left = self.terms.iter().rev();
        let mut right = other.terms.iter().rev();
        loop {
            let ordering = match (left.next(), right.next()) {
                (None, None) => return Ok(Ordering::Equal),
                (Some((el, cl)), Some((er, cr))) => match el.cmp(er) {
                    Ordering::Equal => cl.compare(cr)?,
                    unequal => unequal,
                },
                (Some((el, cl)), None) => match el.cmp(&0) {
                    Ordering::Equal => cl.compare(&zero)?,
                    unequal => unequal,
                },
                (None, Some((er, cr))) => match 0u32.cmp(er) {
                    Ordering::Equal => zero.compare(cr)?,
                    unequal => unequal,
                },
            };
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }
    }
}

impl<B: Field> EuclideanDomain for Polynomial<B> {
    /// Long division.
    ///
    /// Each step cancels the leading term of the running remainder, so its
    /// degree strictly decreases until it drops below the divisor's.
    fn euclidean_division(&self, divisor: &Self) -> Result<DivisionResult<Self>> {
        self.check_compatible(divisor)?;
        if divisor.terms.is_empty() {
            return Err(AlgebraError::division_by_zero(format!(
                "{self} divided by the zero polynomial"
            )));
        }

        let lead_inverse = divisor.leading_coefficient().invert()?;
        let divisor_degree = divisor.degree();
        let mut quotient = BTreeMap::new();
        let mut remainder = self.clone();

        while let Some((&degree, lead)) = remainder.terms.last_key_value() {
            if degree < divisor_degree {
                break;
            }
            let shift = degree - divisor_degree;
            let factor = lead.multiply(&lead_inverse)?;
            let step = divisor.shift_scale(&factor.negate(), shift)?;
            remainder = remainder.merge_add(&step)?;
            quotient.insert(shift, factor);
        }

        Ok(DivisionResult {
            quotient: self.with_terms(quotient),
            remainder,
        })
    }
}

impl<B: Ring> PartialEq for Polynomial<B> {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms && self.factory == other.factory
    }
}

impl<B: Ring> Eq for Polynomial<B> {}

impl<B: Ring> Hash for Polynomial<B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.terms.hash(state);
        self.factory.hash(state);
    }
}

impl<B: Ring> fmt::Debug for Polynomial<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polynomial({self})")
    }
}
