//! Prime fields F_p with a runtime modulus.
//!
//! A [`PrimeField`] is a cheap handle on shared per-field state: the
//! modulus and the inverse cache. Fields are normally obtained from a
//! [`FieldRegistry`](crate::FieldRegistry), which hands out one shared
//! instance per prime.
//!
//! Two residue widths exist. Moduli below 2^32 use machine words, since
//! the product of two residues then fits in a `u64`; larger moduli use
//! [`Integer`]. The width is fixed when the field is created.

use log::{debug, trace};
use num_traits::{One, Zero};
use parking_lot::Mutex;
use rand::Rng;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use exacta_integers::modular::{
    add_word, inv_big, inv_word, mul_word, neg_word, normalize_big, normalize_word, sub_word,
};
use exacta_integers::{AlgebraError, Integer, Rational, Result};

use crate::traits::{DivisionResult, EuclideanDomain, Field, Ring, RingFactory};

/// The modulus of a prime field, in the width its residues use.
///
/// The derived order puts every word modulus before every big one; since
/// a modulus is a word exactly when it is below 2^32, that order agrees
/// with numeric order.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Modulus {
    /// A modulus below 2^32.
    Word(u64),
    /// A modulus of at least 2^32.
    Big(Integer),
}

impl Modulus {
    /// Picks the width for `p`.
    #[must_use]
    pub fn new(p: &Integer) -> Self {
        match p.to_u64() {
            Some(word) if word.checked_mul(word).is_some() => Self::Word(word),
            _ => Self::Big(p.clone()),
        }
    }

    /// The modulus as an integer.
    #[must_use]
    pub fn to_integer(&self) -> Integer {
        match self {
            Self::Word(p) => Integer::from(*p),
            Self::Big(p) => p.clone(),
        }
    }

    /// The residue width of this modulus.
    #[must_use]
    pub fn representation(&self) -> Representation {
        match self {
            Self::Word(_) => Representation::Word,
            Self::Big(_) => Representation::BigPrecision,
        }
    }
}

impl fmt::Display for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(p) => write!(f, "{p}"),
            Self::Big(p) => write!(f, "{p}"),
        }
    }
}

/// How the residues of a field are stored.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Representation {
    /// Machine words with 128-bit intermediate products.
    Word,
    /// Arbitrary precision integers.
    BigPrecision,
}

/// A residue in `[0, p)`.
#[derive(Clone, PartialEq, Eq, Hash)]
enum Residue {
    Word(u64),
    Big(Integer),
}

impl Residue {
    fn to_integer(&self) -> Integer {
        match self {
            Self::Word(r) => Integer::from(*r),
            Self::Big(r) => r.clone(),
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Self::Word(r) => *r == 0,
            Self::Big(r) => Zero::is_zero(r),
        }
    }

    fn is_one(&self) -> bool {
        match self {
            Self::Word(r) => *r == 1,
            Self::Big(r) => One::is_one(r),
        }
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(r) => write!(f, "{r}"),
            Self::Big(r) => write!(f, "{r}"),
        }
    }
}

/// Where computed inverses are remembered.
enum InverseCache {
    /// One slot per residue, allocated on the first inversion. Zero marks
    /// an empty slot, since zero is never an inverse.
    Table(Mutex<Vec<u32>>),
    /// Inverses of the values inverted so far, stored in both directions.
    PerValue(Mutex<FxHashMap<Residue, Residue>>),
}

struct FieldInner {
    modulus: Modulus,
    inverses: InverseCache,
}

/// The field of integers modulo a prime.
///
/// Cloning is cheap and clones share the inverse cache. Equality is by
/// modulus, so handles from different registries still combine.
#[derive(Clone)]
pub struct PrimeField {
    inner: Arc<FieldInner>,
}

impl PrimeField {
    /// Creates a field without checking that `p` is prime.
    ///
    /// Moduli up to `inverse_table_boundary` get a shared inverse table,
    /// larger ones cache inverses per value. Use
    /// [`FieldRegistry::field`](crate::FieldRegistry::field) to get
    /// checked, shared instances.
    pub(crate) fn with_boundary(p: &Integer, inverse_table_boundary: u64) -> Self {
        let modulus = Modulus::new(p);
        let inverses = match &modulus {
            Modulus::Word(word) if *word <= inverse_table_boundary => {
                InverseCache::Table(Mutex::new(Vec::new()))
            }
            _ => InverseCache::PerValue(Mutex::new(FxHashMap::default())),
        };
        Self {
            inner: Arc::new(FieldInner { modulus, inverses }),
        }
    }

    /// Returns the modulus.
    #[must_use]
    pub fn modulus(&self) -> &Modulus {
        &self.inner.modulus
    }

    /// Returns the characteristic p.
    #[must_use]
    pub fn characteristic(&self) -> Integer {
        self.inner.modulus.to_integer()
    }

    /// Returns the residue width chosen for this field.
    #[must_use]
    pub fn representation(&self) -> Representation {
        self.inner.modulus.representation()
    }

    /// Returns true if the field keeps a shared inverse table.
    #[must_use]
    pub fn uses_inverse_table(&self) -> bool {
        matches!(self.inner.inverses, InverseCache::Table(_))
    }

    /// Returns true if both handles share the same state.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The residue class of `n`.
    #[must_use]
    pub fn get(&self, n: i64) -> PrimeFieldElement {
        let residue = match &self.inner.modulus {
            Modulus::Word(p) => Residue::Word(normalize_word(n, *p)),
            Modulus::Big(p) => Residue::Big(normalize_big(&Integer::new(n), p)),
        };
        self.element(residue)
    }

    /// The residue class of an arbitrary integer.
    #[must_use]
    pub fn get_integer(&self, n: &Integer) -> PrimeFieldElement {
        let residue = self.reduce(n);
        self.element(residue)
    }

    /// Returns true if the inverse of `x` has already been computed.
    #[must_use]
    pub fn is_inverse_cached(&self, x: &PrimeFieldElement) -> bool {
        if self != &x.field {
            return false;
        }
        match (&self.inner.inverses, &x.residue) {
            (InverseCache::Table(table), Residue::Word(r)) => {
                let table = table.lock();
                usize::try_from(*r)
                    .ok()
                    .and_then(|i| table.get(i))
                    .is_some_and(|slot| *slot != 0)
            }
            (InverseCache::PerValue(map), residue) => map.lock().contains_key(residue),
            (InverseCache::Table(_), Residue::Big(_)) => false,
        }
    }

    fn element(&self, residue: Residue) -> PrimeFieldElement {
        PrimeFieldElement {
            residue,
            field: self.clone(),
        }
    }

    /// Reduces an integer into the field's residue width.
    fn reduce(&self, n: &Integer) -> Residue {
        match &self.inner.modulus {
            Modulus::Word(p) => {
                let r = normalize_big(n, &Integer::from(*p));
                // r < p < 2^32
                Residue::Word(r.to_u64().unwrap_or_default())
            }
            Modulus::Big(p) => Residue::Big(normalize_big(n, p)),
        }
    }

    fn add_residues(&self, a: &Residue, b: &Residue) -> Residue {
        match (&self.inner.modulus, a, b) {
            (Modulus::Word(p), Residue::Word(x), Residue::Word(y)) => {
                Residue::Word(add_word(*x, *y, *p))
            }
            _ => self.reduce(&(a.to_integer() + b.to_integer())),
        }
    }

    fn sub_residues(&self, a: &Residue, b: &Residue) -> Residue {
        match (&self.inner.modulus, a, b) {
            (Modulus::Word(p), Residue::Word(x), Residue::Word(y)) => {
                Residue::Word(sub_word(*x, *y, *p))
            }
            _ => self.reduce(&(a.to_integer() - b.to_integer())),
        }
    }

    fn mul_residues(&self, a: &Residue, b: &Residue) -> Residue {
        match (&self.inner.modulus, a, b) {
            (Modulus::Word(p), Residue::Word(x), Residue::Word(y)) => {
                Residue::Word(mul_word(*x, *y, *p))
            }
            _ => self.reduce(&(a.to_integer() * b.to_integer())),
        }
    }

    fn neg_residue(&self, a: &Residue) -> Residue {
        match (&self.inner.modulus, a) {
            (Modulus::Word(p), Residue::Word(x)) => Residue::Word(neg_word(*x, *p)),
            _ => self.reduce(&(-a.to_integer())),
        }
    }

    fn compute_inverse(&self, a: &Residue) -> Result<Residue> {
        match (&self.inner.modulus, a) {
            (Modulus::Word(p), Residue::Word(x)) => Ok(Residue::Word(inv_word(*x, *p)?)),
            (modulus, _) => Ok(self.reduce(&inv_big(&a.to_integer(), &modulus.to_integer())?)),
        }
    }

    /// Looks up or computes the inverse of a non-zero residue.
    fn inverse_of(&self, a: &Residue) -> Result<Residue> {
        match (&self.inner.inverses, a) {
            (InverseCache::Table(table), Residue::Word(x)) => {
                let mut table = table.lock();
                if table.is_empty() {
                    let size = match &self.inner.modulus {
                        Modulus::Word(p) => usize::try_from(*p).map_err(|_| {
                            AlgebraError::invalid("inverse table does not fit in memory")
                        })?,
                        Modulus::Big(_) => return self.compute_inverse(a),
                    };
                    debug!("allocating inverse table for F_{}", self.inner.modulus);
                    table.resize(size, 0);
                }
                let index = usize::try_from(*x)
                    .map_err(|_| AlgebraError::invalid("residue does not fit in memory"))?;
                if let Some(&cached) = table.get(index) {
                    if cached != 0 {
                        return Ok(Residue::Word(u64::from(cached)));
                    }
                }
                let inverse = self.compute_inverse(a)?;
                if let Residue::Word(inv) = inverse {
                    // p is at most the table boundary, which fits in u32
                    if let (Ok(inv32), Ok(x32), Ok(inv_index)) =
                        (u32::try_from(inv), u32::try_from(*x), usize::try_from(inv))
                    {
                        table[index] = inv32;
                        table[inv_index] = x32;
                    }
                }
                Ok(inverse)
            }
            (InverseCache::PerValue(map), _) => {
                if let Some(cached) = map.lock().get(a) {
                    return Ok(cached.clone());
                }
                trace!("computing inverse of {a} in F_{}", self.inner.modulus);
                let inverse = self.compute_inverse(a)?;
                let mut map = map.lock();
                map.insert(a.clone(), inverse.clone());
                map.insert(inverse.clone(), a.clone());
                Ok(inverse)
            }
            (InverseCache::Table(_), Residue::Big(_)) => self.compute_inverse(a),
        }
    }

    fn check_bounds(&self, min: &PrimeFieldElement, max: &PrimeFieldElement) -> Result<()> {
        for bound in [min, max] {
            if &bound.field != self {
                return Err(AlgebraError::incompatible(format!(
                    "{bound:?} is not an element of F_{}",
                    self.inner.modulus
                )));
            }
        }
        Ok(())
    }
}

impl PartialEq for PrimeField {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner.modulus == other.inner.modulus
    }
}

impl Eq for PrimeField {}

impl Hash for PrimeField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.modulus.hash(state);
    }
}

impl fmt::Debug for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F_{}", self.inner.modulus)
    }
}

impl RingFactory for PrimeField {
    type Element = PrimeFieldElement;

    fn zero(&self) -> PrimeFieldElement {
        self.get(0)
    }

    fn one(&self) -> PrimeFieldElement {
        self.get(1)
    }

    fn m_one(&self) -> PrimeFieldElement {
        self.get(-1)
    }

    fn from_i64(&self, n: i64) -> PrimeFieldElement {
        self.get(n)
    }

    /// Truncates towards zero, then reduces.
    fn from_f64(&self, value: f64) -> Result<PrimeFieldElement> {
        let exact = Rational::from_f64(value.trunc())?;
        Ok(self.get_integer(exact.numerator()))
    }

    fn parse(&self, s: &str) -> Result<PrimeFieldElement> {
        let n: Integer = s.parse()?;
        Ok(self.get_integer(&n))
    }

    fn random_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PrimeFieldElement> {
        let residue = match &self.inner.modulus {
            Modulus::Word(p) => Residue::Word(rng.gen_range(0..*p)),
            Modulus::Big(p) => Residue::Big(Integer::random_below(p, rng)),
        };
        Ok(self.element(residue))
    }

    /// Uniform over the residues from `min` to `max` inclusive.
    fn random_value_between<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        min: &PrimeFieldElement,
        max: &PrimeFieldElement,
    ) -> Result<PrimeFieldElement> {
        self.check_bounds(min, max)?;
        let (low, high) = (min.value(), max.value());
        if high < low {
            return Err(AlgebraError::invalid(format!(
                "empty range [{low}, {high}] in F_{}",
                self.inner.modulus
            )));
        }
        let span = &high - &low + Integer::ONE;
        Ok(self.get_integer(&(Integer::random_below(&span, rng) + &low)))
    }
}

/// An element of a prime field.
#[derive(Clone)]
pub struct PrimeFieldElement {
    residue: Residue,
    field: PrimeField,
}

impl PrimeFieldElement {
    /// Returns the residue in `[0, p)`.
    #[must_use]
    pub fn value(&self) -> Integer {
        self.residue.to_integer()
    }

    /// Returns the residue if the field uses machine words.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        match &self.residue {
            Residue::Word(r) => Some(*r),
            Residue::Big(r) => r.to_u64(),
        }
    }

    /// Returns the field this element belongs to.
    #[must_use]
    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        if self.field == other.field {
            Ok(())
        } else {
            Err(AlgebraError::incompatible(format!(
                "{self:?} and {other:?} belong to different fields"
            )))
        }
    }

    fn with_residue(&self, residue: Residue) -> Self {
        Self {
            residue,
            field: self.field.clone(),
        }
    }
}

impl PartialEq for PrimeFieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.residue == other.residue && self.field == other.field
    }
}

impl Eq for PrimeFieldElement {}

impl Hash for PrimeFieldElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.residue.hash(state);
        self.field.hash(state);
    }
}

impl fmt::Debug for PrimeFieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {})", self.residue, self.field.inner.modulus)
    }
}

impl fmt::Display for PrimeFieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.residue)
    }
}

impl Ring for PrimeFieldElement {
    type Factory = PrimeField;

    fn factory(&self) -> PrimeField {
        self.field.clone()
    }

    fn add(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        Ok(self.with_residue(self.field.add_residues(&self.residue, &other.residue)))
    }

    fn subtract(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        Ok(self.with_residue(self.field.sub_residues(&self.residue, &other.residue)))
    }

    fn multiply(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        Ok(self.with_residue(self.field.mul_residues(&self.residue, &other.residue)))
    }

    fn negate(&self) -> Self {
        self.with_residue(self.field.neg_residue(&self.residue))
    }

    fn is_zero(&self) -> bool {
        self.residue.is_zero()
    }

    fn is_one(&self) -> bool {
        self.residue.is_one()
    }

    /// Residues are already non-negative.
    fn abs(&self) -> Result<Self> {
        Ok(self.clone())
    }

    /// Orders by the least non-negative representative.
    fn compare(&self, other: &Self) -> Result<Ordering> {
        self.check_compatible(other)?;
        Ok(match (&self.residue, &other.residue) {
            (Residue::Word(a), Residue::Word(b)) => a.cmp(b),
            (a, b) => a.to_integer().cmp(&b.to_integer()),
        })
    }
}

impl EuclideanDomain for PrimeFieldElement {
    fn euclidean_division(&self, divisor: &Self) -> Result<DivisionResult<Self>> {
        Ok(DivisionResult {
            quotient: self.divide(divisor)?,
            remainder: self.field.zero(),
        })
    }
}

impl Field for PrimeFieldElement {
    /// Inverts through the field's cache; both `x` and its inverse are
    /// remembered, so inverting the result again is a lookup.
    fn invert(&self) -> Result<Self> {
        if self.residue.is_zero() {
            return Err(AlgebraError::division_by_zero(format!(
                "tried to invert zero in F_{}",
                self.field.inner.modulus
            )));
        }
        Ok(self.with_residue(self.field.inverse_of(&self.residue)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const BOUNDARY: u64 = 65_521;

    fn field(p: u64) -> PrimeField {
        PrimeField::with_boundary(&Integer::from(p), BOUNDARY)
    }

    fn big_prime() -> Integer {
        // 2^61 - 1
        Integer::ONE.shl(61) - Integer::ONE
    }

    #[test]
    fn test_basic_ops() {
        let f7 = field(7);
        let a = f7.get(5);
        let b = f7.get(4);

        assert_eq!(a.add(&b).unwrap(), f7.get(2)); // 9 ≡ 2 (mod 7)
        assert_eq!(a.subtract(&b).unwrap(), f7.get(1));
        assert_eq!(a.multiply(&b).unwrap(), f7.get(6)); // 20 ≡ 6 (mod 7)
        assert_eq!(a.negate(), f7.get(2));
        assert_eq!(f7.get(-3), f7.get(4));
        assert_eq!(f7.m_one(), f7.get(6));
    }

    #[test]
    fn test_inverse_in_f7() {
        // 3 * 5 = 15 ≡ 1 (mod 7)
        let f7 = field(7);
        assert_eq!(f7.get(3).invert().unwrap(), f7.get(5));
        assert!(matches!(
            f7.zero().invert(),
            Err(AlgebraError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_representation_choice() {
        assert_eq!(field(7).representation(), Representation::Word);
        assert_eq!(
            field(4_294_967_291).representation(),
            Representation::Word
        );
        let big = PrimeField::with_boundary(&big_prime(), BOUNDARY);
        assert_eq!(big.representation(), Representation::BigPrecision);
        assert!(Modulus::new(&Integer::from(7u64)) < Modulus::new(&big_prime()));
    }

    #[test]
    fn test_inverse_table_is_shared() {
        let f = field(101);
        assert!(f.uses_inverse_table());
        let x = f.get(17);
        assert!(!f.is_inverse_cached(&x));

        let inv = x.invert().unwrap();
        assert!(f.is_inverse_cached(&x));
        assert!(f.is_inverse_cached(&inv));
        assert!(x.multiply(&inv).unwrap().is_one());

        // a clone of the handle sees the same table
        let g = f.clone();
        assert!(g.is_inverse_cached(&g.get(17)));
    }

    #[test]
    fn test_per_value_cache() {
        let f = field(1_000_003);
        assert!(!f.uses_inverse_table());
        let x = f.get(123_456);
        let inv = x.invert().unwrap();
        assert!(f.is_inverse_cached(&inv));
        assert_eq!(inv.invert().unwrap(), x);
    }

    #[test]
    fn test_big_field() {
        let p = big_prime();
        let f = PrimeField::with_boundary(&p, BOUNDARY);
        let x = f.get_integer(&(&p - &Integer::new(2)));
        assert_eq!(x, f.get(-2));
        let inv = x.invert().unwrap();
        assert!(x.multiply(&inv).unwrap().is_one());
        assert_eq!(x.add(&f.get(2)).unwrap(), f.zero());
        assert_eq!(f.parse("-1").unwrap(), f.m_one());
    }

    #[test]
    fn test_incompatible_fields() {
        let a = field(7).get(3);
        let b = field(11).get(3);
        assert!(matches!(a.add(&b), Err(AlgebraError::IncompatibleOperands(_))));
        assert!(matches!(a.compare(&b), Err(AlgebraError::IncompatibleOperands(_))));
        assert_ne!(a, b);
    }

    #[test]
    fn test_compare_and_display() {
        let f = field(13);
        assert_eq!(f.get(3).compare(&f.get(12)).unwrap(), Ordering::Less);
        assert_eq!(f.get(-1).to_string(), "12");
        assert_eq!(format!("{:?}", f.get(5)), "5 (mod 13)");
    }

    #[test]
    fn test_random_values() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let f = field(97);
        for _ in 0..100 {
            let r = f.random_value(&mut rng).unwrap();
            assert!(r.to_u64().unwrap() < 97);
            let r = f
                .random_value_between(&mut rng, &f.get(10), &f.get(20))
                .unwrap();
            assert!((10..=20).contains(&r.to_u64().unwrap()));
        }
        assert!(matches!(
            f.gaussian_random_value(&mut rng),
            Err(AlgebraError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_fermat() {
        let f = field(101);
        for a in 1..101 {
            assert!(f.get(a).pow(100).unwrap().is_one());
        }
    }
}
