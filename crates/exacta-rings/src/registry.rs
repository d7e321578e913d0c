//! The registry of prime fields.
//!
//! A registry hands out one shared [`PrimeField`] per prime, so every
//! element of F_p created through it shares one inverse cache. Most code
//! uses [`FieldRegistry::global`]; tests and embedders that want
//! isolated caches build their own.

use log::debug;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::BTreeMap;

use exacta_integers::modular::{is_prime_u64, is_probable_prime};
use exacta_integers::{AlgebraError, Integer, Result};

use crate::prime_field::{Modulus, PrimeField};

static GLOBAL: Lazy<FieldRegistry> = Lazy::new(FieldRegistry::new);

/// Tuning knobs for the fields a registry creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldConfig {
    /// Primes up to this value share one inverse table of `p` entries;
    /// larger primes cache inverses per value. Clamped to `u32::MAX`.
    pub inverse_table_boundary: u64,
    /// Miller-Rabin rounds for primes that do not fit in a `u64`.
    pub primality_rounds: u32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            inverse_table_boundary: 65_521,
            primality_rounds: 10,
        }
    }
}

/// Maps primes to their unique field.
///
/// Keys are ordered by [`Modulus`], so word-sized primes come first.
pub struct FieldRegistry {
    config: FieldConfig,
    fields: Mutex<BTreeMap<Modulus, PrimeField>>,
}

impl FieldRegistry {
    /// Creates an empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FieldConfig::default())
    }

    /// Creates an empty registry.
    #[must_use]
    pub fn with_config(mut config: FieldConfig) -> Self {
        config.inverse_table_boundary = config.inverse_table_boundary.min(u64::from(u32::MAX));
        Self {
            config,
            fields: Mutex::new(BTreeMap::new()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static FieldRegistry {
        &GLOBAL
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> FieldConfig {
        self.config
    }

    /// Returns the field F_p, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidOperation`] if `p` is not prime.
    pub fn field(&self, p: u64) -> Result<PrimeField> {
        self.field_big(&Integer::from(p))
    }

    /// Returns the field F_p for an arbitrary precision prime.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidOperation`] if `p` is not prime.
    pub fn field_big(&self, p: &Integer) -> Result<PrimeField> {
        let key = Modulus::new(p);
        let mut fields = self.fields.lock();
        if let Some(field) = fields.get(&key) {
            return Ok(field.clone());
        }
        self.check_prime(p)?;
        let field = PrimeField::with_boundary(p, self.config.inverse_table_boundary);
        debug!(
            "created F_{p} ({:?}, inverse table: {})",
            field.representation(),
            field.uses_inverse_table()
        );
        fields.insert(key, field.clone());
        Ok(field)
    }

    /// Parses a prime and returns its field.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidOperation`] if the string is not an
    /// integer or the integer is not prime.
    pub fn field_from_str(&self, p: &str) -> Result<PrimeField> {
        let p: Integer = p.trim().parse()?;
        self.field_big(&p)
    }

    /// Creates and registers F_p.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidOperation`] if `p` is not prime.
    ///
    /// # Panics
    ///
    /// Panics if F_p is already registered: a second instance would split
    /// the inverse cache of that field.
    pub fn register(&self, p: &Integer) -> Result<PrimeField> {
        let key = Modulus::new(p);
        let mut fields = self.fields.lock();
        assert!(
            !fields.contains_key(&key),
            "F_{p} is already registered"
        );
        self.check_prime(p)?;
        let field = PrimeField::with_boundary(p, self.config.inverse_table_boundary);
        fields.insert(key, field.clone());
        Ok(field)
    }

    /// Returns true if F_p has been created.
    #[must_use]
    pub fn contains(&self, p: &Integer) -> bool {
        self.fields.lock().contains_key(&Modulus::new(p))
    }

    /// Returns the number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.lock().len()
    }

    /// Returns true if no field has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.lock().is_empty()
    }

    /// Returns the registered primes in ascending order.
    #[must_use]
    pub fn primes(&self) -> Vec<Integer> {
        self.fields.lock().keys().map(Modulus::to_integer).collect()
    }

    fn check_prime(&self, p: &Integer) -> Result<()> {
        let prime = match p.to_u64() {
            Some(word) => is_prime_u64(word),
            None => is_probable_prime(p, self.config.primality_rounds, &mut rand::thread_rng()),
        };
        if prime {
            Ok(())
        } else {
            Err(AlgebraError::invalid(format!("{p} is not a prime")))
        }
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("config", &self.config)
            .field("fields", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Field, Ring};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_same_instance() {
        init_logging();
        let registry = FieldRegistry::new();
        let a = registry.field(7).unwrap();
        let b = registry.field(7).unwrap();
        assert!(a.ptr_eq(&b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_get_or_create() {
        let registry = FieldRegistry::new();
        let p = Integer::from(1_000_000_007u64);
        let fields: Vec<PrimeField> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| registry.field_big(&p).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(fields.iter().all(|f| f.ptr_eq(&fields[0])));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_shared_inverse_cache() {
        init_logging();
        let registry = FieldRegistry::new();
        let x = registry.field(7).unwrap().get(3);
        let _ = x.invert().unwrap();

        let again = registry.field(7).unwrap();
        assert!(again.is_inverse_cached(&again.get(3)));
        assert!(again.is_inverse_cached(&again.get(5)));
    }

    #[test]
    fn test_rejects_composites() {
        let registry = FieldRegistry::new();
        for p in [0u64, 1, 4, 9, 15, 65_535] {
            assert!(matches!(
                registry.field(p),
                Err(AlgebraError::InvalidOperation(_))
            ));
        }
        assert!(registry.is_empty());
        assert!(registry.field_from_str("abc").is_err());
    }

    #[test]
    fn test_ordering_of_keys() {
        let registry = FieldRegistry::new();
        let big = Integer::ONE.shl(89) - Integer::ONE;
        registry.field_big(&big).unwrap();
        registry.field(11).unwrap();
        registry.field_from_str("5").unwrap();
        assert_eq!(
            registry.primes(),
            vec![Integer::new(5), Integer::new(11), big]
        );
    }

    #[test]
    fn test_config_boundary() {
        let registry = FieldRegistry::with_config(FieldConfig {
            inverse_table_boundary: 10,
            primality_rounds: 4,
        });
        assert!(registry.field(7).unwrap().uses_inverse_table());
        assert!(!registry.field(11).unwrap().uses_inverse_table());

        let clamped = FieldRegistry::with_config(FieldConfig {
            inverse_table_boundary: u64::MAX,
            primality_rounds: 4,
        });
        assert_eq!(clamped.config().inverse_table_boundary, u64::from(u32::MAX));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_register_twice_panics() {
        let registry = FieldRegistry::new();
        registry.register(&Integer::new(13)).unwrap();
        let _ = registry.register(&Integer::new(13));
    }

    #[test]
    fn test_global_registry() {
        let a = FieldRegistry::global().field(65_521).unwrap();
        let b = FieldRegistry::global().field(65_521).unwrap();
        assert!(a.ptr_eq(&b));
        assert!(a.get(2).multiply(&b.get(3)).unwrap() == a.get(6));
    }
}
