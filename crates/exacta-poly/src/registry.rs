//! The registry of polynomial factories.
//!
//! Every base factory gets exactly one [`PolynomialFactory`]. Base
//! factories of different types live in separate maps, looked up by the
//! base factory's type.

use log::debug;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};

use exacta_rings::{Ring, RingFactory};

use crate::factory::PolynomialFactory;

static GLOBAL: Lazy<PolynomialRegistry> = Lazy::new(PolynomialRegistry::new);

type FactoryMap<F> = FxHashMap<F, PolynomialFactory<<F as RingFactory>::Element>>;

/// Maps base factories to their polynomial factory.
#[derive(Default)]
pub struct PolynomialRegistry {
    factories: Mutex<FxHashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl PolynomialRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static PolynomialRegistry {
        &GLOBAL
    }

    /// Returns the factory of `base[x]`, creating it on first use.
    pub fn factory<F>(&self, base: &F) -> PolynomialFactory<F::Element>
    where
        F: RingFactory,
        F::Element: Ring<Factory = F>,
    {
        let mut factories = self.factories.lock();
        let map = Self::map_for::<F>(&mut factories);
        map.entry(base.clone())
            .or_insert_with(|| {
                debug!("created polynomial factory over {base:?}");
                PolynomialFactory::new(base.clone())
            })
            .clone()
    }

    /// Creates and registers the factory of `base[x]`.
    ///
    /// # Panics
    ///
    /// Panics if a factory for `base` already exists: two factories for
    /// one base would never compare as distinct yet share no state.
    pub fn register<F>(&self, base: &F) -> PolynomialFactory<F::Element>
    where
        F: RingFactory,
        F::Element: Ring<Factory = F>,
    {
        let mut factories = self.factories.lock();
        let map = Self::map_for::<F>(&mut factories);
        assert!(
            !map.contains_key(base),
            "a polynomial factory over {base:?} is already registered"
        );
        let factory = PolynomialFactory::new(base.clone());
        map.insert(base.clone(), factory.clone());
        factory
    }

    /// Returns true if a factory for `base` exists.
    pub fn contains<F>(&self, base: &F) -> bool
    where
        F: RingFactory,
        F::Element: Ring<Factory = F>,
    {
        let mut factories = self.factories.lock();
        Self::map_for::<F>(&mut factories).contains_key(base)
    }

    fn map_for<F>(
        factories: &mut FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
    ) -> &mut FactoryMap<F>
    where
        F: RingFactory,
        F::Element: Ring<Factory = F>,
    {
        factories
            .entry(TypeId::of::<F>())
            .or_insert_with(|| Box::new(FactoryMap::<F>::default()) as Box<dyn Any + Send + Sync>)
            .downcast_mut::<FactoryMap<F>>()
            .expect("registry slots are keyed by the type they hold")
    }
}

impl std::fmt::Debug for PolynomialRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolynomialRegistry")
            .field("base_types", &self.factories.lock().len())
            .finish()
    }
}
