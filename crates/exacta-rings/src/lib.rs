//! # exacta-rings
//!
//! Algebraic structures for the exacta kernel.
//!
//! This crate provides:
//! - Abstract traits: `Ring`, `EuclideanDomain`, `Field` and the
//!   `RingFactory` that creates their elements
//! - Concrete implementations: Z, Q, F_p
//! - The generic Euclidean algorithm
//! - The registry of prime fields
//!
//! ## Trait Hierarchy
//!
//! ```text
//! Ring
//!  └── EuclideanDomain
//!       └── Field
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod euclid;
pub mod integers;
pub mod prime_field;
pub mod rationals;
pub mod registry;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use exacta_integers::{AlgebraError, Integer, Rational, Result};
pub use integers::IntegerRing;
pub use prime_field::{Modulus, PrimeField, PrimeFieldElement, Representation};
pub use rationals::RationalField;
pub use registry::{FieldConfig, FieldRegistry};
pub use traits::{DivisionResult, EuclideanDomain, Field, Ring, RingFactory};
