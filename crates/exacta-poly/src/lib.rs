//! # exacta-poly
//!
//! Sparse univariate polynomials over any exact ring.
//!
//! This crate provides:
//! - `Polynomial<B>`, a sparse polynomial over any `Ring`
//! - `PolynomialFactory<B>`, the canonical constructor of `B[x]`
//! - `PolynomialRegistry`, one factory per base factory
//!
//! ## Operations by base
//!
//! Over any ring: merge addition, convolution multiplication,
//! evaluation, the derivative and ordering. Over a field, additionally:
//! Euclidean division, monic gcd, the integral and the minimal
//! (squarefree) polynomial.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod display;
pub mod factory;
pub mod polynomial;
pub mod registry;

#[cfg(test)]
mod proptests;

pub use factory::PolynomialFactory;
pub use polynomial::Polynomial;
pub use registry::PolynomialRegistry;
