//! # exacta-integers
//!
//! Arbitrary precision integer and rational arithmetic for the exacta
//! algebra kernel.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Canonical rationals (`Rational`) with exact decimal parsing
//! - Word and big-integer residue arithmetic (`modular`)
//! - The shared error type (`AlgebraError`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod integer;
pub mod modular;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use error::{AlgebraError, Result};
pub use integer::Integer;
pub use rational::Rational;
