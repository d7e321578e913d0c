//! # exacta
//!
//! An exact algebraic kernel: arbitrary precision rationals, prime
//! fields with cached inverses, and sparse univariate polynomials over
//! any of them.
//!
//! Every value is canonical (reduced fractions, residues in `[0, p)`,
//! no zero polynomial terms) and every failure is reported as an
//! [`AlgebraError`]; nothing is ever approximated.
//!
//! ## Quick Start
//!
//! ```rust
//! use exacta::prelude::*;
//!
//! // (1 + x)^2 over Q
//! let qx = PolynomialRegistry::global().factory(&RationalField);
//! let p = qx.from_coefficients([Rational::ONE, Rational::ONE])?;
//! assert_eq!(p.square()?.to_string(), "1 + 2*x + 1*x^2");
//!
//! // 3^-1 in F_7
//! let f7 = FieldRegistry::global().field(7)?;
//! assert_eq!(f7.get(3).invert()?, f7.get(5));
//! # Ok::<(), AlgebraError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use exacta_integers as integers;
pub use exacta_poly as poly;
pub use exacta_rings as rings;

pub use exacta_integers::{AlgebraError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use exacta_integers::{AlgebraError, Integer, Rational};
    pub use exacta_poly::{Polynomial, PolynomialFactory, PolynomialRegistry};
    pub use exacta_rings::{
        DivisionResult, EuclideanDomain, Field, FieldConfig, FieldRegistry, IntegerRing,
        PrimeField, PrimeFieldElement, RationalField, Ring, RingFactory,
    };
}
