//! Expression-template automatic differentiation.
//!
//! Trees built from [`variable`] / [`constant`] leaves, combinators and the
//! `cmath`/`linalg` primitives evaluate their value and directional
//! derivatives up to third order; [`finalize`] wraps a finished tree in an
//! evaluation handle. The [`texify`] module renders the same trees as LaTeX.

pub mod cmath;
pub mod finalize;
pub mod float;
pub mod function;
pub mod linalg;
pub mod nalgebra_support;
pub mod operations;
pub mod texify;
pub mod variable;

pub use cmath::{acos, asin, cos, exp, ln, pow, sin, sqrt, tan};
pub use finalize::{finalize, Finalized};
pub use float::Float;
pub use function::{Function, ZeroLike};
pub use linalg::{cof, det, deviator, frobenius_norm, i1, i2, i3, trace, transpose, Matrix};
pub use operations::{scale, squared, Chain, Product, Scale, Squared, Sum};
pub use variable::{constant, variable, Constant, Variable};
