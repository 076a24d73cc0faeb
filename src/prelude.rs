// src/prelude.rs
//! The “everything” import for GramEngine.
//!
//! Brings you the most commonly used types and functions with one glob:
//! ```rust
//! use gram_engine::prelude::*;
//! ```

// core data types
pub use crate::composite::CompositeAggregate;
pub use crate::matrix::IntMatrix;
pub use crate::record::UnitRecord;
pub use crate::signature::Signature;
pub use crate::unit::IrreducibleUnit;

// exact analysis
pub use crate::arith::gcd;
pub use crate::kernel::{integer_kernel_basis, rank, right_integer_kernel_basis};
pub use crate::signature::signature;

pub use crate::error::GramError;
