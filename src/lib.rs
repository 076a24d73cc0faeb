//! # GramEngine Quickstart
//!
//! ```rust
//! use gram_engine::prelude::*;
//! use std::sync::Arc;
//!
//! // Two one-generator cliques with Gram matrices [[2]] and [[-3]]
//! let u1: IrreducibleUnit = "I-(1,0)-1\t[v-A1-0]\tΔ = 1\tΔ+28n = 1\tTmin = 0\tsign = [1, 0]\t\
//!     bi·bj = [[2]]\tb0·bi = [1]".parse().unwrap();
//! let u2: IrreducibleUnit = "I-(0,1)-2\t[v-A2-0]\tΔ = 2\tΔ+28n = 30\tTmin = 0\tsign = [0, 1]\t\
//!     bi·bj = [[-3]]\tb0·bi = [5]".parse().unwrap();
//!
//! let clique = CompositeAggregate::from_units([Arc::new(u1), Arc::new(u2)]).unwrap();
//! assert_eq!(clique.signature().as_tuple(), (1, 1, 0));
//!
//! let (gram, b0bi) = clique.assemble_gram();
//! assert_eq!(gram, IntMatrix::from_rows(vec![vec![2, 0], vec![0, -3]]).unwrap());
//! assert_eq!(b0bi.len(), 2);
//!
//! // Exact analysis of the assembled matrix
//! assert_eq!(signature(&gram).unwrap().as_tuple(), (1, 1, 0));
//! assert!(integer_kernel_basis(&gram).is_empty());
//! ```

// Exact linear algebra
pub mod arith;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod signature;

// Clique data model
pub mod composite;
pub mod unit;

// Record I/O and selection
pub mod config;
pub mod filter;
pub mod record;
pub mod tables;

pub mod prelude;

// --- Public API exports ---

pub use arith::gcd;
pub use composite::CompositeAggregate;
pub use error::{GramError, Result};
pub use kernel::{integer_kernel_basis, rank, right_integer_kernel_basis, Echelon};
pub use matrix::IntMatrix;
pub use signature::{signature, Signature};
pub use unit::IrreducibleUnit;
