//! Error type shared by every fallible operation in the crate.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GramError {
    /// Input matrix has the wrong shape for the requested operation.
    #[error("unexpected shape {rows}x{cols}: {expected}")]
    Shape {
        expected: &'static str,
        rows: usize,
        cols: usize,
    },

    /// Two quantities that must agree in length or size do not.
    #[error("inconsistent dimension for {what}: expected {expected}, got {got}")]
    InconsistentDimension {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("running total overflowed: {0}")]
    Overflow(&'static str),

    #[error("matrix entry has no finite floating-point image")]
    NonFinite,

    #[error("malformed {field}: {message}")]
    Parse {
        field: &'static str,
        message: String,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GramError {
    pub(crate) fn parse(field: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            field,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GramError>;
