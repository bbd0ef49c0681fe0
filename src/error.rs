// ============================================================
// Error Types
// ============================================================
// Every fallible operation in the crate returns DataError.
//
//   Io       : a split file is missing or unreadable
//   Schema   : the CSV header or a row does not match the
//               expected columns
//   Config   : batch size / max length / tokenizer unusable
//   Tokenize : the external tokenizer failed on one row
//   Stage    : a pipeline transition was called out of order
//   Dataset  : targets do not line up with the inputs
//
// A missing label column is NOT an error. It is how an
// inference-only file announces itself.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::split::Split;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema error in '{}': {reason}", path.display())]
    Schema { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("tokenizer failed on row {row}: {source}")]
    Tokenize {
        row: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("{split} split is {found}, expected {expected}")]
    Stage {
        split: Split,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid dataset: {0}")]
    Dataset(String),
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn schema(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, DataError>;
