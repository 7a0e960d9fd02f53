use model::errors::{ConfigError, FormatError};
use thiserror::Error;

/// Top-level errors of the validation workflow.
///
/// Document problems are wrapped with the document identifier supplied by
/// the I/O layer; context problems propagate unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid mapping document '{document}': {source}")]
    Format {
        document: String,
        #[source]
        source: FormatError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
