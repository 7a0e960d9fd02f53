use thiserror::Error;

/// Malformed or incomplete mapping document input. Always caller-fixable;
/// generation aborts with no partial SQL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("mapping document contains no data rows")]
    EmptyDocument,

    #[error("row {row}: target_column is missing or empty")]
    MissingTarget { row: usize },

    #[error("row {row}: mapping for '{target}' has neither a source column nor a transformation")]
    NothingToCompute { row: usize, target: String },
}

/// Invalid generation context. Always caller-fixable; generation aborts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("source table name is required")]
    MissingSourceTable,

    #[error("target table name is required")]
    MissingTargetTable,

    #[error("unrecognized query type '{0}', expected one of: source_minus_target, target_minus_source, both")]
    UnknownQueryType(String),
}
