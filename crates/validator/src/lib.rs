//! Orchestrates the validation workflow: normalize the mapping document,
//! assemble the comparison queries, attach the summary.
//!
//! This crate is the single entry point for callers (HTTP layer, CLI,
//! suggestion layers); they hand over already-decoded rows and a
//! [`QueryContext`] and get back SQL text plus statistics. Nothing here
//! executes SQL or touches I/O.

pub mod error;

pub use error::ValidationError;
pub use mapping_doc::{HeaderConfig, RawRow};
pub use model::{
    context::{QueryContext, QueryType, SqlDialect, TableRef},
    errors::{ConfigError, FormatError},
    mapping::{Mapping, MappingSet},
};
pub use planner::{GeneratedQuery, ValidationSummary};

use tracing::debug;

/// Stateless front door of the validation core.
#[derive(Debug, Clone)]
pub struct Validator {
    headers: HeaderConfig,
    /// Identifier of the uploaded document, used only to contextualize
    /// format errors. Supplied by the I/O layer.
    document: String,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self {
            headers: HeaderConfig::default(),
            document: "<unnamed>".to_string(),
        }
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = document.into();
        self
    }

    pub fn with_headers(mut self, headers: HeaderConfig) -> Self {
        self.headers = headers;
        self
    }

    /// Normalize → assemble. Format errors carry the document identifier;
    /// config errors pass through untouched.
    pub fn generate(
        &self,
        rows: &[RawRow],
        ctx: &QueryContext,
    ) -> Result<GeneratedQuery, ValidationError> {
        let mappings = self.normalize(rows)?;
        debug!(
            document = %self.document,
            mappings = mappings.len(),
            "generating validation queries"
        );
        Ok(planner::build(&mappings, ctx)?)
    }

    /// Mapping statistics without SQL generation, for callers that surface
    /// "N columns detected" before any table names are configured.
    pub fn summary_only(&self, rows: &[RawRow]) -> Result<ValidationSummary, ValidationError> {
        let mappings = self.normalize(rows)?;
        Ok(ValidationSummary::from_mappings(&mappings))
    }

    fn normalize(&self, rows: &[RawRow]) -> Result<MappingSet, ValidationError> {
        mapping_doc::normalize(rows, &self.headers).map_err(|source| ValidationError::Format {
            document: self.document.clone(),
            source,
        })
    }
}
