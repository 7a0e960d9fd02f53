//! Generation context: table references, dialect tag and query selector.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A schema-qualified (or bare) table reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    pub fn with_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    /// `schema.table` when a schema is present, bare `table` otherwise.
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

#[macro_export]
macro_rules! table_ref {
    ($name:expr) => {
        $crate::context::TableRef {
            schema: None,
            name: $name.to_string(),
        }
    };
    ($schema:expr, $name:expr) => {
        $crate::context::TableRef {
            schema: Some($schema.to_string()),
            name: $name.to_string(),
        }
    };
}

/// Database flavor the generated SQL targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlDialect {
    Postgres,
    MySql,
    Oracle,
}

impl Default for SqlDialect {
    fn default() -> Self {
        SqlDialect::Postgres
    }
}

/// Which comparison directions to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryType {
    SourceMinusTarget,
    TargetMinusSource,
    Both,
}

impl QueryType {
    pub fn includes_source_minus_target(&self) -> bool {
        matches!(self, QueryType::SourceMinusTarget | QueryType::Both)
    }

    pub fn includes_target_minus_source(&self) -> bool {
        matches!(self, QueryType::TargetMinusSource | QueryType::Both)
    }
}

impl FromStr for QueryType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "source_minus_target" => Ok(QueryType::SourceMinusTarget),
            "target_minus_source" => Ok(QueryType::TargetMinusSource),
            "both" | "complete" => Ok(QueryType::Both),
            other => Err(ConfigError::UnknownQueryType(other.to_string())),
        }
    }
}

/// Everything the query assembler needs besides the mappings themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryContext {
    pub source: TableRef,
    pub target: TableRef,
    pub dialect: SqlDialect,
    pub query_type: QueryType,
}

impl QueryContext {
    pub fn new(source: TableRef, target: TableRef) -> Self {
        Self {
            source,
            target,
            dialect: SqlDialect::default(),
            query_type: QueryType::Both,
        }
    }

    pub fn dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn query_type(mut self, query_type: QueryType) -> Self {
        self.query_type = query_type;
        self
    }

    /// Table names are required; schemas are optional.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.name.trim().is_empty() {
            return Err(ConfigError::MissingSourceTable);
        }
        if self.target.name.trim().is_empty() {
            return Err(ConfigError::MissingTargetTable);
        }
        Ok(())
    }
}
