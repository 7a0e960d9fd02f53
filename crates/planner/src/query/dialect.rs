//! Database-specific SQL syntax behind the `Dialect` trait.

use model::context::SqlDialect;

pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect (e.g., "PostgreSQL", "Oracle").
    fn name(&self) -> String;

    /// The set-difference operator keyword.
    ///
    /// - PostgreSQL and MySQL use `EXCEPT`
    /// - Oracle uses `MINUS`
    fn set_difference(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> String {
        "PostgreSQL".into()
    }

    fn set_difference(&self) -> &'static str {
        "EXCEPT"
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> String {
        "MySQL".into()
    }

    // Requires MySQL 8.0.31+; the key-join diagnostics cover older servers.
    fn set_difference(&self) -> &'static str {
        "EXCEPT"
    }
}

#[derive(Debug, Clone)]
pub struct Oracle;

impl Dialect for Oracle {
    fn name(&self) -> String {
        "Oracle".into()
    }

    fn set_difference(&self) -> &'static str {
        "MINUS"
    }
}

/// Maps the context's dialect tag to a concrete implementation.
pub fn dialect_for(tag: SqlDialect) -> &'static dyn Dialect {
    match tag {
        SqlDialect::Postgres => &Postgres,
        SqlDialect::MySql => &MySql,
        SqlDialect::Oracle => &Oracle,
    }
}
