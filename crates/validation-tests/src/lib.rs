#![allow(dead_code)]

use mapping_doc::RawRow;
use model::{context::QueryContext, table_ref};
use std::collections::HashMap;

pub mod generation;
pub mod summaries;

/// Installs a fmt subscriber honoring `RUST_LOG`, for debugging test runs.
/// Safe to call from multiple tests; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Builds one raw document row from header/value pairs.
pub fn raw_row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<HashMap<_, _>>()
}

/// A realistic customer-dimension mapping document: one key column, two
/// transformed columns, one straight copy.
pub fn customers_document() -> Vec<RawRow> {
    vec![
        raw_row(&[
            ("source_column", "customer_id"),
            ("target_column", "customer_id"),
            ("transformation", ""),
            ("is_key", "TRUE"),
        ]),
        raw_row(&[
            ("source_column", "first_name"),
            ("target_column", "full_name"),
            ("transformation", "CONCAT(source.first_name, ' ', source.last_name)"),
            ("is_key", ""),
        ]),
        raw_row(&[
            ("source_column", "status"),
            ("target_column", "status"),
            (
                "transformation",
                "CASE WHEN source.status = 'A' THEN 'active' ELSE 'inactive' END",
            ),
            ("is_key", "false"),
        ]),
        raw_row(&[
            ("source_column", "email"),
            ("target_column", "email"),
            ("transformation", ""),
            ("is_key", ""),
        ]),
    ]
}

pub fn customers_context() -> QueryContext {
    QueryContext::new(table_ref!("customers"), table_ref!("customers_dim"))
}
