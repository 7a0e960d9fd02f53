//! Assembles the full set of validation queries for a mapping document.

use crate::{
    query::{
        SOURCE_ALIAS,
        ast::{CombinedReport, DifferenceQuery, Direction, KeyJoinDiagnostic, ValidationCtes},
        dialect::dialect_for,
        qualifier::qualify,
        renderer::render_to_string,
    },
    report::ValidationSummary,
};
use model::{
    context::QueryContext,
    errors::ConfigError,
    mapping::MappingSet,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Separator placed between statements of the complete script.
const STATEMENT_SEPARATOR: &str = "\n\n-- ========================================\n\n";

/// Output artifact of one generation call: query-variant name → SQL text,
/// plus the document summary. Produced fresh on every call.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQuery {
    pub queries: BTreeMap<String, String>,
    pub summary: ValidationSummary,
}

/// Pure function from mappings and context to SQL text; identical inputs
/// produce byte-identical output.
pub fn build(mappings: &MappingSet, ctx: &QueryContext) -> Result<GeneratedQuery, ConfigError> {
    ctx.validate()?;

    let dialect = dialect_for(ctx.dialect);
    let ctes = ValidationCtes {
        projection: mappings.iter().map(|m| qualify(m, SOURCE_ALIAS)).collect(),
        source: ctx.source.clone(),
        target: ctx.target.clone(),
    };
    let keys: Vec<String> = mappings
        .key_mappings()
        .map(|m| m.target_column.clone())
        .collect();

    let mut queries = BTreeMap::new();

    let directions = [
        (
            Direction::SourceMinusTarget,
            ctx.query_type.includes_source_minus_target(),
        ),
        (
            Direction::TargetMinusSource,
            ctx.query_type.includes_target_minus_source(),
        ),
    ];

    let mut diagnostics = Vec::new();
    for (direction, wanted) in directions {
        if !wanted {
            continue;
        }

        let difference = DifferenceQuery {
            ctes: ctes.clone(),
            direction,
        };
        queries.insert(
            direction.key().to_string(),
            render_to_string(&difference, dialect),
        );

        if !keys.is_empty() {
            let diagnostic = KeyJoinDiagnostic {
                ctes: ctes.clone(),
                direction,
                keys: keys.clone(),
            };
            let sql = render_to_string(&diagnostic, dialect);
            queries.insert(format!("{}_diagnostic", direction.key()), sql.clone());
            diagnostics.push(sql);
        }
    }

    if ctx.query_type.includes_source_minus_target()
        && ctx.query_type.includes_target_minus_source()
    {
        let mut script = render_to_string(&CombinedReport { ctes: ctes.clone() }, dialect);
        for diagnostic in &diagnostics {
            script.push_str(STATEMENT_SEPARATOR);
            script.push_str(diagnostic);
        }
        queries.insert("complete".to_string(), script);
    }

    let summary = ValidationSummary::from_mappings(mappings);
    if !summary.duplicate_target_columns.is_empty() {
        warn!(
            duplicates = ?summary.duplicate_target_columns,
            "mapping document declares duplicate target columns"
        );
    }
    debug!(
        mappings = summary.total_mappings,
        keys = summary.key_columns.len(),
        variants = queries.len(),
        dialect = %dialect.name(),
        "assembled validation queries"
    );

    Ok(GeneratedQuery { queries, summary })
}
