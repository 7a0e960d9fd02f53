//! Human-readable statistics emitted alongside the generated queries.

use model::mapping::MappingSet;
use serde::Serialize;
use std::collections::HashSet;

/// Substring markers used to classify transformation text for the report.
/// A case-insensitive scan, not a SQL parse; first match wins.
const SHAPE_MARKERS: &[(&str, &str)] = &[
    ("case", "case"),
    ("concat", "concat"),
    ("regexp", "regexp"),
    ("substr", "substring"),
    ("cast", "cast"),
    ("coalesce", "coalesce"),
];

/// A summary of the mapping document, computed once per generation call.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationSummary {
    pub total_mappings: usize,

    /// Output aliases of key-flagged mappings, in input order.
    pub key_columns: Vec<String>,

    /// Mappings without an explicit transformation.
    pub pass_through: usize,

    /// Distinct transformation shapes observed, in first-seen order.
    pub transformation_shapes: Vec<String>,

    /// Target columns declared more than once. A warning, not an error:
    /// most engines reject the resulting duplicate output columns at
    /// execution time, which this crate never reaches.
    pub duplicate_target_columns: Vec<String>,

    /// False when no mapping is key-flagged, in which case the key-join
    /// diagnostics are omitted and only the set-difference checks apply.
    pub key_join_available: bool,

    /// Qualifier tokens referenced inside transformation text.
    pub detected_qualifiers: Vec<String>,

    /// Digest of the canonically-serialized mapping set, for upstream
    /// change detection.
    pub mapping_hash: String,
}

impl ValidationSummary {
    pub fn from_mappings(mappings: &MappingSet) -> Self {
        let key_columns: Vec<String> = mappings
            .key_mappings()
            .map(|m| m.target_column.clone())
            .collect();

        let pass_through = mappings.iter().filter(|m| m.is_pass_through()).count();

        let mut shapes = Vec::new();
        for mapping in mappings.iter() {
            let shape = match &mapping.transformation {
                Some(expr) => classify_shape(expr),
                None => "direct",
            };
            if !shapes.iter().any(|s| s == shape) {
                shapes.push(shape.to_string());
            }
        }

        Self {
            total_mappings: mappings.len(),
            key_join_available: !key_columns.is_empty(),
            key_columns,
            pass_through,
            transformation_shapes: shapes,
            duplicate_target_columns: duplicate_targets(mappings),
            detected_qualifiers: mappings.referenced_qualifiers(),
            mapping_hash: compute_mapping_hash(mappings),
        }
    }
}

fn classify_shape(expr: &str) -> &'static str {
    let lowered = expr.to_ascii_lowercase();
    SHAPE_MARKERS
        .iter()
        .find(|(marker, _)| lowered.contains(marker))
        .map(|(_, shape)| *shape)
        .unwrap_or("expression")
}

/// Target columns seen more than once, in first-seen order.
fn duplicate_targets(mappings: &MappingSet) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for mapping in mappings.iter() {
        let target = mapping.target_column.as_str();
        if !seen.insert(target) && reported.insert(target) {
            duplicates.push(target.to_string());
        }
    }
    duplicates
}

fn compute_mapping_hash(mappings: &MappingSet) -> String {
    let json = serde_json::to_vec(mappings).expect("Failed to serialize mappings for hashing.");
    let hash = md5::compute(&json);
    format!("{hash:x}")
}
