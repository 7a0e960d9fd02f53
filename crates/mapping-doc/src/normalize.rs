use crate::headers::HeaderConfig;
use model::{
    errors::FormatError,
    mapping::{Mapping, MappingSet},
};
use std::collections::HashMap;
use tracing::debug;

/// One already-decoded document row, keyed by column header.
pub type RawRow = HashMap<String, String>;

/// Converts raw document rows into a canonical [`MappingSet`].
///
/// Headers are matched case-insensitively after trimming; values are
/// trimmed. Unrecognized headers are ignored. Rows come back in input
/// order.
pub fn normalize(rows: &[RawRow], headers: &HeaderConfig) -> Result<MappingSet, FormatError> {
    if rows.is_empty() {
        return Err(FormatError::EmptyDocument);
    }

    let mut mappings = Vec::with_capacity(rows.len());
    for (row_idx, row) in rows.iter().enumerate() {
        mappings.push(normalize_row(row, row_idx, headers)?);
    }

    debug!(rows = mappings.len(), "normalized mapping document");
    Ok(MappingSet::new(mappings))
}

fn normalize_row(
    row: &RawRow,
    row_idx: usize,
    headers: &HeaderConfig,
) -> Result<Mapping, FormatError> {
    let source_column = non_empty(field(row, headers.source_column));
    let target_column = field(row, headers.target_column);
    let transformation = non_empty(field(row, headers.transformation));
    let is_key = field(row, headers.is_key)
        .map(|v| headers.is_truthy(&v))
        .unwrap_or(false);

    let target_column = match target_column.filter(|t| !t.is_empty()) {
        Some(t) => t,
        None => return Err(FormatError::MissingTarget { row: row_idx }),
    };

    if source_column.is_none() && transformation.is_none() {
        return Err(FormatError::NothingToCompute {
            row: row_idx,
            target: target_column,
        });
    }

    Ok(Mapping {
        source_column,
        target_column,
        transformation,
        is_key,
    })
}

/// Looks up a header case-insensitively, trimming both the stored header
/// and the cell value. When several stored headers collide (e.g.
/// `source_column` and `SOURCE_COLUMN`), the smallest raw key wins so the
/// result does not depend on map iteration order.
fn field(row: &RawRow, header: &str) -> Option<String> {
    row.iter()
        .filter(|(k, _)| k.trim().eq_ignore_ascii_case(header))
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, v)| v.trim().to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_normalize_basic_rows() {
        let rows = vec![
            row(&[
                ("source_column", "customer_id"),
                ("target_column", "customer_id"),
                ("transformation", ""),
                ("is_key", "TRUE"),
            ]),
            row(&[
                ("source_column", "first_name"),
                ("target_column", "full_name"),
                ("transformation", "CONCAT(source.first_name, ' ', source.last_name)"),
                ("is_key", ""),
            ]),
        ];

        let set = normalize(&rows, &HeaderConfig::default()).unwrap();
        assert_eq!(set.len(), 2);

        let first = set.iter().next().unwrap();
        assert_eq!(first.source_column.as_deref(), Some("customer_id"));
        assert!(first.is_key);
        assert!(first.is_pass_through());

        let second = set.iter().nth(1).unwrap();
        assert_eq!(second.target_column, "full_name");
        assert!(!second.is_key);
        assert!(!second.is_pass_through());
    }

    #[test]
    fn test_headers_matched_case_insensitively() {
        let rows = vec![row(&[
            ("  Source_Column ", "id"),
            ("TARGET_COLUMN", "id"),
            ("Transformation", ""),
            ("Is_Key", "yes"),
        ])];

        let set = normalize(&rows, &HeaderConfig::default()).unwrap();
        let m = set.iter().next().unwrap();
        assert_eq!(m.source_column.as_deref(), Some("id"));
        assert!(m.is_key);
    }

    #[test]
    fn test_colliding_headers_resolve_deterministically() {
        // Uppercase sorts below lowercase in byte order, so the uppercase
        // header's value wins no matter how the map iterates.
        let rows = vec![row(&[
            ("SOURCE_COLUMN", "from_upper"),
            ("source_column", "from_lower"),
            ("target_column", "id"),
        ])];

        for _ in 0..16 {
            let set = normalize(&rows, &HeaderConfig::default()).unwrap();
            assert_eq!(
                set.iter().next().unwrap().source_column.as_deref(),
                Some("from_upper")
            );
        }
    }

    #[test]
    fn test_extra_headers_ignored() {
        let rows = vec![row(&[
            ("source_column", "id"),
            ("target_column", "id"),
            ("notes", "free-form commentary"),
            ("owner", "data team"),
        ])];

        assert!(normalize(&rows, &HeaderConfig::default()).is_ok());
    }

    #[test]
    fn test_key_flag_coercion() {
        for (value, expected) in [
            ("true", true),
            ("TRUE", true),
            ("1", true),
            ("Yes", true),
            ("false", false),
            ("0", false),
            ("no", false),
            ("", false),
            ("maybe", false),
        ] {
            let rows = vec![row(&[
                ("source_column", "id"),
                ("target_column", "id"),
                ("is_key", value),
            ])];
            let set = normalize(&rows, &HeaderConfig::default()).unwrap();
            assert_eq!(set.iter().next().unwrap().is_key, expected, "value {value:?}");
        }
    }

    #[test]
    fn test_empty_document_rejected() {
        assert_eq!(
            normalize(&[], &HeaderConfig::default()),
            Err(FormatError::EmptyDocument)
        );
    }

    #[test]
    fn test_missing_target_names_row() {
        let rows = vec![
            row(&[("source_column", "a"), ("target_column", "a")]),
            row(&[("source_column", "b"), ("target_column", "   ")]),
        ];
        assert_eq!(
            normalize(&rows, &HeaderConfig::default()),
            Err(FormatError::MissingTarget { row: 1 })
        );
    }

    #[test]
    fn test_nothing_to_compute_names_row_and_target() {
        let rows = vec![row(&[
            ("source_column", ""),
            ("target_column", "x"),
            ("transformation", ""),
        ])];
        assert_eq!(
            normalize(&rows, &HeaderConfig::default()),
            Err(FormatError::NothingToCompute {
                row: 0,
                target: "x".to_string()
            })
        );
    }

    #[test]
    fn test_transformation_compensates_for_missing_source() {
        let rows = vec![row(&[
            ("source_column", ""),
            ("target_column", "total_amount"),
            ("transformation", "source.qty * source.price"),
        ])];
        let set = normalize(&rows, &HeaderConfig::default()).unwrap();
        let m = set.iter().next().unwrap();
        assert_eq!(m.source_column, None);
        assert_eq!(m.transformation.as_deref(), Some("source.qty * source.price"));
    }

    #[test]
    fn test_alternate_header_config() {
        let headers = HeaderConfig {
            source_column: "from",
            target_column: "to",
            transformation: "expr",
            is_key: "pk",
            truthy: &["y"],
        };
        let rows = vec![row(&[("from", "id"), ("to", "id"), ("pk", "y")])];
        let set = normalize(&rows, &headers).unwrap();
        assert!(set.iter().next().unwrap().is_key);
    }
}
