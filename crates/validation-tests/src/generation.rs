//! End-to-end generation scenarios through the `Validator` front door.

#[cfg(test)]
mod tests {
    use crate::{customers_context, customers_document, raw_row};
    use model::{
        context::{QueryContext, QueryType, SqlDialect},
        errors::FormatError,
        table_ref,
    };
    use validator::{ValidationError, Validator};

    #[test]
    fn test_keyed_single_column_document() {
        crate::init_tracing();
        let rows = vec![raw_row(&[
            ("source_column", "customer_id"),
            ("target_column", "customer_id"),
            ("transformation", "source.customer_id"),
            ("is_key", "TRUE"),
        ])];

        let out = Validator::new().generate(&rows, &customers_context()).unwrap();

        let smt = &out.queries["source_minus_target"];
        assert!(smt.contains("WITH source_transformed AS ("));
        assert!(smt.contains("src.customer_id AS customer_id"));
        assert!(smt.contains("FROM customers src"));
        assert!(smt.contains("SELECT * FROM source_transformed\nEXCEPT\nSELECT * FROM target_data;"));

        let tms = &out.queries["target_minus_source"];
        assert!(tms.contains("SELECT * FROM target_data\nEXCEPT\nSELECT * FROM source_transformed;"));

        let diag = &out.queries["source_minus_target_diagnostic"];
        assert!(diag.contains("LEFT JOIN"));
        assert!(diag.contains("ON s.customer_id = t.customer_id"));
        assert!(diag.contains("WHERE t.customer_id IS NULL;"));

        assert_eq!(out.summary.total_mappings, 1);
        assert_eq!(out.summary.key_columns, vec!["customer_id"]);
        assert!(out.summary.duplicate_target_columns.is_empty());
    }

    #[test]
    fn test_computed_column_without_source() {
        let rows = vec![raw_row(&[
            ("source_column", ""),
            ("target_column", "total_amount"),
            ("transformation", "source.qty * source.price"),
            ("is_key", "FALSE"),
        ])];

        let out = Validator::new().generate(&rows, &customers_context()).unwrap();
        assert!(out.queries["source_minus_target"]
            .contains("src.qty * src.price AS total_amount"));
    }

    #[test]
    fn test_row_with_nothing_to_compute_rejected() {
        let rows = vec![raw_row(&[
            ("source_column", ""),
            ("target_column", "x"),
            ("transformation", ""),
        ])];

        let err = Validator::new()
            .with_document("bad.csv")
            .generate(&rows, &customers_context())
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Format {
                document: "bad.csv".to_string(),
                source: FormatError::NothingToCompute {
                    row: 0,
                    target: "x".to_string()
                },
            }
        );
    }

    #[test]
    fn test_duplicate_targets_generate_with_warning() {
        let rows = vec![
            raw_row(&[("source_column", "email"), ("target_column", "email")]),
            raw_row(&[("source_column", "email_alt"), ("target_column", "email")]),
        ];

        let out = Validator::new().generate(&rows, &customers_context()).unwrap();
        assert_eq!(out.summary.duplicate_target_columns, vec!["email"]);
    }

    #[test]
    fn test_complete_shape_without_keys() {
        let rows = vec![
            raw_row(&[("source_column", "a"), ("target_column", "a")]),
            raw_row(&[("source_column", "b"), ("target_column", "b")]),
        ];

        let out = Validator::new().generate(&rows, &customers_context()).unwrap();
        let complete = &out.queries["complete"];
        assert_eq!(complete.matches("EXCEPT").count(), 2);
        assert_eq!(complete.matches("LEFT JOIN").count(), 0);
        assert!(!out.summary.key_join_available);
    }

    #[test]
    fn test_complete_shape_with_keys() {
        let out = Validator::new()
            .generate(&customers_document(), &customers_context())
            .unwrap();
        let complete = &out.queries["complete"];
        assert_eq!(complete.matches("EXCEPT").count(), 2);
        assert_eq!(complete.matches("LEFT JOIN").count(), 2);
        assert!(out.summary.key_join_available);
    }

    #[test]
    fn test_literal_text_survives_generation() {
        let out = Validator::new()
            .generate(&customers_document(), &customers_context())
            .unwrap();
        let sql = &out.queries["source_minus_target"];
        // literals untouched, placeholder rewritten
        assert!(sql.contains("CASE WHEN src.status = 'A' THEN 'active' ELSE 'inactive' END AS status"));
        assert!(sql.contains("CONCAT(src.first_name, ' ', src.last_name) AS full_name"));
    }

    #[test]
    fn test_projection_preserves_document_order() {
        let out = Validator::new()
            .generate(&customers_document(), &customers_context())
            .unwrap();
        let sql = &out.queries["source_minus_target"];
        let id = sql.find("AS customer_id").unwrap();
        let name = sql.find("AS full_name").unwrap();
        let status = sql.find("AS status").unwrap();
        let email = sql.find("AS email").unwrap();
        assert!(id < name && name < status && status < email);
    }

    #[test]
    fn test_oracle_dialect_end_to_end() {
        let ctx = customers_context().dialect(SqlDialect::Oracle);
        let out = Validator::new().generate(&customers_document(), &ctx).unwrap();
        assert!(out.queries["source_minus_target"].contains("\nMINUS\n"));
    }

    #[test]
    fn test_single_direction_request() {
        let ctx = customers_context().query_type(QueryType::TargetMinusSource);
        let out = Validator::new().generate(&customers_document(), &ctx).unwrap();
        assert!(!out.queries.contains_key("source_minus_target"));
        assert!(!out.queries.contains_key("complete"));
        assert!(out.queries.contains_key("target_minus_source"));
        assert!(out.queries.contains_key("target_minus_source_diagnostic"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = Validator::new()
            .generate(&customers_document(), &customers_context())
            .unwrap();
        let b = Validator::new()
            .generate(&customers_document(), &customers_context())
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_schema_qualified_context() {
        let ctx = QueryContext::new(
            table_ref!("staging", "customers"),
            table_ref!("dw", "customers_dim"),
        );
        let out = Validator::new().generate(&customers_document(), &ctx).unwrap();
        let sql = &out.queries["source_minus_target"];
        assert!(sql.contains("FROM staging.customers src"));
        assert!(sql.contains("FROM dw.customers_dim"));
    }

    #[test]
    fn test_generated_query_serializes_for_http_layer() {
        let out = Validator::new()
            .generate(&customers_document(), &customers_context())
            .unwrap();
        let json: serde_json::Value = serde_json::to_value(&out).unwrap();
        assert!(json["queries"]["complete"].is_string());
        assert_eq!(json["summary"]["total_mappings"], 4);
        assert_eq!(json["summary"]["key_columns"][0], "customer_id");
    }
}
