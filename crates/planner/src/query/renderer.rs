//! Renders query nodes into SQL text.

use crate::query::{
    SOURCE_ALIAS, SOURCE_CTE, TARGET_CTE,
    ast::{CombinedReport, DifferenceQuery, Direction, KeyJoinDiagnostic, ValidationCtes},
    dialect::Dialect,
};

/// A trait for any query node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, w: &mut SqlWriter);
}

/// Accumulates the SQL text and exposes the dialect for syntax-specific
/// details.
pub struct SqlWriter<'a> {
    pub sql: String,
    pub dialect: &'a dyn Dialect,
}

impl<'a> SqlWriter<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            dialect,
        }
    }

    pub fn finish(self) -> String {
        self.sql
    }

    pub fn line(&mut self, text: &str) {
        self.sql.push_str(text);
        self.sql.push('\n');
    }
}

/// Renders one node into a standalone SQL string.
pub fn render_to_string(node: &dyn Render, dialect: &dyn Dialect) -> String {
    let mut w = SqlWriter::new(dialect);
    node.render(&mut w);
    w.finish()
}

impl Render for ValidationCtes {
    fn render(&self, w: &mut SqlWriter) {
        w.line(&format!("WITH {SOURCE_CTE} AS ("));
        w.line("    SELECT");
        for (i, item) in self.projection.iter().enumerate() {
            let comma = if i + 1 < self.projection.len() { "," } else { "" };
            w.line(&format!(
                "        {} AS {}{comma}",
                item.expression, item.alias
            ));
        }
        w.line(&format!(
            "    FROM {} {SOURCE_ALIAS}",
            self.source.qualified_name()
        ));
        w.line("),");
        w.line(&format!("{TARGET_CTE} AS ("));
        w.line("    SELECT *");
        w.line(&format!("    FROM {}", self.target.qualified_name()));
        w.line(")");
    }
}

impl Render for DifferenceQuery {
    fn render(&self, w: &mut SqlWriter) {
        let (left, right) = operands(self.direction);

        w.line(&format!("-- {} validation query", self.direction.key()));
        w.line(&format!("-- {}", self.direction.describe()));
        self.ctes.render(w);
        let op = w.dialect.set_difference();
        w.line(&format!("SELECT * FROM {left}"));
        w.line(op);
        w.sql.push_str(&format!("SELECT * FROM {right};"));
    }
}

impl Render for CombinedReport {
    fn render(&self, w: &mut SqlWriter) {
        w.line("-- complete validation report");
        w.line("-- Both directions in one statement, tagged by validation_type.");
        self.ctes.render(w);
        render_tagged_branch(w, Direction::SourceMinusTarget);
        w.line("UNION ALL");
        render_tagged_branch(w, Direction::TargetMinusSource);
        // swap the closing newline for the statement terminator
        w.sql.pop();
        w.sql.push(';');
    }
}

fn render_tagged_branch(w: &mut SqlWriter, direction: Direction) {
    let (left, right) = operands(direction);
    let op = w.dialect.set_difference();
    w.line(&format!(
        "SELECT '{}' AS validation_type, diff.*",
        direction.key()
    ));
    w.line("FROM (");
    w.line(&format!("    SELECT * FROM {left}"));
    w.line(&format!("    {op}"));
    w.line(&format!("    SELECT * FROM {right}"));
    w.line(") diff");
}

impl Render for KeyJoinDiagnostic {
    fn render(&self, w: &mut SqlWriter) {
        // `own` is the side whose unmatched rows we report.
        let (own, own_alias, other, other_alias, describe) = match self.direction {
            Direction::SourceMinusTarget => (
                SOURCE_CTE,
                "s",
                TARGET_CTE,
                "t",
                "Source rows whose key has no match in the target.",
            ),
            Direction::TargetMinusSource => (
                TARGET_CTE,
                "t",
                SOURCE_CTE,
                "s",
                "Target rows whose key has no match in the transformed source.",
            ),
        };

        w.line(&format!(
            "-- {} key-join diagnostic",
            self.direction.key()
        ));
        w.line(&format!("-- {describe}"));
        self.ctes.render(w);
        w.line(&format!("SELECT {own_alias}.*"));
        w.line(&format!("FROM {own} {own_alias}"));
        w.line(&format!("LEFT JOIN {other} {other_alias}"));

        // The builder never constructs this without keys, but the struct is
        // public: degrade to a cross join probing a conventional `id` column
        // rather than panicking.
        let condition = if self.keys.is_empty() {
            "1=1".to_string()
        } else {
            self.keys
                .iter()
                .map(|k| format!("{own_alias}.{k} = {other_alias}.{k}"))
                .collect::<Vec<_>>()
                .join(" AND ")
        };
        w.line(&format!("    ON {condition}"));

        // Any key column works for the null probe; the first is as good as any.
        let probe = self.keys.first().map(String::as_str).unwrap_or("id");
        w.sql
            .push_str(&format!("WHERE {other_alias}.{probe} IS NULL;"));
    }
}

fn operands(direction: Direction) -> (&'static str, &'static str) {
    match direction {
        Direction::SourceMinusTarget => (SOURCE_CTE, TARGET_CTE),
        Direction::TargetMinusSource => (TARGET_CTE, SOURCE_CTE),
    }
}
