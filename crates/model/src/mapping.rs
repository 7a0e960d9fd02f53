//! Canonical column-mapping records produced by the document normalizer.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One declared correspondence between a source-side expression and a
/// target column name.
///
/// Constructed once at the normalization boundary and immutable afterwards;
/// all downstream code operates on this record, never on raw document rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    /// Source column feeding the target; `None` for purely computed columns.
    pub source_column: Option<String>,

    /// Name the generated output column takes. Never empty.
    pub target_column: String,

    /// Opaque SQL expression computing the target value. `None` means a
    /// straight pass-through of `source_column`.
    pub transformation: Option<String>,

    /// Marks the column as a join/identity key used to correlate source
    /// and target rows.
    pub is_key: bool,
}

impl Mapping {
    pub fn new(target_column: impl Into<String>) -> Self {
        Self {
            source_column: None,
            target_column: target_column.into(),
            transformation: None,
            is_key: false,
        }
    }

    pub fn source(mut self, column: impl Into<String>) -> Self {
        self.source_column = Some(column.into());
        self
    }

    pub fn transformation(mut self, expr: impl Into<String>) -> Self {
        self.transformation = Some(expr.into());
        self
    }

    pub fn key(mut self, is_key: bool) -> Self {
        self.is_key = is_key;
        self
    }

    /// A mapping without an explicit transformation is a direct copy of
    /// its source column.
    pub fn is_pass_through(&self) -> bool {
        self.transformation.is_none()
    }
}

/// An ordered set of mappings. Order is preserved from the input document
/// and determines the column order of generated SELECT lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSet(Vec<Mapping>);

impl MappingSet {
    pub fn new(mappings: Vec<Mapping>) -> Self {
        Self(mappings)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mapping> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mappings flagged as join keys, in input order.
    pub fn key_mappings(&self) -> impl Iterator<Item = &Mapping> {
        self.0.iter().filter(|m| m.is_key)
    }

    /// Distinct source column names, sorted.
    pub fn source_columns(&self) -> Vec<String> {
        let set: BTreeSet<_> = self
            .0
            .iter()
            .filter_map(|m| m.source_column.clone())
            .collect();
        set.into_iter().collect()
    }

    /// Distinct target column names, sorted.
    pub fn target_columns(&self) -> Vec<String> {
        let set: BTreeSet<_> = self.0.iter().map(|m| m.target_column.clone()).collect();
        set.into_iter().collect()
    }

    /// Target column → transformation expression, for mappings that carry one.
    pub fn transformations(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .filter_map(|m| {
                m.transformation
                    .as_ref()
                    .map(|t| (m.target_column.clone(), t.clone()))
            })
            .collect()
    }

    /// Distinct `word.` qualifier tokens referenced inside transformation
    /// text, sorted. Used for reporting only; this is a token scan, not a
    /// SQL parse.
    pub fn referenced_qualifiers(&self) -> Vec<String> {
        let mut set = BTreeSet::new();
        for expr in self.0.iter().filter_map(|m| m.transformation.as_deref()) {
            scan_qualifiers(expr, &mut set);
        }
        set.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a MappingSet {
    type Item = &'a Mapping;
    type IntoIter = std::slice::Iter<'a, Mapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn scan_qualifiers(expr: &str, out: &mut BTreeSet<String>) {
    let bytes = expr.as_bytes();
    let mut start = None;
    let mut in_literal = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if in_literal {
            if b == b'\'' {
                if bytes.get(i + 1) == Some(&b'\'') {
                    // escaped quote, still inside the literal
                    i += 2;
                    continue;
                }
                in_literal = false;
            }
            i += 1;
            continue;
        }

        if b == b'\'' {
            in_literal = true;
            start = None;
            i += 1;
            continue;
        }

        let ident = b.is_ascii_alphanumeric() || b == b'_';
        match (ident, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                if b == b'.' && !bytes[s].is_ascii_digit() {
                    out.insert(expr[s..i].to_string());
                }
                start = None;
            }
            _ => {}
        }
        i += 1;
    }
}
