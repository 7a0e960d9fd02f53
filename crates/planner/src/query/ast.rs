//! Shapes of the generated validation queries.
//!
//! Deliberately not a SQL AST: transformation expressions stay opaque text,
//! so these nodes only model the structure this crate itself emits.

use crate::query::qualifier::SelectItem;
use model::context::TableRef;

/// Which side of the comparison a query reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    SourceMinusTarget,
    TargetMinusSource,
}

impl Direction {
    /// Stable name used as the output map key and in comment headers.
    pub fn key(&self) -> &'static str {
        match self {
            Direction::SourceMinusTarget => "source_minus_target",
            Direction::TargetMinusSource => "target_minus_source",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Direction::SourceMinusTarget => {
                "Rows in the transformed source that are missing from the target."
            }
            Direction::TargetMinusSource => {
                "Rows in the target with no transformed-source counterpart."
            }
        }
    }
}

/// The shared `WITH` preamble: the transformed source relation and the raw
/// target relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationCtes {
    pub projection: Vec<SelectItem>,
    pub source: TableRef,
    pub target: TableRef,
}

/// One direction of the set-difference check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifferenceQuery {
    pub ctes: ValidationCtes,
    pub direction: Direction,
}

/// Both directions in a single statement, each branch tagged with a
/// `validation_type` literal so one WITH block serves both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedReport {
    pub ctes: ValidationCtes,
}

/// Row-level LEFT JOIN diagnostic over the key columns. Standalone and
/// independently executable; only built when at least one mapping is
/// key-flagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyJoinDiagnostic {
    pub ctes: ValidationCtes,
    pub direction: Direction,
    /// Output aliases of the key-flagged mappings, in input order.
    pub keys: Vec<String>,
}
