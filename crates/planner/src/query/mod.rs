pub mod ast;
pub mod builder;
pub mod dialect;
pub mod qualifier;
pub mod renderer;

/// Alias the derived source relation is bound to in every generated query.
pub const SOURCE_ALIAS: &str = "src";

/// Token mapping authors write (followed by a dot) to mean "the source
/// relation". The qualifier rewrites it to [`SOURCE_ALIAS`].
pub const SOURCE_PLACEHOLDER: &str = "source";

/// CTE name for the transformed source relation.
pub const SOURCE_CTE: &str = "source_transformed";

/// CTE name for the raw target relation.
pub const TARGET_CTE: &str = "target_data";
