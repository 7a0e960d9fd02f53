pub mod query;
pub mod report;

pub use query::builder::{GeneratedQuery, build};
pub use report::ValidationSummary;
