//! Turns raw header-keyed document rows into canonical [`model::mapping::MappingSet`]s.
//!
//! File decoding (CSV/Excel) belongs to the caller; this crate only sees
//! already-parsed rows.

pub mod headers;
pub mod normalize;

pub use headers::HeaderConfig;
pub use normalize::{RawRow, normalize};
