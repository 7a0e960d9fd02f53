/// Recognized document headers and key-flag literals.
///
/// Passed explicitly into [`crate::normalize`] so tests and alternate
/// document conventions can substitute their own set without touching
/// shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderConfig {
    pub source_column: &'static str,
    pub target_column: &'static str,
    pub transformation: &'static str,
    pub is_key: &'static str,
    /// Values (compared case-insensitively) that coerce the key flag to true.
    pub truthy: &'static [&'static str],
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            source_column: "source_column",
            target_column: "target_column",
            transformation: "transformation",
            is_key: "is_key",
            truthy: &["true", "1", "yes"],
        }
    }
}

impl HeaderConfig {
    pub fn is_truthy(&self, value: &str) -> bool {
        self.truthy.iter().any(|t| t.eq_ignore_ascii_case(value))
    }
}
