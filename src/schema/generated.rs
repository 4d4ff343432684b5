use serde::{Deserialize, Serialize};

/// A generated name plus the inputs that produced it.
///
/// Replaying `language_id`, `category` and `seed` with the same batch
/// position reproduces `name` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedName {
    pub name: String,
    pub language_id: String,
    pub category: String,
    pub seed: String,
    /// Template of the pattern that was drawn, e.g. `"A.B"`.
    pub pattern: String,
    /// Set when every phonotactic retry still hit a forbidden substring.
    #[serde(default)]
    pub constraint_violation: bool,
}

impl std::fmt::Display for GeneratedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
