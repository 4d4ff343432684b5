/// Language definitions: the immutable, validated shape the engine trusts.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator between group identifiers inside a pattern template.
pub const GROUP_SEPARATOR: char = '.';

/// Leading marker on a syllable that joins it to the previous fragment
/// with a literal hyphen.
pub const JOINER_MARKER: char = '-';

/// Group identifier → ordered syllable fragments.
pub type GroupMap = BTreeMap<String, Vec<String>>;

/// A weighted name shape for one category, e.g. `"A.B.C"` with weight 40.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub template: String,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl Pattern {
    pub fn new(template: impl Into<String>, weight: f64) -> Self {
        Self {
            template: template.into(),
            weight,
            description: None,
            example: None,
        }
    }

    /// Group identifiers in literal left-to-right order, whitespace-trimmed.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.template.split(GROUP_SEPARATOR).map(str::trim)
    }
}

/// Optional constraints applied to assembled output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phonotactics {
    /// Adjacent-letter clusters the language considers natural.
    #[serde(default)]
    pub allowed_clusters: Vec<String>,
    /// Substrings an assembled name must not contain (case-insensitive).
    #[serde(default)]
    pub forbidden: Vec<String>,
    #[serde(default)]
    pub vowel_harmony: bool,
}

impl Phonotactics {
    /// True when there is anything to check an assembled name against.
    pub fn is_active(&self) -> bool {
        !self.forbidden.is_empty()
    }

    /// First forbidden substring present in `name`, if any.
    pub fn first_violation(&self, name: &str) -> Option<&str> {
        let lowered = name.to_lowercase();
        self.forbidden
            .iter()
            .find(|f| !f.is_empty() && lowered.contains(&f.to_lowercase()))
            .map(String::as_str)
    }
}

/// Presentation hints carried through for the UI layer; the engine ignores them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiMetadata {
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub cultural_note: Option<String>,
}

/// A validated fictional language.
///
/// Only the validator constructs these, so every pattern here references
/// existing groups, every weight is finite and positive, and every
/// category holds at least one pattern. Fields are read-only after load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageDefinition {
    id: String,
    name: String,
    description: String,
    version: String,
    syllables: GroupMap,
    patterns: BTreeMap<String, Vec<Pattern>>,
    phonotactics: Option<Phonotactics>,
    ui: Option<UiMetadata>,
}

impl LanguageDefinition {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: String,
        name: String,
        description: String,
        version: String,
        syllables: GroupMap,
        patterns: BTreeMap<String, Vec<Pattern>>,
        phonotactics: Option<Phonotactics>,
        ui: Option<UiMetadata>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            version,
            syllables,
            patterns,
            phonotactics,
            ui,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn syllables(&self) -> &GroupMap {
        &self.syllables
    }

    /// Usable patterns for a category, in declared order.
    pub fn patterns(&self, category: &str) -> Option<&[Pattern]> {
        self.patterns.get(category).map(Vec::as_slice)
    }

    /// Category names in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    pub fn phonotactics(&self) -> Option<&Phonotactics> {
        self.phonotactics.as_ref()
    }

    pub fn ui(&self) -> Option<&UiMetadata> {
        self.ui.as_ref()
    }
}
