/// Language data validation: the boundary between raw structured data
/// and a trusted `LanguageDefinition`.
///
/// Problems are collected rather than short-circuited, so a caller sees
/// every issue in a file at once. Each issue carries a severity:
///
/// - `Fatal` blocks the whole language.
/// - `PatternDropped` removes one pattern (or category) and keeps going.
/// - `Warning` is informational; the language loads unchanged.
use rustc_hash::FxHashSet;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::core::pattern::{self, ResolveError};
use crate::schema::language::{
    GroupMap, LanguageDefinition, Pattern, Phonotactics, UiMetadata, GROUP_SEPARATOR, JOINER_MARKER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Fatal,
    PatternDropped,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("language data must be an object")]
    NotAnObject,
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("field '{field}' must be {expected}")]
    WrongType { field: String, expected: &'static str },
    #[error("id '{0}' must be non-empty lowercase alphanumeric characters and hyphens")]
    InvalidId(String),
    #[error("syllable group '{0}' is empty")]
    EmptyGroup(String),
    #[error("syllable group '{group}' has an empty syllable at position {index}")]
    EmptySyllable { group: String, index: usize },
    #[error("syllable group '{group}' has {count} syllables ({recommended} or more recommended)")]
    SparseGroup {
        group: String,
        count: usize,
        recommended: usize,
    },
    #[error("syllable group '{group}' can never be referenced: {reason}")]
    UnreachableGroup { group: String, reason: &'static str },
    #[error("category '{category}' is not a list of patterns; dropped")]
    MalformedCategory { category: String },
    #[error("pattern #{index} in '{category}' is malformed: {reason}; dropped")]
    MalformedPattern {
        category: String,
        index: usize,
        reason: String,
    },
    #[error("pattern '{pattern}' in '{category}' references unknown group '{group}'; dropped")]
    UnknownGroup {
        category: String,
        pattern: String,
        group: String,
    },
    #[error("pattern '{pattern}' in '{category}' has weight {weight}; must be finite and > 0; dropped")]
    InvalidWeight {
        category: String,
        pattern: String,
        weight: f64,
    },
    #[error("weights in '{0}' sum past the largest representable value; dropped")]
    CategoryWeightOverflow(String),
    #[error("pattern '{pattern}' appears more than once in '{category}'")]
    DuplicatePattern { category: String, pattern: String },
    #[error("category '{0}' has no usable patterns")]
    EmptyCategory(String),
    #[error("optional field '{field}' ignored: {reason}")]
    IgnoredField { field: &'static str, reason: String },
    #[error("no category has a usable pattern")]
    NoUsablePatterns,
}

impl ValidationError {
    pub fn severity(&self) -> Severity {
        match self {
            Self::NotAnObject
            | Self::MissingField(_)
            | Self::WrongType { .. }
            | Self::InvalidId(_)
            | Self::EmptyGroup(_)
            | Self::EmptySyllable { .. }
            | Self::NoUsablePatterns => Severity::Fatal,
            Self::MalformedCategory { .. }
            | Self::MalformedPattern { .. }
            | Self::UnknownGroup { .. }
            | Self::InvalidWeight { .. }
            | Self::CategoryWeightOverflow(_) => Severity::PatternDropped,
            Self::SparseGroup { .. }
            | Self::UnreachableGroup { .. }
            | Self::DuplicatePattern { .. }
            | Self::EmptyCategory(_)
            | Self::IgnoredField { .. } => Severity::Warning,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

/// Tunables for validation.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct ValidationOptions {
    /// Groups smaller than this produce a `SparseGroup` warning.
    pub min_recommended_syllables: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            min_recommended_syllables: 3,
        }
    }
}

/// A language that passed validation, with the non-fatal issues found on the way.
#[derive(Debug, Clone)]
pub struct ValidatedLanguage {
    pub language: LanguageDefinition,
    pub warnings: Vec<ValidationError>,
}

/// Validate raw language data with default options.
pub fn validate(raw: &Value) -> Result<ValidatedLanguage, Vec<ValidationError>> {
    validate_with(raw, &ValidationOptions::default())
}

/// Validate raw language data.
///
/// On success, dropped patterns are already stripped and empty categories
/// removed. On failure, every issue found is returned, fatal ones included.
pub fn validate_with(
    raw: &Value,
    options: &ValidationOptions,
) -> Result<ValidatedLanguage, Vec<ValidationError>> {
    let Some(obj) = raw.as_object() else {
        return Err(vec![ValidationError::NotAnObject]);
    };
    let mut issues = Vec::new();

    let id = required_str(obj, "id", &mut issues);
    if let Some(ref id) = id {
        if !is_valid_id(id) {
            issues.push(ValidationError::InvalidId(id.clone()));
        }
    }
    let name = required_str(obj, "name", &mut issues);
    let description = optional_str(obj, "description", &mut issues);
    let version = optional_version(obj, &mut issues);

    let syllables = match required(obj, "syllables", &mut issues) {
        Some(value) => check_syllables(value, options, &mut issues),
        None => GroupMap::new(),
    };

    let patterns = match required(obj, "patterns", &mut issues) {
        Some(value) => check_patterns(value, &syllables, &mut issues),
        None => BTreeMap::new(),
    };

    if obj.contains_key("patterns") && patterns.is_empty() {
        issues.push(ValidationError::NoUsablePatterns);
    }

    let phonotactics = optional_section::<Phonotactics>(obj, "phonotactics", &mut issues);
    let ui = optional_section::<UiMetadata>(obj, "ui", &mut issues);

    if issues.iter().any(ValidationError::is_fatal) {
        return Err(issues);
    }
    let (Some(id), Some(name)) = (id, name) else {
        return Err(issues);
    };

    Ok(ValidatedLanguage {
        language: LanguageDefinition::from_parts(
            id,
            name,
            description,
            version,
            syllables,
            patterns,
            phonotactics,
            ui,
        ),
        warnings: issues,
    })
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn required<'v>(
    obj: &'v Map<String, Value>,
    field: &'static str,
    issues: &mut Vec<ValidationError>,
) -> Option<&'v Value> {
    let value = obj.get(field);
    if value.is_none() {
        issues.push(ValidationError::MissingField(field));
    }
    value
}

fn required_str(
    obj: &Map<String, Value>,
    field: &'static str,
    issues: &mut Vec<ValidationError>,
) -> Option<String> {
    let value = required(obj, field, issues)?;
    match value.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            issues.push(ValidationError::WrongType {
                field: field.to_string(),
                expected: "a string",
            });
            None
        }
    }
}

fn optional_str(
    obj: &Map<String, Value>,
    field: &'static str,
    issues: &mut Vec<ValidationError>,
) -> String {
    match obj.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            issues.push(ValidationError::IgnoredField {
                field,
                reason: "expected a string".to_string(),
            });
            String::new()
        }
    }
}

/// Versions show up both as `"1.2"` and as bare numbers in hand-written files.
fn optional_version(obj: &Map<String, Value>, issues: &mut Vec<ValidationError>) -> String {
    match obj.get("version") {
        Some(Value::Number(n)) => n.to_string(),
        _ => optional_str(obj, "version", issues),
    }
}

fn optional_section<T: serde::de::DeserializeOwned>(
    obj: &Map<String, Value>,
    field: &'static str,
    issues: &mut Vec<ValidationError>,
) -> Option<T> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value(value.clone()) {
            Ok(section) => Some(section),
            Err(e) => {
                issues.push(ValidationError::IgnoredField {
                    field,
                    reason: e.to_string(),
                });
                None
            }
        },
    }
}

fn check_syllables(
    value: &Value,
    options: &ValidationOptions,
    issues: &mut Vec<ValidationError>,
) -> GroupMap {
    let mut groups = GroupMap::new();
    let Some(obj) = value.as_object() else {
        issues.push(ValidationError::WrongType {
            field: "syllables".to_string(),
            expected: "an object of syllable lists",
        });
        return groups;
    };

    for (group, entries) in obj {
        let Some(entries) = entries.as_array() else {
            issues.push(ValidationError::WrongType {
                field: format!("syllables.{}", group),
                expected: "a list of strings",
            });
            continue;
        };
        if entries.is_empty() {
            issues.push(ValidationError::EmptyGroup(group.clone()));
            continue;
        }

        let mut syllables = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match entry.as_str() {
                None => issues.push(ValidationError::WrongType {
                    field: format!("syllables.{}[{}]", group, index),
                    expected: "a string",
                }),
                // A bare joiner marker would strip down to nothing.
                Some(s) if s.is_empty() || s.strip_prefix(JOINER_MARKER) == Some("") => {
                    issues.push(ValidationError::EmptySyllable {
                        group: group.clone(),
                        index,
                    })
                }
                Some(s) => syllables.push(s.to_string()),
            }
        }

        if let Some(reason) = unreachable_reason(group) {
            issues.push(ValidationError::UnreachableGroup {
                group: group.clone(),
                reason,
            });
        }
        if entries.len() < options.min_recommended_syllables {
            issues.push(ValidationError::SparseGroup {
                group: group.clone(),
                count: entries.len(),
                recommended: options.min_recommended_syllables,
            });
        }
        if !syllables.is_empty() {
            groups.insert(group.clone(), syllables);
        }
    }

    groups
}

/// Pattern tokens are split on the separator and trimmed, so some keys can
/// never come out of a template.
fn unreachable_reason(group: &str) -> Option<&'static str> {
    if group.trim().is_empty() {
        Some("identifier is blank")
    } else if group.contains(GROUP_SEPARATOR) {
        Some("identifier contains the group separator")
    } else if group.trim() != group {
        Some("identifier has surrounding whitespace")
    } else {
        None
    }
}

fn check_patterns(
    value: &Value,
    groups: &GroupMap,
    issues: &mut Vec<ValidationError>,
) -> BTreeMap<String, Vec<Pattern>> {
    let mut categories = BTreeMap::new();
    let Some(obj) = value.as_object() else {
        issues.push(ValidationError::WrongType {
            field: "patterns".to_string(),
            expected: "an object of pattern lists",
        });
        return categories;
    };

    for (category, entries) in obj {
        let Some(entries) = entries.as_array() else {
            issues.push(ValidationError::MalformedCategory {
                category: category.clone(),
            });
            continue;
        };

        let mut usable = Vec::new();
        let mut seen = FxHashSet::default();
        for (index, entry) in entries.iter().enumerate() {
            let Some(pattern) = check_pattern(category, index, entry, groups, issues) else {
                continue;
            };
            if !seen.insert(pattern.template.clone()) {
                issues.push(ValidationError::DuplicatePattern {
                    category: category.clone(),
                    pattern: pattern.template.clone(),
                });
            }
            usable.push(pattern);
        }

        if usable.is_empty() {
            issues.push(ValidationError::EmptyCategory(category.clone()));
        } else if !usable.iter().map(|p| p.weight).sum::<f64>().is_finite() {
            issues.push(ValidationError::CategoryWeightOverflow(category.clone()));
        } else {
            categories.insert(category.clone(), usable);
        }
    }

    categories
}

fn check_pattern(
    category: &str,
    index: usize,
    entry: &Value,
    groups: &GroupMap,
    issues: &mut Vec<ValidationError>,
) -> Option<Pattern> {
    let malformed = |reason: &str| ValidationError::MalformedPattern {
        category: category.to_string(),
        index,
        reason: reason.to_string(),
    };

    let Some(obj) = entry.as_object() else {
        issues.push(malformed("expected an object"));
        return None;
    };
    let Some(template) = obj.get("pattern").and_then(Value::as_str) else {
        issues.push(malformed("missing string field 'pattern'"));
        return None;
    };
    let Some(weight) = obj.get("weight").and_then(Value::as_f64) else {
        issues.push(malformed("missing numeric field 'weight'"));
        return None;
    };

    let candidate = Pattern {
        template: template.to_string(),
        weight,
        description: obj.get("description").and_then(Value::as_str).map(str::to_string),
        example: obj.get("example").and_then(Value::as_str).map(str::to_string),
    };

    if !weight.is_finite() || weight <= 0.0 {
        issues.push(ValidationError::InvalidWeight {
            category: category.to_string(),
            pattern: candidate.template,
            weight,
        });
        return None;
    }

    match pattern::resolve(&candidate, groups) {
        Ok(_) => Some(candidate),
        Err(ResolveError::UnknownGroup { group, .. }) => {
            issues.push(ValidationError::UnknownGroup {
                category: category.to_string(),
                pattern: candidate.template,
                group,
            });
            None
        }
        Err(ResolveError::EmptyToken(_)) => {
            issues.push(malformed("template has an empty group token"));
            None
        }
    }
}
