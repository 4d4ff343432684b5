/// Language registry: load, validate and cache language files.
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::core::validate::{self, ValidatedLanguage, ValidationError, ValidationOptions};
use crate::schema::language::LanguageDefinition;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("unsupported language file extension: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("language '{source_name}' failed validation: {}", summarize(.errors))]
    Invalid {
        source_name: String,
        errors: Vec<ValidationError>,
    },
    #[error("language id '{0}' is already registered")]
    DuplicateId(String),
    #[error("language not found: {0}")]
    NotFound(String),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .filter(|e| e.is_fatal())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LanguageDefinition {
    /// Parse and validate a JSON language document.
    pub fn from_json_str(input: &str) -> Result<ValidatedLanguage, RegistryError> {
        let raw: Value = serde_json::from_str(input)?;
        validate_raw(&raw, "<json>", &ValidationOptions::default())
    }

    /// Parse and validate a RON language document (map syntax).
    pub fn from_ron_str(input: &str) -> Result<ValidatedLanguage, RegistryError> {
        let raw: Value = ron::from_str(input)?;
        validate_raw(&raw, "<ron>", &ValidationOptions::default())
    }
}

fn validate_raw(
    raw: &Value,
    source_name: &str,
    options: &ValidationOptions,
) -> Result<ValidatedLanguage, RegistryError> {
    validate::validate_with(raw, options).map_err(|errors| RegistryError::Invalid {
        source_name: source_name.to_string(),
        errors,
    })
}

/// Read a `.json` or `.ron` file into a raw value without validating it.
pub fn read_raw(path: &Path) -> Result<Value, RegistryError> {
    let contents = std::fs::read_to_string(path)?;
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => Ok(serde_json::from_str(&contents)?),
        Some("ron") => Ok(ron::from_str(&contents)?),
        _ => Err(RegistryError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn is_language_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("json") | Some("ron")
    )
}

struct Entry {
    language: Arc<LanguageDefinition>,
    warnings: Vec<ValidationError>,
}

/// Validated languages keyed by id, shared read-only once registered.
#[derive(Default)]
pub struct LanguageRegistry {
    languages: HashMap<String, Entry>,
    options: ValidationOptions,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ValidationOptions) -> Self {
        Self {
            languages: HashMap::new(),
            options,
        }
    }

    /// Register an already-validated language.
    pub fn register(&mut self, validated: ValidatedLanguage) -> Result<Arc<LanguageDefinition>, RegistryError> {
        let id = validated.language.id().to_string();
        if self.languages.contains_key(&id) {
            return Err(RegistryError::DuplicateId(id));
        }
        if !validated.warnings.is_empty() {
            log::warn!(
                "language '{}' loaded with {} warning(s)",
                id,
                validated.warnings.len()
            );
            for warning in &validated.warnings {
                log::warn!("  {}: {}", id, warning);
            }
        }
        let language = Arc::new(validated.language);
        self.languages.insert(
            id,
            Entry {
                language: language.clone(),
                warnings: validated.warnings,
            },
        );
        Ok(language)
    }

    /// Load, validate and cache one language file.
    pub fn load_file(&mut self, path: &Path) -> Result<Arc<LanguageDefinition>, RegistryError> {
        let raw = read_raw(path)?;
        let validated = validate_raw(&raw, &path.display().to_string(), &self.options)?;
        log::debug!("validated {} as '{}'", path.display(), validated.language.id());
        self.register(validated)
    }

    /// Load every language file in `dir`, in filename order.
    ///
    /// Stops at the first file that fails; languages loaded before it stay
    /// registered.
    pub fn load_dir(&mut self, dir: &Path) -> Result<Vec<Arc<LanguageDefinition>>, RegistryError> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_language_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        paths.iter().map(|path| self.load_file(path)).collect()
    }

    pub fn get(&self, id: &str) -> Option<Arc<LanguageDefinition>> {
        self.languages.get(id).map(|e| e.language.clone())
    }

    /// Like `get`, but as an error for callers that propagate with `?`.
    pub fn require(&self, id: &str) -> Result<Arc<LanguageDefinition>, RegistryError> {
        self.get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Non-fatal issues recorded when `id` was validated.
    pub fn warnings(&self, id: &str) -> &[ValidationError] {
        self.languages
            .get(id)
            .map(|e| e.warnings.as_slice())
            .unwrap_or(&[])
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
