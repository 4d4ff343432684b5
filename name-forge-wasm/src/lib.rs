//! WASM bindings for name-forge: the browser UI calls into the engine here.

use std::sync::Arc;
use wasm_bindgen::prelude::*;

use name_forge::core::validate::{self, Severity};
use name_forge::{LanguageDefinition, NameSession};

// ---------------------------------------------------------------------------
// Embedded language data: compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const ELVISH: &str = include_str!("../../languages/elvish.json");
    pub const DWARVISH: &str = include_str!("../../languages/dwarvish.json");
    pub const SYLVAN_COAST: &str = include_str!("../../languages/sylvan-coast.json");

    pub const ALL: &[(&str, &str)] = &[
        ("dwarvish", DWARVISH),
        ("elvish", ELVISH),
        ("sylvan-coast", SYLVAN_COAST),
    ];
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct LanguageInfo {
    id: String,
    name: String,
    description: String,
    categories: Vec<String>,
}

#[derive(serde::Serialize)]
struct IssueInfo {
    severity: &'static str,
    message: String,
}

#[derive(serde::Serialize)]
struct ValidationReport {
    valid: bool,
    id: Option<String>,
    issues: Vec<IssueInfo>,
}

fn severity_name(severity: Severity) -> &'static str {
    match severity {
        Severity::Fatal => "fatal",
        Severity::PatternDropped => "dropped",
        Severity::Warning => "warning",
    }
}

fn parse_language(json: &str) -> Result<LanguageDefinition, JsError> {
    LanguageDefinition::from_json_str(json)
        .map(|v| v.language)
        .map_err(|e| JsError::new(&format!("Language error: {e}")))
}

fn info(language: &LanguageDefinition) -> LanguageInfo {
    LanguageInfo {
        id: language.id().to_string(),
        name: language.name().to_string(),
        description: language.description().to_string(),
        categories: language.categories().map(str::to_string).collect(),
    }
}

/// Validate a language document and return a JSON report of every issue.
#[wasm_bindgen]
pub fn validate_language(json: &str) -> String {
    let report = match serde_json::from_str::<serde_json::Value>(json) {
        Err(e) => ValidationReport {
            valid: false,
            id: None,
            issues: vec![IssueInfo {
                severity: "fatal",
                message: format!("invalid JSON: {e}"),
            }],
        },
        Ok(raw) => match validate::validate(&raw) {
            Ok(validated) => ValidationReport {
                valid: true,
                id: Some(validated.language.id().to_string()),
                issues: validated
                    .warnings
                    .iter()
                    .map(|w| IssueInfo {
                        severity: severity_name(w.severity()),
                        message: w.to_string(),
                    })
                    .collect(),
            },
            Err(errors) => ValidationReport {
                valid: false,
                id: None,
                issues: errors
                    .iter()
                    .map(|e| IssueInfo {
                        severity: severity_name(e.severity()),
                        message: e.to_string(),
                    })
                    .collect(),
            },
        },
    };
    serde_json::to_string(&report).unwrap_or_else(|_| "{}".to_string())
}

/// Return a JSON array describing the bundled languages.
#[wasm_bindgen]
pub fn builtin_languages() -> Result<String, JsError> {
    let mut infos = Vec::with_capacity(data::ALL.len());
    for (_, src) in data::ALL {
        infos.push(info(&parse_language(src)?));
    }
    serde_json::to_string(&infos).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// NameForgeDemo: one generation session per instance
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct NameForgeDemo {
    session: NameSession,
}

#[wasm_bindgen]
impl NameForgeDemo {
    /// Start a session on a bundled language. An empty or missing seed
    /// mints a fresh one, readable through `seed()`.
    #[wasm_bindgen(constructor)]
    pub fn new(language_id: &str, seed: Option<String>) -> Result<NameForgeDemo, JsError> {
        let src = data::ALL
            .iter()
            .find(|(id, _)| *id == language_id)
            .map(|(_, src)| *src)
            .ok_or_else(|| JsError::new(&format!("Unknown language: {language_id}")))?;
        Self::from_json(src, seed)
    }

    /// Start a session on a user-supplied language document.
    pub fn from_json(json: &str, seed: Option<String>) -> Result<NameForgeDemo, JsError> {
        let language = Arc::new(parse_language(json)?);
        let seed = seed.filter(|s| !s.is_empty());
        Ok(NameForgeDemo {
            session: NameSession::new(language, seed.as_deref()),
        })
    }

    /// The effective seed of this session.
    pub fn seed(&self) -> String {
        self.session.seed().to_string()
    }

    /// Language metadata as JSON.
    pub fn language(&self) -> Result<String, JsError> {
        serde_json::to_string(&info(self.session.language()))
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Next name in this session's stream.
    pub fn next_name(&mut self, category: &str) -> Result<String, JsError> {
        self.session
            .next_name(category)
            .map(|n| n.name)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))
    }

    /// Next `count` names as a JSON array of full generation records.
    pub fn generate(&mut self, category: &str, count: usize) -> Result<String, JsError> {
        let names = self
            .session
            .batch(category, count)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))?;
        serde_json::to_string(&names).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }
}

/// Generate `count` names in one call and return them as JSON records.
#[wasm_bindgen]
pub fn generate_names(
    language_json: &str,
    category: &str,
    seed: Option<String>,
    count: usize,
) -> Result<String, JsError> {
    let mut demo = NameForgeDemo::from_json(language_json, seed)?;
    demo.generate(category, count)
}
