/// The generation facade: category → weighted pattern → resolve → assemble.
///
/// This is the only entry point UI and history layers are expected to use.
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::core::assemble;
use crate::core::pattern::{self, ResolveError};
use crate::core::rng::SeededRng;
use crate::core::weighted::{self, SelectError};
use crate::schema::generated::GeneratedName;
use crate::schema::language::{LanguageDefinition, Pattern};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("language '{language}' has no usable patterns for category '{category}'")]
    UnknownCategory { language: String, category: String },
    #[error("selection error: {0}")]
    Select(#[from] SelectError),
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Tunables for name assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Upper bound on phonotactic retries per name.
    pub max_attempts: u32,
    /// Uppercase the first character of each name.
    pub capitalize: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            capitalize: true,
        }
    }
}

impl GeneratorOptions {
    /// Load options from a RON file; missing fields keep their defaults.
    pub fn load_from_ron(path: &Path) -> Result<Self, GenerateError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }
}

/// Stateless name generator. Built via `NameGenerator::builder()`.
#[derive(Debug, Clone, Default)]
pub struct NameGenerator {
    options: GeneratorOptions,
}

/// Builder for constructing a `NameGenerator`.
#[derive(Debug, Clone, Default)]
pub struct NameGeneratorBuilder {
    options: GeneratorOptions,
}

impl NameGeneratorBuilder {
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.options.max_attempts = attempts;
        self
    }

    pub fn capitalize(mut self, capitalize: bool) -> Self {
        self.options.capitalize = capitalize;
        self
    }

    pub fn options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> NameGenerator {
        NameGenerator {
            options: self.options,
        }
    }
}

impl NameGenerator {
    pub fn builder() -> NameGeneratorBuilder {
        NameGeneratorBuilder::default()
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate `count` names from a fresh handle seeded with `seed`
    /// (or a minted seed when `None`).
    pub fn generate(
        &self,
        language: &LanguageDefinition,
        category: &str,
        seed: Option<&str>,
        count: usize,
    ) -> Result<Vec<GeneratedName>, GenerateError> {
        let mut rng = SeededRng::new(seed);
        self.generate_with_rng(language, category, &mut rng, count)
    }

    /// Generate `count` names, advancing the caller's handle.
    ///
    /// A batch of N equals N single calls sharing the handle, so batches are
    /// prefix-extensions of each other for a fixed seed.
    pub fn generate_with_rng(
        &self,
        language: &LanguageDefinition,
        category: &str,
        rng: &mut SeededRng,
        count: usize,
    ) -> Result<Vec<GeneratedName>, GenerateError> {
        let patterns = category_patterns(language, category)?;
        (0..count)
            .map(|_| self.draw(language, category, patterns, rng))
            .collect()
    }

    /// Generate a single name, advancing the caller's handle.
    pub fn next_name(
        &self,
        language: &LanguageDefinition,
        category: &str,
        rng: &mut SeededRng,
    ) -> Result<GeneratedName, GenerateError> {
        let patterns = category_patterns(language, category)?;
        self.draw(language, category, patterns, rng)
    }

    fn draw(
        &self,
        language: &LanguageDefinition,
        category: &str,
        patterns: &[Pattern],
        rng: &mut SeededRng,
    ) -> Result<GeneratedName, GenerateError> {
        let chosen = weighted::pick(patterns, |p| p.weight, rng)?;
        let groups = pattern::resolve(chosen, language.syllables())?;
        let assembled = assemble::assemble(&groups, language.phonotactics(), &self.options, rng)?;

        log::debug!(
            "{}/{}: '{}' from '{}' (seed '{}', attempts {})",
            language.id(),
            category,
            assembled.name,
            chosen.template,
            rng.seed(),
            assembled.attempts
        );

        Ok(GeneratedName {
            name: assembled.name,
            language_id: language.id().to_string(),
            category: category.to_string(),
            seed: rng.seed().to_string(),
            pattern: chosen.template.clone(),
            constraint_violation: assembled.constraint_violation,
        })
    }
}

fn category_patterns<'a>(
    language: &'a LanguageDefinition,
    category: &str,
) -> Result<&'a [Pattern], GenerateError> {
    match language.patterns(category) {
        Some(patterns) if !patterns.is_empty() => Ok(patterns),
        _ => Err(GenerateError::UnknownCategory {
            language: language.id().to_string(),
            category: category.to_string(),
        }),
    }
}

/// Generate with default options. See [`NameGenerator::generate`].
pub fn generate(
    language: &LanguageDefinition,
    category: &str,
    seed: Option<&str>,
    count: usize,
) -> Result<Vec<GeneratedName>, GenerateError> {
    NameGenerator::default().generate(language, category, seed, count)
}

/// One logical generation session: a shared language plus its own RNG handle.
///
/// Concurrent requests each get their own session so draws never interleave.
#[derive(Debug, Clone)]
pub struct NameSession {
    language: Arc<LanguageDefinition>,
    generator: NameGenerator,
    rng: SeededRng,
}

impl NameSession {
    pub fn new(language: Arc<LanguageDefinition>, seed: Option<&str>) -> Self {
        Self::with_generator(language, NameGenerator::default(), seed)
    }

    pub fn with_generator(
        language: Arc<LanguageDefinition>,
        generator: NameGenerator,
        seed: Option<&str>,
    ) -> Self {
        Self {
            language,
            generator,
            rng: SeededRng::new(seed),
        }
    }

    pub fn seed(&self) -> &str {
        self.rng.seed()
    }

    pub fn language(&self) -> &LanguageDefinition {
        &self.language
    }

    pub fn next_name(&mut self, category: &str) -> Result<GeneratedName, GenerateError> {
        self.generator.next_name(&self.language, category, &mut self.rng)
    }

    pub fn batch(&mut self, category: &str, count: usize) -> Result<Vec<GeneratedName>, GenerateError> {
        self.generator
            .generate_with_rng(&self.language, category, &mut self.rng, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validate::validate;
    use serde_json::json;

    fn scenario_language() -> LanguageDefinition {
        validate(&json!({
            "id": "scenario",
            "name": "Scenario",
            "syllables": {
                "A": ["kar", "mor"],
                "B": ["an", "eth"],
            },
            "patterns": {
                "person_names": [{ "pattern": "A.B", "weight": 100 }],
            },
        }))
        .unwrap()
        .language
    }

    fn weighted_language() -> LanguageDefinition {
        validate(&json!({
            "id": "weighted",
            "name": "Weighted",
            "syllables": {
                "A": ["ka", "ko", "ku"],
                "B": ["ri", "ro", "ru"],
            },
            "patterns": {
                "person_names": [
                    { "pattern": "A", "weight": 90 },
                    { "pattern": "A.B", "weight": 10 },
                ],
            },
        }))
        .unwrap()
        .language
    }

    #[test]
    fn scenario_seed_is_reproducible() {
        let lang = scenario_language();
        let first = generate(&lang, "person_names", Some("seed1"), 1).unwrap();
        let again = generate(&lang, "person_names", Some("seed1"), 1).unwrap();
        assert_eq!(first, again);
        assert!(
            ["Karan", "Kareth", "Moran", "Moreth"].contains(&first[0].name.as_str()),
            "unexpected {}",
            first[0].name
        );
        assert_eq!(first[0].pattern, "A.B");
        assert_eq!(first[0].seed, "seed1");
        assert_eq!(first[0].language_id, "scenario");
    }

    #[test]
    fn batch_equals_sequential_singles() {
        let lang = scenario_language();
        let generator = NameGenerator::default();
        let batch = generator.generate(&lang, "person_names", Some("s"), 5).unwrap();

        let mut rng = SeededRng::from_seed_str("s");
        let singles: Vec<GeneratedName> = (0..5)
            .map(|_| generator.next_name(&lang, "person_names", &mut rng).unwrap())
            .collect();
        assert_eq!(batch, singles);
    }

    #[test]
    fn smaller_batch_is_prefix_of_larger() {
        let lang = weighted_language();
        let three = generate(&lang, "person_names", Some("prefix"), 3).unwrap();
        let eight = generate(&lang, "person_names", Some("prefix"), 8).unwrap();
        assert_eq!(three[..], eight[..3]);
    }

    #[test]
    fn unknown_category_errors() {
        let lang = scenario_language();
        let err = generate(&lang, "ship_names", Some("x"), 1).unwrap_err();
        assert!(matches!(err, GenerateError::UnknownCategory { category, .. } if category == "ship_names"));
    }

    #[test]
    fn zero_count_is_empty_but_still_checks_category() {
        let lang = scenario_language();
        assert!(generate(&lang, "person_names", Some("x"), 0).unwrap().is_empty());
        assert!(generate(&lang, "nope", Some("x"), 0).is_err());
    }

    #[test]
    fn unseeded_batch_reports_replayable_seed() {
        let lang = weighted_language();
        let names = generate(&lang, "person_names", None, 4).unwrap();
        let seed = names[0].seed.clone();
        assert!(names.iter().all(|n| n.seed == seed));
        let replay = generate(&lang, "person_names", Some(seed.as_str()), 4).unwrap();
        assert_eq!(names, replay);
    }

    #[test]
    fn pattern_weights_drive_frequency() {
        let lang = weighted_language();
        let names = generate(&lang, "person_names", Some("weights"), 10_000).unwrap();
        let short = names.iter().filter(|n| n.pattern == "A").count();
        assert!(
            (8_700..=9_300).contains(&short),
            "expected ~90% single-group names, got {}/10000",
            short
        );
    }

    #[test]
    fn session_continues_the_same_stream() {
        let lang = Arc::new(weighted_language());
        let mut session = NameSession::new(lang.clone(), Some("session"));
        let mut names = vec![session.next_name("person_names").unwrap()];
        names.extend(session.batch("person_names", 4).unwrap());

        let expected = generate(&lang, "person_names", Some("session"), 5).unwrap();
        assert_eq!(names, expected);
        assert_eq!(session.seed(), "session");
    }

    #[test]
    fn builder_options_flow_through() {
        let lang = scenario_language();
        let generator = NameGenerator::builder().capitalize(false).max_attempts(3).build();
        assert_eq!(generator.options().max_attempts, 3);
        let names = generator.generate(&lang, "person_names", Some("lower"), 10).unwrap();
        assert!(names.iter().all(|n| n.name.chars().next().unwrap().is_lowercase()));
    }

    #[test]
    fn options_parse_from_ron_with_defaults() {
        let opts: GeneratorOptions = ron::from_str("(max_attempts: 4)").unwrap();
        assert_eq!(opts.max_attempts, 4);
        assert!(opts.capitalize);
    }
}
