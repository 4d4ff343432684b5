/// Bundled language data and file-loading integration tests.
use name_forge::core::registry::LanguageRegistry;
use name_forge::core::validate::{Severity, ValidationError};
use name_forge::{LanguageDefinition, RegistryError};
use std::path::Path;

#[test]
fn bundled_languages_load_without_warnings() {
    let mut registry = LanguageRegistry::new();
    let loaded = registry.load_dir(Path::new("languages")).unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(registry.ids(), vec!["dwarvish", "elvish", "sylvan-coast"]);

    for id in registry.ids() {
        assert!(
            registry.warnings(id).is_empty(),
            "{} has warnings: {:?}",
            id,
            registry.warnings(id)
        );
    }
}

#[test]
fn bundled_languages_meet_recommended_group_size() {
    let mut registry = LanguageRegistry::new();
    registry.load_dir(Path::new("languages")).unwrap();

    for id in registry.ids() {
        let lang = registry.get(id).unwrap();
        for (group, syllables) in lang.syllables() {
            assert!(
                syllables.len() >= 3,
                "group '{}' in '{}' has only {} syllables",
                group,
                id,
                syllables.len()
            );
        }
    }
}

#[test]
fn every_bundled_language_has_person_names() {
    let mut registry = LanguageRegistry::new();
    registry.load_dir(Path::new("languages")).unwrap();
    for id in registry.ids() {
        let lang = registry.get(id).unwrap();
        assert!(
            lang.patterns("person_names").is_some(),
            "'{}' lacks person_names",
            id
        );
    }
}

#[test]
fn bundled_optional_sections_survive_validation() {
    let mut registry = LanguageRegistry::new();
    let elvish = registry
        .load_file(Path::new("languages/elvish.json"))
        .unwrap();
    assert_eq!(elvish.name(), "Elvish");
    assert!(elvish.phonotactics().unwrap().is_active());
    assert_eq!(elvish.ui().unwrap().difficulty.as_deref(), Some("beginner"));
    assert_eq!(
        elvish.categories().collect::<Vec<_>>(),
        vec!["person_names", "place_names"]
    );
}

#[test]
fn one_bad_pattern_of_five_degrades_gracefully() {
    let mut registry = LanguageRegistry::new();
    let lang = registry
        .load_file(Path::new("tests/fixtures/degraded.json"))
        .unwrap();

    let templates: Vec<&str> = lang
        .patterns("person_names")
        .unwrap()
        .iter()
        .map(|p| p.template.as_str())
        .collect();
    assert_eq!(templates, vec!["A.B", "A.C", "A.B.C", "B.C"]);

    let warnings = registry.warnings("degraded");
    assert!(warnings.iter().any(|w| matches!(
        w,
        ValidationError::UnknownGroup { group, .. } if group == "Q"
    )));
    assert!(warnings.iter().any(|w| matches!(
        w,
        ValidationError::SparseGroup { group, count: 2, .. } if group == "C"
    )));
}

#[test]
fn language_without_any_usable_pattern_is_rejected() {
    let mut registry = LanguageRegistry::new();
    let err = registry
        .load_file(Path::new("tests/fixtures/unusable.json"))
        .unwrap_err();
    match err {
        RegistryError::Invalid { errors, .. } => {
            assert!(errors.contains(&ValidationError::NoUsablePatterns));
            let dropped = errors
                .iter()
                .filter(|e| e.severity() == Severity::PatternDropped)
                .count();
            assert_eq!(dropped, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(registry.is_empty());
}

#[test]
fn ron_fixture_drops_zero_weight_pattern() {
    let mut registry = LanguageRegistry::new();
    let lang = registry
        .load_file(Path::new("tests/fixtures/scenario.ron"))
        .unwrap();
    let usable = lang.patterns("person_names").unwrap();
    assert_eq!(usable.len(), 1);
    assert_eq!(usable[0].template, "A.B");
}

#[test]
fn loading_same_directory_twice_reports_duplicate() {
    let mut registry = LanguageRegistry::new();
    registry.load_dir(Path::new("languages")).unwrap();
    assert!(matches!(
        registry.load_file(Path::new("languages/elvish.json")),
        Err(RegistryError::DuplicateId(id)) if id == "elvish"
    ));
}

#[test]
fn json_and_file_paths_agree() {
    let text = std::fs::read_to_string("languages/dwarvish.json").unwrap();
    let from_str = LanguageDefinition::from_json_str(&text).unwrap().language;

    let mut registry = LanguageRegistry::new();
    let from_file = registry
        .load_file(Path::new("languages/dwarvish.json"))
        .unwrap();
    assert_eq!(&from_str, from_file.as_ref());
}
