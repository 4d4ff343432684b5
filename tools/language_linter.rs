/// Language Linter: validates language files and reports data-quality issues.
///
/// Usage: language_linter <file_or_dir> [--min-syllables <n>]
use name_forge::core::registry::read_raw;
use name_forge::core::validate::{validate_with, Severity, ValidationOptions};
use name_forge::LanguageDefinition;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use std::process;

/// Patterns below this share of their category's total weight are flagged.
const NEGLIGIBLE_SHARE: f64 = 0.001;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: language_linter <file_or_dir> [--min-syllables <n>]");
        process::exit(0);
    }

    let target = Path::new(&args[1]);
    let mut options = ValidationOptions::default();

    let mut i = 2;
    while i < args.len() {
        if args[i] == "--min-syllables" && i + 1 < args.len() {
            i += 1;
            match args[i].parse() {
                Ok(n) => options.min_recommended_syllables = n,
                Err(_) => {
                    eprintln!("ERROR: --min-syllables expects a number, got '{}'", args[i]);
                    process::exit(1);
                }
            }
        }
        i += 1;
    }

    let files = if target.is_file() {
        vec![target.to_path_buf()]
    } else if target.is_dir() {
        collect_language_files(target)
    } else {
        eprintln!("ERROR: Path '{}' does not exist", target.display());
        process::exit(1);
    };

    println!("Linting {} language file(s)", files.len());

    let mut total_errors = 0;
    let mut total_warnings = 0;

    for path in &files {
        let (errors, warnings) = lint_file(path, &options);
        println!("\n=== {} ===", path.display());
        if errors.is_empty() && warnings.is_empty() {
            println!("All checks passed!");
        }
        for warning in &warnings {
            println!("WARNING: {}", warning);
        }
        for error in &errors {
            println!("ERROR: {}", error);
        }
        total_errors += errors.len();
        total_warnings += warnings.len();
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        total_errors, total_warnings
    );

    if total_errors == 0 {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn collect_language_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_language_files(&path));
            } else if matches!(
                path.extension().and_then(|s| s.to_str()),
                Some("json") | Some("ron")
            ) {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

fn lint_file(path: &Path, options: &ValidationOptions) -> (Vec<String>, Vec<String>) {
    let raw = match read_raw(path) {
        Ok(raw) => raw,
        Err(e) => return (vec![format!("failed to read: {}", e)], Vec::new()),
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let language = match validate_with(&raw, options) {
        Ok(validated) => {
            for issue in &validated.warnings {
                warnings.push(issue.to_string());
            }
            Some(validated.language)
        }
        Err(issues) => {
            for issue in &issues {
                match issue.severity() {
                    Severity::Fatal => errors.push(issue.to_string()),
                    Severity::PatternDropped | Severity::Warning => warnings.push(issue.to_string()),
                }
            }
            None
        }
    };

    if let Some(language) = language {
        warnings.extend(lint_language(&language));
    }

    (errors, warnings)
}

/// Checks that only make sense on a language that already validated.
fn lint_language(language: &LanguageDefinition) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut referenced = FxHashSet::default();

    for category in language.categories() {
        let Some(patterns) = language.patterns(category) else {
            continue;
        };
        let total: f64 = patterns.iter().map(|p| p.weight).sum();
        for pattern in patterns {
            referenced.extend(pattern.tokens());
            let share = pattern.weight / total;
            if share < NEGLIGIBLE_SHARE {
                warnings.push(format!(
                    "Pattern '{}' in '{}' has {:.4}% of the category weight and will almost never be drawn",
                    pattern.template,
                    category,
                    share * 100.0
                ));
            }
        }
    }

    for group in language.syllables().keys() {
        if !referenced.contains(group.as_str()) {
            warnings.push(format!(
                "Syllable group '{}' is not referenced by any pattern",
                group
            ));
        }
    }

    warnings
}
