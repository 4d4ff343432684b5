/// Pattern resolution: template string to ordered syllable groups.
use thiserror::Error;

use crate::schema::language::{GroupMap, Pattern};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("pattern '{pattern}' references unknown group '{group}'")]
    UnknownGroup { pattern: String, group: String },
    #[error("pattern '{0}' contains an empty group token")]
    EmptyToken(String),
}

/// One position of a resolved pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedGroup<'a> {
    pub group: &'a str,
    pub syllables: &'a [String],
}

/// Map each token of `pattern` to its group, left to right.
///
/// Validated languages never fail here; the checks exist for callers that
/// hand in raw data directly.
pub fn resolve<'a>(
    pattern: &Pattern,
    syllables: &'a GroupMap,
) -> Result<Vec<ResolvedGroup<'a>>, ResolveError> {
    pattern
        .tokens()
        .map(|token| {
            if token.is_empty() {
                return Err(ResolveError::EmptyToken(pattern.template.clone()));
            }
            syllables
                .get_key_value(token)
                .map(|(group, syllables)| ResolvedGroup {
                    group: group.as_str(),
                    syllables: syllables.as_slice(),
                })
                .ok_or_else(|| ResolveError::UnknownGroup {
                    pattern: pattern.template.clone(),
                    group: token.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> GroupMap {
        GroupMap::from([
            ("A".to_string(), vec!["kar".to_string(), "mor".to_string()]),
            ("B".to_string(), vec!["an".to_string(), "eth".to_string()]),
        ])
    }

    #[test]
    fn resolves_in_template_order() {
        let g = groups();
        let resolved = resolve(&Pattern::new("B.A.B", 1.0), &g).unwrap();
        let names: Vec<&str> = resolved.iter().map(|r| r.group).collect();
        assert_eq!(names, vec!["B", "A", "B"]);
        assert_eq!(resolved[1].syllables, g["A"].as_slice());
    }

    #[test]
    fn single_group_pattern() {
        let g = groups();
        let resolved = resolve(&Pattern::new("A", 1.0), &g).unwrap();
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn unknown_group_is_reported() {
        let err = resolve(&Pattern::new("A.Z", 1.0), &groups()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownGroup {
                pattern: "A.Z".to_string(),
                group: "Z".to_string(),
            }
        );
    }

    #[test]
    fn group_lookup_is_case_sensitive() {
        assert!(resolve(&Pattern::new("a.B", 1.0), &groups()).is_err());
    }

    #[test]
    fn empty_tokens_are_rejected() {
        for template in ["", "A..B", "A.", ".B"] {
            assert!(
                matches!(
                    resolve(&Pattern::new(template, 1.0), &groups()),
                    Err(ResolveError::EmptyToken(_))
                ),
                "template {:?} should fail",
                template
            );
        }
    }
}
