/// Name assembly: one syllable per resolved group, joined and checked.
use crate::core::generator::GeneratorOptions;
use crate::core::pattern::ResolvedGroup;
use crate::core::rng::SeededRng;
use crate::core::weighted::SelectError;
use crate::schema::language::{Phonotactics, JOINER_MARKER};

/// Output of a single assembly, including how it went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    pub name: String,
    /// Number of full passes over the groups, at least 1.
    pub attempts: u32,
    /// True when every attempt still contained a forbidden substring.
    pub constraint_violation: bool,
}

/// Draw one syllable per group, left to right, and join them.
///
/// A syllable starting with the joiner marker is attached with a literal
/// hyphen; everything else is concatenated as-is. Consumes exactly one
/// draw per group.
pub fn join_fragments(groups: &[ResolvedGroup<'_>], rng: &mut SeededRng) -> Result<String, SelectError> {
    let mut name = String::new();
    for group in groups {
        let syllable = rng.choice(group.syllables)?;
        match syllable.strip_prefix(JOINER_MARKER) {
            Some(rest) => {
                if !name.is_empty() {
                    name.push(JOINER_MARKER);
                }
                name.push_str(rest);
            }
            None => name.push_str(syllable),
        }
    }
    Ok(name)
}

/// Assemble a name, retrying while it hits a forbidden substring.
///
/// Retries are bounded by `options.max_attempts`. When they run out the
/// last attempt is returned flagged rather than failing.
pub fn assemble(
    groups: &[ResolvedGroup<'_>],
    phonotactics: Option<&Phonotactics>,
    options: &GeneratorOptions,
    rng: &mut SeededRng,
) -> Result<Assembled, SelectError> {
    let max_attempts = options.max_attempts.max(1);
    let checks = phonotactics.filter(|p| p.is_active());

    let mut attempts = 0;
    let (raw, constraint_violation) = loop {
        attempts += 1;
        let raw = join_fragments(groups, rng)?;
        let Some(ph) = checks else {
            break (raw, false);
        };
        match ph.first_violation(&raw) {
            None => break (raw, false),
            Some(hit) if attempts >= max_attempts => {
                log::debug!("'{}' still contains '{}' after {} attempts", raw, hit, attempts);
                break (raw, true);
            }
            Some(hit) => log::trace!("rejected '{}' (contains '{}')", raw, hit),
        }
    };

    let name = if options.capitalize {
        capitalize_first(&raw)
    } else {
        raw
    };

    Ok(Assembled {
        name,
        attempts,
        constraint_violation,
    })
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
