//! Name Forge: pronounceable fictional names from weighted syllable patterns.
//!
//! A language definition supplies syllable groups and, per category, a set
//! of weighted patterns such as `"A.B.C"`. Generation is a pure function
//! of the language, the category and a seed string: the same inputs always
//! yield the same names, in the same order.

pub mod core;
pub mod schema;

pub use crate::core::generator::{generate, GenerateError, NameGenerator, NameSession};
pub use crate::core::registry::{LanguageRegistry, RegistryError};
pub use crate::core::rng::SeededRng;
pub use crate::core::validate::{validate, ValidatedLanguage, ValidationError};
pub use crate::schema::generated::GeneratedName;
pub use crate::schema::language::{LanguageDefinition, Pattern};
