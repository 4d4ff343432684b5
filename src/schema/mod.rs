pub mod generated;
pub mod language;
