pub mod assemble;
pub mod generator;
pub mod pattern;
pub mod registry;
pub mod rng;
pub mod validate;
pub mod weighted;
