/// Seeded randomness: the single source of every draw the engine makes.
///
/// All derived operations go through `next_f64`, so one seed string maps to
/// one fixed sequence of decisions regardless of platform.
use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::weighted::SelectError;

/// Length of the seed string minted for unseeded handles.
const GENERATED_SEED_LEN: usize = 12;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// A deterministic RNG handle bound to a seed string.
///
/// Handles are never shared between sessions; each generation session
/// owns one and advances it monotonically.
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: String,
    inner: ChaCha8Rng,
    draws: u64,
}

impl SeededRng {
    /// Seed from `seed`, or mint a fresh seed from OS entropy when `None`.
    pub fn new(seed: Option<&str>) -> Self {
        match seed {
            Some(seed) => Self::from_seed_str(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn from_seed_str(seed: &str) -> Self {
        Self {
            seed: seed.to_string(),
            inner: ChaCha8Rng::seed_from_u64(fnv1a(seed.as_bytes())),
            draws: 0,
        }
    }

    /// Mint an alphanumeric seed so the caller can record it and replay later.
    pub fn from_entropy() -> Self {
        let seed: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(GENERATED_SEED_LEN)
            .map(char::from)
            .collect();
        Self::from_seed_str(&seed)
    }

    /// The effective seed string, whether supplied or minted.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of `next_f64` calls made so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Uniform float in `[0, 1)` built from the top 53 bits of one output word.
    pub fn next_f64(&mut self) -> f64 {
        self.draws += 1;
        (self.inner.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform integer in `[min, max]`; consumes exactly one draw.
    pub fn next_int(&mut self, min: i64, max: i64) -> Result<i64, SelectError> {
        if max < min {
            return Err(SelectError::EmptyInput);
        }
        let span = (max as i128 - min as i128 + 1) as f64;
        let offset = (self.next_f64() * span).floor() as i64;
        Ok(min + offset)
    }

    /// Uniform pick from a slice; consumes exactly one draw.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, SelectError> {
        if items.is_empty() {
            return Err(SelectError::EmptyInput);
        }
        let index = self.next_int(0, items.len() as i64 - 1)?;
        Ok(&items[index as usize])
    }
}

/// 64-bit FNV-1a; stable across platforms and releases.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME)
    })
}
