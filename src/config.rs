use anyhow::{anyhow, Context, Result};

use crate::matcher::DEFAULT_MIN_SIMILARITY;

/// Environment variable overriding the match threshold.
pub const MIN_SIMILARITY_ENV: &str = "NUTRITION_MIN_SIMILARITY";

/// Matching policy shared by every lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPolicy {
    /// Lowest similarity ratio accepted as a match
    pub min_similarity: f64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }
}

impl MatchPolicy {
    pub fn new(min_similarity: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&min_similarity) {
            return Err(anyhow!(
                "min_similarity must be between 0 and 1, got {}",
                min_similarity
            ));
        }
        Ok(Self { min_similarity })
    }

    /// Policy from the environment, falling back to the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_var(std::env::var(MIN_SIMILARITY_ENV).ok().as_deref())
    }

    fn from_var(value: Option<&str>) -> Result<Self> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(Self::default()),
            Some(raw) => {
                let min_similarity: f64 = raw
                    .parse()
                    .with_context(|| format!("Invalid {}: {:?}", MIN_SIMILARITY_ENV, raw))?;
                Self::new(min_similarity)
            }
        }
    }
}
