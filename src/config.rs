//! Strategy configuration.
//!
//! Strategy selection, search budgets, iteration counts and RNG seeding
//! are external inputs, never hard-coded, so callers can tune the
//! opponent and tests can substitute deterministic seeded variants.

use crate::strategy::StrategyKind;
use derive_getters::Getters;
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Configuration for the computer opponent's decision policy.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Decision policy to use.
    #[serde(default = "default_kind")]
    kind: StrategyKind,

    /// Wall-clock budget for the exhaustive search, in milliseconds.
    #[serde(default = "default_search_budget_ms")]
    search_budget_ms: u64,

    /// Number of Monte Carlo iterations per decision.
    #[serde(default = "default_simulations")]
    simulations: u32,

    /// RNG seed; omit for entropy-seeded play.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_kind() -> StrategyKind {
    StrategyKind::MonteCarlo
}

fn default_search_budget_ms() -> u64 {
    5_000
}

fn default_simulations() -> u32 {
    1_000
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            search_budget_ms: default_search_budget_ms(),
            simulations: default_simulations(),
            seed: None,
        }
    }
}

impl StrategyConfig {
    /// Creates a configuration for the given policy with default budgets.
    pub fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Sets the RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the exhaustive-search wall-clock budget.
    pub fn with_search_budget_ms(mut self, budget_ms: u64) -> Self {
        self.search_budget_ms = budget_ms;
        self
    }

    /// Sets the Monte Carlo iteration count.
    pub fn with_simulations(mut self, simulations: u32) -> Self {
        self.simulations = simulations;
        self
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("loading strategy config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Builds the generator a decision draws its randomness from.
    pub(crate) fn rng(&self) -> Pcg64 {
        match self.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = StrategyConfig::default();
        assert_eq!(*config.kind(), StrategyKind::MonteCarlo);
        assert_eq!(*config.search_budget_ms(), 5_000);
        assert_eq!(*config.simulations(), 1_000);
        assert_eq!(*config.seed(), None);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: StrategyConfig = toml::from_str("kind = \"exhaustive\"").unwrap();
        assert_eq!(*config.kind(), StrategyKind::Exhaustive);
        assert_eq!(*config.search_budget_ms(), 5_000);
    }

    #[test]
    fn test_kind_parses_from_name() {
        assert_eq!("monte-carlo".parse(), Ok(StrategyKind::MonteCarlo));
        assert_eq!("first-empty".parse(), Ok(StrategyKind::FirstEmpty));
        assert!("clever".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::RngCore;
        let config = StrategyConfig::default().with_seed(11);
        let a = config.rng().next_u64();
        let b = config.rng().next_u64();
        assert_eq!(a, b);
    }
}
