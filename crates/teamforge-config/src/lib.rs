//! Configuration system for TeamForge.
//!
//! Load formation configuration from TOML or YAML files to control team
//! size, shuffling, parallel evaluation, and balancing without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use teamforge_config::FormationConfig;
//! use std::time::Duration;
//!
//! let config = FormationConfig::from_toml_str(r#"
//!     team_size = 6
//!     random_seed = 7
//!
//!     [parallel]
//!     threshold = 200
//!     chunk_timeout_ms = 500
//!
//!     [balance]
//!     max_iterations = 20
//! "#).unwrap();
//!
//! assert_eq!(config.team_size, 6);
//! assert_eq!(config.parallel.chunk_timeout(), Duration::from_millis(500));
//! assert_eq!(config.balance.max_iterations, 20);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use teamforge_config::FormationConfig;
//!
//! let config = FormationConfig::load("teamforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main formation configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FormationConfig {
    /// Desired members per team. Range-checked when a formation is built.
    pub team_size: usize,

    /// Random seed for reproducible shuffles.
    pub random_seed: Option<u64>,

    /// Parallel candidate evaluation.
    pub parallel: ParallelConfig,

    /// Skill balancing after assembly.
    pub balance: BalanceConfig,

    /// Chunked CSV ingestion.
    pub ingest: IngestConfig,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            team_size: 5,
            random_seed: None,
            parallel: ParallelConfig::default(),
            balance: BalanceConfig::default(),
            ingest: IngestConfig::default(),
        }
    }
}

impl FormationConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the team size.
    pub fn with_team_size(mut self, size: usize) -> Self {
        self.team_size = size;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Replaces the parallel evaluation settings.
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Replaces the balancing settings.
    pub fn with_balance(mut self, balance: BalanceConfig) -> Self {
        self.balance = balance;
        self
    }

    /// Checks values that serde cannot reject on its own.
    ///
    /// The team size is not checked here; the formation run owns that rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallel.min_chunk_size == 0 {
            return Err(ConfigError::Invalid(
                "parallel.min_chunk_size must be at least 1".to_string(),
            ));
        }
        if self.parallel.thread_count == ThreadCount::Count(0) {
            return Err(ConfigError::Invalid(
                "parallel.thread_count must be at least 1".to_string(),
            ));
        }
        if self.ingest.thread_count == 0 {
            return Err(ConfigError::Invalid(
                "ingest.thread_count must be at least 1".to_string(),
            ));
        }
        let gap = self.balance.skill_gap_threshold;
        if !gap.is_finite() || gap < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "balance.skill_gap_threshold must be a non-negative number, got {gap}"
            )));
        }
        Ok(())
    }
}

/// Worker thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Use the available parallelism of the machine.
    #[default]
    Auto,

    /// Specific number of threads.
    Count(usize),
}

impl ThreadCount {
    /// Resolves to a concrete, non-zero thread count.
    pub fn resolve(self) -> usize {
        match self {
            ThreadCount::Auto => std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            ThreadCount::Count(n) => n.max(1),
        }
    }
}

/// Parallel candidate evaluation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ParallelConfig {
    /// Whether a worker pool is created for formation runs.
    pub enabled: bool,

    /// Worker pool size.
    pub thread_count: ThreadCount,

    /// Parallel scoring is used only when a selection step has more
    /// candidates than this.
    pub threshold: usize,

    /// Minimum candidates per worker chunk.
    pub min_chunk_size: usize,

    /// Per-chunk wait before falling back to sequential scoring.
    pub chunk_timeout_ms: u64,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            thread_count: ThreadCount::Auto,
            threshold: 150,
            min_chunk_size: 25,
            chunk_timeout_ms: 2000,
        }
    }
}

impl ParallelConfig {
    /// Returns the per-chunk timeout as a Duration.
    pub fn chunk_timeout(&self) -> Duration {
        Duration::from_millis(self.chunk_timeout_ms)
    }
}

/// Skill balancing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BalanceConfig {
    /// Upper bound on balancing iterations.
    pub max_iterations: usize,

    /// Balancing stops once the strongest and weakest averages differ by
    /// less than this.
    pub skill_gap_threshold: f64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            skill_gap_threshold: 1.2,
        }
    }
}

/// CSV ingestion configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct IngestConfig {
    /// Number of parsing workers.
    pub thread_count: usize,

    /// Whether the first line of an input file is a header.
    pub skip_header: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            thread_count: 4,
            skip_header: true,
        }
    }
}

#[cfg(test)]
mod tests;
