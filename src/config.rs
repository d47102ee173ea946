//! Engine configuration
//!
//! [`EngineConfig`] holds everything the engine needs besides the position:
//! the per-move time budget, the depth cap, the transposition table size,
//! an optional seed for the fallback move and the promotion-choice policy.
//! It deserializes from JSON with every field optional.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::search::{ChoicePolicy, SearchOptions, MAX_DEPTH};

/// Default time budget per move in milliseconds
pub const DEFAULT_TIME_BUDGET_MS: u64 = 1000;

/// Default transposition table size in megabytes
pub const DEFAULT_TT_SIZE_MB: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub time_budget_ms: u64,
    /// Clamped to `1..=MAX_DEPTH` when the search runs
    pub max_depth: i8,
    pub tt_size_mb: usize,
    /// Seed for the fallback move; `None` draws from the OS
    pub seed: Option<u64>,
    pub choice_policy: ChoicePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            max_depth: MAX_DEPTH,
            tt_size_mb: DEFAULT_TT_SIZE_MB,
            seed: None,
            choice_policy: ChoicePolicy::ImmediateGain,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: i8) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn with_tt_size_mb(mut self, mb: usize) -> Self {
        self.tt_size_mb = mb;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_choice_policy(mut self, policy: ChoicePolicy) -> Self {
        self.choice_policy = policy;
        self
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// Search options derived from this configuration
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            max_depth: self.max_depth.clamp(1, MAX_DEPTH),
            tt_size_mb: self.tt_size_mb,
            use_tt: true,
            choice_policy: self.choice_policy,
        }
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_json(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
