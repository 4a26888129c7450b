// Data-driven pathfinding configuration.
//
// `PathConfig` holds the parameters shared by every search a `Navigator`
// runs: the agent's height and the defaults a request falls back on when it
// leaves a field unset. It loads from JSON; any field missing from the JSON
// takes its default, so `{}` is a valid config.
//
// See also: `navigator.rs` which validates and owns a `PathConfig`.

use crate::error::{NavError, NavResult};
use crate::types::SearchMode;
use serde::{Deserialize, Serialize};

/// Tunable parameters for path computation. Loaded once, never mutated by
/// a search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Height of the agent in voxels. Every voxel of the column
    /// `[y, y + agent_height)` must be clear for the agent to occupy it.
    pub agent_height: i32,

    /// Mode used when a request does not name one.
    pub default_mode: SearchMode,

    /// Whether to smooth paths when a request does not say.
    pub smooth: bool,

    /// Default dequeue budget. `None` searches until the frontier empties.
    pub search_iterations: Option<u32>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            agent_height: 2,
            default_mode: SearchMode::Shortest,
            smooth: true,
            search_iterations: None,
        }
    }
}

impl PathConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> NavResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> NavResult<()> {
        if self.agent_height < 1 {
            return Err(NavError::InvalidAgentHeight(self.agent_height));
        }
        Ok(())
    }
}
