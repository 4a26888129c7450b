// Request/response facade over search and smoothing.
//
// A `Navigator` owns a validated `PathConfig` and turns `PathRequest`s into
// `PathResponse`s: run the search, optionally smooth the raw path, and
// optionally attach the explored set for visualization. Request fields left
// as `None` fall back to the config.
//
// Every call is synchronous and owns all of its search state; the only
// thing shared between calls is the read-only `VoxelField`. That makes
// `compute_paths()` a straight rayon `par_iter` over independent requests.
//
// Failure is not an error here. Unreachable goals and exhausted budgets
// both return `success: false` with an empty path. `iterations` is always
// reported, so a caller can tell budget exhaustion apart by comparing it to
// the budget it asked for.
//
// See also: `pathfinding.rs`, `smoothing.rs`, `config.rs`.

use crate::config::PathConfig;
use crate::error::NavResult;
use crate::field::VoxelField;
use crate::pathfinding::{EarlyExit, PathNode, find_path};
use crate::smoothing::smooth_path;
use crate::types::{SearchMode, VoxelCoord};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One path query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathRequest {
    pub start: VoxelCoord,
    pub goal: VoxelCoord,
    #[serde(default)]
    pub mode: Option<SearchMode>,
    #[serde(default)]
    pub smooth: Option<bool>,
    #[serde(default)]
    pub early_exit: Option<EarlyExit>,
    /// Attach the explored set and iteration count to the response.
    #[serde(default)]
    pub keep_intermediates: bool,
}

impl PathRequest {
    /// A request that takes every option from the navigator's config.
    pub fn new(start: VoxelCoord, goal: VoxelCoord) -> Self {
        Self {
            start,
            goal,
            mode: None,
            smooth: None,
            early_exit: None,
            keep_intermediates: false,
        }
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = Some(smooth);
        self
    }

    pub fn with_budget(mut self, search_iterations: u32) -> Self {
        self.early_exit = Some(EarlyExit { search_iterations });
        self
    }

    pub fn keep_intermediates(mut self) -> Self {
        self.keep_intermediates = true;
        self
    }
}

/// Search internals returned for diagnostics when requested.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intermediates {
    /// Closed set, sorted by position.
    pub explored: Vec<PathNode>,
    pub iterations: u32,
}

/// Result of one path query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathResponse {
    pub success: bool,
    /// Waypoints from start to goal inclusive; empty on failure.
    pub path: Vec<PathNode>,
    /// Number of nodes the search dequeued.
    pub iterations: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediates: Option<Intermediates>,
}

/// Validated entry point for path queries.
#[derive(Clone, Debug)]
pub struct Navigator {
    config: PathConfig,
}

impl Navigator {
    pub fn new(config: PathConfig) -> NavResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Search, then smooth if requested.
    pub fn compute_path<F: VoxelField + ?Sized>(
        &self,
        field: &F,
        request: &PathRequest,
    ) -> PathResponse {
        let height = self.config.agent_height;
        let mode = request.mode.unwrap_or(self.config.default_mode);
        let smooth = request.smooth.unwrap_or(self.config.smooth);
        let early_exit = request.early_exit.or_else(|| {
            self.config
                .search_iterations
                .map(|search_iterations| EarlyExit { search_iterations })
        });

        let result = find_path(field, height, request.start, request.goal, mode, early_exit);

        let path = if result.success && smooth {
            smooth_path(field, height, &result.path)
        } else {
            result.path
        };

        let intermediates = request.keep_intermediates.then(|| {
            let mut explored: Vec<PathNode> = result.explored.into_values().collect();
            explored.sort_by_key(|n| n.position);
            Intermediates {
                explored,
                iterations: result.iterations,
            }
        });

        PathResponse {
            success: result.success,
            path,
            iterations: result.iterations,
            intermediates,
        }
    }

    /// Run independent queries in parallel against one shared field.
    /// Responses come back in request order.
    pub fn compute_paths<F: VoxelField + Sync + ?Sized>(
        &self,
        field: &F,
        requests: &[PathRequest],
    ) -> Vec<PathResponse> {
        debug!("computing {} paths in parallel", requests.len());
        requests
            .par_iter()
            .map(|request| self.compute_path(field, request))
            .collect()
    }
}
