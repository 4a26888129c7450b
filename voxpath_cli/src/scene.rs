// Scene files: terrain plus a batch of path requests.
//
// Format (JSON, every top-level field optional):
//
//   {
//     "config":   { "agent_height": 2, "default_mode": "shortest", ... },
//     "solids":   [ { "x": 0, "y": 0, "z": 0 }, ... ],
//     "boxes":    [ { "min": {...}, "max": {...}, "solid": true }, ... ],
//     "requests": [ { "start": {...}, "goal": {...}, "mode": "greedy" }, ... ]
//   }
//
// The world is built by setting every voxel in `solids`, then applying
// `boxes` in order. A box with `"solid": false` carves air out of whatever
// came before it, so pits and tunnels can be cut out of a filled slab.
//
// Command-line overrides replace the config defaults, not per-request
// settings: a request that names its own mode keeps it.

use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use voxpath_nav::{
    NavResult, Navigator, PathConfig, PathRequest, PathResponse, SearchMode, SparseVoxelWorld,
    VoxelCoord,
};

fn default_true() -> bool {
    true
}

/// Inclusive axis-aligned box of voxels to fill or clear.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxFill {
    pub min: VoxelCoord,
    pub max: VoxelCoord,
    #[serde(default = "default_true")]
    pub solid: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub config: PathConfig,
    pub solids: Vec<VoxelCoord>,
    pub boxes: Vec<BoxFill>,
    pub requests: Vec<PathRequest>,
}

/// Config defaults supplied on the command line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneOverrides {
    pub mode: Option<SearchMode>,
    pub smooth: Option<bool>,
    pub search_iterations: Option<u32>,
}

impl SceneOverrides {
    fn apply(&self, config: &mut PathConfig) {
        if let Some(mode) = self.mode {
            config.default_mode = mode;
        }
        if let Some(smooth) = self.smooth {
            config.smooth = smooth;
        }
        if let Some(budget) = self.search_iterations {
            config.search_iterations = Some(budget);
        }
    }
}

impl Scene {
    /// Parse a scene and validate its config.
    pub fn from_json(json: &str) -> NavResult<Self> {
        let scene: Self = serde_json::from_str(json)?;
        scene.config.validate()?;
        Ok(scene)
    }

    pub fn load(path: impl AsRef<Path>) -> NavResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn build_world(&self) -> SparseVoxelWorld {
        let mut world: SparseVoxelWorld = self.solids.iter().copied().collect();
        for b in &self.boxes {
            world.fill_box(b.min, b.max, b.solid);
        }
        world
    }

    /// Answer every request, in order.
    pub fn run(&self, overrides: &SceneOverrides) -> NavResult<Vec<PathResponse>> {
        let mut config = self.config.clone();
        overrides.apply(&mut config);
        let navigator = Navigator::new(config)?;

        let world = self.build_world();
        info!(
            "scene: {} solid voxels in {} chunks, {} requests",
            world.solid_count(),
            world.chunk_count(),
            self.requests.len()
        );

        let responses = navigator.compute_paths(&world, &self.requests);
        let succeeded = responses.iter().filter(|r| r.success).count();
        info!("{succeeded}/{} requests found a path", responses.len());
        Ok(responses)
    }
}
