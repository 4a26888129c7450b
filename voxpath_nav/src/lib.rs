// voxpath_nav — pathfinding for column-shaped agents in a voxel world.
//
// This crate answers "how does an agent of height H get from A to B" over
// any terrain that can report whether a voxel is solid. It has no notion of
// rendering, ticks, or entities; callers hand in a `VoxelField` and get back
// a list of waypoints.
//
// Module overview:
// - `types.rs`:       VoxelCoord, Action, SearchMode.
// - `field.rs`:       VoxelField trait + SparseVoxelWorld (chunked, unbounded).
// - `movement.rs`:    The 12 single-step moves, clearance and footing checks.
// - `queue.rs`:       Array-backed binary min-heap with removal by predicate.
// - `pathfinding.rs`: A* / greedy search with iteration budget and stepping.
// - `smoothing.rs`:   Precomputed sweep tables, direct-path test, path smoothing.
// - `navigator.rs`:   PathRequest / PathResponse facade, parallel batches.
// - `config.rs`:      PathConfig: agent height and request defaults.
// - `error.rs`:       NavError for config and scene loading.
// - `sweep`:          Re-exported from `voxpath_sweep`, fixed-point swept-box traversal.
//
// Searches are deterministic: the same field and request always produce the
// same path and the same iteration count. Nothing in the crate reads the
// clock or draws randomness, and hash maps are unseeded.

pub mod config;
pub mod error;
pub mod field;
pub mod movement;
pub mod navigator;
pub mod pathfinding;
pub mod queue;
pub mod smoothing;
pub use voxpath_sweep as sweep;
pub mod types;

pub use config::PathConfig;
pub use error::{NavError, NavResult};
pub use field::{SparseVoxelWorld, VoxelField};
pub use navigator::{Intermediates, Navigator, PathRequest, PathResponse};
pub use pathfinding::{EarlyExit, PathNode, SearchResult, find_path};
pub use smoothing::{has_direct_path, smooth_path};
pub use types::{Action, SearchMode, VoxelCoord};
