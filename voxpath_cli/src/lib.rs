// voxpath_cli — run path requests from a JSON scene file.
//
// A scene bundles everything one run needs: a `PathConfig`, the terrain
// (individual solid voxels plus axis-aligned boxes that fill or carve), and
// a list of `PathRequest`s. The binary (`main.rs`) loads a scene, builds a
// `SparseVoxelWorld`, answers every request in parallel, and prints the
// responses as JSON.
//
// Module overview:
// - `scene.rs`: Scene file format, loading, world construction, and
//               execution against a `Navigator`.
//
// Dependencies: `voxpath_nav` for everything pathfinding. This crate only
// adds file handling and the command line.

pub mod scene;

pub use scene::{Scene, SceneOverrides};
