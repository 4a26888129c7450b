// Core types shared across the pathfinding engine.
//
// Defines spatial coordinates (`VoxelCoord`), the single-step movement
// `Action`, and the `SearchMode` selector. All types derive `Serialize`
// and `Deserialize` so requests and results can cross the CLI boundary as
// JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A position in the 3D voxel grid. Each component is in voxel units.
///
/// The coordinate system uses right-handed conventions:
/// - X: east  (positive) / west  (negative)
/// - Y: up    (positive) / down  (negative)
/// - Z: south (positive) / north (negative)
///
/// Also used for offsets between positions (action deltas, path segments).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The coordinate shifted by `(dx, dy, dz)`.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Euclidean distance between voxel centers.
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        let dz = f64::from(self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl Add for VoxelCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.offset(rhs.x, rhs.y, rhs.z)
    }
}

impl Sub for VoxelCoord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.offset(-rhs.x, -rhs.y, -rhs.z)
    }
}

impl fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

/// A single-step move: one horizontal unit on X or Z, combined with a
/// vertical component of -1, 0, or +1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub delta: VoxelCoord,
    /// Traversal cost. Uniform across all actions, including climbs and
    /// drops.
    pub cost: f64,
    /// Step up one voxel (`delta.y == 1`).
    pub jump: bool,
    /// Step down one voxel (`delta.y == -1`).
    pub drop: bool,
}

impl Action {
    pub const fn new(dx: i32, dy: i32, dz: i32, cost: f64) -> Self {
        Self {
            delta: VoxelCoord::new(dx, dy, dz),
            cost,
            jump: dy == 1,
            drop: dy == -1,
        }
    }
}

/// How the search orders its frontier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Priority is the heuristic alone. Explores fewer nodes, not optimal.
    Greedy,
    /// Priority is cost-so-far plus heuristic (A*).
    #[default]
    Shortest,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Greedy => f.write_str("greedy"),
            SearchMode::Shortest => f.write_str("shortest"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voxel_coord_distance() {
        let a = VoxelCoord::new(0, 0, 0);
        let b = VoxelCoord::new(3, 4, 0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn voxel_coord_arithmetic() {
        let a = VoxelCoord::new(1, 2, 3);
        let b = VoxelCoord::new(-1, 0, 4);
        assert_eq!(a + b, VoxelCoord::new(0, 2, 7));
        assert_eq!(a - b, VoxelCoord::new(2, 2, -1));
        assert_eq!(a.offset(0, -1, 0), VoxelCoord::new(1, 1, 3));
    }

    #[test]
    fn action_flags_follow_vertical_component() {
        let up = Action::new(1, 1, 0, 1.0);
        assert!(up.jump && !up.drop);
        let down = Action::new(0, -1, -1, 1.0);
        assert!(down.drop && !down.jump);
        let flat = Action::new(-1, 0, 0, 1.0);
        assert!(!flat.jump && !flat.drop);
    }

    #[test]
    fn search_mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SearchMode::Greedy).unwrap(),
            "\"greedy\""
        );
        let mode: SearchMode = serde_json::from_str("\"shortest\"").unwrap();
        assert_eq!(mode, SearchMode::Shortest);
        assert_eq!(SearchMode::default(), SearchMode::Shortest);
    }
}
