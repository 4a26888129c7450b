// Movement model: which single-step moves an agent can make.
//
// An agent is a column `height` voxels tall standing on the voxel below
// its position. From any position it may move one voxel along X or Z
// (never both in one step), optionally stepping up or down one voxel at
// the same time. That gives 12 candidate moves. A move is legal iff the
// destination column is clear for the agent's full height and there is
// solid footing directly beneath it. There are no partial moves.
//
// There is no diagonal horizontal movement; path smoothing
// (`smoothing.rs`) is what turns staircase paths into straight diagonals.
//
// See also: `pathfinding.rs` which expands nodes with `actions()`,
// `field.rs` for the `VoxelField` trait.

use crate::field::VoxelField;
use crate::types::{Action, VoxelCoord};
use smallvec::SmallVec;

/// Cost of every action. Climbing and dropping cost the same as walking.
pub const ACTION_COST: f64 = 1.0;

/// The 12 legal single-step moves, in expansion order: for each of +X, -X,
/// +Z, -Z, the vertical components 0, +1, -1.
pub const ACTIONS: [Action; 12] = [
    Action::new(1, 0, 0, ACTION_COST),
    Action::new(1, 1, 0, ACTION_COST),
    Action::new(1, -1, 0, ACTION_COST),
    Action::new(-1, 0, 0, ACTION_COST),
    Action::new(-1, 1, 0, ACTION_COST),
    Action::new(-1, -1, 0, ACTION_COST),
    Action::new(0, 0, 1, ACTION_COST),
    Action::new(0, 1, 1, ACTION_COST),
    Action::new(0, -1, 1, ACTION_COST),
    Action::new(0, 0, -1, ACTION_COST),
    Action::new(0, 1, -1, ACTION_COST),
    Action::new(0, -1, -1, ACTION_COST),
];

/// Legal moves out of one position, with the resulting position.
pub type Moves = SmallVec<[(Action, VoxelCoord); 12]>;

/// `true` if the agent's column `[pos.y, pos.y + height)` is entirely
/// non-solid.
pub fn can_go_through<F: VoxelField + ?Sized>(field: &F, height: i32, pos: VoxelCoord) -> bool {
    (0..height).all(|dy| !field.is_solid(pos.offset(0, dy, 0)))
}

/// `true` if the agent can stand at `pos`: clear column plus solid footing
/// at `pos.y - 1`.
pub fn can_step_at<F: VoxelField + ?Sized>(field: &F, height: i32, pos: VoxelCoord) -> bool {
    can_go_through(field, height, pos) && field.is_solid(pos.offset(0, -1, 0))
}

/// Enumerate the legal moves out of `pos`.
pub fn actions<F: VoxelField + ?Sized>(field: &F, height: i32, pos: VoxelCoord) -> Moves {
    ACTIONS
        .iter()
        .map(|action| (*action, pos + action.delta))
        .filter(|(_, dest)| can_step_at(field, height, *dest))
        .collect()
}
