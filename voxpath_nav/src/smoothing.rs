// Path smoothing (string-pulling) for raw search paths.
//
// The movement model only allows axis-aligned steps, so raw paths are
// staircases. Smoothing replaces runs of steps with straight segments the
// agent can walk directly, keeping only the waypoints needed.
//
// A straight segment is validated against precomputed sweep tables: for
// every `(|dx|, |dz|)` with both components below `SWEEP_LIMIT`, the
// ordered list of grid cells a unit-wide box crosses on its way from
// `(0, 0, 0)` to `(dx, 0, dz)`. The tables come from `voxpath_sweep::sweep`
// with an always-true check and are built once, on first use, into an
// immutable `LazyLock`. They are indexed by `|dx| + |dz| * SWEEP_LIMIT`
// and mirrored per quadrant with the sign of the real delta.
//
// `has_direct_path()` walks a table cell by cell at a running height `y`.
// Each cell needs headroom at `y`; the agent then falls through open air
// (never below the target's height) and must land on solid footing.
// Segments with net ascent are rejected outright: climbing only happens
// through explicit jump actions in the raw path.
//
// `smooth_path()` keeps the start, drops every intermediate waypoint that
// the last kept waypoint can reach directly, never bridges a jump, and
// always keeps the goal.
//
// See also: `pathfinding.rs` for the raw paths, `movement.rs` for the
// clearance/footing checks reused here.

use crate::field::VoxelField;
use crate::movement::{can_go_through, can_step_at};
use crate::pathfinding::PathNode;
use crate::types::VoxelCoord;
use log::debug;
use std::sync::LazyLock;
use voxpath_sweep::{Aabb, sweep};

/// Exclusive bound on `|dx|` and `|dz|` for segments that can be smoothed.
pub const SWEEP_LIMIT: i32 = 16;

static SWEEP_TABLES: LazyLock<Vec<Vec<(i32, i32)>>> = LazyLock::new(build_sweep_tables);

fn build_sweep_tables() -> Vec<Vec<(i32, i32)>> {
    let mut tables = Vec::with_capacity((SWEEP_LIMIT * SWEEP_LIMIT) as usize);
    for dz in 0..SWEEP_LIMIT {
        for dx in 0..SWEEP_LIMIT {
            let mut cells = Vec::new();
            let mut aabb = Aabb::unit_cell([0, 0, 0]);
            sweep(
                &mut aabb,
                [f64::from(dx), 0.0, f64::from(dz)],
                |cell| {
                    cells.push((cell[0], cell[2]));
                    true
                },
                false,
            );
            tables.push(cells);
        }
    }
    tables
}

/// Cells crossed walking from `(0, 0)` to `(ax, az)` on the XZ plane,
/// ending with the destination itself. Both arguments must be in
/// `0..SWEEP_LIMIT`.
pub fn sweep_table(ax: i32, az: i32) -> &'static [(i32, i32)] {
    debug_assert!((0..SWEEP_LIMIT).contains(&ax) && (0..SWEEP_LIMIT).contains(&az));
    &SWEEP_TABLES[(ax + az * SWEEP_LIMIT) as usize]
}

/// `true` if an agent of `height` standing at `source` can walk straight
/// to `target` without climbing, landing exactly at `target.y`.
pub fn has_direct_path<F: VoxelField + ?Sized>(
    field: &F,
    height: i32,
    source: VoxelCoord,
    target: VoxelCoord,
) -> bool {
    if source.y < target.y {
        return false;
    }
    let dx = target.x - source.x;
    let dz = target.z - source.z;
    if dx.abs() >= SWEEP_LIMIT || dz.abs() >= SWEEP_LIMIT {
        return false;
    }

    let (sx, sz) = (dx.signum(), dz.signum());
    let mut y = source.y;
    for &(ox, oz) in sweep_table(dx.abs(), dz.abs()) {
        let x = source.x + sx * ox;
        let z = source.z + sz * oz;
        if !can_go_through(field, height, VoxelCoord::new(x, y, z)) {
            return false;
        }
        while y > target.y && !field.is_solid(VoxelCoord::new(x, y - 1, z)) {
            y -= 1;
        }
        if !can_step_at(field, height, VoxelCoord::new(x, y, z)) {
            return false;
        }
    }
    y == target.y
}

/// Collapse a raw path into the fewest waypoints that are still walkable.
/// The first and last nodes are always kept, as is every node on either
/// side of a jump.
pub fn smooth_path<F: VoxelField + ?Sized>(
    field: &F,
    height: i32,
    path: &[PathNode],
) -> Vec<PathNode> {
    if path.len() <= 2 {
        return path.to_vec();
    }

    let mut result = vec![path[0].clone()];
    for i in 2..path.len() {
        let next = &path[i];
        let Some(prev) = result.last() else {
            break;
        };
        if !prev.is_jump()
            && !next.is_jump()
            && has_direct_path(field, height, prev.position, next.position)
        {
            continue;
        }
        result.push(path[i - 1].clone());
    }
    if let Some(goal) = path.last() {
        result.push(goal.clone());
    }

    debug!("smoothed {} waypoints down to {}", path.len(), result.len());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::SparseVoxelWorld;
    use crate::pathfinding::find_path;
    use crate::types::SearchMode;

    const HEIGHT: i32 = 2;

    fn flat(r: i32) -> SparseVoxelWorld {
        let mut world = SparseVoxelWorld::new();
        world.fill_box(VoxelCoord::new(-r, 0, -r), VoxelCoord::new(r, 0, r), true);
        world
    }

    #[test]
    fn tables_end_at_their_destination() {
        assert!(sweep_table(0, 0).is_empty());
        for az in 0..SWEEP_LIMIT {
            for ax in 0..SWEEP_LIMIT {
                let table = sweep_table(ax, az);
                if ax != 0 || az != 0 {
                    assert_eq!(table.last(), Some(&(ax, az)));
                }
                // Every cell lies inside the bounding rectangle.
                for &(x, z) in table {
                    assert!((0..=ax).contains(&x) && (0..=az).contains(&z));
                }
            }
        }
    }

    #[test]
    fn straight_table_is_the_line() {
        assert_eq!(sweep_table(3, 0), &[(1, 0), (2, 0), (3, 0)]);
        assert_eq!(sweep_table(0, 2), &[(0, 1), (0, 2)]);
    }

    #[test]
    fn diagonal_table_includes_both_neighbors() {
        assert_eq!(sweep_table(1, 1), &[(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn direct_path_on_flat_ground() {
        let world = flat(8);
        let a = VoxelCoord::new(0, 1, 0);
        assert!(has_direct_path(&world, HEIGHT, a, VoxelCoord::new(5, 1, 3)));
        assert!(has_direct_path(&world, HEIGHT, a, VoxelCoord::new(-4, 1, -7)));
        assert!(has_direct_path(&world, HEIGHT, a, a));
    }

    #[test]
    fn direct_path_rejects_ascent() {
        let mut world = flat(4);
        world.fill_box(VoxelCoord::new(2, 1, -4), VoxelCoord::new(4, 1, 4), true);
        assert!(!has_direct_path(
            &world,
            HEIGHT,
            VoxelCoord::new(0, 1, 0),
            VoxelCoord::new(3, 2, 0)
        ));
    }

    #[test]
    fn direct_path_rejects_obstacle() {
        let mut world = flat(4);
        world.set(VoxelCoord::new(2, 2, 0), true);
        // Head height obstacle on the line.
        assert!(!has_direct_path(
            &world,
            HEIGHT,
            VoxelCoord::new(0, 1, 0),
            VoxelCoord::new(4, 1, 0)
        ));
        // Parallel line one row over is clear.
        assert!(has_direct_path(
            &world,
            HEIGHT,
            VoxelCoord::new(0, 1, 1),
            VoxelCoord::new(4, 1, 1)
        ));
    }

    #[test]
    fn direct_path_rejects_gap() {
        let mut world = flat(4);
        world.set(VoxelCoord::new(2, 0, 0), false);
        assert!(!has_direct_path(
            &world,
            HEIGHT,
            VoxelCoord::new(0, 1, 0),
            VoxelCoord::new(4, 1, 0)
        ));
    }

    #[test]
    fn direct_path_falls_down_a_ledge() {
        let mut world = flat(6);
        // Raised plateau for x <= 0, two voxels above the floor.
        world.fill_box(VoxelCoord::new(-6, 1, -6), VoxelCoord::new(0, 2, 6), true);
        let top = VoxelCoord::new(-2, 3, 0);
        let bottom = VoxelCoord::new(4, 1, 0);
        assert!(has_direct_path(&world, HEIGHT, top, bottom));
        // Cannot land above the target height if the ground is lower.
        assert!(!has_direct_path(
            &world,
            HEIGHT,
            top,
            VoxelCoord::new(4, 2, 0)
        ));
        // And never the other way.
        assert!(!has_direct_path(&world, HEIGHT, bottom, top));
    }

    #[test]
    fn direct_path_passes_pillar_it_only_grazes() {
        assert!(!sweep_table(2, 6).contains(&(0, 4)));
        assert!(!sweep_table(6, 2).contains(&(4, 0)));

        let mut world = flat(8);
        world.fill_box(VoxelCoord::new(0, 1, 4), VoxelCoord::new(0, 2, 4), true);
        world.fill_box(VoxelCoord::new(0, 1, -4), VoxelCoord::new(0, 2, -4), true);
        let a = VoxelCoord::new(0, 1, 0);
        assert!(has_direct_path(&world, HEIGHT, a, VoxelCoord::new(2, 1, 6)));
        assert!(has_direct_path(&world, HEIGHT, a, VoxelCoord::new(-2, 1, -6)));

        // A pillar one cell over sits on the line itself.
        world.fill_box(VoxelCoord::new(1, 1, 4), VoxelCoord::new(1, 2, 4), true);
        assert!(!has_direct_path(&world, HEIGHT, a, VoxelCoord::new(2, 1, 6)));
    }

    #[test]
    fn direct_path_respects_sweep_limit() {
        let world = flat(40);
        let a = VoxelCoord::new(0, 1, 0);
        assert!(has_direct_path(&world, HEIGHT, a, VoxelCoord::new(15, 1, 0)));
        assert!(!has_direct_path(&world, HEIGHT, a, VoxelCoord::new(16, 1, 0)));
        assert!(!has_direct_path(&world, HEIGHT, a, VoxelCoord::new(0, 1, -16)));
    }

    #[test]
    fn smoothing_flat_path_keeps_endpoints_only() {
        let world = flat(8);
        let raw = find_path(
            &world,
            HEIGHT,
            VoxelCoord::new(-3, 1, -2),
            VoxelCoord::new(4, 1, 5),
            SearchMode::Shortest,
            None,
        );
        assert!(raw.success);
        let smoothed = smooth_path(&world, HEIGHT, &raw.path);
        assert_eq!(smoothed.len(), 2);
        assert_eq!(smoothed[0], raw.path[0]);
        assert_eq!(smoothed[1], *raw.path.last().unwrap());
    }

    #[test]
    fn smoothing_short_paths_is_identity() {
        let world = flat(2);
        let raw = find_path(
            &world,
            HEIGHT,
            VoxelCoord::new(0, 1, 0),
            VoxelCoord::new(1, 1, 0),
            SearchMode::Shortest,
            None,
        );
        assert_eq!(smooth_path(&world, HEIGHT, &raw.path), raw.path);
        assert!(smooth_path(&world, HEIGHT, &[]).is_empty());
    }

    #[test]
    fn smoothing_keeps_jump_boundaries() {
        let mut world = flat(8);
        // Single step up along the route.
        world.fill_box(VoxelCoord::new(3, 1, -8), VoxelCoord::new(8, 1, 8), true);
        let raw = find_path(
            &world,
            HEIGHT,
            VoxelCoord::new(0, 1, 0),
            VoxelCoord::new(6, 2, 0),
            SearchMode::Shortest,
            None,
        );
        assert!(raw.success);
        let jump_at = raw.path.iter().position(|n| n.is_jump()).unwrap();
        let smoothed = smooth_path(&world, HEIGHT, &raw.path);
        // The nodes on both sides of the jump survive.
        assert!(smoothed.contains(&raw.path[jump_at - 1]));
        assert!(smoothed.contains(&raw.path[jump_at]));
        assert_eq!(smoothed.first(), raw.path.first());
        assert_eq!(smoothed.last(), raw.path.last());
    }
}
