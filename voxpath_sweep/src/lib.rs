// Fixed-point swept-box traversal over an integer grid.
//
// `sweep()` moves an axis-aligned box along a delta vector and reports,
// through a caller-supplied `check` callback, every integer grid cell the
// box enters along the way. Inputs are converted to fixed point with
// `SWEEP_SHIFT` fractional bits, and from then on the traversal is exact:
// progress along the delta is an integer fraction `num / den`, and every
// face position is derived from its starting point and that shared
// fraction (never by summing per-step moves). The same inputs visit the
// same cells in the same order on every platform, and a box that only
// touches a cell at an edge or corner never enters it.
//
// Each iteration does two things:
// 1. For every moving axis whose leading face sits exactly on a grid
//    boundary, the slab of cells just past that boundary (spanning the
//    box's current cross-section on the other two axes) is handed to
//    `check`. A rejected slab records an impact on that axis and parks the
//    axis where it stands; the other axes keep sliding unless
//    `stop_on_impact` is set.
// 2. Progress jumps to the earliest moment some leading face reaches its
//    next boundary (or to the end of the delta if none is reachable).
//    Axes whose boundaries fall at that same moment cross together.
//
// Cells entered on several axes at once (a corner crossing) are visited
// axis by axis in X, Y, Z order. Each later slab includes the cells the
// earlier slabs just committed, so the diagonal cell is visited exactly
// once.
//
// The sweep knows nothing about voxels or solidity. Callers decide what a
// rejected cell means: collision, line of sight, or nothing at all (the
// smoothing tables in `voxpath_nav` use an always-true check to enumerate
// the crossed cells).
//
// See also: `voxpath_nav::smoothing` for the precomputed diagonal tables
// built on top of this.

use serde::{Deserialize, Serialize};

/// Number of fractional bits in the fixed-point representation.
pub const SWEEP_SHIFT: u32 = 12;

/// One grid unit in fixed point.
pub const SWEEP_RESOLUTION: i64 = 1 << SWEEP_SHIFT;

/// An axis-aligned box in grid units. `min` must be componentwise `<= max`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Aabb {
    pub const fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// The box covering exactly one grid cell.
    pub fn unit_cell(cell: [i32; 3]) -> Self {
        let min = cell.map(f64::from);
        Self {
            min,
            max: min.map(|v| v + 1.0),
        }
    }
}

fn to_fixed(v: f64) -> i64 {
    (v * SWEEP_RESOLUTION as f64).round() as i64
}

fn from_fixed(v: i64) -> f64 {
    v as f64 / SWEEP_RESOLUTION as f64
}

/// How far the box has moved along the delta, as the fraction `num / den`.
/// `den` is always positive.
#[derive(Clone, Copy, Debug)]
struct Progress {
    num: i128,
    den: i128,
}

impl Progress {
    const START: Self = Self { num: 0, den: 1 };
    const END: Self = Self { num: 1, den: 1 };

    fn before(self, other: Self) -> bool {
        self.num * other.den < other.num * self.den
    }

    /// A face that starts at `start` and travels `d` over the whole sweep,
    /// in fixed point scaled by `den`.
    fn face(self, start: i64, d: i64) -> i128 {
        i128::from(start) * self.den + i128::from(d) * self.num
    }

    /// One grid unit at the same scale as `face()`.
    fn unit(self) -> i128 {
        self.den * i128::from(SWEEP_RESOLUTION)
    }

    /// Index of the cell containing the low face `start + d * self`.
    fn floor_cell(self, start: i64, d: i64) -> i64 {
        self.face(start, d).div_euclid(self.unit()) as i64
    }

    /// One past the index of the last cell overlapped by the high face
    /// `start + d * self`.
    fn ceil_cell(self, start: i64, d: i64) -> i64 {
        -(-self.face(start, d)).div_euclid(self.unit()) as i64
    }

    /// `start + d * self` rounded to the nearest fixed-point unit.
    fn settle(self, start: i64, d: i64) -> i64 {
        (2 * self.face(start, d) + self.den).div_euclid(2 * self.den) as i64
    }
}

/// Visit every cell of the slab at index `cell` on `axis`, spanning
/// `lo..=hi` on the other two axes. Returns `false` at the first rejected
/// cell.
fn visit_slab<F>(axis: usize, cell: i64, lo: &[i64; 3], hi: &[i64; 3], check: &mut F) -> bool
where
    F: FnMut([i32; 3]) -> bool,
{
    let (a, b) = match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };
    for i in lo[a]..=hi[a] {
        for j in lo[b]..=hi[b] {
            let mut voxel = [0i32; 3];
            voxel[axis] = cell as i32;
            voxel[a] = i as i32;
            voxel[b] = j as i32;
            if !check(voxel) {
                return false;
            }
        }
    }
    true
}

/// Sweep `aabb` along `delta`, calling `check` for each grid cell the box
/// enters. The box is moved in place to wherever the sweep stopped.
///
/// Returns per-axis impacts: `+1`/`-1` if movement along that axis was
/// blocked while travelling in the positive/negative direction, `0`
/// otherwise. With `stop_on_impact`, the first impact halts all axes;
/// without it, blocked axes stop and the rest slide on.
///
/// A box with zero thickness lying exactly on a boundary overlaps no cells
/// on that axis, so its slabs are empty and `check` is never called for
/// them.
pub fn sweep<F>(aabb: &mut Aabb, delta: [f64; 3], mut check: F, stop_on_impact: bool) -> [i32; 3]
where
    F: FnMut([i32; 3]) -> bool,
{
    // Face positions at the start of the sweep. A blocked axis is parked:
    // its faces move to where it stopped and its delta becomes zero.
    let mut min = aabb.min.map(to_fixed);
    let mut max = aabb.max.map(to_fixed);
    let mut delta = delta.map(to_fixed);
    let mut impacts = [0i32; 3];
    let mut t = Progress::START;

    // Committed cell ranges: the cells the box overlaps, plus any cell
    // already checked on an axis whose face is parked on its boundary.
    let mut lo = min.map(|v| t.floor_cell(v, 0));
    let mut hi = max.map(|v| t.ceil_cell(v, 0) - 1);

    while delta != [0; 3] && t.before(Progress::END) {
        for axis in 0..3 {
            let d = delta[axis];
            if d == 0 {
                continue;
            }
            let lead = if d > 0 {
                t.face(max[axis], d)
            } else {
                t.face(min[axis], d)
            };
            if lead.rem_euclid(t.unit()) != 0 {
                continue;
            }
            let boundary = (lead / t.unit()) as i64;
            let cell = if d > 0 { boundary } else { boundary - 1 };
            let fresh = if d > 0 { cell > hi[axis] } else { cell < lo[axis] };
            if !fresh {
                continue;
            }
            if visit_slab(axis, cell, &lo, &hi, &mut check) {
                if d > 0 {
                    hi[axis] = cell;
                } else {
                    lo[axis] = cell;
                }
                continue;
            }
            impacts[axis] = d.signum() as i32;
            let parked = if stop_on_impact { 0..3 } else { axis..axis + 1 };
            for a in parked {
                let size = max[a] - min[a];
                min[a] = t.settle(min[a], delta[a]);
                max[a] = min[a] + size;
                delta[a] = 0;
            }
            if stop_on_impact {
                break;
            }
        }
        if delta == [0; 3] {
            break;
        }

        // Jump to the earliest boundary any leading face reaches. Crossing
        // times are fractions with denominator |d|.
        let mut next = Progress::END;
        for axis in 0..3 {
            let d = delta[axis];
            if d == 0 {
                continue;
            }
            let (start, boundary) = if d > 0 {
                (max[axis], (t.floor_cell(max[axis], d) + 1) * SWEEP_RESOLUTION)
            } else {
                (min[axis], (t.ceil_cell(min[axis], d) - 1) * SWEEP_RESOLUTION)
            };
            let crossing = Progress {
                num: i128::from((boundary - start) * d.signum()),
                den: i128::from(d.abs()),
            };
            if crossing.before(next) {
                next = crossing;
            }
        }
        t = next;

        for axis in 0..3 {
            let d = delta[axis];
            if d == 0 {
                continue;
            }
            let new_lo = t.floor_cell(min[axis], d);
            let new_hi = t.ceil_cell(max[axis], d) - 1;
            if d > 0 {
                lo[axis] = new_lo;
                hi[axis] = hi[axis].max(new_hi);
            } else {
                lo[axis] = lo[axis].min(new_lo);
                hi[axis] = new_hi;
            }
        }
    }

    for axis in 0..3 {
        let size = max[axis] - min[axis];
        let settled = t.settle(min[axis], delta[axis]);
        aabb.min[axis] = from_fixed(settled);
        aabb.max[axis] = from_fixed(settled + size);
    }
    impacts
}
