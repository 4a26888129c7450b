// Voxel solidity queries and a sparse, infinite voxel world.
//
// The pathfinder only ever asks one question of the terrain: "is this
// voxel solid?". `VoxelField` is that contract. Implementations must be
// pure for the duration of a search (no mutation behind `&self`) so that
// many searches can share one field across threads.
//
// `SparseVoxelWorld` is the concrete field used by tests, benches, and the
// CLI. Space is divided into 16x16x16 chunks stored in an `FxHashMap`;
// each chunk is a flat `Vec<bool>` indexed by
// `x + z * CHUNK_SIZE + y * CHUNK_SIZE * CHUNK_SIZE` (local coordinates).
// Absent chunks read as air, so the world is unbounded in every direction.
// A chunk is dropped again when its last solid voxel is cleared.
//
// See also: `movement.rs` for the clearance/footing checks built on this
// trait, `pathfinding.rs` and `smoothing.rs` which consume it.

use crate::types::VoxelCoord;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Read-only solidity query over integer voxel coordinates.
pub trait VoxelField {
    fn is_solid(&self, coord: VoxelCoord) -> bool;
}

impl<F> VoxelField for F
where
    F: Fn(VoxelCoord) -> bool,
{
    fn is_solid(&self, coord: VoxelCoord) -> bool {
        self(coord)
    }
}

/// Edge length of a chunk, in voxels.
pub const CHUNK_SIZE: i32 = 16;

const CHUNK_VOLUME: usize = (CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Chunk-space coordinate: the voxel coordinate floor-divided by
/// `CHUNK_SIZE` on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkKey {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkKey {
    /// The chunk containing `coord`. Uses floor division so `-1` lands in
    /// chunk `-1`, not chunk `0`.
    pub fn containing(coord: VoxelCoord) -> Self {
        Self {
            x: coord.x.div_euclid(CHUNK_SIZE),
            y: coord.y.div_euclid(CHUNK_SIZE),
            z: coord.z.div_euclid(CHUNK_SIZE),
        }
    }

    /// World coordinate of this chunk's minimum corner.
    pub fn origin(self) -> VoxelCoord {
        VoxelCoord::new(
            self.x * CHUNK_SIZE,
            self.y * CHUNK_SIZE,
            self.z * CHUNK_SIZE,
        )
    }
}

#[derive(Clone, Debug)]
struct Chunk {
    voxels: Vec<bool>,
    solid: u32,
}

impl Chunk {
    fn new() -> Self {
        Self {
            voxels: vec![false; CHUNK_VOLUME],
            solid: 0,
        }
    }

    fn index(coord: VoxelCoord) -> usize {
        let x = coord.x.rem_euclid(CHUNK_SIZE) as usize;
        let y = coord.y.rem_euclid(CHUNK_SIZE) as usize;
        let z = coord.z.rem_euclid(CHUNK_SIZE) as usize;
        let s = CHUNK_SIZE as usize;
        x + z * s + y * s * s
    }
}

/// Unbounded voxel world made of lazily allocated chunks.
///
/// Serializes as a sorted list of solid coordinates.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<VoxelCoord>", into = "Vec<VoxelCoord>")]
pub struct SparseVoxelWorld {
    chunks: FxHashMap<ChunkKey, Chunk>,
}

impl SparseVoxelWorld {
    /// Create an empty world (all air).
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a voxel. Returns `false` (air) for unallocated chunks.
    pub fn get(&self, coord: VoxelCoord) -> bool {
        self.chunks
            .get(&ChunkKey::containing(coord))
            .is_some_and(|chunk| chunk.voxels[Chunk::index(coord)])
    }

    /// Write a voxel. Writing air into an unallocated chunk is a no-op.
    pub fn set(&mut self, coord: VoxelCoord, solid: bool) {
        let key = ChunkKey::containing(coord);
        if !solid && !self.chunks.contains_key(&key) {
            return;
        }
        let chunk = self.chunks.entry(key).or_insert_with(Chunk::new);
        let cell = &mut chunk.voxels[Chunk::index(coord)];
        match (*cell, solid) {
            (false, true) => chunk.solid += 1,
            (true, false) => chunk.solid -= 1,
            _ => {}
        }
        *cell = solid;
        if chunk.solid == 0 {
            self.chunks.remove(&key);
        }
    }

    /// Set every voxel in the inclusive box spanned by `a` and `b`. The
    /// corners may be given in any order.
    pub fn fill_box(&mut self, a: VoxelCoord, b: VoxelCoord, solid: bool) {
        for y in a.y.min(b.y)..=a.y.max(b.y) {
            for z in a.z.min(b.z)..=a.z.max(b.z) {
                for x in a.x.min(b.x)..=a.x.max(b.x) {
                    self.set(VoxelCoord::new(x, y, z), solid);
                }
            }
        }
    }

    /// Total number of solid voxels.
    pub fn solid_count(&self) -> usize {
        self.chunks.values().map(|c| c.solid as usize).sum()
    }

    /// Number of allocated chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// All solid voxel coordinates, sorted.
    pub fn solid_voxels(&self) -> Vec<VoxelCoord> {
        let s = CHUNK_SIZE as usize;
        let mut out = Vec::with_capacity(self.solid_count());
        for (key, chunk) in &self.chunks {
            let origin = key.origin();
            for (i, _) in chunk.voxels.iter().enumerate().filter(|(_, v)| **v) {
                let x = (i % s) as i32;
                let z = ((i / s) % s) as i32;
                let y = (i / (s * s)) as i32;
                out.push(origin.offset(x, y, z));
            }
        }
        out.sort();
        out
    }
}

impl VoxelField for SparseVoxelWorld {
    fn is_solid(&self, coord: VoxelCoord) -> bool {
        self.get(coord)
    }
}

impl From<Vec<VoxelCoord>> for SparseVoxelWorld {
    fn from(solids: Vec<VoxelCoord>) -> Self {
        solids.into_iter().collect()
    }
}

impl From<SparseVoxelWorld> for Vec<VoxelCoord> {
    fn from(world: SparseVoxelWorld) -> Self {
        world.solid_voxels()
    }
}

impl FromIterator<VoxelCoord> for SparseVoxelWorld {
    fn from_iter<I: IntoIterator<Item = VoxelCoord>>(iter: I) -> Self {
        let mut world = Self::new();
        for coord in iter {
            world.set(coord, true);
        }
        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_world_is_all_air() {
        let world = SparseVoxelWorld::new();
        for x in -4..4 {
            for y in -4..4 {
                for z in -4..4 {
                    assert!(!world.get(VoxelCoord::new(x, y, z)));
                }
            }
        }
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn set_and_get() {
        let mut world = SparseVoxelWorld::new();
        let coord = VoxelCoord::new(3, 5, 2);
        world.set(coord, true);
        assert!(world.get(coord));
        // Neighbors are still air.
        assert!(!world.get(VoxelCoord::new(3, 5, 3)));
        assert_eq!(world.solid_count(), 1);
    }

    #[test]
    fn negative_coordinates_use_their_own_chunk() {
        let mut world = SparseVoxelWorld::new();
        world.set(VoxelCoord::new(-1, -1, -1), true);
        assert!(world.get(VoxelCoord::new(-1, -1, -1)));
        assert!(!world.get(VoxelCoord::new(15, 15, 15)));
        assert!(!world.get(VoxelCoord::new(0, 0, 0)));
        assert_eq!(
            ChunkKey::containing(VoxelCoord::new(-1, 0, 16)),
            ChunkKey { x: -1, y: 0, z: 1 }
        );
    }

    #[test]
    fn far_away_voxels_are_independent() {
        let mut world = SparseVoxelWorld::new();
        world.set(VoxelCoord::new(1_000_000, 0, -1_000_000), true);
        assert!(world.get(VoxelCoord::new(1_000_000, 0, -1_000_000)));
        assert_eq!(world.chunk_count(), 1);
    }

    #[test]
    fn writing_air_into_missing_chunk_is_noop() {
        let mut world = SparseVoxelWorld::new();
        world.set(VoxelCoord::new(100, 100, 100), false);
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn clearing_last_voxel_frees_chunk() {
        let mut world = SparseVoxelWorld::new();
        let coord = VoxelCoord::new(7, 7, 7);
        world.set(coord, true);
        world.set(coord, true);
        assert_eq!(world.solid_count(), 1);
        world.set(coord, false);
        assert_eq!(world.chunk_count(), 0);
        assert_eq!(world.solid_count(), 0);
    }

    #[test]
    fn fill_box_is_inclusive_and_order_free() {
        let mut world = SparseVoxelWorld::new();
        world.fill_box(VoxelCoord::new(2, 0, 2), VoxelCoord::new(-2, 0, -2), true);
        assert_eq!(world.solid_count(), 25);
        assert!(world.get(VoxelCoord::new(-2, 0, 2)));
        assert!(!world.get(VoxelCoord::new(3, 0, 0)));
        world.fill_box(VoxelCoord::new(0, 0, 0), VoxelCoord::new(0, 0, 0), false);
        assert_eq!(world.solid_count(), 24);
    }

    #[test]
    fn closures_are_fields() {
        let floor = |c: VoxelCoord| c.y < 0;
        assert!(floor.is_solid(VoxelCoord::new(5, -1, 5)));
        assert!(!floor.is_solid(VoxelCoord::new(5, 0, 5)));
    }

    #[test]
    fn world_serializes_as_sorted_solid_list() {
        let mut world = SparseVoxelWorld::new();
        world.set(VoxelCoord::new(20, 0, 0), true);
        world.set(VoxelCoord::new(-3, 1, 2), true);
        let json = serde_json::to_string(&world).unwrap();
        assert_eq!(
            json,
            r#"[{"x":-3,"y":1,"z":2},{"x":20,"y":0,"z":0}]"#
        );
        let restored: SparseVoxelWorld = serde_json::from_str(&json).unwrap();
        assert!(restored.get(VoxelCoord::new(-3, 1, 2)));
        assert!(restored.get(VoxelCoord::new(20, 0, 0)));
        assert_eq!(restored.solid_count(), 2);
    }
}
