// A* / greedy best-first search over the voxel movement model.
//
// The search runs directly on the voxel field: there is no prebuilt graph.
// Each dequeued node is expanded with `movement::actions()`, which probes
// the field for clearance and footing. Nodes live in an arena `Vec<Node>`
// and point at their parent by index, so the explored set forms a tree that
// is walked backwards once the goal is dequeued.
//
// Frontier bookkeeping:
// - `PriorityQueue<NodeIndex>` orders open nodes by `f`.
// - `open_at` maps a position to its (single) open node. When a cheaper
//   route to an open position turns up, the stale entry is pulled out of
//   the heap by linear scan and the new node is enqueued in its place.
// - `explored` is the closed set. A position is inserted once and never
//   reopened: there is no decrease-key re-expansion.
//
// Both maps are `FxHashMap`s. Their iteration order is never observed by
// the search itself, and Fx hashing is unseeded, so results are identical
// from run to run.
//
// The heuristic is Euclidean distance between voxel centers. In `Shortest`
// mode `f = g + h`; in `Greedy` mode `f = h`. Every action costs 1. A
// climb or drop moves sqrt(2) in space, so `h` can overestimate on paths
// with vertical moves and `Shortest` is only guaranteed optimal on flat
// ground.
//
// `Pathfinder` is a small state machine (Ready -> Searching -> Succeeded
// or Failed) that can be stepped one expansion at a time for
// visualization; `find_path()` runs it to completion.
//
// See also: `movement.rs` for the legal moves, `queue.rs` for the heap,
// `smoothing.rs` for post-processing the raw path.

use crate::field::VoxelField;
use crate::movement::actions;
use crate::queue::PriorityQueue;
use crate::types::{Action, SearchMode, VoxelCoord};
use log::{debug, trace};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Cap on the number of dequeues a search may perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyExit {
    pub search_iterations: u32,
}

/// Lifecycle of a single search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    Ready,
    Searching,
    Succeeded,
    Failed,
}

/// A node of the finished search, detached from the search arena.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathNode {
    pub position: VoxelCoord,
    /// The action used to reach this node. `None` for the start node.
    pub action: Option<Action>,
    /// Cost from start.
    pub g: f64,
    /// Heuristic estimate to goal.
    pub h: f64,
    /// Frontier priority the node was queued with.
    pub f: f64,
}

impl PathNode {
    pub fn is_jump(&self) -> bool {
        self.action.is_some_and(|a| a.jump)
    }
}

/// Outcome of a search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub success: bool,
    /// Start to goal inclusive on success; empty on failure.
    pub path: Vec<PathNode>,
    /// Number of nodes dequeued.
    pub iterations: u32,
    /// Closed set at the end of the search. Diagnostic only.
    pub explored: FxHashMap<VoxelCoord, PathNode>,
}

type NodeIndex = usize;

/// Frontier slots reserved when a search starts.
const OPEN_CAPACITY: usize = 256;

#[derive(Clone, Debug)]
struct Node {
    position: VoxelCoord,
    parent: Option<NodeIndex>,
    action: Option<Action>,
    g: f64,
    h: f64,
    f: f64,
}

impl Node {
    fn to_path_node(&self) -> PathNode {
        PathNode {
            position: self.position,
            action: self.action,
            g: self.g,
            h: self.h,
            f: self.f,
        }
    }
}

fn heuristic(from: VoxelCoord, to: VoxelCoord) -> f64 {
    from.distance(to)
}

/// Incremental search from `start` to `goal` for an agent of `height`.
pub struct Pathfinder<'a, F: VoxelField + ?Sized> {
    field: &'a F,
    height: i32,
    goal: VoxelCoord,
    mode: SearchMode,
    early_exit: Option<EarlyExit>,
    nodes: Vec<Node>,
    open: PriorityQueue<NodeIndex>,
    open_at: FxHashMap<VoxelCoord, NodeIndex>,
    explored: FxHashMap<VoxelCoord, NodeIndex>,
    iterations: u32,
    state: SearchState,
    reached: Option<NodeIndex>,
}

impl<'a, F: VoxelField + ?Sized> Pathfinder<'a, F> {
    pub fn new(
        field: &'a F,
        height: i32,
        start: VoxelCoord,
        goal: VoxelCoord,
        mode: SearchMode,
        early_exit: Option<EarlyExit>,
    ) -> Self {
        let h = heuristic(start, goal);
        let mut open = PriorityQueue::with_capacity(OPEN_CAPACITY);
        open.enqueue(0, h);
        let mut open_at = FxHashMap::default();
        open_at.insert(start, 0);
        Self {
            field,
            height,
            goal,
            mode,
            early_exit,
            nodes: vec![Node {
                position: start,
                parent: None,
                action: None,
                g: 0.0,
                h,
                f: h,
            }],
            open,
            open_at,
            explored: FxHashMap::default(),
            iterations: 0,
            state: SearchState::Ready,
            reached: None,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Number of nodes dequeued so far.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Perform one dequeue-and-expand step. A no-op once the search has
    /// finished.
    pub fn step(&mut self) -> SearchState {
        match self.state {
            SearchState::Succeeded | SearchState::Failed => return self.state,
            SearchState::Ready => self.state = SearchState::Searching,
            SearchState::Searching => {}
        }

        if let Some(exit) = self.early_exit {
            if self.iterations >= exit.search_iterations {
                debug!(
                    "search budget of {} iterations exhausted",
                    exit.search_iterations
                );
                self.state = SearchState::Failed;
                return self.state;
            }
        }

        let Some(current) = self.open.dequeue() else {
            debug!("frontier exhausted after {} iterations", self.iterations);
            self.state = SearchState::Failed;
            return self.state;
        };
        self.iterations += 1;

        let position = self.nodes[current].position;
        self.open_at.remove(&position);
        if position == self.goal {
            self.reached = Some(current);
            self.state = SearchState::Succeeded;
            return self.state;
        }
        self.explored.insert(position, current);
        trace!("expanding {position} (f = {})", self.nodes[current].f);

        let current_g = self.nodes[current].g;
        for (action, dest) in actions(self.field, self.height, position) {
            if self.explored.contains_key(&dest) {
                continue;
            }
            let g = current_g + action.cost;
            let h = heuristic(dest, self.goal);
            let f = match self.mode {
                SearchMode::Greedy => h,
                SearchMode::Shortest => g + h,
            };

            if let Some(&existing) = self.open_at.get(&dest) {
                if self.nodes[existing].f <= f {
                    continue;
                }
                self.open.remove_first(|&i| i == existing);
            }

            let index = self.nodes.len();
            self.nodes.push(Node {
                position: dest,
                parent: Some(current),
                action: Some(action),
                g,
                h,
                f,
            });
            self.open.enqueue(index, f);
            self.open_at.insert(dest, index);
        }

        self.state
    }

    /// Run to completion and produce the result.
    pub fn run(mut self) -> SearchResult {
        while self.step() == SearchState::Searching {}
        self.into_result()
    }

    fn into_result(self) -> SearchResult {
        let path = match self.reached {
            Some(goal) => self.reconstruct_path(goal),
            None => Vec::new(),
        };
        let explored = self
            .explored
            .iter()
            .map(|(&pos, &i)| (pos, self.nodes[i].to_path_node()))
            .collect();
        SearchResult {
            success: self.state == SearchState::Succeeded,
            path,
            iterations: self.iterations,
            explored,
        }
    }

    /// Walk parent links back from `goal` to the start.
    fn reconstruct_path(&self, goal: NodeIndex) -> Vec<PathNode> {
        let mut path = Vec::new();
        let mut current = Some(goal);
        while let Some(i) = current {
            let node = &self.nodes[i];
            path.push(node.to_path_node());
            current = node.parent;
        }
        path.reverse();
        path
    }
}

/// Search from `start` to `goal` and return the raw (unsmoothed) path.
///
/// Never panics on unreachable goals: failure is reported through
/// `SearchResult::success`, with `iterations` telling the caller whether
/// the budget in `early_exit` was the reason.
pub fn find_path<F: VoxelField + ?Sized>(
    field: &F,
    height: i32,
    start: VoxelCoord,
    goal: VoxelCoord,
    mode: SearchMode,
    early_exit: Option<EarlyExit>,
) -> SearchResult {
    debug!("{mode} search {start} -> {goal}, height {height}, budget {early_exit:?}");
    let result = Pathfinder::new(field, height, start, goal, mode, early_exit).run();
    debug!(
        "search {} after {} iterations ({} explored, path length {})",
        if result.success { "succeeded" } else { "failed" },
        result.iterations,
        result.explored.len(),
        result.path.len()
    );
    result
}
