// Array-backed binary min-heap keyed by an `f64` priority.
//
// The search frontier needs one thing `std::collections::BinaryHeap` does
// not offer: removing an arbitrary entry when a cheaper route to an open
// position is found. `PriorityQueue` keeps the classic implicit-tree layout
// (children of `i` at `2i + 1` and `2i + 2`) so `remove_first()` can pull
// an entry out of the middle and repair the heap locally.
//
// Priorities compare with `f64::total_cmp`, so NaN never breaks ordering.
// Ties are broken arbitrarily; insertion order is not preserved.
//
// See also: `pathfinding.rs`, the only caller.

use std::cmp::Ordering;

#[derive(Clone, Debug)]
struct Entry<T> {
    priority: f64,
    element: T,
}

/// Min-heap: `dequeue()` returns the element with the lowest priority.
#[derive(Clone, Debug)]
pub struct PriorityQueue<T> {
    heap: Vec<Entry<T>>,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self { heap: Vec::new() }
    }
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    /// Insert an element. Appends, then sifts up.
    pub fn enqueue(&mut self, element: T, priority: f64) {
        self.heap.push(Entry { priority, element });
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the lowest-priority element. Swaps the root with
    /// the last entry, pops, then sifts down from the root.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let entry = self.heap.pop()?;
        self.sift_down(0);
        Some(entry.element)
    }

    /// The lowest-priority element and its priority, without removing it.
    pub fn peek(&self) -> Option<(&T, f64)> {
        self.heap.first().map(|e| (&e.element, e.priority))
    }

    /// Remove the first entry (in array order) matching `pred`. Linear scan.
    pub fn remove_first<P>(&mut self, mut pred: P) -> Option<(T, f64)>
    where
        P: FnMut(&T) -> bool,
    {
        let index = self.heap.iter().position(|e| pred(&e.element))?;
        let entry = self.heap.swap_remove(index);
        if index < self.heap.len() {
            // The moved-in entry may belong above or below its new slot.
            self.sift_up(index);
            self.sift_down(index);
        }
        Some((entry.element, entry.priority))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Check the min-heap property over the whole backing array.
    pub fn is_heap(&self) -> bool {
        (1..self.heap.len()).all(|i| !self.less(i, (i - 1) / 2))
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.heap[a].priority.total_cmp(&self.heap[b].priority) == Ordering::Less
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.heap.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < n && self.less(left, smallest) {
                smallest = left;
            }
            if right < n && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.heap.swap(i, smallest);
            i = smallest;
        }
    }
}
