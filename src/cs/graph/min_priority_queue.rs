use num_traits::Float;

use crate::error::{GraphError, Result};
use crate::graph::edge::Edge;

/// Binary min-heap of edge references keyed on weight.
///
/// The heap is array-backed and 0-indexed: the children of slot `i` are
/// `2i + 1` and `2i + 2`. Only weights are compared, so edges of equal
/// weight come out in whatever order the heap structure leaves them.
/// Weights must not be NaN.
#[derive(Debug, Clone)]
pub struct MinPriorityQueue<'a, W = f64> {
    heap: Vec<&'a Edge<W>>,
}

impl<W: Float> Default for MinPriorityQueue<'_, W> {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[inline]
fn left(i: usize) -> usize {
    2 * i + 1
}

#[inline]
fn right(i: usize) -> usize {
    2 * i + 2
}

impl<'a, W: Float> MinPriorityQueue<'a, W> {
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    /// Builds a heap holding every edge of `edges`, inserted one at a time.
    pub fn build(edges: &'a [Edge<W>]) -> Self {
        let mut queue = Self::with_capacity(edges.len());
        for edge in edges {
            queue.insert(edge);
        }
        queue
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The minimum-weight edge, without removing it.
    pub fn peek(&self) -> Option<&'a Edge<W>> {
        self.heap.first().copied()
    }

    /// Appends `edge` and sifts it up while it is strictly lighter than its parent.
    pub fn insert(&mut self, edge: &'a Edge<W>) {
        self.heap.push(edge);
        let mut i = self.heap.len() - 1;
        while i > 0 {
            let p = parent(i);
            if self.heap[i].weight() < self.heap[p].weight() {
                self.heap.swap(i, p);
                i = p;
            } else {
                break;
            }
        }
    }

    /// Removes and returns the minimum-weight edge.
    ///
    /// # Errors
    /// * `EmptyQueueExtraction` if the queue holds no edges
    pub fn extract_min(&mut self) -> Result<&'a Edge<W>> {
        if self.heap.is_empty() {
            return Err(GraphError::EmptyQueueExtraction);
        }
        let min = self.heap.swap_remove(0);
        self.sift_down(0);
        Ok(min)
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let (l, r) = (left(i), right(i));
            let mut smallest = i;
            if l < n && self.heap[l].weight() < self.heap[smallest].weight() {
                smallest = l;
            }
            if r < n && self.heap[r].weight() < self.heap[smallest].weight() {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.heap.swap(i, smallest);
            i = smallest;
        }
    }

    /// Checks that no edge is lighter than its parent.
    pub fn is_heap(&self) -> bool {
        (1..self.heap.len()).all(|i| self.heap[i].weight() >= self.heap[parent(i)].weight())
    }
}

impl<'a, W: Float> Extend<&'a Edge<W>> for MinPriorityQueue<'a, W> {
    fn extend<I: IntoIterator<Item = &'a Edge<W>>>(&mut self, iter: I) {
        for edge in iter {
            self.insert(edge);
        }
    }
}

impl<'a, W: Float> FromIterator<&'a Edge<W>> for MinPriorityQueue<'a, W> {
    fn from_iter<I: IntoIterator<Item = &'a Edge<W>>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}
