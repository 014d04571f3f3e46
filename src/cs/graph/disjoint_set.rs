use log::trace;
use num_traits::Float;

use crate::error::{GraphError, Result};
use crate::graph::edge::{Edge, VertexId};

/// Disjoint-set (union-find) over the vertices `1..=n`, used for cycle detection in Kruskal's algorithm.
///
/// A vertex with no parent is the root of its component. Roots are merged by
/// size and `find` compresses the paths it walks, so neither operation can
/// build deep parent chains.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<Option<VertexId>>,
    size: Vec<usize>,
    components: usize,
}

impl DisjointSet {
    /// Creates `n` singleton components.
    pub fn new(n: usize) -> Self {
        Self {
            parent: vec![None; n],
            size: vec![1; n],
            components: n,
        }
    }

    /// Number of vertices in the partition.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn component_count(&self) -> usize {
        self.components
    }

    fn slot(&self, x: VertexId) -> Result<usize> {
        if x == 0 || x > self.parent.len() {
            return Err(GraphError::VertexOutOfRange {
                vertex: x,
                vertex_count: self.parent.len(),
            });
        }
        Ok(x - 1)
    }

    /// Returns the root of the component containing `x`.
    ///
    /// Every vertex visited on the way is re-pointed at the root; this never
    /// changes which component a vertex belongs to.
    pub fn find(&mut self, x: VertexId) -> Result<VertexId> {
        let start = self.slot(x)?;

        let mut root = start;
        while let Some(p) = self.parent[root] {
            root = p - 1;
        }

        let mut cur = start;
        while let Some(p) = self.parent[cur] {
            if p - 1 != root {
                self.parent[cur] = Some(root + 1);
            }
            cur = p - 1;
        }

        Ok(root + 1)
    }

    /// Whether `u` and `v` are currently in the same component.
    pub fn same_component(&mut self, u: VertexId, v: VertexId) -> Result<bool> {
        Ok(self.find(u)? == self.find(v)?)
    }

    /// Merges the components containing `u` and `v`.
    ///
    /// Returns `true` if a merge happened, `false` if they were already joined.
    pub fn union(&mut self, u: VertexId, v: VertexId) -> Result<bool> {
        let ru = self.find(u)?;
        let rv = self.find(v)?;
        if ru == rv {
            return Ok(false);
        }

        // smaller tree goes under the larger one
        let (child, root) = if self.size[ru - 1] > self.size[rv - 1] {
            (rv, ru)
        } else {
            (ru, rv)
        };
        self.parent[child - 1] = Some(root);
        self.size[root - 1] += self.size[child - 1];
        self.components -= 1;
        trace!("union({}, {}): root {} attached under {}", u, v, child, root);
        Ok(true)
    }

    /// Cycle check for a candidate edge.
    ///
    /// Returns `true` when both endpoints already share a component; the
    /// partition is left untouched. Otherwise the two components are merged
    /// and `false` is returned.
    pub fn detects_cycle<W: Float>(&mut self, edge: &Edge<W>) -> Result<bool> {
        let ru = self.find(edge.u())?;
        let rv = self.find(edge.v())?;
        if ru == rv {
            return Ok(true);
        }
        self.union(ru, rv)?;
        Ok(false)
    }
}
