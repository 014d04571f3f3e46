use std::fmt;

use num_traits::Float;

/// Vertex identifier. Vertices of an `n`-vertex graph are numbered `1..=n`.
pub type VertexId = usize;

/// An undirected, weighted edge labelled with its 1-based position in the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<W = f64> {
    u: VertexId,
    v: VertexId,
    weight: W,
    label: usize,
}

impl<W: Float> Edge<W> {
    pub fn new(u: VertexId, v: VertexId, weight: W, label: usize) -> Self {
        Self {
            u,
            v,
            weight,
            label,
        }
    }

    pub fn u(&self) -> VertexId {
        self.u
    }

    pub fn v(&self) -> VertexId {
        self.v
    }

    pub fn weight(&self) -> W {
        self.weight
    }

    pub fn label(&self) -> usize {
        self.label
    }

    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.u, self.v)
    }

    pub fn is_self_loop(&self) -> bool {
        self.u == self.v
    }
}

/// Labels edges in input order, starting at 1.
///
/// # Examples
/// ```
/// use mwst::graph::edge::labelled;
///
/// let edges = labelled(vec![(1, 2, 1.0), (2, 3, 2.5)]);
/// assert_eq!(edges[1].label(), 2);
/// ```
pub fn labelled<W, I>(triples: I) -> Vec<Edge<W>>
where
    W: Float,
    I: IntoIterator<Item = (VertexId, VertexId, W)>,
{
    triples
        .into_iter()
        .enumerate()
        .map(|(i, (u, v, w))| Edge::new(u, v, w, i + 1))
        .collect()
}

impl<W: Float + fmt::Display> fmt::Display for Edge<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: ({}, {}) {:.1}",
            self.label, self.u, self.v, self.weight
        )
    }
}
