use log::{debug, trace};
use num_traits::Float;

use crate::error::{GraphError, Result};
use crate::graph::disjoint_set::DisjointSet;
use crate::graph::edge::Edge;
use crate::graph::min_priority_queue::MinPriorityQueue;

/// Per-run options for [`Kruskal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KruskalConfig {
    /// Stop as soon as the accepted edges span a single component, instead of
    /// draining the whole queue. Both settings give the same forest.
    pub stop_when_spanning: bool,
}

impl Default for KruskalConfig {
    fn default() -> Self {
        Self {
            stop_when_spanning: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Selecting,
    Done,
}

/// Outcome of one selection step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a, W = f64> {
    Accepted(&'a Edge<W>),
    /// The endpoints were already connected.
    Rejected(&'a Edge<W>),
}

impl<'a, W> Selection<'a, W> {
    pub fn edge(&self) -> &'a Edge<W> {
        match *self {
            Selection::Accepted(e) | Selection::Rejected(e) => e,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Selection::Accepted(_))
    }
}

/// A minimum spanning forest: the accepted edges in extraction order plus their total weight.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningForest<'a, W = f64> {
    edges: Vec<&'a Edge<W>>,
    total_weight: W,
    vertex_count: usize,
    component_count: usize,
}

impl<'a, W: Float> SpanningForest<'a, W> {
    /// Accepted edges, in non-decreasing weight order.
    pub fn edges(&self) -> &[&'a Edge<W>] {
        &self.edges
    }

    pub fn total_weight(&self) -> W {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of trees in the forest, isolated vertices included.
    pub fn component_count(&self) -> usize {
        self.component_count
    }

    /// True when the forest is a single spanning tree.
    pub fn is_spanning_tree(&self) -> bool {
        self.component_count == 1
    }

    pub fn labels(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.label()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Edge<W>> + '_ {
        self.edges.iter().copied()
    }
}

/// Kruskal's algorithm as a steppable run.
///
/// Construction builds the priority queue and the disjoint-set, leaving the
/// run in [`Phase::Selecting`], or already in [`Phase::Done`] when there are
/// no edges to examine. Each [`step`](Kruskal::step) extracts the
/// lightest remaining edge and either accepts it or rejects it as closing a
/// cycle. The run is [`Phase::Done`] once the queue is empty or, with
/// `stop_when_spanning`, once a single component remains.
///
/// # Examples
/// ```
/// use mwst::graph::edge::labelled;
/// use mwst::graph::kruskal::{Kruskal, Phase, Selection};
///
/// let edges = labelled(vec![(1, 2, 1.0), (2, 3, 2.0), (1, 3, 1.5)]);
/// let mut run = Kruskal::new(3, &edges).unwrap();
///
/// assert!(matches!(run.step().unwrap(), Some(Selection::Accepted(e)) if e.label() == 1));
/// assert!(matches!(run.step().unwrap(), Some(Selection::Accepted(e)) if e.label() == 3));
/// assert_eq!(run.phase(), Phase::Done);
///
/// let forest = run.finish().unwrap();
/// assert_eq!(forest.total_weight(), 2.5);
/// ```
#[derive(Debug, Clone)]
pub struct Kruskal<'a, W = f64> {
    config: KruskalConfig,
    queue: MinPriorityQueue<'a, W>,
    components: DisjointSet,
    accepted: Vec<&'a Edge<W>>,
    total_weight: W,
    edge_count: usize,
    extracted: usize,
    phase: Phase,
}

impl<'a, W: Float> Kruskal<'a, W> {
    pub fn new(vertex_count: usize, edges: &'a [Edge<W>]) -> Result<Self> {
        Self::with_config(vertex_count, edges, KruskalConfig::default())
    }

    /// # Errors
    /// * `MalformedInput` if an edge has an endpoint outside `1..=vertex_count`
    ///   or a NaN weight
    pub fn with_config(
        vertex_count: usize,
        edges: &'a [Edge<W>],
        config: KruskalConfig,
    ) -> Result<Self> {
        for edge in edges {
            let (u, v) = edge.endpoints();
            if u == 0 || v == 0 || u > vertex_count || v > vertex_count {
                return Err(GraphError::malformed_input(format!(
                    "edge {} ({}, {}) references a vertex outside 1..={}",
                    edge.label(),
                    u,
                    v,
                    vertex_count
                )));
            }
            if edge.weight().is_nan() {
                return Err(GraphError::malformed_input(format!(
                    "edge {} ({}, {}) has a NaN weight",
                    edge.label(),
                    u,
                    v
                )));
            }
        }

        debug!(
            "kruskal: {} vertices, {} edges, stop_when_spanning = {}",
            vertex_count,
            edges.len(),
            config.stop_when_spanning
        );

        let queue = MinPriorityQueue::build(edges);
        let components = DisjointSet::new(vertex_count);
        let phase = if queue.is_empty() {
            Phase::Done
        } else {
            Phase::Selecting
        };

        Ok(Self {
            config,
            queue,
            components,
            accepted: Vec::with_capacity(vertex_count.saturating_sub(1)),
            total_weight: W::zero(),
            edge_count: edges.len(),
            extracted: 0,
            phase,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Edges accepted so far.
    pub fn accepted(&self) -> &[&'a Edge<W>] {
        &self.accepted
    }

    pub fn total_weight(&self) -> W {
        self.total_weight
    }

    pub fn extracted(&self) -> usize {
        self.extracted
    }

    /// Extracts and classifies the next edge. Returns `None` once the run is done.
    pub fn step(&mut self) -> Result<Option<Selection<'a, W>>> {
        if self.phase == Phase::Done {
            return Ok(None);
        }

        let edge = self.queue.extract_min()?;
        self.extracted += 1;

        let selection = if self.components.detects_cycle(edge)? {
            trace!("reject {}: endpoints already connected", edge.label());
            Selection::Rejected(edge)
        } else {
            self.accepted.push(edge);
            self.total_weight = self.total_weight + edge.weight();
            trace!("accept {}: ({}, {})", edge.label(), edge.u(), edge.v());
            Selection::Accepted(edge)
        };

        if self.queue.is_empty() {
            self.phase = Phase::Done;
        } else if self.config.stop_when_spanning && self.components.component_count() == 1 {
            debug!(
                "kruskal: spanning tree complete after {} of {} extractions",
                self.extracted, self.edge_count
            );
            self.phase = Phase::Done;
        }

        Ok(Some(selection))
    }

    /// Runs the remaining steps and returns the forest.
    pub fn finish(mut self) -> Result<SpanningForest<'a, W>> {
        while self.step()?.is_some() {}

        let component_count = self.components.component_count();
        debug!(
            "kruskal: accepted {} edges, {} components",
            self.accepted.len(),
            component_count
        );

        Ok(SpanningForest {
            edges: self.accepted,
            total_weight: self.total_weight,
            vertex_count: self.components.len(),
            component_count,
        })
    }
}

/// Kruskal's algorithm to compute a minimum spanning forest of an undirected, weighted graph.
///
/// - `vertex_count` is the number of vertices, labelled `1..=vertex_count`.
/// - `edges` are the graph's edges; the forest borrows from them.
///
/// If the graph is disconnected this returns a spanning forest with one tree
/// per connected component.
///
/// # Examples
/// ```
/// use mwst::graph::edge::labelled;
/// use mwst::minimum_spanning_forest;
///
/// let edges = labelled(vec![(1, 2, 1.0), (2, 3, 2.0), (3, 4, 3.0), (1, 4, 4.0), (1, 3, 1.5)]);
/// let forest = minimum_spanning_forest(4, &edges).unwrap();
///
/// assert_eq!(forest.labels(), vec![1, 5, 2]);
/// assert_eq!(forest.total_weight(), 4.5);
/// ```
///
/// # Complexity
/// * Time: O(E log E)
/// * Space: O(V + E)
///
/// # Errors
/// * `MalformedInput` if an edge references a vertex outside the graph or has a NaN weight
pub fn minimum_spanning_forest<W: Float>(
    vertex_count: usize,
    edges: &[Edge<W>],
) -> Result<SpanningForest<'_, W>> {
    Kruskal::new(vertex_count, edges)?.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::edge::labelled;
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Component id of each vertex (index 0 unused), by naive relabelling.
    fn components_of(n: usize, edges: &[&Edge]) -> Vec<usize> {
        let mut comp: Vec<usize> = (0..=n).collect();
        for e in edges {
            let (a, b) = (comp[e.u()], comp[e.v()]);
            if a != b {
                for c in comp.iter_mut() {
                    if *c == b {
                        *c = a;
                    }
                }
            }
        }
        comp
    }

    fn count_components(n: usize, edges: &[&Edge]) -> usize {
        let comp = components_of(n, edges);
        let mut roots: Vec<usize> = comp[1..].to_vec();
        roots.sort_unstable();
        roots.dedup();
        roots.len()
    }

    fn is_acyclic(n: usize, edges: &[&Edge]) -> bool {
        edges.len() + count_components(n, edges) == n
    }

    /// Minimum weight over every acyclic subset that spans each component.
    fn brute_force_weight(n: usize, edges: &[Edge]) -> f64 {
        let all: Vec<&Edge> = edges.iter().collect();
        let target = n - count_components(n, &all);
        let mut best = f64::INFINITY;
        for mask in 0u32..(1 << edges.len()) {
            if mask.count_ones() as usize != target {
                continue;
            }
            let subset: Vec<&Edge> = (0..edges.len())
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| &edges[i])
                .collect();
            if is_acyclic(n, &subset) {
                best = best.min(subset.iter().map(|e| e.weight()).sum());
            }
        }
        best
    }

    fn random_graph(rng: &mut ChaCha8Rng, n: usize, m: usize) -> Vec<Edge> {
        let triples: Vec<(usize, usize, f64)> = (0..m)
            .map(|_| {
                let u = rng.gen_range(1..=n);
                let v = rng.gen_range(1..=n);
                (u, v, f64::from(rng.gen_range(0i32..8)) * 0.5)
            })
            .collect();
        labelled(triples)
    }

    #[test]
    fn test_standard_graph() {
        let edges = labelled(vec![
            (1, 2, 1.0),
            (2, 3, 2.0),
            (3, 4, 3.0),
            (1, 4, 4.0),
            (1, 3, 1.5),
        ]);
        let forest = minimum_spanning_forest(4, &edges).unwrap();

        assert_eq!(forest.len(), 3);
        assert_eq!(forest.labels(), vec![1, 5, 2]);
        let weights: Vec<f64> = forest.iter().map(|e| e.weight()).collect();
        assert_eq!(weights, vec![1.0, 1.5, 2.0]);
        assert_relative_eq!(forest.total_weight(), 4.5);
        assert!(forest.is_spanning_tree());
    }

    #[test]
    fn test_disconnected_components() {
        let edges = labelled(vec![(1, 2, 5.0)]);
        let forest = minimum_spanning_forest(4, &edges).unwrap();

        assert_eq!(forest.len(), 1);
        assert_eq!(forest.edges()[0].endpoints(), (1, 2));
        assert_relative_eq!(forest.total_weight(), 5.0);
        assert_eq!(forest.vertex_count(), 4);
        assert_eq!(forest.component_count(), 3);
        assert!(!forest.is_spanning_tree());
    }

    #[test]
    fn test_empty_edge_set() {
        let edges: Vec<Edge> = Vec::new();
        let run = Kruskal::new(3, &edges).unwrap();
        assert_eq!(run.phase(), Phase::Done);

        let forest = run.finish().unwrap();
        assert!(forest.is_empty());
        assert_eq!(forest.total_weight(), 0.0);
        assert_eq!(forest.component_count(), 3);
    }

    #[test]
    fn test_negative_weights() {
        let edges = labelled(vec![(1, 2, -2.0), (2, 3, -3.0), (1, 3, -1.0), (3, 4, 2.0)]);
        let forest = minimum_spanning_forest(4, &edges).unwrap();
        assert_eq!(forest.len(), 3);
        // (1, 3) closes the triangle
        assert_eq!(forest.labels(), vec![2, 1, 4]);
        assert_relative_eq!(forest.total_weight(), -3.0);
    }

    #[test]
    fn test_parallel_edges() {
        let edges = labelled(vec![(1, 2, 10.0), (1, 2, 1.0), (2, 3, 5.0)]);
        let forest = minimum_spanning_forest(3, &edges).unwrap();
        assert_eq!(forest.labels(), vec![2, 3]);
        assert_relative_eq!(forest.total_weight(), 6.0);
    }

    #[test]
    fn test_duplicate_minimum_edges_keep_one() {
        let edges = labelled(vec![(1, 2, 1.0), (2, 1, 1.0), (2, 3, 4.0)]);
        let forest = minimum_spanning_forest(3, &edges).unwrap();
        assert_eq!(forest.len(), 2);
        assert_relative_eq!(forest.total_weight(), 5.0);
        let first = forest.edges()[0].label();
        assert!(first == 1 || first == 2);
    }

    #[test]
    fn test_self_loop_rejected() {
        let edges = labelled(vec![(2, 2, 0.5), (1, 2, 3.0)]);
        let mut run = Kruskal::new(2, &edges).unwrap();

        let first = run.step().unwrap().unwrap();
        assert_eq!(first, Selection::Rejected(&edges[0]));
        let second = run.step().unwrap().unwrap();
        assert!(second.is_accepted());
        assert_eq!(second.edge().label(), 2);
        assert_eq!(run.step().unwrap(), None);

        let forest = run.finish().unwrap();
        assert_eq!(forest.labels(), vec![2]);
    }

    #[test]
    fn test_out_of_range_edge_is_malformed() {
        let edges = labelled(vec![(1, 2, 1.0), (2, 5, 1.0)]);
        let err = minimum_spanning_forest(4, &edges).unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput(_)));
        assert!(err.to_string().contains("edge 2"));

        let zero = labelled(vec![(0, 1, 1.0)]);
        assert!(matches!(
            minimum_spanning_forest(4, &zero),
            Err(GraphError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_nan_weight_is_malformed() {
        let edges = labelled(vec![(1, 2, 1.0), (2, 3, f64::NAN)]);
        assert!(matches!(
            minimum_spanning_forest(3, &edges),
            Err(GraphError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_f32_weights() {
        let edges = labelled(vec![(1, 2, 0.25f32), (2, 3, 0.5f32), (1, 3, 1.0f32)]);
        let forest = minimum_spanning_forest(3, &edges).unwrap();
        assert_relative_eq!(forest.total_weight(), 0.75f32);
    }

    #[test]
    fn test_early_stop_matches_full_drain() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let n = rng.gen_range(1..=8);
            let m = rng.gen_range(0..=16);
            let edges = random_graph(&mut rng, n, m);

            let early = Kruskal::new(n, &edges).unwrap();
            let drain = Kruskal::with_config(
                n,
                &edges,
                KruskalConfig {
                    stop_when_spanning: false,
                },
            )
            .unwrap();

            let early = early.finish().unwrap();
            let drain = drain.finish().unwrap();
            assert_eq!(early.labels(), drain.labels());
            assert_eq!(early.total_weight(), drain.total_weight());
        }
    }

    #[test]
    fn test_drain_extracts_every_edge() {
        let edges = labelled(vec![(1, 2, 1.0), (2, 3, 1.0), (1, 3, 9.0), (3, 1, 9.5)]);
        let mut run = Kruskal::with_config(
            3,
            &edges,
            KruskalConfig {
                stop_when_spanning: false,
            },
        )
        .unwrap();
        while run.step().unwrap().is_some() {}
        assert_eq!(run.extracted(), 4);

        let mut run = Kruskal::new(3, &edges).unwrap();
        while run.step().unwrap().is_some() {}
        assert_eq!(run.extracted(), 2);
    }

    #[test]
    fn test_selection_soundness() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            let n = rng.gen_range(2..=9);
            let m = rng.gen_range(1..=20);
            let edges = random_graph(&mut rng, n, m);
            let mut run = Kruskal::new(n, &edges).unwrap();

            while let Some(selection) = run.step().unwrap() {
                let edge = selection.edge();
                let before: Vec<&Edge> = match selection {
                    Selection::Accepted(_) => run.accepted()[..run.accepted().len() - 1].to_vec(),
                    Selection::Rejected(_) => run.accepted().to_vec(),
                };
                let comp = components_of(n, &before);
                assert_eq!(
                    selection.is_accepted(),
                    comp[edge.u()] != comp[edge.v()],
                    "edge {}",
                    edge
                );

                let after = components_of(n, run.accepted());
                assert_eq!(after[edge.u()], after[edge.v()]);
            }
        }
    }

    #[test]
    fn test_forest_shape_and_optimality() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        for _ in 0..200 {
            let n = rng.gen_range(1..=6);
            let m = rng.gen_range(0..=9);
            let edges = random_graph(&mut rng, n, m);
            let forest = minimum_spanning_forest(n, &edges).unwrap();

            let all: Vec<&Edge> = edges.iter().collect();
            let components = count_components(n, &all);
            assert_eq!(forest.len(), n - components);
            assert_eq!(forest.component_count(), components);
            assert!(is_acyclic(n, forest.edges()));

            let weights: Vec<f64> = forest.iter().map(|e| e.weight()).collect();
            assert!(weights.windows(2).all(|w| w[0] <= w[1]));
            let sum: f64 = weights.iter().sum();
            assert_relative_eq!(forest.total_weight(), sum);
            assert_relative_eq!(forest.total_weight(), brute_force_weight(n, &edges));
        }
    }
}
