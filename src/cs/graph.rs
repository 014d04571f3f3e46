//! Minimum spanning forests with Kruskal's algorithm.
//!
//! - [`edge`]: the labelled, weighted edge value
//! - [`disjoint_set`]: union-find used for cycle detection
//! - [`min_priority_queue`]: binary min-heap of edges keyed on weight
//! - [`kruskal`]: the selection loop tying the two together
//! - [`io`]: the plain-text input and output formats

pub mod disjoint_set;
pub mod edge;
pub mod io;
pub mod kruskal;
pub mod min_priority_queue;

pub use disjoint_set::DisjointSet;
pub use edge::{Edge, VertexId};
pub use io::{format_forest, parse_graph, write_forest, GraphInput};
pub use kruskal::{minimum_spanning_forest, Kruskal, KruskalConfig, Phase, Selection, SpanningForest};
pub use min_priority_queue::MinPriorityQueue;
