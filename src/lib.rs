pub mod cs;
pub mod error;

pub use cs::graph;
pub use cs::graph::{
    minimum_spanning_forest, DisjointSet, Edge, Kruskal, KruskalConfig, MinPriorityQueue,
    SpanningForest,
};
pub use error::{GraphError, Result};
pub use error::GraphError as Error;
