use std::io;

use thiserror::Error;

/// Errors raised while building or running a spanning-forest computation.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Vertex or edge counts disagree with the edge records, or an edge is unusable.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// `extract_min` was called on an empty queue.
    #[error("cannot extract the minimum of an empty priority queue")]
    EmptyQueueExtraction,

    /// A disjoint-set operation named a vertex outside `1..=vertex_count`.
    #[error("vertex {vertex} is out of range 1..={vertex_count}")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },

    /// A line of text input could not be read as a count or an edge record.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Reading input or writing output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl GraphError {
    pub fn malformed_input<S: Into<String>>(msg: S) -> Self {
        GraphError::MalformedInput(msg.into())
    }

    pub(crate) fn parse<S: Into<String>>(line: usize, msg: S) -> Self {
        GraphError::Parse {
            line,
            message: msg.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
