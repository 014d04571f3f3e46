//! Plain-text graph input and forest output.
//!
//! Input is whitespace separated, one record per line:
//!
//! ```text
//! 4          <- vertex count N
//! 5          <- edge count M
//! 1 2 1.0    <- M lines of `u v weight`
//! 2 3 2
//! ...
//! ```
//!
//! Edges are labelled by their position among the edge lines, starting at 1.
//! Output has one `label: (u, v) weight` line per forest edge followed by
//! `Total_Weight = total`, all weights with one decimal digit. Labels up to 9
//! are indented by three spaces, longer ones by two.

use std::fmt::{self, Write as _};
use std::io;
use std::str::FromStr;

use num_traits::Float;

use crate::error::{GraphError, Result};
use crate::graph::edge::Edge;
use crate::graph::kruskal::{minimum_spanning_forest, SpanningForest};

/// A parsed graph: vertex count plus labelled edges.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphInput {
    vertex_count: usize,
    edges: Vec<Edge>,
}

impl GraphInput {
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn minimum_spanning_forest(&self) -> Result<SpanningForest<'_>> {
        minimum_spanning_forest(self.vertex_count, &self.edges)
    }
}

fn token<T: FromStr>(line: usize, tok: &str, what: &str) -> Result<T> {
    tok.parse()
        .map_err(|_| GraphError::parse(line, format!("invalid {} {:?}", what, tok)))
}

fn single_count(line: usize, tokens: &[&str], what: &str) -> Result<usize> {
    match tokens {
        [tok] => token(line, tok, what),
        _ => Err(GraphError::parse(
            line,
            format!("expected a single {}, found {} tokens", what, tokens.len()),
        )),
    }
}

/// Parses a graph in the text format described in the module docs.
///
/// # Errors
/// * `Parse` for a bad token or a line with the wrong number of fields
/// * `MalformedInput` if the counts disagree with the edge lines, `N` is zero,
///   or an endpoint lies outside `1..=N`
pub fn parse_graph(input: &str) -> Result<GraphInput> {
    let mut records = input
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, tokens)| !tokens.is_empty());

    let (line, tokens) = records
        .next()
        .ok_or_else(|| GraphError::malformed_input("missing vertex count"))?;
    let vertex_count = single_count(line, &tokens, "vertex count")?;
    if vertex_count == 0 {
        return Err(GraphError::malformed_input("vertex count must be positive"));
    }

    let (line, tokens) = records
        .next()
        .ok_or_else(|| GraphError::malformed_input("missing edge count"))?;
    let edge_count = single_count(line, &tokens, "edge count")?;

    // the declared count is only trusted once the edge lines are counted
    let mut edges = Vec::with_capacity(edge_count.min(1 << 16));
    for (line, tokens) in records {
        let (u, v, w) = match tokens.as_slice() {
            [u, v, w] => (
                token::<usize>(line, u, "vertex")?,
                token::<usize>(line, v, "vertex")?,
                token::<f64>(line, w, "weight")?,
            ),
            _ => {
                return Err(GraphError::parse(
                    line,
                    format!("expected `u v weight`, found {} tokens", tokens.len()),
                ))
            }
        };
        for x in [u, v] {
            if x == 0 || x > vertex_count {
                return Err(GraphError::malformed_input(format!(
                    "line {}: vertex {} is outside 1..={}",
                    line, x, vertex_count
                )));
            }
        }
        edges.push(Edge::new(u, v, w, edges.len() + 1));
    }

    if edges.len() != edge_count {
        return Err(GraphError::malformed_input(format!(
            "expected {} edges, found {}",
            edge_count,
            edges.len()
        )));
    }

    Ok(GraphInput {
        vertex_count,
        edges,
    })
}

fn write_lines<W, O>(out: &mut O, forest: &SpanningForest<'_, W>) -> fmt::Result
where
    W: Float + fmt::Display,
    O: fmt::Write,
{
    for e in forest.iter() {
        let pad = if e.label() > 9 { "  " } else { "   " };
        writeln!(
            out,
            "{}{}: ({}, {}) {:.1}",
            pad,
            e.label(),
            e.u(),
            e.v(),
            e.weight()
        )?;
    }
    writeln!(out, "Total_Weight = {:.1}", forest.total_weight())
}

/// Renders the forest in output format.
///
/// # Examples
/// ```
/// use mwst::graph::edge::labelled;
/// use mwst::graph::io::format_forest;
/// use mwst::minimum_spanning_forest;
///
/// let edges = labelled(vec![(1, 2, 5.0)]);
/// let forest = minimum_spanning_forest(4, &edges).unwrap();
/// assert_eq!(format_forest(&forest), "   1: (1, 2) 5.0\nTotal_Weight = 5.0\n");
/// ```
pub fn format_forest<W: Float + fmt::Display>(forest: &SpanningForest<'_, W>) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = write_lines(&mut out, forest);
    out
}

/// Writes the forest in output format to `writer`.
pub fn write_forest<W, O>(writer: &mut O, forest: &SpanningForest<'_, W>) -> Result<()>
where
    W: Float + fmt::Display,
    O: io::Write,
{
    writer.write_all(format_forest(forest).as_bytes())?;
    writer.flush()?;
    Ok(())
}
