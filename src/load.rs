//! Loading graphs from plain-text edge lists.
//!
//! The expected format is one edge per line, two whitespace-separated integer vertex tokens.
//! Lines starting with the comment prefix and blank lines are skipped. The graph is read as
//! directed, matching how the risk-analysis datasets are published.

use std::io::BufRead;

use crate::{
    edge::Edge,
    error::{Error, Result},
    graph::Graph,
};

/// Reads a directed graph from an edge list.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] with the offending 1-based line number when a line is not two
/// integer tokens, or when the reader itself fails.
///
/// # Examples
///
/// ```
/// use unmask::load::from_edge_list;
///
/// let text = "% email graph\n0 1\n1 2\n";
/// let graph = from_edge_list(text.as_bytes(), '%').unwrap();
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// ```
pub fn from_edge_list<R: BufRead>(reader: R, comment: char) -> Result<Graph<usize>> {
    let mut graph = Graph::directed();

    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.map_err(|e| Error::InvalidInput {
            line: number,
            reason: e.to_string(),
        })?;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(comment) {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let source = parse_token(tokens.next(), number)?;
        let target = parse_token(tokens.next(), number)?;

        if tokens.next().is_some() {
            return Err(Error::InvalidInput {
                line: number,
                reason: format!("expected two vertex tokens, got more: {trimmed:?}"),
            });
        }

        graph.insert(Edge::new(source, target));
    }

    Ok(graph)
}

fn parse_token(token: Option<&str>, line: usize) -> Result<usize> {
    let token = token.ok_or_else(|| Error::InvalidInput {
        line,
        reason: "expected two vertex tokens, got fewer".into(),
    })?;

    token.parse().map_err(|_| Error::InvalidInput {
        line,
        reason: format!("non-numeric vertex token {token:?}"),
    })
}
