//! Naive anonymization: stripping vertex identifiers.

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use crate::{edge::Edge, graph::Graph};

/// Relabels every vertex with a sequential integer, assigned in first-observed order, and
/// returns the relabelled graph. The input is left untouched.
///
/// The result is isomorphic to the input: edges carry over with both endpoints remapped, and
/// isolated vertices stay isolated. Identifiers form the dense range `0..node_count`, so nothing
/// about a vertex's external identity survives beyond its position in the observation order.
///
/// # Examples
///
/// ```
/// use unmask::anonymize::anonymize;
/// use unmask::edge::Edge;
/// use unmask::graph::Graph;
///
/// let mut graph = Graph::directed();
/// graph.insert(Edge::new("carol", "amy"));
/// graph.insert(Edge::new("bob", "amy"));
///
/// let anonymized = anonymize(&graph);
///
/// assert_eq!(anonymized.nodes(), &[0, 1, 2]);
/// assert!(anonymized.contains(&Edge::new(0, 1)));
/// assert!(anonymized.contains(&Edge::new(2, 1)));
/// ```
pub fn anonymize<T>(graph: &Graph<T>) -> Graph<usize>
where
    T: Copy + Eq + Hash + Ord + Debug,
{
    let mapping: HashMap<T, usize> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(id, node)| (*node, id))
        .collect();

    // The node list holds each vertex once, so the mapping cannot collide.
    debug_assert_eq!(mapping.len(), graph.node_count());

    let mut anonymized = if graph.is_directed() {
        Graph::directed()
    } else {
        Graph::undirected()
    };

    // Re-register vertices first so observation order (and with it any later re-anonymization)
    // is stable even for isolated vertices.
    for node in graph.nodes() {
        anonymized.add_node(mapping[node]);
    }

    for edge in graph.edges() {
        anonymized.insert(Edge::new(mapping[edge.source()], mapping[edge.target()]));
    }

    anonymized
}
