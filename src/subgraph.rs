//! Bounded subgraph extraction and isomorphism grouping.
//!
//! The subgraph attacker query assumes knowledge of the shape of a small region around a target
//! vertex: the first `size` edges of the target's breadth-first enumeration. Vertices whose
//! extracted regions are isomorphic are indistinguishable under that query.

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use itertools::Itertools;
use petgraph::{algo::is_isomorphic, graph::UnGraph};
use rayon::prelude::*;

use crate::{edge::Edge, graph::Graph};

/// Materializes an undirected subgraph from the leading `size` edges of a breadth-first edge
/// sequence. A shorter sequence yields a smaller subgraph; an empty prefix yields the fully
/// empty graph, with no vertex standing in for the root.
///
/// # Examples
///
/// ```
/// use unmask::edge::Edge;
/// use unmask::subgraph::extract;
///
/// let sequence = vec![Edge::new(0, 1), Edge::new(0, 2), Edge::new(1, 3)];
/// let subgraph = extract(&sequence, 2);
///
/// assert_eq!(subgraph.node_count(), 3);
/// assert_eq!(subgraph.edge_count(), 2);
/// assert_eq!(extract(&sequence, 0).node_count(), 0);
/// ```
pub fn extract<T>(sequence: &[Edge<T>], size: usize) -> UnGraph<(), ()>
where
    T: Copy + Eq + Hash,
{
    let mut subgraph = UnGraph::new_undirected();
    let mut indices = HashMap::new();

    for edge in sequence.iter().take(size) {
        let source = *indices
            .entry(*edge.source())
            .or_insert_with(|| subgraph.add_node(()));
        let target = *indices
            .entry(*edge.target())
            .or_insert_with(|| subgraph.add_node(()));
        subgraph.add_edge(source, target, ());
    }

    subgraph
}

/// Maps every vertex to the vertices (itself included) whose extracted subgraph at the given
/// size is isomorphic to its own.
///
/// One subgraph is extracted per vertex from that vertex's breadth-first edge sequence; every
/// unordered pair is then tested for structure-only isomorphism. The pair sweep is quadratic in
/// the vertex count and each test is worst-case exponential in subgraph size, which is tolerable
/// only because `size` stays small — extraction and the pair tests run in parallel. Membership
/// lists come back sorted, so equal lists identify equal classes.
pub fn equivalence_sets<T>(graph: &Graph<T>, size: usize) -> HashMap<T, Vec<T>>
where
    T: Copy + Eq + Hash + Ord + Debug + Send + Sync,
{
    let nodes = graph.nodes();

    let subgraphs: Vec<UnGraph<(), ()>> = nodes
        .par_iter()
        .map(|node| extract(&graph.bfs_edges(node), size))
        .collect();

    let pairs: Vec<(usize, usize)> = (0..nodes.len()).tuple_combinations().collect();
    let matching: Vec<(usize, usize)> = pairs
        .into_par_iter()
        .filter(|(i, j)| is_isomorphic(&subgraphs[*i], &subgraphs[*j]))
        .collect();

    // Isomorphism is reflexive, so every vertex starts out in its own set.
    let mut sets: HashMap<T, Vec<T>> = nodes.iter().map(|node| (*node, vec![*node])).collect();
    for (i, j) in matching {
        // Safety: every vertex was seeded into the map above.
        sets.get_mut(&nodes[i]).unwrap().push(nodes[j]);
        sets.get_mut(&nodes[j]).unwrap().push(nodes[i]);
    }

    for members in sets.values_mut() {
        members.sort_unstable();
    }

    sets
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Triangle 0-1-2 with a pendant vertex hanging off 2.
    fn triangle_with_pendant() -> Graph<usize> {
        let mut graph = Graph::undirected();
        graph.insert(Edge::new(0, 1));
        graph.insert(Edge::new(1, 2));
        graph.insert(Edge::new(2, 0));
        graph.insert(Edge::new(2, 3));
        graph
    }

    #[test]
    fn extract_zero_size_is_empty() {
        let sequence = vec![Edge::new(0, 1), Edge::new(1, 2)];
        let subgraph = extract(&sequence, 0);

        assert_eq!(subgraph.node_count(), 0);
        assert_eq!(subgraph.edge_count(), 0);
    }

    #[test]
    fn extract_truncates_the_sequence() {
        let sequence = vec![Edge::new(0, 1), Edge::new(0, 2), Edge::new(1, 3)];
        let subgraph = extract(&sequence, 2);

        assert_eq!(subgraph.edge_count(), 2);
        assert_eq!(subgraph.node_count(), 3);
    }

    #[test]
    fn extract_handles_short_sequences() {
        let sequence = vec![Edge::new(0, 1)];
        let subgraph = extract(&sequence, 10);

        assert_eq!(subgraph.edge_count(), 1);
        assert_eq!(subgraph.node_count(), 2);
    }

    #[test]
    fn every_vertex_matches_itself() {
        let graph = triangle_with_pendant();
        let sets = equivalence_sets(&graph, 3);

        for node in graph.nodes() {
            assert!(sets[node].contains(node));
        }
    }

    #[test]
    fn matching_is_symmetric() {
        let graph = triangle_with_pendant();
        let sets = equivalence_sets(&graph, 3);

        for (a, members) in &sets {
            for b in members {
                assert!(sets[b].contains(a), "{a} matches {b} but not vice versa");
            }
        }
    }

    #[test]
    fn groups_by_local_tree_shape() {
        // At size 3, breadth-first trees from 0 and 1 are paths while trees from 2 and 3 are
        // stars centered on 2.
        let graph = triangle_with_pendant();
        let sets = equivalence_sets(&graph, 3);

        assert_eq!(sets[&0], vec![0, 1]);
        assert_eq!(sets[&1], vec![0, 1]);
        assert_eq!(sets[&2], vec![2, 3]);
        assert_eq!(sets[&3], vec![2, 3]);
    }

    #[test]
    fn path_vertices_all_match() {
        let mut graph = Graph::undirected();
        graph.insert(Edge::new(0, 1));
        graph.insert(Edge::new(1, 2));
        graph.insert(Edge::new(2, 3));

        // Every breadth-first tree of a path with the full edge budget is again a path on four
        // vertices.
        let sets = equivalence_sets(&graph, 3);
        for node in graph.nodes() {
            assert_eq!(sets[node], vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn unreachable_roots_group_together() {
        let mut graph = Graph::directed();
        graph.insert(Edge::new(0, 1));
        graph.insert(Edge::new(0, 2));

        // 1 and 2 are sinks: their enumerations are empty, their subgraphs are both the empty
        // graph, and empty graphs are mutually isomorphic.
        let sets = equivalence_sets(&graph, 2);

        assert_eq!(sets[&1], vec![1, 2]);
        assert_eq!(sets[&2], vec![1, 2]);
        assert_eq!(sets[&0], vec![0]);
    }
}
