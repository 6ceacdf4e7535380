//! Iterated vertex-refinement signatures.
//!
//! A refinement level models attacker knowledge of increasing power: level 0 is no structural
//! knowledge at all, level 1 is a vertex's degree, level 2 the degrees of its neighbors, and so
//! on through iterated frontiers. Two vertices with equal signatures at a level are
//! indistinguishable to an attacker holding that much knowledge.

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use rayon::prelude::*;

use crate::graph::Graph;

/// Computes the structural signature of every vertex at the given refinement level.
///
/// Level 0 assigns the constant signature `[1]` to every vertex: no information, one class.
/// Level `i > 0` takes the frontier exactly `i - 1` hops out from the vertex and records the
/// ascending-sorted out-degrees of its members, so level 1 is the vertex's own degree and each
/// further level folds in one more ring of the neighborhood. A vertex whose frontier came up
/// empty gets the empty signature.
///
/// Signatures are independent per vertex and are computed in parallel.
///
/// # Examples
///
/// ```
/// use unmask::edge::Edge;
/// use unmask::graph::Graph;
/// use unmask::refine::signatures;
///
/// let mut graph = Graph::directed();
/// graph.insert(Edge::new(0, 1));
/// graph.insert(Edge::new(0, 2));
///
/// let h1 = signatures(&graph, 1);
/// assert_eq!(h1[&0], vec![2]);
/// assert_eq!(h1[&1], vec![0]);
/// ```
pub fn signatures<T>(graph: &Graph<T>, level: usize) -> HashMap<T, Vec<usize>>
where
    T: Copy + Eq + Hash + Ord + Debug + Send + Sync,
{
    graph
        .nodes()
        .par_iter()
        .map(|node| (*node, signature(graph, node, level)))
        .collect()
}

fn signature<T>(graph: &Graph<T>, node: &T, level: usize) -> Vec<usize>
where
    T: Copy + Eq + Hash + Ord + Debug,
{
    if level == 0 {
        return vec![1];
    }

    let mut degrees: Vec<usize> = graph
        .frontier(node, level - 1)
        .iter()
        .map(|member| graph.out_degree(member))
        .collect();
    degrees.sort_unstable();

    degrees
}
