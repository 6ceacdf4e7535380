//! A module for working with graphs.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    fmt::Debug,
    hash::Hash,
};

use crate::edge::Edge;

/// A directed or undirected graph, made up of edges.
///
/// The graph remembers the order in which vertices were first observed, which is what the
/// [`anonymize`](crate::anonymize::anonymize) pass relies on to hand out sequential identifiers
/// deterministically. Adjacency lists keep insertion order for the same reason: breadth-first
/// edge enumeration must be reproducible between runs.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    /// Whether edge direction is meaningful. Undirected graphs store each edge once, endpoints
    /// normalized to ascending order.
    directed: bool,
    /// Vertices in first-observed order.
    nodes: Vec<T>,
    /// Out-neighbors per vertex, in insertion order. For undirected graphs each edge appears in
    /// both endpoint lists.
    adjacency: HashMap<T, Vec<T>>,
    /// The edges in insertion order, used when a uniformly random edge must be drawn.
    edges: Vec<Edge<T>>,
    /// Edge membership, for O(1) `contains` checks.
    edge_set: HashSet<Edge<T>>,
}

impl<T> Graph<T>
where
    T: Copy + Eq + Hash + Ord + Debug,
{
    /// Creates an empty directed graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use unmask::graph::Graph;
    ///
    /// let graph: Graph<u32> = Graph::directed();
    /// assert!(graph.is_directed());
    /// ```
    pub fn directed() -> Self {
        Self::empty(true)
    }

    /// Creates an empty undirected graph.
    pub fn undirected() -> Self {
        Self::empty(false)
    }

    /// Returns whether edge direction is meaningful for this graph.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Inserts an edge into the graph, registering unseen endpoints as vertices.
    ///
    /// Returns whether the edge was newly inserted. For undirected graphs, inserting `(b, a)`
    /// after `(a, b)` is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use unmask::edge::Edge;
    /// use unmask::graph::Graph;
    ///
    /// let mut graph = Graph::undirected();
    ///
    /// assert!(graph.insert(Edge::new("a", "b")));
    /// assert!(!graph.insert(Edge::new("b", "a")));
    /// ```
    pub fn insert(&mut self, edge: Edge<T>) -> bool {
        // Vertices register in the caller's orientation so first-observed order is not skewed by
        // endpoint normalization.
        let (observed_first, observed_second) = (*edge.source(), *edge.target());
        let edge = self.canonical(edge);

        if !self.edge_set.insert(edge) {
            return false;
        }

        self.touch(observed_first);
        self.touch(observed_second);

        let (source, target) = (*edge.source(), *edge.target());
        self.adjacency.entry(source).or_default().push(target);
        if !self.directed && !edge.is_loop() {
            self.adjacency.entry(target).or_default().push(source);
        }

        self.edges.push(edge);

        true
    }

    /// Registers a vertex without attaching any edge to it.
    ///
    /// Returns whether the vertex was newly added.
    pub fn add_node(&mut self, node: T) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }

        self.touch(node);
        true
    }

    /// Removes an edge and returns whether it was present. Endpoints stay registered as
    /// vertices — removing edges never shrinks the node set.
    ///
    /// # Examples
    ///
    /// ```
    /// use unmask::edge::Edge;
    /// use unmask::graph::Graph;
    ///
    /// let mut graph = Graph::directed();
    /// graph.insert(Edge::new("a", "b"));
    ///
    /// assert_eq!(graph.remove(&Edge::new("a", "b")), true);
    /// assert_eq!(graph.remove(&Edge::new("a", "c")), false);
    /// assert_eq!(graph.node_count(), 2);
    /// ```
    pub fn remove(&mut self, edge: &Edge<T>) -> bool {
        let edge = self.canonical(*edge);

        if !self.edge_set.remove(&edge) {
            return false;
        }

        self.edges.retain(|e| *e != edge);

        let (source, target) = (*edge.source(), *edge.target());
        Self::detach(&mut self.adjacency, source, target);
        if !self.directed && !edge.is_loop() {
            Self::detach(&mut self.adjacency, target, source);
        }

        true
    }

    /// Checks if the graph contains an edge.
    pub fn contains(&self, edge: &Edge<T>) -> bool {
        self.edge_set.contains(&self.canonical(*edge))
    }

    /// Checks if the graph contains a vertex.
    pub fn contains_node(&self, node: &T) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Returns the vertices in first-observed order.
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    /// Returns the edges in insertion order.
    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    /// Returns the vertex count of the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the edge count of the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the direct successors of a vertex, in edge-insertion order. Unknown vertices have
    /// no successors.
    pub fn successors(&self, node: &T) -> &[T] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// Returns the out-degree of a vertex. For undirected graphs this is the plain degree.
    pub fn out_degree(&self, node: &T) -> usize {
        self.successors(node).len()
    }

    /// Returns the set of vertices reachable by following exactly `hops` steps of outgoing
    /// adjacency from `root`.
    ///
    /// Each step replaces the current frontier with the union of its members' direct successors;
    /// vertices reached at earlier steps are not carried along unless they are reached again at
    /// step `hops`. This is a frontier advance, not a reachability closure. Zero hops yield
    /// `{root}`; once a frontier is empty every later frontier is empty too.
    ///
    /// # Examples
    ///
    /// ```
    /// use unmask::edge::Edge;
    /// use unmask::graph::Graph;
    ///
    /// let mut graph = Graph::directed();
    /// graph.insert(Edge::new(0, 1));
    /// graph.insert(Edge::new(1, 2));
    ///
    /// assert!(graph.frontier(&0, 2).contains(&2));
    /// assert_eq!(graph.frontier(&0, 2).len(), 1);
    /// ```
    pub fn frontier(&self, root: &T, hops: usize) -> HashSet<T> {
        let mut frontier = HashSet::from([*root]);

        for _ in 0..hops {
            frontier = frontier
                .iter()
                .flat_map(|node| self.successors(node))
                .copied()
                .collect();
        }

        frontier
    }

    /// Returns the breadth-first tree edges rooted at `root`, in discovery order.
    ///
    /// Only tree edges are enumerated: each vertex is discovered once, through the first edge
    /// reaching it. Neighbor visiting order is adjacency insertion order, so the enumeration is
    /// deterministic for a given construction history.
    pub fn bfs_edges(&self, root: &T) -> Vec<Edge<T>> {
        let mut discovered = HashSet::from([*root]);
        let mut queue = VecDeque::from([*root]);
        let mut tree = Vec::new();

        while let Some(node) = queue.pop_front() {
            for successor in self.successors(&node) {
                if discovered.insert(*successor) {
                    tree.push(Edge::new(node, *successor));
                    queue.push_back(*successor);
                }
            }
        }

        tree
    }

    //
    // Private
    //

    fn empty(directed: bool) -> Self {
        Self {
            directed,
            nodes: Vec::new(),
            adjacency: HashMap::new(),
            edges: Vec::new(),
            edge_set: HashSet::new(),
        }
    }

    /// Normalizes endpoint order for undirected graphs so each edge has one representation.
    fn canonical(&self, edge: Edge<T>) -> Edge<T> {
        if self.directed || edge.source() <= edge.target() {
            edge
        } else {
            edge.reversed()
        }
    }

    /// Registers a vertex on first sight, preserving observation order.
    fn touch(&mut self, node: T) {
        if let std::collections::hash_map::Entry::Vacant(entry) = self.adjacency.entry(node) {
            entry.insert(Vec::new());
            self.nodes.push(node);
        }
    }

    fn detach(adjacency: &mut HashMap<T, Vec<T>>, from: T, to: T) {
        if let Some(neighbors) = adjacency.get_mut(&from) {
            if let Some(position) = neighbors.iter().position(|n| *n == to) {
                neighbors.remove(position);
            }
        }
    }
}
