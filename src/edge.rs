//! A module for working with edges.

/// A pair of vertices representing a graph edge. The pair is ordered: `source` and `target` are
/// distinct positions, and two edges with swapped endpoints compare unequal. Whether the direction
/// is meaningful is decided by the [`Graph`](crate::graph::Graph) holding the edge — undirected
/// graphs normalize endpoint order on insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge<T> {
    source: T,
    target: T,
}

impl<T> Edge<T> {
    /// Creates a new edge from two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use unmask::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_ne!(edge, Edge::new("b", "a"));
    /// ```
    pub fn new(source: T, target: T) -> Self {
        Self { source, target }
    }

    /// Returns the vertex the edge leaves from.
    ///
    /// # Examples
    ///
    /// ```
    /// use unmask::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.source(), &"a");
    /// ```
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the vertex the edge points at.
    ///
    /// # Examples
    ///
    /// ```
    /// use unmask::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.target(), &"b");
    /// ```
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns the edge with its endpoints swapped.
    pub fn reversed(&self) -> Self
    where
        T: Copy,
    {
        Self {
            source: self.target,
            target: self.source,
        }
    }

    /// Returns whether the edge touches the given vertex.
    ///
    /// # Examples
    ///
    /// ```
    /// use unmask::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    ///
    /// assert_eq!(edge.contains(&"a"), true);
    /// assert_eq!(edge.contains(&"b"), true);
    /// assert_eq!(edge.contains(&"c"), false);
    /// ```
    pub fn contains(&self, vertex: &T) -> bool
    where
        T: PartialEq,
    {
        self.source() == vertex || self.target() == vertex
    }

    /// Returns whether the edge starts and ends on the same vertex.
    pub fn is_loop(&self) -> bool
    where
        T: PartialEq,
    {
        self.source == self.target
    }
}
