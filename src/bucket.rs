//! Equivalence classes and anonymity-risk buckets.
//!
//! Whatever the attacker query, the result is a key per vertex; vertices sharing a key form an
//! equivalence class, and the class sizes are what anonymity risk is read off from. A vertex in
//! a singleton class is fully re-identifiable, one in a 30-strong class hides well. Classes are
//! summarized into five fixed size buckets, reporting the fraction of all vertices that fall
//! into classes of each size range.

use std::{collections::HashMap, hash::Hash};

/// An equivalence key, tagged by the query kind that produced it.
///
/// Degree signatures and subgraph witnesses never compare equal even when their payloads happen
/// to coincide, so mixing query results in one collection cannot conflate classes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StructuralKey<T> {
    /// An ascending-sorted degree sequence from a vertex-refinement query.
    DegreeSignature(Vec<usize>),
    /// The sorted membership list of a subgraph-isomorphism equivalence set, standing in as a
    /// canonical witness for the shared shape.
    SubgraphWitness(Vec<T>),
}

/// One of the five fixed equivalence-class size ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bucket {
    /// Singleton class: the vertex is uniquely re-identifiable.
    One,
    TwoToFour,
    FiveToTen,
    ElevenToTwenty,
    /// Classes of 21 or more vertices.
    TwentyOneUp,
}

impl Bucket {
    /// Every bucket, smallest range first.
    pub const ALL: [Bucket; 5] = [
        Bucket::One,
        Bucket::TwoToFour,
        Bucket::FiveToTen,
        Bucket::ElevenToTwenty,
        Bucket::TwentyOneUp,
    ];

    /// Returns the bucket a class of the given size falls into.
    ///
    /// # Examples
    ///
    /// ```
    /// use unmask::bucket::Bucket;
    ///
    /// assert_eq!(Bucket::of_size(1), Bucket::One);
    /// assert_eq!(Bucket::of_size(4), Bucket::TwoToFour);
    /// assert_eq!(Bucket::of_size(21), Bucket::TwentyOneUp);
    /// ```
    pub fn of_size(size: usize) -> Self {
        match size {
            0..=1 => Bucket::One,
            2..=4 => Bucket::TwoToFour,
            5..=10 => Bucket::FiveToTen,
            11..=20 => Bucket::ElevenToTwenty,
            _ => Bucket::TwentyOneUp,
        }
    }

    /// Returns the bucket's reporting label.
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::One => "1",
            Bucket::TwoToFour => "2-4",
            Bucket::FiveToTen => "5-10",
            Bucket::ElevenToTwenty => "11-20",
            Bucket::TwentyOneUp => "21-inf",
        }
    }

    fn index(&self) -> usize {
        match self {
            Bucket::One => 0,
            Bucket::TwoToFour => 1,
            Bucket::FiveToTen => 2,
            Bucket::ElevenToTwenty => 3,
            Bucket::TwentyOneUp => 4,
        }
    }
}

/// Per-bucket node fractions for one query run. All five buckets are always present; empty ones
/// hold zero.
#[derive(Clone, Debug, PartialEq)]
pub struct BucketTable {
    fractions: [f64; 5],
}

impl BucketTable {
    /// Returns the fraction of all vertices belonging to classes in the given bucket.
    pub fn fraction(&self, bucket: Bucket) -> f64 {
        self.fractions[bucket.index()]
    }

    /// Iterates the buckets with their fractions, smallest range first.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, f64)> + '_ {
        Bucket::ALL
            .iter()
            .map(move |bucket| (*bucket, self.fractions[bucket.index()]))
    }
}

/// Groups vertices into equivalence classes by identical key. Every vertex lands in exactly one
/// class; member lists come back sorted.
pub fn equivalence_classes<T, K>(assignments: HashMap<T, K>) -> HashMap<K, Vec<T>>
where
    T: Copy + Ord,
    K: Eq + Hash,
{
    let mut classes: HashMap<K, Vec<T>> = HashMap::new();

    for (node, key) in assignments {
        classes.entry(key).or_default().push(node);
    }

    for members in classes.values_mut() {
        members.sort_unstable();
    }

    classes
}

/// Buckets equivalence classes by size and computes, per bucket, the fraction of the vertex
/// population contained in classes of that size range.
///
/// A zero `total_nodes` (degenerate empty graph) yields the all-zero table rather than dividing
/// by zero.
pub fn bucket_fractions<T, K>(classes: &HashMap<K, Vec<T>>, total_nodes: usize) -> BucketTable
where
    K: Eq + Hash,
{
    let mut fractions = [0.0; 5];

    if total_nodes == 0 {
        return BucketTable { fractions };
    }

    for members in classes.values() {
        let size = members.len();
        fractions[Bucket::of_size(size).index()] += size as f64;
    }

    for fraction in &mut fractions {
        *fraction /= total_nodes as f64;
    }

    BucketTable { fractions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{edge::Edge, graph::Graph, refine::signatures};

    fn keyed_signatures(graph: &Graph<usize>, level: usize) -> HashMap<usize, StructuralKey<usize>> {
        signatures(graph, level)
            .into_iter()
            .map(|(node, sig)| (node, StructuralKey::DegreeSignature(sig)))
            .collect()
    }

    fn four_cycle() -> Graph<usize> {
        let mut graph = Graph::directed();
        graph.insert(Edge::new(0, 1));
        graph.insert(Edge::new(1, 2));
        graph.insert(Edge::new(2, 3));
        graph.insert(Edge::new(3, 0));
        graph
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(Bucket::of_size(1), Bucket::One);
        assert_eq!(Bucket::of_size(2), Bucket::TwoToFour);
        assert_eq!(Bucket::of_size(4), Bucket::TwoToFour);
        assert_eq!(Bucket::of_size(5), Bucket::FiveToTen);
        assert_eq!(Bucket::of_size(10), Bucket::FiveToTen);
        assert_eq!(Bucket::of_size(11), Bucket::ElevenToTwenty);
        assert_eq!(Bucket::of_size(20), Bucket::ElevenToTwenty);
        assert_eq!(Bucket::of_size(21), Bucket::TwentyOneUp);
        assert_eq!(Bucket::of_size(1000), Bucket::TwentyOneUp);
    }

    #[test]
    fn tagged_keys_never_conflate_queries() {
        let degree = StructuralKey::<usize>::DegreeSignature(vec![1, 2]);
        let witness = StructuralKey::<usize>::SubgraphWitness(vec![1, 2]);

        assert_ne!(degree, witness);
    }

    #[test]
    fn classes_partition_the_node_set() {
        let graph = four_cycle();

        for level in 0..3 {
            let classes = equivalence_classes(keyed_signatures(&graph, level));

            let mut seen: Vec<usize> = classes.values().flatten().copied().collect();
            seen.sort_unstable();

            // Union of all classes is the full node set, with no vertex counted twice.
            let mut expected = graph.nodes().to_vec();
            expected.sort_unstable();
            assert_eq!(seen, expected);
        }
    }

    #[test]
    fn level_zero_gives_a_single_class() {
        let graph = four_cycle();
        let classes = equivalence_classes(keyed_signatures(&graph, 0));

        assert_eq!(classes.len(), 1);
        assert_eq!(classes.values().next().unwrap(), &vec![0, 1, 2, 3]);
    }

    #[test]
    fn four_cycle_level_zero_lands_in_two_to_four() {
        let graph = four_cycle();
        let classes = equivalence_classes(keyed_signatures(&graph, 0));
        let table = bucket_fractions(&classes, graph.node_count());

        assert_eq!(table.fraction(Bucket::TwoToFour), 1.0);
        assert_eq!(table.fraction(Bucket::One), 0.0);
        assert_eq!(table.fraction(Bucket::FiveToTen), 0.0);
        assert_eq!(table.fraction(Bucket::ElevenToTwenty), 0.0);
        assert_eq!(table.fraction(Bucket::TwentyOneUp), 0.0);
    }

    #[test]
    fn fractions_conserve_the_population() {
        let mut classes: HashMap<StructuralKey<usize>, Vec<usize>> = HashMap::new();
        classes.insert(StructuralKey::DegreeSignature(vec![1]), vec![0]);
        classes.insert(StructuralKey::DegreeSignature(vec![2]), (1..4).collect());
        classes.insert(StructuralKey::DegreeSignature(vec![3]), (4..10).collect());
        classes.insert(StructuralKey::DegreeSignature(vec![4]), (10..40).collect());

        let table = bucket_fractions(&classes, 40);
        let total: f64 = table.iter().map(|(_, fraction)| fraction).sum();

        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(table.fraction(Bucket::One), 1.0 / 40.0);
        assert_eq!(table.fraction(Bucket::TwoToFour), 3.0 / 40.0);
        assert_eq!(table.fraction(Bucket::FiveToTen), 6.0 / 40.0);
        assert_eq!(table.fraction(Bucket::TwentyOneUp), 30.0 / 40.0);
    }

    #[test]
    fn empty_graph_yields_all_zero_table() {
        let classes: HashMap<StructuralKey<usize>, Vec<usize>> = HashMap::new();
        let table = bucket_fractions(&classes, 0);

        assert!(table.iter().all(|(_, fraction)| fraction == 0.0));
    }

    #[test]
    fn all_five_buckets_are_emitted() {
        let classes: HashMap<StructuralKey<usize>, Vec<usize>> = HashMap::new();
        let table = bucket_fractions(&classes, 1);

        assert_eq!(table.iter().count(), 5);
    }
}
