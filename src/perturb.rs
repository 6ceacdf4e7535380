//! Degree-preserving-ish random edge perturbation.
//!
//! Perturbation deletes a fraction of a graph's edges uniformly at random, then re-adds the same
//! number of edges between uniformly chosen vertex pairs. Edge count and node set are invariant;
//! everything else about the structure is fair game. This is a naive rewiring baseline, not a
//! formal privacy mechanism.

use std::{collections::HashSet, fmt::Debug, hash::Hash};

use rand::Rng;
use tracing::debug;

use crate::{
    edge::Edge,
    error::{Error, Result},
    graph::Graph,
};

/// Default cap on re-addition attempts before giving up.
const DEFAULT_MAX_ATTEMPTS: usize = 100_000;

/// Parameters for a perturbation run.
#[derive(Clone, Debug)]
pub struct PerturbConfig {
    /// The fraction of edges to rewire, in `[0, 1]`. Values outside the range are clamped.
    pub fraction: f64,
    /// Whether edges removed in the deletion phase are barred from re-addition. Off by default:
    /// a deleted edge may come straight back, which keeps the rewiring unbiased.
    pub exclude_deleted: bool,
    /// Retry budget for the re-addition phase. On a near-complete graph no valid pair may be
    /// left; exhausting the budget surfaces [`Error::PerturbationInfeasible`] instead of looping.
    pub max_attempts: usize,
}

impl PerturbConfig {
    /// Creates a configuration rewiring the given fraction of edges, with re-addition of deleted
    /// edges allowed and the default retry budget.
    pub fn new(fraction: f64) -> Self {
        Self {
            fraction,
            exclude_deleted: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Returns a perturbed copy of the graph: `floor(edge_count * fraction)` edges removed uniformly
/// at random, and as many edges re-added between random distinct vertex pairs that aren't already
/// connected. The input graph is left untouched.
///
/// The node set carries over exactly, deleted edges included — removing an edge never drops its
/// endpoints. Self-loops are rejected during re-addition by the distinctness check.
///
/// Runs sequentially by design: every deletion and insertion shifts the distribution the next
/// random draw samples from.
///
/// # Errors
///
/// [`Error::PerturbationInfeasible`] when the re-addition phase exhausts its retry budget.
pub fn perturb<T, R>(graph: &Graph<T>, config: &PerturbConfig, rng: &mut R) -> Result<Graph<T>>
where
    T: Copy + Eq + Hash + Ord + Debug,
    R: Rng,
{
    let mut perturbed = graph.clone();
    let fraction = config.fraction.clamp(0.0, 1.0);
    let deletions = (perturbed.edge_count() as f64 * fraction).floor() as usize;

    // Deletion phase: draw from the shrinking edge list without replacement.
    let mut deleted = HashSet::with_capacity(deletions);
    for _ in 0..deletions {
        let edge = perturbed.edges()[rng.gen_range(0..perturbed.edge_count())];
        perturbed.remove(&edge);
        deleted.insert(edge);
    }

    // Re-addition phase: rejection-sample vertex pairs until the edge count is restored.
    let nodes = graph.nodes();
    let mut remaining = deletions;
    let mut attempts = 0;

    while remaining > 0 {
        if attempts == config.max_attempts {
            return Err(Error::PerturbationInfeasible {
                remaining,
                attempts,
            });
        }
        attempts += 1;

        let source = nodes[rng.gen_range(0..nodes.len())];
        let target = nodes[rng.gen_range(0..nodes.len())];
        if source == target {
            continue;
        }

        let candidate = Edge::new(source, target);
        if perturbed.contains(&candidate) {
            continue;
        }
        if config.exclude_deleted && was_deleted(&deleted, &candidate, graph.is_directed()) {
            continue;
        }

        perturbed.insert(candidate);
        remaining -= 1;
    }

    debug!(deletions, attempts, "perturbation complete");

    Ok(perturbed)
}

/// Deleted edges are stored in the graph's canonical orientation; an undirected candidate has to
/// be checked both ways round.
fn was_deleted<T>(deleted: &HashSet<Edge<T>>, candidate: &Edge<T>, directed: bool) -> bool
where
    T: Copy + Eq + Hash,
{
    deleted.contains(candidate) || (!directed && deleted.contains(&candidate.reversed()))
}
