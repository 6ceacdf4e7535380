//! Unmask is a small toolkit for assessing how re-identifiable the vertices of an anonymized
//! graph remain to an attacker armed only with structural knowledge.
//!
//! Vertices are grouped into equivalence classes under attacker queries of increasing power —
//! iterated degree signatures ([`refine`]) and bounded local subgraph shapes ([`subgraph`]) —
//! and the class sizes are summarized into risk buckets ([`bucket`]): the more of the population
//! that hides in large classes, the better the anonymity. A controlled random rewiring
//! ([`perturb`]) lets the same battery be measured before and after perturbation.
//!
//! # Basic usage
//!
//! The library is centered around the [`Graph`](graph::Graph) structure which can be constructed
//! from [`Edge`](edge::Edge) instances or loaded from an edge list ([`load`]). The
//! [`assess`](assess::assess) driver runs the whole pipeline.
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use unmask::assess::{assess, AssessConfig};
//! use unmask::edge::Edge;
//! use unmask::graph::Graph;
//! use unmask::perturb::PerturbConfig;
//!
//! // Construct a small directed graph; vertex ids can be any `Copy + Eq + Hash + Ord` type.
//! let mut graph = Graph::directed();
//! graph.insert(Edge::new("a", "b"));
//! graph.insert(Edge::new("b", "c"));
//! graph.insert(Edge::new("c", "a"));
//!
//! // Rewire 20% of the edges, then measure refinement levels 0..=3 and subgraph sizes 10, 20.
//! let config = AssessConfig::new(PerturbConfig::new(0.2));
//! let mut rng = StdRng::seed_from_u64(1);
//!
//! for report in assess(&graph, &config, &mut rng).unwrap() {
//!     // One `query, bucket, fraction` line per bucket.
//!     print!("{report}");
//! }
//! ```

pub mod anonymize;
pub mod assess;
pub mod bucket;
pub mod edge;
pub mod error;
pub mod graph;
pub mod load;
pub mod perturb;
pub mod refine;
pub mod subgraph;
