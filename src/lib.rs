//! Least-cost routing over a directed, weighted graph of labeled vertices.
//!
//! The graph is backed by two containers built for it:
//!
//! - [`HashMap`] - open-addressing label table with linear probing and tombstones.
//! - [`MinHeap`] - array-backed binary min-heap, wrapped by [`MinHeapPriorityQueue`].
//!
//! [`Graph::cheapest_path`] runs Dijkstra's algorithm with lazy deletion:
//! relaxing an edge always schedules a new queue entry, and entries for
//! vertices that were settled in the meantime are skipped when popped.
//! Edge weights are therefore required to be non-negative.
//!
//! # Example
//!
//! ```
//! use route_graph::Graph;
//!
//! let mut graph = Graph::new();
//! for label in ["A", "B", "C", "D", "E"] {
//!     graph.add_vertex(label).unwrap();
//! }
//! graph.add_edge(&"A", &"B", 1.0).unwrap();
//! graph.add_edge(&"B", &"D", 5.0).unwrap();
//! graph.add_edge(&"A", &"C", 2.0).unwrap();
//! graph.add_edge(&"C", &"D", 2.0).unwrap();
//!
//! let route = graph.cheapest_route(&"A", &"D").unwrap().unwrap();
//! assert_eq!(route.cost, 4.0);
//! assert_eq!(route.labels, vec!["A", "C", "D"]);
//!
//! assert_eq!(graph.cheapest_route(&"A", &"E").unwrap(), None);
//! ```
pub use config::GraphConfig;
pub use error::{GraphError, Result};
pub use graph::Graph;
pub use hash_map::HashMap;
pub use hasher::{SpookyBuildHasher, SpookyHasher};
pub use min_heap::MinHeap;
pub use path::{PathStack, Route};
pub use priority_queue::{MinHeapPriorityQueue, PriorityQueue};
pub use vertex::{Edge, Vertex, VertexId};

mod config;
mod error;
mod graph;
pub mod hash_map;
mod hasher;
pub mod min_heap;
mod path;
mod priority_queue;
mod search;
mod vertex;
