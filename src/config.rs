use crate::error::{GraphError, Result};
use crate::hash_map::{DEFAULT_TABLE_CAPACITY, MAX_TABLE_CAPACITY};
use crate::min_heap::{DEFAULT_HEAP_CAPACITY, MAX_HEAP_CAPACITY};

/// Sizing and threading parameters for a [`Graph`](crate::Graph).
///
/// # Fields
///
/// * `table_capacity` - Initial slot count of the label table.
/// * `max_table_capacity` - Hard limit the label table may grow to.
/// * `queue_capacity` - Initial capacity of the priority queue built for each query.
/// * `max_queue_capacity` - Hard limit the per-query priority queue may grow to.
/// * `query_threads` - Worker count for batch queries, `0` lets rayon decide.
///
/// # Example
///
/// ```
/// use route_graph::{Graph, GraphConfig};
///
/// let config = GraphConfig::default().with_table_capacity(31).with_query_threads(2);
/// let graph: Graph<&str> = Graph::with_config(config).unwrap();
/// assert!(graph.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphConfig {
    pub table_capacity: usize,
    pub max_table_capacity: usize,
    pub queue_capacity: usize,
    pub max_queue_capacity: usize,
    pub query_threads: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            table_capacity: DEFAULT_TABLE_CAPACITY,
            max_table_capacity: MAX_TABLE_CAPACITY,
            queue_capacity: DEFAULT_HEAP_CAPACITY,
            max_queue_capacity: MAX_HEAP_CAPACITY,
            query_threads: 0,
        }
    }
}

impl GraphConfig {
    /// Checks that no initial capacity is above its maximum.
    pub fn validate(&self) -> Result<()> {
        let limits = [
            (self.table_capacity, self.max_table_capacity),
            (self.queue_capacity, self.max_queue_capacity),
        ];
        for (capacity, max) in limits {
            if capacity.max(1) > max {
                return Err(GraphError::CapacityExceeded {
                    requested: capacity.max(1),
                    max,
                });
            }
        }
        Ok(())
    }

    pub fn with_table_capacity(mut self, capacity: usize) -> Self {
        self.table_capacity = capacity;
        self
    }

    pub fn with_max_table_capacity(mut self, max: usize) -> Self {
        self.max_table_capacity = max;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_max_queue_capacity(mut self, max: usize) -> Self {
        self.max_queue_capacity = max;
        self
    }

    pub fn with_query_threads(mut self, threads: usize) -> Self {
        self.query_threads = threads;
        self
    }
}
