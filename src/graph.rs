use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::hash_map::HashMap;
use crate::path::{PathStack, Route};
use crate::priority_queue::MinHeapPriorityQueue;
use crate::search;
use crate::vertex::{Vertex, VertexId};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::fmt::Debug;
use std::hash::Hash;

/// A directed, weighted graph of labeled vertices.
///
/// Vertices live in an arena addressed by [`VertexId`]; a [`HashMap`] maps
/// each label to its id. Queries keep their search state to themselves, so
/// any number of them may run against the same graph through `&self`.
///
/// # Type Parameters
///
/// * `L` - The vertex label. Hashed and compared on every lookup, and cloned
///   into query results.
///
/// # Example
///
/// ```
/// use route_graph::Graph;
///
/// let mut graph = Graph::new();
/// for label in ["A", "B", "C", "D"] {
///     graph.add_vertex(label).unwrap();
/// }
/// graph.add_edge(&"A", &"B", 1.0).unwrap();
/// graph.add_edge(&"B", &"D", 5.0).unwrap();
/// graph.add_edge(&"A", &"C", 2.0).unwrap();
/// graph.add_edge(&"C", &"D", 2.0).unwrap();
///
/// let mut path: Vec<&str> = Vec::new();
/// assert_eq!(graph.cheapest_path(&"A", &"D", &mut path).unwrap(), Some(4.0));
/// assert_eq!(path.pop(), Some("A"));
/// assert_eq!(path.pop(), Some("C"));
/// assert_eq!(path.pop(), Some("D"));
/// ```
pub struct Graph<L> {
    vertices: Vec<Vertex<L>>,
    index: HashMap<L, VertexId>,
    edge_count: usize,
    config: GraphConfig,
}

impl<L: Hash + Eq + Clone + Debug> Default for Graph<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Hash + Eq + Clone + Debug> Graph<L> {
    pub fn new() -> Self {
        Graph {
            vertices: Vec::new(),
            index: HashMap::new(),
            edge_count: 0,
            config: GraphConfig::default(),
        }
    }

    /// Creates an empty graph sized by `config`.
    ///
    /// # Errors
    ///
    /// [`GraphError::CapacityExceeded`] if an initial capacity in `config`
    /// is above its maximum.
    pub fn with_config(config: GraphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Graph {
            vertices: Vec::new(),
            index: HashMap::with_limits(config.table_capacity, config.max_table_capacity)?,
            edge_count: 0,
            config,
        })
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Adds a vertex labeled `label`.
    ///
    /// Returns `false` and leaves the existing vertex untouched if the label
    /// is already present.
    pub fn add_vertex(&mut self, label: L) -> Result<bool> {
        if self.index.contains_key(&label) {
            log::trace!("vertex {label:?} already present");
            return Ok(false);
        }
        let id = VertexId::new(self.vertices.len());
        self.index.insert(label.clone(), id)?;
        self.vertices.push(Vertex::new(id, label));
        Ok(true)
    }

    /// Adds a directed edge from `begin` to `end`.
    ///
    /// Returns `false` without changing the graph if either endpoint is
    /// missing, if `begin == end`, or if the edge already exists.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidArgument`] if `weight` is negative, NaN or infinite.
    pub fn add_edge(&mut self, begin: &L, end: &L, weight: f64) -> Result<bool> {
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(GraphError::InvalidArgument(format!(
                "edge weight must be finite and non-negative, got {weight}"
            )));
        }
        let (Some(&from), Some(&to)) = (self.index.get(begin), self.index.get(end)) else {
            log::trace!("edge {begin:?} -> {end:?} rejected: missing endpoint");
            return Ok(false);
        };
        let added = self.vertices[from.index()].connect(to, weight);
        if added {
            self.edge_count += 1;
        } else {
            log::trace!("edge {begin:?} -> {end:?} rejected: self-loop or duplicate");
        }
        Ok(added)
    }

    /// Adds a directed edge of weight 0.
    pub fn add_unweighted_edge(&mut self, begin: &L, end: &L) -> Result<bool> {
        self.add_edge(begin, end, 0.0)
    }

    pub fn has_edge(&self, begin: &L, end: &L) -> bool {
        match (self.index.get(begin), self.index.get(end)) {
            (Some(&from), Some(&to)) => self.vertices[from.index()].has_edge_to(to),
            _ => false,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.index.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Removes every vertex and edge.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.index.clear();
        self.edge_count = 0;
    }

    pub fn vertex_id(&self, label: &L) -> Option<VertexId> {
        self.index.get(label).copied()
    }

    pub fn vertex(&self, label: &L) -> Option<&Vertex<L>> {
        self.vertex_id(label).and_then(|id| self.vertex_by_id(id))
    }

    pub fn vertex_by_id(&self, id: VertexId) -> Option<&Vertex<L>> {
        self.vertices.get(id.index())
    }

    /// Labels in the order their vertices were added.
    pub fn labels(&self) -> impl Iterator<Item = &L> + '_ {
        self.vertices.iter().map(Vertex::label)
    }

    /// Labels and weights of the edges leaving `label`, in insertion order.
    pub fn neighbors(&self, label: &L) -> Option<impl Iterator<Item = (&L, f64)> + '_> {
        let vertex = self.vertex(label)?;
        Some(
            vertex
                .neighbors()
                .zip(vertex.weights())
                .map(|(id, weight)| (self.vertices[id.index()].label(), weight)),
        )
    }

    /// Finds the least-cost path from `begin` to `end`.
    ///
    /// On success the labels along the path are pushed onto `path`,
    /// destination first, so popping yields origin to destination. When
    /// `end` is unreachable `Ok(None)` is returned and `path` is not touched.
    ///
    /// # Errors
    ///
    /// * [`GraphError::VertexNotFound`] if either label is not a vertex.
    /// * [`GraphError::CapacityExceeded`] if the query's priority queue
    ///   outgrows `max_queue_capacity`.
    pub fn cheapest_path<P: PathStack<L>>(
        &self,
        begin: &L,
        end: &L,
        path: &mut P,
    ) -> Result<Option<f64>> {
        let origin = self.require(begin)?;
        let destination = self.require(end)?;
        let mut queue = MinHeapPriorityQueue::with_limits(
            self.config.queue_capacity,
            self.config.max_queue_capacity,
        )?;

        let state = search::cheapest_from(&self.vertices, origin, destination, &mut queue)?;
        if !state.is_visited(destination) {
            return Ok(None);
        }
        for id in state.trace_back(destination) {
            path.push(self.vertices[id.index()].label().clone());
        }
        Ok(Some(state.cost(destination)))
    }

    /// Like [`Graph::cheapest_path`], collecting the result into a [`Route`].
    pub fn cheapest_route(&self, begin: &L, end: &L) -> Result<Option<Route<L>>> {
        let mut stack: Vec<L> = Vec::new();
        let cost = self.cheapest_path(begin, end, &mut stack)?;
        Ok(cost.map(|cost| {
            stack.reverse();
            Route {
                cost,
                labels: stack,
            }
        }))
    }

    /// Answers independent `(begin, end)` queries in parallel.
    ///
    /// Results come back in query order; each carries its own error.
    ///
    /// # Errors
    ///
    /// [`GraphError::ThreadPool`] if the worker pool cannot be built.
    pub fn cheapest_routes(&self, queries: &[(L, L)]) -> Result<Vec<Result<Option<Route<L>>>>>
    where
        L: Send + Sync,
    {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.query_threads)
            .build()?;
        log::debug!(
            "running {} route queries on {} threads",
            queries.len(),
            pool.current_num_threads()
        );
        Ok(pool.install(|| {
            queries
                .par_iter()
                .map(|(begin, end)| self.cheapest_route(begin, end))
                .collect()
        }))
    }

    pub fn breadth_first_traversal(&self, _origin: &L) -> Result<Vec<L>> {
        Err(GraphError::NotImplemented("breadth-first traversal"))
    }

    pub fn depth_first_traversal(&self, _origin: &L) -> Result<Vec<L>> {
        Err(GraphError::NotImplemented("depth-first traversal"))
    }

    pub fn topological_order(&self) -> Result<Vec<L>> {
        Err(GraphError::NotImplemented("topological order"))
    }

    /// Fewest-edges path; see [`Graph::cheapest_path`] for the weighted search.
    pub fn shortest_path<P: PathStack<L>>(
        &self,
        _begin: &L,
        _end: &L,
        _path: &mut P,
    ) -> Result<usize> {
        Err(GraphError::NotImplemented("unweighted shortest path"))
    }

    fn require(&self, label: &L) -> Result<VertexId> {
        self.vertex_id(label)
            .ok_or_else(|| GraphError::VertexNotFound(format!("{label:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph<&'static str> {
        let mut graph = Graph::new();
        for label in ["A", "B", "C", "D"] {
            assert!(graph.add_vertex(label).unwrap());
        }
        let edges = [("A", "B", 1.0), ("B", "D", 5.0), ("A", "C", 2.0), ("C", "D", 2.0)];
        for (begin, end, weight) in edges {
            assert!(graph.add_edge(&begin, &end, weight).unwrap());
        }
        graph
    }

    #[test]
    fn add_vertex_should_refuse_existing_label_and_keep_edges() {
        let mut graph = diamond();
        assert!(!graph.add_vertex("A").unwrap());
        assert_eq!(graph.num_vertices(), 4);
        assert!(graph.has_edge(&"A", &"B"));
        assert_eq!(graph.vertex(&"A").map(Vertex::out_degree), Some(2));
    }

    #[test]
    fn add_edge_should_reject_self_loop() {
        let mut graph = diamond();
        assert!(!graph.add_edge(&"A", &"A", 1.0).unwrap());
        assert_eq!(graph.num_edges(), 4);
    }

    #[test]
    fn add_edge_should_reject_duplicate_edge() {
        let mut graph = diamond();
        assert!(!graph.add_edge(&"A", &"B", 9.0).unwrap());
        assert_eq!(graph.num_edges(), 4);
        assert!(graph.add_edge(&"B", &"A", 9.0).unwrap());
        assert_eq!(graph.num_edges(), 5);
    }

    #[test]
    fn add_edge_should_ignore_missing_endpoints() {
        let mut graph = diamond();
        assert!(!graph.add_edge(&"A", &"Z", 1.0).unwrap());
        assert!(!graph.add_edge(&"Z", &"A", 1.0).unwrap());
        assert_eq!(graph.num_edges(), 4);
        assert!(!graph.has_edge(&"A", &"Z"));
    }

    #[test]
    fn add_edge_should_reject_invalid_weights() {
        let mut graph = diamond();
        for weight in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                graph.add_edge(&"D", &"A", weight),
                Err(GraphError::InvalidArgument(_))
            ));
        }
        assert!(!graph.has_edge(&"D", &"A"));
    }

    #[test]
    fn add_unweighted_edge_should_use_zero_weight() {
        let mut graph = diamond();
        assert!(graph.add_unweighted_edge(&"D", &"A").unwrap());
        let neighbors: Vec<_> = graph.neighbors(&"D").unwrap().collect();
        assert_eq!(neighbors, vec![(&"A", 0.0)]);
    }

    #[test]
    fn has_edge_should_be_directed() {
        let graph = diamond();
        assert!(graph.has_edge(&"A", &"C"));
        assert!(!graph.has_edge(&"C", &"A"));
    }

    #[test]
    fn cheapest_path_should_leave_stack_untouched_when_unreachable() {
        let mut graph = diamond();
        graph.add_vertex("E").unwrap();
        let mut path = vec!["sentinel"];
        assert_eq!(graph.cheapest_path(&"A", &"E", &mut path).unwrap(), None);
        assert_eq!(path, vec!["sentinel"]);
    }

    #[test]
    fn cheapest_path_should_fail_for_unknown_vertex() {
        let graph = diamond();
        let mut path: Vec<&str> = Vec::new();
        assert!(matches!(
            graph.cheapest_path(&"A", &"Q", &mut path),
            Err(GraphError::VertexNotFound(label)) if label == "\"Q\""
        ));
        assert!(path.is_empty());
    }

    #[test]
    fn cheapest_path_should_return_zero_for_same_vertex() {
        let graph = diamond();
        let route = graph.cheapest_route(&"B", &"B").unwrap().unwrap();
        assert_eq!(route.cost, 0.0);
        assert_eq!(route.labels, vec!["B"]);
        assert_eq!(route.hops(), 0);
    }

    #[test]
    fn equal_cost_paths_should_break_ties_by_insertion_order() {
        let mut graph = Graph::new();
        for label in ["S", "X", "Y", "T"] {
            graph.add_vertex(label).unwrap();
        }
        graph.add_edge(&"S", &"X", 1.0).unwrap();
        graph.add_edge(&"S", &"Y", 1.0).unwrap();
        graph.add_edge(&"X", &"T", 1.0).unwrap();
        graph.add_edge(&"Y", &"T", 1.0).unwrap();

        for _ in 0..10 {
            let route = graph.cheapest_route(&"S", &"T").unwrap().unwrap();
            assert_eq!(route.labels, vec!["S", "X", "T"]);
        }
    }

    #[test]
    fn cheapest_path_should_fail_when_queue_limit_is_reached() {
        let config = GraphConfig::default()
            .with_queue_capacity(1)
            .with_max_queue_capacity(2);
        let mut graph = Graph::with_config(config).unwrap();
        for label in 0..5u32 {
            graph.add_vertex(label).unwrap();
        }
        for end in 1..5u32 {
            graph.add_edge(&0, &end, 1.0).unwrap();
        }
        let mut path: Vec<u32> = Vec::new();
        assert!(matches!(
            graph.cheapest_path(&0, &4, &mut path),
            Err(GraphError::CapacityExceeded { max: 2, .. })
        ));
    }

    #[test]
    fn with_config_should_reject_inconsistent_limits() {
        let config = GraphConfig::default()
            .with_table_capacity(100)
            .with_max_table_capacity(10);
        assert!(matches!(
            Graph::<u32>::with_config(config),
            Err(GraphError::CapacityExceeded { requested: 100, max: 10 })
        ));
        let config = GraphConfig::default()
            .with_queue_capacity(100)
            .with_max_queue_capacity(10);
        assert!(Graph::<u32>::with_config(config).is_err());
    }

    #[test]
    fn add_vertex_should_surface_table_limit() {
        let config = GraphConfig::default()
            .with_table_capacity(4)
            .with_max_table_capacity(10);
        let mut graph = Graph::with_config(config).unwrap();
        assert!(graph.add_vertex(1u32).unwrap());
        assert!(graph.add_vertex(2u32).unwrap());
        assert!(graph.add_vertex(3u32).is_err());
        assert_eq!(graph.num_vertices(), 2);
        assert_eq!(graph.labels().count(), 2);
    }

    #[test]
    fn clear_should_drop_vertices_and_edges() {
        let mut graph = diamond();
        graph.clear();
        assert!(graph.is_empty());
        assert_eq!(graph.num_vertices(), 0);
        assert_eq!(graph.num_edges(), 0);
        assert!(!graph.has_edge(&"A", &"B"));

        assert!(graph.add_vertex("A").unwrap());
        assert_eq!(graph.vertex_id(&"A").map(VertexId::index), Some(0));
    }

    #[test]
    fn unimplemented_traversals_should_report_not_implemented() {
        let graph = diamond();
        let mut path: Vec<&str> = Vec::new();
        assert!(matches!(
            graph.breadth_first_traversal(&"A"),
            Err(GraphError::NotImplemented(_))
        ));
        assert!(matches!(
            graph.depth_first_traversal(&"A"),
            Err(GraphError::NotImplemented(_))
        ));
        assert!(matches!(graph.topological_order(), Err(GraphError::NotImplemented(_))));
        assert!(matches!(
            graph.shortest_path(&"A", &"D", &mut path),
            Err(GraphError::NotImplemented(_))
        ));
    }
}
