/// Stable index of a vertex in its graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

impl VertexId {
    pub(crate) fn new(index: usize) -> Self {
        VertexId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed edge to `target`. The target is owned by the graph, not by the edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    target: VertexId,
    weight: f64,
}

impl Edge {
    pub fn target(&self) -> VertexId {
        self.target
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// A labeled vertex with its outgoing edges in insertion order.
///
/// The adjacency list never holds an edge to the vertex itself and never
/// holds two edges to the same neighbor.
#[derive(Debug, Clone)]
pub struct Vertex<L> {
    id: VertexId,
    label: L,
    edges: Vec<Edge>,
}

impl<L> Vertex<L> {
    pub(crate) fn new(id: VertexId, label: L) -> Self {
        Vertex {
            id,
            label,
            edges: Vec::new(),
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Neighbor ids in edge order; the `n`th item pairs with the `n`th item of [`Vertex::weights`].
    pub fn neighbors(&self) -> impl ExactSizeIterator<Item = VertexId> + '_ {
        self.edges.iter().map(Edge::target)
    }

    pub fn weights(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.edges.iter().map(Edge::weight)
    }

    pub fn has_neighbor(&self) -> bool {
        !self.edges.is_empty()
    }

    pub fn out_degree(&self) -> usize {
        self.edges.len()
    }

    pub fn has_edge_to(&self, target: VertexId) -> bool {
        self.neighbors().any(|neighbor| neighbor == target)
    }

    /// Appends an edge to `target` unless it is a self-loop or a duplicate.
    pub(crate) fn connect(&mut self, target: VertexId, weight: f64) -> bool {
        if target == self.id || self.has_edge_to(target) {
            return false;
        }
        self.edges.push(Edge { target, weight });
        true
    }
}
