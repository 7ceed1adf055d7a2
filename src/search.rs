use crate::error::Result;
use crate::priority_queue::PriorityQueue;
use crate::vertex::{Vertex, VertexId};
use bit_vec::BitVec;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;

/// A pending visit of `vertex` at accumulated `cost`, reached from `predecessor`.
///
/// Ordered by cost, then by `sequence` so equal-cost entries leave the queue
/// in the order they were scheduled.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scheduled {
    vertex: VertexId,
    cost: OrderedFloat<f64>,
    predecessor: Option<VertexId>,
    sequence: u64,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

/// Visited flags, settled costs and predecessors of one query, indexed by [`VertexId`].
pub(crate) struct SearchState {
    visited: BitVec,
    cost: Vec<f64>,
    predecessor: Vec<Option<VertexId>>,
}

impl SearchState {
    fn new(vertex_count: usize) -> Self {
        SearchState {
            visited: BitVec::from_elem(vertex_count, false),
            cost: vec![0.0; vertex_count],
            predecessor: vec![None; vertex_count],
        }
    }

    pub(crate) fn is_visited(&self, id: VertexId) -> bool {
        self.visited.get(id.index()).unwrap_or(false)
    }

    pub(crate) fn cost(&self, id: VertexId) -> f64 {
        self.cost[id.index()]
    }

    fn settle(&mut self, entry: &Scheduled) {
        let index = entry.vertex.index();
        self.visited.set(index, true);
        self.cost[index] = entry.cost.into_inner();
        self.predecessor[index] = entry.predecessor;
    }

    /// Walks recorded predecessors from `id` back to the origin, `id` first.
    pub(crate) fn trace_back(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        std::iter::successors(Some(id), |current| self.predecessor[current.index()])
    }
}

/// Settles vertices in cost order from `origin` until `destination` is settled
/// or the queue runs dry.
///
/// Relaxation always schedules a new entry instead of lowering an existing
/// one; entries for vertices settled in the meantime are dropped when popped.
/// Edge weights must be non-negative.
pub(crate) fn cheapest_from<L, Q>(
    vertices: &[Vertex<L>],
    origin: VertexId,
    destination: VertexId,
    queue: &mut Q,
) -> Result<SearchState>
where
    Q: PriorityQueue<Scheduled>,
{
    let mut state = SearchState::new(vertices.len());
    let mut sequence = 0u64;
    let mut settled = 0usize;
    let mut stale = 0usize;
    let mut peak = 0usize;

    queue.clear();
    queue.add(Scheduled {
        vertex: origin,
        cost: OrderedFloat(0.0),
        predecessor: None,
        sequence,
    })?;

    while let Some(entry) = queue.remove() {
        if state.is_visited(entry.vertex) {
            stale += 1;
            continue;
        }
        state.settle(&entry);
        settled += 1;
        if entry.vertex == destination {
            break;
        }

        let current = &vertices[entry.vertex.index()];
        for (neighbor, weight) in current.neighbors().zip(current.weights()) {
            if state.is_visited(neighbor) {
                continue;
            }
            sequence += 1;
            queue.add(Scheduled {
                vertex: neighbor,
                cost: OrderedFloat(entry.cost.into_inner() + weight),
                predecessor: Some(entry.vertex),
                sequence,
            })?;
        }
        peak = peak.max(queue.len());
    }

    log::debug!(
        "search settled {settled} of {} vertices, dropped {stale} stale entries, peak queue {peak}",
        vertices.len()
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority_queue::MinHeapPriorityQueue;

    fn entry(vertex: usize, cost: f64, sequence: u64) -> Scheduled {
        Scheduled {
            vertex: VertexId::new(vertex),
            cost: OrderedFloat(cost),
            predecessor: None,
            sequence,
        }
    }

    fn chain(weights: &[f64]) -> Vec<Vertex<usize>> {
        let mut vertices: Vec<_> = (0..=weights.len())
            .map(|index| Vertex::new(VertexId::new(index), index))
            .collect();
        for (index, weight) in weights.iter().enumerate() {
            vertices[index].connect(VertexId::new(index + 1), *weight);
        }
        vertices
    }

    #[test]
    fn scheduled_should_order_by_cost_then_sequence() {
        assert!(entry(0, 1.0, 9) < entry(1, 2.0, 0));
        assert!(entry(0, 2.0, 1) < entry(1, 2.0, 2));
        assert_eq!(entry(0, 2.0, 1).cmp(&entry(5, 2.0, 1)), Ordering::Equal);
    }

    #[test]
    fn cheapest_from_should_stop_once_destination_is_settled() {
        let vertices = chain(&[1.0, 1.0, 1.0]);
        let mut queue = MinHeapPriorityQueue::new();
        let state =
            cheapest_from(&vertices, VertexId::new(0), VertexId::new(1), &mut queue).unwrap();

        assert!(state.is_visited(VertexId::new(1)));
        assert_eq!(state.cost(VertexId::new(1)), 1.0);
        assert!(!state.is_visited(VertexId::new(3)));
    }

    #[test]
    fn trace_back_should_end_at_origin() {
        let vertices = chain(&[2.0, 0.5, 4.0]);
        let mut queue = MinHeapPriorityQueue::new();
        let destination = VertexId::new(3);
        let state = cheapest_from(&vertices, VertexId::new(0), destination, &mut queue).unwrap();

        let trail: Vec<_> = state.trace_back(destination).map(VertexId::index).collect();
        assert_eq!(trail, vec![3, 2, 1, 0]);
        assert_eq!(state.cost(destination), 6.5);
    }

    #[test]
    fn cheapest_from_should_drop_stale_entries() {
        // 0 -> 2 directly costs 10, through 1 costs 2; the direct entry goes stale.
        let mut vertices: Vec<_> = (0..4)
            .map(|index| Vertex::new(VertexId::new(index), index))
            .collect();
        vertices[0].connect(VertexId::new(2), 10.0);
        vertices[0].connect(VertexId::new(1), 1.0);
        vertices[1].connect(VertexId::new(2), 1.0);
        vertices[2].connect(VertexId::new(3), 20.0);

        let mut queue = MinHeapPriorityQueue::new();
        let state =
            cheapest_from(&vertices, VertexId::new(0), VertexId::new(3), &mut queue).unwrap();
        assert_eq!(state.cost(VertexId::new(2)), 2.0);
        assert_eq!(state.cost(VertexId::new(3)), 22.0);
        assert!(queue.is_empty());
    }
}
