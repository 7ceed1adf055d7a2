use crate::error::Result;
use crate::min_heap::MinHeap;

/// A queue that always hands back its highest-priority (smallest) entry first.
pub trait PriorityQueue<T> {
    fn add(&mut self, entry: T) -> Result<()>;

    /// Removes and returns the highest-priority entry, if any.
    fn remove(&mut self) -> Option<T>;

    fn peek(&self) -> Option<&T>;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;

    fn clear(&mut self);
}

/// [`PriorityQueue`] backed by a [`MinHeap`].
#[derive(Debug, Clone)]
pub struct MinHeapPriorityQueue<T: Ord> {
    heap: MinHeap<T>,
}

impl<T: Ord> Default for MinHeapPriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> MinHeapPriorityQueue<T> {
    pub fn new() -> Self {
        MinHeapPriorityQueue {
            heap: MinHeap::new(),
        }
    }

    pub fn with_limits(capacity: usize, max_capacity: usize) -> Result<Self> {
        Ok(MinHeapPriorityQueue {
            heap: MinHeap::with_limits(capacity, max_capacity)?,
        })
    }
}

impl<T: Ord> PriorityQueue<T> for MinHeapPriorityQueue<T> {
    fn add(&mut self, entry: T) -> Result<()> {
        self.heap.add(entry)
    }

    fn remove(&mut self) -> Option<T> {
        self.heap.remove_min()
    }

    fn peek(&self) -> Option<&T> {
        self.heap.peek()
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear()
    }
}
