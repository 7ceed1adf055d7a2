use crate::error::{GraphError, Result};

/// Capacity of a heap built with [`MinHeap::new`].
pub const DEFAULT_HEAP_CAPACITY: usize = 25;
/// Largest capacity a heap built with [`MinHeap::new`] may grow to.
pub const MAX_HEAP_CAPACITY: usize = 1 << 24;

/// An array-backed binary min-heap.
///
/// Positions are addressed 1-based: the root is position 1 and the parent of
/// position `i` is `i / 2`. Position `i` lives at `entries[i - 1]`.
///
/// The capacity doubles when the heap is full, up to a hard maximum, and
/// never shrinks.
#[derive(Debug, Clone)]
pub struct MinHeap<T: Ord> {
    entries: Vec<T>,
    capacity: usize,
    max_capacity: usize,
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap {
            entries: Vec::with_capacity(DEFAULT_HEAP_CAPACITY),
            capacity: DEFAULT_HEAP_CAPACITY,
            max_capacity: MAX_HEAP_CAPACITY,
        }
    }

    /// Creates a heap holding up to `capacity` entries before it first grows.
    ///
    /// # Errors
    ///
    /// [`GraphError::CapacityExceeded`] if `capacity` is above `max_capacity`.
    pub fn with_limits(capacity: usize, max_capacity: usize) -> Result<Self> {
        let capacity = capacity.max(1);
        if capacity > max_capacity {
            return Err(GraphError::CapacityExceeded {
                requested: capacity,
                max: max_capacity,
            });
        }
        Ok(MinHeap {
            entries: Vec::with_capacity(capacity),
            capacity,
            max_capacity,
        })
    }

    /// Adds `entry` at the next leaf and sifts it up.
    ///
    /// # Errors
    ///
    /// [`GraphError::CapacityExceeded`] if the heap is full at its maximum
    /// capacity. The heap is left unchanged.
    pub fn add(&mut self, entry: T) -> Result<()> {
        if self.entries.len() == self.capacity {
            self.grow()?;
        }
        self.entries.push(entry);
        self.sift_up(self.entries.len());
        Ok(())
    }

    /// Removes and returns the smallest entry.
    pub fn remove_min(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        // The last leaf takes the root position.
        let root = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(1);
        }
        Some(root)
    }

    pub fn peek(&self) -> Option<&T> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops all entries. The capacity is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn grow(&mut self) -> Result<()> {
        let doubled = self.capacity.saturating_mul(2);
        let new_capacity = doubled.min(self.max_capacity);
        if new_capacity <= self.capacity {
            return Err(GraphError::CapacityExceeded {
                requested: doubled,
                max: self.max_capacity,
            });
        }
        log::debug!("growing heap from {} to {new_capacity} entries", self.capacity);
        self.entries.reserve_exact(new_capacity - self.entries.len());
        self.capacity = new_capacity;
        Ok(())
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 1 {
            let parent = position / 2;
            if !self.less(position, parent) {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        let last = self.entries.len();
        loop {
            let left = 2 * position;
            if left > last {
                break;
            }
            let right = left + 1;
            let smaller = if right <= last && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(smaller, position) {
                break;
            }
            self.swap(position, smaller);
            position = smaller;
        }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.entries[a - 1] < self.entries[b - 1]
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a - 1, b - 1);
    }
}
