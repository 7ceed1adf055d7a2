use crate::error::{GraphError, Result};
use crate::hasher::SpookyBuildHasher;
use std::hash::{BuildHasher, Hash};
use std::mem;

/// Slot count of a table built with [`HashMap::new`].
pub const DEFAULT_TABLE_CAPACITY: usize = 444;
/// Largest slot count a table built with [`HashMap::new`] may grow to.
pub const MAX_TABLE_CAPACITY: usize = 1 << 24;

/// Live entries over capacity must stay below `LOAD_NUMERATOR / LOAD_DENOMINATOR`.
const LOAD_NUMERATOR: usize = 3;
const LOAD_DENOMINATOR: usize = 4;

struct Entry<K, V> {
    key: K,
    value: V,
}

enum Slot<K, V> {
    Empty,
    /// Previously occupied; keeps probe runs unbroken.
    Tombstone,
    Occupied(Entry<K, V>),
}

enum Probe {
    Found(usize),
    Vacant(usize),
    /// Every slot was scanned without meeting the key or a free slot.
    Full,
}

/// An open-addressing map with linear probing and tombstone deletion.
///
/// Keys are placed starting at their home bucket (`hash % capacity`) and
/// probe forward, wrapping at the end of the table. Removal leaves a
/// tombstone so later keys of the same probe run stay reachable.
///
/// The table never shrinks. Before a new key is placed, the table grows to
/// the next prime above twice its capacity if the key would bring the load
/// factor to 75%, or is rehashed in place when tombstones alone would.
///
/// # Type Parameters
///
/// * `K` - Key type, compared with `Eq` and hashed with `S`.
/// * `V` - Value type.
/// * `S` - Hasher builder, [`SpookyBuildHasher`] by default.
///
/// # Example
///
/// ```
/// use route_graph::HashMap;
///
/// let mut airports: HashMap<&str, &str> = HashMap::new();
/// assert_eq!(airports.insert("LAX", "Los Angeles").unwrap(), None);
/// assert_eq!(airports.insert("LAX", "Los Angeles Intl").unwrap(), Some("Los Angeles"));
/// assert_eq!(airports.get(&"LAX"), Some(&"Los Angeles Intl"));
/// ```
pub struct HashMap<K, V, S = SpookyBuildHasher> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    tombstones: usize,
    collisions: usize,
    max_capacity: usize,
    hash_builder: S,
}

impl<K: Hash + Eq, V> HashMap<K, V> {
    pub fn new() -> Self {
        Self::from_parts(DEFAULT_TABLE_CAPACITY, MAX_TABLE_CAPACITY, SpookyBuildHasher)
    }

    /// Creates a table with `capacity` slots that may grow up to `max_capacity`.
    ///
    /// # Errors
    ///
    /// [`GraphError::CapacityExceeded`] if `capacity` is above `max_capacity`.
    pub fn with_limits(capacity: usize, max_capacity: usize) -> Result<Self> {
        Self::with_limits_and_hasher(capacity, max_capacity, SpookyBuildHasher)
    }
}

impl<K: Hash + Eq, V> Default for HashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> HashMap<K, V, S> {
    pub fn with_limits_and_hasher(
        capacity: usize,
        max_capacity: usize,
        hash_builder: S,
    ) -> Result<Self> {
        let capacity = capacity.max(1);
        if capacity > max_capacity {
            return Err(GraphError::CapacityExceeded {
                requested: capacity,
                max: max_capacity,
            });
        }
        Ok(Self::from_parts(capacity, max_capacity, hash_builder))
    }

    fn from_parts(capacity: usize, max_capacity: usize, hash_builder: S) -> Self {
        HashMap {
            slots: empty_slots(capacity),
            len: 0,
            tombstones: 0,
            collisions: 0,
            max_capacity,
            hash_builder,
        }
    }

    /// Inserts `value` under `key`.
    ///
    /// Returns the previous value if the key was present, in which case the
    /// entry count does not change.
    ///
    /// # Errors
    ///
    /// [`GraphError::CapacityExceeded`] if placing a new key requires
    /// growing past the maximum capacity. The map is left unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let home = self.home_index(&key);
        let mut vacant = match self.probe(&key, home) {
            Probe::Found(index) => {
                if let Slot::Occupied(entry) = &mut self.slots[index] {
                    return Ok(Some(mem::replace(&mut entry.value, value)));
                }
                None
            }
            Probe::Vacant(index) => Some(index),
            Probe::Full => None,
        };

        if vacant.is_none() || self.needs_maintenance() {
            self.rehash()?;
            let home = self.home_index(&key);
            vacant = self.first_free(home);
        }

        let index = vacant.ok_or(GraphError::CapacityExceeded {
            requested: self.len + 1,
            max: self.max_capacity,
        })?;
        if matches!(self.slots[index], Slot::Tombstone) {
            self.tombstones -= 1;
        }
        if index != self.home_index(&key) {
            self.collisions += 1;
        }
        self.slots[index] = Slot::Occupied(Entry { key, value });
        self.len += 1;
        Ok(None)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        match self.probe(key, self.home_index(key)) {
            Probe::Found(index) => match &self.slots[index] {
                Slot::Occupied(entry) => Some(&entry.value),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.probe(key, self.home_index(key)) {
            Probe::Found(index) => match &mut self.slots[index] {
                Slot::Occupied(entry) => Some(&mut entry.value),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        matches!(self.probe(key, self.home_index(key)), Probe::Found(_))
    }

    /// Removes `key`, leaving a tombstone in its slot.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let Probe::Found(index) = self.probe(key, self.home_index(key)) else {
            return None;
        };
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.len -= 1;
                self.tombstones += 1;
                Some(entry.value)
            }
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    /// Drops every entry. The capacity is kept.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = Slot::Empty);
        self.len = 0;
        self.tombstones = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Number of insertions that landed outside their home bucket.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Live entries in bucket order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.slots.iter_mut().filter_map(|slot| match slot {
            Slot::Occupied(entry) => Some(&mut entry.value),
            _ => None,
        })
    }

    fn home_index(&self, key: &K) -> usize {
        (self.hash_builder.hash_one(key) % self.slots.len() as u64) as usize
    }

    /// Scans from `home` until the key, an empty slot, or a full lap.
    /// A vacant result points at the first tombstone seen, if any.
    fn probe(&self, key: &K, home: usize) -> Probe {
        let capacity = self.slots.len();
        let mut first_tombstone = None;
        let mut index = home;
        for _ in 0..capacity {
            match &self.slots[index] {
                Slot::Empty => return Probe::Vacant(first_tombstone.unwrap_or(index)),
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(index);
                }
                Slot::Occupied(entry) if entry.key == *key => return Probe::Found(index),
                Slot::Occupied(_) => {}
            }
            index = (index + 1) % capacity;
        }
        first_tombstone.map_or(Probe::Full, Probe::Vacant)
    }

    fn first_free(&self, home: usize) -> Option<usize> {
        let capacity = self.slots.len();
        (0..capacity)
            .map(|offset| (home + offset) % capacity)
            .find(|&index| !matches!(self.slots[index], Slot::Occupied(_)))
    }

    fn needs_maintenance(&self) -> bool {
        reaches_load_limit(self.len + self.tombstones + 1, self.slots.len())
    }

    /// Rebuilds the table, growing it if one more live entry would reach the
    /// load limit. Tombstones are discarded.
    fn rehash(&mut self) -> Result<()> {
        let old_capacity = self.slots.len();
        let new_capacity = if reaches_load_limit(self.len + 1, old_capacity) {
            let grown = next_prime(old_capacity.saturating_mul(2));
            if grown > self.max_capacity {
                return Err(GraphError::CapacityExceeded {
                    requested: grown,
                    max: self.max_capacity,
                });
            }
            grown
        } else {
            old_capacity
        };
        log::debug!(
            "rehashing table of {} entries ({} tombstones) from {old_capacity} to {new_capacity} slots",
            self.len,
            self.tombstones
        );

        let old_slots = mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.tombstones = 0;
        for slot in old_slots {
            if let Slot::Occupied(entry) = slot {
                let home = self.home_index(&entry.key);
                if let Some(index) = self.first_free(home) {
                    self.slots[index] = Slot::Occupied(entry);
                }
            }
        }
        Ok(())
    }
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

fn reaches_load_limit(entries: usize, capacity: usize) -> bool {
    entries.saturating_mul(LOAD_DENOMINATOR) >= capacity.saturating_mul(LOAD_NUMERATOR)
}

fn is_prime(number: usize) -> bool {
    if number <= 3 {
        return number > 1;
    }
    if number % 2 == 0 || number % 3 == 0 {
        return false;
    }
    let mut divisor = 5;
    while divisor * divisor <= number {
        if number % divisor == 0 || number % (divisor + 2) == 0 {
            return false;
        }
        divisor += 6;
    }
    true
}

/// Smallest prime strictly greater than `number`.
fn next_prime(number: usize) -> usize {
    let mut candidate = number.saturating_add(1);
    while !is_prime(candidate) && candidate < usize::MAX {
        candidate += 1;
    }
    candidate
}

/// Iterator over the live entries of a [`HashMap`], in bucket order.
pub struct Iter<'a, K, V> {
    slots: std::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(entry) = slot {
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a HashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
