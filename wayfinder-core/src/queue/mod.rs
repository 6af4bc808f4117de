//! Array-backed binary min-heap with an item-to-slot index.
//!
//! The index makes membership tests O(1) and lets A* lower the priority of a
//! frontier vertex in O(log n) without scanning the heap. Every structural
//! mutation goes through the private `place` and `swap` helpers, which keep
//! the entry array and the index in lockstep.

mod invariants;

use std::{cmp::Ordering, collections::HashMap, hash::Hash};

use tracing::trace;

use crate::error::QueueError;

pub use self::invariants::{QueueInvariant, QueueInvariantChecker, QueueInvariantViolation};

/// Smallest logical capacity the backing array shrinks to.
pub const MIN_CAPACITY: usize = 16;

#[derive(Clone, Debug)]
struct Entry<T> {
    item: T,
    priority: f64,
}

/// Binary min-heap over `(item, priority)` pairs that supports changing the
/// priority of an item after insertion.
///
/// Items are identified by equality and hash; each item may appear at most
/// once. The logical capacity doubles once the load factor reaches 0.75 and
/// halves when it falls to 0.25, never dropping below [`MIN_CAPACITY`].
///
/// # Examples
/// ```
/// use wayfinder_core::IndexedMinPriorityQueue;
///
/// let mut queue = IndexedMinPriorityQueue::new();
/// queue.add("b", 2.0)?;
/// queue.add("a", 3.0)?;
/// queue.change_priority(&"a", 1.0)?;
/// assert_eq!(queue.pop_min()?, "a");
/// assert_eq!(queue.pop_min()?, "b");
/// assert!(queue.is_empty());
/// # Ok::<(), wayfinder_core::QueueError>(())
/// ```
#[derive(Clone, Debug)]
pub struct IndexedMinPriorityQueue<T> {
    entries: Vec<Entry<T>>,
    slots: HashMap<T, usize>,
    capacity: usize,
}

impl<T: Clone + Eq + Hash> Default for IndexedMinPriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> IndexedMinPriorityQueue<T> {
    /// Creates an empty queue with the minimum capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MIN_CAPACITY),
            slots: HashMap::with_capacity(MIN_CAPACITY),
            capacity: MIN_CAPACITY,
        }
    }

    /// Returns the number of items in the queue.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Returns whether the queue holds no items.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Returns the logical capacity of the backing array.
    #[must_use]
    #[rustfmt::skip]
    pub fn capacity(&self) -> usize { self.capacity }

    /// Returns whether `item` is currently queued.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.slots.contains_key(item)
    }

    /// Returns the current priority of `item`, if it is queued.
    #[must_use]
    pub fn priority(&self, item: &T) -> Option<f64> {
        let slot = *self.slots.get(item)?;
        self.entries.get(slot).map(|entry| entry.priority)
    }

    /// Inserts `item` with the given priority.
    ///
    /// # Errors
    /// Returns [`QueueError::DuplicateItem`] when `item` is already queued and
    /// [`QueueError::NanPriority`] when `priority` is NaN. The queue is left
    /// untouched in both cases.
    pub fn add(&mut self, item: T, priority: f64) -> Result<(), QueueError> {
        if priority.is_nan() {
            return Err(QueueError::NanPriority);
        }
        if self.contains(&item) {
            return Err(QueueError::DuplicateItem);
        }

        let slot = self.entries.len();
        self.slots.insert(item.clone(), slot);
        self.entries.push(Entry { item, priority });
        self.swim(slot);

        // len / capacity >= 0.75
        if self.entries.len() * 4 >= self.capacity * 3 {
            self.resize(self.capacity * 2);
        }
        Ok(())
    }

    /// Returns the item with the smallest priority without removing it.
    ///
    /// # Errors
    /// Returns [`QueueError::Empty`] when the queue holds no items.
    pub fn peek_min(&self) -> Result<&T, QueueError> {
        self.entries
            .first()
            .map(|entry| &entry.item)
            .ok_or(QueueError::Empty)
    }

    /// Removes and returns the item with the smallest priority.
    ///
    /// # Errors
    /// Returns [`QueueError::Empty`] when the queue holds no items.
    pub fn pop_min(&mut self) -> Result<T, QueueError> {
        if self.entries.is_empty() {
            return Err(QueueError::Empty);
        }

        // Moves the last entry into the root slot.
        let Entry { item, .. } = self.entries.swap_remove(0);
        self.slots.remove(&item);
        if !self.entries.is_empty() {
            self.place(0);
            self.sink(0);
        }

        // len / capacity <= 0.25
        if self.capacity > MIN_CAPACITY && self.entries.len() * 4 <= self.capacity {
            self.resize(self.capacity / 2);
        }
        Ok(item)
    }

    /// Changes the priority of a queued item and restores heap order.
    ///
    /// A lower priority swims the item toward the root, a higher one sinks it
    /// toward the leaves, and an unchanged priority is a no-op.
    ///
    /// # Errors
    /// Returns [`QueueError::ItemNotFound`] when `item` is not queued and
    /// [`QueueError::NanPriority`] when `priority` is NaN.
    pub fn change_priority(&mut self, item: &T, priority: f64) -> Result<(), QueueError> {
        if priority.is_nan() {
            return Err(QueueError::NanPriority);
        }
        let slot = *self.slots.get(item).ok_or(QueueError::ItemNotFound)?;
        let entry = self
            .entries
            .get_mut(slot)
            .ok_or(QueueError::ItemNotFound)?;
        let previous = std::mem::replace(&mut entry.priority, priority);

        match priority.total_cmp(&previous) {
            Ordering::Less => self.swim(slot),
            Ordering::Greater => self.sink(slot),
            Ordering::Equal => {}
        }
        Ok(())
    }

    /// Returns a checker that validates the heap's structural invariants.
    ///
    /// # Examples
    /// ```
    /// use wayfinder_core::IndexedMinPriorityQueue;
    ///
    /// let mut queue = IndexedMinPriorityQueue::new();
    /// for (item, priority) in [(1, 5.0), (2, 1.0), (3, 3.0)] {
    ///     queue.add(item, priority)?;
    /// }
    /// queue.invariants().check_all().expect("heap must be valid");
    /// # Ok::<(), wayfinder_core::QueueError>(())
    /// ```
    #[must_use]
    pub fn invariants(&self) -> QueueInvariantChecker<'_, T> {
        QueueInvariantChecker::new(self)
    }

    fn swim(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = parent_of(slot);
            if !self.less(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sink(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = left_child_of(slot);
            if left >= len {
                break;
            }
            let right = left + 1;
            // Ties between children resolve to the left child.
            let child = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, slot) {
                break;
            }
            self.swap(slot, child);
            slot = child;
        }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        match (self.entries.get(a), self.entries.get(b)) {
            (Some(left), Some(right)) => left.priority.total_cmp(&right.priority).is_lt(),
            _ => false,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.place(a);
        self.place(b);
    }

    /// Points the index entry for the item at `slot` back at `slot`.
    fn place(&mut self, slot: usize) {
        if let Some(entry) = self.entries.get(slot)
            && let Some(recorded) = self.slots.get_mut(&entry.item)
        {
            *recorded = slot;
        }
    }

    fn resize(&mut self, capacity: usize) {
        trace!(
            from = self.capacity,
            to = capacity,
            len = self.entries.len(),
            "resizing priority queue"
        );
        if capacity > self.capacity {
            self.entries
                .reserve_exact(capacity.saturating_sub(self.entries.len()));
        } else {
            self.entries.shrink_to(capacity);
        }
        self.capacity = capacity;
    }
}

const fn parent_of(slot: usize) -> usize {
    (slot - 1) / 2
}

const fn left_child_of(slot: usize) -> usize {
    2 * slot + 1
}


#[cfg(test)]
mod property;
