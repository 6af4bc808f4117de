//! Structural invariant checks for the indexed priority queue.
//!
//! The checkers are surfaced via [`IndexedMinPriorityQueue::invariants`] so
//! property-based tests can assert heap health after each operation without
//! reaching into private state.

use std::hash::Hash;

use thiserror::Error;

use super::{IndexedMinPriorityQueue, MIN_CAPACITY, parent_of};

/// Enumerates the structural invariants enforced by the priority queue.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueueInvariant {
    /// Every non-root slot has a priority no smaller than its parent's.
    HeapOrder,
    /// The index maps every queued item to the slot that holds it, and holds
    /// nothing else.
    IndexConsistency,
    /// The logical capacity stays within its load-factor bounds.
    CapacityBounds,
}

impl QueueInvariant {
    /// Returns all invariants in the order they should be evaluated.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::IndexConsistency, Self::HeapOrder, Self::CapacityBounds]
    }
}

/// Reports an invariant violation surfaced by [`QueueInvariantChecker`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum QueueInvariantViolation {
    /// A child slot holds a smaller priority than its parent.
    #[error("slot {slot} has priority {priority}, below parent slot {parent} at {parent_priority}")]
    HeapOrder {
        /// Child slot breaking the order.
        slot: usize,
        /// Parent of [`QueueInvariantViolation::HeapOrder::slot`].
        parent: usize,
        /// Priority stored at the child slot.
        priority: f64,
        /// Priority stored at the parent slot.
        parent_priority: f64,
    },
    /// The index records a different slot for the item held at `slot`.
    #[error("item at slot {slot} is indexed at {recorded:?}")]
    StaleIndex {
        /// Slot actually holding the item.
        slot: usize,
        /// Slot recorded by the index, if any.
        recorded: Option<usize>,
    },
    /// The index tracks a different number of items than the heap holds.
    #[error("index tracks {indexed} item(s) but the heap holds {entries}")]
    IndexSizeMismatch {
        /// Entries stored in the heap array.
        entries: usize,
        /// Items tracked by the index.
        indexed: usize,
    },
    /// The logical capacity is outside the bounds implied by the load factor.
    #[error("capacity {capacity} is out of bounds for {len} item(s)")]
    CapacityOutOfBounds {
        /// Items stored in the heap.
        len: usize,
        /// Logical capacity of the backing array.
        capacity: usize,
    },
}

/// Helper returned by [`IndexedMinPriorityQueue::invariants`] to run
/// structural checks.
#[derive(Debug)]
pub struct QueueInvariantChecker<'queue, T> {
    queue: &'queue IndexedMinPriorityQueue<T>,
}

impl<'queue, T: Clone + Eq + Hash> QueueInvariantChecker<'queue, T> {
    pub(super) fn new(queue: &'queue IndexedMinPriorityQueue<T>) -> Self {
        Self { queue }
    }

    /// Runs all invariants, returning the first violation encountered.
    ///
    /// # Errors
    /// Returns the first [`QueueInvariantViolation`] found.
    pub fn check_all(&self) -> Result<(), QueueInvariantViolation> {
        self.check_many(QueueInvariant::all())
    }

    /// Runs a custom subset of invariants in the provided order.
    ///
    /// # Errors
    /// Returns the first [`QueueInvariantViolation`] found.
    pub fn check_many(
        &self,
        invariants: impl IntoIterator<Item = QueueInvariant>,
    ) -> Result<(), QueueInvariantViolation> {
        for invariant in invariants {
            self.check(invariant)?;
        }
        Ok(())
    }

    /// Runs a single invariant.
    ///
    /// # Errors
    /// Returns a [`QueueInvariantViolation`] describing the broken invariant.
    pub fn check(&self, invariant: QueueInvariant) -> Result<(), QueueInvariantViolation> {
        match invariant {
            QueueInvariant::HeapOrder => self.check_heap_order(),
            QueueInvariant::IndexConsistency => self.check_index_consistency(),
            QueueInvariant::CapacityBounds => self.check_capacity_bounds(),
        }
    }

    fn check_heap_order(&self) -> Result<(), QueueInvariantViolation> {
        let entries = &self.queue.entries;
        for (slot, entry) in entries.iter().enumerate().skip(1) {
            let parent = parent_of(slot);
            let Some(parent_entry) = entries.get(parent) else {
                continue;
            };
            if entry.priority < parent_entry.priority {
                return Err(QueueInvariantViolation::HeapOrder {
                    slot,
                    parent,
                    priority: entry.priority,
                    parent_priority: parent_entry.priority,
                });
            }
        }
        Ok(())
    }

    fn check_index_consistency(&self) -> Result<(), QueueInvariantViolation> {
        let entries = &self.queue.entries;
        let slots = &self.queue.slots;
        if entries.len() != slots.len() {
            return Err(QueueInvariantViolation::IndexSizeMismatch {
                entries: entries.len(),
                indexed: slots.len(),
            });
        }
        for (slot, entry) in entries.iter().enumerate() {
            let recorded = slots.get(&entry.item).copied();
            if recorded != Some(slot) {
                return Err(QueueInvariantViolation::StaleIndex { slot, recorded });
            }
        }
        Ok(())
    }

    fn check_capacity_bounds(&self) -> Result<(), QueueInvariantViolation> {
        let len = self.queue.entries.len();
        let capacity = self.queue.capacity;
        // Growth keeps the load below 0.75; shrinking only stops at the floor.
        let within_load = len * 4 < capacity * 3;
        let above_floor = capacity >= MIN_CAPACITY;
        let not_oversized = capacity == MIN_CAPACITY || len * 4 > capacity;
        if within_load && above_floor && not_oversized {
            return Ok(());
        }
        Err(QueueInvariantViolation::CapacityOutOfBounds { len, capacity })
    }
}
