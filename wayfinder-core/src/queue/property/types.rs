//! Operation plans consumed by the queue mutation property.

use test_strategy::Arbitrary;

/// Upper bound (exclusive) on generated item identifiers. Kept small so
/// duplicate inserts and priority changes hit queued items often.
pub(super) const ITEM_SPACE: u16 = 48;

/// A single queue operation drawn by proptest.
///
/// Priorities are small integers so equal priorities, and therefore the
/// sink tie-break, are exercised regularly.
#[derive(Clone, Copy, Debug, Arbitrary)]
pub(super) enum QueueOperation {
    /// Insert an item, expecting a duplicate error when it is already queued.
    #[weight(4)]
    Add {
        #[strategy(0..ITEM_SPACE)]
        item: u16,
        #[strategy(-64_i32..64)]
        priority: i32,
    },
    /// Remove the minimum item.
    #[weight(3)]
    PopMin,
    /// Change the priority of an item, expecting not-found when absent.
    #[weight(3)]
    ChangePriority {
        #[strategy(0..ITEM_SPACE)]
        item: u16,
        #[strategy(-64_i32..64)]
        priority: i32,
    },
    /// Inspect the minimum without removing it.
    #[weight(1)]
    PeekMin,
}

/// Sequence of operations replayed against a fresh queue.
#[derive(Clone, Debug, Arbitrary)]
pub(super) struct QueuePlan {
    #[strategy(proptest::collection::vec(proptest::arbitrary::any::<QueueOperation>(), 1..200))]
    pub(super) operations: Vec<QueueOperation>,
}
