//! Stateful mutation property covering add/pop/change sequences.
//!
//! The reference model is a flat map from item to priority. Because equal
//! priorities are common, popped items are compared by priority rather than
//! identity: the queue may surface any item holding the minimum priority.

use std::collections::HashMap;

use proptest::{prop_assert, prop_assert_eq, test_runner::{TestCaseError, TestCaseResult}};
use tracing::debug;

use super::types::{QueueOperation, QueuePlan};
use crate::{IndexedMinPriorityQueue, QueueError};

pub(super) fn run_mutation_property(plan: &QueuePlan) -> TestCaseResult {
    let mut queue = IndexedMinPriorityQueue::new();
    let mut model: HashMap<u16, f64> = HashMap::new();

    for (step, operation) in plan.operations.iter().enumerate() {
        apply(&mut queue, &mut model, *operation)?;
        queue.invariants().check_all().map_err(|err| {
            debug!(step, operation = ?operation, %err, "invariants failed after queue step");
            TestCaseError::fail(format!(
                "invariants failed after step {step} ({operation:?}): {err}"
            ))
        })?;
        prop_assert_eq!(queue.len(), model.len());
        for (item, priority) in &model {
            prop_assert_eq!(queue.priority(item), Some(*priority));
        }
    }
    Ok(())
}

fn apply(
    queue: &mut IndexedMinPriorityQueue<u16>,
    model: &mut HashMap<u16, f64>,
    operation: QueueOperation,
) -> TestCaseResult {
    match operation {
        QueueOperation::Add { item, priority } => {
            let priority = f64::from(priority);
            let result = queue.add(item, priority);
            if model.contains_key(&item) {
                prop_assert_eq!(result, Err(QueueError::DuplicateItem));
            } else {
                prop_assert_eq!(result, Ok(()));
                model.insert(item, priority);
            }
        }
        QueueOperation::PopMin => match min_priority(model) {
            None => prop_assert_eq!(queue.pop_min(), Err(QueueError::Empty)),
            Some(expected) => {
                let popped = queue
                    .pop_min()
                    .map_err(|err| TestCaseError::fail(format!("pop_min failed: {err}")))?;
                let removed = model.remove(&popped);
                prop_assert_eq!(removed, Some(expected));
                prop_assert!(!queue.contains(&popped));
            }
        },
        QueueOperation::ChangePriority { item, priority } => {
            let priority = f64::from(priority);
            let result = queue.change_priority(&item, priority);
            if let Some(slot) = model.get_mut(&item) {
                prop_assert_eq!(result, Ok(()));
                *slot = priority;
            } else {
                prop_assert_eq!(result, Err(QueueError::ItemNotFound));
            }
        }
        QueueOperation::PeekMin => match min_priority(model) {
            None => prop_assert_eq!(queue.peek_min(), Err(QueueError::Empty)),
            Some(expected) => {
                let peeked = *queue
                    .peek_min()
                    .map_err(|err| TestCaseError::fail(format!("peek_min failed: {err}")))?;
                prop_assert_eq!(model.get(&peeked).copied(), Some(expected));
            }
        },
    }
    Ok(())
}

fn min_priority(model: &HashMap<u16, f64>) -> Option<f64> {
    model.values().copied().min_by(f64::total_cmp)
}

/// Pops every item and checks priorities come out in non-decreasing order.
pub(super) fn run_sorted_extraction_property(priorities: &[i32]) -> TestCaseResult {
    let mut queue = IndexedMinPriorityQueue::new();
    for (item, priority) in priorities.iter().enumerate() {
        queue
            .add(item, f64::from(*priority))
            .map_err(|err| TestCaseError::fail(format!("add {item} failed: {err}")))?;
    }

    let mut previous = f64::NEG_INFINITY;
    let mut popped = 0_usize;
    while let Ok(item) = queue.pop_min() {
        let priority = priorities
            .get(item)
            .copied()
            .map(f64::from)
            .ok_or_else(|| TestCaseError::fail(format!("popped unknown item {item}")))?;
        prop_assert!(
            priority >= previous,
            "item {} with priority {} popped after priority {}",
            item,
            priority,
            previous
        );
        previous = priority;
        popped += 1;
    }
    prop_assert_eq!(popped, priorities.len());
    Ok(())
}
