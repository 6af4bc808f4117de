//! Property-based tests for the indexed priority queue.
//!
//! Replays randomized operation plans against the queue and a flat reference
//! model, revalidating heap order and index consistency after every step.

mod mutation;
mod types;
