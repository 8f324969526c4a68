//! Property-based testing strategies.
//!
//! Generates persons and sequences of roster operations for use with
//! `proptest`.

use crate::fixtures;
use event_roster_core::{Event, EventError, Participant};
use proptest::prelude::*;
use std::sync::Arc;

/// Strategy for person ids drawn from a small pool, so that generated
/// sequences hit duplicates and removals of registered persons.
pub fn person_id() -> impl Strategy<Value = String> {
    (0..8u8).prop_map(|index| format!("p{index}"))
}

/// Strategy for display names: one to three capitalised words
pub fn person_name() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Z][a-z]{1,8}", 1..=3).prop_map(|words| words.join(" "))
}

/// Strategy for valid participants
pub fn participant() -> impl Strategy<Value = Arc<Participant>> {
    (person_id(), person_name()).prop_map(|(id, name)| fixtures::participant(&id, &name))
}

/// One operation against an event roster
#[derive(Debug, Clone)]
pub enum RosterOp {
    /// Register a participant
    Add(Arc<Participant>),
    /// Unregister a participant
    Remove(Arc<Participant>),
    /// Cancel the event
    Cancel,
}

impl RosterOp {
    /// Applies the operation, discarding the boolean of a successful add
    ///
    /// # Errors
    ///
    /// Forwards the error of the underlying event operation.
    pub fn apply(&self, event: &mut Event) -> Result<(), EventError> {
        match self {
            Self::Add(participant) => event.add_participant(Arc::clone(participant)).map(|_| ()),
            Self::Remove(participant) => event.remove_participant(participant),
            Self::Cancel => event.cancel().map(|_| ()),
        }
    }
}

/// Strategy for a single operation; cancellation is comparatively rare
pub fn roster_op() -> impl Strategy<Value = RosterOp> {
    prop_oneof![
        6 => participant().prop_map(RosterOp::Add),
        3 => participant().prop_map(RosterOp::Remove),
        1 => Just(RosterOp::Cancel),
    ]
}

/// Strategy for operation sequences of up to `max_len` steps
pub fn roster_ops(max_len: usize) -> impl Strategy<Value = Vec<RosterOp>> {
    prop::collection::vec(roster_op(), 0..=max_len)
}

/// Strategy for a positive capacity smaller than the id pool, so that
/// generated sequences regularly fill the roster
pub fn capacity() -> impl Strategy<Value = u32> {
    1..=6u32
}
