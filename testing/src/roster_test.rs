//! Ergonomic testing utilities for event operations
//!
//! This module provides a fluent API for testing roster and lifecycle
//! operations with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // RosterTest is the natural name

use crate::mocks::RecordingListener;
use event_roster_core::{Event, EventError};
use std::sync::Arc;

/// Outcome of the operation under test
pub type Outcome = Result<(), EventError>;

type Operation = Box<dyn FnOnce(&mut Event) -> Outcome>;
type EventAssertion = Box<dyn FnOnce(&Event)>;
type MessageAssertion = Box<dyn FnOnce(&[String])>;
type OutcomeAssertion = Box<dyn FnOnce(&Outcome)>;

/// Fluent API for testing event operations with Given-When-Then syntax
///
/// A [`RecordingListener`] is subscribed to the event right before the
/// operation runs, so message assertions only see what the operation
/// broadcast.
///
/// # Example
///
/// ```ignore
/// RosterTest::new()
///     .given_event(fixtures::concert(1))
///     .when(|event| event.cancel().map(|_| ()))
///     .then_outcome(|outcome| assert!(outcome.is_ok()))
///     .then_event(|event| assert!(event.is_cancelled()))
///     .run();
/// ```
#[derive(Default)]
pub struct RosterTest {
    event: Option<Event>,
    operation: Option<Operation>,
    event_assertions: Vec<EventAssertion>,
    message_assertions: Vec<MessageAssertion>,
    outcome_assertions: Vec<OutcomeAssertion>,
}

impl RosterTest {
    /// Create an empty test
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the event under test (Given)
    #[must_use]
    pub fn given_event(mut self, event: Event) -> Self {
        self.event = Some(event);
        self
    }

    /// Set the operation to run (When)
    #[must_use]
    pub fn when<F>(mut self, operation: F) -> Self
    where
        F: FnOnce(&mut Event) -> Outcome + 'static,
    {
        self.operation = Some(Box::new(operation));
        self
    }

    /// Add an assertion about the resulting event (Then)
    #[must_use]
    pub fn then_event<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&Event) + 'static,
    {
        self.event_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the broadcast messages (Then)
    #[must_use]
    pub fn then_messages<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[String]) + 'static,
    {
        self.message_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the operation result (Then)
    #[must_use]
    pub fn then_outcome<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&Outcome) + 'static,
    {
        self.outcome_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if the event or operation is not set, or if any assertion
    /// fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut event = self.event.expect("Event must be set with given_event()");
        let operation = self.operation.expect("Operation must be set with when()");

        let recorder = Arc::new(RecordingListener::new());
        event.subscribe(recorder.clone());

        let outcome = operation(&mut event);

        for assertion in self.outcome_assertions {
            assertion(&outcome);
        }
        for assertion in self.event_assertions {
            assertion(&event);
        }
        let messages = recorder.messages();
        for assertion in self.message_assertions {
            assertion(&messages);
        }
    }
}

/// Helper assertions for operation outcomes
pub mod assertions {
    use super::Outcome;
    use event_roster_core::{ErrorKind, Event};

    /// Assert that the operation failed with the given kind
    ///
    /// # Panics
    ///
    /// Panics if the outcome is `Ok` or has a different kind.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_error_kind(outcome: &Outcome, expected: ErrorKind) {
        match outcome {
            Ok(()) => panic!("Expected {expected:?}, but the operation succeeded"),
            Err(error) => assert_eq!(
                error.kind(),
                expected,
                "Expected {expected:?}, got {error}"
            ),
        }
    }

    /// Assert that the roster respects the capacity
    ///
    /// # Panics
    ///
    /// Panics if the roster is larger than the capacity.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_within_capacity(event: &Event) {
        let capacity = usize::try_from(event.capacity()).unwrap_or(usize::MAX);
        assert!(
            event.participant_count() <= capacity,
            "Roster size {} exceeds capacity {}",
            event.participant_count(),
            capacity
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use event_roster_core::ErrorKind;

    #[test]
    fn test_roster_test_add() {
        let ada = fixtures::participant("p1", "Ada");

        RosterTest::new()
            .given_event(fixtures::conference(2))
            .when(move |event| event.add_participant(ada).map(|_| ()))
            .then_outcome(|outcome| assert!(outcome.is_ok()))
            .then_event(|event| assert_eq!(event.participant_count(), 1))
            .then_event(assertions::assert_within_capacity)
            .then_messages(|messages| assert_eq!(messages, ["new participant added: Ada"]))
            .run();
    }

    #[test]
    fn test_roster_test_failure() {
        RosterTest::new()
            .given_event(fixtures::concert(1))
            .when(|event| {
                event.cancel()?;
                event.cancel().map(|_| ())
            })
            .then_outcome(|outcome| assertions::assert_error_kind(outcome, ErrorKind::IllegalState))
            .then_messages(|messages| assert_eq!(messages.len(), 1))
            .run();
    }
}
