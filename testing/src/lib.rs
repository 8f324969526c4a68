//! # Event Roster Testing
//!
//! Testing utilities and helpers for the event roster aggregate.
//!
//! This crate provides:
//! - Deterministic clock and recording/failing listeners
//! - Fixture builders for persons and events
//! - A Given-When-Then harness for event operations
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```
//! use event_roster_testing::{RosterTest, fixtures};
//!
//! let ada = fixtures::participant("p1", "Ada");
//!
//! RosterTest::new()
//!     .given_event(fixtures::conference(2))
//!     .when(move |event| event.add_participant(ada).map(|_| ()))
//!     .then_event(|event| assert_eq!(event.participant_count(), 1))
//!     .then_messages(|messages| assert_eq!(messages, ["new participant added: Ada"]))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use event_roster_core::environment::Clock;
use event_roster_core::observer::{Listener, ListenerError, NotificationService};
use std::sync::Mutex;

pub mod fixtures;
pub mod properties;
mod roster_test;

pub use roster_test::{RosterTest, assertions};

/// Mock implementations of environment and observer traits
pub mod mocks {
    use super::{Clock, DateTime, Listener, ListenerError, Mutex, NotificationService, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use event_roster_testing::mocks::FixedClock;
    /// use event_roster_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Listener that keeps every message it receives
    #[derive(Debug, Default)]
    pub struct RecordingListener {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingListener {
        /// Create an empty recorder
        #[must_use]
        pub const fn new() -> Self {
            Self {
                messages: Mutex::new(Vec::new()),
            }
        }

        /// Messages received so far, in order
        #[must_use]
        pub fn messages(&self) -> Vec<String> {
            self.messages
                .lock()
                .map(|messages| messages.clone())
                .unwrap_or_default()
        }

        /// Number of messages received
        #[must_use]
        pub fn count(&self) -> usize {
            self.messages.lock().map(|messages| messages.len()).unwrap_or(0)
        }
    }

    impl Listener for RecordingListener {
        fn notify(&self, message: &str) -> Result<(), ListenerError> {
            self.messages
                .lock()
                .map_err(|_| ListenerError::Delivery("recorder poisoned".to_string()))?
                .push(message.to_string());
            Ok(())
        }
    }

    impl NotificationService for RecordingListener {
        fn send(&self, message: &str) -> Result<(), ListenerError> {
            self.notify(message)
        }
    }

    /// Listener whose delivery always fails
    #[derive(Debug, Clone, Default)]
    pub struct FailingListener;

    impl Listener for FailingListener {
        fn notify(&self, _message: &str) -> Result<(), ListenerError> {
            Err(ListenerError::Delivery("simulated outage".to_string()))
        }
    }

    /// Listener that panics on every message
    #[derive(Debug, Clone, Default)]
    pub struct PanickingListener;

    impl Listener for PanickingListener {
        #[allow(clippy::panic)] // Simulates a misbehaving listener
        fn notify(&self, message: &str) -> Result<(), ListenerError> {
            panic!("listener panicked on {message:?}");
        }
    }
}

// Re-export commonly used items
pub use mocks::{FailingListener, FixedClock, PanickingListener, RecordingListener, test_clock};

/// Install a `tracing` subscriber for test output, once per process.
///
/// Honours `RUST_LOG`; defaults to `event_roster_core=debug`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "event_roster_core=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_recording_listener() {
        let listener = RecordingListener::new();
        assert!(listener.notify("one").is_ok());
        assert!(listener.send("two").is_ok());
        assert_eq!(listener.messages(), vec!["one", "two"]);
        assert_eq!(listener.count(), 2);
    }

    #[test]
    fn test_failing_listener() {
        assert!(FailingListener.notify("x").is_err());
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
