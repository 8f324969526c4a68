//! Environment module - injected dependencies.
//!
//! Aggregates never read the system clock directly. Time is injected through
//! the [`Clock`] trait so that construction-time date validation stays
//! deterministic under test.

use chrono::{DateTime, Utc};

/// Clock trait - abstracts time operations for testability
///
/// # Examples
///
/// ```ignore
/// // Production - uses system clock
/// let clock = SystemClock;
///
/// // Test - fixed time for deterministic tests
/// struct FixedClock { time: DateTime<Utc> }
/// impl Clock for FixedClock {
///     fn now(&self) -> DateTime<Utc> {
///         self.time
///     }
/// }
/// ```
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by [`Utc::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
