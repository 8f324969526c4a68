//! Fixture builders for persons and events.
//!
//! Every event fixture is dated 30 days after [`test_clock`] and built
//! against that clock, so construction never trips the past-date check.

#![allow(clippy::expect_used)] // Fixtures only build known-valid values

use crate::mocks::test_clock;
use chrono::{DateTime, Duration, Utc};
use event_roster_core::{Event, EventDetails, Intervenant, Participant};
use std::sync::Arc;

/// Date used by the event fixtures
#[must_use]
pub fn event_date() -> DateTime<Utc> {
    use event_roster_core::Clock;
    test_clock().now() + Duration::days(30)
}

/// Shared participant with email `<id>@example.org`
///
/// # Panics
///
/// Panics if `id` or `name` is blank.
#[must_use]
pub fn participant(id: &str, name: &str) -> Arc<Participant> {
    Arc::new(
        Participant::new(id, name, format!("{id}@example.org"))
            .expect("fixture participant should be valid"),
    )
}

/// `count` distinct participants with ids `p0..p{count-1}`
#[must_use]
pub fn participants(count: usize) -> Vec<Arc<Participant>> {
    (0..count)
        .map(|index| participant(&format!("p{index}"), &format!("Participant {index}")))
        .collect()
}

/// Shared speaker
///
/// # Panics
///
/// Panics if any argument is blank.
#[must_use]
pub fn speaker(id: &str, name: &str, specialty: &str) -> Arc<Intervenant> {
    Arc::new(Intervenant::new(id, name, specialty).expect("fixture speaker should be valid"))
}

/// Shared event fields with the given id and capacity
#[must_use]
pub fn details(id: &str, capacity: u32) -> EventDetails {
    EventDetails::new(id, "Fixture Event", event_date(), "Main Hall", capacity)
}

/// Conference `conf-1` on "AI" with the given capacity
///
/// # Panics
///
/// Panics if `capacity` is zero.
#[must_use]
pub fn conference(capacity: u32) -> Event {
    Event::conference(details("conf-1", capacity), "AI", &test_clock())
        .expect("fixture conference should be valid")
}

/// Concert `concert-1` by "Daft Punk" with the given capacity
///
/// # Panics
///
/// Panics if `capacity` is zero.
#[must_use]
pub fn concert(capacity: u32) -> Event {
    Event::concert(details("concert-1", capacity), "Daft Punk", "Electronic", &test_clock())
        .expect("fixture concert should be valid")
}
