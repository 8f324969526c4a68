//! # Event Roster Core
//!
//! In-memory aggregate for scheduled events (conferences, concerts) and their
//! attendee rosters.
//!
//! ## Core Concepts
//!
//! - **Person**: [`Participant`] and [`Intervenant`] value objects, equal by id
//! - **Event**: the [`Event`] aggregate, a closed set of variants
//!   ([`EventKind::Conference`], [`EventKind::Concert`]) sharing one roster,
//!   one capacity and one cancellation flag
//! - **Observer**: a per-event [`Notifier`] that broadcasts text messages to
//!   [`Listener`]s after every successful change
//! - **Organizer**: a participant plus the ids of the events it organizes
//! - **Environment**: time is injected through [`Clock`]
//!
//! ## Architecture Principles
//!
//! - Constructors validate everything; an invalid event never exists
//! - Operations are synchronous and run to completion
//! - No I/O: cancellation returns a [`CancellationReport`] for the host to
//!   render
//! - No locking: hosts that share an event across threads serialize access
//!   themselves (one mutex or actor per event)
//!
//! ## Example
//!
//! ```
//! use event_roster_core::{Event, EventDetails, Participant, SystemClock};
//! use chrono::{Duration, Utc};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), event_roster_core::EventError> {
//! let details = EventDetails::new(
//!     "evt-1",
//!     "RustConf",
//!     Utc::now() + Duration::days(30),
//!     "Lyon",
//!     2,
//! );
//! let mut event = Event::conference(details, "Systems programming", &SystemClock)?;
//!
//! let ada = Arc::new(Participant::new("p1", "Ada Lovelace", "ada@example.org")?);
//! event.add_participant(Arc::clone(&ada))?;
//! assert_eq!(event.participant_count(), 1);
//!
//! let report = event.cancel()?;
//! assert_eq!(report.affected_participants, 1);
//! assert!(event.add_participant(ada).is_err());
//! # Ok(())
//! # }
//! ```

pub mod environment;
pub mod error;
pub mod event;
pub mod observer;
pub mod organizer;
pub mod person;

// Re-export commonly used types
pub use environment::{Clock, SystemClock};
pub use error::{ErrorKind, EventError};
pub use event::{
    CancellationDetails, CancellationReport, Concert, Conference, Event, EventDetails, EventId,
    EventKind, EventVariant, Notification, SpeakerSummary,
};
pub use observer::{
    Delivery, DeliveryFailure, Listener, ListenerError, ListenerHandle, NotificationService,
    Notifier, ParticipantListener,
};
pub use organizer::Organizer;
pub use person::{EmailAddress, Intervenant, Participant, PersonId};
