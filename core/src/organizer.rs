//! Organizers and the events they run.
//!
//! An organizer is a participant plus an append-only list of the events it
//! organizes. The relation is kept as event ids: the organizer does not own
//! the events, and there is no removal or ownership transfer.

use crate::error::Result;
use crate::event::{Event, EventId};
use crate::person::{Participant, PersonId};
use serde::{Deserialize, Serialize};

/// A participant who organizes events
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    person: Participant,
    #[serde(default)]
    organized: Vec<EventId>,
}

impl Organizer {
    /// Creates an organizer with no events
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` under the same rules as [`Participant::new`].
    pub fn new(
        id: impl AsRef<str>,
        name: impl AsRef<str>,
        email: impl AsRef<str>,
    ) -> Result<Self> {
        Ok(Self::from_participant(Participant::new(id, name, email)?))
    }

    /// Promotes an existing participant
    #[must_use]
    pub const fn from_participant(person: Participant) -> Self {
        Self {
            person,
            organized: Vec::new(),
        }
    }

    /// Identity and contact details
    #[must_use]
    pub const fn person(&self) -> &Participant {
        &self.person
    }

    /// Shortcut for `person().id()`
    #[must_use]
    pub const fn id(&self) -> &PersonId {
        self.person.id()
    }

    /// Appends an event to the organized list
    pub fn record_event(&mut self, event: &Event) {
        tracing::debug!(
            organizer_id = %self.person.id(),
            event_id = %event.id(),
            "Event recorded for organizer"
        );
        self.organized.push(event.id().clone());
    }

    /// Events organized, in the order they were recorded
    #[must_use]
    pub fn organized_events(&self) -> &[EventId] {
        &self.organized
    }

    /// Number of recorded events
    #[must_use]
    pub fn organized_count(&self) -> usize {
        self.organized.len()
    }

    /// Whether the organizer runs the event with this id
    #[must_use]
    pub fn organizes(&self, event: &EventId) -> bool {
        self.organized.contains(event)
    }
}
