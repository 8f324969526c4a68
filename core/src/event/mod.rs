//! Event aggregate: roster, capacity and cancellation.
//!
//! An [`Event`] is created fully validated and changes only through the
//! operations below. Each successful change is broadcast to the event's
//! listeners.
//!
//! # Invariants
//!
//! - `participants().len() <= capacity()` after every operation
//! - the roster (and a conference's speaker list) holds no two persons with
//!   the same id
//! - `cancelled` goes from `false` to `true` exactly once; afterwards nothing
//!   can be added, but removals are still allowed
//!
//! # Lifecycle
//!
//! ```text
//!   ┌──────────┐   cancel()   ┌───────────┐
//!   │  Active  │ ───────────► │ Cancelled │ ──cancel()──► IllegalState
//!   └──────────┘              └───────────┘
//!    add / remove              remove only
//! ```

mod notification;
mod record;
mod report;

pub use notification::Notification;
pub use report::{CancellationDetails, CancellationReport, SpeakerSummary};

use crate::environment::Clock;
use crate::error::{EventError, Result, require_non_blank};
use crate::observer::{ListenerHandle, Notifier};
use crate::person::{Intervenant, Participant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque, non-empty event identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventId(String);

impl EventId {
    /// Creates an `EventId` from a trimmed, non-empty string
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `id` is blank.
    pub fn new(id: impl AsRef<str>) -> Result<Self> {
        require_non_blank(id.as_ref(), "Event id").map(Self)
    }

    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EventId {
    type Error = EventError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<EventId> for String {
    fn from(id: EventId) -> Self {
        id.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discriminator of the event variants, as used on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventVariant {
    /// A conference with a theme and speakers
    Conference,
    /// A concert with an artist and a genre
    Concert,
}

impl EventVariant {
    /// Wire name of the variant
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conference => "conference",
            Self::Concert => "concert",
        }
    }
}

impl fmt::Display for EventVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Construction inputs
// ============================================================================

/// Fields shared by every event variant, before validation
#[derive(Clone, Debug)]
pub struct EventDetails {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Scheduled date; must not be before the moment of construction
    pub date: DateTime<Utc>,
    /// Venue
    pub venue: String,
    /// Maximum roster size; must be positive
    pub capacity: u32,
}

impl EventDetails {
    /// Bundles the shared event fields
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        date: DateTime<Utc>,
        venue: impl Into<String>,
        capacity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date,
            venue: venue.into(),
            capacity,
        }
    }
}

// ============================================================================
// Variants
// ============================================================================

/// Conference-specific state
#[derive(Clone, Debug)]
pub struct Conference {
    theme: String,
    speakers: Vec<Arc<Intervenant>>,
}

impl Conference {
    /// Conference theme
    #[must_use]
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Speakers in the order they were added
    #[must_use]
    pub fn speakers(&self) -> &[Arc<Intervenant>] {
        &self.speakers
    }

    /// Number of speakers
    #[must_use]
    pub fn speaker_count(&self) -> usize {
        self.speakers.len()
    }

    /// Whether at least one speaker is scheduled
    #[must_use]
    pub fn has_speakers(&self) -> bool {
        !self.speakers.is_empty()
    }

    /// Whether `speaker` is part of the conference
    #[must_use]
    pub fn has_speaker(&self, speaker: &Intervenant) -> bool {
        self.speakers.iter().any(|s| **s == *speaker)
    }
}

/// Concert-specific state, immutable after construction
#[derive(Clone, Debug)]
pub struct Concert {
    artist: String,
    genre: String,
}

impl Concert {
    /// Performing artist or band
    #[must_use]
    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Musical genre
    #[must_use]
    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Case-insensitive genre match
    #[must_use]
    pub fn is_genre(&self, genre: &str) -> bool {
        self.genre.to_lowercase() == genre.trim().to_lowercase()
    }

    /// Case-insensitive artist match
    #[must_use]
    pub fn is_performed_by(&self, artist: &str) -> bool {
        self.artist.to_lowercase() == artist.trim().to_lowercase()
    }
}

/// Variant-specific part of an event
#[derive(Clone, Debug)]
pub enum EventKind {
    /// A conference
    Conference(Conference),
    /// A concert
    Concert(Concert),
}

impl EventKind {
    /// Discriminator of this variant
    #[must_use]
    pub const fn variant(&self) -> EventVariant {
        match self {
            Self::Conference(_) => EventVariant::Conference,
            Self::Concert(_) => EventVariant::Concert,
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// A scheduled event with a capacity-bounded roster
///
/// Participants and speakers are shared handles: the same person may be
/// registered with many events, and no event owns them.
///
/// Equality and hashing use the id only.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "record::EventRecord", into = "record::EventRecord")]
pub struct Event {
    id: EventId,
    name: String,
    date: DateTime<Utc>,
    venue: String,
    capacity: u32,
    roster: Vec<Arc<Participant>>,
    cancelled: bool,
    kind: EventKind,
    listeners: Notifier,
}

impl Event {
    /// Creates a conference with no speakers
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a required field is blank, the capacity
    /// is zero, or the date is before `clock.now()`.
    pub fn conference(
        details: EventDetails,
        theme: impl AsRef<str>,
        clock: &dyn Clock,
    ) -> Result<Self> {
        Self::conference_with_speakers(details, theme, Vec::new(), clock)
    }

    /// Creates a conference with an initial speaker list
    ///
    /// Speakers sharing an id collapse to the first occurrence.
    ///
    /// # Errors
    ///
    /// Same as [`Event::conference`].
    pub fn conference_with_speakers(
        details: EventDetails,
        theme: impl AsRef<str>,
        speakers: Vec<Arc<Intervenant>>,
        clock: &dyn Clock,
    ) -> Result<Self> {
        Self::check_date(&details, clock)?;
        let theme = require_non_blank(theme.as_ref(), "Conference theme")?;

        let mut unique: Vec<Arc<Intervenant>> = Vec::with_capacity(speakers.len());
        for speaker in speakers {
            if !unique.iter().any(|s| **s == *speaker) {
                unique.push(speaker);
            }
        }

        Self::build(
            details,
            EventKind::Conference(Conference {
                theme,
                speakers: unique,
            }),
        )
    }

    /// Creates a concert
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a required field (including artist and
    /// genre) is blank, the capacity is zero, or the date is before
    /// `clock.now()`.
    pub fn concert(
        details: EventDetails,
        artist: impl AsRef<str>,
        genre: impl AsRef<str>,
        clock: &dyn Clock,
    ) -> Result<Self> {
        Self::check_date(&details, clock)?;
        let concert = Concert {
            artist: require_non_blank(artist.as_ref(), "Concert artist")?,
            genre: require_non_blank(genre.as_ref(), "Concert genre")?,
        };
        Self::build(details, EventKind::Concert(concert))
    }

    fn check_date(details: &EventDetails, clock: &dyn Clock) -> Result<()> {
        if details.date < clock.now() {
            return Err(EventError::invalid("Event date cannot be in the past"));
        }
        Ok(())
    }

    /// Validates the shared fields; the date is checked by the caller
    fn build(details: EventDetails, kind: EventKind) -> Result<Self> {
        let id = EventId::new(&details.id)?;
        let name = require_non_blank(&details.name, "Event name")?;
        let venue = require_non_blank(&details.venue, "Event venue")?;
        if details.capacity == 0 {
            return Err(EventError::invalid("Event capacity must be positive"));
        }

        let event = Self {
            id,
            name,
            date: details.date,
            venue,
            capacity: details.capacity,
            roster: Vec::new(),
            cancelled: false,
            kind,
            listeners: Notifier::new(),
        };
        tracing::debug!(
            event_id = %event.id,
            variant = %event.variant(),
            capacity = event.capacity,
            "Event created"
        );
        Ok(event)
    }

    // ========== Read accessors ==========

    /// Unique identifier
    #[must_use]
    pub const fn id(&self) -> &EventId {
        &self.id
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scheduled date
    #[must_use]
    pub const fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Venue
    #[must_use]
    pub fn venue(&self) -> &str {
        &self.venue
    }

    /// Maximum roster size
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Registered participants, in registration order
    #[must_use]
    pub fn participants(&self) -> &[Arc<Participant>] {
        &self.roster
    }

    /// Number of registered participants
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.roster.len()
    }

    /// Whether the event has been cancelled
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Seats left before the capacity is reached
    #[must_use]
    pub fn available_seats(&self) -> u32 {
        let taken = u32::try_from(self.roster.len()).unwrap_or(u32::MAX);
        self.capacity.saturating_sub(taken)
    }

    /// Whether a participant could still register
    #[must_use]
    pub fn has_available_seats(&self) -> bool {
        !self.cancelled && self.available_seats() > 0
    }

    /// Whether a group of `size` could register together
    #[must_use]
    pub fn can_host_group(&self, size: u32) -> bool {
        size > 0 && !self.cancelled && self.available_seats() >= size
    }

    /// Whether `participant` is on the roster
    #[must_use]
    pub fn is_registered(&self, participant: &Participant) -> bool {
        self.roster.iter().any(|p| **p == *participant)
    }

    /// Variant-specific state
    #[must_use]
    pub const fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Discriminator of this event
    #[must_use]
    pub const fn variant(&self) -> EventVariant {
        self.kind.variant()
    }

    /// Conference state, if this is a conference
    #[must_use]
    pub const fn as_conference(&self) -> Option<&Conference> {
        match &self.kind {
            EventKind::Conference(conference) => Some(conference),
            EventKind::Concert(_) => None,
        }
    }

    /// Concert state, if this is a concert
    #[must_use]
    pub const fn as_concert(&self) -> Option<&Concert> {
        match &self.kind {
            EventKind::Concert(concert) => Some(concert),
            EventKind::Conference(_) => None,
        }
    }

    // ========== Observers ==========

    /// Registers a listener; subscribing twice delivers twice
    pub fn subscribe(&mut self, listener: ListenerHandle) {
        self.listeners.subscribe(listener);
    }

    /// Removes the first registration of `listener`
    pub fn unsubscribe(&mut self, listener: &ListenerHandle) -> bool {
        self.listeners.unsubscribe(listener)
    }

    /// Number of listener registrations
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn emit(&self, notification: &Notification) {
        self.listeners.broadcast(&notification.to_string());
    }

    // ========== Roster ==========

    /// Registers a participant.
    ///
    /// Returns `Ok(false)` without notifying anyone if the participant is
    /// already registered.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - `IllegalState` if the event is cancelled
    /// - `CapacityExceeded` if the roster is full
    pub fn add_participant(&mut self, participant: Arc<Participant>) -> Result<bool> {
        if self.cancelled {
            return Err(EventError::illegal(format!(
                "Cannot add a participant to cancelled event '{}'",
                self.name
            )));
        }
        if self.available_seats() == 0 {
            return Err(EventError::CapacityExceeded {
                event: self.name.clone(),
                capacity: self.capacity,
            });
        }
        if self.is_registered(&participant) {
            return Ok(false);
        }

        let notification = Notification::ParticipantAdded {
            name: participant.name(),
        };
        tracing::debug!(
            event_id = %self.id,
            participant_id = %participant.id(),
            roster_size = self.roster.len() + 1,
            "Participant added"
        );
        self.roster.push(participant);
        self.emit(&notification);
        Ok(true)
    }

    /// Removes a participant. Allowed after cancellation.
    ///
    /// # Errors
    ///
    /// Returns `ParticipantNotFound` if the participant is not registered.
    pub fn remove_participant(&mut self, participant: &Participant) -> Result<()> {
        let Some(position) = self.roster.iter().position(|p| **p == *participant) else {
            return Err(EventError::ParticipantNotFound {
                participant: participant.name(),
                event: self.name.clone(),
            });
        };

        let removed = self.roster.remove(position);
        tracing::debug!(
            event_id = %self.id,
            participant_id = %removed.id(),
            roster_size = self.roster.len(),
            "Participant removed"
        );
        self.emit(&Notification::ParticipantRemoved {
            name: removed.name(),
        });
        Ok(())
    }

    // ========== Speakers ==========

    /// Adds a speaker to a conference. The speaker list has no capacity
    /// limit.
    ///
    /// Returns `Ok(false)` without notifying anyone if the speaker is already
    /// part of the conference, even after cancellation.
    ///
    /// # Errors
    ///
    /// - `NotAConference` if this event is not a conference
    /// - `IllegalState` if the conference is cancelled
    pub fn add_speaker(&mut self, speaker: Arc<Intervenant>) -> Result<bool> {
        let EventKind::Conference(conference) = &mut self.kind else {
            return Err(EventError::NotAConference {
                event: self.name.clone(),
            });
        };

        if conference.has_speaker(&speaker) {
            return Ok(false);
        }
        if self.cancelled {
            return Err(EventError::illegal(format!(
                "Cannot add a speaker to cancelled conference '{}'",
                self.name
            )));
        }

        let notification = Notification::SpeakerAdded {
            name: speaker.name().to_string(),
            specialty: speaker.specialty().to_string(),
        };
        tracing::debug!(
            event_id = %self.id,
            speaker_id = %speaker.id(),
            "Speaker added"
        );
        conference.speakers.push(speaker);
        self.emit(&notification);
        Ok(true)
    }

    /// Removes a speaker from a conference. Allowed after cancellation.
    ///
    /// # Errors
    ///
    /// - `NotAConference` if this event is not a conference
    /// - `SpeakerNotFound` if the speaker is not part of the conference
    pub fn remove_speaker(&mut self, speaker: &Intervenant) -> Result<()> {
        let EventKind::Conference(conference) = &mut self.kind else {
            return Err(EventError::NotAConference {
                event: self.name.clone(),
            });
        };

        let Some(position) = conference.speakers.iter().position(|s| **s == *speaker) else {
            return Err(EventError::SpeakerNotFound {
                speaker: speaker.name().to_string(),
                event: self.name.clone(),
            });
        };

        let removed = conference.speakers.remove(position);
        tracing::debug!(event_id = %self.id, speaker_id = %removed.id(), "Speaker removed");
        self.emit(&Notification::SpeakerRemoved {
            name: removed.name().to_string(),
        });
        Ok(())
    }

    // ========== Lifecycle ==========

    /// Cancels the event.
    ///
    /// The flag is set before the variant report is built, so the report
    /// always describes a cancelled event. Listeners then receive one
    /// cancellation notice carrying the name and the original date.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the event is already cancelled.
    pub fn cancel(&mut self) -> Result<CancellationReport> {
        if self.cancelled {
            return Err(EventError::illegal(format!(
                "Event '{}' is already cancelled",
                self.name
            )));
        }

        self.cancelled = true;
        let report = self.cancellation_report();
        tracing::info!(
            event_id = %self.id,
            variant = %self.variant(),
            affected = report.affected_participants,
            refunds = report.refunds_triggered(),
            "Event cancelled"
        );

        self.emit(&Notification::Cancelled {
            event: self.name.clone(),
            date: self.date,
        });
        Ok(report)
    }

    fn cancellation_report(&self) -> CancellationReport {
        let details = match &self.kind {
            EventKind::Conference(conference) => CancellationDetails::Conference {
                theme: conference.theme.clone(),
                speakers: conference
                    .speakers
                    .iter()
                    .map(|speaker| SpeakerSummary {
                        name: speaker.name().to_string(),
                        specialty: speaker.specialty().to_string(),
                    })
                    .collect(),
            },
            EventKind::Concert(concert) => CancellationDetails::Concert {
                artist: concert.artist.clone(),
                genre: concert.genre.clone(),
                refunds_triggered: !self.roster.is_empty(),
            },
        };

        CancellationReport {
            event_id: self.id.to_string(),
            event_name: self.name.clone(),
            date: self.date,
            venue: self.venue.clone(),
            affected_participants: self.roster.len(),
            details,
        }
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{{id='{}', name='{}', date={}, venue='{}', participants={}/{}, cancelled={}}}",
            self.variant(),
            self.id,
            self.name,
            self.date,
            self.venue,
            self.roster.len(),
            self.capacity,
            self.cancelled
        )
    }
}
