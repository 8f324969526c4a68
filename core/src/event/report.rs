//! Structured result of a cancellation.
//!
//! The aggregate performs no I/O when it is cancelled. It hands back a
//! [`CancellationReport`] and leaves rendering, refunds and outbound
//! messaging to the host.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Name and specialty of a speaker affected by a cancellation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerSummary {
    /// Speaker name
    pub name: String,
    /// Speaker specialty
    pub specialty: String,
}

/// Variant-specific part of a cancellation report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CancellationDetails {
    /// A conference was cancelled
    Conference {
        /// Conference theme
        theme: String,
        /// Speakers that were scheduled, in order
        speakers: Vec<SpeakerSummary>,
    },
    /// A concert was cancelled
    Concert {
        /// Performing artist
        artist: String,
        /// Musical genre
        genre: String,
        /// Whether refund and notification workflows must be started
        refunds_triggered: bool,
    },
}

/// What a cancellation affected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancellationReport {
    /// Cancelled event id
    pub event_id: String,
    /// Cancelled event name
    pub event_name: String,
    /// Date the event was scheduled for
    pub date: DateTime<Utc>,
    /// Venue
    pub venue: String,
    /// Participants registered at the time of cancellation
    pub affected_participants: usize,
    /// Variant-specific details
    pub details: CancellationDetails,
}

impl CancellationReport {
    /// Whether the host should start refund workflows
    #[must_use]
    pub const fn refunds_triggered(&self) -> bool {
        matches!(
            self.details,
            CancellationDetails::Concert {
                refunds_triggered: true,
                ..
            }
        )
    }

    /// Speakers affected, empty for concerts
    #[must_use]
    pub fn speakers(&self) -> &[SpeakerSummary] {
        match &self.details {
            CancellationDetails::Conference { speakers, .. } => speakers,
            CancellationDetails::Concert { .. } => &[],
        }
    }
}
