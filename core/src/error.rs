//! Error types for roster and lifecycle operations.

use thiserror::Error;

/// Errors returned by event, person and organizer operations.
///
/// Every failure is local and synchronous. The aggregate never retries or
/// repairs itself; callers decide whether to surface the error or abort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// A required value was blank or structurally invalid
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not allowed in the current lifecycle state
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// The roster is already at capacity
    #[error("Capacity reached for event '{event}' (capacity: {capacity})")]
    CapacityExceeded {
        /// Name of the full event
        event: String,
        /// Fixed capacity of the event
        capacity: u32,
    },

    /// The participant is not on the roster
    #[error("Participant '{participant}' is not registered for event '{event}'")]
    ParticipantNotFound {
        /// Name of the participant
        participant: String,
        /// Name of the event
        event: String,
    },

    /// The speaker is not part of the conference
    #[error("Speaker '{speaker}' is not part of conference '{event}'")]
    SpeakerNotFound {
        /// Name of the speaker
        speaker: String,
        /// Name of the conference
        event: String,
    },

    /// A conference-only operation was invoked on another variant
    #[error("Event '{event}' is not a conference")]
    NotAConference {
        /// Name of the event
        event: String,
    },
}

/// Abstract classification of an [`EventError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Blank, malformed or out-of-range input
    InvalidArgument,
    /// Operation invalid for the current lifecycle state
    IllegalState,
    /// Roster add would exceed capacity
    CapacityExceeded,
    /// Removal of a participant that is not registered
    ParticipantNotFound,
}

impl EventError {
    /// Classifies the error.
    ///
    /// A missing speaker is reported as [`ErrorKind::IllegalState`]: removing
    /// a speaker who is not part of the conference is a state violation, not
    /// a roster lookup failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) | Self::NotAConference { .. } => ErrorKind::InvalidArgument,
            Self::IllegalState(_) | Self::SpeakerNotFound { .. } => ErrorKind::IllegalState,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::ParticipantNotFound { .. } => ErrorKind::ParticipantNotFound,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn illegal(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, EventError>;

/// Returns the trimmed value, or `InvalidArgument` naming `field` if blank.
pub(crate) fn require_non_blank(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EventError::invalid(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Normalises an optional free-text field: blank becomes `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}
