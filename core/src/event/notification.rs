//! Messages broadcast to listeners after a successful state change.

use chrono::{DateTime, Utc};
use std::fmt;

/// A roster or lifecycle change, rendered to text for listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A participant joined the roster
    ParticipantAdded {
        /// Participant name
        name: String,
    },
    /// A participant left the roster
    ParticipantRemoved {
        /// Participant name
        name: String,
    },
    /// A speaker joined the conference
    SpeakerAdded {
        /// Speaker name
        name: String,
        /// Speaker specialty
        specialty: String,
    },
    /// A speaker left the conference
    SpeakerRemoved {
        /// Speaker name
        name: String,
    },
    /// The event was cancelled
    Cancelled {
        /// Event name
        event: String,
        /// Date the event was scheduled for
        date: DateTime<Utc>,
    },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParticipantAdded { name } => write!(f, "new participant added: {name}"),
            Self::ParticipantRemoved { name } => write!(f, "participant removed: {name}"),
            Self::SpeakerAdded { name, specialty } => {
                write!(f, "new speaker added: {name} ({specialty})")
            }
            Self::SpeakerRemoved { name } => write!(f, "speaker removed: {name}"),
            Self::Cancelled { event, date } => {
                write!(f, "event '{event}' cancelled, originally scheduled for {date}")
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rendering() {
        assert_eq!(
            Notification::ParticipantAdded { name: "Ada".into() }.to_string(),
            "new participant added: Ada"
        );
        assert_eq!(
            Notification::SpeakerAdded {
                name: "Grace".into(),
                specialty: "Compilers".into()
            }
            .to_string(),
            "new speaker added: Grace (Compilers)"
        );

        let date = Utc.with_ymd_and_hms(2030, 6, 1, 20, 0, 0).single().unwrap();
        assert_eq!(
            Notification::Cancelled {
                event: "Gala".into(),
                date
            }
            .to_string(),
            "event 'Gala' cancelled, originally scheduled for 2030-06-01 20:00:00 UTC"
        );
    }
}
