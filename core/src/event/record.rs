//! Wire form of an [`Event`].
//!
//! Events are written with an internal `"type"` tag and read back through
//! the same validation as the constructors. Unknown fields are ignored.
//! The "date not in the past" rule only applies when an event is first
//! created, so a persisted event can be restored after its date.

use super::{Concert, Conference, Event, EventDetails, EventKind};
use crate::error::{EventError, Result, require_non_blank};
use crate::person::{Intervenant, Participant, PersonId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Serialize, Deserialize)]
pub(crate) struct EventRecord {
    id: String,
    name: String,
    date: DateTime<Utc>,
    venue: String,
    capacity: u32,
    #[serde(default)]
    participants: Vec<Arc<Participant>>,
    #[serde(default)]
    cancelled: bool,
    #[serde(flatten)]
    variant: VariantRecord,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum VariantRecord {
    Conference {
        theme: String,
        #[serde(default)]
        speakers: Vec<Arc<Intervenant>>,
    },
    Concert {
        artist: String,
        genre: String,
    },
}

fn first_duplicate<'a>(ids: impl IntoIterator<Item = &'a PersonId>) -> Option<&'a PersonId> {
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        let variant = match event.kind {
            EventKind::Conference(conference) => VariantRecord::Conference {
                theme: conference.theme,
                speakers: conference.speakers,
            },
            EventKind::Concert(concert) => VariantRecord::Concert {
                artist: concert.artist,
                genre: concert.genre,
            },
        };

        Self {
            id: event.id.into(),
            name: event.name,
            date: event.date,
            venue: event.venue,
            capacity: event.capacity,
            participants: event.roster,
            cancelled: event.cancelled,
            variant,
        }
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = EventError;

    fn try_from(record: EventRecord) -> Result<Self> {
        let kind = match record.variant {
            VariantRecord::Conference { theme, speakers } => {
                if let Some(id) = first_duplicate(speakers.iter().map(|s| s.id())) {
                    return Err(EventError::illegal(format!("Duplicate speaker '{id}'")));
                }
                EventKind::Conference(Conference {
                    theme: require_non_blank(&theme, "Conference theme")?,
                    speakers,
                })
            }
            VariantRecord::Concert { artist, genre } => EventKind::Concert(Concert {
                artist: require_non_blank(&artist, "Concert artist")?,
                genre: require_non_blank(&genre, "Concert genre")?,
            }),
        };

        let details = EventDetails::new(
            record.id,
            record.name,
            record.date,
            record.venue,
            record.capacity,
        );
        let mut event = Self::build(details, kind)?;

        if record.participants.len() > usize::try_from(event.capacity).unwrap_or(usize::MAX) {
            return Err(EventError::CapacityExceeded {
                event: event.name,
                capacity: event.capacity,
            });
        }
        if let Some(id) = first_duplicate(record.participants.iter().map(|p| p.id())) {
            return Err(EventError::illegal(format!("Duplicate participant '{id}'")));
        }

        event.roster = record.participants;
        event.cancelled = record.cancelled;
        Ok(event)
    }
}
