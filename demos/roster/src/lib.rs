//! # Roster Demo
//!
//! Host application around `event-roster-core`. It plays the part of the
//! outside world: it loads configuration, subscribes participant-addressed
//! listeners, drives a conference and a concert through registration and
//! cancellation, and renders what happened.

use chrono::Duration;
use event_roster_core::{
    CancellationReport, Clock, Event, EventDetails, EventError, Intervenant, NotificationService,
    Organizer, Participant, ParticipantListener,
};
use std::sync::Arc;

pub mod config;
pub mod render;
pub mod service;

pub use config::Config;
pub use service::TracingNotificationService;

/// Everything the demo scenario produced
#[derive(Debug)]
pub struct Scenario {
    /// Organizer of both events
    pub organizer: Organizer,
    /// The conference, still active
    pub conference: Event,
    /// The concert, cancelled at the end of the run
    pub concert: Event,
    /// Registrations refused along the way
    pub rejected: Vec<EventError>,
    /// Report of the concert cancellation
    pub report: CancellationReport,
}

const ATTENDEES: [(&str, &str, &str); 4] = [
    ("p1", "ada lovelace", "ada@example.org"),
    ("p2", "grace hopper", "grace@example.org"),
    ("p3", "alan turing", "alan@example.org"),
    ("p4", "barbara liskov", "barbara@example.org"),
];

fn attendees() -> Result<Vec<Arc<Participant>>, EventError> {
    ATTENDEES
        .iter()
        .map(|(id, name, email)| Participant::new(id, name, email).map(Arc::new))
        .collect()
}

fn speakers() -> Result<Vec<Arc<Intervenant>>, EventError> {
    Ok(vec![
        Arc::new(
            Intervenant::new("i1", "Yann", "Deep learning")?
                .with_institution("NYU")
                .with_email("yann@example.org")?,
        ),
        Arc::new(Intervenant::new("i2", "Fei-Fei", "Computer vision")?),
    ])
}

/// Run the demo scenario
///
/// Four attendees try to register for each event; with the default
/// capacity of three, the last one is refused. Every attendee, registered
/// or not, is then subscribed to the concert through `service` and hears
/// about its cancellation.
///
/// # Errors
///
/// Returns an [`EventError`] if the configured values do not produce a
/// valid event, or if an unexpected operation fails. Capacity refusals are
/// collected in [`Scenario::rejected`] instead.
pub fn run(
    config: &Config,
    clock: &dyn Clock,
    service: &Arc<dyn NotificationService>,
) -> Result<Scenario, EventError> {
    let date = Duration::try_days(config.days_ahead)
        .and_then(|ahead| clock.now().checked_add_signed(ahead))
        .ok_or_else(|| {
            EventError::InvalidArgument(format!(
                "Cannot schedule an event {} days ahead",
                config.days_ahead
            ))
        })?;
    let mut organizer = Organizer::new("o1", "marie curie", "marie@example.org")?;

    let mut conference = Event::conference_with_speakers(
        EventDetails::new("conf-ai", "AI Summit", date, &config.venue, config.capacity),
        "Artificial intelligence",
        speakers()?,
        clock,
    )?;
    let mut concert = Event::concert(
        EventDetails::new(
            "concert-dp",
            "Electronic Night",
            date,
            &config.venue,
            config.capacity,
        ),
        "Daft Punk",
        "Electronic",
        clock,
    )?;
    organizer.record_event(&conference);
    organizer.record_event(&concert);

    let attendees = attendees()?;
    let mut rejected = Vec::new();
    for attendee in &attendees {
        for event in [&mut conference, &mut concert] {
            match event.add_participant(Arc::clone(attendee)) {
                Ok(_) => {}
                Err(error @ EventError::CapacityExceeded { .. }) => {
                    tracing::warn!(event_id = %event.id(), %error, "Registration refused");
                    rejected.push(error);
                }
                Err(error) => return Err(error),
            }
        }
    }

    for attendee in &attendees {
        concert.subscribe(Arc::new(
            ParticipantListener::new(Arc::clone(attendee), Arc::clone(service))
                .with_prefix(&config.notify_prefix),
        ));
    }
    let report = concert.cancel()?;
    tracing::info!(
        organizer = %organizer.person(),
        events = organizer.organized_count(),
        "Scenario complete"
    );

    Ok(Scenario {
        organizer,
        conference,
        concert,
        rejected,
        report,
    })
}
