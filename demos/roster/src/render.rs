//! Text rendering of events and cancellation reports.

use event_roster_core::{CancellationDetails, CancellationReport, Event, EventKind};
use std::fmt::Write as _;

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Multi-line summary of an event
#[must_use]
pub fn event_summary(event: &Event) -> String {
    let mut out = String::new();
    let status = if event.is_cancelled() { "CANCELLED" } else { "active" };

    let _ = writeln!(out, "{} [{}] ({})", event.name(), event.variant(), status);
    let _ = writeln!(out, "  date:   {}", event.date().format(DATE_FORMAT));
    let _ = writeln!(out, "  venue:  {}", event.venue());
    let _ = writeln!(
        out,
        "  seats:  {}/{} taken, {} available",
        event.participant_count(),
        event.capacity(),
        event.available_seats()
    );

    match event.kind() {
        EventKind::Conference(conference) => {
            let _ = writeln!(out, "  theme:  {}", conference.theme());
            for speaker in conference.speakers() {
                let _ = writeln!(out, "  speaker: {speaker}");
            }
        }
        EventKind::Concert(concert) => {
            let _ = writeln!(out, "  artist: {} ({})", concert.artist(), concert.genre());
        }
    }

    for participant in event.participants() {
        let _ = writeln!(out, "  - {participant}");
    }
    out
}

/// Notice shown to the host operator after a cancellation
#[must_use]
pub fn cancellation_notice(report: &CancellationReport) -> String {
    let mut out = String::new();
    let date = report.date.format(DATE_FORMAT);

    match &report.details {
        CancellationDetails::Conference { theme, speakers } => {
            let _ = writeln!(out, "Conference '{}' cancelled", report.event_name);
            let _ = writeln!(out, "  theme: {theme}");
            let _ = writeln!(out, "  was scheduled for {date} at {}", report.venue);
            let _ = writeln!(
                out,
                "  {} participant(s) to inform",
                report.affected_participants
            );
            if !speakers.is_empty() {
                let _ = writeln!(out, "  speakers to inform:");
                for speaker in speakers {
                    let _ = writeln!(out, "    - {} ({})", speaker.name, speaker.specialty);
                }
            }
        }
        CancellationDetails::Concert {
            artist,
            genre,
            refunds_triggered,
        } => {
            let _ = writeln!(out, "Concert '{}' cancelled", report.event_name);
            let _ = writeln!(out, "  {artist} ({genre})");
            let _ = writeln!(out, "  was scheduled for {date} at {}", report.venue);
            let _ = writeln!(
                out,
                "  {} spectator(s) affected",
                report.affected_participants
            );
            if *refunds_triggered {
                let _ = writeln!(out, "  refund process started");
            }
        }
    }
    out
}
