//! Integration tests for roster, speaker and lifecycle behaviour
//!
//! Drives the event aggregate through the public API only, using the
//! fixtures and doubles from `event-roster-testing`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use event_roster_core::{
    CancellationDetails, ErrorKind, Event, EventDetails, EventError, EventVariant, Participant,
};
use event_roster_testing::{
    RecordingListener, RosterTest, assertions, fixtures, init_tracing, test_clock,
};
use std::sync::Arc;

// ============================================================================
// Capacity
// ============================================================================

#[test]
fn test_capacity_two_rejects_third_participant() {
    init_tracing();
    let mut event = fixtures::conference(2);

    assert!(event.add_participant(fixtures::participant("p1", "Ada")).unwrap());
    assert_eq!(event.participant_count(), 1);
    assert!(event.add_participant(fixtures::participant("p2", "Grace")).unwrap());
    assert_eq!(event.participant_count(), 2);

    let error = event
        .add_participant(fixtures::participant("p3", "Linus"))
        .unwrap_err();
    assert_eq!(
        error,
        EventError::CapacityExceeded {
            event: "Fixture Event".into(),
            capacity: 2,
        }
    );
    assert_eq!(event.participant_count(), 2);
}

#[test]
fn test_full_roster_sends_no_notification() {
    let mut event = fixtures::concert(1);
    event.add_participant(fixtures::participant("p1", "Ada")).unwrap();

    RosterTest::new()
        .given_event(event)
        .when(|event| {
            event
                .add_participant(fixtures::participant("p2", "Grace"))
                .map(|_| ())
        })
        .then_outcome(|outcome| assertions::assert_error_kind(outcome, ErrorKind::CapacityExceeded))
        .then_event(assertions::assert_within_capacity)
        .then_messages(|messages| assert!(messages.is_empty()))
        .run();
}

// ============================================================================
// Duplicates and removal
// ============================================================================

#[test]
fn test_duplicate_add_notifies_once() {
    let ada = fixtures::participant("p1", "Ada");

    RosterTest::new()
        .given_event(fixtures::conference(5))
        .when(move |event| {
            assert!(event.add_participant(Arc::clone(&ada))?);
            assert!(!event.add_participant(ada)?);
            Ok(())
        })
        .then_event(|event| assert_eq!(event.participant_count(), 1))
        .then_messages(|messages| assert_eq!(messages, ["new participant added: Ada"]))
        .run();
}

#[test]
fn test_remove_unknown_participant_leaves_roster_unchanged() {
    let mut event = fixtures::conference(5);
    event.add_participant(fixtures::participant("p1", "Ada")).unwrap();

    RosterTest::new()
        .given_event(event)
        .when(|event| event.remove_participant(&fixtures::participant("p9", "Nobody")))
        .then_outcome(|outcome| {
            assertions::assert_error_kind(outcome, ErrorKind::ParticipantNotFound);
        })
        .then_event(|event| assert_eq!(event.participant_count(), 1))
        .then_messages(|messages| assert!(messages.is_empty()))
        .run();
}

#[test]
fn test_participants_with_same_id_are_equal() {
    let first = Participant::new("p1", "Ada Lovelace", "ada@example.org").unwrap();
    let second = Participant::new("p1", "Augusta King", "augusta@example.com").unwrap();
    assert_eq!(first, second);

    let mut event = fixtures::conference(5);
    event.add_participant(Arc::new(first)).unwrap();
    assert!(event.is_registered(&second));
    assert!(!event.add_participant(Arc::new(second)).unwrap());
}

#[test]
fn test_same_participant_in_several_events() {
    let ada = fixtures::participant("p1", "Ada");
    let mut conference = fixtures::conference(5);
    let mut concert = fixtures::concert(5);

    conference.add_participant(Arc::clone(&ada)).unwrap();
    concert.add_participant(Arc::clone(&ada)).unwrap();
    conference.remove_participant(&ada).unwrap();

    assert!(!conference.is_registered(&ada));
    assert!(concert.is_registered(&ada));
    assert_eq!(Arc::strong_count(&ada), 2);
}

#[test]
fn test_email_update_is_seen_by_every_event() {
    let ada = fixtures::participant("p1", "Ada");
    let mut conference = fixtures::conference(5);
    let mut concert = fixtures::concert(5);
    conference.add_participant(Arc::clone(&ada)).unwrap();
    concert.add_participant(Arc::clone(&ada)).unwrap();

    ada.update_email("ada@new.org").unwrap();

    for event in [&conference, &concert] {
        assert_eq!(event.participants()[0].email().as_str(), "ada@new.org");
        assert!(event.is_registered(&ada));
    }
    assert_eq!(conference.participant_count(), 1);
}

#[test]
fn test_renamed_participant_is_removed_under_new_name() {
    let ada = fixtures::participant("p1", "Ada");
    let recorder = Arc::new(RecordingListener::new());
    let mut event = fixtures::conference(5);
    event.add_participant(Arc::clone(&ada)).unwrap();
    event.subscribe(recorder.clone());

    ada.update_name("Ada Lovelace").unwrap();
    event.remove_participant(&ada).unwrap();

    assert_eq!(recorder.messages().len(), 1);
    assert!(recorder.messages()[0].contains("Ada Lovelace"));
}

// ============================================================================
// Cancellation
// ============================================================================

#[test]
fn test_cancel_empty_event_broadcasts_once() {
    let first = Arc::new(RecordingListener::new());
    let second = Arc::new(RecordingListener::new());
    let mut event = fixtures::conference(5);
    event.subscribe(first.clone());
    event.subscribe(second.clone());

    let report = event.cancel().unwrap();

    assert_eq!(report.affected_participants, 0);
    for listener in [&first, &second] {
        let messages = listener.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Fixture Event"));
        assert!(messages[0].contains(&fixtures::event_date().to_string()));
    }
}

#[test]
fn test_cancel_twice_fails_and_stays_cancelled() {
    RosterTest::new()
        .given_event(fixtures::concert(5))
        .when(|event| {
            event.cancel()?;
            event.cancel().map(|_| ())
        })
        .then_outcome(|outcome| assertions::assert_error_kind(outcome, ErrorKind::IllegalState))
        .then_event(|event| assert!(event.is_cancelled()))
        .then_messages(|messages| assert_eq!(messages.len(), 1))
        .run();
}

#[test]
fn test_cancelled_event_rejects_adds_but_allows_removals() {
    let ada = fixtures::participant("p1", "Ada");
    let mut event = fixtures::concert(5);
    event.add_participant(Arc::clone(&ada)).unwrap();
    event.cancel().unwrap();

    let error = event
        .add_participant(fixtures::participant("p2", "Grace"))
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::IllegalState);

    event.remove_participant(&ada).unwrap();
    assert_eq!(event.participant_count(), 0);
    assert!(event.is_cancelled());
}

#[test]
fn test_concert_cancellation_triggers_refunds() {
    let mut event = fixtures::concert(5);
    event.add_participant(fixtures::participant("p1", "Ada")).unwrap();
    event.add_participant(fixtures::participant("p2", "Grace")).unwrap();

    let report = event.cancel().unwrap();

    assert_eq!(report.event_id, "concert-1");
    assert_eq!(report.affected_participants, 2);
    assert!(report.refunds_triggered());
    assert!(matches!(
        report.details,
        CancellationDetails::Concert { ref artist, .. } if artist == "Daft Punk"
    ));
}

// ============================================================================
// Speakers
// ============================================================================

#[test]
fn test_ai_conference_speakers_after_cancel() {
    let first = fixtures::speaker("i1", "Yann", "Deep learning");
    let second = fixtures::speaker("i2", "Fei-Fei", "Vision");
    let mut event = fixtures::conference(10);
    assert_eq!(event.as_conference().unwrap().theme(), "AI");

    assert!(event.add_speaker(Arc::clone(&first)).unwrap());
    event.cancel().unwrap();

    assert!(!event.add_speaker(first).unwrap());
    let error = event.add_speaker(second).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::IllegalState);
    assert_eq!(event.as_conference().unwrap().speaker_count(), 1);
}

#[test]
fn test_conference_cancellation_lists_speakers() {
    let mut event = fixtures::conference(10);
    event
        .add_speaker(fixtures::speaker("i1", "Yann", "Deep learning"))
        .unwrap();
    event
        .add_speaker(fixtures::speaker("i2", "Fei-Fei", "Vision"))
        .unwrap();

    let report = event.cancel().unwrap();
    let names: Vec<_> = report.speakers().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Yann", "Fei-Fei"]);
    assert!(!report.refunds_triggered());
}

#[test]
fn test_speaker_details_update_is_seen_by_conference() {
    let yann = fixtures::speaker("i1", "Yann", "Deep learning");
    let mut event = fixtures::conference(10);
    event.add_speaker(Arc::clone(&yann)).unwrap();

    yann.update_institution(Some("NYU"));

    let conference = event.as_conference().unwrap();
    assert_eq!(conference.speakers()[0].institution().as_deref(), Some("NYU"));
    assert_eq!(
        conference.speakers()[0].to_string(),
        "Yann (NYU) - Deep learning"
    );
}

#[test]
fn test_speaker_operations_require_a_conference() {
    let mut event = fixtures::concert(5);
    let yann = fixtures::speaker("i1", "Yann", "Deep learning");

    let error = event.add_speaker(Arc::clone(&yann)).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    let error = event.remove_speaker(&yann).unwrap_err();
    assert!(matches!(error, EventError::NotAConference { .. }));
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_past_date_is_rejected() {
    let clock = test_clock();
    let past = EventDetails::new(
        "old",
        "Yesterday",
        fixtures::event_date() - chrono::Duration::days(60),
        "Hall",
        10,
    );
    let error = Event::concert(past, "Air", "Electronic", &clock).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_variant_is_reported() {
    assert_eq!(fixtures::conference(1).variant(), EventVariant::Conference);
    assert_eq!(fixtures::concert(1).variant(), EventVariant::Concert);
}
