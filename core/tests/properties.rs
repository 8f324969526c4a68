//! Property tests for the roster invariants

#![allow(clippy::unwrap_used)] // Tests can unwrap

use event_roster_core::{ErrorKind, Event};
use event_roster_testing::properties::{RosterOp, capacity, participant, roster_ops};
use event_roster_testing::{RecordingListener, fixtures};
use proptest::prelude::*;
use std::sync::Arc;

fn capacity_as_usize(event: &Event) -> usize {
    usize::try_from(event.capacity()).unwrap()
}

proptest! {
    #[test]
    fn test_roster_never_exceeds_capacity(capacity in capacity(), ops in roster_ops(40)) {
        let mut event = fixtures::conference(capacity);
        for op in &ops {
            let _ = op.apply(&mut event);
            prop_assert!(event.participant_count() <= capacity_as_usize(&event));
        }
    }

    #[test]
    fn test_roster_ids_stay_unique(ops in roster_ops(40)) {
        let mut event = fixtures::concert(6);
        for op in &ops {
            let _ = op.apply(&mut event);
        }
        let mut ids: Vec<_> = event.participants().iter().map(|p| p.id().clone()).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), event.participant_count());
    }

    #[test]
    fn test_one_notification_per_successful_change(ops in roster_ops(40)) {
        let recorder = Arc::new(RecordingListener::new());
        let mut event = fixtures::concert(4);
        event.subscribe(recorder.clone());

        let mut changes = 0;
        for op in &ops {
            let changed = match op {
                RosterOp::Add(p) => event.add_participant(Arc::clone(p)).unwrap_or(false),
                RosterOp::Remove(p) => event.remove_participant(p).is_ok(),
                RosterOp::Cancel => event.cancel().is_ok(),
            };
            if changed {
                changes += 1;
            }
        }
        prop_assert_eq!(recorder.count(), changes);
    }

    #[test]
    fn test_cancelled_event_rejects_every_add(p in participant(), ops in roster_ops(20)) {
        let mut event = fixtures::conference(6);
        for op in &ops {
            let _ = op.apply(&mut event);
        }
        if !event.is_cancelled() {
            event.cancel().unwrap();
        }
        let error = event.add_participant(p).unwrap_err();
        prop_assert_eq!(error.kind(), ErrorKind::IllegalState);
    }
}
