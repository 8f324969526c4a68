//! Outbound notification delivery for the demo.
//!
//! Messages are not sent anywhere: they are written to the `tracing` log
//! under the `roster_demo::outbox` target and counted.

use event_roster_core::{ListenerError, NotificationService};
use std::sync::atomic::{AtomicUsize, Ordering};

/// [`NotificationService`] that logs every message
#[derive(Debug, Default)]
pub struct TracingNotificationService {
    sent: AtomicUsize,
}

impl TracingNotificationService {
    /// Create a service with no message sent yet
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sent: AtomicUsize::new(0),
        }
    }

    /// Number of messages sent so far
    #[must_use]
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }
}

impl NotificationService for TracingNotificationService {
    fn send(&self, message: &str) -> Result<(), ListenerError> {
        tracing::info!(target: "roster_demo::outbox", %message, "Notification sent");
        self.sent.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use event_roster_core::ParticipantListener;
    use event_roster_testing::fixtures;
    use std::sync::Arc;

    #[test]
    fn test_counts_messages() {
        let service = TracingNotificationService::new();
        service.send("hello").unwrap();
        service.send("again").unwrap();
        assert_eq!(service.sent(), 2);
    }

    #[test]
    fn test_one_message_per_subscribed_participant() {
        let service = Arc::new(TracingNotificationService::new());
        let mut event = fixtures::concert(3);
        for participant in fixtures::participants(2) {
            event.subscribe(Arc::new(ParticipantListener::new(
                participant,
                service.clone(),
            )));
        }

        event.cancel().unwrap();
        assert_eq!(service.sent(), 2);
    }
}
