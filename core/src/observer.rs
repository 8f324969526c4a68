//! Observer channel for roster and lifecycle notifications.
//!
//! An event owns a [`Notifier`]: the ordered registry of listeners
//! subscribed to it. Every successful state change is pushed through
//! [`Notifier::broadcast`] as a plain text message.
//!
//! # Delivery
//!
//! ```text
//! Event mutation ──► Notifier::broadcast(message)
//!                        │
//!            ┌───────────┼───────────┐
//!            ▼           ▼           ▼
//!       listener 1   listener 2   listener 3   (subscription order)
//!            │           ✗           │
//!            └──── failure logged, delivery continues
//! ```
//!
//! Delivery is synchronous and best-effort: a listener that returns an
//! error or panics is recorded in the returned [`Delivery`] and logged, and
//! the remaining listeners are still notified.

use crate::person::Participant;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use thiserror::Error;

/// Errors a listener may report while handling a notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// The downstream delivery mechanism rejected the message
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// The listener panicked while handling the message
    #[error("Listener panicked")]
    Panicked,
}

/// Capability that receives text notifications from an event.
pub trait Listener: Send + Sync {
    /// Handle one notification
    ///
    /// # Errors
    ///
    /// Returns a [`ListenerError`] if the message could not be handled. The
    /// error never propagates to the event that broadcast the message.
    fn notify(&self, message: &str) -> Result<(), ListenerError>;
}

/// Shared handle to a subscribed listener
pub type ListenerHandle = Arc<dyn Listener>;

/// A listener that failed during a broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    /// Position of the listener in subscription order
    pub position: usize,
    /// What went wrong
    pub error: ListenerError,
}

/// Outcome of a broadcast
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Number of listeners that handled the message
    pub delivered: usize,
    /// Listeners that failed, in subscription order
    pub failures: Vec<DeliveryFailure>,
}

impl Delivery {
    /// Whether every listener handled the message
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of listeners attempted
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }
}

// ============================================================================
// Notifier
// ============================================================================

/// Ordered listener registry for a single event.
///
/// Subscribing the same handle twice registers it twice; it will then be
/// notified twice per broadcast.
#[derive(Clone, Default)]
pub struct Notifier {
    listeners: Vec<ListenerHandle>,
}

impl Notifier {
    /// Creates an empty registry
    #[must_use]
    pub const fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Appends a listener
    pub fn subscribe(&mut self, listener: ListenerHandle) {
        self.listeners.push(listener);
    }

    /// Removes the first registration of `listener` (by handle identity).
    ///
    /// Returns `false` if the handle was not subscribed.
    pub fn unsubscribe(&mut self, listener: &ListenerHandle) -> bool {
        let Some(position) = self
            .listeners
            .iter()
            .position(|candidate| Arc::ptr_eq(candidate, listener))
        else {
            return false;
        };
        self.listeners.remove(position);
        true
    }

    /// Number of registrations
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is subscribed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Delivers `message` to every listener, in subscription order.
    ///
    /// Failures and panics are isolated per listener.
    pub fn broadcast(&self, message: &str) -> Delivery {
        let mut delivery = Delivery::default();

        for (position, listener) in self.listeners.iter().enumerate() {
            let outcome = catch_unwind(AssertUnwindSafe(|| listener.notify(message)))
                .unwrap_or(Err(ListenerError::Panicked));

            match outcome {
                Ok(()) => delivery.delivered += 1,
                Err(error) => {
                    tracing::warn!(position, %error, "Listener failed, continuing delivery");
                    delivery.failures.push(DeliveryFailure { position, error });
                }
            }
        }

        tracing::trace!(
            delivered = delivery.delivered,
            failed = delivery.failures.len(),
            "Broadcast complete"
        );
        delivery
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners.len()", &self.listeners.len())
            .finish()
    }
}

// ============================================================================
// Notification service adapter
// ============================================================================

/// Outbound delivery mechanism (email, SMS, log, ...)
pub trait NotificationService: Send + Sync {
    /// Send a fully formatted message
    ///
    /// # Errors
    ///
    /// Returns a [`ListenerError`] if the message could not be sent.
    fn send(&self, message: &str) -> Result<(), ListenerError>;
}

/// Listener that forwards notifications to a [`NotificationService`] on
/// behalf of one participant.
///
/// Messages are addressed as `"<prefix> <participant>: <message>"`.
pub struct ParticipantListener {
    participant: Arc<Participant>,
    service: Arc<dyn NotificationService>,
    prefix: String,
}

impl ParticipantListener {
    /// Default address prefix
    pub const DEFAULT_PREFIX: &'static str = "Notification for";

    /// Creates an adapter with the default prefix
    #[must_use]
    pub fn new(participant: Arc<Participant>, service: Arc<dyn NotificationService>) -> Self {
        Self {
            participant,
            service,
            prefix: Self::DEFAULT_PREFIX.to_string(),
        }
    }

    /// Overrides the address prefix
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// The participant this adapter speaks for
    #[must_use]
    pub fn participant(&self) -> &Participant {
        &self.participant
    }
}

impl Listener for ParticipantListener {
    fn notify(&self, message: &str) -> Result<(), ListenerError> {
        self.service
            .send(&format!("{} {}: {message}", self.prefix, self.participant))
    }
}

impl fmt::Debug for ParticipantListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParticipantListener")
            .field("participant", &self.participant.id())
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
