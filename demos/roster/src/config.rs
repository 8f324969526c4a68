//! Configuration management for the roster demo.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// Default tracing filter when neither `RUST_LOG` nor `ROSTER_LOG_FILTER` is set
pub const DEFAULT_LOG_FILTER: &str = "roster_demo=info,event_roster_core=debug";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tracing filter directive
    pub log_filter: String,
    /// Venue of the demo events
    pub venue: String,
    /// Capacity of the demo events (zero falls back to the default)
    pub capacity: u32,
    /// How far ahead of now the demo events are scheduled, in days
    pub days_ahead: i64,
    /// Prefix of participant-addressed notifications
    pub notify_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            venue: "Palais des Congrès".to_string(),
            capacity: 3,
            days_ahead: 30,
            notify_prefix: "Notification for".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// Missing or unparsable values fall back to [`Config::default`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            log_filter: lookup("ROSTER_LOG_FILTER").unwrap_or(defaults.log_filter),
            venue: lookup("ROSTER_VENUE")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.venue),
            capacity: lookup("ROSTER_CAPACITY")
                .and_then(|s| s.trim().parse().ok())
                .filter(|capacity| *capacity > 0)
                .unwrap_or(defaults.capacity),
            days_ahead: lookup("ROSTER_DAYS_AHEAD")
                .and_then(|s| s.trim().parse().ok())
                .filter(|days| *days >= 0)
                .unwrap_or(defaults.days_ahead),
            notify_prefix: lookup("ROSTER_NOTIFY_PREFIX").unwrap_or(defaults.notify_prefix),
        }
    }
}
