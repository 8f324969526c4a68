//! Roster demo binary.
//!
//! Runs the demo scenario against the system clock, then prints event
//! summaries, the cancellation notice and the JSON form of both events.

use event_roster_core::{NotificationService, SystemClock};
use roster_demo::{Config, TracingNotificationService, render};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        venue = %config.venue,
        capacity = config.capacity,
        days_ahead = config.days_ahead,
        "Configuration loaded"
    );

    let outbox = Arc::new(TracingNotificationService::new());
    let service: Arc<dyn NotificationService> = outbox.clone();
    let scenario = roster_demo::run(&config, &SystemClock, &service)?;

    println!("=== Event Roster Demo ===\n");
    println!("Organizer: {}", scenario.organizer.person());
    for id in scenario.organizer.organized_events() {
        println!("  organizes {id}");
    }

    println!();
    print!("{}", render::event_summary(&scenario.conference));
    println!();
    print!("{}", render::event_summary(&scenario.concert));

    if !scenario.rejected.is_empty() {
        println!("\nRefused registrations:");
        for error in &scenario.rejected {
            println!("  {error}");
        }
    }

    println!();
    print!("{}", render::cancellation_notice(&scenario.report));
    println!("{} notification(s) sent", outbox.sent());

    println!("\n=== JSON ===\n");
    println!("{}", serde_json::to_string_pretty(&scenario.conference)?);
    println!("{}", serde_json::to_string_pretty(&scenario.concert)?);
    println!("{}", serde_json::to_string_pretty(&scenario.report)?);

    info!("Demo finished");
    Ok(())
}
