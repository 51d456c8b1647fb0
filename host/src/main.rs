use std::time::Duration;

use engine::{MonotonicClock, OsRandom, SpinSession, WheelConfig};
use tracing::{info, warn};

use crate::claim_service::Ledger;
use crate::spin_service::{SpinService, WheelEvent};

mod claim_service;
mod logging;
mod spin_service;

// The demo runs a handful of rounds back to back, so cap the wait between
// spins regardless of what the config asks for.
const DEMO_MAX_COOLDOWN_MS: u64 = 2_000;
const DEMO_ROUNDS: u32 = 3;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::setup();

    let mut config = load_config()?;
    if config.cooldown_ms > DEMO_MAX_COOLDOWN_MS {
        info!(
            "capping cooldown at {}ms for the demo (configured: {})",
            DEMO_MAX_COOLDOWN_MS,
            format_cooldown(config.cooldown_ms / 1000),
        );
        config.cooldown_ms = DEMO_MAX_COOLDOWN_MS;
    }

    let session = SpinSession::from_config(
        config,
        Box::new(OsRandom),
        Box::new(MonotonicClock::new()),
    )?;

    let odds = session
        .catalog()
        .iter()
        .zip(session.catalog().odds())
        .map(|(outcome, chance)| format!("{} {:.1}%", outcome.label, chance * 100.0))
        .collect::<Vec<_>>()
        .join(", ");
    info!("🎡 wheel ready: {}", odds);

    let (mut service, mut events) = SpinService::new(session);
    let mut ledger = Ledger::new();

    for round in 1..=DEMO_ROUNDS {
        info!("── round {} ──", round);
        service.request_spin()?;

        while let Some(event) = events.recv().await {
            match event {
                WheelEvent::SpinStarted { target_rotation_degrees, reveal_after_ms } => {
                    info!(
                        "spinning to {:.1} degrees over {}ms",
                        target_rotation_degrees, reveal_after_ms,
                    );
                }
                WheelEvent::ResultReady { outcome } => {
                    info!("{} you won: {}", outcome.icon.as_deref().unwrap_or("🎉"), outcome.label);
                    break;
                }
            }
        }

        let outcome = service.acknowledge()?;
        ledger.credit(&outcome.reward);
        info!("balance: {}", ledger.summary());

        let remaining_ms = service.cooldown_remaining_ms();
        if round < DEMO_ROUNDS && remaining_ms > 0 {
            info!("next spin in {}", format_cooldown(remaining_ms.div_ceil(1000)));
            tokio::time::sleep(Duration::from_millis(remaining_ms)).await;
        }
    }

    service.dispose();
    info!("demo finished: {}", ledger.summary());
    Ok(())
}

/// Load the wheel configuration from the JSON file named on the command
/// line, or fall back to the stock wheel.
fn load_config() -> Result<WheelConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            let config = serde_json::from_str(&raw)?;
            info!("loaded wheel config from {}", path);
            Ok(config)
        }
        None => {
            warn!("no config file given, using the stock wheel");
            Ok(WheelConfig::default())
        }
    }
}

/// Format a cooldown in seconds for display, largest unit first.
fn format_cooldown(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
