use std::sync::Arc;
use std::time::Duration;

use chargewatch::prelude::*;
use rand::Rng;

// ---------------------------------------------------------------------------
// Simulation settings
// ---------------------------------------------------------------------------

const STATIONS: usize = 12;
const SESSIONS_PER_STATION: usize = 5;

/// Chance that a vehicle unplugs before the simulation ends.
const STOP_PROBABILITY: f64 = 0.7;

// ---------------------------------------------------------------------------
// One station: plugs vehicles in and out
// ---------------------------------------------------------------------------

async fn run_station(manager: Arc<SessionManager>, station: String) -> usize {
    let mut finished = 0;

    for _ in 0..SESSIONS_PER_STATION {
        let session = match manager.start_session(&station) {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(%station, error = %e, "start failed");
                continue;
            }
        };

        let (charge_ms, unplug) = {
            let mut rng = rand::rng();
            (rng.random_range(5..40), rng.random_bool(STOP_PROBABILITY))
        };
        tokio::time::sleep(Duration::from_millis(charge_ms)).await;

        if unplug && manager.stop_session(session.id).is_ok() {
            finished += 1;
        }
    }

    finished
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), ChargewatchError> {
    chargewatch::init_tracing();

    let store = Arc::new(SessionStore::new());
    let manager = Arc::new(SessionManager::new(store, SessionConfig::default()));

    let stations: Vec<_> = (0..STATIONS)
        .map(|i| {
            let manager = Arc::clone(&manager);
            tokio::spawn(run_station(manager, format!("STATION-{i:03}")))
        })
        .collect();

    let mut finished = 0;
    for station in stations {
        match station.await {
            Ok(n) => finished += n,
            Err(e) => tracing::error!(error = %e, "station task failed"),
        }
    }
    tracing::info!(finished, "all stations idle");

    // Malformed and unknown requests are rejected without touching the store.
    if let Err(e) = manager.start_session("") {
        tracing::info!(error = %e, "empty station rejected as expected");
    }
    let unknown: SessionId = "f1ac3841-3441-46a7-bb69-017a93a30224".parse()?;
    if let Err(e) = manager.stop_session(unknown) {
        tracing::info!(error = %e, "unknown session rejected as expected");
    }

    let summary = manager.summarize();
    let listing = SessionList::from(manager.list_sessions());

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "failed to encode summary"),
    }
    println!(
        "{} sessions tracked, {} finished",
        listing.charging_sessions.len(),
        listing
            .charging_sessions
            .iter()
            .filter(|s| s.is_finished())
            .count()
    );

    Ok(())
}
