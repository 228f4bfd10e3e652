//! `combat-sim`: runs one encounter headless and prints a JSON summary.
//!
//! ```bash
//! COMBAT_ENCOUNTER=ambush COMBAT_SEED=7 COMBAT_SPEED=instant cargo run -p combat-client
//! ```
use anyhow::Result;
use combat_client::{SimConfig, SimulationBuilder, SimulationInfo, logging, spawn_event_log};
use combat_runtime::SessionReport;
use serde::Serialize;

#[derive(Serialize)]
struct Summary {
    session: String,
    #[serde(flatten)]
    info: SimulationInfo,
    report: SessionReport,
    events_logged: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let session = logging::session_id(config.session_id.as_deref());
    let _guard = logging::setup_logging(&session)?;

    let simulation = SimulationBuilder::new(config).build()?;
    let info = simulation.info;
    let mut combat = simulation.session;

    let event_log = spawn_event_log(combat.subscribe_events());
    let cancel = combat.cancel_handle();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!(target: "combat::sim", "Interrupted, cancelling session");
            cancel.cancel();
        }
    });

    let report = combat.run().await;
    ctrl_c.abort();
    drop(combat);
    let events_logged = event_log.await?;
    let report = report?;

    let summary = Summary {
        session,
        info,
        report,
        events_logged,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
