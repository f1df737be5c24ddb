//! VTT Engine - boots the state layer from durable storage.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vtt_engine::infrastructure::clock::{SystemClock, SystemRandom};
use vtt_engine::infrastructure::config::{load_dotenv_from_repo_root, AppConfig};
use vtt_engine::infrastructure::storage::JsonFileStore;
use vtt_engine::App;

fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vtt_engine=debug,vtt_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting VTT Engine");

    let config = AppConfig::from_env();
    tracing::info!(
        data_dir = %config.data_dir.display(),
        rows = config.inventory_capacity.rows,
        cols = config.inventory_capacity.cols,
        notification_cap = config.notification_cap,
        "Configuration loaded"
    );

    let store = Arc::new(JsonFileStore::open(config.data_dir.clone())?);
    let mut app = App::new(
        config,
        store,
        Arc::new(SystemClock::new()),
        Arc::new(SystemRandom::new()),
    );

    let seeded = app.seed_if_empty()?;
    if seeded > 0 {
        tracing::info!(count = seeded, "Seeded starter content");
    }

    let summary = app.summary();
    tracing::info!(
        character = %app.character.name,
        creatures = summary.creatures,
        items = summary.items,
        tokens = summary.tokens,
        groups = summary.groups,
        ground_items = summary.ground_items,
        inventory = %format!("{}/{}", summary.inventory_entries, summary.inventory_slots),
        purse = %app.inventory.purse(),
        unread = summary.unread,
        "State loaded"
    );

    Ok(())
}
