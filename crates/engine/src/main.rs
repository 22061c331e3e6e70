//! RaidLedger Engine - profile maintenance entry point.
//!
//! Loads every stored profile (repairing what it can), then writes back the
//! ones that changed.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use raidledger_engine::infrastructure::{
    profile_files::JsonFileProfileStorage,
    settings::{load_raid_settings, SETTINGS_PATH_VAR},
};
use raidledger_engine::stores::ProfileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "raidledger_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RaidLedger profile maintenance");

    let settings_path = std::env::var(SETTINGS_PATH_VAR).ok().map(PathBuf::from);
    let settings = load_raid_settings(settings_path.as_deref())
        .await
        .context("loading raid settings")?;
    tracing::debug!(?settings, "Raid settings resolved");

    let profiles_dir = std::env::var("PROFILES_DIR").unwrap_or_else(|_| "profiles".into());
    let storage = JsonFileProfileStorage::new(&profiles_dir)
        .await
        .with_context(|| format!("opening profile directory {profiles_dir}"))?;
    let store = ProfileStore::new(Arc::new(storage));

    let report = store.load_all().await.context("loading profiles")?;
    tracing::info!(
        loaded = report.loaded,
        repaired = report.repaired,
        skipped = report.skipped,
        "Profiles loaded"
    );

    let written = store.save_all().await.context("saving profiles")?;
    tracing::info!(written, "Profile maintenance complete");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
