pub mod generate;
pub mod init;
pub mod key;
pub mod log;
pub mod status;
pub mod studio;

use anyhow::{Context, Result};
use ideaforge_core::audit_log;
use ideaforge_core::config::{ideaforge_dir, Config};
use ideaforge_core::db::SqliteStore;
use ideaforge_core::errors::CoreError;
use ideaforge_core::generation::gemini::GeminiGateway;
use ideaforge_core::generation::RoundTrip;
use ideaforge_core::studio::Studio;
use std::path::PathBuf;

/// Environment variable consulted when no key is stored.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Paths under ~/.ideaforge/.
pub struct Paths {
    pub dir: PathBuf,
    pub config: PathBuf,
    pub store: PathBuf,
    pub activity: PathBuf,
}

impl Paths {
    pub fn resolve() -> Self {
        let dir = ideaforge_dir();
        Self {
            config: dir.join("config.toml"),
            store: dir.join("store.db"),
            activity: dir.join("activity.jsonl"),
            dir,
        }
    }
}

/// Open the credential store, creating ~/.ideaforge/ if needed.
pub fn open_store(paths: &Paths) -> Result<SqliteStore> {
    std::fs::create_dir_all(&paths.dir).context("creating ~/.ideaforge/")?;
    Ok(SqliteStore::open(&paths.store)?)
}

/// Wire the Gemini gateway, credential store and config into a studio.
pub fn build_studio(paths: &Paths) -> Result<Studio> {
    let config = Config::load(&paths.config)?;
    let gateway = GeminiGateway::new(&config.gateway)?;
    let store = open_store(paths)?;
    let studio = Studio::new(config, Box::new(gateway), Box::new(store))
        .with_fallback_credential(std::env::var(API_KEY_ENV).ok());
    Ok(studio)
}

/// Record a round-trip outcome. Log failures are reported, never fatal.
pub fn record_activity<T>(
    paths: &Paths,
    action: &str,
    model: &str,
    outcome: &Result<RoundTrip<T>, CoreError>,
) {
    let details = match outcome {
        Ok(rt) => audit_log::success_details(rt, model),
        // Precondition failures never reached the gateway
        Err(CoreError::ConfigurationRequired | CoreError::Busy(_) | CoreError::NoIdea) => return,
        Err(e) => audit_log::failure_details(e.kind(), model),
    };
    if let Err(e) = audit_log::append(&paths.activity, action, details) {
        tracing::warn!(error = %e, "could not write activity log");
    }
}
