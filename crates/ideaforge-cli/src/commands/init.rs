use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use ideaforge_core::config::Config;
use ideaforge_core::db;

use super::{Paths, API_KEY_ENV};

pub fn run() -> Result<()> {
    let paths = Paths::resolve();
    std::fs::create_dir_all(&paths.dir).context("creating ~/.ideaforge/")?;

    if !paths.config.exists() {
        Config::default().save(&paths.config)?;
        println!("  {} {}", "Created".green(), paths.config.display());
    } else {
        println!("  {} {}", "Exists".yellow(), paths.config.display());
    }

    let store_existed = paths.store.exists();
    let conn = db::open_db(&paths.store)?;
    let is_wal = db::verify_wal_mode(&conn)?;
    println!(
        "  {}",
        store_line(store_existed, &paths.store.display().to_string(), is_wal)
    );

    println!();
    println!("{}", "ideaforge initialized successfully".green().bold());
    println!(
        "  Run {} (or export {}) to configure Gemini",
        "ideaforge key set <KEY>".cyan(),
        API_KEY_ENV.cyan()
    );

    Ok(())
}

fn store_line(existed: bool, path: &str, is_wal: bool) -> String {
    let label: ColoredString = if existed {
        "Exists".yellow()
    } else {
        "Created".green()
    };
    if is_wal {
        format!("{label} {path} (WAL mode)")
    } else {
        format!("{label} {path} (warning: WAL mode not enabled)")
    }
}
