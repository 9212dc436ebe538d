use anyhow::Result;
use colored::Colorize;
use ideaforge_core::credentials::{self, mask_key};

use super::{open_store, Paths, API_KEY_ENV};

pub fn set(key: &str) -> Result<()> {
    let store = open_store(&Paths::resolve())?;
    let warnings = credentials::save_credential(&store, key)?;

    for warning in &warnings {
        println!("  {} {warning}", "Warning".yellow());
    }
    println!("  {} API key {}", "Saved".green(), mask_key(key.trim()));
    Ok(())
}

pub fn clear() -> Result<()> {
    let store = open_store(&Paths::resolve())?;
    if credentials::clear_credential(&store)? {
        println!("  {} stored API key", "Removed".green());
    } else {
        println!("  {} no stored API key", "Note".dimmed());
    }
    Ok(())
}

pub fn show() -> Result<()> {
    let store = open_store(&Paths::resolve())?;
    match credentials::load_credential(&store)? {
        Some(key) => println!("  {} {}", "Stored:".white(), mask_key(&key).cyan()),
        None => match std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()) {
            Some(key) => println!(
                "  {} {} (from {})",
                "Environment:".white(),
                mask_key(key.trim()).cyan(),
                API_KEY_ENV
            ),
            None => println!(
                "{}",
                "No API key configured. Run `ideaforge key set <KEY>`.".yellow()
            ),
        },
    }
    Ok(())
}
