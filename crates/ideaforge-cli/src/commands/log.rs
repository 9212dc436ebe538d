use anyhow::Result;
use chrono::{Duration, Utc};
use colored::Colorize;
use ideaforge_core::audit_log;

use super::Paths;

pub fn run(since: Option<String>) -> Result<()> {
    let paths = Paths::resolve();

    if !paths.activity.exists() {
        println!(
            "{}",
            "No activity yet. Run `ideaforge generate` or `ideaforge studio` first.".yellow()
        );
        return Ok(());
    }

    let since_time = since.as_deref().map(parse_duration_str).transpose()?;
    let entries = audit_log::read_entries(&paths.activity, since_time.as_ref())?;

    if entries.is_empty() {
        let msg = match &since {
            Some(s) => format!("No activity in the last {s}."),
            None => "No activity recorded.".to_string(),
        };
        println!("{}", msg.yellow());
        return Ok(());
    }

    println!(
        "{} ({} entries):",
        "Activity".bold(),
        entries.len().to_string().cyan()
    );
    println!();

    for entry in &entries {
        let time_str = entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC");
        let failed = entry.details["outcome"] == "error";
        let action = match (entry.action.as_str(), failed) {
            (_, true) => entry.action.red(),
            ("generate", _) => entry.action.cyan(),
            ("evaluate", _) => entry.action.magenta(),
            _ => entry.action.white(),
        };
        println!("  {} {}", time_str.to_string().dimmed(), action);

        if let Some(obj) = entry.details.as_object() {
            let parts: Vec<String> = obj
                .iter()
                .map(|(key, value)| match value {
                    serde_json::Value::String(s) => format!("{key}={s}"),
                    other => format!("{key}={other}"),
                })
                .collect();
            if !parts.is_empty() {
                println!("    {}", parts.join(", ").dimmed());
            }
        }
    }

    Ok(())
}

/// Parse duration strings like "7d", "30d", "24h" into a DateTime.
pub(crate) fn parse_duration_str(s: &str) -> Result<chrono::DateTime<Utc>> {
    let s = s.trim();
    let invalid = || anyhow::anyhow!("invalid duration: {s}. Use format like '7d' or '24h'");

    let (digits, to_duration): (&str, fn(i64) -> Option<Duration>) =
        if let Some(days) = s.strip_suffix('d') {
            (days, Duration::try_days)
        } else if let Some(hours) = s.strip_suffix('h') {
            (hours, Duration::try_hours)
        } else {
            // Default to days
            (s, Duration::try_days)
        };

    let n: i64 = digits.parse().map_err(|_| invalid())?;
    let window = to_duration(n).ok_or_else(invalid)?;
    Utc::now().checked_sub_signed(window).ok_or_else(invalid)
}
