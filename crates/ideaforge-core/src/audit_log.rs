//! Append-only JSONL record of round-trip outcomes. Entries carry counts,
//! timings and error kinds, never idea content.

use crate::errors::{CoreError, ErrorKind};
use crate::generation::RoundTrip;
use crate::models::ActivityEntry;
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::{BufRead, Write};
use std::path::Path;

/// Append an entry to the activity log.
/// Uses O_APPEND for atomic writes on POSIX systems.
pub fn append(path: &Path, action: &str, details: serde_json::Value) -> Result<(), CoreError> {
    let entry = ActivityEntry {
        timestamp: Utc::now(),
        action: action.to_string(),
        details,
    };

    let mut line = serde_json::to_string(&entry)
        .map_err(|e| CoreError::Io(format!("serializing activity entry: {e}")))?;
    line.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CoreError::Io(format!("opening activity log: {e}")))?;

    file.write_all(line.as_bytes())
        .map_err(|e| CoreError::Io(format!("writing activity log: {e}")))?;

    Ok(())
}

/// Details for a successful round trip.
pub fn success_details<T>(rt: &RoundTrip<T>, model: &str) -> serde_json::Value {
    serde_json::json!({
        "outcome": "ok",
        "model": model,
        "elapsed_ms": rt.elapsed_ms,
        "input_tokens": rt.input_tokens,
        "output_tokens": rt.output_tokens,
    })
}

/// Details for a failed round trip.
pub fn failure_details(kind: ErrorKind, model: &str) -> serde_json::Value {
    serde_json::json!({
        "outcome": "error",
        "model": model,
        "error_kind": kind.to_string(),
    })
}

/// Read activity entries, optionally filtered by time window.
/// Unreadable or malformed lines are skipped.
pub fn read_entries(
    path: &Path,
    since: Option<&DateTime<Utc>>,
) -> Result<Vec<ActivityEntry>, CoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = std::fs::File::open(path)
        .map_err(|e| CoreError::Io(format!("opening activity log: {e}")))?;
    let reader = std::io::BufReader::new(file);

    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => continue,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<ActivityEntry>(trimmed) {
            Ok(entry) => {
                if let Some(since) = since {
                    if entry.timestamp >= *since {
                        entries.push(entry);
                    }
                } else {
                    entries.push(entry);
                }
            }
            Err(_) => continue,
        }
    }

    Ok(entries)
}
