use anyhow::Result;
use colored::Colorize;
use ideaforge_core::errors::CoreError;
use ideaforge_core::studio::Studio;

use super::{build_studio, record_activity, Paths, API_KEY_ENV};
use crate::display;

pub fn run(category: Option<&str>, evaluate: bool, json: bool) -> Result<()> {
    let paths = Paths::resolve();
    let studio = build_studio(&paths)?;
    let model = studio.config().gateway.model.clone();

    if !json {
        println!("{}", "Generating idea...".dimmed());
    }
    let outcome = studio.request_idea(category);
    record_activity(&paths, "generate", &model, &outcome);
    let idea = match outcome {
        Ok(rt) => rt.record,
        Err(e) => return Err(report(&studio, e)),
    };

    let evaluation = if evaluate {
        if !json {
            println!("{}", "Evaluating idea...".dimmed());
        }
        let outcome = studio.request_evaluation();
        record_activity(&paths, "evaluate", &model, &outcome);
        match outcome {
            Ok(rt) => Some(rt.record),
            Err(e) => {
                // The idea is still worth showing
                if json {
                    println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "idea": idea }))?);
                } else {
                    println!();
                    display::print_idea(&idea);
                }
                return Err(report(&studio, e));
            }
        }
    } else {
        None
    };

    if json {
        let out = serde_json::json!({ "idea": idea, "evaluation": evaluation });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    display::print_idea(&idea);
    if let Some(evaluation) = &evaluation {
        println!();
        display::print_evaluation(evaluation);
    }
    Ok(())
}

/// Print the session's error slot and turn the failure into a CLI error.
fn report(studio: &Studio, err: CoreError) -> anyhow::Error {
    if matches!(err, CoreError::ConfigurationRequired) {
        return anyhow::anyhow!(
            "no API key configured. Run `ideaforge key set <KEY>` or set {API_KEY_ENV}"
        );
    }
    let state = studio.snapshot();
    let message = state
        .error_message()
        .unwrap_or_else(|| err.kind().user_message());
    if let Some(diagnostic) = state.diagnostic() {
        tracing::debug!("{diagnostic}");
    }
    anyhow::anyhow!("{message} ({})", err.kind())
}
