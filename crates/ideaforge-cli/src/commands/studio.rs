use anyhow::Result;
use colored::Colorize;
use ideaforge_core::errors::CoreError;
use ideaforge_core::studio::Studio;
use std::io::{BufRead, Write};

use super::{build_studio, record_activity, Paths};
use crate::display;

#[derive(Debug, PartialEq)]
enum Command {
    Idea(Option<String>),
    Evaluate,
    Show,
    Key(String),
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (line, ""),
    };
    let command = match head.to_lowercase().as_str() {
        "idea" | "i" => Command::Idea((!rest.is_empty()).then(|| rest.to_string())),
        "evaluate" | "eval" | "e" => Command::Evaluate,
        "show" | "s" => Command::Show,
        "key" if !rest.is_empty() => Command::Key(rest.to_string()),
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Unknown(head.to_string()),
    };
    Some(command)
}

fn print_help() {
    println!("{}", "Commands".white().bold());
    println!("  {}    generate a new idea", "idea [category]".cyan());
    println!("  {}           evaluate the current idea", "evaluate".cyan());
    println!("  {}               show the current idea and evaluation", "show".cyan());
    println!("  {}          store a Gemini API key", "key <KEY>".cyan());
    println!("  {}               this help", "help".cyan());
    println!("  {}               leave the studio", "quit".cyan());
}

pub fn run() -> Result<()> {
    let paths = Paths::resolve();
    let studio = build_studio(&paths)?;
    let model = studio.config().gateway.model.clone();

    println!("{}", "ideaforge studio".cyan().bold());
    if studio.credential()?.is_none() {
        println!(
            "{}",
            "No API key configured. Type `key <KEY>` to set one.".yellow()
        );
    }
    println!("{}", "Type `help` for commands.".dimmed());

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", ">".cyan());
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let Some(command) = parse_command(&line?) else {
            continue;
        };

        match command {
            Command::Idea(category) => {
                println!("{}", "Generating idea...".dimmed());
                let outcome = studio.request_idea(category.as_deref());
                record_activity(&paths, "generate", &model, &outcome);
                match outcome {
                    Ok(rt) => display::print_idea(&rt.record),
                    Err(e) => report(&studio, &e),
                }
            }
            Command::Evaluate => {
                println!("{}", "Evaluating idea...".dimmed());
                let outcome = studio.request_evaluation();
                record_activity(&paths, "evaluate", &model, &outcome);
                match outcome {
                    Ok(rt) => display::print_evaluation(&rt.record),
                    Err(e) => report(&studio, &e),
                }
            }
            Command::Show => display::print_session(&studio.snapshot()),
            Command::Key(key) => match studio.set_credential(&key) {
                Ok(warnings) => {
                    for warning in &warnings {
                        println!("  {} {warning}", "Warning".yellow());
                    }
                    println!("  {} API key", "Saved".green());
                }
                Err(e) => println!("{} {e}", "Error:".red().bold()),
            },
            Command::Help => print_help(),
            Command::Quit => break,
            Command::Unknown(word) => {
                println!("Unknown command `{word}`. Type `help` for commands.");
            }
        }
    }

    Ok(())
}

fn report(studio: &Studio, err: &CoreError) {
    match err {
        CoreError::ConfigurationRequired => println!(
            "{}",
            "No API key configured. Type `key <KEY>` to set one.".yellow()
        ),
        CoreError::Busy(_) | CoreError::NoIdea => {
            println!("{}", err.kind().user_message().yellow())
        }
        _ => display::print_error(&studio.snapshot()),
    }
}
