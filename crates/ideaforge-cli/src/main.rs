mod commands;
mod display;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ideaforge", about = "Generate and evaluate startup ideas with Gemini")]
struct Cli {
    /// Show debug logs (raw model output, timings) on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize ideaforge: create ~/.ideaforge/, config, and credential store
    Init,
    /// Manage the Gemini API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// Generate one startup idea
    Generate {
        /// Pin the idea to a category (e.g. "Fintech")
        #[arg(long, short)]
        category: Option<String>,
        /// Also evaluate the generated idea
        #[arg(long)]
        evaluate: bool,
        /// Print the result as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
    /// Interactive session: generate and evaluate ideas in one place
    Studio,
    /// Show configuration, credential and activity summary
    Status,
    /// Show the activity log
    Log {
        /// Only entries newer than this (e.g. "7d", "24h")
        #[arg(long)]
        since: Option<String>,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store an API key
    Set {
        /// The key (Gemini keys start with "AIza")
        key: String,
    },
    /// Remove the stored API key
    Clear,
    /// Show whether a key is configured (masked)
    Show,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("ideaforge_core=debug,ideaforge_cli=debug")
    } else {
        EnvFilter::try_from_env("IDEAFORGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Key { action } => match action {
            KeyAction::Set { key } => commands::key::set(&key),
            KeyAction::Clear => commands::key::clear(),
            KeyAction::Show => commands::key::show(),
        },
        Commands::Generate {
            category,
            evaluate,
            json,
        } => commands::generate::run(category.as_deref(), evaluate, json),
        Commands::Studio => commands::studio::run(),
        Commands::Status => commands::status::run(),
        Commands::Log { since } => commands::log::run(since),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
