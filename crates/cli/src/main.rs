mod commands;
mod serve;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use sustainiq_storage::{
    JsonFileStore, MemoryStore, SubmissionStore, TimestampIds, DEFAULT_DB_PATH,
};

use crate::commands::score::ScoreArgs;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// SustainIQ sustainability snapshot scoring.
#[derive(Parser)]
#[command(
    name = "sustainiq",
    version,
    about = "SustainIQ sustainability snapshot scoring"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the snapshot HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = serve::DEFAULT_PORT)]
        port: u16,
        /// Path to the JSON store document
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db: PathBuf,
        /// Keep submissions in memory only
        #[arg(long, conflicts_with = "db")]
        in_memory: bool,
    },

    /// Score one set of answers without recording it
    Score {
        /// Company size ("1–50", "51–200", "201+"; with --form: small, mid, large)
        #[arg(long)]
        size: String,
        /// Metric tracking ("Yes", "Somewhat", "No"; with --form: structured, partial, none)
        #[arg(long)]
        tracking: String,
        /// Main challenge (e.g. "Data collection"; with --form: data, compliance, cost, governance, story)
        #[arg(long)]
        challenge: String,
        /// Industry, recorded but not scored
        #[arg(long)]
        industry: Option<String>,
        /// Interpret answers as the web form's option values
        #[arg(long)]
        form: bool,
    },

    /// List recorded submissions, newest first
    History {
        /// Path to the JSON store document
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db: PathBuf,
        /// Show at most this many submissions
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    if let Err(e) = init_tracing(cli.quiet, default_level) {
        eprintln!("{e}");
    }

    match cli.command {
        Commands::Serve {
            port,
            db,
            in_memory,
        } => {
            let store: Arc<dyn SubmissionStore> = if in_memory {
                tracing::warn!("using in-memory store; submissions are lost on shutdown");
                Arc::new(MemoryStore::new())
            } else {
                tracing::info!(path = %db.display(), "using JSON file store");
                Arc::new(JsonFileStore::new(db))
            };
            let rt = runtime(cli.output, cli.quiet);
            let server = serve::start_server(port, store, Box::new(TimestampIds));
            if let Err(e) = rt.block_on(server) {
                report_error(&e.to_string(), cli.output, cli.quiet);
                process::exit(1);
            }
        }
        Commands::Score {
            size,
            tracking,
            challenge,
            industry,
            form,
        } => {
            let args = ScoreArgs {
                industry,
                size,
                tracking,
                challenge,
                form,
            };
            commands::score::cmd_score(args, cli.output, cli.quiet);
        }
        Commands::History { db, limit } => {
            let store = JsonFileStore::new(db);
            let rt = runtime(cli.output, cli.quiet);
            rt.block_on(commands::history::cmd_history(
                &store, limit, cli.output, cli.quiet,
            ));
        }
    }
}

fn runtime(output: OutputFormat, quiet: bool) -> tokio::runtime::Runtime {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            report_error(
                &format!("failed to create tokio runtime: {e}"),
                output,
                quiet,
            );
            process::exit(1);
        }
    }
}

/// Install the global subscriber. `SUSTAINIQ_LOG` overrides the level.
fn init_tracing(quiet: bool, default_level: &str) -> Result<(), String> {
    let level = if quiet { "error" } else { default_level };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SUSTAINIQ_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| format!("failed to initialize tracing subscriber: {e}"))
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
