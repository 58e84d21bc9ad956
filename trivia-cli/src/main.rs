//! trivia CLI - run and prepare the trivia API server
//!
//! - `serve`: run the HTTP API (PostgreSQL, or built-in sample data with `--in-memory`)
//! - `migrate`: create the schema
//! - `seed`: create the schema and load the standard categories and sample questions

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use trivia_server::TriviaConfig;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "trivia",
    author,
    version,
    about = "Trivia question API: questions, categories and quizzes over HTTP"
)]
struct Cli {
    /// Debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    /// Config file (default: ~/.trivia/config.toml when present)
    #[arg(long, short = 'c', global = true, env = "TRIVIA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create tables and indexes (idempotent)
    Migrate(commands::DatabaseArgs),
    /// Load the standard categories and sample questions (idempotent)
    Seed(commands::DatabaseArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    let config =
        TriviaConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config).await,
        Commands::Migrate(args) => commands::run_migrate(args, &config).await,
        Commands::Seed(args) => commands::run_seed(args, &config).await,
    };

    tracing_setup::shutdown_otel();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_flags_parse() {
        let cli = Cli::try_parse_from([
            "trivia", "--debug", "serve", "--bind", "0.0.0.0:8080", "--page-size", "5",
        ])
        .unwrap();

        assert!(cli.debug);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.bind.map(|b| b.port()), Some(8080));
                assert_eq!(args.page_size, Some(5));
                assert!(!args.in_memory);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn in_memory_conflicts_with_database_url() {
        let result = Cli::try_parse_from([
            "trivia",
            "serve",
            "--in-memory",
            "--database-url",
            "postgres://localhost/trivia",
        ]);
        assert!(result.is_err());
    }
}
