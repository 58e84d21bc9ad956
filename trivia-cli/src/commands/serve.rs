//! HTTP server command

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use trivia_server::db::migrations;
use trivia_server::http::{run_server, ServerConfig};
use trivia_server::{MemoryStore, PgStore, TriviaConfig, TriviaStore};

use super::{connect, DatabaseArgs};

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:5000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Questions per page on paginated routes (default: 10)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Serve the sample data from memory instead of PostgreSQL
    #[arg(long, conflicts_with = "database_url")]
    pub in_memory: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Run the HTTP server until shutdown
pub async fn run_serve(args: ServeArgs, mut config: TriviaConfig) -> Result<()> {
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(page_size) = args.page_size {
        config.api.questions_per_page = page_size;
    }
    config.validate()?;

    let store: Arc<dyn TriviaStore> = if args.in_memory {
        tracing::info!("Using in-memory store with sample data");
        Arc::new(MemoryStore::seeded())
    } else {
        let pool = connect(&args.db, &config).await?;
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
        Arc::new(PgStore::new(pool))
    };

    run_server(store, ServerConfig::from(&config))
        .await
        .context("Server error")?;

    Ok(())
}
