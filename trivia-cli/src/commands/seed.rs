//! Sample data command

use anyhow::{Context, Result};

use trivia_server::db::{migrations, seed};
use trivia_server::TriviaConfig;

use super::{connect, DatabaseArgs};

/// Migrate, then insert the standard categories and, into an empty
/// questions table, the sample questions.
pub async fn run_seed(args: DatabaseArgs, config: &TriviaConfig) -> Result<()> {
    let pool = connect(&args, config).await?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    let report = seed::run(&pool).await.context("Failed to seed database")?;

    tracing::info!(
        categories = report.categories_inserted,
        questions = report.questions_inserted,
        "Seed complete"
    );
    if report.questions_inserted == 0 {
        tracing::info!("Questions table already had data; sample questions skipped");
    }

    pool.close().await;
    Ok(())
}
