//! bgg-compare - score how similar two BGG users' game collections are

use anyhow::{Context, Result};
use clap::Parser;

use bgg_similarity::{config::Config, services::compare_users, services::BggClient, telemetry};

/// Compare two BGG users' game tastes.
#[derive(Parser)]
#[command(name = "bgg-compare")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// BGG username of the first user.
    user1: String,

    /// BGG username of the second user.
    user2: String,

    /// How many collection items per user to compare
    #[arg(short, long)]
    limit: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing("warn");

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let client = BggClient::from_config(&config).context("Failed to build BGG client")?;
    let limit = cli.limit.unwrap_or(config.top_games_limit);

    let report = compare_users(&client, &cli.user1, &cli.user2, limit).await;

    println!(
        "Similarity Score between {} and {}: {:.2}",
        cli.user1, cli.user2, report.score
    );

    Ok(())
}
