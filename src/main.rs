//! Social Media Statistics Board
//!
//! A daemon that aggregates follower/view counts and live status across
//! platforms and publishes them to a display board.

use clap::{Parser, Subcommand};
use statboard::{
    aggregator::Aggregator,
    board::{publish_fallback, DisplayBoard},
    config::Config,
    scheduler::Scheduler,
    sources,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "statboard")]
#[command(about = "Social media statistics aggregation board")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the refresh scheduler
    Run {
        /// Run a single refresh cycle and exit
        #[arg(long)]
        once: bool,
    },
    /// Fill every slot with offline placeholders, no network
    Fallback,
    /// List configured sources
    Sources,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { once } => run_board(Config::load(&cli.config)?, once).await,
        Commands::Sources => show_sources(Config::load(&cli.config)?),
        Commands::Fallback => show_fallback(),
    }
}

async fn run_board(config: Config, once: bool) -> anyhow::Result<()> {
    tracing::info!("Starting statboard");

    if !config.has_sources() {
        tracing::warn!("No platform sections configured; try `statboard fallback`");
    }

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.aggregator.request_timeout_secs))
        .build()?;

    let board = Arc::new(DisplayBoard::with_default_slots());
    let sources = sources::build_sources(&config, &http);
    tracing::info!("{} sources registered", sources.len());

    let aggregator = Arc::new(Aggregator::new(sources, Arc::clone(&board)));

    if once {
        aggregator.refresh_once().await;
        println!("{}", board.render());
        return Ok(());
    }

    let scheduler = Scheduler::new(
        Arc::clone(&aggregator),
        Duration::from_secs(config.aggregator.refresh_interval_secs),
    );
    scheduler.start().await?;

    tokio::signal::ctrl_c().await?;
    scheduler.stop().await;

    println!("{}", board.render());
    Ok(())
}

fn show_sources(config: Config) -> anyhow::Result<()> {
    let http = reqwest::Client::new();
    let sources = sources::build_sources(&config, &http);

    if sources.is_empty() {
        println!("No sources configured");
        return Ok(());
    }

    println!("{:<12} metrics", "platform");
    println!("{}", "-".repeat(40));
    for source in sources {
        println!(
            "{:<12} {}",
            source.platform().id(),
            source.metric_keys().join(", ")
        );
    }

    Ok(())
}

fn show_fallback() -> anyhow::Result<()> {
    let board = DisplayBoard::with_default_slots();
    publish_fallback(&board);
    println!("{}", board.render());
    Ok(())
}
