//! Strictly Words - Unified CLI
//!
//! Plays word-anagram rounds in the terminal and shows the high-score board.

#![warn(missing_docs)]

mod cli;
mod play;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use strictly_words::{ApiClient, GameSession, WordListSource, WordsConfig};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let config =
        WordsConfig::load(cli.config.as_deref())?.with_word_list_path(cli.words_file.clone());

    match cli.command {
        Command::Play { name, seed } => run_play(&config, name, seed).await,
        Command::Scores => run_scores(&config).await,
    }
}

/// Logs go to stderr so they never mix with the game on stdout.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[instrument(skip(config))]
fn build_session(config: &WordsConfig, seed: Option<u64>) -> Result<GameSession> {
    let source = match config.word_list_path() {
        Some(path) => {
            info!(path = %path.display(), "Using local word list");
            WordListSource::from_file(path)
        }
        None => {
            info!(url = %config.word_list_url(), "Using remote word list");
            WordListSource::from_url(config.word_list_url(), config.request_timeout())?
        }
    };
    let source = match seed {
        Some(seed) => source.with_seed(seed),
        None => source,
    };

    let api = Arc::new(ApiClient::new(
        config.api_base_url(),
        config.request_timeout(),
    )?);

    let mut session = GameSession::new(Arc::new(source), api.clone(), api)
        .with_definition_timeout(config.definition_timeout());
    if let Some(seed) = seed {
        session = session.with_rng(StdRng::seed_from_u64(seed));
    }
    Ok(session)
}

/// Run the interactive game
#[instrument(skip(config))]
async fn run_play(config: &WordsConfig, name: Option<String>, seed: Option<u64>) -> Result<()> {
    let mut session = build_session(config, seed)?;
    let name = name.or_else(|| config.player_name().clone());
    play::run(&mut session, name).await
}

/// Print the high-score board
#[instrument(skip(config))]
async fn run_scores(config: &WordsConfig) -> Result<()> {
    let mut session = build_session(config, None)?;
    let mut scores = session.fetch_high_scores().await?;
    scores.sort_by(|a, b| b.score().cmp(a.score()));

    if scores.is_empty() {
        println!("No high scores yet.");
    }
    for (rank, entry) in scores.iter().enumerate() {
        println!("{:>3}. {:<20} {}", rank + 1, entry.name(), entry.score());
    }
    Ok(())
}
