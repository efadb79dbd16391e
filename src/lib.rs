//! Strictly Words library - word-anagram puzzle sessions
//!
//! This library wraps the pure round logic of [`strictly_anagram`] in a
//! session that talks to a word source, a definition service, and a
//! high-score board.
//!
//! # Architecture
//!
//! - **Session**: round lifecycle, carried-over hints, messages
//! - **Collaborators**: traits for the word source and the game API
//! - **Word list**: word source backed by a newline-separated list
//! - **API client**: HTTP definitions and high scores
//! - **Definitions**: cache and time-bounded lookups
//! - **Config**: TOML settings with defaults
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use strictly_words::{ApiClient, GameSession, WordListSource};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let source = Arc::new(WordListSource::from_file("words.txt"));
//! let api = Arc::new(ApiClient::new("http://localhost:8080", Duration::from_secs(30))?);
//!
//! let mut session = GameSession::new(source, api.clone(), api);
//! session.start_new_game().await?;
//! println!("{:?}", session.submit_guess("rat")?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api_client;
mod collaborators;
mod config;
mod definitions;
mod error;
mod session;
mod word_list;

// Crate-level exports - Collaborator contracts
pub use collaborators::{
    Definition, DefinitionService, HighScore, HighScoreService, Scores, WordBundle, WordSource,
};

// Crate-level exports - Implementations
pub use api_client::ApiClient;
pub use word_list::{DEFAULT_WORD_LIST_URL, WordListSource, bundle_from_words, parse_word_list};

// Crate-level exports - Definitions
pub use definitions::{DEFAULT_DEFINITION_TIMEOUT, DefinitionCache, define_within};

// Crate-level exports - Config
pub use config::{CONFIG_ENV_VAR, ConfigError, WordsConfig};

// Crate-level exports - Errors
pub use error::{ClientError, SessionError};

// Crate-level exports - Session
pub use session::{
    DefinitionRequest, FetchedDefinition, FetchedGame, GameSession, NewGameOutcome,
    PendingDefinition, PendingGame, SessionPhase,
};

// Crate-level exports - Round logic
pub use strictly_anagram::{
    GuessOutcome, HintOutcome, Provenance, RootWord, Round, RoundSummary, ScoreLine,
};
