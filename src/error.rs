//! Error types for game sessions and their collaborators.

use crate::session::SessionPhase;
use derive_more::{Display, Error};
use tracing::instrument;

/// Failure talking to an external collaborator, with location tracking.
///
/// These never leave the session: [`GameSession`](crate::GameSession)
/// logs them and reports a [`SessionError`] instead.
#[derive(Debug, Clone, Display, Error)]
#[display("Client error: {} at {}:{}", message, file, line)]
pub struct ClientError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ClientError {
    /// Creates a new client error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("HTTP error: {}", err))
    }
}

impl From<std::io::Error> for ClientError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

/// Failures reported at the session boundary.
///
/// Guess outcomes are not errors; see
/// [`GuessOutcome`](strictly_anagram::GuessOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SessionError {
    /// The word source failed; the session is back to not started.
    #[display("Something went wrong loading a new word")]
    SourceUnavailable,

    /// The definition lookup failed or timed out.
    #[display("Couldn't find a definition for '{}'", _0)]
    DefinitionUnavailable(String),

    /// The high score could not be submitted; submission stays open.
    #[display("Couldn't submit your high score")]
    HighScoreSubmitFailed,

    /// The leaderboard could not be loaded.
    #[display("Couldn't load the high scores")]
    HighScoresUnavailable,

    /// The operation is not allowed in the current phase.
    #[display("Can't {} while the game is {}", operation, phase)]
    InvalidPhase {
        /// The rejected operation.
        operation: &'static str,
        /// Phase at the time.
        phase: SessionPhase,
    },
}

impl std::error::Error for SessionError {}

impl SessionError {
    /// Returns true for failures the player can simply dismiss.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::SourceUnavailable | Self::InvalidPhase { .. })
    }
}
