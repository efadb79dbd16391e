//! Contracts for the services a session depends on.
//!
//! The session only sees these traits. HTTP-backed implementations live in
//! [`word_list`](crate::WordListSource) and [`api_client`](crate::ApiClient);
//! tests plug in in-memory fakes.

use crate::error::ClientError;
use derive_getters::{Dissolve, Getters};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A root word with its full anagram list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Dissolve, new)]
pub struct WordBundle {
    /// The root word.
    word: String,
    /// Every candidate word spelled from the root.
    anagrams: Vec<String>,
}

/// A word with its human-readable definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Definition {
    /// The defined word.
    word: String,
    /// Its definition.
    definition: String,
}

/// One leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct HighScore {
    /// Player name.
    name: String,
    /// Submitted score.
    score: u64,
}

/// Leaderboard as returned by the score service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    /// Entries in service order.
    pub list: Vec<HighScore>,
}

/// Supplies a root word and its anagrams for a new round.
#[async_trait::async_trait]
pub trait WordSource: Send + Sync {
    /// Fetches a fresh root word and anagram list.
    async fn fetch_root_and_anagrams(&self) -> Result<WordBundle, ClientError>;
}

/// Looks up word definitions.
#[async_trait::async_trait]
pub trait DefinitionService: Send + Sync {
    /// Defines `word`. May be called repeatedly for the same word.
    async fn define(&self, word: &str) -> Result<Definition, ClientError>;
}

/// Stores and lists high scores.
#[async_trait::async_trait]
pub trait HighScoreService: Send + Sync {
    /// Submits `score` under `name`.
    async fn submit(&self, name: &str, score: u64) -> Result<(), ClientError>;

    /// Lists the leaderboard.
    async fn fetch(&self) -> Result<Vec<HighScore>, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_wire_format() {
        let json = r#"{"list":[{"name":"Ann","score":35},{"name":"Bo","score":12}]}"#;
        let scores: Scores = serde_json::from_str(json).expect("valid scores");
        assert_eq!(scores.list.len(), 2);
        assert_eq!(scores.list[0], HighScore::new("Ann".into(), 35));
    }

    #[test]
    fn test_definition_wire_format() {
        let json = r#"{"word":"tar","definition":"A dark, thick liquid."}"#;
        let definition: Definition = serde_json::from_str(json).expect("valid definition");
        assert_eq!(definition.word(), "tar");
        assert_eq!(definition.definition(), "A dark, thick liquid.");
    }

    #[test]
    fn test_bundle_dissolves() {
        let bundle = WordBundle::new("RATINGS".into(), vec!["RAT".into()]);
        let (word, anagrams) = bundle.dissolve();
        assert_eq!(word, "RATINGS");
        assert_eq!(anagrams, ["RAT"]);
    }
}
