//! Guess log, guess outcomes, and the pending-guess buffer.

use crate::letters::{RootWord, eq_ignore_case};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// How a word got into the guess log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Provenance {
    /// Found by the player.
    Earned,
    /// Filled in when the round finished, for the summary only.
    Autofilled,
}

/// One entry of the guess log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Guess {
    /// The word as the player typed it (or as listed, when autofilled).
    word: String,
    /// Where the entry came from.
    provenance: Provenance,
}

impl Guess {
    /// Returns true if the player found this word.
    pub fn is_earned(&self) -> bool {
        self.provenance == Provenance::Earned
    }
}

/// Result of submitting a guess. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum GuessOutcome {
    /// The word is in play and new; it was logged.
    #[display("Got it!")]
    Accepted,

    /// The word was found earlier, at `index` in the log.
    #[display("Already Guessed")]
    AlreadyGuessed {
        /// Position of the earlier entry.
        index: usize,
    },

    /// The word is not in play.
    #[display("Not in List")]
    NotInList,
}

/// Words found so far, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessLog {
    entries: Vec<Guess>,
}

impl GuessLog {
    /// All entries, earned and autofilled.
    pub fn entries(&self) -> &[Guess] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of `word` in the log, ignoring case.
    pub fn position_ignore_case(&self, word: &str) -> Option<usize> {
        self.entries.iter().position(|g| eq_ignore_case(&g.word, word))
    }

    /// Every logged word.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|g| g.word.as_str())
    }

    /// Words the player actually found.
    pub fn earned(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|g| g.is_earned())
            .map(|g| g.word.as_str())
    }

    pub(crate) fn push(&mut self, word: impl Into<String>, provenance: Provenance) {
        self.entries.push(Guess {
            word: word.into(),
            provenance,
        });
    }
}

/// Text the player is composing, plus the last accepted guess.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GuessBuffer {
    /// Current pending text.
    pending: String,
    /// Last guess that was accepted.
    last_accepted: Option<String>,
}

impl GuessBuffer {
    /// Replaces the pending text if every letter in it occurs in `root`.
    ///
    /// Returns false, leaving the buffer alone, otherwise.
    #[instrument(skip(self, root), fields(root = %root))]
    pub fn update(&mut self, root: &RootWord, text: &str) -> bool {
        if text.chars().all(|c| root.has_letter(c)) {
            self.pending = text.to_string();
            true
        } else {
            false
        }
    }

    /// Puts the last accepted guess back into the pending text.
    pub fn bring_back(&mut self) {
        if let Some(word) = &self.last_accepted {
            self.pending = word.clone();
        }
    }

    pub(crate) fn accept(&mut self, word: &str) {
        self.last_accepted = Some(word.to_string());
        self.pending.clear();
    }

    pub(crate) fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_messages() {
        assert_eq!(GuessOutcome::Accepted.to_string(), "Got it!");
        assert_eq!(GuessOutcome::AlreadyGuessed { index: 0 }.to_string(), "Already Guessed");
        assert_eq!(GuessOutcome::NotInList.to_string(), "Not in List");
    }

    #[test]
    fn test_log_lookup_ignores_case() {
        let mut log = GuessLog::default();
        log.push("Rat", Provenance::Earned);
        log.push("TRAIN", Provenance::Autofilled);
        assert_eq!(log.position_ignore_case("rAT"), Some(0));
        assert_eq!(log.position_ignore_case("train"), Some(1));
        assert_eq!(log.earned().collect::<Vec<_>>(), vec!["Rat"]);
        assert_eq!(log.words().count(), 2);
    }

    #[test]
    fn test_buffer_only_takes_root_letters() {
        let root = RootWord::new("RATINGS").expect("valid root");
        let mut buffer = GuessBuffer::default();
        assert!(buffer.update(&root, "sting"));
        assert_eq!(buffer.pending(), "sting");
        assert!(!buffer.update(&root, "zing"));
        assert_eq!(buffer.pending(), "sting");
    }

    #[test]
    fn test_bring_back_restores_last_accepted() {
        let mut buffer = GuessBuffer::default();
        buffer.bring_back();
        assert!(buffer.pending().is_empty());
        buffer.accept("rat");
        assert!(buffer.pending().is_empty());
        buffer.bring_back();
        assert_eq!(buffer.pending(), "rat");
    }
}
