//! One played root word, from first guess to finished summary.

use crate::anagrams::AnagramSet;
use crate::guess::{GuessBuffer, GuessLog, GuessOutcome, Provenance};
use crate::hints::{HintOutcome, HintState};
use crate::invariants::{InvariantSet, RoundInvariants};
use crate::letters::RootWord;
use crate::scoring::{ScoreLine, score, score_info};
use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Phase of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum RoundPhase {
    /// Guesses are accepted.
    Active,
    /// The score is frozen and the log holds every word.
    Finished,
}

/// Error for an operation the round's phase does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RoundError {
    /// The round has already been finished.
    #[display("Round is already finished")]
    Finished,
}

impl std::error::Error for RoundError {}

/// End-of-round summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct RoundSummary {
    /// The root word that was played.
    root: String,
    /// Frozen score.
    score: u64,
    /// Words the player found.
    found: usize,
    /// Words in play.
    total: usize,
    /// Score per word length, longest first.
    breakdown: Vec<ScoreLine>,
    /// Whether the player earned a carried-over hint.
    carryover_earned: bool,
}

/// A single round of the puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    root: RootWord,
    anagrams: AnagramSet,
    guesses: GuessLog,
    hints: HintState,
    buffer: GuessBuffer,
    phase: RoundPhase,
    frozen_score: Option<u64>,
    carryover_earned: Option<bool>,
}

impl Round {
    /// Starts a round on `root` with the provider's raw anagram list and
    /// `accrued_hints` carried over from earlier rounds.
    #[instrument(skip(root, raw_anagrams), fields(root = %root, raw = raw_anagrams.len()))]
    pub fn new(root: RootWord, raw_anagrams: Vec<String>, accrued_hints: u32) -> Self {
        let anagrams = AnagramSet::new(raw_anagrams);
        info!(playable = anagrams.len(), "Round started");
        Self {
            root,
            anagrams,
            guesses: GuessLog::default(),
            hints: HintState::with_accrued(accrued_hints),
            buffer: GuessBuffer::default(),
            phase: RoundPhase::Active,
            frozen_score: None,
            carryover_earned: None,
        }
    }

    /// The root word.
    pub fn root(&self) -> &RootWord {
        &self.root
    }

    /// The anagram set.
    pub fn anagrams(&self) -> &AnagramSet {
        &self.anagrams
    }

    /// The guess log.
    pub fn guesses(&self) -> &GuessLog {
        &self.guesses
    }

    /// Hint state.
    pub fn hints(&self) -> &HintState {
        &self.hints
    }

    /// Pending guess buffer.
    pub fn buffer(&self) -> &GuessBuffer {
        &self.buffer
    }

    /// Current phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Returns true once the round is finished.
    pub fn is_finished(&self) -> bool {
        self.phase == RoundPhase::Finished
    }

    fn ensure_active(&self) -> Result<(), RoundError> {
        match self.phase {
            RoundPhase::Active => Ok(()),
            RoundPhase::Finished => {
                warn!(root = %self.root, "Operation on finished round");
                Err(RoundError::Finished)
            }
        }
    }

    fn debug_check(&self) {
        debug_assert!(
            RoundInvariants::check_all(self).is_ok(),
            "round invariants violated: {:?}",
            RoundInvariants::check_all(self)
        );
    }

    /// Checks `word` against the log and the anagram set.
    ///
    /// A repeat is reported as [`GuessOutcome::AlreadyGuessed`] before the
    /// set is even consulted.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::Finished`] once the round is over.
    #[instrument(skip(self), fields(root = %self.root))]
    pub fn submit_guess(&mut self, word: &str) -> Result<GuessOutcome, RoundError> {
        self.ensure_active()?;
        let word = word.trim();

        let outcome = if let Some(index) = self.guesses.position_ignore_case(word) {
            GuessOutcome::AlreadyGuessed { index }
        } else if !word.is_empty() && self.anagrams.contains_ignore_case(word) {
            self.guesses.push(word, Provenance::Earned);
            self.buffer.accept(word);
            GuessOutcome::Accepted
        } else {
            GuessOutcome::NotInList
        };

        debug!(%outcome, logged = self.guesses.len(), "Guess checked");
        self.debug_check();
        Ok(outcome)
    }

    /// Replaces the pending guess text; see [`GuessBuffer::update`].
    pub fn update_guess(&mut self, text: &str) -> bool {
        self.buffer.update(&self.root, text)
    }

    /// Restores the last accepted guess into the pending text.
    pub fn bring_back_word(&mut self) {
        self.buffer.bring_back();
    }

    /// Submits the pending text as a guess.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::Finished`] once the round is over.
    pub fn submit_pending(&mut self) -> Result<GuessOutcome, RoundError> {
        let pending = self.buffer.pending().clone();
        self.submit_guess(&pending)
    }

    /// Reveals one more root letter if a hint is available.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::Finished`] once the round is over.
    pub fn use_hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<HintOutcome, RoundError> {
        self.ensure_active()?;
        let outcome = self.hints.use_hint(&self.root, rng);
        self.debug_check();
        Ok(outcome)
    }

    /// Reorders the displayed root letters.
    pub fn shuffle_letters<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.root.shuffle(rng);
    }

    /// Current score: live while active, frozen once finished.
    pub fn score(&self) -> u64 {
        match self.frozen_score {
            Some(frozen) => frozen,
            None => score(&self.earned_words()),
        }
    }

    /// Per-length breakdown of the earned words, longest first.
    pub fn score_info(&self) -> Vec<ScoreLine> {
        score_info(&self.earned_words())
    }

    fn earned_words(&self) -> Vec<&str> {
        self.guesses.earned().collect()
    }

    /// Whether this round's own guesses earn a hint for the next round.
    ///
    /// Once finished this is the value recorded before autofill.
    pub fn carryover_earned(&self) -> bool {
        self.carryover_earned
            .unwrap_or_else(|| self.anagrams.carryover_bar_met(self.guesses.earned()))
    }

    /// Playable words not yet in the log.
    pub fn unguessed(&self) -> impl Iterator<Item = &str> {
        self.anagrams
            .words()
            .iter()
            .map(String::as_str)
            .filter(|w| self.guesses.position_ignore_case(w).is_none())
    }

    /// Unguessed words with unrevealed letters masked.
    pub fn masked_unguessed(&self) -> Vec<String> {
        self.unguessed().map(|w| self.hints.mask(w)).collect()
    }

    /// Finishes the round.
    ///
    /// The score and the carry-over flag are fixed from the earned guesses
    /// first; only then are the remaining words appended as autofilled
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::Finished`] if the round was already finished.
    #[instrument(skip(self), fields(root = %self.root))]
    pub fn finish(&mut self) -> Result<RoundSummary, RoundError> {
        self.ensure_active()?;

        let frozen = self.score();
        let carryover = self.carryover_earned();
        let found = self.guesses.len();
        let remaining: Vec<String> = self.unguessed().map(str::to_string).collect();

        self.frozen_score = Some(frozen);
        self.carryover_earned = Some(carryover);
        for word in remaining {
            self.guesses.push(word, Provenance::Autofilled);
        }
        self.buffer.clear();
        self.phase = RoundPhase::Finished;
        self.debug_check();

        info!(score = frozen, found, total = self.anagrams.len(), carryover, "Round finished");
        Ok(self.summary())
    }

    /// Summary of the round so far.
    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            root: self.root.as_str().to_string(),
            score: self.score(),
            found: self.guesses.earned().count(),
            total: self.anagrams.len(),
            breakdown: self.score_info(),
            carryover_earned: self.carryover_earned(),
        }
    }

    /// Stored frozen score, if finished.
    pub(crate) fn frozen_score(&self) -> Option<u64> {
        self.frozen_score
    }

    #[cfg(test)]
    pub(crate) fn guesses_mut(&mut self) -> &mut GuessLog {
        &mut self.guesses
    }
}
