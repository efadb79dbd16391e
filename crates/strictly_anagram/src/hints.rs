//! Hint accrual and letter reveals.
//!
//! Every round comes with one free hint. Using it switches hint mode on;
//! after that each reveal spends an accrued hint. Accrued hints survive
//! from round to round, revealed letters do not.

use crate::letters::{RootWord, fold_upper};
use derive_getters::Getters;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Placeholder shown for letters that have not been revealed.
pub const MASK_CHAR: char = '_';

/// Result of asking for a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintOutcome {
    /// A new letter was revealed.
    Revealed(char),
    /// No hint was available; nothing changed.
    NoHintsLeft,
    /// Every root letter is already revealed; nothing changed.
    AllRevealed,
}

/// Hint bookkeeping for one round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct HintState {
    /// Hints carried over from earlier rounds.
    accrued: u32,
    /// Whether the free hint of this round has been used.
    active: bool,
    /// Uppercased root letters shown to the player.
    revealed: BTreeSet<char>,
}

impl HintState {
    /// Fresh round state with `accrued` carried-over hints.
    pub fn with_accrued(accrued: u32) -> Self {
        Self {
            accrued,
            ..Self::default()
        }
    }

    /// Hints the player can still use this round.
    pub fn hint_count(&self) -> u32 {
        self.accrued + u32::from(!self.active)
    }

    /// Adds one accrued hint.
    pub fn grant(&mut self) {
        self.accrued += 1;
    }

    /// Reveals one random unrevealed letter of `root`.
    ///
    /// Letters are drawn from the root's spelling, so a doubled letter is
    /// twice as likely to come up. Nothing is spent when there is nothing
    /// left to reveal.
    #[instrument(skip(self, root, rng), fields(root = %root, hint_count = self.hint_count()))]
    pub fn use_hint<R: Rng + ?Sized>(&mut self, root: &RootWord, rng: &mut R) -> HintOutcome {
        if self.hint_count() == 0 {
            debug!("No hints left");
            return HintOutcome::NoHintsLeft;
        }

        let hidden: Vec<char> = root
            .letters()
            .map(fold_upper)
            .filter(|c| !self.revealed.contains(c))
            .collect();
        let Some(&letter) = hidden.choose(rng) else {
            debug!("All letters already revealed");
            return HintOutcome::AllRevealed;
        };

        if self.active {
            self.accrued -= 1;
        } else {
            self.active = true;
        }
        self.revealed.insert(letter);
        debug!(%letter, remaining = self.hint_count(), "Revealed letter");
        HintOutcome::Revealed(letter)
    }

    /// Masks every letter of `word` that has not been revealed.
    pub fn mask(&self, word: &str) -> String {
        word.chars()
            .map(|c| {
                if c.is_alphabetic() && !self.revealed.contains(&fold_upper(c)) {
                    MASK_CHAR
                } else {
                    c
                }
            })
            .collect()
    }
}
