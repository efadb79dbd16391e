//! Frozen score invariant: autofill never changes the score.

use super::Invariant;
use crate::Round;
use crate::scoring::score;

/// Invariant: a finished round's frozen score equals the score of its
/// earned guesses alone.
pub struct FrozenScoreInvariant;

impl Invariant<Round> for FrozenScoreInvariant {
    fn holds(round: &Round) -> bool {
        match round.frozen_score() {
            None => !round.is_finished(),
            Some(frozen) => {
                let earned: Vec<&str> = round.guesses().earned().collect();
                round.is_finished() && frozen == score(&earned)
            }
        }
    }

    fn description() -> &'static str {
        "Frozen score is set exactly when finished and counts earned guesses only"
    }
}
