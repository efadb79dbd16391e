//! First-class invariants for a round.
//!
//! Invariants are logical properties that must hold after every operation
//! on a [`Round`](crate::Round). Rounds check them in debug builds; each one
//! is also testable on its own.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod frozen_score;
pub mod guess_log;
pub mod revealed_letters;

pub use frozen_score::FrozenScoreInvariant;
pub use guess_log::GuessLogInvariant;
pub use revealed_letters::RevealedLettersInvariant;

/// All round invariants as a composable set.
pub type RoundInvariants = (
    GuessLogInvariant,
    RevealedLettersInvariant,
    FrozenScoreInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RootWord, Round};

    fn round() -> Round {
        let root = RootWord::new("RATINGS").expect("valid root");
        Round::new(root, vec!["RAT".into(), "STAR".into(), "GRAIN".into()], 1)
    }

    #[test]
    fn test_invariant_set_holds_for_new_round() {
        assert!(RoundInvariants::check_all(&round()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_finish() {
        let mut round = round();
        round.submit_guess("star").expect("active");
        round.finish().expect("active");
        assert!(RoundInvariants::check_all(&round).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_violation() {
        let mut round = round();
        round.submit_guess("rat").expect("active");
        round
            .guesses_mut()
            .push("RAT", crate::guess::Provenance::Autofilled);

        let violations = RoundInvariants::check_all(&round).expect_err("duplicate entry");
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            GuessLogInvariant::description()
        );
    }
}
