//! Guess log invariant: every entry is in play, and no word appears twice.

use super::Invariant;
use crate::Round;
use crate::letters::eq_ignore_case;

/// Invariant: the log only holds playable words, each at most once.
pub struct GuessLogInvariant;

impl Invariant<Round> for GuessLogInvariant {
    fn holds(round: &Round) -> bool {
        let words: Vec<&str> = round.guesses().words().collect();

        let all_in_play = words.iter().all(|w| round.anagrams().contains_ignore_case(w));
        let unique = words
            .iter()
            .enumerate()
            .all(|(i, w)| !words[..i].iter().any(|earlier| eq_ignore_case(earlier, w)));

        all_in_play && unique
    }

    fn description() -> &'static str {
        "Guess log holds only playable words, without duplicates"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guess::Provenance;
    use crate::RootWord;

    fn round() -> Round {
        let root = RootWord::new("RATINGS").expect("valid root");
        Round::new(root, vec!["RAT".into(), "STAR".into()], 0)
    }

    #[test]
    fn test_empty_round_holds() {
        assert!(GuessLogInvariant::holds(&round()));
    }

    #[test]
    fn test_repeat_guess_still_holds() {
        let mut round = round();
        round.submit_guess("rat").expect("active");
        round.submit_guess("Rat").expect("active");
        assert!(GuessLogInvariant::holds(&round));
    }

    #[test]
    fn test_corrupted_log_violates() {
        let mut round = round();
        round.submit_guess("rat").expect("active");
        round.guesses_mut().push("RAT", Provenance::Autofilled);
        assert!(!GuessLogInvariant::holds(&round));
    }

    #[test]
    fn test_foreign_word_violates() {
        let mut round = round();
        round.guesses_mut().push("ZEBRA", Provenance::Earned);
        assert!(!GuessLogInvariant::holds(&round));
    }
}
