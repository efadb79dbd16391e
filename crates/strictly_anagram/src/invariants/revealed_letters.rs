//! Revealed letters invariant: hints never reveal a letter outside the root.

use super::Invariant;
use crate::Round;

/// Invariant: every revealed letter occurs in the root word.
pub struct RevealedLettersInvariant;

impl Invariant<Round> for RevealedLettersInvariant {
    fn holds(round: &Round) -> bool {
        round
            .hints()
            .revealed()
            .iter()
            .all(|c| round.root().has_letter(*c))
    }

    fn description() -> &'static str {
        "Revealed letters are a subset of the root's letters"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RootWord;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_hints_hold() {
        let root = RootWord::new("PLANETS").expect("valid root");
        let mut round = Round::new(root, vec!["PLANT".into()], 5);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..6 {
            round.use_hint(&mut rng).expect("active");
            assert!(RevealedLettersInvariant::holds(&round));
        }
        assert_eq!(round.hints().revealed().len(), 6);
    }
}
