//! Round lifecycle tests against the public API.

use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_anagram::{
    GuessOutcome, HintOutcome, Provenance, RootWord, Round, RoundError, RoundPhase,
    is_anagram_compatible, score,
};

fn round_on(root: &str, words: &[&str], accrued: u32) -> Round {
    let root = RootWord::new(root).expect("valid root");
    Round::new(root, words.iter().map(|w| (*w).to_string()).collect(), accrued)
}

#[test]
fn test_triangle_scenario() {
    let mut round = round_on(
        "TRIANGLE",
        &["RAT", "TRAIN", "GRAIN", "ALERT", "INTEGRAL"],
        0,
    );

    for word in ["rat", "train", "grain"] {
        assert!(is_anagram_compatible("TRIANGLE", word));
        assert_eq!(round.submit_guess(word), Ok(GuessOutcome::Accepted));
    }
    assert_eq!(round.guesses().len(), 3);

    assert_eq!(
        round.submit_guess("rat"),
        Ok(GuessOutcome::AlreadyGuessed { index: 0 })
    );
    assert_eq!(round.guesses().len(), 3);
}

#[test]
fn test_repeat_never_reports_accepted() {
    let mut round = round_on("RATINGS", &["STAR", "RATS"], 0);
    assert_eq!(round.submit_guess("Star"), Ok(GuessOutcome::Accepted));
    for attempt in ["star", "STAR", " Star "] {
        assert_eq!(
            round.submit_guess(attempt),
            Ok(GuessOutcome::AlreadyGuessed { index: 0 })
        );
    }
    assert_eq!(round.guesses().len(), 1);
}

#[test]
fn test_score_matches_pure_function() {
    let mut round = round_on("RATINGS", &["RAT", "TAR", "STAR", "GRAIN"], 0);
    round.submit_guess("rat").expect("active");
    round.submit_guess("star").expect("active");
    round.submit_guess("grain").expect("active");
    assert_eq!(round.score(), score(&["rat", "star", "grain"]));
}

#[test]
fn test_finish_preserves_score_and_marks_autofill() {
    let mut round = round_on("RATINGS", &["RAT", "TAR", "STAR", "GRAIN"], 0);
    round.submit_guess("grain").expect("active");
    let before = round.score();

    let summary = round.finish().expect("active");
    assert_eq!(round.phase(), RoundPhase::Finished);
    assert_eq!(round.score(), before);
    assert_eq!(*summary.found(), 1);
    assert_eq!(*summary.total(), 4);

    let autofilled = round
        .guesses()
        .entries()
        .iter()
        .filter(|g| *g.provenance() == Provenance::Autofilled)
        .count();
    assert_eq!(autofilled, 3);
    assert_eq!(round.submit_guess("rat"), Err(RoundError::Finished));
}

#[test]
fn test_revealed_letters_grow_monotonically() {
    let mut round = round_on("PLANETS", &["PLANT", "SLANT"], 3);
    let mut rng = StdRng::seed_from_u64(42);
    let mut previous = round.hints().revealed().clone();

    loop {
        match round.use_hint(&mut rng).expect("active") {
            HintOutcome::Revealed(letter) => {
                assert!(round.root().has_letter(letter));
                assert!(round.hints().revealed().is_superset(&previous));
                previous = round.hints().revealed().clone();
            }
            HintOutcome::NoHintsLeft => break,
            HintOutcome::AllRevealed => panic!("seven letters cannot run out first"),
        }
    }
    assert_eq!(previous.len(), 4);
    assert_eq!(round.hints().hint_count(), 0);
}

#[test]
fn test_shuffle_is_cosmetic() {
    let mut round = round_on("PLANETS", &["PLANT"], 0);
    let mut rng = StdRng::seed_from_u64(9);
    let before = round.clone();
    round.shuffle_letters(&mut rng);
    assert_eq!(round.root().as_str(), before.root().as_str());
    assert_eq!(round.guesses(), before.guesses());
    assert_eq!(round.score(), before.score());
}
