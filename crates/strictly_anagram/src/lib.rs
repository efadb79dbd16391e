//! Pure word-anagram puzzle logic.
//!
//! A round is played on a root word: the player finds words spelled from
//! the root's letters, may reveal letters as hints, and finishes the round
//! to freeze the score.
//!
//! # Architecture
//!
//! - **Letters**: letter multisets and the anagram-compatibility test
//! - **Anagrams**: the playable word set and its adaptive length floor
//! - **Scoring**: length-grouped score and its breakdown
//! - **Hints**: free/accrued hints and letter reveals
//! - **Round**: the per-root state machine (active → finished)
//!
//! Nothing here performs I/O. Randomized operations take any [`rand::Rng`].
//!
//! # Example
//!
//! ```
//! use strictly_anagram::{GuessOutcome, RootWord, Round};
//!
//! let root = RootWord::new("RATINGS").unwrap();
//! let mut round = Round::new(root, vec!["RAT".into(), "GRAIN".into()], 0);
//!
//! assert_eq!(round.submit_guess("rat").unwrap(), GuessOutcome::Accepted);
//! assert_eq!(round.score(), 3 * (1 + 3));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod anagrams;
mod guess;
mod hints;
pub mod invariants;
mod letters;
mod round;
mod scoring;

pub use anagrams::{
    AnagramSet, LARGE_POOL_MIN_LENGTH, LARGE_POOL_THRESHOLD, MIN_WORD_LENGTH, anagrams_of,
    min_length_for, pick_root,
};
pub use guess::{Guess, GuessBuffer, GuessLog, GuessOutcome, Provenance};
pub use hints::{HintOutcome, HintState, MASK_CHAR};
pub use letters::{
    LetterCounts, ROOT_WORD_LENGTH, RootWord, RootWordError, eq_ignore_case, is_anagram_compatible,
};
pub use round::{Round, RoundError, RoundPhase, RoundSummary};
pub use scoring::{ScoreLine, score, score_info};
