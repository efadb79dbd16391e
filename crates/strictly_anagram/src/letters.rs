//! Letter multisets, the anagram-compatibility test, and the root word.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{instrument, warn};

/// Number of letters a root word is picked with.
pub const ROOT_WORD_LENGTH: usize = 7;

/// Uppercases a single letter, keeping it as one `char`.
pub(crate) fn fold_upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

/// Case-insensitive string equality.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Case-folded count of every letter in a word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterCounts {
    counts: BTreeMap<char, usize>,
}

impl LetterCounts {
    /// Counts the letters of `word`, ignoring case.
    pub fn of(word: &str) -> Self {
        let mut counts = BTreeMap::new();
        for c in word.chars().flat_map(char::to_lowercase) {
            *counts.entry(c).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Returns how many times `letter` occurs (case-insensitive).
    pub fn count(&self, letter: char) -> usize {
        letter
            .to_lowercase()
            .next()
            .and_then(|c| self.counts.get(&c).copied())
            .unwrap_or(0)
    }

    /// Total number of letters counted.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Returns true if every letter of `other` fits inside `self`,
    /// multiplicities included.
    ///
    /// A letter missing from `self` rejects immediately.
    pub fn contains(&self, other: &LetterCounts) -> bool {
        other
            .counts
            .iter()
            .all(|(c, needed)| self.counts.get(c).is_some_and(|have| have >= needed))
    }
}

/// Returns true if `candidate` can be spelled from the letters of `root`.
///
/// This is multiset containment, not anagram equality: the candidate may
/// use fewer letters than the root, but never more copies of a letter than
/// the root has. Length filtering is the caller's job.
pub fn is_anagram_compatible(root: &str, candidate: &str) -> bool {
    LetterCounts::of(root).contains(&LetterCounts::of(candidate))
}

/// Error building a [`RootWord`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RootWordError {
    /// The provider returned an empty word.
    #[display("Root word is empty")]
    Empty,

    /// The word contains something other than letters.
    #[display("Root word '{}' contains non-letter characters", _0)]
    NonAlphabetic(String),
}

impl std::error::Error for RootWordError {}

/// The word whose letters bound every guess in a round.
///
/// Stored uppercased. The display order of the letters is kept separately
/// so shuffling never touches the word itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootWord {
    word: String,
    display: Vec<char>,
}

impl RootWord {
    /// Validates and wraps a root word.
    ///
    /// Only emptiness and alphabetic content are checked; the provider is
    /// trusted on length.
    ///
    /// # Errors
    ///
    /// Returns [`RootWordError`] for empty or non-alphabetic input.
    #[instrument(skip(word), fields(word = %word.as_ref()))]
    pub fn new(word: impl AsRef<str>) -> Result<Self, RootWordError> {
        let word = word.as_ref().trim();
        if word.is_empty() {
            return Err(RootWordError::Empty);
        }
        if !word.chars().all(char::is_alphabetic) {
            return Err(RootWordError::NonAlphabetic(word.to_string()));
        }
        if word.chars().count() != ROOT_WORD_LENGTH {
            warn!(length = word.chars().count(), "Root word is not the usual length");
        }
        let word = word.to_uppercase();
        let display = word.chars().collect();
        Ok(Self { word, display })
    }

    /// The uppercased root word.
    pub fn as_str(&self) -> &str {
        &self.word
    }

    /// Letters of the root in word order, uppercased, duplicates kept.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.word.chars()
    }

    /// Letter counts of the root.
    pub fn counts(&self) -> LetterCounts {
        LetterCounts::of(&self.word)
    }

    /// Returns true if `letter` occurs in the root (case-insensitive).
    pub fn has_letter(&self, letter: char) -> bool {
        let letter = fold_upper(letter);
        self.word.chars().any(|c| c == letter)
    }

    /// Returns true if `candidate` is anagram-compatible with the root.
    pub fn admits(&self, candidate: &str) -> bool {
        is_anagram_compatible(&self.word, candidate)
    }

    /// The letters in their current display order.
    pub fn display(&self) -> String {
        self.display.iter().collect()
    }

    /// Reorders the displayed letters. The word itself is unchanged.
    #[instrument(skip(self, rng), fields(root = %self.word))]
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.display.shuffle(rng);
    }
}

impl std::fmt::Display for RootWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sub_anagram_is_compatible() {
        assert!(is_anagram_compatible("trading", "grin"));
        assert!(is_anagram_compatible("trading", "DARING"));
        assert!(is_anagram_compatible("TrAdInG", "trading"));
    }

    #[test]
    fn test_letter_absent_from_root_rejected() {
        assert!(!is_anagram_compatible("trading", "grime"));
        assert!(!is_anagram_compatible("trading", "drink"));
        assert!(!is_anagram_compatible("trading", "zing"));
        assert!(is_anagram_compatible("trading", "grind"));
    }

    #[test]
    fn test_multiplicity_is_respected() {
        assert!(!is_anagram_compatible("stapler", "papal"));
        assert!(is_anagram_compatible("trading", "grid"));
        assert!(!is_anagram_compatible("trading", "tratt"));
        assert!(is_anagram_compatible("balloon", "loon"));
        assert!(!is_anagram_compatible("balloon", "lollo"));
    }

    #[test]
    fn test_letter_counts() {
        let counts = LetterCounts::of("Balloon");
        assert_eq!(counts.count('l'), 2);
        assert_eq!(counts.count('O'), 2);
        assert_eq!(counts.count('z'), 0);
        assert_eq!(counts.total(), 7);
    }

    #[test]
    fn test_root_word_rejects_bad_input() {
        assert_eq!(RootWord::new("  "), Err(RootWordError::Empty));
        assert!(matches!(
            RootWord::new("abc-def"),
            Err(RootWordError::NonAlphabetic(_))
        ));
    }

    #[test]
    fn test_root_word_is_uppercased() {
        let root = RootWord::new("planets").expect("valid root");
        assert_eq!(root.as_str(), "PLANETS");
        assert!(root.has_letter('p'));
        assert!(!root.has_letter('z'));
        assert!(root.admits("slant"));
    }

    #[test]
    fn test_shuffle_keeps_letters() {
        let mut root = RootWord::new("planets").expect("valid root");
        let mut rng = StdRng::seed_from_u64(7);
        root.shuffle(&mut rng);

        let mut shown: Vec<char> = root.display().chars().collect();
        let mut original: Vec<char> = root.as_str().chars().collect();
        shown.sort_unstable();
        original.sort_unstable();
        assert_eq!(shown, original);
        assert_eq!(root.as_str(), "PLANETS");
    }

    #[test]
    fn test_eq_ignore_case() {
        assert!(eq_ignore_case("Rat", "rAT"));
        assert!(!eq_ignore_case("rat", "rats"));
    }
}
