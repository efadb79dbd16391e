//! Playable anagram set and its adaptive length filter.

use crate::letters::{ROOT_WORD_LENGTH, eq_ignore_case, is_anagram_compatible};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Shortest word ever offered as a candidate.
pub const MIN_WORD_LENGTH: usize = 3;

/// Raw pools larger than this get the stricter length floor.
pub const LARGE_POOL_THRESHOLD: usize = 50;

/// Length floor applied to large pools.
pub const LARGE_POOL_MIN_LENGTH: usize = 4;

/// Minimum playable word length for a raw pool of `raw_count` words.
pub fn min_length_for(raw_count: usize) -> usize {
    if raw_count > LARGE_POOL_THRESHOLD {
        LARGE_POOL_MIN_LENGTH
    } else {
        MIN_WORD_LENGTH
    }
}

/// Picks a random root-length word from an alphabetic word list.
pub fn pick_root<'a, R: Rng + ?Sized>(words: &'a [String], rng: &mut R) -> Option<&'a str> {
    let roots: Vec<&str> = words
        .iter()
        .map(String::as_str)
        .filter(|w| w.chars().count() == ROOT_WORD_LENGTH)
        .collect();
    roots.choose(rng).copied()
}

/// Every word of at least [`MIN_WORD_LENGTH`] letters that can be spelled
/// from `root`, uppercased, in list order.
#[instrument(skip(words), fields(pool = words.len()))]
pub fn anagrams_of(root: &str, words: &[String]) -> Vec<String> {
    let found: Vec<String> = words
        .iter()
        .filter(|w| w.chars().count() >= MIN_WORD_LENGTH && is_anagram_compatible(root, w))
        .map(|w| w.to_uppercase())
        .collect();
    debug!(count = found.len(), "Collected anagrams");
    found
}

/// The provider's anagram list together with the subset actually in play.
///
/// The playable subset is derived once, when the set is built. Guesses never
/// change it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnagramSet {
    raw: Vec<String>,
    playable: Vec<String>,
    min_length: usize,
}

impl AnagramSet {
    /// Builds the playable set from the raw provider list.
    ///
    /// Words shorter than [`min_length_for`] the raw count are dropped, as
    /// are case-insensitive duplicates (first spelling wins).
    #[instrument(skip(raw), fields(raw_count = raw.len()))]
    pub fn new(raw: Vec<String>) -> Self {
        let min_length = min_length_for(raw.len());
        let mut playable: Vec<String> = Vec::new();
        for word in raw.iter().filter(|w| w.chars().count() >= min_length) {
            if !playable.iter().any(|p| eq_ignore_case(p, word)) {
                playable.push(word.clone());
            }
        }
        debug!(min_length, playable = playable.len(), "Derived playable anagrams");
        Self {
            raw,
            playable,
            min_length,
        }
    }

    /// Words in play.
    pub fn words(&self) -> &[String] {
        &self.playable
    }

    /// The list exactly as the provider returned it.
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// Length floor in effect for this set.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Number of words in play.
    pub fn len(&self) -> usize {
        self.playable.len()
    }

    /// Returns true if nothing is playable.
    pub fn is_empty(&self) -> bool {
        self.playable.is_empty()
    }

    /// Returns true if `word` is in play, ignoring case.
    pub fn contains_ignore_case(&self, word: &str) -> bool {
        self.playable.iter().any(|p| eq_ignore_case(p, word))
    }

    /// Returns true if `guesses` earn a carried-over hint: at least half the
    /// playable words (rounded down), or any word using every root letter.
    pub fn carryover_bar_met<'a, I>(&self, guesses: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut count = 0;
        let mut full_root = false;
        for guess in guesses {
            count += 1;
            full_root |= guess.chars().count() == ROOT_WORD_LENGTH;
        }
        count >= self.playable.len() / 2 || full_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn test_small_pool_keeps_three_letter_words() {
        let set = AnagramSet::new(words(&["RAT", "TRAIN", "GRAIN"]));
        assert_eq!(set.min_length(), 3);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_large_pool_raises_floor() {
        let mut raw = words(&["RAT", "TAR", "ART"]);
        raw.extend((0..50).map(|i| format!("WORD{}", "S".repeat(i % 3))));
        let set = AnagramSet::new(raw);
        assert_eq!(set.raw().len(), 53);
        assert_eq!(set.min_length(), 4);
        assert!(!set.contains_ignore_case("rat"));
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(min_length_for(50), 3);
        assert_eq!(min_length_for(51), 4);
    }

    #[test]
    fn test_duplicates_dropped() {
        let set = AnagramSet::new(words(&["RAT", "rat", "TAR"]));
        assert_eq!(set.words(), &["RAT".to_string(), "TAR".to_string()]);
    }

    #[test]
    fn test_carryover_bar() {
        let set = AnagramSet::new(words(&["RAT", "TAR", "ART", "TRAIN"]));
        assert!(!set.carryover_bar_met(["RAT"]));
        assert!(set.carryover_bar_met(["RAT", "TAR"]));
        assert!(set.carryover_bar_met(["RATINGS"]));
    }

    #[test]
    fn test_anagrams_of_filters_pool() {
        let pool = words(&["at", "rat", "grain", "trains", "ratings", "zebra"]);
        let found = anagrams_of("RATINGS", &pool);
        assert_eq!(found, words(&["RAT", "GRAIN", "TRAINS", "RATINGS"]));
    }

    #[test]
    fn test_pick_root_only_picks_seven_letters() {
        let pool = words(&["rat", "ratings", "grain", "staring"]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            let root = pick_root(&pool, &mut rng).expect("a root exists");
            assert_eq!(root.len(), 7);
        }
        assert!(pick_root(&words(&["rat"]), &mut rng).is_none());
    }
}
