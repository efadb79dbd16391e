//! Score computation over a list of found words.
//!
//! Words are grouped by length. A group of `count` words of length `L` is
//! worth `L * (count + L)`, so long words pay off quadratically once several
//! of the same length are found.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Points contributed by all found words of one length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ScoreLine {
    /// Word length in letters.
    length: usize,
    /// Number of words of this length.
    count: usize,
    /// Points earned by this length group.
    points: u64,
}

fn group_by_length<S: AsRef<str>>(words: &[S]) -> BTreeMap<usize, usize> {
    let mut groups = BTreeMap::new();
    for word in words {
        *groups.entry(word.as_ref().chars().count()).or_insert(0) += 1;
    }
    groups
}

fn points(length: usize, count: usize) -> u64 {
    (length as u64) * ((count + length) as u64)
}

/// Total score for `words`. An empty list scores zero.
#[instrument(skip(words), fields(words = words.len()))]
pub fn score<S: AsRef<str>>(words: &[S]) -> u64 {
    let total = group_by_length(words)
        .into_iter()
        .map(|(length, count)| points(length, count))
        .sum();
    debug!(total, "Computed score");
    total
}

/// Per-length breakdown of the score, longest words first.
pub fn score_info<S: AsRef<str>>(words: &[S]) -> Vec<ScoreLine> {
    group_by_length(words)
        .into_iter()
        .rev()
        .map(|(length, count)| ScoreLine {
            length,
            count,
            points: points(length, count),
        })
        .collect()
}
