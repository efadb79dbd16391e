//! Tests for the word-list backed word source.

use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use strictly_words::{
    ApiClient, GameSession, GuessOutcome, WordListSource, WordSource, parse_word_list,
};

const WORDS: &str = "ratings\nrat\n  tar \nstar\ngrain\nzebra\nno\nit's\n123\n";

fn write_words(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("words.txt");
    fs::write(&path, content).expect("Failed to write word list");
    path
}

#[test]
fn test_parse_keeps_alphabetic_tokens() {
    let words = parse_word_list(WORDS);
    assert_eq!(words, ["ratings", "rat", "tar", "star", "grain", "zebra", "no"]);
}

#[tokio::test]
async fn test_file_source_builds_bundle() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let source = WordListSource::from_file(write_words(&dir, WORDS)).with_seed(3);

    let bundle = source.fetch_root_and_anagrams().await.expect("Fetch failed");
    assert_eq!(bundle.word(), "ratings");
    assert_eq!(bundle.anagrams(), &["RATINGS", "RAT", "TAR", "STAR", "GRAIN"]);
}

#[tokio::test]
async fn test_missing_file_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let source = WordListSource::from_file(dir.path().join("absent.txt"));
    assert!(source.fetch_root_and_anagrams().await.is_err());
}

#[tokio::test]
async fn test_list_without_roots_fails() {
    let source = WordListSource::from_words(vec!["rat".into(), "star".into()]);
    assert!(source.fetch_root_and_anagrams().await.is_err());
}

#[tokio::test]
async fn test_same_seed_same_root() {
    let words: Vec<String> = ["painter", "ratings", "kitchen", "sandbox"]
        .iter()
        .map(|w| (*w).to_string())
        .collect();
    let a = WordListSource::from_words(words.clone()).with_seed(99);
    let b = WordListSource::from_words(words).with_seed(99);

    for _ in 0..3 {
        let left = a.fetch_root_and_anagrams().await.expect("Fetch failed");
        let right = b.fetch_root_and_anagrams().await.expect("Fetch failed");
        assert_eq!(left, right);
    }
}

#[tokio::test]
async fn test_session_plays_from_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let source = Arc::new(WordListSource::from_file(write_words(&dir, WORDS)));
    let api = Arc::new(
        ApiClient::new("http://localhost:9", std::time::Duration::from_secs(1))
            .expect("Failed to build client"),
    );

    let mut session = GameSession::new(source, api.clone(), api);
    session.start_new_game().await.expect("Game failed to start");

    assert_eq!(session.anagram_words().len(), 5);
    assert_eq!(session.submit_guess("Grain"), Ok(GuessOutcome::Accepted));
    assert_eq!(session.submit_guess("zebra"), Ok(GuessOutcome::NotInList));
}
