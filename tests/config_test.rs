//! Tests for loading WordsConfig from TOML.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

use strictly_words::{DEFAULT_WORD_LIST_URL, WordsConfig};

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("words.toml");
    fs::write(&path, content).expect("Failed to write TOML");
    path
}

#[test]
fn test_defaults() {
    let config = WordsConfig::default();
    assert_eq!(config.word_list_url(), DEFAULT_WORD_LIST_URL);
    assert_eq!(config.definition_timeout(), Duration::from_secs(5));
    assert!(config.word_list_path().is_none());
    assert!(config.player_name().is_none());
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        r#"api_base_url = "http://words.example:9000"
player_name = "Ann"
"#,
    );

    let config = WordsConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.api_base_url(), "http://words.example:9000");
    assert_eq!(config.player_name().as_deref(), Some("Ann"));
    assert_eq!(config.word_list_url(), DEFAULT_WORD_LIST_URL);
    assert_eq!(*config.definition_timeout_secs(), 5);
}

#[test]
fn test_full_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        r#"word_list_url = "http://lists.example/words.txt"
word_list_path = "/tmp/words.txt"
api_base_url = "http://localhost:8080"
definition_timeout_secs = 2
request_timeout_secs = 10
"#,
    );

    let config = WordsConfig::load(Some(path.as_path())).expect("Load failed");
    assert_eq!(config.word_list_url(), "http://lists.example/words.txt");
    assert_eq!(
        config.word_list_path().as_deref(),
        Some(std::path::Path::new("/tmp/words.txt"))
    );
    assert_eq!(config.definition_timeout(), Duration::from_secs(2));
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
}

#[test]
fn test_invalid_toml_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "this is not valid toml !!!@@@");
    assert!(WordsConfig::from_file(&path).is_err());
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    assert!(WordsConfig::from_file(dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("absent.toml");
    let config = WordsConfig::load(Some(missing.as_path())).expect("Load failed");
    assert_eq!(config, WordsConfig::default());
}

#[test]
fn test_load_invalid_file_still_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "definition_timeout_secs = \"soon\"");
    assert!(WordsConfig::load(Some(path.as_path())).is_err());
}

#[test]
fn test_word_list_override() {
    let config = WordsConfig::default().with_word_list_path(Some(PathBuf::from("local.txt")));
    assert_eq!(
        config.word_list_path().as_deref(),
        Some(std::path::Path::new("local.txt"))
    );

    let kept = config.clone().with_word_list_path(None);
    assert_eq!(kept, config);
}
