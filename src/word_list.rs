//! Word source backed by a plain newline-separated word list.

use crate::collaborators::{WordBundle, WordSource};
use crate::error::ClientError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use strictly_anagram::{anagrams_of, pick_root};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

/// Public word list the game was designed around.
pub const DEFAULT_WORD_LIST_URL: &str =
    "https://github.com/jakepurple13/WordSolver/blob/master/app/src/main/res/raw/words.txt?raw=true";

/// Splits a word list into its all-alphabetic tokens.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|w| !w.is_empty() && w.chars().all(char::is_alphabetic))
        .map(str::to_string)
        .collect()
}

/// Picks a random root from `words` and gathers its anagrams.
///
/// Returns `None` when the list has no word of root length.
pub fn bundle_from_words<R: Rng + ?Sized>(words: &[String], rng: &mut R) -> Option<WordBundle> {
    let root = pick_root(words, rng)?;
    let anagrams = anagrams_of(root, words);
    Some(WordBundle::new(root.to_string(), anagrams))
}

#[derive(Debug, Clone)]
enum Origin {
    Url(String),
    File(PathBuf),
    Words(Vec<String>),
}

/// [`WordSource`] that draws rounds from a word list.
///
/// The list is loaded once, on first use; a failed load is retried on the
/// next call.
#[derive(Debug)]
pub struct WordListSource {
    origin: Origin,
    client: reqwest::Client,
    words: OnceCell<Vec<String>>,
    rng: Mutex<StdRng>,
}

impl WordListSource {
    fn with_origin(origin: Origin, client: reqwest::Client) -> Self {
        Self {
            origin,
            client,
            words: OnceCell::new(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Downloads the list from `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the HTTP client cannot be built.
    #[instrument(skip(url), fields(url = %url.as_ref()))]
    pub fn from_url(url: impl AsRef<str>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_origin(Origin::Url(url.as_ref().to_string()), client))
    }

    /// Reads the list from a local file.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::with_origin(Origin::File(path.into()), reqwest::Client::new())
    }

    /// Uses an in-memory list.
    pub fn from_words(words: Vec<String>) -> Self {
        Self::with_origin(Origin::Words(words), reqwest::Client::new())
    }

    /// Replaces the random source, for reproducible rounds.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    #[instrument(skip(self))]
    async fn load(&self) -> Result<Vec<String>, ClientError> {
        let words = match &self.origin {
            Origin::Url(url) => {
                debug!(%url, "Downloading word list");
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    warn!(%status, "Word list download failed");
                    return Err(ClientError::new(format!("Word list download failed: {}", status)));
                }
                parse_word_list(&response.text().await?)
            }
            Origin::File(path) => {
                debug!(path = %path.display(), "Reading word list");
                parse_word_list(&tokio::fs::read_to_string(path).await?)
            }
            Origin::Words(words) => parse_word_list(&words.join("\n")),
        };
        info!(count = words.len(), "Word list loaded");
        Ok(words)
    }

    async fn words(&self) -> Result<&[String], ClientError> {
        self.words
            .get_or_try_init(|| self.load())
            .await
            .map(Vec::as_slice)
    }
}

#[async_trait::async_trait]
impl WordSource for WordListSource {
    #[instrument(skip(self))]
    async fn fetch_root_and_anagrams(&self) -> Result<WordBundle, ClientError> {
        let words = self.words().await?;
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let bundle = bundle_from_words(words, &mut *rng)
            .ok_or_else(|| ClientError::new("Word list has no seven-letter words"))?;
        debug!(root = %bundle.word(), anagrams = bundle.anagrams().len(), "Picked root word");
        Ok(bundle)
    }
}
