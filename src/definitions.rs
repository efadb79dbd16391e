//! Definition cache and time-bounded lookups.

use crate::collaborators::{Definition, DefinitionService};
use crate::error::ClientError;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default bound on a single definition lookup.
pub const DEFAULT_DEFINITION_TIMEOUT: Duration = Duration::from_secs(5);

/// Successful definition lookups, keyed by word (case-insensitive).
///
/// Entries are only ever added. Failed lookups are not recorded, so the
/// next request for the same word tries the service again.
#[derive(Debug, Clone, Default)]
pub struct DefinitionCache {
    entries: HashMap<String, Definition>,
}

impl DefinitionCache {
    fn key(word: &str) -> String {
        word.trim().to_lowercase()
    }

    /// Cached definition of `word`, if any.
    pub fn get(&self, word: &str) -> Option<&Definition> {
        self.entries.get(&Self::key(word))
    }

    /// Records a successful lookup.
    pub fn insert(&mut self, word: &str, definition: Definition) {
        self.entries.insert(Self::key(word), definition);
    }

    /// Number of cached words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Asks `service` to define `word`, giving up after `timeout`.
///
/// # Errors
///
/// Returns [`ClientError`] if the service fails or the timeout elapses.
#[instrument(skip(service))]
pub async fn define_within(
    service: &dyn DefinitionService,
    word: &str,
    timeout: Duration,
) -> Result<Definition, ClientError> {
    match tokio::time::timeout(timeout, service.define(word)).await {
        Ok(result) => {
            debug!(ok = result.is_ok(), "Definition lookup finished");
            result
        }
        Err(_) => {
            warn!(?timeout, "Definition lookup timed out");
            Err(ClientError::new(format!(
                "Definition lookup for '{}' timed out after {:?}",
                word, timeout
            )))
        }
    }
}
