//! HTTP client for the word-game API (definitions and high scores).

use crate::collaborators::{Definition, DefinitionService, HighScore, HighScoreService, Scores};
use crate::error::ClientError;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Client for the definition and high-score endpoints.
///
/// - `GET  {base}/wordDefinition/{word}`
/// - `GET  {base}/highScores`
/// - `POST {base}/highScore/{name}/{score}`
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the URL does not parse or the HTTP client
    /// cannot be built.
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|e| ClientError::new(format!("Invalid API URL '{}': {}", base_url.as_ref(), e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::new(format!("API URL '{}' cannot be a base", base_url)));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        info!("Created API client");
        Ok(Self { base_url, client })
    }

    /// Builds `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "Request failed");
            return Err(ClientError::new(format!("GET {} returned {}", url, status)));
        }
        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl DefinitionService for ApiClient {
    #[instrument(skip(self))]
    async fn define(&self, word: &str) -> Result<Definition, ClientError> {
        let url = self.endpoint(&["wordDefinition", word]);
        let definition: Definition = self.get_json(url).await?;
        debug!(word = %definition.word(), "Got definition");
        Ok(definition)
    }
}

#[async_trait::async_trait]
impl HighScoreService for ApiClient {
    #[instrument(skip(self))]
    async fn submit(&self, name: &str, score: u64) -> Result<(), ClientError> {
        let url = self.endpoint(&["highScore", name, &score.to_string()]);
        debug!(%url, "POST");
        let response = self.client.post(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "High score submission failed");
            return Err(ClientError::new(format!("POST {} returned {}", url, status)));
        }
        info!(name, score, "High score submitted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch(&self) -> Result<Vec<HighScore>, ClientError> {
        let url = self.endpoint(&["highScores"]);
        let scores: Scores = self.get_json(url).await?;
        debug!(count = scores.list.len(), "Got high scores");
        Ok(scores.list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(1)).expect("valid base url")
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let api = client("http://localhost:8080");
        assert_eq!(
            api.endpoint(&["wordDefinition", "rat"]).as_str(),
            "http://localhost:8080/wordDefinition/rat"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = client("http://localhost:8080/api/");
        assert_eq!(
            api.endpoint(&["highScores"]).as_str(),
            "http://localhost:8080/api/highScores"
        );
    }

    #[test]
    fn test_endpoint_encodes_names() {
        let api = client("http://localhost:8080");
        assert_eq!(
            api.endpoint(&["highScore", "Ann Lee", "35"]).as_str(),
            "http://localhost:8080/highScore/Ann%20Lee/35"
        );
    }

    #[test]
    fn test_rejects_bad_url() {
        assert!(ApiClient::new("not a url", Duration::from_secs(1)).is_err());
    }
}
