//! Fetch collaborators. The crawler only sees the [`Fetch`] trait; tests
//! substitute a fixture-backed implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid url {url:?}: {source}")]
    Url {
        url: String,
        source: url::ParseError,
    },
}

/// `fetch(path) -> document body`. Failures are hard errors; the core does
/// no retrying of its own.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get(&self, path: &str) -> Result<String, FetchError>;
}

/// HTTP client bound to one origin, serving at most one request at a time
/// with a mandatory pause between requests. The pause is a courtesy owed to
/// the archive, not a tuning knob.
pub struct PoliteClient {
    http: Client,
    base: Url,
    min_delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl PoliteClient {
    pub fn new(
        base_url: &str,
        min_delay: Duration,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let base = Url::parse(base_url).map_err(|source| FetchError::Url {
            url: base_url.to_string(),
            source,
        })?;
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sketcharr/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base,
            min_delay,
            last_request: Mutex::new(None),
        })
    }
}

#[async_trait]
impl Fetch for PoliteClient {
    async fn get(&self, path: &str) -> Result<String, FetchError> {
        let url = self.base.join(path).map_err(|source| FetchError::Url {
            url: path.to_string(),
            source,
        })?;

        // The lock is held across the request itself, which is what caps
        // this origin at one in-flight request.
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_delay {
                tokio::time::sleep(self.min_delay - elapsed).await;
            }
        }
        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        *last = Some(Instant::now());
        Ok(body)
    }
}
