//! HTTP lookup source

use async_trait::async_trait;
use blockmerge_catalog::BlockAttributes;
use blockmerge_engine::{LookupError, LookupSource};
use reqwest::StatusCode;
use std::time::Duration;

/// Queries `GET {base_url}/{name}` and decodes the body as attributes
#[derive(Debug, Clone)]
pub struct HttpLookup {
    http: reqwest::Client,
    base_url: String,
}

impl HttpLookup {
    /// Create client with a per-request timeout
    ///
    /// # Errors
    /// `LookupError::Unavailable` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("blockmerge/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Endpoint root, without a trailing slash
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL queried for a block name
    #[must_use]
    pub fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }
}

#[async_trait]
impl LookupSource for HttpLookup {
    async fn get(&self, name: &str) -> Result<BlockAttributes, LookupError> {
        let url = self.url_for(name);
        tracing::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(LookupError::NotFound(name.to_string())),
            status if !status.is_success() => {
                return Err(LookupError::Unavailable(format!("{url} answered {status}")));
            }
            _ => {}
        }

        response
            .json::<BlockAttributes>()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))
    }
}
