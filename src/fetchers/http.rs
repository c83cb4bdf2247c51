use crate::config::ScanConfig;
use crate::error::{FetchError, ScanError};
use crate::fetchers::PageFetcher;
use async_trait::async_trait;
use reqwest::{Client, redirect};
use std::time::{Duration, Instant};

/// Page fetcher backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    /// Build a fetcher with the user agent, timeout and redirect limit from `config`
    pub fn from_config(config: &ScanConfig) -> Result<Self, ScanError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| ScanError::Client(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: config.request_timeout_secs,
        })
    }

    fn map_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout_secs)
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let started = Instant::now();
        ::log::debug!("FETCH: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            ::log::warn!("{} answered HTTP {}", url, status.as_u16());
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        if response.url().as_str() != url {
            ::log::debug!("{} redirected to {}", url, response.url());
        }

        let body = response.text().await.map_err(|e| self.map_error(e))?;
        ::log::debug!(
            "Fetched {} ({} bytes) in {:.2} seconds",
            url,
            body.len(),
            started.elapsed().as_secs_f64()
        );

        Ok(body)
    }
}
