use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, header};
use std::time::Duration;

use crate::app_config::Config;
use crate::errors::FetchError;
use crate::providers::PageSource;

/// HTTP page source backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    /// HTTP client for making requests
    client: Client,
}

impl HttpPageSource {
    /// Create a page source using the headers and timeout from `config`
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let accept_language = header::HeaderValue::from_str(&config.accept_language)
            .map_err(|e| FetchError::Request {
                url: String::new(),
                message: format!("Invalid Accept-Language '{}': {}", config.accept_language, e),
            })?;
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT_LANGUAGE, accept_language);

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FetchError::Request {
                url: String::new(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one configured with a transport proxy
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching {}", url);

        let response = self.client.get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Request to {} failed with status {}", url, status);
            return Err(FetchError::Status {
                status_code: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!("Received {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
