use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::fmt;
use std::sync::Arc;

use super::config::{EdgarConfig, EdgarUrls};
use super::error::{EdgarError, Result};
use super::traits::Transport;

/// HTTP transport backed by `reqwest`.
///
/// Sends the configured user agent with every request (the SEC rejects anonymous
/// automated traffic) and maps response statuses onto [`EdgarError`]. There is no
/// retry: a failed fetch is returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds the underlying HTTP client from the user agent and timeout in `config`.
    ///
    /// # Errors
    ///
    /// Returns `EdgarError::ConfigError` if the user agent is not a valid header
    /// value or the client cannot be built.
    pub fn new(config: &EdgarConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| EdgarError::ConfigError(format!("Invalid user agent: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| EdgarError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    /// Fetches text content from a URL.
    ///
    /// # Errors
    ///
    /// * `EdgarError::NotFound` - Resource doesn't exist (HTTP 404)
    /// * `EdgarError::RequestError` - Network failure or unreadable body
    /// * `EdgarError::InvalidResponse` - Any other non-success status, with a body preview
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(EdgarError::RequestError)?;

        match response.status() {
            status if status.is_success() => {
                response.text().await.map_err(EdgarError::RequestError)
            }
            reqwest::StatusCode::NOT_FOUND => Err(EdgarError::NotFound),
            other_status => {
                let error_body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Failed to read error body".to_string());

                Err(EdgarError::InvalidResponse(format!(
                    "Unexpected status code: {} for URL: {}. Response preview: {}",
                    other_status,
                    url,
                    error_body.chars().take(200).collect::<String>()
                )))
            }
        }
    }
}

/// Client for querying SEC EDGAR filing feeds and indices.
///
/// `Edgar` pairs a [`Transport`] with the base URLs of the registry. All feed and
/// index operations are implemented on it through [`FeedOperations`] and
/// [`IndexOperations`]. The client is cheap to clone and holds no per-query state,
/// so separate queries can run on separate tasks.
///
/// [`FeedOperations`]: crate::FeedOperations
/// [`IndexOperations`]: crate::IndexOperations
///
/// # Examples
///
/// Basic client initialization:
///
/// ```rust
/// # use secquery::Edgar;
/// let edgar = Edgar::new("my_app/1.0 (my@email.com)")?;
/// # Ok::<(), secquery::EdgarError>(())
/// ```
///
/// With custom configuration:
///
/// ```rust
/// # use secquery::{Edgar, EdgarConfig, EdgarUrls};
/// # use std::time::Duration;
/// let config = EdgarConfig {
///     user_agent: "custom_app/2.0".to_string(),
///     timeout: Duration::from_secs(60),
///     base_urls: EdgarUrls::default(),
/// };
/// let edgar = Edgar::with_config(config)?;
/// # Ok::<(), secquery::EdgarError>(())
/// ```
#[derive(Clone)]
pub struct Edgar {
    /// Fetches raw response bodies
    pub(crate) transport: Arc<dyn Transport>,

    /// Base URLs for archive and browse endpoints
    pub(crate) urls: EdgarUrls,
}

impl fmt::Debug for Edgar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edgar")
            .field("urls", &self.urls)
            .finish_non_exhaustive()
    }
}

impl Edgar {
    /// Creates a new Edgar client with the default 30-second timeout and SEC.gov base URLs.
    ///
    /// # Arguments
    ///
    /// * `user_agent` - A descriptive identifier for your application, following the format
    ///   "AppName/Version (contact@email.com)". The SEC requires this to contact you if
    ///   your application causes issues.
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_config(EdgarConfig {
            user_agent: user_agent.to_string(),
            ..Default::default()
        })
    }

    /// Creates an Edgar client with custom configuration settings.
    ///
    /// # Errors
    ///
    /// Returns `EdgarError::ConfigError` if the user agent is malformed or the HTTP
    /// client cannot be built with the provided configuration.
    pub fn with_config(config: EdgarConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(Arc::new(transport), config.base_urls))
    }

    /// Creates an Edgar client on top of an arbitrary transport.
    ///
    /// Useful for replaying recorded responses or routing requests through a
    /// custom HTTP stack.
    pub fn with_transport(transport: Arc<dyn Transport>, urls: EdgarUrls) -> Self {
        Self { transport, urls }
    }

    /// Fetches the body at `url` through the configured transport.
    pub async fn get(&self, url: &str) -> Result<String> {
        self.transport.fetch(url).await
    }

    /// Returns the base URL for EDGAR archives.
    pub fn archives_url(&self) -> &str {
        &self.urls.archives
    }

    /// Returns the base URL of the browse endpoint.
    pub fn browse_url(&self) -> &str {
        &self.urls.browse
    }
}

#[async_trait]
impl Transport for Edgar {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.get(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_user_agent_is_config_error() {
        let result = Edgar::new("bad\nagent");
        assert!(matches!(result, Err(EdgarError::ConfigError(_))));
    }

    #[test]
    fn test_default_urls() {
        let edgar = Edgar::new("test_agent example@example.com").unwrap();
        assert_eq!(edgar.archives_url(), "https://www.sec.gov/Archives");
        assert_eq!(
            edgar.browse_url(),
            "https://www.sec.gov/cgi-bin/browse-edgar"
        );
    }

    #[test]
    fn test_debug_omits_transport() {
        let edgar = Edgar::new("test_agent example@example.com").unwrap();
        let debug = format!("{:?}", edgar);
        assert!(debug.starts_with("Edgar"));
        assert!(debug.contains("browse-edgar"));
    }
}
