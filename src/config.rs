use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the HTTP transport and the registry endpoints.
#[derive(Debug, Clone)]
pub struct EdgarConfig {
    /// Sent as `User-Agent`; SEC.gov expects an application name and a contact address
    pub user_agent: String,
    /// Per-request timeout applied by the HTTP client
    pub timeout: Duration,
    pub base_urls: EdgarUrls,
}

/// Registry endpoints, overridable for mirrors and local test servers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgarUrls {
    /// Archive root; index paths (`edgar/data/...`) are relative to it
    pub archives: String,
    /// The `browse-edgar` CGI endpoint serving atom feeds
    pub browse: String,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("secquery/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: DEFAULT_TIMEOUT,
            base_urls: EdgarUrls::default(),
        }
    }
}

impl EdgarConfig {
    /// Builds a configuration; `None` for `base_urls` selects the SEC.gov hosts.
    ///
    /// ```rust
    /// use secquery::{Edgar, EdgarConfig};
    /// use std::time::Duration;
    ///
    /// let config = EdgarConfig::new("YourAppName contact@example.com", Duration::from_secs(60), None);
    /// let edgar = Edgar::with_config(config)?;
    /// # Ok::<(), secquery::EdgarError>(())
    /// ```
    pub fn new(
        user_agent: impl Into<String>,
        timeout: Duration,
        base_urls: Option<EdgarUrls>,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            timeout,
            base_urls: base_urls.unwrap_or_default(),
        }
    }
}

impl Default for EdgarUrls {
    fn default() -> Self {
        Self {
            archives: "https://www.sec.gov/Archives".to_string(),
            browse: "https://www.sec.gov/cgi-bin/browse-edgar".to_string(),
        }
    }
}

impl EdgarUrls {
    /// Archive root with a trailing slash, ready to prefix relative index paths.
    pub fn archives_prefix(&self) -> String {
        format!("{}/", self.archives.trim_end_matches('/'))
    }
}
