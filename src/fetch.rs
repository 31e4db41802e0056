use crate::config::ExtractorConfig;
use crate::error::FetchError;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, redirect};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use url::Url;

/// A fetched document ready for parsing
#[derive(Debug, Clone)]
pub struct Page {
    /// URL the body was served from (after redirects)
    pub url: Url,

    /// HTTP status code
    pub status: u16,

    /// Content-Type header, if the source reported one
    pub content_type: Option<String>,

    /// Decoded response body
    pub body: String,
}

/// Something that can produce the document for a URL
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError>;
}

/// Fetches pages over HTTP(S) with bounded connect and read timeouts
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl HttpSource {
    /// Build an HTTP source from the extractor configuration
    pub fn new(config: &ExtractorConfig) -> Result<Self, FetchError> {
        let connect_timeout = Duration::from_secs(config.connect_timeout_secs);
        let read_timeout = Duration::from_secs(config.read_timeout_secs);
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            connect_timeout,
            read_timeout,
        })
    }

    fn classify(&self, url: &Url, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                connect: self.connect_timeout,
                read: self.read_timeout,
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

impl PageSource for HttpSource {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        ::log::info!("Fetching: {}", url);
        let start = Instant::now();

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let final_url = response.url().clone();
        if final_url != *url {
            ::log::debug!("Redirected to {}", final_url);
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(|e| self.classify(url, e))?;

        ::log::info!(
            "Received {} bytes, status: {} ({:.2}s)",
            body.len(),
            status.as_u16(),
            start.elapsed().as_secs_f64()
        );

        Ok(Page {
            url: final_url,
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

/// Serves a fixed document for any URL
#[derive(Debug, Clone)]
pub struct StaticSource {
    body: String,
    content_type: Option<String>,
}

impl StaticSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            content_type: Some("text/html; charset=utf-8".to_string()),
        }
    }

    pub fn with_content_type(mut self, content_type: Option<&str>) -> Self {
        self.content_type = content_type.map(str::to_string);
        self
    }
}

impl PageSource for StaticSource {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        Ok(Page {
            url: url.clone(),
            status: 200,
            content_type: self.content_type.clone(),
            body: self.body.clone(),
        })
    }
}

/// Reads a saved copy of the page from disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for FileSource {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        ::log::info!("Reading {} as {}", self.path.display(), url);
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::File {
                path: self.path.clone(),
                source,
            })?;

        Ok(Page {
            url: url.clone(),
            status: 200,
            content_type: None,
            body,
        })
    }
}
