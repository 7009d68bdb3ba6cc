//! HTTP transport seam.
//!
//! The resolver and the downloader only ever issue `GET` requests, so the
//! transport surface is one method. [`ReqwestTransport`] is the production
//! implementation; tests substitute an in-memory transport that serves canned
//! responses and records every URL requested.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tracing::debug;

use crate::config::GrabConfig;
use crate::core::GrabError;

/// A response whose body is read chunk by chunk.
pub struct HttpResponse {
    url: String,
    status: u16,
    headers: HashMap<String, String>,
    body: Body,
}

enum Body {
    Remote(reqwest::Response),
    Buffered(VecDeque<Vec<u8>>),
}

impl HttpResponse {
    /// Build a response from in-memory parts.
    ///
    /// Header names are stored lower-cased so lookups are case-insensitive.
    pub fn buffered<I, K, V>(url: impl Into<String>, status: u16, headers: I, body: Vec<u8>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut chunks = VecDeque::new();
        if !body.is_empty() {
            chunks.push_back(body);
        }
        Self {
            url: url.into(),
            status,
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into()))
                .collect(),
            body: Body::Buffered(chunks),
        }
    }

    fn remote(url: &str, response: reqwest::Response) -> Self {
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        Self {
            url: url.to_string(),
            status: response.status().as_u16(),
            headers,
            body: Body::Remote(response),
        }
    }

    /// URL the response was fetched from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Next chunk of the body, or `None` once it is exhausted.
    pub async fn chunk(&mut self) -> Result<Option<Vec<u8>>, GrabError> {
        match &mut self.body {
            Body::Remote(response) => response
                .chunk()
                .await
                .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
                .map_err(|e| GrabError::Transport {
                    url: self.url.clone(),
                    reason: transport_reason(&e),
                }),
            Body::Buffered(chunks) => Ok(chunks.pop_front()),
        }
    }

    /// Read the whole body into memory.
    pub async fn bytes(mut self) -> Result<Vec<u8>, GrabError> {
        let mut body = Vec::new();
        while let Some(chunk) = self.chunk().await? {
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("url", &self.url)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Issues `GET` requests.
///
/// Implementations return `Ok` for any response that arrived, whatever its
/// status; only failures to obtain a response are errors.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    /// Fetch `url`.
    async fn get(&self, url: &str) -> Result<HttpResponse, GrabError>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a client for the configured API root and token.
    ///
    /// The configured timeout bounds connecting to any host and the whole of
    /// each API request. Asset downloads have no overall limit.
    pub fn new(config: &GrabConfig) -> Result<Self, GrabError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .user_agent(concat!("grab/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GrabError::Config {
                reason: format!("cannot build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
            timeout: config.timeout,
        })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, GrabError> {
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        // API headers and credentials only go to the API host, never to asset hosts.
        if url.starts_with(&self.api_url) {
            request = request
                .timeout(self.timeout)
                .header(reqwest::header::ACCEPT, "application/vnd.github+json")
                .header("X-GitHub-Api-Version", "2022-11-28");
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }
        }

        let response = request.send().await.map_err(|e| GrabError::Transport {
            url: url.to_string(),
            reason: transport_reason(&e),
        })?;

        debug!("GET {} -> {}", url, response.status());
        Ok(HttpResponse::remote(url, response))
    }
}

fn transport_reason(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else {
        error.to_string()
    }
}
