//! Test utilities for grab
//!
//! Helpers shared by unit tests and the integration suite:
//! - [`init_test_logging`] to see `tracing` output from a test
//! - [`FakeTransport`], an in-memory [`HttpTransport`] that serves canned
//!   responses and records every URL requested
//! - [`spawn_slow_server`], a local HTTP server that stalls mid-body
//! - fixtures for release listings and configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use grab_cli::test_utils::{FakeTransport, release_json};
//! use serde_json::json;
//!
//! let transport = FakeTransport::new()
//!     .with_json(
//!         "https://api.test/repos/acme/tool/releases?per_page=1&page=1",
//!         json!([release_json("v1.0.0", &["https://dl.test/tool_linux"])]),
//!     )
//!     .with_asset("https://dl.test/tool_linux", b"#!/bin/sh\n".to_vec());
//! ```

use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, Once};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::GrabConfig;
use crate::core::GrabError;
use crate::github::{HttpResponse, HttpTransport};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// API root used by [`test_config`].
pub const TEST_API_URL: &str = "https://api.test";

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG` if set; does nothing when
/// neither is available. Safe to call from every test.
///
/// ```bash
/// RUST_LOG=grab_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

#[derive(Debug, Clone)]
struct CannedResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

/// In-memory transport keyed by exact URL.
///
/// Requests for a URL without a canned response fail with
/// [`GrabError::Transport`], which makes unexpected requests visible in
/// test failures.
#[derive(Debug, Default)]
pub struct FakeTransport {
    routes: HashMap<String, CannedResponse>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `status`, `headers` and `body` for `url`.
    #[must_use]
    pub fn with_response(
        mut self,
        url: impl Into<String>,
        status: u16,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    ) -> Self {
        self.routes.insert(
            url.into(),
            CannedResponse {
                status,
                headers,
                body,
            },
        );
        self
    }

    /// Serve `value` as a `200` JSON body for `url`.
    #[must_use]
    pub fn with_json(self, url: impl Into<String>, value: Value) -> Self {
        let body = value.to_string().into_bytes();
        self.with_response(
            url,
            200,
            vec![("Content-Type".to_string(), "application/json".to_string())],
            body,
        )
    }

    /// Serve `bytes` as a `200` binary body for `url`.
    #[must_use]
    pub fn with_asset(self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.with_response(url, 200, Vec::new(), bytes)
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of requests made for `url`.
    pub fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|r| r.as_str() == url).count()
    }
}

impl HttpTransport for FakeTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, GrabError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let canned = self.routes.get(url).ok_or_else(|| GrabError::Transport {
            url: url.to_string(),
            reason: "no canned response".to_string(),
        })?;

        Ok(HttpResponse::buffered(
            url,
            canned.status,
            canned.headers.clone(),
            canned.body.clone(),
        ))
    }
}

/// One entry of a releases listing with an asset per URL in `asset_urls`.
#[must_use]
pub fn release_json(tag: &str, asset_urls: &[&str]) -> Value {
    let assets: Vec<Value> = asset_urls
        .iter()
        .map(|url| {
            json!({
                "content_type": "application/octet-stream",
                "state": "uploaded",
                "size": 1024,
                "download_count": 0,
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z",
                "browser_download_url": url,
            })
        })
        .collect();

    json!({
        "tag_name": tag,
        "name": tag,
        "created_at": "2024-01-01T00:00:00Z",
        "published_at": "2024-01-01T00:00:00Z",
        "assets": assets,
    })
}

/// Configuration rooted at `base_dir` for the `linux` platform, talking to
/// [`TEST_API_URL`], with the layout already created.
pub fn test_config(base_dir: &Path) -> GrabConfig {
    let mut config = GrabConfig::new(base_dir).with_platform("linux");
    config.api_url = TEST_API_URL.to_string();
    config.ensure_layout().expect("create test layout");
    config
}

/// Serve a single `200 OK` on a local port. The first half of `body` is sent
/// with the headers, the second half after `pause`. Returns the base URL.
pub async fn spawn_slow_server(body: &'static [u8], pause: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind local server");
    let addr = listener.local_addr().expect("local server address");

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let (head, tail) = body.split_at(body.len() / 2);
        let headers = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        if socket.write_all(headers.as_bytes()).await.is_err()
            || socket.write_all(head).await.is_err()
            || socket.flush().await.is_err()
        {
            return;
        }
        tokio::time::sleep(pause).await;
        let _ = socket.write_all(tail).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{addr}")
}
