//! GitHub releases integration.
//!
//! - [`transport`]: the `GET`-only HTTP seam and its `reqwest` implementation
//! - [`rate_limit`]: `X-RateLimit-Reset` parsing and wait formatting
//! - [`resolver`]: latest / exact-version release lookup and asset selection

pub mod rate_limit;
pub mod resolver;
pub mod transport;

pub use resolver::ReleaseResolver;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
