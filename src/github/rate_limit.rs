//! Rate-limit detection for failed API responses.

use chrono::{DateTime, Utc};
use std::time::Duration;

use super::transport::HttpResponse;
use crate::constants::RATE_LIMIT_RESET_HEADER;

/// Time left until the rate limit resets, if the response says so.
///
/// Reads the `X-RateLimit-Reset` epoch timestamp. Returns `None` when the
/// header is missing or not an integer. A reset time already in the past
/// yields a zero wait.
#[must_use]
pub fn reset_wait(response: &HttpResponse, now: DateTime<Utc>) -> Option<Duration> {
    let raw = response.header(RATE_LIMIT_RESET_HEADER)?.trim();
    let epoch: i64 = raw.parse().ok()?;
    let reset = DateTime::<Utc>::from_timestamp(epoch, 0)?;
    Some((reset - now).to_std().unwrap_or(Duration::ZERO))
}

/// Render a wait as `1h2m3s`, `4m0s` or `5s`.
#[must_use]
pub fn format_wait(wait: &Duration) -> String {
    let total = wait.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
