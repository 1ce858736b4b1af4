//! Response header helpers for the media GET.

use reqwest::header::{HeaderMap, CONTENT_LENGTH};

/// Declared body size. Absent, non-numeric, or zero means unknown.
pub fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|&n| n > 0)
}
