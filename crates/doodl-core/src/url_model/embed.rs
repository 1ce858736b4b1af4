//! Embed reference parsing.

use crate::error::{Error, Result};

const DIRECT_SEGMENT: &str = "/d/";
const EMBED_SEGMENT: &str = "/e/";

/// Rewrites the direct-link path segment to the embed one.
pub fn normalize_embed_url(url: &str) -> String {
    url.replace(DIRECT_SEGMENT, EMBED_SEGMENT)
}

/// True if `url` is absolute with a host and carries one of the known path markers.
pub fn is_embed_url(url: &str) -> bool {
    let parsed = match url::Url::parse(url) {
        Ok(u) => u,
        Err(_) => return false,
    };
    if parsed.host_str().map_or(true, str::is_empty) {
        return false;
    }
    url.contains(EMBED_SEGMENT) || url.contains(DIRECT_SEGMENT)
}

/// `scheme://host[:port]` of `url`, used to address the pass_md5 endpoint on the same host.
pub fn origin_of(url: &str) -> Result<String> {
    let parsed = url::Url::parse(url).map_err(|e| Error::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    let host = parsed.host_str().ok_or_else(|| Error::InvalidUrl {
        url: url.to_string(),
        reason: "missing host".to_string(),
    })?;
    Ok(match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    })
}
