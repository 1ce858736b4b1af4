//! Typed failures for resolution and transfer.
//!
//! Every variant maps onto one [`ErrorKind`] so callers can branch on the
//! cause without matching on transport details.

use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Expected marker missing from upstream markup; the host changed its page format.
    ProtocolMismatch,
    /// Non-2xx status or transport failure on an HTTP call.
    UpstreamFetch,
    /// Destination file could not be opened, written or removed.
    Storage,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("marker `{marker}` not found in embed page")]
    ProtocolMismatch { marker: &'static str },

    #[error("GET {url} returned HTTP {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("storage error on {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ProtocolMismatch { .. } => ErrorKind::ProtocolMismatch,
            Error::UpstreamStatus { .. } | Error::Transport { .. } | Error::InvalidUrl { .. } => {
                ErrorKind::UpstreamFetch
            }
            Error::Storage { .. } => ErrorKind::Storage,
        }
    }

    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        Error::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn storage(path: &std::path::Path, source: std::io::Error) -> Self {
        Error::Storage {
            path: path.to_path_buf(),
            source,
        }
    }
}
