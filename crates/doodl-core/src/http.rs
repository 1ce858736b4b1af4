//! Shared HTTP client construction.

use crate::config::DoodlConfig;
use anyhow::{Context, Result};

/// Builds the client shared by the resolver and the fetcher.
///
/// The User-Agent is fixed at the client level. Only the connect timeout is
/// set here; per-request timeouts are applied by the resolver, and media
/// transfers run without a read timeout.
pub fn build_client(cfg: &DoodlConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(cfg.user_agent.as_str())
        .connect_timeout(cfg.connect_timeout())
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .context("failed to build HTTP client")
}
