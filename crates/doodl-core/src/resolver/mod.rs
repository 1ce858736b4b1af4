//! Embed page → signed media URL resolution.
//!
//! Two dependent GETs (embed page, then pass_md5) followed by deterministic
//! URL construction. The fetcher only sees the resulting [`MediaDescriptor`].

mod extract;
mod signing;

pub use extract::{extract_pass_md5_path, extract_title, token_of, PASS_MD5_MARKER};
pub use signing::{random_suffix, random_suffix_with, sign_media_url, unix_now, RANDOM_SUFFIX_LEN};

use async_trait::async_trait;
use reqwest::header::REFERER;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::events::{staged, Event, EventSink, Stage};
use crate::url_model::{choose_title, normalize_embed_url, origin_of};

/// Resolved media: signed URL, filesystem-safe title, and the headers the media GET needs.
#[derive(Debug, Clone)]
pub struct MediaDescriptor {
    pub url: String,
    pub title: String,
    pub headers: HashMap<String, String>,
}

/// Turns an embed reference into a [`MediaDescriptor`].
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, url: &str, events: &dyn EventSink) -> Result<MediaDescriptor>;
}

/// Resolver for hosts serving the `/e/` player page with a `/pass_md5/` reference.
#[derive(Debug, Clone)]
pub struct DoodResolver {
    client: Client,
    page_timeout: Duration,
}

impl DoodResolver {
    pub fn new(client: Client, page_timeout: Duration) -> Self {
        Self {
            client,
            page_timeout,
        }
    }

    /// GET `url` with `Referer: {referer}` and return the body as text.
    async fn get_text(&self, url: &str, referer: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header(REFERER, referer)
            .timeout(self.page_timeout)
            .send()
            .await
            .map_err(|e| Error::transport(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(|e| Error::transport(url, e))
    }
}

#[async_trait]
impl Resolver for DoodResolver {
    async fn resolve(&self, url: &str, events: &dyn EventSink) -> Result<MediaDescriptor> {
        tracing::info!("resolving {}", url);
        let embed_url = normalize_embed_url(url);
        let origin = origin_of(&embed_url)?;

        let (html, pass_md5_path) = staged(events, Stage::EmbedPage, async {
            let html = self.get_text(&embed_url, &embed_url).await?;
            let path = extract_pass_md5_path(&html)
                .map(str::to_string)
                .ok_or(Error::ProtocolMismatch {
                    marker: PASS_MD5_MARKER,
                })?;
            Ok((html, path))
        })
        .await?;

        let pass_md5_url = format!("{}{}{}", origin, PASS_MD5_MARKER, pass_md5_path);
        tracing::debug!("pass_md5 url: {}", pass_md5_url);

        let media_base = staged(events, Stage::PassMd5, async {
            self.get_text(&pass_md5_url, &embed_url).await
        })
        .await?;
        let media_base = media_base.trim();

        events.emit(Event::StageStarted {
            stage: Stage::SignUrl,
        });
        let token = token_of(&pass_md5_path);
        let media_url = sign_media_url(media_base, &random_suffix(), token, unix_now());
        let title = choose_title(extract_title(&html).as_deref(), token);
        events.emit(Event::StageCompleted {
            stage: Stage::SignUrl,
        });

        tracing::info!("direct link built for '{}'", title);

        let mut headers = HashMap::new();
        headers.insert(REFERER.as_str().to_string(), embed_url);
        Ok(MediaDescriptor {
            url: media_url,
            title,
            headers,
        })
    }
}
