//! Streaming media download to a single destination file.
//!
//! The body is written sequentially in bounded chunks with a progress event
//! after each write. A failed or abandoned transfer never leaves a file at
//! the destination.

mod headers;

pub use headers::content_length;

use futures_util::StreamExt;
use reqwest::Client;
use std::collections::HashMap;
use std::path::Path;

use crate::config::DEFAULT_CHUNK_SIZE;
use crate::error::{Error, Result};
use crate::events::{staged, Event, EventSink, Stage};
use crate::storage::DestinationFile;

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    chunk_size: usize,
}

impl Fetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Overrides the write size; zero keeps the default.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        if chunk_size == 0 {
            tracing::warn!("chunk_size 0 ignored, using {}", DEFAULT_CHUNK_SIZE);
        } else {
            self.chunk_size = chunk_size;
        }
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// GETs `url` and streams the body into `dest`. Returns the bytes written.
    ///
    /// No read timeout is applied; only the client's connect timeout bounds
    /// the request. A non-2xx status fails before any file is created.
    pub async fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        dest: &Path,
        events: &dyn EventSink,
    ) -> Result<u64> {
        staged(events, Stage::Transfer, self.transfer(url, headers, dest, events)).await
    }

    async fn transfer(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        dest: &Path,
        events: &dyn EventSink,
    ) -> Result<u64> {
        let mut req = self.client.get(url);
        for (k, v) in headers {
            req = req.header(k.as_str(), v.as_str());
        }
        let response = req.send().await.map_err(|e| Error::transport(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let total = content_length(response.headers());
        let mut file = DestinationFile::create(dest)?;
        tracing::info!(
            "downloading to {} ({})",
            dest.display(),
            total.map_or_else(|| "size unknown".to_string(), |n| format!("{} bytes", n))
        );
        events.emit(Event::TransferStarted {
            path: dest.to_path_buf(),
            total,
        });

        let mut body = response.bytes_stream();
        while let Some(item) = body.next().await {
            let bytes = match item {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(
                        "transfer aborted after {} bytes: {}",
                        file.bytes_written(),
                        e
                    );
                    file.discard().await;
                    return Err(Error::transport(url, e));
                }
            };
            for chunk in bytes.chunks(self.chunk_size) {
                if let Err(e) = file.write_chunk(chunk).await {
                    file.discard().await;
                    return Err(e);
                }
                events.emit(Event::Progress {
                    increment: chunk.len() as u64,
                    total,
                });
            }
        }

        let written = file.finalize().await?;
        tracing::info!("download complete: {} ({} bytes)", dest.display(), written);
        events.emit(Event::TransferFinished {
            path: dest.to_path_buf(),
            bytes: written,
        });
        Ok(written)
    }
}
