//! One unit of work: resolve an embed reference, then download the media.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::DoodlConfig;
use crate::error::{Error, Result};
use crate::events::EventSink;
use crate::fetcher::Fetcher;
use crate::http::build_client;
use crate::resolver::{DoodResolver, Resolver};
use crate::url_model::{resolve_output_path, OutputTarget};

/// What a finished job produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub title: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Resolver and fetcher sharing one HTTP client. Runs jobs one at a time.
pub struct Job {
    resolver: Arc<dyn Resolver>,
    fetcher: Fetcher,
    extension: String,
}

impl Job {
    pub fn from_config(cfg: &DoodlConfig) -> anyhow::Result<Self> {
        let client = build_client(cfg)?;
        let resolver = DoodResolver::new(client.clone(), cfg.page_timeout());
        let fetcher = Fetcher::new(client).with_chunk_size(cfg.chunk_size);
        Ok(Self::with_parts(
            Arc::new(resolver),
            fetcher,
            &cfg.file_extension,
        ))
    }

    pub fn with_parts(resolver: Arc<dyn Resolver>, fetcher: Fetcher, extension: &str) -> Self {
        Self {
            resolver,
            fetcher,
            extension: extension.to_string(),
        }
    }

    /// Resolves `url`, picks the destination under `target`, and downloads to it.
    ///
    /// Dropping the returned future leaves no file at the destination.
    pub async fn run(
        &self,
        url: &str,
        target: &OutputTarget,
        events: &dyn EventSink,
    ) -> Result<JobOutcome> {
        let media = self.resolver.resolve(url, events).await?;

        if let Some(dir) = target.directory() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| Error::storage(dir, e))?;
        }
        let path = resolve_output_path(target, &media.title, &self.extension);
        tracing::info!("saving '{}' to {}", media.title, path.display());

        let bytes = self
            .fetcher
            .fetch(&media.url, &media.headers, &path, events)
            .await?;
        Ok(JobOutcome {
            title: media.title,
            path,
            bytes,
        })
    }
}
