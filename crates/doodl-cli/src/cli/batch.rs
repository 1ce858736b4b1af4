//! Splitting and validating the comma-separated URL argument, and running
//! the resulting batch one item at a time.

use std::future::Future;

use doodl_core::events::{Tee, TracingSink};
use doodl_core::job::Job;
use doodl_core::url_model::{is_embed_url, OutputTarget};

use super::progress::ProgressRenderer;

/// Counts for one invocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub completed: usize,
    pub failed: usize,
    pub cancelled: bool,
}

impl BatchSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0 && !self.cancelled
    }
}

/// Splits on commas, trimming each entry and dropping empties.
pub fn split_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Separates embed URLs from everything else, preserving order.
pub fn partition_urls(urls: Vec<String>) -> (Vec<String>, Vec<String>) {
    urls.into_iter().partition(|u| is_embed_url(u))
}

/// Splits the raw argument and keeps the embed URLs, reporting the rest.
/// Fails when nothing usable is left.
pub fn prepare_urls(raw: &str) -> anyhow::Result<Vec<String>> {
    let (valid, invalid) = partition_urls(split_urls(raw));
    for url in &invalid {
        tracing::warn!("skipping invalid URL: {}", url);
        eprintln!("skipping invalid URL: {}", url);
    }
    if valid.is_empty() {
        anyhow::bail!("no valid embed URLs given (expected a URL containing /e/ or /d/)");
    }
    Ok(valid)
}

/// Runs `urls` in order. A failed item is counted and the loop moves on;
/// `interrupt` resolving cancels the in-flight item and ends the batch.
pub async fn run_batch<F, Fut>(
    job: &Job,
    urls: &[String],
    target: &OutputTarget,
    show_progress: bool,
    mut interrupt: F,
) -> BatchSummary
where
    F: FnMut() -> Fut,
    Fut: Future,
{
    let mut summary = BatchSummary::default();
    let total = urls.len();
    for (i, url) in urls.iter().enumerate() {
        println!("[{}/{}] {}", i + 1, total, url);
        let renderer = ProgressRenderer::new(show_progress);
        let sink = Tee {
            first: &TracingSink,
            second: &renderer,
        };

        tokio::select! {
            res = job.run(url, target, &sink) => match res {
                Ok(outcome) => {
                    summary.completed += 1;
                    println!("saved '{}' to {}", outcome.title, outcome.path.display());
                }
                Err(err) => {
                    summary.failed += 1;
                    renderer.abandon();
                    tracing::error!("{}: {}", url, err);
                    eprintln!("failed: {}: {}", url, err);
                }
            },
            _ = interrupt() => {
                renderer.abandon();
                tracing::info!("interrupted during {}", url);
                eprintln!("interrupted");
                summary.cancelled = true;
                break;
            }
        }
    }

    tracing::info!(
        completed = summary.completed,
        failed = summary.failed,
        cancelled = summary.cancelled,
        "batch finished"
    );
    if total > 1 {
        println!("{} of {} downloaded", summary.completed, total);
    }
    summary
}
