//! CLI for the doodl embed-page downloader.

mod batch;
mod progress;

use anyhow::Result;
use clap::Parser;
use doodl_core::config;
use doodl_core::job::Job;
use doodl_core::url_model::OutputTarget;

pub use batch::BatchSummary;
use batch::{prepare_urls, run_batch};

/// Download videos from embed-style player pages.
#[derive(Debug, Parser)]
#[command(name = "doodl")]
#[command(about = "Resolve embed pages to direct media links and download them", long_about = None)]
#[command(after_help = "Examples:\n  doodl https://d-s.io/e/xxxxxxxxxx\n  doodl https://d-s.io/e/xxxxxxxxxx -o my_video.mp4 -v\n  doodl \"https://d-s.io/e/xxxxxxxxxx,https://d-s.io/e/yyyyyyyyyy\" -o videos/")]
pub struct Cli {
    /// Embed URL to download. Several may be given separated by commas.
    #[arg(value_name = "URL")]
    pub url: String,

    /// Output file, or directory for the title-derived filename.
    /// With several URLs this is always a directory.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not render a progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    pub async fn run(self) -> Result<BatchSummary> {
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let valid = prepare_urls(&self.url)?;
        let target = OutputTarget::from_cli(self.output.as_deref(), valid.len());
        let show_progress = cfg.show_progress && !self.no_progress;
        let job = Job::from_config(&cfg)?;

        tracing::info!("downloading {} video(s)", valid.len());
        Ok(run_batch(&job, &valid, &target, show_progress, tokio::signal::ctrl_c).await)
    }
}

#[cfg(test)]
mod tests;
