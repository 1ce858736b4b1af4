//! CLI parse and log filtering tests.

use super::{BatchSummary, Cli};
use clap::Parser;
use doodl_core::logging::default_directive;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_single_url() {
    let cli = parse(&["doodl", "https://d-s.io/e/xxxxxxxxxx"]);
    assert_eq!(cli.url, "https://d-s.io/e/xxxxxxxxxx");
    assert!(cli.output.is_none());
    assert!(!cli.verbose);
    assert!(!cli.no_progress);
}

#[test]
fn cli_parse_output_and_verbose() {
    let cli = parse(&[
        "doodl",
        "https://d-s.io/e/xxxxxxxxxx",
        "-o",
        "my_video.mp4",
        "-v",
    ]);
    assert_eq!(cli.output.as_deref(), Some("my_video.mp4"));
    assert!(cli.verbose);
}

#[test]
fn cli_parse_long_flags() {
    let cli = parse(&[
        "doodl",
        "https://a.io/e/1,https://b.io/e/2",
        "--output",
        "videos/",
        "--verbose",
        "--no-progress",
    ]);
    assert_eq!(cli.url, "https://a.io/e/1,https://b.io/e/2");
    assert_eq!(cli.output.as_deref(), Some("videos/"));
    assert!(cli.verbose);
    assert!(cli.no_progress);
}

#[test]
fn cli_requires_url() {
    assert!(Cli::try_parse_from(["doodl"]).is_err());
}

#[test]
fn summary_success_rules() {
    let ok = BatchSummary {
        completed: 2,
        failed: 0,
        cancelled: false,
    };
    assert!(ok.all_succeeded());
    let failed = BatchSummary {
        failed: 1,
        ..ok
    };
    assert!(!failed.all_succeeded());
    let cancelled = BatchSummary {
        cancelled: true,
        ..ok
    };
    assert!(!cancelled.all_succeeded());
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Emits CLI events under the default filter and returns what got through.
fn cli_log_output(verbose: bool) -> String {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(default_directive(verbose)))
        .with_writer(captured.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        tracing::debug!(target: "doodl::cli", "cli debug line");
        tracing::info!(target: "doodl::cli::batch", "cli info line");
        tracing::debug!("module debug line");
    });
    captured.text()
}

#[test]
fn verbose_lets_cli_debug_through() {
    let out = cli_log_output(true);
    assert!(out.contains("cli debug line"), "{}", out);
    assert!(out.contains("cli info line"), "{}", out);
    assert!(out.contains("module debug line"), "{}", out);
}

#[test]
fn quiet_keeps_cli_info_but_not_debug() {
    let out = cli_log_output(false);
    assert!(out.contains("cli info line"), "{}", out);
    assert!(!out.contains("cli debug line"), "{}", out);
    assert!(!out.contains("module debug line"), "{}", out);
}
