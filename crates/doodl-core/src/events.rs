//! Structured events emitted by the resolver and fetcher.
//!
//! The core never prints. Consumers pick a sink: a closure, the
//! [`TracingSink`] for log lines, or a [`ChannelSink`] feeding a UI task.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;

use tokio::sync::mpsc::UnboundedSender;

use crate::error::Result;

/// Step of a single resolve + fetch unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// GET of the embed page.
    EmbedPage,
    /// GET of the pass_md5 endpoint.
    PassMd5,
    /// Construction of the signed media URL.
    SignUrl,
    /// Streaming the media body to disk.
    Transfer,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::EmbedPage => "embed-page",
            Stage::PassMd5 => "pass-md5",
            Stage::SignUrl => "sign-url",
            Stage::Transfer => "transfer",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StageStarted {
        stage: Stage,
    },
    StageCompleted {
        stage: Stage,
    },
    StageFailed {
        stage: Stage,
        error: String,
    },
    /// Destination opened; `total` is `None` when the size is unknown.
    TransferStarted {
        path: PathBuf,
        total: Option<u64>,
    },
    /// One chunk written.
    Progress {
        increment: u64,
        total: Option<u64>,
    },
    TransferFinished {
        path: PathBuf,
        bytes: u64,
    },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

impl<F> EventSink for F
where
    F: Fn(Event) + Send + Sync,
{
    fn emit(&self, event: Event) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: Event) {}
}

/// Renders stage events as log lines. Progress is logged at trace level only.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: Event) {
        match event {
            Event::StageStarted { stage } => tracing::debug!(%stage, "stage started"),
            Event::StageCompleted { stage } => tracing::debug!(%stage, "stage completed"),
            Event::StageFailed { stage, error } => {
                tracing::warn!(%stage, %error, "stage failed")
            }
            Event::TransferStarted { path, total } => tracing::info!(
                path = %path.display(),
                total = ?total,
                "transfer started"
            ),
            Event::Progress { increment, total } => {
                tracing::trace!(increment, total = ?total, "chunk written")
            }
            Event::TransferFinished { path, bytes } => {
                tracing::info!(path = %path.display(), bytes, "transfer finished")
            }
        }
    }
}

/// Forwards events to an unbounded tokio channel. A closed receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<Event>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<Event>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: Event) {
        let _ = self.tx.send(event);
    }
}

/// Sends every event to both sinks.
pub struct Tee<'a> {
    pub first: &'a dyn EventSink,
    pub second: &'a dyn EventSink,
}

impl EventSink for Tee<'_> {
    fn emit(&self, event: Event) {
        self.first.emit(event.clone());
        self.second.emit(event);
    }
}

/// Runs `fut` bracketed by started/completed (or failed) events for `stage`.
pub(crate) async fn staged<T, F>(events: &dyn EventSink, stage: Stage, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    events.emit(Event::StageStarted { stage });
    let res = fut.await;
    match &res {
        Ok(_) => events.emit(Event::StageCompleted { stage }),
        Err(e) => events.emit(Event::StageFailed {
            stage,
            error: e.to_string(),
        }),
    }
    res
}
