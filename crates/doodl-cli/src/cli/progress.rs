//! Terminal progress bar driven by core transfer events.

use doodl_core::events::{Event, EventSink, Stage};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

const BAR_TEMPLATE: &str =
    "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} {bytes_per_sec} ETA {eta}";
const SPINNER_TEMPLATE: &str = "{spinner} {msg} {bytes} {bytes_per_sec}";

/// Creates a bar on `TransferStarted`; a spinner when the total is unknown.
pub struct ProgressRenderer {
    enabled: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressRenderer {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            bar: Mutex::new(None),
        }
    }

    /// Leaves the bar as-is on screen and stops drawing.
    pub fn abandon(&self) {
        if let Some(bar) = self.bar.lock().ok().and_then(|mut b| b.take()) {
            bar.abandon();
        }
    }

    fn start(&self, name: String, total: Option<u64>) -> ProgressBar {
        let bar = match total {
            Some(len) => {
                let bar = ProgressBar::new(len);
                bar.set_style(
                    ProgressStyle::with_template(BAR_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("=> "),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template(SPINNER_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };
        bar.set_message(name);
        bar
    }
}

impl EventSink for ProgressRenderer {
    fn emit(&self, event: Event) {
        if !self.enabled {
            return;
        }
        let mut slot = match self.bar.lock() {
            Ok(slot) => slot,
            Err(_) => return,
        };
        match event {
            Event::TransferStarted { path, total } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                *slot = Some(self.start(name, total));
            }
            Event::Progress { increment, .. } => {
                if let Some(bar) = slot.as_ref() {
                    bar.inc(increment);
                }
            }
            Event::TransferFinished { .. } => {
                if let Some(bar) = slot.take() {
                    bar.finish();
                }
            }
            Event::StageFailed {
                stage: Stage::Transfer,
                ..
            } => {
                if let Some(bar) = slot.take() {
                    bar.abandon();
                }
            }
            _ => {}
        }
    }
}
