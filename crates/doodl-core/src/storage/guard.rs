//! RAII guard that removes an unfinished destination file when dropped.

use std::path::PathBuf;

pub(super) struct RemoveOnDrop {
    pub(super) path: PathBuf,
    armed: bool,
}

impl RemoveOnDrop {
    pub(super) fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    pub(super) fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for RemoveOnDrop {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("removed abandoned file {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                "could not remove abandoned file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}
