//! Destination file lifecycle.
//!
//! The file is created (or truncated) at its final path and written
//! sequentially. Unless [`DestinationFile::finalize`] succeeds, the path is
//! removed: explicitly via [`DestinationFile::discard`] on the error path, or
//! by the drop guard when the owning future is cancelled.

mod guard;

use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use guard::RemoveOnDrop;

pub struct DestinationFile {
    file: File,
    guard: RemoveOnDrop,
    written: u64,
}

impl DestinationFile {
    /// Create `path` for writing, truncating any existing file.
    ///
    /// Opens synchronously: the removal guard is armed before any await.
    pub fn create(path: &Path) -> Result<Self> {
        let file = std::fs::File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| Error::storage(path, e))?;
        Ok(Self {
            file: File::from_std(file),
            guard: RemoveOnDrop::new(path.to_path_buf()),
            written: 0,
        })
    }

    pub async fn write_chunk(&mut self, data: &[u8]) -> Result<()> {
        self.file
            .write_all(data)
            .await
            .map_err(|e| Error::storage(&self.guard.path, e))?;
        self.written += data.len() as u64;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.guard.path
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Flush and sync, then keep the file. Returns the number of bytes written.
    /// On failure the file is removed.
    pub async fn finalize(self) -> Result<u64> {
        let DestinationFile {
            mut file,
            mut guard,
            written,
        } = self;
        let res = async {
            file.flush().await?;
            file.sync_all().await
        }
        .await;
        drop(file);
        match res {
            Ok(()) => {
                guard.disarm();
                Ok(written)
            }
            Err(e) => {
                let path = guard.path.clone();
                remove_best_effort(&path).await;
                guard.disarm();
                Err(Error::storage(&path, e))
            }
        }
    }

    /// Close and remove the file. Removal failure is logged, not returned.
    pub async fn discard(self) {
        let DestinationFile {
            file, mut guard, ..
        } = self;
        drop(file);
        remove_best_effort(&guard.path).await;
        guard.disarm();
    }
}

async fn remove_best_effort(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!("removed partial file {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("could not remove partial file {}: {}", path.display(), e),
    }
}
