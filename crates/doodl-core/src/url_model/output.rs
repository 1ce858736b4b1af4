//! Destination path policy.

use std::path::{Path, PathBuf};

/// Where the caller wants the media written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// `{title}.{ext}` in the current directory.
    Default,
    /// `{dir}/{title}.{ext}`; the directory is created if missing.
    Directory(PathBuf),
    /// Exactly this path.
    File(PathBuf),
}

impl OutputTarget {
    /// Interprets a user-supplied `--output` value.
    ///
    /// An existing directory, a value ending in a path separator, or any value
    /// when more than one URL is queued is a directory. Anything else names a file.
    pub fn from_cli(output: Option<&str>, batch_len: usize) -> Self {
        let raw = match output.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw,
            None => return OutputTarget::Default,
        };
        let ends_with_sep = raw.ends_with('/') || raw.ends_with('\\');
        let path = PathBuf::from(raw);
        if ends_with_sep || batch_len > 1 || path.is_dir() {
            OutputTarget::Directory(path)
        } else {
            OutputTarget::File(path)
        }
    }

    /// Directory that must exist before the file is opened, if any.
    pub fn directory(&self) -> Option<&Path> {
        match self {
            OutputTarget::Directory(dir) => Some(dir),
            OutputTarget::File(path) => path.parent().filter(|p| !p.as_os_str().is_empty()),
            OutputTarget::Default => None,
        }
    }
}

/// Computes the final destination for a title under `target`.
pub fn resolve_output_path(target: &OutputTarget, title: &str, extension: &str) -> PathBuf {
    let filename = if extension.is_empty() {
        title.to_string()
    } else {
        format!("{}.{}", title, extension.trim_start_matches('.'))
    };
    match target {
        OutputTarget::Default => PathBuf::from(filename),
        OutputTarget::Directory(dir) => dir.join(filename),
        OutputTarget::File(path) => path.clone(),
    }
}
