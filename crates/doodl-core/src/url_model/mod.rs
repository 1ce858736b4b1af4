//! Embed URL handling, title sanitization and output path policy.

mod embed;
mod output;
mod sanitize;

pub use embed::{is_embed_url, normalize_embed_url, origin_of};
pub use output::{resolve_output_path, OutputTarget};
pub use sanitize::{sanitize_title, MAX_TITLE_BYTES};

/// Title used when both the page title and the token sanitize to nothing.
pub const FALLBACK_TITLE: &str = "video";

/// Picks a filesystem-safe title: the page title if it survives sanitization,
/// else the token, else [`FALLBACK_TITLE`].
pub fn choose_title(page_title: Option<&str>, token: &str) -> String {
    page_title
        .map(sanitize_title)
        .filter(|t| !t.is_empty())
        .or_else(|| Some(sanitize_title(token)).filter(|t| !t.is_empty()))
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}
