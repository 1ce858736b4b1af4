//! Title sanitization for use as a filename stem.

/// Upper bound on the sanitized title, leaving room for an extension under NAME_MAX (255).
pub const MAX_TITLE_BYTES: usize = 200;

const ILLEGAL: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Deletes `\ / * ? : " < > |` and control characters (tabs and line breaks
/// become spaces), caps the length at [`MAX_TITLE_BYTES`] on a char boundary,
/// then trims surrounding whitespace. Applying it twice changes nothing.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !ILLEGAL.contains(c))
        .filter_map(|c| match c {
            '\t' | '\n' | '\r' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();

    let capped = if cleaned.len() > MAX_TITLE_BYTES {
        let mut take = MAX_TITLE_BYTES;
        while take > 0 && !cleaned.is_char_boundary(take) {
            take -= 1;
        }
        &cleaned[..take]
    } else {
        cleaned.as_str()
    };

    capped.trim().to_string()
}
