//! Markup scanning for the pass_md5 reference and the page title.

use regex::Regex;
use std::sync::OnceLock;

/// Path marker the host embeds once per player page.
pub const PASS_MD5_MARKER: &str = "/pass_md5/";

fn pass_md5_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"/pass_md5/([^"']+)"#).expect("pass_md5 pattern is valid"))
}

fn title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title pattern is valid"))
}

/// Opaque path following the first `/pass_md5/` in `html`, up to the next quote.
pub fn extract_pass_md5_path(html: &str) -> Option<&str> {
    pass_md5_re()
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Last `/`-delimited segment of the pass_md5 path.
pub fn token_of(pass_md5_path: &str) -> &str {
    pass_md5_path.rsplit('/').next().unwrap_or(pass_md5_path)
}

/// Text of the first `<title>` element, entity-decoded and trimmed.
pub fn extract_title(html: &str) -> Option<String> {
    let raw = title_re().captures(html)?.get(1)?.as_str();
    Some(decode_entities(raw).trim().to_string())
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_pass_md5_path() {
        let html = r#"<script>$.get('/pass_md5/12345-67-890/abcdef', function(d){});
            $.get('/pass_md5/other/zzz');</script>"#;
        assert_eq!(extract_pass_md5_path(html), Some("12345-67-890/abcdef"));
    }

    #[test]
    fn path_runs_to_end_of_markup() {
        let html = "<title>My Video</title>...../pass_md5/abc/def123";
        assert_eq!(extract_pass_md5_path(html), Some("abc/def123"));
    }

    #[test]
    fn double_quoted_reference() {
        let html = r#"fetch("/pass_md5/a/b/c")"#;
        assert_eq!(extract_pass_md5_path(html), Some("a/b/c"));
    }

    #[test]
    fn missing_marker() {
        assert_eq!(extract_pass_md5_path("<html>nothing here</html>"), None);
        assert_eq!(extract_pass_md5_path("/pass_md5/'"), None);
    }

    #[test]
    fn token_is_last_segment() {
        assert_eq!(token_of("abc/def123"), "def123");
        assert_eq!(token_of("single"), "single");
        assert_eq!(token_of("a/b/"), "");
    }

    #[test]
    fn title_extraction() {
        assert_eq!(
            extract_title("<html><head><title>My Video</title></head>").as_deref(),
            Some("My Video")
        );
        assert_eq!(
            extract_title("<TITLE lang=\"en\">\n  Spaced  \n</TITLE>").as_deref(),
            Some("Spaced")
        );
        assert_eq!(extract_title("<html><body></body></html>"), None);
    }

    #[test]
    fn title_entities_decoded() {
        assert_eq!(
            extract_title("<title>Tom &amp; Jerry &#8211; &quot;Ep 1&quot;</title>").as_deref(),
            Some("Tom & Jerry \u{2013} \"Ep 1\"")
        );
        assert_eq!(decode_entities("a &unknown; b"), "a &unknown; b");
        assert_eq!(decode_entities("&#x41;&#66;"), "AB");
        assert_eq!(decode_entities("trailing &"), "trailing &");
    }
}
