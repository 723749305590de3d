//! Markup helpers shared by the card and blog renderers.

use std::borrow::Cow;

/// Escape text for use in HTML element content or a quoted attribute.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Returns the trimmed link if it is relative or uses an allowed scheme.
pub fn safe_href(href: &str) -> Option<&str> {
    const ALLOWED: [&str; 3] = ["http:", "https:", "mailto:"];

    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    // A scheme is whatever precedes the first ':' if no '/', '?' or '#' comes first
    let scheme_end = href.find([':', '/', '?', '#']);
    match scheme_end {
        Some(i) if href.as_bytes()[i] == b':' => {
            let scheme = href[..=i].to_ascii_lowercase();
            ALLOWED.contains(&scheme.as_str()).then_some(href)
        }
        _ => Some(href),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_safe_href() {
        assert_eq!(safe_href(" https://example.com "), Some("https://example.com"));
        assert_eq!(safe_href("HTTP://example.com"), Some("HTTP://example.com"));
        assert_eq!(safe_href("mailto:me@example.com"), Some("mailto:me@example.com"));
        assert_eq!(safe_href("/papers/thesis.pdf"), Some("/papers/thesis.pdf"));
        assert_eq!(safe_href("#contact"), Some("#contact"));
        assert_eq!(safe_href("docs/a:b"), Some("docs/a:b"));

        assert_eq!(safe_href("javascript:alert(1)"), None);
        assert_eq!(safe_href("JavaScript:alert(1)"), None);
        assert_eq!(safe_href("data:text/html,hi"), None);
        assert_eq!(safe_href("   "), None);
    }
}
