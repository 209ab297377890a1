pub mod base62;
pub mod url_validator;

/// Longest custom alias accepted from users.
pub const MAX_ALIAS_LEN: usize = 64;

/// Check a caller-supplied alias.
///
/// Aliases become a single path segment (`/{id}`), so anything the router
/// or a browser would split, decode or strip is refused.
pub fn is_valid_alias(alias: &str) -> bool {
    if alias.is_empty() || alias.chars().count() > MAX_ALIAS_LEN {
        return false;
    }

    !alias
        .chars()
        .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
}

/// Minimal HTML escaping for text interpolated into rendered pages.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_aliases() {
        assert!(is_valid_alias("custom"));
        assert!(is_valid_alias("my-link_2.0"));
        assert!(is_valid_alias("ünïcode"));
        assert!(is_valid_alias(&"a".repeat(MAX_ALIAS_LEN)));
    }

    #[test]
    fn test_invalid_aliases() {
        assert!(!is_valid_alias(""));
        assert!(!is_valid_alias("a/b"));
        assert!(!is_valid_alias("a b"));
        assert!(!is_valid_alias("a?b"));
        assert!(!is_valid_alias("a#b"));
        assert!(!is_valid_alias("100%"));
        assert!(!is_valid_alias("tab\there"));
        assert!(!is_valid_alias(&"a".repeat(MAX_ALIAS_LEN + 1)));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
