//! Reply text normalization.

use std::borrow::Cow;

/// Strip one level of JSON-style quoting from a backend reply.
///
/// Remote backends that serialize their reply as a JSON string deliver it
/// wrapped in double quotes with escaped inner quotes and literal `\n`
/// sequences. Replies that are not quoted pass through unchanged.
pub fn unquote_and_unescape(input: &str) -> Cow<'_, str> {
    if input.len() >= 2 && input.starts_with('"') && input.ends_with('"') {
        let inner = &input[1..input.len() - 1];
        Cow::Owned(inner.replace("\\\"", "\"").replace("\\n", ""))
    } else {
        Cow::Borrowed(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquotes_wrapped_reply() {
        assert_eq!(unquote_and_unescape("\"hello\""), "hello");
    }

    #[test]
    fn test_unescapes_inner_quotes() {
        assert_eq!(
            unquote_and_unescape("\"say \\\"hi\\\"\""),
            "say \"hi\""
        );
    }

    #[test]
    fn test_drops_literal_newline_escapes() {
        assert_eq!(
            unquote_and_unescape("\"line one\\nline two\""),
            "line oneline two"
        );
    }

    #[test]
    fn test_unquoted_input_passes_through() {
        let reply = "<p>Try a smaller input.</p>";
        assert!(matches!(
            unquote_and_unescape(reply),
            Cow::Borrowed(s) if s == reply
        ));
    }

    #[test]
    fn test_lone_quote_passes_through() {
        assert_eq!(unquote_and_unescape("\""), "\"");
    }
}
