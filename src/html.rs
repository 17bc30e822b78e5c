//! Small helpers for building HTML by appending to a `String`.

/// Escapes text for use inside element content or a single-quoted attribute.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(escape("a <b> & 'c'"), "a &lt;b&gt; &amp; &#39;c&#39;");
        assert_eq!(escape("plain-text 1.2-3"), "plain-text 1.2-3");
    }
}
