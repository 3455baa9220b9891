use std::borrow::Cow;

const MARKUP: &[char] = &['&', '<', '>', '"', '\''];

/// Escape text for use in XML text nodes and attribute values.
///
/// Borrows when nothing needs replacing, which is the common case for
/// attribute values like lane counts.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(MARKUP) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
