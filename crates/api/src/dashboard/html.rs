//! HTML escaping and answer formatting.

use std::sync::LazyLock;

use regex::Regex;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").expect("valid regex"));

/// Escape text for inclusion in HTML element content or quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render model or user text: escaped, `**bold**` kept, newlines as `<br>`.
pub fn format_text(text: &str) -> String {
    let escaped = escape(text.trim());
    let bolded = BOLD_RE.replace_all(&escaped, "<strong>$1</strong>");
    bolded.replace("\r\n", "\n").replace('\n', "<br>")
}
