//! Small HTML text helpers

/// Escape text for use in element content
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for use inside a double-quoted attribute
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
