/// Escapes a value for use inside a single-quoted literal.
///
/// Backslash, single quote and double quote each get a leading backslash.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '\'' | '"') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Inverse of [`escape`]: a backslash makes the next character literal.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        // A dangling backslash at the end stays as written.
        match chars.next() {
            Some(next) => out.push(next),
            None => out.push('\\'),
        }
    }
    out
}
