use std::fmt::Write;

/// Quote `text` as a vim string literal.
///
/// Text without control characters becomes a single-quoted literal, where
/// vim takes every character as is and a quote is written twice. Text with
/// control characters becomes a double-quoted literal using `\n`, `\r`,
/// `\t` and `\xNN`, with `\` and `"` backslash-escaped. NUL cannot live in a
/// vim string and is dropped.
pub fn quote(text: &str) -> String {
    if text.chars().any(char::is_control) {
        double_quoted(text)
    } else {
        single_quoted(text)
    }
}

fn single_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

fn double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => {}
            c if c.is_control() => {
                // writing into a String cannot fail
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
