//! Conservative output formatting.
//!
//! Proper pretty-printing is delegated territory; these helpers only
//! normalize whitespace and never change semantic content.

/// Normalize generated markup: strip trailing whitespace per line and end
/// with exactly one newline.
pub fn format_markup(markup: &str) -> String {
    normalize(markup)
}

/// Normalize generated code the same way.
pub fn format_code(code: &str) -> String {
    normalize(code)
}

fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    for line in text.lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
