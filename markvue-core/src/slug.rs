//! Document id derivation from filename stems.

/// Convert a PascalCase stem to a kebab-case id.
///
/// Only purely ASCII-alphanumeric stems are transformed (each uppercase
/// letter opens a new hyphen-separated word, the result is lowercased).
/// A stem containing any other character is returned unchanged, so
/// date-prefixed names like `2017-01-02-test-name` keep their authored
/// form verbatim.
///
/// # Examples
///
/// ```
/// use markvue_core::pascal_to_kebab;
///
/// assert_eq!(pascal_to_kebab("AboutPage"), "about-page");
/// assert_eq!(pascal_to_kebab("2017-01-02-test-name"), "2017-01-02-test-name");
/// ```
pub fn pascal_to_kebab(stem: &str) -> String {
    if stem.is_empty() || !stem.chars().all(|c| c.is_ascii_alphanumeric()) {
        return stem.to_string();
    }

    let mut out = String::with_capacity(stem.len() + 4);
    for (i, c) in stem.char_indices() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
