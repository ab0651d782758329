//! Title search helpers.

/// Build an `ILIKE` pattern matching `needle` as a literal substring.
///
/// `%`, `_` and `\` in the input are escaped (with `\`, PostgreSQL's default
/// `LIKE` escape character) so user input cannot act as a wildcard.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Normalise an optional `?name=` query: blank means "no filter".
pub fn name_filter(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|n| !n.is_empty())
}
