//! Class-name escaping for generated selectors.

/// Escapes `candidate` so `.` followed by the result selects exactly that
/// class.
///
/// ASCII letters, digits, `-`, `_` and non-ASCII characters are kept; every
/// other character gains a backslash. A leading digit is written as a hex
/// escape followed by a space.
pub(crate) fn escape_class(candidate: &str) -> String {
    let mut escaped = String::with_capacity(candidate.len() + 8);
    for (index, ch) in candidate.chars().enumerate() {
        if index == 0 && ch.is_ascii_digit() {
            escaped.push_str(&format!("\\{:x} ", u32::from(ch)));
        } else if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_') || !ch.is_ascii() {
            escaped.push(ch);
        } else {
            escaped.push('\\');
            escaped.push(ch);
        }
    }
    escaped
}
