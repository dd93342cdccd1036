//! Filesystem-safe name sanitization.
//!
//! Used for project directory names and archive base names. The mapping is
//! deterministic and idempotent: sanitizing an already-sanitized name
//! returns it unchanged.

/// Characters kept as-is besides ASCII alphanumerics.
const KEEP: &[char] = &['-', '.'];

/// Turn a human-readable name into a filesystem-safe identifier.
///
/// Whitespace and disallowed punctuation become single underscores,
/// consecutive separators collapse, and leading/trailing separators are
/// stripped.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || KEEP.contains(&ch) {
            out.push(ch);
            last_was_sep = false;
        } else if !last_was_sep && !out.is_empty() {
            out.push('_');
            last_was_sep = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}
