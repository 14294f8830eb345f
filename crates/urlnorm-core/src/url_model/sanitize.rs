//! Filesystem-safe filename sanitization.

use super::platform::PathStyle;

/// Linux NAME_MAX; also the usual per-component limit on Windows.
pub const NAME_MAX: usize = 255;

/// Sanitizes a candidate filename for the given path style.
///
/// - Replaces NUL, `/` and control characters with `_`
/// - For Windows also replaces `\ : * ? " < > |`
/// - Limits length to `max_bytes`, cutting at a char boundary
///
/// Leading dots are left alone; the caller decides about hidden files.
pub fn sanitize_filename(name: &str, style: PathStyle, max_bytes: usize) -> String {
    let out: String = name
        .chars()
        .map(|c| {
            let reserved = match style {
                PathStyle::Posix => false,
                PathStyle::Windows => matches!(c, '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'),
            };
            if c == '\0' || c == '/' || c.is_control() || reserved {
                '_'
            } else {
                c
            }
        })
        .collect();

    if out.len() > max_bytes {
        let mut take = max_bytes;
        while take > 0 && !out.is_char_boundary(take) {
            take -= 1;
        }
        out[..take].to_string()
    } else {
        out
    }
}
