//! Pagination via HTTP `Link` headers.
//!
//! Mirror indexes and release APIs page their listings with
//! `Link: <...>; rel="next"`. Only the `next` relation is of interest.

mod parse;

pub use parse::parse_link_rel_next;

/// Finds the `rel=next` target among raw response header lines.
///
/// Header names are matched case-insensitively; the first `Link` header
/// carrying a `next` relation wins.
pub fn next_link_from_headers<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    lines.iter().find_map(|line| {
        let (name, value) = line.as_ref().trim().split_once(':')?;
        if name.trim().eq_ignore_ascii_case("link") {
            parse_link_rel_next(value.trim())
        } else {
            None
        }
    })
}
