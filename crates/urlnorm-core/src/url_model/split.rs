//! Path segment splitting and `.`/`..` collapsing.

/// Marker for a root-anchored path; only ever the first segment.
pub const ROOT: &str = "/";

/// Splits `path` into its atomic segments.
///
/// The first segment is `/` iff `path` is root-anchored. Empty segments from
/// repeated or trailing slashes are dropped. Works by peeling the last
/// segment off the remaining prefix until only the root (or nothing) is left.
pub fn split_all(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut rest = path;
    loop {
        let trimmed = rest.trim_end_matches('/');
        if trimmed.is_empty() {
            if rest.starts_with('/') {
                segments.push(ROOT.to_string());
            }
            break;
        }
        let (head, tail) = match trimmed.rfind('/') {
            Some(i) => (&trimmed[..=i], &trimmed[i + 1..]),
            None => ("", trimmed),
        };
        segments.push(tail.to_string());
        rest = head;
    }
    segments.reverse();
    segments
}

/// Inverse of [`split_all`].
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    match segments.split_first() {
        Some((first, rest)) if first.as_ref() == ROOT => {
            let tail: Vec<&str> = rest.iter().map(AsRef::as_ref).collect();
            format!("/{}", tail.join("/"))
        }
        _ => {
            let all: Vec<&str> = segments.iter().map(AsRef::as_ref).collect();
            all.join("/")
        }
    }
}

/// Resolves `.` and `..` segments.
///
/// With `anchored`, the segments hang off a root and a `..` that would climb
/// above it is dropped. Without, such a `..` is kept at the front. Empty and
/// `/` segments are skipped either way.
pub fn collapse_segments<I, S>(segments: I, anchored: bool) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for segment in segments {
        match segment.as_ref() {
            "" | "." | ROOT => {}
            ".." => match out.last() {
                Some(last) if last != ".." => {
                    out.pop();
                }
                _ if anchored => {}
                _ => out.push("..".to_string()),
            },
            s => out.push(s.to_string()),
        }
    }
    out
}
