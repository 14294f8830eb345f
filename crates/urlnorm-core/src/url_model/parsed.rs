//! Structural URL model: scheme, authority, path, query, fragment.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::is_recognized_scheme;

/// A URL split into its components.
///
/// Produced by [`parse`], which never fails: anything without a usable
/// scheme (bare paths, Windows drive paths) comes back with an empty scheme
/// and the input as its path. Formatting with [`fmt::Display`] and parsing
/// again yields an equal value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    scheme: String,
    authority: String,
    path: String,
    query: String,
    fragment: String,
}

impl ParsedUrl {
    /// Builds a URL with no query and no fragment. The scheme is lower-cased.
    pub fn new(scheme: &str, authority: &str, path: &str) -> Self {
        Self {
            scheme: scheme.to_ascii_lowercase(),
            authority: authority.to_string(),
            path: path.to_string(),
            query: String::new(),
            fragment: String::new(),
        }
    }

    /// Lower-cased scheme, empty when the input had none.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host part (for `s3`, the bucket). May be empty.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// True when the scheme is one of the recognized set.
    pub fn has_recognized_scheme(&self) -> bool {
        is_recognized_scheme(&self.scheme)
    }

    pub fn with_scheme(self, scheme: &str) -> Self {
        Self {
            scheme: scheme.to_ascii_lowercase(),
            ..self
        }
    }

    pub fn with_authority(self, authority: &str) -> Self {
        Self {
            authority: authority.to_string(),
            ..self
        }
    }

    pub fn with_path(self, path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..self
        }
    }

    pub fn with_query(self, query: &str) -> Self {
        Self {
            query: query.to_string(),
            ..self
        }
    }

    pub fn with_fragment(self, fragment: &str) -> Self {
        Self {
            fragment: fragment.to_string(),
            ..self
        }
    }

    /// Same URL with the fragment removed.
    pub fn without_fragment(self) -> Self {
        Self {
            fragment: String::new(),
            ..self
        }
    }
}

/// Parses `s` into its components. Never fails.
///
/// A single letter before the first `:` is a drive letter (`C:/x/y`), not a
/// scheme.
pub fn parse(s: &str) -> ParsedUrl {
    split_url(s, true)
}

/// Parses without treating `#` as the fragment delimiter; a `#` stays in
/// the path or query.
pub(crate) fn parse_opaque(s: &str) -> ParsedUrl {
    split_url(s, false)
}

/// Formats `url` back to a string (same as its `Display` output).
pub fn format(url: &ParsedUrl) -> String {
    url.to_string()
}

/// Parses and re-formats `s`, lower-casing the scheme.
pub fn canonicalize(s: &str) -> String {
    parse(s).to_string()
}

fn split_url(s: &str, allow_fragments: bool) -> ParsedUrl {
    let (scheme, mut rest) = match split_scheme(s) {
        Some((scheme, rest)) => (scheme.to_ascii_lowercase(), rest),
        None => (String::new(), s),
    };

    let mut authority = "";
    if let Some(after) = rest.strip_prefix("//") {
        let end = after
            .find(|c: char| c == '/' || c == '?' || (allow_fragments && c == '#'))
            .unwrap_or(after.len());
        authority = &after[..end];
        rest = &after[end..];
    }

    let mut fragment = "";
    if allow_fragments {
        if let Some((before, frag)) = rest.split_once('#') {
            rest = before;
            fragment = frag;
        }
    }

    let mut query = "";
    if let Some((before, q)) = rest.split_once('?') {
        rest = before;
        query = q;
    }

    ParsedUrl {
        scheme,
        authority: authority.to_string(),
        path: rest.to_string(),
        query: query.to_string(),
        fragment: fragment.to_string(),
    }
}

/// Splits `scheme:` off the front of `s` when it is a plausible scheme.
fn split_scheme(s: &str) -> Option<(&str, &str)> {
    let colon = s.find(':')?;
    // Zero-length is no scheme; one letter is a drive.
    if colon < 2 {
        return None;
    }
    let candidate = &s[..colon];
    let mut chars = candidate.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.') {
        return None;
    }
    Some((candidate, &s[colon + 1..]))
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.scheme.is_empty() {
            write!(f, "{}:", self.scheme)?;
        }
        if !self.authority.is_empty() {
            write!(f, "//{}", self.authority)?;
            if !self.path.is_empty() && !self.path.starts_with('/') {
                f.write_str("/")?;
            }
        } else if self.path.starts_with("//")
            || (is_recognized_scheme(&self.scheme)
                && (self.path.is_empty() || self.path.starts_with('/')))
        {
            f.write_str("//")?;
        }
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        if !self.fragment.is_empty() {
            write!(f, "#{}", self.fragment)?;
        }
        Ok(())
    }
}

impl FromStr for ParsedUrl {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse(s))
    }
}

impl From<&str> for ParsedUrl {
    fn from(s: &str) -> Self {
        parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_url() {
        let u = parse("HTTPS://example.com/a/b.tar.gz?version=2#top");
        assert_eq!(u.scheme(), "https");
        assert_eq!(u.authority(), "example.com");
        assert_eq!(u.path(), "/a/b.tar.gz");
        assert_eq!(u.query(), "version=2");
        assert_eq!(u.fragment(), "top");
    }

    #[test]
    fn parse_s3_bucket_is_authority() {
        let u = parse("s3://bucket/key/obj");
        assert_eq!(u.scheme(), "s3");
        assert_eq!(u.authority(), "bucket");
        assert_eq!(u.path(), "/key/obj");
    }

    #[test]
    fn parse_bare_paths() {
        let u = parse("/usr/local/src");
        assert_eq!(u.scheme(), "");
        assert_eq!(u.authority(), "");
        assert_eq!(u.path(), "/usr/local/src");

        let u = parse("relative/dir");
        assert_eq!(u.scheme(), "");
        assert_eq!(u.path(), "relative/dir");
    }

    #[test]
    fn drive_letter_is_not_a_scheme() {
        let u = parse("C:/x/y");
        assert!(!u.has_recognized_scheme());
        assert_eq!(u.scheme(), "");
        assert_eq!(u.path(), "C:/x/y");
        assert_eq!(u.to_string(), "C:/x/y");
    }

    #[test]
    fn unrecognized_scheme_is_kept() {
        let u = parse("mailto:someone@example.com");
        assert_eq!(u.scheme(), "mailto");
        assert!(!u.has_recognized_scheme());
        assert_eq!(u.to_string(), "mailto:someone@example.com");
    }

    #[test]
    fn file_url_with_empty_authority() {
        let u = parse("file:///tmp/a%20b");
        assert_eq!(u.scheme(), "file");
        assert_eq!(u.authority(), "");
        assert_eq!(u.path(), "/tmp/a%20b");
        assert_eq!(u.to_string(), "file:///tmp/a%20b");
    }

    #[test]
    fn round_trip_canonical_inputs() {
        for s in [
            "https://mirror.example/build_cache/pkg",
            "s3://bucket/a/b/c",
            "gs://bucket/obj?generation=3",
            "ssh://git@host/repo.git",
            "git://host/repo#main",
            "ftp://ftp.example.org/pub/",
            "file:///home/user/x",
            "file://",
            "/absolute/path",
            "relative/path",
            "C:/x/y",
            "",
        ] {
            assert_eq!(parse(s).to_string(), s, "round trip of {s:?}");
            assert_eq!(parse(&parse(s).to_string()), parse(s));
        }
    }

    #[test]
    fn opaque_parse_keeps_hash_in_path() {
        let u = parse_opaque("/tmp/a#b");
        assert_eq!(u.path(), "/tmp/a#b");
        assert_eq!(u.fragment(), "");
    }

    #[test]
    fn canonicalize_lowercases_scheme() {
        assert_eq!(canonicalize("HTTP://Host/Path"), "http://Host/Path");
    }

    #[test]
    fn authority_with_relative_path_gets_slash() {
        let u = ParsedUrl::new("https", "host", "a/b");
        assert_eq!(u.to_string(), "https://host/a/b");
    }
}
