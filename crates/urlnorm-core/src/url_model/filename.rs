//! Default download filename derived from a URL.

use super::parsed::{parse, ParsedUrl};
use super::platform::PathStyle;
use super::sanitize::{sanitize_filename, NAME_MAX};

/// Name used when a URL yields nothing usable.
pub const DEFAULT_FILENAME: &str = "download.bin";

/// Derives a local filename from `url` without any network request.
///
/// Takes the last path segment, keeps the query and fragment (so
/// `pkg.tar.gz?version=2` stays distinct from the plain archive), sanitizes
/// for the host and never returns a hidden (dot-leading) name.
///
/// # Examples
///
/// - `default_download_filename("https://host/path/.hidden?x=1")` → `"_hidden?x=1"`
pub fn default_download_filename(url: &str) -> String {
    FilenamePolicy::default().derive(url)
}

/// Same as [`default_download_filename`] with a caller-supplied sanitizer.
pub fn default_download_filename_with<F>(url: &str, sanitize: F) -> String
where
    F: Fn(&str) -> String,
{
    derive(url, sanitize, DEFAULT_FILENAME)
}

/// Sanitizer settings and fallback name for derived filenames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenamePolicy {
    pub style: PathStyle,
    pub max_bytes: usize,
    pub fallback: String,
}

impl Default for FilenamePolicy {
    fn default() -> Self {
        Self {
            style: PathStyle::host(),
            max_bytes: NAME_MAX,
            fallback: DEFAULT_FILENAME.to_string(),
        }
    }
}

impl FilenamePolicy {
    pub fn sanitize(&self, name: &str) -> String {
        sanitize_filename(name, self.style, self.max_bytes)
    }

    pub fn derive(&self, url: &str) -> String {
        derive(url, |name| self.sanitize(name), &self.fallback)
    }
}

fn derive<F>(url: &str, sanitize: F, fallback: &str) -> String
where
    F: Fn(&str) -> String,
{
    let parsed = parse(url);
    let basename = parsed.path().rsplit('/').next().unwrap_or_default();
    let name = ParsedUrl::new("", "", basename)
        .with_query(parsed.query())
        .with_fragment(parsed.fragment())
        .to_string();

    let mut valid = sanitize(&name);
    if valid.is_empty() {
        tracing::debug!(%url, fallback, "no filename in URL, using fallback");
        return fallback.to_string();
    }
    if valid.starts_with('.') {
        valid.replace_range(..1, "_");
    }
    valid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posix() -> FilenamePolicy {
        FilenamePolicy {
            style: PathStyle::Posix,
            ..FilenamePolicy::default()
        }
    }

    #[test]
    fn last_segment() {
        assert_eq!(posix().derive("https://example.com/a/b/file.deb"), "file.deb");
        assert_eq!(posix().derive("s3://bucket/key/pkg.tar.gz"), "pkg.tar.gz");
        assert_eq!(posix().derive("/local/archive.zip"), "archive.zip");
    }

    #[test]
    fn query_and_fragment_are_kept() {
        assert_eq!(
            posix().derive("https://example.com/pkg.tar.gz?version=2"),
            "pkg.tar.gz?version=2"
        );
        assert_eq!(posix().derive("https://example.com/f.zip#sha256"), "f.zip#sha256");
    }

    #[test]
    fn hidden_names_are_unhidden() {
        let name = posix().derive("https://host/path/.hidden?x=1");
        assert_eq!(name, "_hidden?x=1");
        assert!(!name.starts_with('.'));
        assert_eq!(posix().derive("https://host/.."), "_.");
    }

    #[test]
    fn empty_path_uses_fallback() {
        assert_eq!(posix().derive("https://example.com/"), DEFAULT_FILENAME);
        assert_eq!(posix().derive("https://example.com"), DEFAULT_FILENAME);
        let policy = FilenamePolicy {
            fallback: "index".to_string(),
            ..posix()
        };
        assert_eq!(policy.derive("https://example.com/"), "index");
    }

    #[test]
    fn query_only_url_still_names_something() {
        assert_eq!(posix().derive("https://example.com/?id=7"), "?id=7");
    }

    #[test]
    fn custom_sanitizer() {
        let name = default_download_filename_with("https://h/.x?y=1", |n| n.replace('?', "-"));
        assert_eq!(name, "_x-y=1");
    }

    #[test]
    fn default_never_hidden() {
        assert!(default_download_filename("https://host/path/.hidden?x=1").starts_with('_'));
    }
}
