//! Local path <-> `file://` URL bridge.
//!
//! Host facts (path style, working directory) live in a [`Platform`] value so
//! both POSIX and Windows behaviour can be exercised on any host.

use serde::{Deserialize, Serialize};
use url::Url;

use super::parsed::{parse, ParsedUrl};
use super::split::{collapse_segments, split_all};
use super::is_recognized_scheme;
use crate::error::UrlError;

/// Flavour of local filesystem paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    Posix,
    Windows,
}

impl PathStyle {
    /// Style of the machine we are running on.
    pub fn host() -> Self {
        if cfg!(windows) {
            PathStyle::Windows
        } else {
            PathStyle::Posix
        }
    }
}

/// Rewrites backslash separators to forward slashes.
pub fn normalize_windows_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// True for `X:` drive prefixes (`C:`, `c:/x`).
pub(crate) fn has_drive_prefix(path: &str) -> bool {
    let b = path.as_bytes();
    b.len() >= 2 && b[0].is_ascii_alphabetic() && b[1] == b':'
}

/// Path style plus working directory, captured once and passed around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    style: PathStyle,
    cwd: String,
}

impl Platform {
    /// `cwd` may use either separator; it is stored in forward-slash form.
    pub fn new(style: PathStyle, cwd: &str) -> Self {
        Self {
            style,
            cwd: normalize_windows_path(cwd),
        }
    }

    /// Reads the host style and the process working directory.
    pub fn detect() -> Result<Self, UrlError> {
        let cwd = std::env::current_dir().map_err(UrlError::CurrentDir)?;
        Ok(Self::new(PathStyle::host(), &cwd.to_string_lossy()))
    }

    /// Like [`Platform::detect`], falling back to `/` as working directory.
    pub fn current() -> Self {
        Self::detect().unwrap_or_else(|e| {
            tracing::warn!("{e}; resolving relative paths against /");
            Self::new(PathStyle::host(), "/")
        })
    }

    pub fn style(&self) -> PathStyle {
        self.style
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    fn is_absolute(&self, path: &str) -> bool {
        path.starts_with('/') || (self.style == PathStyle::Windows && has_drive_prefix(path))
    }

    /// Forward-slash, root-anchored, `.`/`..`-free form of `path`.
    ///
    /// Relative paths are taken against the working directory. Drive paths
    /// come out as `/C:/...`, the shape they have inside a `file:` URL.
    pub fn absolutize(&self, path: &str) -> String {
        let path = match self.style {
            PathStyle::Windows => normalize_windows_path(path),
            PathStyle::Posix => path.to_string(),
        };
        let joined = if self.is_absolute(&path) {
            path
        } else {
            format!("{}/{}", self.cwd, path)
        };
        let segments = collapse_segments(split_all(&joined), true);
        format!("/{}", segments.join("/"))
    }

    /// `file://` URL for a local path, absolutized and percent-escaped.
    pub fn path_to_file_url(&self, path: &str) -> Result<String, UrlError> {
        let absolute = self.absolutize(path);
        // `set_path` leaves `%` alone and treats `\` as a separator in file URLs.
        let mut escaped = absolute.replace('%', "%25");
        if self.style == PathStyle::Posix {
            escaped = escaped.replace('\\', "%5C");
        }
        let mut url = Url::parse("file:///").map_err(|source| UrlError::InvalidFilePath {
            path: path.to_string(),
            source,
        })?;
        url.set_path(&escaped);
        Ok(url.to_string())
    }

    /// Unescaped local path of a `file://` URL.
    ///
    /// Only meaningful for `file` URLs; check the scheme first or use
    /// [`Platform::local_file_path`].
    pub fn file_url_to_path(&self, url: &str) -> String {
        self.url_path_to_local(&parse(url))
    }

    /// Like [`Platform::file_url_to_path`] but rejects non-`file` URLs.
    pub fn file_url_to_path_checked(&self, url: &str) -> Result<String, UrlError> {
        self.local_file_path(url).ok_or_else(|| UrlError::NotFileUrl {
            url: url.to_string(),
        })
    }

    /// The local path a URL designates, or `None` when it is not a `file` URL.
    pub fn local_file_path(&self, url: &str) -> Option<String> {
        let parsed = parse(url);
        if parsed.scheme() == "file" {
            Some(self.url_path_to_local(&parsed))
        } else {
            None
        }
    }

    /// A path becomes a `file://` URL; a URL is returned in canonical form.
    pub fn promote_to_url(&self, path_or_url: &str) -> Result<String, UrlError> {
        if is_path_instead_of_url(path_or_url) {
            self.path_to_file_url(path_or_url)
        } else {
            Ok(parse(path_or_url).to_string())
        }
    }

    fn url_path_to_local(&self, url: &ParsedUrl) -> String {
        let decoded = percent_decode(url.path());
        match self.style {
            PathStyle::Posix => decoded,
            PathStyle::Windows => {
                let trimmed = match decoded.strip_prefix('/') {
                    Some(rest) if has_drive_prefix(rest) => rest,
                    _ => decoded.as_str(),
                };
                trimmed.replace('/', "\\")
            }
        }
    }
}

/// True when `s` carries no recognized scheme and so names a path.
pub fn is_path_instead_of_url(s: &str) -> bool {
    !is_recognized_scheme(parse(s).scheme())
}

/// Decodes `%XX` escapes; malformed escapes are kept as-is.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(high), Some(low)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(high << 4 | low);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
