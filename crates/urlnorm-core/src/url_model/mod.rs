//! URL modeling, joining and filename derivation.
//!
//! Parses URL-like strings (`file`, `http`, `https`, `ftp`, `s3`, `gs`,
//! `ssh`, `git`, or bare local paths) into [`ParsedUrl`], joins them with
//! further path components, and bridges `file://` URLs to local paths.

mod filename;
mod join;
mod parsed;
mod platform;
mod sanitize;
mod split;

pub use filename::{
    default_download_filename, default_download_filename_with, FilenamePolicy, DEFAULT_FILENAME,
};
pub use join::{effective_base, join, EffectiveBase, UrlJoin};
pub use parsed::{canonicalize, format, parse, ParsedUrl};
pub use platform::{is_path_instead_of_url, normalize_windows_path, PathStyle, Platform};
pub use sanitize::{sanitize_filename, NAME_MAX};
pub use split::{collapse_segments, join_segments, split_all};

use crate::error::UrlError;

/// Schemes that mark a string as a URL rather than a local path.
pub const RECOGNIZED_SCHEMES: [&str; 8] = ["file", "http", "https", "ftp", "s3", "gs", "ssh", "git"];

/// True for the schemes this crate treats as genuine URLs.
///
/// `C:/x/y` parses with an empty scheme, so drive paths are never mistaken
/// for URLs.
pub fn is_recognized_scheme(scheme: &str) -> bool {
    RECOGNIZED_SCHEMES.contains(&scheme)
}

/// `file://` URL for a local path on the current host.
pub fn path_to_file_url(path: &str) -> Result<String, UrlError> {
    Platform::detect()?.path_to_file_url(path)
}

/// Unescaped path of a `file://` URL on the current host.
///
/// Only meaningful for `file` URLs; see [`local_file_path`].
pub fn file_url_to_path(url: &str) -> String {
    Platform::new(PathStyle::host(), "/").file_url_to_path(url)
}

/// The local path of a `file://` URL, `None` for any other scheme.
pub fn local_file_path(url: &str) -> Option<String> {
    Platform::new(PathStyle::host(), "/").local_file_path(url)
}
