//! Library error type.
//!
//! URL parsing and joining never fail; these cover the few edges that touch
//! the host or need a checked answer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UrlError {
    /// The process working directory could not be read.
    #[error("cannot determine current directory")]
    CurrentDir(#[source] std::io::Error),

    /// A local path could not be expressed as a `file:` URL.
    #[error("cannot express {path:?} as a file URL")]
    InvalidFilePath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// A `file:` URL was required.
    #[error("{url:?} is not a file:// URL")]
    NotFileUrl { url: String },
}
