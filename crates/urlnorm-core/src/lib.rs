pub mod config;
pub mod error;
pub mod logging;

pub mod link_header;
pub mod url_model;

pub use error::UrlError;
