//! Path <-> file:// URL conversion commands.

use anyhow::Result;
use urlnorm_core::config::UrlnormConfig;

pub fn run_to_file_url(cfg: &UrlnormConfig, path: &str) -> Result<()> {
    let url = cfg.platform().path_to_file_url(path)?;
    println!("{}", url);
    Ok(())
}

/// Fails for anything but a file:// URL.
pub fn run_to_path(cfg: &UrlnormConfig, url: &str) -> Result<()> {
    let path = cfg.platform().file_url_to_path_checked(url)?;
    println!("{}", path);
    Ok(())
}
