//! Filename command: derive the default download name for a URL.

use anyhow::Result;
use urlnorm_core::config::UrlnormConfig;

pub fn run_filename(cfg: &UrlnormConfig, url: &str) -> Result<()> {
    println!("{}", cfg.filename_policy().derive(url));
    Ok(())
}
