//! Join command: append components to (or href-resolve against) a base URL.

use anyhow::Result;
use urlnorm_core::config::UrlnormConfig;
use urlnorm_core::url_model::UrlJoin;

pub fn run_join(cfg: &UrlnormConfig, base: &str, components: &[String], href: bool) -> Result<()> {
    let joined = UrlJoin::new(base)
        .platform(cfg.platform())
        .components(components)
        .resolve_href(href)
        .finish();
    tracing::debug!(%base, ?components, href, %joined, "join");
    println!("{}", joined);
    Ok(())
}
