//! Next-link command: follow Link header pagination one step.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use urlnorm_core::link_header::{next_link_from_headers, parse_link_rel_next};

/// Print the rel="next" URI, or nothing (exit 0) when there is none.
pub fn run_next_link(value: Option<&str>, headers: Option<&Path>) -> Result<()> {
    let next = match (value, headers) {
        (_, Some(path)) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            let lines: Vec<&str> = data.lines().collect();
            next_link_from_headers(&lines)
        }
        (Some(value), None) => parse_link_rel_next(value),
        (None, None) => anyhow::bail!("either a header value or --headers is required"),
    };

    match next {
        Some(uri) => println!("{}", uri),
        None => tracing::debug!("no rel=next link"),
    }
    Ok(())
}
