//! Parse and format commands: show URL components, print canonical form.

use anyhow::Result;
use urlnorm_core::url_model::{canonicalize, is_recognized_scheme, parse};

/// Print each component of `url` on its own line.
pub fn run_parse(url: &str) -> Result<()> {
    let parsed = parse(url);
    println!("scheme:     {}", parsed.scheme());
    println!("authority:  {}", parsed.authority());
    println!("path:       {}", parsed.path());
    println!("query:      {}", parsed.query());
    println!("fragment:   {}", parsed.fragment());
    println!("recognized: {}", is_recognized_scheme(parsed.scheme()));
    Ok(())
}

pub fn run_format(url: &str) -> Result<()> {
    println!("{}", canonicalize(url));
    Ok(())
}
