//! CLI for the urlnorm URL joining engine.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use urlnorm_core::config;

use commands::{
    run_completions, run_filename, run_format, run_join, run_man, run_next_link, run_parse,
    run_to_file_url, run_to_path,
};

/// Top-level CLI for urlnorm.
#[derive(Debug, Parser)]
#[command(name = "urlnorm")]
#[command(about = "urlnorm: parse, canonicalize and join mirror URLs and local paths", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show the components of a URL or path.
    Parse {
        /// URL or local path.
        url: String,
    },

    /// Print a URL in canonical form.
    Format {
        /// URL or local path.
        url: String,
    },

    /// Join a base URL with further path components.
    Join {
        /// Base URL, mirror prefix or local path.
        base: String,

        /// Path components to append, in order.
        components: Vec<String>,

        /// Resolve the components like a relative link inside the document at BASE.
        #[arg(long)]
        href: bool,
    },

    /// Convert a local path to a file:// URL.
    ToFileUrl {
        /// Local path (relative paths are taken against the working directory).
        path: String,
    },

    /// Convert a file:// URL to a local path.
    ToPath {
        /// file:// URL.
        url: String,
    },

    /// Extract the rel="next" target from a Link header.
    NextLink {
        /// Link header value.
        #[arg(required_unless_present = "headers", conflicts_with = "headers")]
        value: Option<String>,

        /// File with raw response header lines to scan for Link headers.
        #[arg(long, value_name = "FILE")]
        headers: Option<PathBuf>,
    },

    /// Derive the default download filename for a URL.
    Filename {
        /// URL to derive the name from.
        url: String,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page (roff).
    Man,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Parse { url } => run_parse(&url)?,
            CliCommand::Format { url } => run_format(&url)?,
            CliCommand::Join {
                base,
                components,
                href,
            } => run_join(&cfg, &base, &components, href)?,
            CliCommand::ToFileUrl { path } => run_to_file_url(&cfg, &path)?,
            CliCommand::ToPath { url } => run_to_path(&cfg, &url)?,
            CliCommand::NextLink { value, headers } => {
                run_next_link(value.as_deref(), headers.as_deref())?
            }
            CliCommand::Filename { url } => run_filename(&cfg, &url)?,
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
