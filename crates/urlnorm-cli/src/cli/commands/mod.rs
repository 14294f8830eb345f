//! CLI command handlers. Each command is in its own file.

mod completions;
mod file_url;
mod filename;
mod join;
mod next_link;
mod parse;

pub use completions::{run_completions, run_man};
pub use file_url::{run_to_file_url, run_to_path};
pub use filename::run_filename;
pub use join::run_join;
pub use next_link::run_next_link;
pub use parse::{run_format, run_parse};
