/// CLI argument parsing and command handling - Gateway
mod args;
mod commands;

pub use args::{Cli, Commands};
pub use commands::{fetch_chapters, handle_command, list_chapters, resolve_config, show_version};
