//! Terminal host for the cycle picker.

mod commands;
pub mod core;
mod help;
mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;

pub use self::core::{CliError, CommandError, CommandResult};
pub use shell::{run_cli, SCRIPT_ENV};
pub use shell_context::{CliMode, ShellContext};
