//! Interactive front-end: turns text commands into namespace calls.

mod command;
mod shell;

pub use command::{AVAILABLE_COMMANDS, Command, CommandParseError};
pub use shell::{Flow, Shell, ShellError, ShellSettings};
