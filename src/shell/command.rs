use snafu::{OptionExt, Snafu};

pub const AVAILABLE_COMMANDS: &str = "create, write, read, delete, display, exit";

const CREATE_USAGE: &str = "create <path>";
const WRITE_USAGE: &str = "write <path> <content>";
const READ_USAGE: &str = "read <path>";
const DELETE_USAGE: &str = "delete <path>";

/// A single line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { path: String },
    Write { path: String, content: String },
    Read { path: String },
    Delete { path: String },
    Display,
    Exit,
}

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    ///
    /// The line is split into at most three whitespace-delimited tokens, so
    /// the content of `write` keeps any inner whitespace. The command word
    /// is matched case-insensitively; extra tokens after a path are ignored.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandParseError> {
        let tokens = split_tokens(line);
        let Some(&word) = tokens.first() else {
            return Ok(None);
        };
        let path = tokens.get(1).copied();

        let command = match word.to_lowercase().as_str() {
            "create" => Command::Create {
                path: required(path, CREATE_USAGE)?,
            },
            "write" => Command::Write {
                path: required(path, WRITE_USAGE)?,
                content: required(tokens.get(2).copied(), WRITE_USAGE)?,
            },
            "read" => Command::Read {
                path: required(path, READ_USAGE)?,
            },
            "delete" => Command::Delete {
                path: required(path, DELETE_USAGE)?,
            },
            "display" => Command::Display,
            "exit" => Command::Exit,
            _ => return UnknownCommandSnafu { command: word }.fail(),
        };
        Ok(Some(command))
    }
}

fn required(token: Option<&str>, usage: &'static str) -> Result<String, CommandParseError> {
    token
        .map(str::to_string)
        .context(MissingArgumentSnafu { usage })
}

// Command, path, and the untouched remainder of the line.
fn split_tokens(line: &str) -> Vec<&str> {
    let mut tokens = Vec::with_capacity(3);
    let mut rest = line.trim();
    while !rest.is_empty() && tokens.len() < 2 {
        match rest.split_once(char::is_whitespace) {
            Some((token, tail)) => {
                tokens.push(token);
                rest = tail.trim_start();
            }
            None => {
                tokens.push(rest);
                rest = "";
            }
        }
    }
    if !rest.is_empty() {
        tokens.push(rest);
    }
    tokens
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum CommandParseError {
    #[snafu(display("Unknown command. Available commands: {}", AVAILABLE_COMMANDS))]
    UnknownCommand { command: String },
    #[snafu(display("Usage: {}", usage))]
    MissingArgument { usage: &'static str },
}
