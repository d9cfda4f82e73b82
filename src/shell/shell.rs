use std::io::{self, BufRead, Write};

use colored::Colorize;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info, warn};

use crate::filesystem::{Namespace, NamespaceError, TreeStyle};
use crate::shell::Command;

const BANNER: &str = "\
File System Manager - Commands:
1. create <path> - Create a new path
2. write <path> <content> - Write content to a file
3. read <path> - Read content from a file
4. delete <path> - Delete a path
5. display - Show the entire file system structure
6. exit - Exit the program";

/// Presentation settings for an interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSettings {
    pub prompt: String,
    pub banner: bool,
    pub color: bool,
}

/// Whether the session keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Line-oriented command loop over a [`Namespace`].
pub struct Shell {
    settings: ShellSettings,
}

impl Shell {
    pub fn new(settings: ShellSettings) -> Self {
        // `colored` would otherwise re-check the terminal and drop escapes
        // when output is piped. Plain sessions never reach `colored`.
        if settings.color {
            colored::control::set_override(true);
        }
        Self { settings }
    }

    /// Reads commands from `input` until `exit` or end of input.
    ///
    /// Bad commands and failed operations are reported on `output` and the
    /// session goes on; only I/O errors on the streams themselves end it.
    pub fn run(
        &self,
        namespace: &mut Namespace,
        mut input: impl BufRead,
        mut output: impl Write,
    ) -> Result<(), ShellError> {
        info!("Starting interactive session");
        if self.settings.banner {
            writeln!(output, "{BANNER}").context(WriteSnafu)?;
        }

        let mut buffer = Vec::new();
        loop {
            write!(output, "{}", self.settings.prompt).context(WriteSnafu)?;
            output.flush().context(WriteSnafu)?;

            buffer.clear();
            if input.read_until(b'\n', &mut buffer).context(ReadSnafu)? == 0 {
                info!("Reached end of input");
                if !self.settings.prompt.is_empty() {
                    writeln!(output).context(WriteSnafu)?;
                }
                break;
            }

            let line = match std::str::from_utf8(&buffer) {
                Ok(line) => line,
                Err(err) => {
                    warn!("Skipping malformed input line: {err}");
                    writeln!(output, "Error: {err}").context(WriteSnafu)?;
                    continue;
                }
            };

            if self.handle_line(namespace, line, &mut output)? == Flow::Exit {
                break;
            }
        }

        info!("Interactive session finished");
        Ok(())
    }

    pub fn handle_line(
        &self,
        namespace: &mut Namespace,
        line: &str,
        output: &mut impl Write,
    ) -> Result<Flow, ShellError> {
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(namespace, command, output),
            Ok(None) => Ok(Flow::Continue),
            Err(err) => {
                debug!("Rejected input line {line:?}: {err}");
                writeln!(output, "{err}").context(WriteSnafu)?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn execute(
        &self,
        namespace: &mut Namespace,
        command: Command,
        output: &mut impl Write,
    ) -> Result<Flow, ShellError> {
        debug!("Executing {command:?}");
        match command {
            Command::Create { path } => self.report(
                output,
                namespace.create_path(&path),
                "Path created successfully",
                "Failed to create path",
            )?,
            Command::Write { path, content } => self.report(
                output,
                namespace.set_file_content(&path, content),
                "Content written successfully",
                "Failed to write content",
            )?,
            Command::Read { path } => match namespace.get_file_content(&path) {
                Ok(Some(content)) => writeln!(output, "Content: {content}").context(WriteSnafu)?,
                Ok(None) => self.failure(output, "Failed to read content", None)?,
                Err(err) => self.failure(output, "Failed to read content", Some(&err))?,
            },
            Command::Delete { path } => self.report(
                output,
                namespace.delete_path(&path),
                "Path deleted successfully",
                "Failed to delete path",
            )?,
            Command::Display => {
                writeln!(output, "\nFile System Structure:").context(WriteSnafu)?;
                write!(output, "{}", namespace.display_styled(self.tree_style()))
                    .context(WriteSnafu)?;
            }
            Command::Exit => {
                writeln!(output, "Exiting...").context(WriteSnafu)?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn tree_style(&self) -> TreeStyle {
        if self.settings.color {
            TreeStyle::Colored
        } else {
            TreeStyle::Plain
        }
    }

    fn report(
        &self,
        output: &mut impl Write,
        result: Result<(), NamespaceError>,
        success: &str,
        failure: &str,
    ) -> Result<(), ShellError> {
        match result {
            Ok(()) => self.success(output, success),
            Err(err) => self.failure(output, failure, Some(&err)),
        }
    }

    fn success(&self, output: &mut impl Write, message: &str) -> Result<(), ShellError> {
        let written = if self.settings.color {
            writeln!(output, "{}", message.green())
        } else {
            writeln!(output, "{message}")
        };
        written.context(WriteSnafu)
    }

    fn failure(
        &self,
        output: &mut impl Write,
        message: &str,
        reason: Option<&NamespaceError>,
    ) -> Result<(), ShellError> {
        if let Some(err) = reason {
            debug!("{message}: {err:?}");
        }
        let text = match reason {
            Some(err) => format!("{message}: {err}"),
            None => message.to_string(),
        };
        let written = if self.settings.color {
            writeln!(output, "{}", text.red())
        } else {
            writeln!(output, "{text}")
        };
        written.context(WriteSnafu)
    }
}

#[derive(Debug, Snafu)]
pub enum ShellError {
    #[snafu(display("Failed to read command input"))]
    ReadError { source: io::Error },
    #[snafu(display("Failed to write command output"))]
    WriteError { source: io::Error },
}
