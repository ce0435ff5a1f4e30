//! Running external commands while capturing their output.

use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::error::{Error, Result};

/// Output of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// The command line, for messages.
    pub command: String,
    /// Standard output alone, one `\n`-terminated line per line read.
    pub stdout: String,
    /// Standard output and standard error interleaved in arrival order.
    pub fullout: String,
    pub status: ExitStatus,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// The exit result as an error.
    ///
    /// # Errors
    /// Returns [`Error::CommandFailed`] if the command exited unsuccessfully.
    pub fn exit_result(&self) -> Result<()> {
        if self.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                command: self.command.clone(),
                code: self.status.code(),
            })
        }
    }
}

/// Join a program and its arguments for display.
#[must_use]
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A raw output line without its `\r\n` or `\n` terminator. Bytes that are
/// not UTF-8 become U+FFFD.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// Spawns commands and streams their output line by line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Runner {
    echo: bool,
}

impl Runner {
    #[must_use]
    pub const fn new() -> Self {
        Self { echo: false }
    }

    /// Echo stdout lines to stdout and stderr lines to stderr as they arrive.
    #[must_use]
    pub const fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Run `program` with `args` to completion.
    ///
    /// A non-zero exit is not an error here; see [`CommandOutput::exit_result`].
    ///
    /// # Errors
    /// Returns [`Error::Spawn`] if the command cannot be started, or an IO
    /// error if reading its output fails.
    pub async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let command = command_line(program, args);
        tracing::debug!(command = %command, "running command");

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::Spawn {
                command: command.clone(),
                source,
            })?;

        let stdout_pipe = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("stdout was not captured"))?;
        let stderr_pipe = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other("stderr was not captured"))?;

        let mut out_lines = BufReader::new(stdout_pipe).split(b'\n');
        let mut err_lines = BufReader::new(stderr_pipe).split(b'\n');
        let (mut out_done, mut err_done) = (false, false);

        let mut stdout = String::new();
        let mut fullout = String::new();

        while !(out_done && err_done) {
            tokio::select! {
                line = out_lines.next_segment(), if !out_done => match line? {
                    Some(line) => {
                        let line = decode_line(&line);
                        if self.echo {
                            println!("{line}");
                        }
                        stdout.push_str(&line);
                        stdout.push('\n');
                        fullout.push_str(&line);
                        fullout.push('\n');
                    }
                    None => out_done = true,
                },
                line = err_lines.next_segment(), if !err_done => match line? {
                    Some(line) => {
                        let line = decode_line(&line);
                        if self.echo {
                            eprintln!("{line}");
                        }
                        fullout.push_str(&line);
                        fullout.push('\n');
                    }
                    None => err_done = true,
                },
            }
        }

        let status = child.wait().await?;
        tracing::debug!(command = %command, code = ?status.code(), "command finished");

        Ok(CommandOutput {
            command,
            stdout,
            fullout,
            status,
        })
    }
}
