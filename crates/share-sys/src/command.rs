//! Bounded execution of external administration tools
//!
//! Every call into setfacl, getfacl, df, du, pdbedit, chown or systemctl goes
//! through [`ToolCommand`]. The caller blocks until the tool exits; a tool
//! that hangs past the configured timeout is killed and reported as
//! [`Error::ToolTimeout`] instead of hanging the request.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::{Error, Result};

/// Timeout applied when none is configured.
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(120);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of a successful tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A single external tool invocation
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        let arg = path.to_string_lossy().into_owned();
        self.arg(arg)
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Human-readable form used in logs and error messages.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Run the tool and require a zero exit status.
    pub fn run(&self) -> Result<ToolOutput> {
        let (code, output) = self.run_unchecked()?;
        match code {
            Some(0) => Ok(output),
            other => Err(Error::ToolFailed {
                program: self.program.clone(),
                code: other.unwrap_or(-1),
                stderr: output.stderr.trim().to_string(),
            }),
        }
    }

    /// Run the tool and return its exit code alongside the captured output.
    ///
    /// Used where a non-zero status is an answer rather than a failure
    /// (e.g. `systemctl is-active`). `None` means the tool was killed by a
    /// signal.
    pub fn run_unchecked(&self) -> Result<(Option<i32>, ToolOutput)> {
        tracing::debug!(command = %self.display(), "Running external tool");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Drain both pipes concurrently so a chatty tool never blocks on a full pipe.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let started = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if started.elapsed() >= self.timeout => {
                    let _ = child.kill();
                    let _ = child.wait();
                    tracing::warn!(command = %self.display(), timeout = ?self.timeout, "External tool timed out");
                    return Err(Error::ToolTimeout {
                        program: self.program.clone(),
                        timeout: self.timeout,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(source) => {
                    return Err(Error::Spawn {
                        program: self.program.clone(),
                        source,
                    });
                }
            }
        };

        let output = ToolOutput {
            stdout: stdout.map(join_drain).unwrap_or_default(),
            stderr: stderr.map(join_drain).unwrap_or_default(),
        };
        Ok((status.code(), output))
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_drain(handle: thread::JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}
