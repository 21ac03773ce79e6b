//! Running external programs with an optional deadline.

use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// What to do with a child's standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stdout {
    /// Collect it and return it to the caller.
    Capture,
    /// Let it through to our own stdout.
    Inherit,
    /// Discard it.
    Discard,
}

/// Run `command` to completion and return its captured stdout.
///
/// A program that cannot be started is [`Error::ToolUnavailable`]; a nonzero
/// exit is [`Error::ToolExecution`]; exceeding `timeout` kills the child and
/// yields [`Error::ToolTimeout`]. Returns an empty string unless `stdout` is
/// [`Stdout::Capture`]. Anything a successful tool writes to stderr is
/// logged as a warning.
pub fn run(
    tool: &str,
    command: &mut Command,
    stdout: Stdout,
    timeout: Option<Duration>,
) -> Result<String> {
    let (out, err) = execute(tool, command, stdout, timeout)?;
    let err = err.trim();
    if !err.is_empty() {
        tracing::warn!("{tool}: {err}");
    }
    Ok(out)
}

/// Check that `command` can be started and exits successfully.
///
/// Its output is discarded; a nonzero exit counts as the tool being
/// unavailable.
pub fn ensure_runs(tool: &str, command: &mut Command, timeout: Option<Duration>) -> Result<()> {
    match execute(tool, command, Stdout::Discard, timeout) {
        Ok(_) => Ok(()),
        Err(Error::ToolExecution { reason, .. }) => Err(Error::ToolUnavailable {
            tool: tool.to_string(),
            reason,
        }),
        Err(e) => Err(e),
    }
}

/// Returns the child's stdout and stderr once it exits successfully.
fn execute(
    tool: &str,
    command: &mut Command,
    stdout: Stdout,
    timeout: Option<Duration>,
) -> Result<(String, String)> {
    command.stdout(match stdout {
        Stdout::Capture => Stdio::piped(),
        Stdout::Inherit => Stdio::inherit(),
        Stdout::Discard => Stdio::null(),
    });
    command.stdin(Stdio::null());
    command.stderr(Stdio::piped());

    tracing::trace!("running {command:?}");

    let mut child = command.spawn().map_err(|e| Error::ToolUnavailable {
        tool: tool.to_string(),
        reason: e.to_string(),
    })?;

    // Drain pipes on threads so a chatty child cannot block on a full pipe
    // while we wait for it.
    let stdout_reader = child.stdout.take().map(spawn_reader);
    let stderr_reader = child.stderr.take().map(spawn_reader);

    let status = match timeout {
        None => child.wait()?,
        Some(limit) => match wait_with_deadline(&mut child, limit)? {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(Error::ToolTimeout {
                    tool: tool.to_string(),
                    seconds: limit.as_secs(),
                });
            }
        },
    };

    let out = stdout_reader.map(join_reader).unwrap_or_default();
    let err = stderr_reader.map(join_reader).unwrap_or_default();

    if !status.success() {
        let detail = err.trim();
        let reason = if detail.is_empty() {
            status.to_string()
        } else {
            format!("{status}: {detail}")
        };
        return Err(Error::ToolExecution {
            tool: tool.to_string(),
            reason,
        });
    }

    Ok((out, err))
}

fn wait_with_deadline(
    child: &mut std::process::Child,
    limit: Duration,
) -> Result<Option<ExitStatus>> {
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut bytes = Vec::new();
        let _ = pipe.read_to_end(&mut bytes);
        String::from_utf8_lossy(&bytes).into_owned()
    })
}

fn join_reader(handle: thread::JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}
