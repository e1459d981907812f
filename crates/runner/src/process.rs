#![forbid(unsafe_code)]

use crate::{BR_BIN, DEFAULT_TIMEOUT_MS, bin_detect};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::sleep;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Outcome of one `br` invocation. Failures are reported here, never as `Err`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    pub ok: bool,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandResult {
    fn succeeded(command: String, stdout: &str, stderr: &str) -> Self {
        Self {
            ok: true,
            command,
            stdout: Some(stdout.trim().to_string()),
            stderr: Some(stderr.trim().to_string()),
            error: None,
        }
    }

    fn failed(command: String, error: String) -> Self {
        Self {
            ok: false,
            command,
            stdout: None,
            stderr: None,
            error: Some(error),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BrRunner {
    bin: String,
    timeout: Duration,
}

impl Default for BrRunner {
    fn default() -> Self {
        Self::new(BR_BIN, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }
}

fn format_exit_status(status: &ExitStatus) -> String {
    status
        .code()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "signal".to_string())
}

fn spawn_reader<R: Read + Send + 'static>(mut source: R) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = source.read_to_end(&mut buf);
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// `None` means the stream was still open at the deadline.
fn collect_reader(rx: Option<Receiver<String>>, deadline: Instant) -> Option<String> {
    let Some(rx) = rx else {
        return Some(String::new());
    };
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(text) => Some(text),
        Err(RecvTimeoutError::Timeout) => None,
        Err(RecvTimeoutError::Disconnected) => Some(String::new()),
    }
}

impl BrRunner {
    pub fn new(bin: impl Into<String>, timeout: Duration) -> Self {
        Self {
            bin: bin.into(),
            timeout,
        }
    }

    /// Resolves the executable (explicit override, PATH lookup, bare `br`) and applies the timeout.
    pub fn from_config(explicit_bin: Option<String>, timeout_ms: u64) -> Self {
        Self::new(
            bin_detect::resolve_bin(explicit_bin, BR_BIN).into_program(),
            Duration::from_millis(timeout_ms),
        )
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn label(args: &[String]) -> String {
        std::iter::once(BR_BIN)
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs `br <args>` in `cwd`, capturing trimmed output. Never panics or returns `Err`.
    pub fn run(&self, args: &[String], cwd: &Path) -> CommandResult {
        let label = Self::label(args);
        let spawned = Command::new(&self.bin)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(err) => {
                tracing::warn!(command = %label, error = %err, "br: spawn failed");
                let error = format!("failed to spawn {}: {err}", self.bin);
                return CommandResult::failed(label, error);
            }
        };

        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break Ok(status),
                Ok(None) => {}
                Err(err) => break Err(format!("wait for {label} failed: {err}")),
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                // Grandchildren may still hold the pipes open; leave the readers detached.
                return self.timed_out(label);
            }
            sleep(POLL_INTERVAL);
        };

        // A backgrounded grandchild can keep the pipes open past the exit.
        let (Some(stdout), Some(stderr)) = (
            collect_reader(stdout, deadline),
            collect_reader(stderr, deadline),
        ) else {
            return self.timed_out(label);
        };
        match status {
            Ok(status) if status.success() => CommandResult::succeeded(label, &stdout, &stderr),
            Ok(status) => {
                let exit = format_exit_status(&status);
                let detail = stderr.trim();
                tracing::warn!(command = %label, exit = %exit, "br: non-zero exit");
                let error = if detail.is_empty() {
                    format!("Command failed: {label} (exit {exit})")
                } else {
                    format!("Command failed: {label} (exit {exit}): {detail}")
                };
                CommandResult::failed(label, error)
            }
            Err(error) => CommandResult::failed(label, error),
        }
    }

    fn timed_out(&self, label: String) -> CommandResult {
        let ms = self.timeout.as_millis();
        tracing::warn!(command = %label, timeout_ms = %ms, "br: timed out");
        CommandResult::failed(label, format!("timed out after {ms} ms"))
    }

    /// Runs every command concurrently; results come back in the order the commands were given.
    pub fn run_all(&self, commands: &[Vec<String>], cwd: &Path) -> Vec<CommandResult> {
        std::thread::scope(|scope| {
            let handles = commands
                .iter()
                .map(|args| scope.spawn(move || self.run(args, cwd)))
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .zip(commands)
                .map(|(handle, args)| {
                    handle.join().unwrap_or_else(|_| {
                        CommandResult::failed(
                            Self::label(args),
                            "runner thread panicked".to_string(),
                        )
                    })
                })
                .collect()
        })
    }
}
