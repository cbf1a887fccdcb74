//! Typed external command invocation.
//!
//! Every external call in the pipeline goes through here: blocking
//! execution with captured output for probes and installs, and detached /
//! attached spawning for the final hand-off to the target application.

use crate::error::{PystrapError, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing an external command to completion.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// PATH value for the child (overrides the inherited one). The child
    /// program itself is also looked up against this value.
    pub path: Option<OsString>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Capture both streams with the given PATH.
    pub fn captured(path: OsString) -> Self {
        Self {
            path: Some(path),
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }
}

fn build_command(program: &str, args: &[&str], options: &CommandOptions) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }
    if let Some(path) = &options.path {
        cmd.env("PATH", path);
    }

    cmd
}

fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Execute a command to completion.
///
/// Spawn failures (program not found) map to a zero-less failure result
/// rather than an error: to the pipeline, "could not start" and "exited
/// non-zero" gate stages the same way.
pub fn execute(program: &str, args: &[&str], options: &CommandOptions) -> CommandResult {
    let start = Instant::now();
    let mut cmd = build_command(program, args, options);

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }
    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }
    cmd.stdin(Stdio::null());

    let output = match cmd.output() {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!(
                command = display_command(program, args),
                error = %e,
                "command failed to spawn"
            );
            return CommandResult {
                exit_code: None,
                stdout: String::new(),
                stderr: e.to_string(),
                duration: start.elapsed(),
                success: false,
            };
        }
    };

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };
    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    CommandResult {
        exit_code: output.status.code(),
        stdout,
        stderr,
        duration: start.elapsed(),
        success: output.status.success(),
    }
}

/// Execute a command and return success/failure.
pub fn execute_check(program: &str, args: &[&str], options: &CommandOptions) -> bool {
    execute(program, args, options).success
}

/// Spawn a long-lived child in windowless/detached mode and return its pid
/// without waiting on it.
///
/// The child gets null stdio so it survives the bootstrap process exiting;
/// on Windows it additionally gets no console window.
pub fn spawn_detached(program: &str, args: &[&str], options: &CommandOptions) -> Result<u32> {
    let mut cmd = build_command(program, args, options);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }

    let child = cmd.spawn().map_err(|_| PystrapError::CommandFailed {
        command: display_command(program, args),
        code: None,
    })?;
    Ok(child.id())
}

/// Spawn a child in attached (console-visible) mode and return its pid
/// without waiting on it.
///
/// Used as the diagnostic fallback when the windowless launch fails: the
/// inherited stdio lets the target surface its own startup errors.
pub fn spawn_attached(program: &str, args: &[&str], options: &CommandOptions) -> Result<u32> {
    let mut cmd = build_command(program, args, options);
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let child = cmd.spawn().map_err(|_| PystrapError::CommandFailed {
        command: display_command(program, args),
        code: None,
    })?;
    Ok(child.id())
}
