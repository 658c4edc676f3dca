//! Synchronous external process launcher with captured output.
//!
//! The runner only reports whether the process could be run at all. Whether the
//! *operation* succeeded is decided later by inspecting the captured text, so a tool
//! that prints an error and exits non-zero still classifies as [`ExitKind::Ok`].

use crate::{HalError, ProcessOps};
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Classification of one process invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitKind {
    /// The process ran to completion; its own exit code is not interpreted.
    Ok,
    /// The process could not be started, or never got the chance to.
    #[default]
    Error,
    /// The process was killed after exceeding the runner's timeout.
    TimedOut,
}

impl fmt::Display for ExitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitKind::Ok => write!(f, "ok"),
            ExitKind::Error => write!(f, "error"),
            ExitKind::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Captured outcome of one invocation. Consumed by the parsers, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessResult {
    pub stdout: String,
    pub stderr: String,
    pub exit: ExitKind,
    /// Raw OS exit code, informational only.
    pub code: Option<i32>,
}

pub struct ProcessRunner {
    ops: Arc<dyn ProcessOps>,
    program: String,
    base_args: Vec<String>,
    args: Vec<String>,
    timeout: Duration,
    result: ProcessResult,
}

impl fmt::Debug for ProcessRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessRunner")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ProcessRunner {
    /// Prepare an invocation of `program`. Nothing is spawned until [`run`](Self::run).
    pub fn start(ops: Arc<dyn ProcessOps>, program: impl Into<String>) -> Self {
        Self {
            ops,
            program: program.into(),
            base_args: Vec::new(),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            result: ProcessResult::default(),
        }
    }

    /// Add a flag that survives [`clear_arguments`](Self::clear_arguments), e.g. `/C`
    /// for a shell wrapper.
    pub fn with_base_arg(mut self, flag: impl Into<String>) -> Self {
        let flag = flag.into();
        self.base_args.push(flag.clone());
        self.args.push(flag);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Append one token to the argument line, verbatim.
    ///
    /// Tokens are passed to the child as separate arguments; no splitting or escaping
    /// is applied here.
    pub fn add_argument(&mut self, token: impl Into<String>) {
        self.args.push(token.into());
    }

    /// Reset to the base invocation flags.
    pub fn clear_arguments(&mut self) {
        self.args = self.base_args.clone();
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn argument_line(&self) -> String {
        self.args.join(" ")
    }

    /// Launch the process and block until it exits or the timeout elapses.
    pub fn run(&mut self) -> ExitKind {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        log::info!("run: {} {}", self.program, self.argument_line());

        self.result = match self.ops.command_output(&self.program, &args, self.timeout) {
            Ok(output) => ProcessResult {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                exit: ExitKind::Ok,
                code: output.status.code(),
            },
            Err(err @ HalError::CommandTimeout { .. }) => {
                log::error!("{}", err);
                ProcessResult {
                    stderr: err.to_string(),
                    exit: ExitKind::TimedOut,
                    ..ProcessResult::default()
                }
            }
            Err(err) => {
                log::error!("failed to run {}: {}", self.program, err);
                ProcessResult {
                    stderr: err.to_string(),
                    exit: ExitKind::Error,
                    ..ProcessResult::default()
                }
            }
        };

        log::debug!(
            "{} finished ({}, code={:?})\n--- stdout ---\n{}\n--- stderr ---\n{}",
            self.program,
            self.result.exit,
            self.result.code,
            self.result.stdout,
            self.result.stderr
        );
        self.result.exit
    }

    /// Record a failure that happened before the process could be launched.
    pub fn record_error(&mut self, text: impl Into<String>) {
        self.result = ProcessResult {
            stderr: text.into(),
            exit: ExitKind::Error,
            ..ProcessResult::default()
        };
    }

    pub fn result(&self) -> &ProcessResult {
        &self.result
    }

    pub fn take_result(&mut self) -> ProcessResult {
        std::mem::take(&mut self.result)
    }

    /// True if captured stdout matches `pattern` anywhere (unanchored).
    pub fn test_output(&self, pattern: &Regex) -> bool {
        pattern.is_match(&self.result.stdout)
    }

    pub fn output_contains(&self, needle: &str) -> bool {
        self.result.stdout.contains(needle)
    }
}
