//! Fake process backend for testing.
//!
//! Records every invocation without spawning anything and replays queued responses,
//! so DiskPart conversations can be scripted in CI on any platform.

use super::ProcessOps;
use crate::{HalError, HalResult};
use std::collections::VecDeque;
use std::path::Path;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Operation records for testing and verification.
#[derive(Debug, Clone)]
pub enum Operation {
    Command {
        program: String,
        args: Vec<String>,
        /// Content of the first argument that named an existing file, read at
        /// invocation time (script artifacts are deleted after the run).
        script: Option<String>,
        timeout_secs: u64,
    },
}

impl Operation {
    pub fn args(&self) -> &[String] {
        match self {
            Operation::Command { args, .. } => args,
        }
    }

    pub fn script(&self) -> Option<&str> {
        match self {
            Operation::Command { script, .. } => script.as_deref(),
        }
    }
}

/// A canned reply for the next command.
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Output {
        stdout: String,
        stderr: String,
        code: i32,
    },
    /// The program could not be started.
    SpawnFailure,
    /// The program never finished within its timeout.
    Timeout,
}

impl FakeResponse {
    pub fn stdout(text: impl Into<String>) -> Self {
        FakeResponse::Output {
            stdout: text.into(),
            stderr: String::new(),
            code: 0,
        }
    }

    pub fn with_stderr(stdout: impl Into<String>, stderr: impl Into<String>, code: i32) -> Self {
        FakeResponse::Output {
            stdout: stdout.into(),
            stderr: stderr.into(),
            code,
        }
    }
}

#[derive(Debug, Default)]
struct FakeHalState {
    operations: Vec<Operation>,
    responses: VecDeque<FakeResponse>,
}

/// Fake backend; clones share state so a test can keep a handle after passing one on.
#[derive(Debug, Clone, Default)]
pub struct FakeHal {
    state: Arc<Mutex<FakeHalState>>,
}

impl FakeHal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response; responses are consumed in FIFO order. An empty queue
    /// answers with empty output and exit code 0.
    pub fn push_response(&self, response: FakeResponse) {
        self.state.lock().unwrap().responses.push_back(response);
    }

    pub fn push_stdout(&self, text: impl Into<String>) {
        self.push_response(FakeResponse::stdout(text));
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.state.lock().unwrap().operations.clone()
    }

    pub fn operation_count(&self) -> usize {
        self.state.lock().unwrap().operations.len()
    }

    pub fn last_operation(&self) -> Option<Operation> {
        self.state.lock().unwrap().operations.last().cloned()
    }

    /// Clear recorded operations and pending responses.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.operations.clear();
        state.responses.clear();
    }

    fn record_operation(&self, op: Operation) {
        self.state.lock().unwrap().operations.push(op);
    }

    fn next_response(&self) -> Option<FakeResponse> {
        self.state.lock().unwrap().responses.pop_front()
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

fn read_script(args: &[&str]) -> Option<String> {
    args.iter()
        .map(Path::new)
        .find(|p| p.is_file())
        .and_then(|p| std::fs::read_to_string(p).ok())
}

impl ProcessOps for FakeHal {
    fn command_output(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> HalResult<Output> {
        log::info!("FAKE HAL: {} {}", program, args.join(" "));
        self.record_operation(Operation::Command {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            script: read_script(args),
            timeout_secs: timeout.as_secs(),
        });

        match self.next_response() {
            None => Ok(Output {
                status: exit_status(0),
                stdout: Vec::new(),
                stderr: Vec::new(),
            }),
            Some(FakeResponse::Output {
                stdout,
                stderr,
                code,
            }) => Ok(Output {
                status: exit_status(code),
                stdout: stdout.into_bytes(),
                stderr: stderr.into_bytes(),
            }),
            Some(FakeResponse::SpawnFailure) => Err(HalError::CommandNotFound(program.to_string())),
            Some(FakeResponse::Timeout) => Err(HalError::CommandTimeout {
                program: program.to_string(),
                timeout_secs: timeout.as_secs(),
            }),
        }
    }
}
