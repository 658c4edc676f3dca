//! Host process backend using real child processes.
//!
//! Tools are normally reached through a shell (`cmd /C diskpart /s ...`), so the
//! child we spawn is rarely the process doing the work. On timeout the whole tree
//! is killed, and pipe readers are never waited on without a deadline: a
//! grandchild that survives still holds the pipes open.

use super::ProcessOps;
use crate::{HalError, HalResult};
use std::io::Read;
use std::process::{Child, Command, Output, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

/// Keeps `cmd.exe` from flashing a console window when launched from a GUI host.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// How long to wait for the pipes to close once the shell itself has exited.
const PIPE_GRACE: Duration = Duration::from_millis(500);

/// Real process backend.
#[derive(Debug, Clone, Default)]
pub struct HostHal;

impl HostHal {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
fn isolate(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

/// New process group so the shell and everything it starts can be signalled at once.
#[cfg(unix)]
fn isolate(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(not(any(unix, windows)))]
fn isolate(_cmd: &mut Command) {}

#[cfg(windows)]
fn kill_tree(child: &mut Child) {
    let mut taskkill = Command::new("taskkill");
    taskkill
        .args(["/T", "/F", "/PID", &child.id().to_string()])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    isolate(&mut taskkill);
    if let Err(err) = taskkill.status() {
        log::warn!("taskkill failed for pid {}: {}", child.id(), err);
    }
    let _ = child.kill();
}

#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    // The child leads its own group, so its pid is the group id.
    let group = child.id() as libc::pid_t;
    if unsafe { libc::kill(-group, libc::SIGKILL) } != 0 {
        log::warn!(
            "failed to signal process group {}: {}",
            group,
            std::io::Error::last_os_error()
        );
    }
    let _ = child.kill();
}

#[cfg(not(any(unix, windows)))]
fn kill_tree(child: &mut Child) {
    let _ = child.kill();
}

/// Read a pipe to EOF on a detached thread; the result arrives on the channel.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        let _ = tx.send(buf);
    });
    rx
}

fn collect(program: &str, stream: &str, rx: &Receiver<Vec<u8>>, wait: Duration) -> Vec<u8> {
    rx.recv_timeout(wait).unwrap_or_else(|_| {
        log::warn!("{} {} still open after exit; output dropped", program, stream);
        Vec::new()
    })
}

fn run_bounded(program: &str, mut cmd: Command, timeout: Duration) -> HalResult<Output> {
    let started = Instant::now();
    let mut child = cmd.spawn().map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => HalError::CommandNotFound(program.to_string()),
        _ => HalError::Io(err),
    })?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let Some(status) = child.wait_timeout(timeout).map_err(HalError::Io)? else {
        kill_tree(&mut child);
        let _ = child.wait();
        // Readers are left to finish on their own once the tree is gone.
        return Err(HalError::CommandTimeout {
            program: program.to_string(),
            timeout_secs: timeout.as_secs(),
        });
    };

    let remaining = timeout.saturating_sub(started.elapsed()).max(PIPE_GRACE);
    Ok(Output {
        status,
        stdout: collect(program, "stdout", &stdout, remaining),
        stderr: collect(program, "stderr", &stderr, PIPE_GRACE),
    })
}

impl ProcessOps for HostHal {
    fn command_output(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> HalResult<Output> {
        log::debug!("spawn: {} {}", program, args.join(" "));
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        isolate(&mut cmd);
        run_bounded(program, cmd, timeout)
    }
}
