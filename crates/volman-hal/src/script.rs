//! Batch-script driven invocations (`diskpart /s <file>` and friends).
//!
//! Lines are buffered in memory, written to a randomly named temporary artifact on
//! flush, and the artifact path is passed as the final argument. The artifact is
//! deleted as soon as the run that consumed it finishes.

use crate::runner::{ExitKind, ProcessResult, ProcessRunner};
use crate::HalError;
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const ARTIFACT_PREFIX: &str = "volman-";
const ARTIFACT_SUFFIX: &str = ".txt";

#[derive(Debug)]
pub struct ScriptedCliProcess {
    runner: ProcessRunner,
    tool: String,
    script_flag: String,
    temp_dir: Option<PathBuf>,
    lines: Vec<String>,
    artifact: Option<NamedTempFile>,
    serialize_error: Option<String>,
}

impl ScriptedCliProcess {
    /// `runner` supplies the program and its base flags (e.g. `cmd /C`); `tool` and
    /// `script_flag` are appended before the artifact path on every run.
    pub fn new(
        runner: ProcessRunner,
        tool: impl Into<String>,
        script_flag: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            tool: tool.into(),
            script_flag: script_flag.into(),
            temp_dir: None,
            lines: Vec::new(),
            artifact: None,
            serialize_error: None,
        }
    }

    /// Write artifacts under `dir` instead of the platform temp directory.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn pending_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn artifact_path(&self) -> Option<&Path> {
        self.artifact.as_ref().map(NamedTempFile::path)
    }

    /// Serialize buffered lines to the artifact and clear the buffer.
    ///
    /// An I/O failure is recorded and reported by the next [`run`](Self::run)
    /// instead of being returned here.
    pub fn flush(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        let lines = std::mem::take(&mut self.lines);
        if let Err(err) = self.write_lines(&lines) {
            log::error!("{}", err);
            self.serialize_error = Some(err.to_string());
        }
    }

    fn write_lines(&mut self, lines: &[String]) -> Result<(), HalError> {
        if self.artifact.is_none() {
            let mut builder = tempfile::Builder::new();
            builder.prefix(ARTIFACT_PREFIX).suffix(ARTIFACT_SUFFIX);
            let file = match &self.temp_dir {
                Some(dir) => builder.tempfile_in(dir),
                None => builder.tempfile(),
            }
            .map_err(HalError::ScriptWrite)?;
            log::debug!("script artifact: {}", file.path().display());
            self.artifact = Some(file);
        }

        let Some(artifact) = self.artifact.as_mut() else {
            return Err(HalError::Other("script artifact missing".to_string()));
        };
        let file = artifact.as_file_mut();
        for line in lines {
            log::debug!("script> {}", line);
            writeln!(file, "{}", line).map_err(HalError::ScriptWrite)?;
        }
        file.flush().map_err(HalError::ScriptWrite)?;
        Ok(())
    }

    /// Flush any pending lines, run the tool against the artifact, then reset so the
    /// instance can carry an unrelated batch.
    ///
    /// A failed serialization short-circuits to [`ExitKind::Error`] without launching
    /// the tool; the failure text is available as the captured stderr.
    pub fn run(&mut self) -> ExitKind {
        self.flush();

        let exit = if let Some(err) = self.serialize_error.take() {
            self.runner.record_error(err);
            ExitKind::Error
        } else if let Some(path) = self.artifact_path().map(Path::to_path_buf) {
            self.runner.clear_arguments();
            self.runner.add_argument(self.tool.clone());
            self.runner.add_argument(self.script_flag.clone());
            self.runner.add_argument(path.display().to_string());
            self.runner.run()
        } else {
            self.runner.record_error("no script lines to run");
            ExitKind::Error
        };

        self.reset();
        exit
    }

    fn reset(&mut self) {
        self.lines.clear();
        // Dropping the handle deletes the artifact.
        if let Some(artifact) = self.artifact.take() {
            if let Err(err) = artifact.close() {
                log::warn!("failed to delete script artifact: {}", err);
            }
        }
        self.runner.clear_arguments();
    }

    pub fn result(&self) -> &ProcessResult {
        self.runner.result()
    }

    pub fn take_result(&mut self) -> ProcessResult {
        self.runner.take_result()
    }

    pub fn test_output(&self, pattern: &Regex) -> bool {
        self.runner.test_output(pattern)
    }

    pub fn output_contains(&self, needle: &str) -> bool {
        self.runner.output_contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FakeHal;
    use std::sync::Arc;

    fn scripted(hal: &FakeHal) -> ScriptedCliProcess {
        let runner = ProcessRunner::start(Arc::new(hal.clone()), "cmd").with_base_arg("/C");
        ScriptedCliProcess::new(runner, "diskpart", "/s")
    }

    #[test]
    fn run_passes_artifact_as_final_argument() {
        let hal = FakeHal::new();
        let mut p = scripted(&hal);
        p.add_line("select volume 4");
        p.add_line("remove all dismount");

        assert_eq!(p.run(), ExitKind::Ok);

        let op = hal.last_operation().unwrap();
        let args = op.args();
        assert_eq!(&args[..3], ["/C", "diskpart", "/s"]);
        assert!(args[3].ends_with(".txt"));
        assert_eq!(op.script(), Some("select volume 4\nremove all dismount\n"));
    }

    #[test]
    fn artifact_is_created_lazily_and_deleted_after_run() {
        let hal = FakeHal::new();
        let mut p = scripted(&hal);
        p.add_line("list volume");
        assert!(p.artifact_path().is_none());

        p.flush();
        let path = p.artifact_path().unwrap().to_path_buf();
        assert!(path.is_file());
        assert!(p.pending_lines().is_empty());

        p.run();
        assert!(!path.exists());
        assert!(p.artifact_path().is_none());
    }

    #[test]
    fn multiple_flushes_share_one_artifact() {
        let hal = FakeHal::new();
        let mut p = scripted(&hal);
        p.add_line("select volume 1");
        p.flush();
        let first = p.artifact_path().unwrap().to_path_buf();
        p.add_line("attributes volume");
        p.flush();

        assert_eq!(p.artifact_path().unwrap(), first);
        p.run();
        assert_eq!(
            hal.last_operation().unwrap().script(),
            Some("select volume 1\nattributes volume\n")
        );
    }

    #[test]
    fn consecutive_runs_do_not_leak_state() {
        let hal = FakeHal::new();
        let mut p = scripted(&hal);
        p.add_line("list volume");
        p.run();
        p.add_line("list disk");
        p.run();

        let ops = hal.operations();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[1].script(), Some("list disk\n"));
        assert_eq!(ops[1].args().len(), 4);
        assert_ne!(ops[0].args()[3], ops[1].args()[3]);
    }

    #[test]
    fn serialization_failure_skips_launch() {
        let hal = FakeHal::new();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let mut p = scripted(&hal).with_temp_dir(missing);
        p.add_line("list volume");

        assert_eq!(p.run(), ExitKind::Error);
        assert_eq!(hal.operation_count(), 0);
        assert!(p.result().stderr.contains("Failed to write script artifact"));
    }

    #[test]
    fn empty_script_is_an_error() {
        let hal = FakeHal::new();
        let mut p = scripted(&hal);

        assert_eq!(p.run(), ExitKind::Error);
        assert_eq!(hal.operation_count(), 0);
    }
}
