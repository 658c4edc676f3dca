//! DiskPart conversations: queries that rebuild the volume list and actions that
//! mutate a single volume.
//!
//! Each call builds its own [`ScriptedCliProcess`], so one `DiskVolumeProcess` can be
//! shared between threads; the only shared resource is the temp directory, and
//! artifact names are random.

use crate::config::{Settings, ToolSettings};
use crate::model::{Disk, Partition, StorageRecord, Volume};
use crate::parser::attributes::{apply_read_only, Correlation};
use crate::parser::confirm::{self, Confirmation, Verdict};
use crate::parser::{parse_disks, parse_partitions, parse_read_only, parse_volumes};
use crate::status::{Outcome, VolumeStatus};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use volman_hal::{ExitKind, ProcessOps, ProcessResult, ProcessRunner, ScriptedCliProcess};

/// Script vocabulary.
mod script {
    pub const LIST_VOLUME: &str = "list volume";
    pub const LIST_DISK: &str = "list disk";
    pub const LIST_PARTITION: &str = "list partition";
    pub const REMOVE_ALL_DISMOUNT: &str = "remove all dismount";
    pub const ASSIGN: &str = "assign";
    pub const ATTRIBUTES_VOLUME: &str = "attributes volume";
    pub const SET_READ_ONLY: &str = "attributes volume set readonly";
    pub const CLEAR_READ_ONLY: &str = "attributes volume clear readonly";

    pub fn select_volume(number: u32) -> String {
        format!("select volume {}", number)
    }

    pub fn select_disk(number: u32) -> String {
        format!("select disk {}", number)
    }
}

pub struct DiskVolumeProcess {
    hal: Arc<dyn ProcessOps>,
    tools: ToolSettings,
    timeout: Duration,
    temp_dir: Option<PathBuf>,
}

fn finish<T>(status: VolumeStatus, value: T, result: ProcessResult) -> Outcome<T> {
    Outcome {
        status,
        value,
        stdout: result.stdout,
        stderr: result.stderr,
    }
}

impl DiskVolumeProcess {
    pub fn new(hal: Arc<dyn ProcessOps>, settings: &Settings) -> Self {
        Self {
            hal,
            tools: settings.tools.clone(),
            timeout: settings.process.timeout(),
            temp_dir: settings.process.temp_dir.clone(),
        }
    }

    fn runner(&self) -> ProcessRunner {
        ProcessRunner::start(Arc::clone(&self.hal), self.tools.shell.clone())
            .with_base_arg(self.tools.shell_flag.clone())
            .with_timeout(self.timeout)
    }

    fn scripted(&self) -> ScriptedCliProcess {
        let process = ScriptedCliProcess::new(
            self.runner(),
            self.tools.script_tool.clone(),
            self.tools.script_flag.clone(),
        );
        match &self.temp_dir {
            Some(dir) => process.with_temp_dir(dir.clone()),
            None => process,
        }
    }

    /// One script, one flush, one process.
    fn run_script(&self, lines: Vec<String>) -> (ExitKind, ProcessResult) {
        let mut process = self.scripted();
        for line in lines {
            process.add_line(line);
        }
        process.flush();
        let exit = process.run();
        (exit, process.take_result())
    }

    fn query<T>(&self, lines: Vec<String>, parse: fn(&str) -> Vec<T>, what: &str) -> Outcome<Vec<T>> {
        let (exit, result) = self.run_script(lines);
        if exit != ExitKind::Ok {
            return finish(exit.into(), Vec::new(), result);
        }

        let records = parse(&result.stdout);
        if records.is_empty() {
            warn!("{} listing produced no recognizable rows", what);
            return finish(VolumeStatus::ErrorParse, records, result);
        }
        info!("parsed {} {} record(s)", records.len(), what);
        finish(VolumeStatus::Ok, records, result)
    }

    fn act(&self, lines: Vec<String>, confirmation: Confirmation) -> Outcome<()> {
        let (exit, result) = self.run_script(lines);
        if exit != ExitKind::Ok {
            return finish(exit.into(), (), result);
        }
        finish(verdict_status(confirmation.evaluate(&result.stdout)), (), result)
    }

    /// Parse a fresh `list volume`. Zero recognizable rows is `ErrorParse`.
    pub fn list_volumes(&self) -> Outcome<Vec<Volume>> {
        self.query(vec![script::LIST_VOLUME.to_string()], parse_volumes, "volume")
    }

    /// Back-fill `read_only` on `volumes` with one batched script.
    ///
    /// Flags are matched by the selection echo when DiskPart prints one for every
    /// block, otherwise by position (the Kth flag goes to the Kth volume). Volumes
    /// beyond the last flag are left untouched.
    pub fn get_read_only_flags(&self, volumes: &mut [Volume]) -> Outcome<()> {
        if volumes.is_empty() {
            return Outcome::empty(VolumeStatus::Ok);
        }

        let lines = volumes
            .iter()
            .flat_map(|v| [script::select_volume(v.number), script::ATTRIBUTES_VOLUME.to_string()])
            .collect();
        let (exit, result) = self.run_script(lines);
        if exit != ExitKind::Ok {
            return finish(exit.into(), (), result);
        }

        let entries = parse_read_only(&result.stdout);
        if entries.is_empty() {
            warn!("attribute output contained no read-only lines");
            return finish(VolumeStatus::ErrorParse, (), result);
        }

        let (correlation, assigned) = apply_read_only(&entries, volumes);
        if correlation == Correlation::Positional && entries.len() != volumes.len() {
            warn!(
                "{} read-only flag(s) for {} volume(s); matched by position",
                entries.len(),
                volumes.len()
            );
        }
        info!("read-only flags assigned to {} volume(s) ({:?})", assigned, correlation);
        finish(VolumeStatus::Ok, (), result)
    }

    /// The full refresh cycle: list, then back-fill read-only flags onto that list.
    pub fn refresh_volumes(&self) -> Outcome<Vec<Volume>> {
        let listed = self.list_volumes();
        if !listed.is_ok() {
            return listed;
        }

        let mut volumes = listed.value;
        let flags = self.get_read_only_flags(&mut volumes);
        Outcome {
            status: flags.status,
            value: volumes,
            stdout: flags.stdout,
            stderr: flags.stderr,
        }
    }

    pub fn list_disks(&self) -> Outcome<Vec<Disk>> {
        self.query(vec![script::LIST_DISK.to_string()], parse_disks, "disk")
    }

    pub fn list_partitions(&self, disk: u32) -> Outcome<Vec<Partition>> {
        self.query(
            vec![script::select_disk(disk), script::LIST_PARTITION.to_string()],
            parse_partitions,
            "partition",
        )
    }

    /// Dismount and offline a mounted removable volume.
    pub fn eject(&self, volume: &Volume) -> Outcome<()> {
        if !volume.is_valid() {
            return Outcome::empty(VolumeStatus::ErrorInvalidVolume);
        }
        info!("ejecting volume {} ({})", volume.number, volume.letter_display());
        self.act(
            vec![
                script::select_volume(volume.number),
                script::REMOVE_ALL_DISMOUNT.to_string(),
            ],
            confirm::DISMOUNTED,
        )
    }

    /// Bring an unmounted volume back by assigning it a letter.
    pub fn mount(&self, volume: &Volume) -> Outcome<()> {
        if volume.is_mounted() {
            return Outcome::empty(VolumeStatus::ErrorVolumeMounted);
        }
        info!("assigning a letter to volume {}", volume.number);
        self.act(
            vec![script::select_volume(volume.number), script::ASSIGN.to_string()],
            confirm::LETTER_ASSIGNED,
        )
    }

    /// Relabel through the single-shot label tool. On success only `volume.label`
    /// changes; nothing is re-queried.
    pub fn rename_label(&self, volume: &mut Volume, new_label: &str) -> Outcome<()> {
        let Some(letter) = volume.letter.filter(|_| volume.is_valid()) else {
            return Outcome::empty(VolumeStatus::ErrorInvalidVolume);
        };
        info!("renaming {} to {:?}", letter, new_label);

        let mut runner = self.runner();
        runner.add_argument(self.tools.label_tool.clone());
        runner.add_argument(letter.to_string());
        runner.add_argument(new_label);
        let exit = runner.run();
        let result = runner.take_result();
        if exit != ExitKind::Ok {
            return finish(exit.into(), (), result);
        }

        let status = verdict_status(confirm::LABEL_CHANGED.evaluate(&result.stdout));
        if status.is_ok() {
            volume.label = new_label.to_string();
        }
        finish(status, (), result)
    }

    /// Set or clear the volume's read-only attribute and mirror it on success.
    pub fn set_read_only(&self, volume: &mut Volume, read_only: bool) -> Outcome<()> {
        if !volume.is_valid() {
            return Outcome::empty(VolumeStatus::ErrorInvalidVolume);
        }
        let (command, confirmation) = if read_only {
            (script::SET_READ_ONLY, confirm::READ_ONLY_SET)
        } else {
            (script::CLEAR_READ_ONLY, confirm::READ_ONLY_CLEARED)
        };
        info!("{} on volume {}", command, volume.number);

        let outcome = self.act(
            vec![script::select_volume(volume.number), command.to_string()],
            confirmation,
        );
        if outcome.is_ok() {
            volume.read_only = read_only;
        }
        outcome
    }
}

fn verdict_status(verdict: Verdict) -> VolumeStatus {
    match verdict {
        Verdict::Confirmed => VolumeStatus::Ok,
        Verdict::Rejected => VolumeStatus::ErrorWriteProtected,
        Verdict::Unconfirmed => VolumeStatus::Error,
    }
}
