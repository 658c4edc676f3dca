use std::path::Path;
use std::sync::Arc;
use volman::config::Settings;
use volman::model::{DriveLetter, FileSystem, MediaStatus, Size, SizeUnit, Volume, VolumeType};
use volman::{DiskVolumeProcess, VolumeStatus};
use volman_hal::{FakeHal, FakeResponse};

const LISTING: &str = concat!(
    "\r\n",
    "  Volume ###  Ltr  Label        Fs     Type        Size     Status     Info\r\n",
    "  ----------  ---  -----------  -----  ----------  -------  ---------  --------\r\n",
    "  Volume 0     D                       DVD-ROM         0 B  No Media           \r\n",
    "  Volume 1     C   DATA         NTFS   Partition    100 GB  Healthy    Boot    \r\n",
    "* Volume 3     F   USB DRIVE    FAT32  Removable     14 GB  Healthy            \r\n",
    "  Volume 4     G   BACKUP       exFAT  Removable     29 GB  Offline            \r\n",
);

fn process(hal: &FakeHal) -> DiskVolumeProcess {
    DiskVolumeProcess::new(Arc::new(hal.clone()), &Settings::default())
}

fn removable(number: u32, letter: char, status: MediaStatus) -> Volume {
    Volume {
        number,
        letter: DriveLetter::new(letter),
        label: "USB DRIVE".to_string(),
        file_system: FileSystem::Fat32,
        volume_type: VolumeType::Removable,
        size: Size::new(14, SizeUnit::GB),
        status,
        ..Volume::default()
    }
}

fn attributes_block(number: Option<u32>, read_only: bool) -> String {
    let echo = number
        .map(|n| format!("\r\nVolume {} is the selected volume.\r\n", n))
        .unwrap_or_default();
    format!(
        "{}\r\nRead-only              : {}\r\nHidden                 : No\r\nNo Default Drive Letter: No\r\n",
        echo,
        if read_only { "Yes" } else { "No" }
    )
}

#[test]
fn single_row_parses_to_literal_values() {
    let hal = FakeHal::new();
    hal.push_stdout(
        "  Volume 1     C   DATA         NTFS   Partition    100 GB  Healthy            \r\n",
    );

    let outcome = process(&hal).list_volumes();
    assert_eq!(outcome.status, VolumeStatus::Ok);
    assert_eq!(outcome.value.len(), 1);

    let v = &outcome.value[0];
    assert_eq!(v.number, 1);
    assert_eq!(v.letter.map(|l| l.as_char()), Some('C'));
    assert_eq!(v.label, "DATA");
    assert_eq!(v.file_system, FileSystem::Ntfs);
    assert_eq!(v.volume_type, VolumeType::Partition);
    assert_eq!(v.size, Size::new(100, SizeUnit::GB));
    assert_eq!(v.status, MediaStatus::Healthy);
}

#[test]
fn full_listing_keeps_order_and_raw_text() {
    let hal = FakeHal::new();
    hal.push_stdout(LISTING);

    let outcome = process(&hal).list_volumes();
    assert!(outcome.is_ok());
    let numbers: Vec<u32> = outcome.value.iter().map(|v| v.number).collect();
    assert_eq!(numbers, [0, 1, 3, 4]);
    assert_eq!(outcome.stdout, LISTING);
    assert_eq!(outcome.value[2].label, "USB DRIVE");
    assert!(!outcome.value[3].is_mounted());
}

#[test]
fn unrecognized_output_is_a_parse_error() {
    for text in ["", "DiskPart has encountered an error: Access is denied.\r\n"] {
        let hal = FakeHal::new();
        hal.push_stdout(text);

        let outcome = process(&hal).list_volumes();
        assert_eq!(outcome.status, VolumeStatus::ErrorParse);
        assert!(outcome.value.is_empty());
        assert_eq!(outcome.stdout, text);
    }
}

#[test]
fn consecutive_listings_are_independent() {
    let hal = FakeHal::new();
    hal.push_stdout(LISTING);
    hal.push_stdout("garbage\r\n");
    let p = process(&hal);

    assert!(p.list_volumes().is_ok());
    assert_eq!(p.list_volumes().status, VolumeStatus::ErrorParse);

    let ops = hal.operations();
    assert_eq!(ops.len(), 2);
    for op in &ops {
        assert_eq!(op.script(), Some("list volume\n"));
    }
    let first = ops[0].args().last().unwrap();
    let second = ops[1].args().last().unwrap();
    assert_ne!(first, second);
    assert!(!Path::new(first).exists());
    assert!(!Path::new(second).exists());
}

#[test]
fn read_only_flags_are_assigned_by_position() {
    for n in 0..=4u32 {
        let hal = FakeHal::new();
        let mut vols: Vec<Volume> = (0..n).map(|i| removable(i, 'E', MediaStatus::Healthy)).collect();
        let output: String = (0..n).map(|i| attributes_block(None, i % 2 == 0)).collect();
        hal.push_stdout(output);

        let outcome = process(&hal).get_read_only_flags(&mut vols);
        if n == 0 {
            assert!(outcome.is_ok());
            assert_eq!(hal.operation_count(), 0);
            continue;
        }
        assert!(outcome.is_ok(), "n = {}", n);
        for (i, v) in vols.iter().enumerate() {
            assert_eq!(v.read_only, i % 2 == 0, "volume {} of {}", i, n);
        }
    }
}

#[test]
fn trailing_volumes_without_flags_are_untouched() {
    let hal = FakeHal::new();
    let mut vols = vec![
        removable(1, 'E', MediaStatus::Healthy),
        removable(2, 'F', MediaStatus::Healthy),
        removable(3, 'G', MediaStatus::Healthy),
    ];
    vols[2].read_only = true;
    hal.push_stdout(format!("{}{}", attributes_block(None, true), attributes_block(None, false)));

    let outcome = process(&hal).get_read_only_flags(&mut vols);
    assert!(outcome.is_ok());
    assert!(vols[0].read_only);
    assert!(!vols[1].read_only);
    assert!(vols[2].read_only);
    assert_eq!(
        hal.last_operation().unwrap().script(),
        Some(
            "select volume 1\nattributes volume\n\
             select volume 2\nattributes volume\n\
             select volume 3\nattributes volume\n"
        )
    );
}

#[test]
fn selection_echo_overrides_emission_order() {
    let hal = FakeHal::new();
    let mut vols = vec![
        removable(1, 'E', MediaStatus::Healthy),
        removable(2, 'F', MediaStatus::Healthy),
    ];
    hal.push_stdout(format!(
        "{}{}",
        attributes_block(Some(2), true),
        attributes_block(Some(1), false)
    ));

    assert!(process(&hal).get_read_only_flags(&mut vols).is_ok());
    assert!(!vols[0].read_only);
    assert!(vols[1].read_only);
}

#[test]
fn attribute_output_without_flags_is_a_parse_error() {
    let hal = FakeHal::new();
    let mut vols = vec![removable(1, 'E', MediaStatus::Healthy)];
    hal.push_stdout("There is no volume selected.\r\n");

    let outcome = process(&hal).get_read_only_flags(&mut vols);
    assert_eq!(outcome.status, VolumeStatus::ErrorParse);
}

#[test]
fn refresh_lists_then_fills_flags() {
    let hal = FakeHal::new();
    hal.push_stdout(LISTING);
    hal.push_stdout(
        [
            attributes_block(Some(0), true),
            attributes_block(Some(1), false),
            attributes_block(Some(3), true),
            attributes_block(Some(4), false),
        ]
        .concat(),
    );

    let outcome = process(&hal).refresh_volumes();
    assert!(outcome.is_ok());
    let flags: Vec<bool> = outcome.value.iter().map(|v| v.read_only).collect();
    assert_eq!(flags, [true, false, true, false]);
    assert_eq!(hal.operation_count(), 2);
}

#[test]
fn eject_and_mount_preconditions_are_exclusive() {
    let mounted = removable(3, 'F', MediaStatus::Healthy);
    let unmounted = removable(4, 'G', MediaStatus::Offline);

    let hal = FakeHal::new();
    let p = process(&hal);
    assert_eq!(p.mount(&mounted).status, VolumeStatus::ErrorVolumeMounted);
    assert_eq!(p.eject(&unmounted).status, VolumeStatus::ErrorInvalidVolume);
    assert_eq!(hal.operation_count(), 0);

    hal.push_stdout("\r\nDiskPart successfully dismounted and offlined the volume.\r\n");
    hal.push_stdout("\r\nDiskPart successfully assigned the drive letter or mount point.\r\n");
    assert_eq!(p.eject(&mounted).status, VolumeStatus::Ok);
    assert_eq!(p.mount(&unmounted).status, VolumeStatus::Ok);

    let ops = hal.operations();
    assert_eq!(ops[0].script(), Some("select volume 3\nremove all dismount\n"));
    assert_eq!(ops[1].script(), Some("select volume 4\nassign\n"));
}

#[test]
fn eject_rejects_fixed_volumes() {
    let hal = FakeHal::new();
    let mut fixed = removable(1, 'C', MediaStatus::Healthy);
    fixed.volume_type = VolumeType::Partition;

    assert_eq!(process(&hal).eject(&fixed).status, VolumeStatus::ErrorInvalidVolume);
    assert_eq!(hal.operation_count(), 0);
}

#[test]
fn action_without_confirmation_fails_with_text() {
    let hal = FakeHal::new();
    let text = "\r\nVirtual Disk Service error:\r\nThe volume is in use.\r\n";
    hal.push_stdout(text);

    let outcome = process(&hal).eject(&removable(3, 'F', MediaStatus::Healthy));
    assert_eq!(outcome.status, VolumeStatus::Error);
    assert_eq!(outcome.stdout, text);
}

#[test]
fn write_protected_rename_keeps_label() {
    let hal = FakeHal::new();
    hal.push_stdout("Cannot change label.  The media is write protected.\r\n");
    let mut v = removable(3, 'F', MediaStatus::Healthy);

    let outcome = process(&hal).rename_label(&mut v, "NEWNAME");
    assert_eq!(outcome.status, VolumeStatus::ErrorWriteProtected);
    assert_eq!(v.label, "USB DRIVE");
}

#[test]
fn successful_rename_updates_label() {
    let hal = FakeHal::new();
    hal.push_stdout("");
    let mut v = removable(3, 'F', MediaStatus::Healthy);

    let outcome = process(&hal).rename_label(&mut v, "NEWNAME");
    assert_eq!(outcome.status, VolumeStatus::Ok);
    assert_eq!(v.label, "NEWNAME");
    assert_eq!(hal.last_operation().unwrap().args(), ["/C", "label", "F:", "NEWNAME"]);
}

#[test]
fn rename_needs_a_letter() {
    let hal = FakeHal::new();
    let mut v = removable(3, 'F', MediaStatus::Healthy);
    v.letter = None;

    let outcome = process(&hal).rename_label(&mut v, "NEWNAME");
    assert_eq!(outcome.status, VolumeStatus::ErrorInvalidVolume);
    assert_eq!(hal.operation_count(), 0);
}

#[test]
fn read_only_toggle_mirrors_on_success() {
    let hal = FakeHal::new();
    hal.push_stdout("\r\nVolume attributes set successfully.\r\n");
    hal.push_stdout("\r\nVirtual Disk Service error:\r\nThe media is write protected.\r\n");
    let p = process(&hal);
    let mut v = removable(3, 'F', MediaStatus::Healthy);

    assert!(p.set_read_only(&mut v, true).is_ok());
    assert!(v.read_only);
    assert_eq!(
        hal.last_operation().unwrap().script(),
        Some("select volume 3\nattributes volume set readonly\n")
    );

    assert_eq!(p.set_read_only(&mut v, false).status, VolumeStatus::Error);
    assert!(v.read_only);
}

#[test]
fn timeout_and_spawn_failure_are_distinct() {
    let hal = FakeHal::new();
    hal.push_response(FakeResponse::Timeout);
    hal.push_response(FakeResponse::SpawnFailure);
    let p = process(&hal);

    let timed_out = p.list_volumes();
    assert_eq!(timed_out.status, VolumeStatus::ErrorTimeout);
    assert!(!timed_out.stderr.is_empty());

    let failed = p.list_volumes();
    assert_eq!(failed.status, VolumeStatus::Error);
    assert!(!failed.stderr.is_empty());
}

#[test]
fn unwritable_script_is_not_launched() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::default();
    settings.process.temp_dir = Some(dir.path().join("missing"));
    let hal = FakeHal::new();
    let p = DiskVolumeProcess::new(Arc::new(hal.clone()), &settings);

    let outcome = p.list_volumes();
    assert_eq!(outcome.status, VolumeStatus::Error);
    assert!(outcome.stderr.contains("Failed to write script artifact"));
    assert_eq!(hal.operation_count(), 0);
}

#[test]
fn configured_tools_are_used() {
    let settings = Settings::from_toml_str(
        "[tools]\nshell = \"wine\"\nshell_flag = \"cmd\"\nscript_tool = \"dp.exe\"\n",
    )
    .unwrap();
    let hal = FakeHal::new();
    DiskVolumeProcess::new(Arc::new(hal.clone()), &settings).list_disks();

    let op = hal.last_operation().unwrap();
    let volman_hal::Operation::Command { program, args, .. } = op;
    assert_eq!(program, "wine");
    assert_eq!(&args[..3], ["cmd", "dp.exe", "/s"]);
}
