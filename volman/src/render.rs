//! Plain-text tables for the CLI.

use crate::model::{Disk, Partition, Volume, LABEL_DISPLAY_WIDTH};

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

pub fn volume_table(volumes: &[Volume]) -> String {
    let mut out = format!(
        "{:<6} {:<3} {:<w$} {:<6} {:<10} {:>8} {:<9} {:<9}\n",
        "Volume",
        "Ltr",
        "Label",
        "Fs",
        "Type",
        "Size",
        "Status",
        "Read-only",
        w = LABEL_DISPLAY_WIDTH
    );
    for v in volumes {
        let label: String = v.label.chars().take(LABEL_DISPLAY_WIDTH).collect();
        out.push_str(&format!(
            "{:<6} {:<3} {:<w$} {:<6} {:<10} {:>8} {:<9} {:<9}\n",
            v.number,
            v.letter_display(),
            label,
            v.file_system.as_str(),
            v.volume_type.as_str(),
            v.size.to_string(),
            v.status.as_str(),
            yes_no(v.read_only),
            w = LABEL_DISPLAY_WIDTH
        ));
    }
    out
}

pub fn disk_table(disks: &[Disk]) -> String {
    let mut out = format!(
        "{:<5} {:<15} {:>8} {:>8} {:<3} {:<3}\n",
        "Disk", "Status", "Size", "Free", "Dyn", "Gpt"
    );
    for d in disks {
        out.push_str(&format!(
            "{:<5} {:<15} {:>8} {:>8} {:<3} {:<3}\n",
            d.number,
            d.status.as_str(),
            d.size.to_string(),
            d.free.to_string(),
            if d.dynamic { "*" } else { "" },
            if d.gpt { "*" } else { "" },
        ));
    }
    out
}

pub fn partition_table(partitions: &[Partition]) -> String {
    let mut out = format!("{:<9} {:<16} {:>8} {:>8}\n", "Partition", "Type", "Size", "Offset");
    for p in partitions {
        out.push_str(&format!(
            "{:<9} {:<16} {:>8} {:>8}\n",
            p.number,
            p.kind,
            p.size.to_string(),
            p.offset.to_string()
        ));
    }
    out
}
