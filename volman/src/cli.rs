//! CLI argument parsing for volman

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "volman", version)]
#[command(about = "Removable volume manager driven by DiskPart")]
#[command(long_about = "Removable volume manager driven by DiskPart\n\n\
    Lists volumes, disks and partitions, and ejects, mounts, relabels or\n\
    write-protects removable volumes by running DiskPart scripts.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (defaults to ./volman.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seconds each external tool may run before it is killed
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List volumes with their read-only flags
    List {
        #[arg(long)]
        json: bool,

        /// Skip the second query that back-fills read-only flags
        #[arg(long)]
        skip_read_only: bool,
    },

    /// List disks
    Disks {
        #[arg(long)]
        json: bool,
    },

    /// List the partitions on one disk
    Partitions {
        #[arg(long)]
        disk: u32,

        #[arg(long)]
        json: bool,
    },

    /// Dismount and offline a removable volume
    Eject {
        #[arg(long)]
        volume: u32,
    },

    /// Assign a drive letter to an unmounted volume
    Mount {
        #[arg(long)]
        volume: u32,
    },

    /// Change a removable volume's label
    Rename {
        #[arg(long)]
        volume: u32,

        #[arg(long)]
        label: String,
    },

    /// Set or clear a removable volume's read-only attribute
    #[command(group(ArgGroup::new("mode").required(true).args(["set", "clear"])))]
    ReadOnly {
        #[arg(long)]
        volume: u32,

        #[arg(long)]
        set: bool,

        #[arg(long)]
        clear: bool,
    },

    /// Show version and website
    About,
}
