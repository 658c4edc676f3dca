use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use std::sync::Arc;
use volman::cli::{Cli, Command};
use volman::config::{Settings, VERSION, WEBSITE};
use volman::model::Volume;
use volman::{logging, render, DiskVolumeProcess, Outcome};
use volman_error::VolmanError;
use volman_hal::HostHal;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to determine the working directory")?;
    let mut settings = Settings::discover(cli.config.as_deref(), &cwd)?;
    if let Some(secs) = cli.timeout {
        settings.process.timeout_secs = secs;
    }
    logging::init(&settings.logging);

    let process = DiskVolumeProcess::new(Arc::new(HostHal::new()), &settings);

    match cli.command {
        Command::List {
            json,
            skip_read_only,
        } => {
            let outcome = if skip_read_only {
                process.list_volumes()
            } else {
                process.refresh_volumes()
            };
            show(outcome, json, render::volume_table)
        }
        Command::Disks { json } => show(process.list_disks(), json, render::disk_table),
        Command::Partitions { disk, json } => {
            show(process.list_partitions(disk), json, render::partition_table)
        }
        Command::Eject { volume } => {
            let Some(target) = lookup(&process, volume)? else {
                return Ok(ExitCode::FAILURE);
            };
            Ok(finish(process.eject(&target)))
        }
        Command::Mount { volume } => {
            let Some(target) = lookup(&process, volume)? else {
                return Ok(ExitCode::FAILURE);
            };
            Ok(finish(process.mount(&target)))
        }
        Command::Rename { volume, label } => {
            let Some(mut target) = lookup(&process, volume)? else {
                return Ok(ExitCode::FAILURE);
            };
            let outcome = process.rename_label(&mut target, &label);
            if outcome.is_ok() {
                println!("Volume {} is now labeled {:?}", target.number, target.label);
            }
            Ok(finish(outcome))
        }
        Command::ReadOnly { volume, set, .. } => {
            let Some(mut target) = lookup(&process, volume)? else {
                return Ok(ExitCode::FAILURE);
            };
            Ok(finish(process.set_read_only(&mut target, set)))
        }
        Command::About => {
            println!("volman {}", VERSION);
            println!("{}", WEBSITE);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Print a listing as a table or JSON; a failed query prints its report instead.
fn show<T: Serialize>(
    outcome: Outcome<Vec<T>>,
    json: bool,
    table: fn(&[T]) -> String,
) -> Result<ExitCode> {
    if !outcome.is_ok() {
        eprintln!("{}", outcome.report());
        return Ok(ExitCode::FAILURE);
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.value)?);
    } else {
        print!("{}", table(&outcome.value));
    }
    Ok(ExitCode::SUCCESS)
}

/// Refresh the listing and pick one volume out of it. `None` means the refresh
/// itself failed and its report has been printed.
fn lookup(process: &DiskVolumeProcess, number: u32) -> Result<Option<Volume>> {
    let listed = process.refresh_volumes();
    if !listed.is_ok() {
        eprintln!("{}", listed.report());
        return Ok(None);
    }
    let volume = listed
        .value
        .into_iter()
        .find(|v| v.number == number)
        .ok_or(VolmanError::UnknownVolume(number))?;
    Ok(Some(volume))
}

fn finish(outcome: Outcome<()>) -> ExitCode {
    if outcome.is_ok() {
        println!("{}", outcome.status);
        ExitCode::SUCCESS
    } else {
        eprintln!("{}", outcome.report());
        ExitCode::FAILURE
    }
}
