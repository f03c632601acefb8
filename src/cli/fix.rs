// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Module for the `fix` CLI subcommand.

use crate::util::{is_supported_file, walk_dir};
use crate::{ArtistTable, ClassicalFixer, Config, TagChange, TaggedFile, TrackMetadata};
use clap::Parser;
use crossterm::style::Stylize;
use inquire::{Confirm, InquireError};
use std::path::{Path, PathBuf};

/// Command line arguments for the `fix` CLI command.
#[derive(Parser, Debug)]
pub struct Args {
    /// File or directory to fix.
    path: PathBuf,
    /// Only show the changes, never write them.
    #[arg(short = 'n', long)]
    dry_run: bool,
    /// Write the changes without asking for confirmation.
    #[arg(short, long)]
    yes: bool,
}

/// Print the changes of a single file.
fn print_changes(path: &Path, changes: &[TagChange]) {
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    println!("{}", file_name.bold());
    for change in changes {
        let key = change.key.name();
        match (&change.old, &change.new) {
            (None, Some(new)) => println!("  {key}: {}", new.as_str().green()),
            (Some(old), None) => println!("  {key}: {}", old.as_str().red().crossed_out()),
            (Some(old), Some(new)) => println!(
                "  {key}: {old} {arrow} {new}",
                old = old.as_str().red(),
                arrow = "->".grey(),
                new = new.as_str().green()
            ),
            (None, None) => (),
        }
    }
}

/// Ask the user whether the changes shall be written.
///
/// Cancelling the prompt (e.g., with Escape) counts as "no".
fn confirm_write() -> crate::Result<bool> {
    match Confirm::new("Write these changes?")
        .with_default(true)
        .prompt()
    {
        Ok(answer) => Ok(answer),
        Err(InquireError::OperationCanceled) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Read, fix and (optionally) write a batch of files.
fn fix_files(fixer: &ClassicalFixer, args: &Args, paths: Vec<PathBuf>) -> crate::Result<()> {
    let mut files: Vec<TaggedFile> = paths
        .into_iter()
        .filter_map(|path| match TaggedFile::read_from_path(&path) {
            Ok(file) => Some(file),
            Err(err) => {
                log::warn!("Skipping {path}: {err}", path = path.display());
                None
            }
        })
        .collect();
    files.sort();

    let mut tracks: Vec<TrackMetadata> = files.iter().map(TaggedFile::metadata).collect();
    let changes = fixer.fix_batch(&mut tracks);
    let changed_count = changes.iter().filter(|changes| !changes.is_empty()).count();
    if changed_count == 0 {
        log::info!("No changes necessary");
        return Ok(());
    }

    for (file, file_changes) in files.iter().zip(&changes) {
        if !file_changes.is_empty() {
            print_changes(&file.path, file_changes);
        }
    }

    if args.dry_run {
        log::info!("Dry run, not writing changes to {changed_count} files");
        return Ok(());
    }

    if !args.yes && !confirm_write()? {
        log::info!("Skipped writing changes");
        return Ok(());
    }

    for (file, file_changes) in files.iter_mut().zip(&changes) {
        if file_changes.is_empty() {
            continue;
        }

        log::debug!("Writing {}", file.path.display());
        file.apply_changes(file_changes);
        file.write_tags()?;
    }
    log::info!("Wrote changes to {changed_count} files");

    Ok(())
}

/// Run the `fix` command.
///
/// Every directory is a separate batch that consists of the supported audio files directly inside
/// it.
pub fn run(config: &Config, artists: ArtistTable, args: &Args) -> crate::Result<()> {
    let fixer = ClassicalFixer::from_config(config, artists)?;

    if args.path.is_file() {
        return fix_files(&fixer, args, vec![args.path.clone()]);
    }

    for result in walk_dir(args.path.clone()) {
        let (dir, _dirs, files) = result?;
        let files: Vec<PathBuf> = files
            .into_iter()
            .filter(|path| is_supported_file(path))
            .collect();
        if files.is_empty() {
            continue;
        }

        log::info!(
            "Fixing {count} files in {dir}",
            count = files.len(),
            dir = dir.display()
        );
        fix_files(&fixer, args, files)?;
    }

    Ok(())
}
