// Copyright (c) 2026 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Module for the `lookup` CLI subcommand.

use crate::{normalize_name, ArtistRecord, ArtistTable};
use clap::Parser;
use crossterm::style::Stylize;

/// Command line arguments for the `lookup` CLI command.
#[derive(Parser, Debug)]
pub struct Args {
    /// Artist names to look up.
    #[arg(required = true)]
    names: Vec<String>,
}

/// Print a single reference record.
fn print_record(record: &ArtistRecord) {
    println!("{}", record.name.as_str().bold());
    for (label, value) in [
        ("Sort name", record.sort_name.as_str()),
        ("Dates", record.dates.as_str()),
        ("Composer view", record.sort_name_with_dates.as_str()),
        ("Epoque", record.epoque.as_str()),
    ] {
        if !value.is_empty() {
            println!("  {label}: {value}", label = label.grey());
        }
    }
    println!("  {label}: {role}", label = "Role".grey(), role = record.role);
}

/// Run the `lookup` command.
#[expect(clippy::unnecessary_wraps)]
pub fn run(artists: &ArtistTable, args: &Args) -> crate::Result<()> {
    log::debug!("Reference table contains {} artists", artists.len());
    for name in &args.names {
        match artists.lookup(name) {
            Some(record) => print_record(record),
            None => println!(
                "{name}: {not_found} (key {key:?})",
                not_found = "not found".red(),
                key = normalize_name(name)
            ),
        }
    }

    Ok(())
}
