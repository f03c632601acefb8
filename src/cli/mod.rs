// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Command line interface.

mod config;
mod fix;
mod lookup;

use crate::{ArtistTable, Config, Error};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::path::PathBuf;
use xdg::BaseDirectories;

/// Prefix of the XDG base directories.
const XDG_PREFIX: &str = "classical-fixes";

/// File name of the user configuration in the XDG config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// File name of the artist reference table in the XDG data directory.
const ARTISTS_FILE_NAME: &str = "artists.csv";

/// Command line Arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Show debug information.
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Path to configuration file.
    #[arg(short, long, global = true, required = false)]
    config_path: Option<PathBuf>,
    /// The command to run.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Fix the tags of the audio files in a directory.
    Fix(fix::Args),
    /// Look up artists in the reference table.
    Lookup(lookup::Args),
    /// Print the effective configuration.
    Config(config::Args),
}

impl Args {
    /// Get the desired log level, depending on the verbose flag passed on the command line.
    fn log_level_filter(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Get the current configuration.
    ///
    /// Uses the path from the command line if given, otherwise the configuration file in the XDG
    /// config directory (if it exists).
    fn config(&self) -> crate::Result<Config> {
        let path = self.config_path.clone().or_else(|| {
            BaseDirectories::with_prefix(XDG_PREFIX).find_config_file(CONFIG_FILE_NAME)
        });
        match path {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                Config::load_from_path(path).map(|config| config.with_defaults())
            }
            None => Ok(Config::default()),
        }
    }
}

/// Load the artist reference table.
///
/// A path that is set in the configuration must exist. Without a configured path, the table is
/// searched in the XDG data directory, and an empty table is used if it is not found there.
fn load_artist_table(config: &Config) -> crate::Result<ArtistTable> {
    if let Some(path) = config.artists_path()? {
        if !path.is_file() {
            return Err(Error::ArtistTableNotFound(path));
        }
        return ArtistTable::load_from_path(path);
    }

    if let Some(path) = BaseDirectories::with_prefix(XDG_PREFIX).find_data_file(ARTISTS_FILE_NAME)
    {
        return ArtistTable::load_from_path(path);
    }

    log::warn!(
        "No artist reference table found, only rewrite rules and genre will be applied (expected \
         at $XDG_DATA_HOME/{XDG_PREFIX}/{ARTISTS_FILE_NAME})"
    );
    Ok(ArtistTable::new())
}

/// Main entry point.
///
/// # Errors
///
/// Can returns errors if the command line arguments are incorrect or the executed programs lead to
/// an error.
pub fn main() -> crate::Result<()> {
    let args = Args::parse();
    TermLogger::init(
        args.log_level_filter(),
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let config = args.config()?;
    match args.command {
        Command::Fix(cmd_args) => fix::run(&config, load_artist_table(&config)?, &cmd_args),
        Command::Lookup(cmd_args) => lookup::run(&load_artist_table(&config)?, &cmd_args),
        Command::Config(cmd_args) => config::run(&config, &cmd_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_fix_command() {
        let args = Args::try_parse_from([
            "classical-fixes",
            "fix",
            "--dry-run",
            "-v",
            "/music/Bach",
        ])
        .unwrap();
        assert!(args.verbose);
        assert_eq!(args.log_level_filter(), LevelFilter::Debug);
        assert!(matches!(args.command, Command::Fix(_)));
    }

    #[test]
    fn test_parse_lookup_requires_names() {
        assert!(Args::try_parse_from(["classical-fixes", "lookup"]).is_err());
        let args = Args::try_parse_from(["classical-fixes", "lookup", "Bach", "Karajan"]).unwrap();
        assert_eq!(args.log_level_filter(), LevelFilter::Info);
        assert!(matches!(args.command, Command::Lookup(_)));
    }

    #[test]
    fn test_config_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[genre]\nname = \"Klassik\"\n").unwrap();
        let path = file.path().to_str().unwrap();

        let args = Args::try_parse_from(["classical-fixes", "-c", path, "config"]).unwrap();
        let config = args.config().unwrap();
        assert_eq!(config.genre.name.as_deref(), Some("Klassik"));
        assert_eq!(config.genre.keep_original, Some(true));
    }

    #[test]
    fn test_load_configured_artist_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            "claudioabbado|Claudio Abbado|Abbado, Claudio|1933-2014|Abbado, Claudio (1933-2014)|Conductor|\n"
                .as_bytes(),
        )
        .unwrap();

        let mut config = Config::default();
        config.reference.artists_path = Some(file.path().to_path_buf());
        let table = load_artist_table(&config).unwrap();
        assert_eq!(table.len(), 1);

        config.reference.artists_path = Some(file.path().with_extension("missing"));
        assert!(matches!(
            load_artist_table(&config),
            Err(Error::ArtistTableNotFound(_))
        ));
    }
}
