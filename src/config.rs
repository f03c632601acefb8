// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Configuration utils.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Encountered when the configuration cannot be loaded.
#[derive(Error, Debug)]
#[error("Configuration Error: {0}")]
pub struct ConfigError(#[from] toml::de::Error);

/// Default configuration TOML string.
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Represents a piece of configuration that can be merged with another one.
trait MergeableConfig {
    /// Merge this configuration object with another one, taking values not set in this object from
    /// the other one (if present).
    fn merge(&self, other: &Self) -> Self;
}

/// Configuration for the artist reference table.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ReferenceConfig {
    /// Path of the artist reference table.
    ///
    /// If unset, `artists.csv` is searched in the XDG data directories.
    pub artists_path: Option<PathBuf>,
}

impl MergeableConfig for ReferenceConfig {
    fn merge(&self, other: &Self) -> Self {
        ReferenceConfig {
            artists_path: self
                .artists_path
                .clone()
                .or_else(|| other.artists_path.clone()),
        }
    }
}

/// A user-defined rewrite rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleConfig {
    /// Regular expression to search for.
    pub pattern: String,
    /// Replacement string, may reference capture groups as `$1` or `${name}`.
    pub replacement: String,
}

/// Configuration of the title/album rewrite rules.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct RulesConfig {
    /// Additional rules that are applied after the built-in ones.
    pub extra: Option<Vec<RuleConfig>>,
}

impl MergeableConfig for RulesConfig {
    fn merge(&self, other: &Self) -> Self {
        RulesConfig {
            extra: self.extra.clone().or_else(|| other.extra.clone()),
        }
    }
}

/// Genre configuration.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct GenreConfig {
    /// The genre that is assigned to every track.
    pub name: Option<String>,
    /// Keep a differing genre in the "original genre" tag.
    pub keep_original: Option<bool>,
}

impl MergeableConfig for GenreConfig {
    fn merge(&self, other: &Self) -> Self {
        GenreConfig {
            name: self.name.clone().or_else(|| other.name.clone()),
            keep_original: self.keep_original.or(other.keep_original),
        }
    }
}

/// Configuration for processing a batch of files.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Number the tracks of a batch sequentially, in the order they appear in.
    pub renumber_tracks: Option<bool>,
}

impl MergeableConfig for BatchConfig {
    fn merge(&self, other: &Self) -> Self {
        BatchConfig {
            renumber_tracks: self.renumber_tracks.or(other.renumber_tracks),
        }
    }
}

/// The main configuration struct.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Artist reference table configuration.
    #[serde(default)]
    pub reference: ReferenceConfig,
    /// Rewrite rule configuration.
    #[serde(default)]
    pub rules: RulesConfig,
    /// Genre configuration.
    #[serde(default)]
    pub genre: GenreConfig,
    /// Batch configuration.
    #[serde(default)]
    pub batch: BatchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::load_default().expect("Failed to load default config")
    }
}

impl MergeableConfig for Config {
    /// Merge this configuration object with another one, taking values not set in this object from
    /// the other one (if present).
    fn merge(&self, other: &Self) -> Self {
        Config {
            reference: self.reference.merge(&other.reference),
            rules: self.rules.merge(&other.rules),
            genre: self.genre.merge(&other.genre),
            batch: self.batch.merge(&other.batch),
        }
    }
}

impl Config {
    /// Load the configuration from a string slice.
    fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(text)?;
        Ok(config)
    }

    /// Load the default configuration.
    fn load_default() -> Result<Self, ConfigError> {
        Self::load_from_str(DEFAULT_CONFIG)
    }

    /// Load the configuration from a file located at the given path.
    ///
    /// # Errors
    ///
    /// This method can fail if the file cannot be accessed or if it contains malformed
    /// configuration markup.
    pub fn load_from_path<T: AsRef<Path>>(path: T) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::load_from_str(&text)?;
        Ok(config)
    }

    /// Merge this configuration struct with the default values.
    #[must_use]
    pub fn with_defaults(&self) -> Self {
        let default = Self::default();
        self.merge(&default)
    }

    /// The configured artist reference table path, with a leading `~` expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory of the user cannot be determined.
    pub fn artists_path(&self) -> crate::Result<Option<PathBuf>> {
        let Some(path) = self.reference.artists_path.as_ref() else {
            return Ok(None);
        };

        match path.to_str() {
            Some(text) => Ok(Some(expanduser::expanduser(text)?)),
            None => Ok(Some(path.clone())),
        }
    }
}
