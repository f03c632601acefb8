// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Error and result types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type.
#[derive(Error, Debug)]
pub enum ErrorType {
    /// Configuration error.
    #[error("Configuration Error ({0})")]
    Config(#[from] crate::config::ConfigError),
    /// I/O Error.
    #[error("Input/Output error ({:?})", .0)]
    Io(#[from] io::Error),
    /// The artist reference table configured by the user does not exist.
    #[error("Artist reference table not found at {}", .0.display())]
    ArtistTableNotFound(PathBuf),
    /// A rewrite rule has a pattern that is not a valid regular expression.
    #[error("Invalid rule pattern {pattern:?}: {source}")]
    InvalidRule {
        /// The offending pattern.
        pattern: String,
        /// The underlying regex error.
        source: regex::Error,
    },
    /// File has an unknown file extension.
    #[error("File has unknown file type")]
    UnknownFileType,
    /// Errors raised by the [`id3`] crate.
    #[cfg(feature = "id3")]
    #[error("Failed to access ID3 tag")]
    Id3(#[from] id3::Error),
    /// Errors raised by the [`metaflac`] crate.
    #[cfg(feature = "flac")]
    #[error("Failed to access FLAC tag")]
    Flac(#[from] metaflac::Error),
    /// An error from the user interface.
    #[error("Error encountered while showing UI: {0}")]
    InquireError(#[from] inquire::InquireError),
    /// The logger could not be set up.
    #[error("Failed to initialize logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Convenience type.
pub type Result<T> = std::result::Result<T, ErrorType>;
