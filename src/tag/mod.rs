// Copyright (c) 2022 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Tags and tag-related functions.

#[cfg(feature = "flac")]
pub mod flac;
#[cfg(feature = "id3")]
pub mod id3;

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

/// Separator used when multiple values of a tag are joined into a single string.
pub const MULTI_VALUE_SEPARATOR: &str = "; ";

/// A tag key describes the kind of information in a generic, format-independent way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagKey {
    /// Track Title.
    TrackTitle,
    /// Title of the release.
    Album,
    /// Track Artist Name(s).
    Artist,
    /// Artist(s) primarily credited on the release.
    AlbumArtist,
    /// Composer Name(s).
    Composer,
    /// Composer sort name including life dates (e.g. "Bach, Johann Sebastian (1685-1750)").
    ComposerView,
    /// Conductor Name(s).
    Conductor,
    /// Orchestra Name(s).
    Orchestra,
    /// Genre Name(s) of the track.
    Genre,
    /// The genre the track had before it was replaced.
    OriginalGenre,
    /// Epoque of the primary composer (e.g. "Baroque").
    Epoque,
    /// Track number on the disc.
    TrackNumber,
}

impl TagKey {
    /// All tag keys.
    pub const ALL: [TagKey; 12] = [
        TagKey::TrackTitle,
        TagKey::Album,
        TagKey::Artist,
        TagKey::AlbumArtist,
        TagKey::Composer,
        TagKey::ComposerView,
        TagKey::Conductor,
        TagKey::Orchestra,
        TagKey::Genre,
        TagKey::OriginalGenre,
        TagKey::Epoque,
        TagKey::TrackNumber,
    ];

    /// Human-readable name of the key.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TagKey::TrackTitle => "title",
            TagKey::Album => "album",
            TagKey::Artist => "artist",
            TagKey::AlbumArtist => "album artist",
            TagKey::Composer => "composer",
            TagKey::ComposerView => "composer view",
            TagKey::Conductor => "conductor",
            TagKey::Orchestra => "orchestra",
            TagKey::Genre => "genre",
            TagKey::OriginalGenre => "original genre",
            TagKey::Epoque => "epoque",
            TagKey::TrackNumber => "track number",
        }
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The tag type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum TagType {
    /// ID3v2.2 tag
    ID3v22,
    /// ID3v2.3 tag
    ID3v23,
    /// ID3v2.3 tag
    ID3v24,
    /// Vorbis tag from a FLAC file
    Flac,
}

/// A tag that can be read, modified and written.
pub trait Tag {
    /// Get the tag type.
    fn tag_type(&self) -> TagType;

    /// Get the string value for the tag key.
    ///
    /// Multiple values are joined with [`MULTI_VALUE_SEPARATOR`].
    fn get(&self, key: TagKey) -> Option<Cow<'_, str>>;

    /// Clear the value for the tag key.
    fn clear(&mut self, key: TagKey);

    /// Set the value for the tag key.
    fn set(&mut self, key: TagKey, value: Cow<'_, str>);

    /// Set the value for the tag key if a value is given, otherwise clear it.
    fn set_or_clear(&mut self, key: TagKey, value: Option<Cow<'_, str>>) {
        match value {
            Some(value) => self.set(key, value),
            None => self.clear(key),
        }
    }

    /// Write the tag to the file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&mut self, path: &Path) -> crate::Result<()>;
}

/// Read the tags from the file at the given path, choosing the tag format by file extension.
///
/// # Errors
///
/// Returns an error if the file extension is not supported or the tags cannot be read.
pub fn read_tags_from_path(path: &Path) -> crate::Result<Vec<Box<dyn Tag>>> {
    path.extension()
        .map(std::ffi::OsStr::to_ascii_lowercase)
        .ok_or(crate::Error::UnknownFileType)
        .and_then(|extension| {
            extension
                .to_str()
                .ok_or(crate::Error::UnknownFileType)
                .map(|ext| match ext {
                    #[cfg(feature = "id3")]
                    "mp3" => id3::ID3v2Tag::read_from_path(path)
                        .map(|tag| -> Box<dyn Tag> { Box::new(tag) })
                        .map(|tag| vec![tag]),
                    #[cfg(feature = "flac")]
                    "flac" => flac::FlacTag::read_from_path(path)
                        .map(|tag| -> Box<dyn Tag> { Box::new(tag) })
                        .map(|tag| vec![tag]),
                    ext => {
                        log::debug!("Unknown file extension {ext:?}");
                        Err(crate::Error::UnknownFileType)
                    }
                })?
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_key_names_are_unique() {
        let mut names: Vec<_> = TagKey::ALL.iter().map(|key| key.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TagKey::ALL.len());
        assert_eq!(TagKey::ComposerView.to_string(), "composer view");
    }

    #[test]
    fn test_read_unknown_file_type() {
        let result = read_tags_from_path(Path::new("cover.jpg"));
        assert!(matches!(result, Err(crate::Error::UnknownFileType)));
        let result = read_tags_from_path(Path::new("README"));
        assert!(matches!(result, Err(crate::Error::UnknownFileType)));
    }
}
