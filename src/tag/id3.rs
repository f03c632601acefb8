// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Support for ID3 tags.

use crate::tag::{Tag, TagKey, TagType, MULTI_VALUE_SEPARATOR};
use id3::{frame::ExtendedText, TagLike};
use std::borrow::Cow;
use std::path::Path;

/// ID3 frame ID.
#[derive(Debug, Clone, Copy)]
enum FrameId<'a> {
    /// Text frame.
    Text(&'a str),
    /// Extended Text frame (`TXXX`).
    ExtendedText(&'a str),
}

/// ID3 tag (version 2).
#[derive(Debug, Default)]
pub struct ID3v2Tag {
    /// The underlying tag data.
    data: id3::Tag,
}

impl ID3v2Tag {
    #[cfg(test)]
    pub fn with_version(version: id3::Version) -> Self {
        ID3v2Tag {
            data: id3::Tag::with_version(version),
        }
    }

    /// Read the ID3 tag from the path.
    ///
    /// Files without an ID3 tag yield an empty tag, so that it can be filled and written.
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let data = match id3::Tag::read_from_path(path.as_ref()) {
            Ok(data) => data,
            Err(id3::Error {
                kind: id3::ErrorKind::NoTag,
                ..
            }) => {
                log::debug!("No ID3 tag in {}, creating one", path.as_ref().display());
                id3::Tag::new()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(ID3v2Tag { data })
    }

    /// Get the ID3 frame for a tag key.
    fn tag_key_to_frame(key: TagKey) -> FrameId<'static> {
        match key {
            TagKey::TrackTitle => FrameId::Text("TIT2"),
            TagKey::Album => FrameId::Text("TALB"),
            TagKey::Artist => FrameId::Text("TPE1"),
            TagKey::AlbumArtist => FrameId::Text("TPE2"),
            TagKey::Composer => FrameId::Text("TCOM"),
            TagKey::ComposerView => FrameId::ExtendedText("COMPOSER VIEW"),
            TagKey::Conductor => FrameId::Text("TPE3"),
            TagKey::Orchestra => FrameId::ExtendedText("ORCHESTRA"),
            TagKey::Genre => FrameId::Text("TCON"),
            TagKey::OriginalGenre => FrameId::ExtendedText("ORIGGENRE"),
            TagKey::Epoque => FrameId::ExtendedText("EPOQUE"),
            TagKey::TrackNumber => FrameId::Text("TRCK"),
        }
    }

    /// Get the content of a text frame as string.
    fn get_frames<'a>(&'a self, frame_id: &str) -> impl Iterator<Item = &'a str> {
        self.data
            .get(frame_id)
            .and_then(|frame| frame.content().text_values())
            .into_iter()
            .flatten()
    }

    /// Get the content of an extended text frame as string.
    ///
    /// Descriptions are compared case-insensitively, since other taggers write them in lowercase.
    fn get_extended_texts<'a>(&'a self, description: &'a str) -> impl Iterator<Item = &'a str> {
        self.data
            .extended_texts()
            .filter(move |extended_text| {
                extended_text.description.eq_ignore_ascii_case(description)
            })
            .map(|extended_text| extended_text.value.as_str())
    }

    /// Remove all extended text frames with the description, regardless of its case.
    fn remove_extended_texts(&mut self, description: &str) {
        let descriptions: Vec<String> = self
            .data
            .extended_texts()
            .filter(|extended_text| {
                extended_text.description.eq_ignore_ascii_case(description)
            })
            .map(|extended_text| extended_text.description.clone())
            .collect();
        for description in descriptions {
            self.data.remove_extended_text(Some(&description), None);
        }
    }

    /// The ID3 version that is used when writing the tag.
    ///
    /// ID3v2.2 cannot be written, so these tags are upgraded to ID3v2.3.
    fn write_version(&self) -> id3::Version {
        match self.data.version() {
            id3::Version::Id3v22 | id3::Version::Id3v23 => id3::Version::Id3v23,
            id3::Version::Id3v24 => id3::Version::Id3v24,
        }
    }
}

/// Join the values of a (possibly multi-valued) frame into a single string.
fn join_values<'a>(values: impl Iterator<Item = &'a str>) -> Option<Cow<'a, str>> {
    let values: Vec<&str> = values.filter(|value| !value.is_empty()).collect();
    match values.as_slice() {
        [] => None,
        [value] => Some(Cow::Borrowed(*value)),
        _ => Some(Cow::Owned(values.join(MULTI_VALUE_SEPARATOR))),
    }
}

impl Tag for ID3v2Tag {
    fn tag_type(&self) -> TagType {
        match self.data.version() {
            id3::Version::Id3v22 => TagType::ID3v22,
            id3::Version::Id3v23 => TagType::ID3v23,
            id3::Version::Id3v24 => TagType::ID3v24,
        }
    }

    fn get(&self, key: TagKey) -> Option<Cow<'_, str>> {
        if key == TagKey::Genre {
            // Resolves ID3v1 genre references like "(32)".
            return self.data.genre_parsed().filter(|genre| !genre.is_empty());
        }

        match Self::tag_key_to_frame(key) {
            FrameId::Text(id) => join_values(self.get_frames(id)),
            FrameId::ExtendedText(description) => {
                join_values(self.get_extended_texts(description))
            }
        }
    }

    fn clear(&mut self, key: TagKey) {
        match Self::tag_key_to_frame(key) {
            #[expect(unused_results)]
            FrameId::Text(id) => {
                self.data.remove(id);
            }
            FrameId::ExtendedText(description) => self.remove_extended_texts(description),
        }
    }

    fn set(&mut self, key: TagKey, value: Cow<'_, str>) {
        match Self::tag_key_to_frame(key) {
            FrameId::Text(id) => {
                self.data.set_text(id, value);
            }
            #[expect(unused_results)]
            FrameId::ExtendedText(description) => {
                self.remove_extended_texts(description);
                self.data.add_frame(ExtendedText {
                    description: description.to_string(),
                    value: value.into_owned(),
                });
            }
        }
    }

    fn write(&mut self, path: &Path) -> crate::Result<()> {
        let version = self.write_version();
        log::debug!("Writing {version:?} tag to {}", path.display());
        self.data.write_to_path(path, version)?;
        Ok(())
    }
}
