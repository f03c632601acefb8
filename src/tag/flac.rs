// Copyright (c) 2022 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Support for FLAC tags.

#![cfg(feature = "flac")]

use crate::tag::{Tag, TagKey, TagType, MULTI_VALUE_SEPARATOR};
use std::borrow::Cow;
use std::path::Path;

/// FLAC tag.
pub struct FlacTag {
    /// The underlying tag data.
    data: metaflac::Tag,
}

impl std::fmt::Debug for FlacTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlacTag").finish_non_exhaustive()
    }
}

impl FlacTag {
    /// Create a new, empty FLAC tag.
    #[cfg(test)]
    pub fn new() -> Self {
        FlacTag {
            data: metaflac::Tag::new(),
        }
    }

    /// Read the FLAC tag from the path
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let data = metaflac::Tag::read_from_path(path)?;
        Ok(FlacTag { data })
    }

    /// Get the vorbis key name for a tag key.
    fn tag_key_to_frame(key: TagKey) -> &'static str {
        match key {
            TagKey::TrackTitle => "TITLE",
            TagKey::Album => "ALBUM",
            TagKey::Artist => "ARTIST",
            TagKey::AlbumArtist => "ALBUMARTIST",
            TagKey::Composer => "COMPOSER",
            TagKey::ComposerView => "COMPOSER VIEW",
            TagKey::Conductor => "CONDUCTOR",
            TagKey::Orchestra => "ORCHESTRA",
            TagKey::Genre => "GENRE",
            TagKey::OriginalGenre => "ORIGGENRE",
            TagKey::Epoque => "EPOQUE",
            TagKey::TrackNumber => "TRACKNUMBER",
        }
    }
}

impl Tag for FlacTag {
    fn tag_type(&self) -> TagType {
        TagType::Flac
    }

    fn get(&self, key: TagKey) -> Option<Cow<'_, str>> {
        let values: Vec<&str> = self
            .data
            .get_vorbis(Self::tag_key_to_frame(key))?
            .filter(|value| !value.is_empty())
            .collect();
        match values.as_slice() {
            [] => None,
            [value] => Some(Cow::Borrowed(*value)),
            _ => Some(Cow::Owned(values.join(MULTI_VALUE_SEPARATOR))),
        }
    }

    fn clear(&mut self, key: TagKey) {
        self.data.remove_vorbis(Self::tag_key_to_frame(key));
    }

    fn set(&mut self, key: TagKey, value: Cow<'_, str>) {
        self.data
            .set_vorbis(Self::tag_key_to_frame(key), vec![value.into_owned()]);
    }

    fn write(&mut self, path: &Path) -> crate::Result<()> {
        log::debug!("Writing FLAC tag to {}", path.display());
        self.data.write_to_path(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paste::paste;

    macro_rules! add_test_get_and_set {
        ($tagkey:expr, $fnsuffix:ident) => {
            paste! {
                #[test]
                fn [<test_get_and_set_ $fnsuffix>]() {
                    let mut tag = FlacTag::new();
                    assert!(tag.get($tagkey).is_none());

                    tag.set($tagkey, Cow::from("Example Value"));
                    assert_eq!(tag.get($tagkey).as_deref(), Some("Example Value"));

                    tag.clear($tagkey);
                    assert!(tag.get($tagkey).is_none());
                }
            }
        };
    }

    add_test_get_and_set!(TagKey::TrackTitle, tracktitle);
    add_test_get_and_set!(TagKey::Album, album);
    add_test_get_and_set!(TagKey::Artist, artist);
    add_test_get_and_set!(TagKey::AlbumArtist, albumartist);
    add_test_get_and_set!(TagKey::Composer, composer);
    add_test_get_and_set!(TagKey::ComposerView, composerview);
    add_test_get_and_set!(TagKey::Conductor, conductor);
    add_test_get_and_set!(TagKey::Orchestra, orchestra);
    add_test_get_and_set!(TagKey::Genre, genre);
    add_test_get_and_set!(TagKey::OriginalGenre, originalgenre);
    add_test_get_and_set!(TagKey::Epoque, epoque);
    add_test_get_and_set!(TagKey::TrackNumber, tracknumber);

    #[test]
    fn test_multiple_values_are_joined() {
        let mut tag = FlacTag::new();
        tag.data.set_vorbis(
            "ALBUMARTIST",
            vec!["Berliner Philharmoniker", "Herbert von Karajan"],
        );
        assert_eq!(
            tag.get(TagKey::AlbumArtist).as_deref(),
            Some("Berliner Philharmoniker; Herbert von Karajan")
        );
        assert_eq!(tag.tag_type(), TagType::Flac);
    }

    #[test]
    fn test_set_replaces_all_values() {
        let mut tag = FlacTag::new();
        tag.data.set_vorbis("GENRE", vec!["Baroque", "Chamber"]);
        tag.set(TagKey::Genre, Cow::from("Classical"));
        assert_eq!(tag.get(TagKey::Genre).as_deref(), Some("Classical"));
    }
}
