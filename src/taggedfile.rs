// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! The [`TaggedFile`] struct represents a file that contains tags.

use crate::tag::{read_tags_from_path, Tag, TagKey};
use crate::track::{TagChange, TrackMetadata};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// A tagged file that contains zero or more tags.
pub struct TaggedFile {
    /// Path of the file.
    pub path: PathBuf,
    /// Tags that are present in the file.
    content: Vec<Box<dyn Tag>>,
}

impl fmt::Debug for TaggedFile {
    #[expect(unused_results)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let mut s = f.debug_tuple("TaggedFile");
        s.field(&self.path);
        for tag in self.tags() {
            s.field(&tag.tag_type());
        }
        s.finish()
    }
}

impl TaggedFile {
    /// Create a new tagged file with an empty path from the given tags.
    #[cfg(test)]
    #[must_use]
    pub fn new(content: Vec<Box<dyn Tag>>) -> Self {
        TaggedFile {
            path: PathBuf::new(),
            content,
        }
    }

    /// Creates a [`TaggedFile`] from the path.
    ///
    /// # Errors
    ///
    /// Returns an error in case the file at the given path does not exist or is unsupported.
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        read_tags_from_path(path.as_ref()).map(|content| Self {
            path: path.as_ref().to_path_buf(),
            content,
        })
    }

    /// Returns zero or more [`Tag`] objects.
    #[must_use]
    pub fn tags(&self) -> &[Box<dyn Tag>] {
        &self.content
    }

    /// Returns the first value for the given [`TagKey`].
    #[must_use]
    pub fn first_tag_value(&self, key: TagKey) -> Option<Cow<'_, str>> {
        self.tags().iter().find_map(|tag| tag.get(key))
    }

    /// Sets (or clears) the value for the given [`TagKey`] in all tags.
    pub fn set_tag_value(&mut self, key: TagKey, value: Option<&str>) {
        self.content
            .iter_mut()
            .for_each(|tag| tag.set_or_clear(key, value.map(Cow::from)));
    }

    /// The format-independent metadata of this file.
    #[must_use]
    pub fn metadata(&self) -> TrackMetadata {
        TagKey::ALL
            .into_iter()
            .filter_map(|key| {
                self.first_tag_value(key)
                    .map(|value| (key, value.into_owned()))
            })
            .collect()
    }

    /// Assign the changed values to the tags of this file.
    ///
    /// The tags are only modified in memory, use [`Self::write_tags`] to persist them.
    pub fn apply_changes(&mut self, changes: &[TagChange]) {
        for change in changes {
            self.set_tag_value(change.key, change.new.as_deref());
        }
    }

    /// Write tags to file.
    ///
    /// # Errors
    ///
    /// Returns an error if writing any underlying tag fails.
    pub fn write_tags(&mut self) -> crate::Result<()> {
        for tag in &mut self.content {
            tag.write(self.path.as_path())?;
        }

        Ok(())
    }
}

impl PartialEq for TaggedFile {
    fn eq(&self, other: &Self) -> bool {
        self.path.as_path().eq(other.path.as_path())
    }
}

impl Eq for TaggedFile {}

impl Ord for TaggedFile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.as_path().cmp(other.path.as_path())
    }
}

impl PartialOrd for TaggedFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "id3")]
    #[test]
    fn test_metadata_and_apply_changes_id3() {
        use crate::tag::id3::ID3v2Tag;

        let mut tagged_file = TaggedFile::new(vec![Box::new(ID3v2Tag::default())]);
        assert_eq!(tagged_file.metadata(), TrackMetadata::new());

        tagged_file.set_tag_value(TagKey::TrackTitle, Some("Cello Suite No. 1"));
        tagged_file.set_tag_value(TagKey::Genre, Some("Baroque"));
        let before = tagged_file.metadata();
        assert_eq!(before.value(TagKey::TrackTitle), "Cello Suite No. 1");

        let after = before
            .clone()
            .with(TagKey::TrackTitle, "Cello Suite #1")
            .with(TagKey::Genre, "Classical")
            .with(TagKey::OriginalGenre, "Baroque");
        tagged_file.apply_changes(&before.changes_to(&after));

        assert_eq!(tagged_file.metadata(), after);
    }

    #[cfg(feature = "flac")]
    #[test]
    fn test_metadata_and_apply_changes_flac() {
        use crate::tag::flac::FlacTag;

        let mut tagged_file = TaggedFile::new(vec![Box::new(FlacTag::new())]);
        tagged_file.set_tag_value(TagKey::Orchestra, Some("Wiener Philharmoniker"));
        tagged_file.set_tag_value(TagKey::Epoque, Some("Romantic"));

        let before = tagged_file.metadata();
        let mut after = before.clone();
        let _removed = after.remove(TagKey::Epoque);
        tagged_file.apply_changes(&before.changes_to(&after));

        assert!(tagged_file.first_tag_value(TagKey::Epoque).is_none());
        assert_eq!(
            tagged_file.first_tag_value(TagKey::Orchestra).as_deref(),
            Some("Wiener Philharmoniker")
        );
    }

    #[test]
    fn test_read_unsupported_file() {
        let result = TaggedFile::read_from_path("booklet.pdf");
        assert!(matches!(result, Err(crate::Error::UnknownFileType)));
    }
}
