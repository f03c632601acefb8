// Copyright (c) 2026 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Format-independent metadata of a single track.

use crate::tag::TagKey;
use std::collections::BTreeMap;
use std::fmt;

/// The tags of a single audio file, as a mutable mapping from tag key to value.
///
/// A key that is missing and a key with an empty value are both considered unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata(BTreeMap<TagKey, String>);

impl TrackMetadata {
    /// Create empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of a tag, or `None` if it is unset.
    #[must_use]
    pub fn get(&self, key: TagKey) -> Option<&str> {
        self.0
            .get(&key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Get the value of a tag, or an empty string if it is unset.
    #[must_use]
    pub fn value(&self, key: TagKey) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Returns `true` if the tag has a non-empty value.
    #[must_use]
    pub fn is_set(&self, key: TagKey) -> bool {
        self.get(key).is_some()
    }

    /// Set the value of a tag.
    pub fn set(&mut self, key: TagKey, value: impl Into<String>) {
        #[expect(unused_results)]
        self.0.insert(key, value.into());
    }

    /// Remove the value of a tag and return it.
    pub fn remove(&mut self, key: TagKey) -> Option<String> {
        self.0.remove(&key).filter(|value| !value.is_empty())
    }

    /// Builder-style variant of [`Self::set`].
    #[must_use]
    pub fn with(mut self, key: TagKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Iterate over all tags that are set, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (TagKey, &str)> {
        self.0
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (*key, value.as_str()))
    }

    /// Compute the changes that turn this metadata into the other one.
    #[must_use]
    pub fn changes_to(&self, other: &TrackMetadata) -> Vec<TagChange> {
        TagKey::ALL
            .into_iter()
            .filter_map(|key| {
                let old = self.get(key);
                let new = other.get(key);
                (old != new).then(|| TagChange {
                    key,
                    old: old.map(ToString::to_string),
                    new: new.map(ToString::to_string),
                })
            })
            .collect()
    }
}

impl FromIterator<(TagKey, String)> for TrackMetadata {
    fn from_iter<I: IntoIterator<Item = (TagKey, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A change of a single tag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChange {
    /// The tag that changed.
    pub key: TagKey,
    /// The previous value, `None` if the tag was unset.
    pub old: Option<String>,
    /// The new value, `None` if the tag is now unset.
    pub new: Option<String>,
}

impl fmt::Display for TagChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.old, &self.new) {
            (None, Some(new)) => write!(f, "{key}: + {new:?}", key = self.key),
            (Some(old), None) => write!(f, "{key}: - {old:?}", key = self.key),
            (Some(old), Some(new)) => write!(f, "{key}: {old:?} -> {new:?}", key = self.key),
            (None, None) => write!(f, "{key}: unchanged", key = self.key),
        }
    }
}
