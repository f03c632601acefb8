// Copyright (c) 2026 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Application of the classical music fixes to track metadata.

use crate::artist::{ArtistTable, Role};
use crate::config::Config;
use crate::rules::RuleSet;
use crate::tag::{TagKey, MULTI_VALUE_SEPARATOR};
use crate::track::{TagChange, TrackMetadata};
use crate::util::normalize_name;
use itertools::Itertools;
use std::borrow::Cow;

/// Genre that is assigned if none is configured.
const DEFAULT_GENRE: &str = "Classical";

/// Split a multi-valued artist tag into the individual names.
fn split_artists(value: &str) -> Vec<&str> {
    value
        .split(';')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Applies the rewrite rules and the artist reference table to track metadata.
#[derive(Debug, Clone)]
pub struct ClassicalFixer {
    /// Reference table for role assignment and name canonicalization.
    artists: ArtistTable,
    /// Rewrite rules for title and album.
    rules: RuleSet,
    /// Genre assigned to every track.
    genre: String,
    /// Keep a differing genre in the "original genre" tag.
    keep_original_genre: bool,
    /// Number the tracks of a batch sequentially.
    renumber_tracks: bool,
}

impl ClassicalFixer {
    /// Create a fixer with the built-in rules and default settings.
    #[must_use]
    pub fn new(artists: ArtistTable) -> Self {
        Self {
            artists,
            rules: RuleSet::classical(),
            genre: DEFAULT_GENRE.to_string(),
            keep_original_genre: true,
            renumber_tracks: false,
        }
    }

    /// Create a fixer from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a user-defined rule does not compile.
    pub fn from_config(config: &Config, artists: ArtistTable) -> crate::Result<Self> {
        let extra_rules = RuleSet::with_rules(
            config
                .rules
                .extra
                .iter()
                .flatten()
                .map(|rule| (rule.pattern.as_str(), rule.replacement.as_str())),
        )?;
        let fixer = Self::new(artists)
            .with_rules(RuleSet::classical().extend(extra_rules))
            .with_genre(
                config
                    .genre
                    .name
                    .as_deref()
                    .unwrap_or(DEFAULT_GENRE),
            )
            .with_keep_original_genre(config.genre.keep_original.unwrap_or(true))
            .with_renumbered_tracks(config.batch.renumber_tracks.unwrap_or(false));
        Ok(fixer)
    }

    /// Replace the rewrite rules.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Set the genre that is assigned to every track.
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    /// Enable or disable keeping a replaced genre in the "original genre" tag.
    #[must_use]
    pub fn with_keep_original_genre(mut self, keep_original_genre: bool) -> Self {
        self.keep_original_genre = keep_original_genre;
        self
    }

    /// Enable or disable sequential renumbering of the tracks in a batch.
    #[must_use]
    pub fn with_renumbered_tracks(mut self, renumber_tracks: bool) -> Self {
        self.renumber_tracks = renumber_tracks;
        self
    }

    /// The artist reference table.
    #[must_use]
    pub fn artists(&self) -> &ArtistTable {
        &self.artists
    }

    /// Apply all fixes to the metadata of a single track and return the changes.
    pub fn fix_track(&self, metadata: &mut TrackMetadata) -> Vec<TagChange> {
        let before = metadata.clone();
        self.apply(metadata);
        before.changes_to(metadata)
    }

    /// Apply all fixes to a batch of tracks (e.g., all tracks of an album) and return the changes
    /// for each track, in the same order.
    pub fn fix_batch(&self, tracks: &mut [TrackMetadata]) -> Vec<Vec<TagChange>> {
        tracks
            .iter_mut()
            .enumerate()
            .map(|(index, metadata)| {
                let before = metadata.clone();
                self.apply(metadata);
                if self.renumber_tracks {
                    metadata.set(TagKey::TrackNumber, (index + 1).to_string());
                }
                before.changes_to(metadata)
            })
            .collect()
    }

    /// Apply all fixes to the metadata, in order.
    fn apply(&self, metadata: &mut TrackMetadata) {
        self.fill_roles(metadata);
        self.canonicalize_composer(metadata);
        Self::reorder_album_artists(metadata);
        self.rewrite_titles(metadata);
        self.fix_genre(metadata);
    }

    /// Assign composer, conductor and orchestra from the track artists and album artists if these
    /// tags are not set yet. The first matching artist wins.
    fn fill_roles(&self, metadata: &mut TrackMetadata) {
        let names: Vec<String> = split_artists(metadata.value(TagKey::Artist))
            .into_iter()
            .chain(split_artists(metadata.value(TagKey::AlbumArtist)))
            .map(ToString::to_string)
            .collect();

        for name in names {
            let Some(record) = self.artists.lookup(&name) else {
                log::debug!("No artist found for {name:?}");
                continue;
            };

            let key = match record.role {
                Role::Composer => TagKey::Composer,
                Role::Conductor => TagKey::Conductor,
                Role::Orchestra => TagKey::Orchestra,
                Role::Other(_) => continue,
            };
            if metadata.is_set(key) {
                continue;
            }

            log::debug!("Assigning {key} {:?} from artist {name:?}", record.name);
            metadata.set(key, record.name.as_str());
            if key == TagKey::Composer {
                metadata.set(TagKey::ComposerView, record.sort_name_with_dates.as_str());
            }
        }
    }

    /// Replace the composer with its canonical name from the reference table and set the composer
    /// view and epoque accordingly.
    fn canonicalize_composer(&self, metadata: &mut TrackMetadata) {
        let Some(record) = metadata
            .get(TagKey::Composer)
            .and_then(|composer| self.artists.lookup(composer))
            .filter(|record| record.has_role(&Role::Composer))
        else {
            return;
        };

        metadata.set(TagKey::Composer, record.name.as_str());
        metadata.set(TagKey::ComposerView, record.sort_name_with_dates.as_str());
        if !record.epoque.is_empty() {
            metadata.set(TagKey::Epoque, record.epoque.as_str());
        }
    }

    /// If both conductor and orchestra are album artists, move them to the front of the album
    /// artist list (conductor first, then orchestra, then the others in their original order).
    fn reorder_album_artists(metadata: &mut TrackMetadata) {
        let (Some(conductor), Some(orchestra)) = (
            metadata.get(TagKey::Conductor),
            metadata.get(TagKey::Orchestra),
        ) else {
            return;
        };

        let conductor_key = normalize_name(conductor);
        let orchestra_key = normalize_name(orchestra);
        let album_artists: Vec<(&str, String)> =
            split_artists(metadata.value(TagKey::AlbumArtist))
                .into_iter()
                .map(|name| (name, normalize_name(name)))
                .collect();

        let has_conductor = album_artists.iter().any(|(_, key)| *key == conductor_key);
        let has_orchestra = album_artists.iter().any(|(_, key)| *key == orchestra_key);
        if !(has_conductor && has_orchestra) {
            return;
        }

        let value = [conductor, orchestra]
            .into_iter()
            .chain(
                album_artists
                    .iter()
                    .filter(|(_, key)| *key != conductor_key && *key != orchestra_key)
                    .map(|(name, _)| *name),
            )
            .join(MULTI_VALUE_SEPARATOR);
        log::debug!("Reordered album artists to {value:?}");
        metadata.set(TagKey::AlbumArtist, value);
    }

    /// Apply the rewrite rules to the track title and album.
    fn rewrite_titles(&self, metadata: &mut TrackMetadata) {
        for key in [TagKey::TrackTitle, TagKey::Album] {
            let rewritten = match metadata.get(key).map(|value| self.rules.apply(value)) {
                Some(Cow::Owned(rewritten)) => rewritten,
                _ => continue,
            };
            metadata.set(key, rewritten);
        }
    }

    /// Replace the genre, keeping a differing previous genre in the "original genre" tag.
    fn fix_genre(&self, metadata: &mut TrackMetadata) {
        let original = metadata
            .get(TagKey::Genre)
            .filter(|genre| *genre != self.genre)
            .map(ToString::to_string);
        if let Some(original) = original {
            if self.keep_original_genre {
                log::debug!("Keeping original genre {original:?}");
                metadata.set(TagKey::OriginalGenre, original);
            }
        }

        metadata.set(TagKey::Genre, self.genre.as_str());
    }
}
