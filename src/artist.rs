// Copyright (c) 2026 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Reference table of well-known composers, conductors and orchestras.
//!
//! The table is read from a text file with one artist per line and fields separated by `|`:
//!
//! ```text
//! key|name|sort name|dates|sort name with dates|primary role|primary epoque
//! bach|Johann Sebastian Bach|Bach, Johann Sebastian|1685-1750|Bach, Johann Sebastian (1685-1750)|Composer|Baroque
//! ```

use crate::util::normalize_name;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Field separator of the reference table.
const FIELD_SEPARATOR: char = '|';

/// Number of fields that a line of the reference table has.
const FIELD_COUNT: usize = 7;

/// The primary role of an artist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// Composer.
    Composer,
    /// Conductor.
    Conductor,
    /// Orchestra (or any other ensemble that is tagged as orchestra).
    Orchestra,
    /// Some other role (e.g., "Soloist"), kept verbatim.
    Other(String),
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "composer" => Self::Composer,
            "conductor" => Self::Conductor,
            "orchestra" => Self::Orchestra,
            _ => Self::Other(value.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composer => f.write_str("Composer"),
            Self::Conductor => f.write_str("Conductor"),
            Self::Orchestra => f.write_str("Orchestra"),
            Self::Other(role) => f.write_str(role),
        }
    }
}

/// An artist from the reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistRecord {
    /// The canonical name of the artist.
    pub name: String,
    /// Sort name (e.g. "Bach, Johann Sebastian").
    pub sort_name: String,
    /// Life dates (e.g. "1685-1750").
    pub dates: String,
    /// Sort name including the life dates (e.g. "Bach, Johann Sebastian (1685-1750)").
    pub sort_name_with_dates: String,
    /// The primary role of the artist.
    pub role: Role,
    /// The primary epoque of the artist (e.g. "Baroque"), may be empty.
    pub epoque: String,
}

impl ArtistRecord {
    /// Parse a single line of the reference table.
    ///
    /// Returns the lookup key and the record, or `None` if the line does not have enough fields.
    fn parse_line(line: &str) -> Option<(String, Self)> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
        if fields.len() < FIELD_COUNT {
            return None;
        }

        let record = ArtistRecord {
            name: fields[1].to_string(),
            sort_name: fields[2].to_string(),
            dates: fields[3].to_string(),
            sort_name_with_dates: fields[4].to_string(),
            role: Role::from(fields[5]),
            epoque: fields[6].to_string(),
        };
        let key = if fields[0].is_empty() {
            normalize_name(&record.name)
        } else {
            normalize_name(fields[0])
        };

        Some((key, record))
    }

    /// Returns `true` if the artist's primary role is the given one.
    #[must_use]
    pub fn has_role(&self, role: &Role) -> bool {
        &self.role == role
    }
}

/// Lookup table of artists, keyed by their normalized name.
#[derive(Debug, Default, Clone)]
pub struct ArtistTable {
    /// Artists by normalized name.
    artists: HashMap<String, ArtistRecord>,
}

impl ArtistTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the reference table from the file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn load_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let file = File::open(path.as_ref())?;
        let table = Self::from_reader(BufReader::new(file))?;
        log::debug!(
            "Loaded {count} artists from {path}",
            count = table.len(),
            path = path.as_ref().display()
        );
        Ok(table)
    }

    /// Parse the reference table from a reader.
    ///
    /// Empty lines and lines starting with `#` are ignored. Lines that do not have enough fields
    /// are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content is not valid UTF-8.
    pub fn from_reader(reader: impl BufRead) -> crate::Result<Self> {
        let mut table = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = if index == 0 {
                line.trim_start_matches('\u{feff}')
            } else {
                line.as_str()
            };
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            match ArtistRecord::parse_line(line) {
                Some((key, record)) => table.insert(key, record),
                None => log::warn!(
                    "Skipping malformed line {number} in artist table: {line:?}",
                    number = index + 1
                ),
            }
        }

        Ok(table)
    }

    /// Insert a record under the given key, replacing any previous record with that key.
    fn insert(&mut self, key: String, record: ArtistRecord) {
        if let Some(previous) = self.artists.insert(key, record) {
            log::debug!("Replaced duplicate artist entry {:?}", previous.name);
        }
    }

    /// Look up an artist by name. The name is normalized before lookup.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ArtistRecord> {
        self.artists.get(&normalize_name(name))
    }

    /// Number of artists in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artists.len()
    }

    /// Returns `true` if the table contains no artists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    /// Iterate over all records in the table (in arbitrary order).
    pub fn iter(&self) -> impl Iterator<Item = &ArtistRecord> {
        self.artists.values()
    }
}

impl FromIterator<ArtistRecord> for ArtistTable {
    fn from_iter<I: IntoIterator<Item = ArtistRecord>>(iter: I) -> Self {
        let mut table = Self::new();
        for record in iter {
            let key = normalize_name(&record.name);
            table.insert(key, record);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const TABLE: &str = "\u{feff}# key|name|sort name|dates|sort name with dates|role|epoque
bach|Johann Sebastian Bach|Bach, Johann Sebastian|1685-1750|Bach, Johann Sebastian (1685-1750)|Composer|Baroque
karajanherbertvon | Herbert von Karajan | Karajan, Herbert von | 1908-1989 | Karajan, Herbert von (1908-1989) | conductor |

|Berliner Philharmoniker|Berliner Philharmoniker||Berliner Philharmoniker|Orchestra|
brokenline|Only|Three
mutterannesophie|Anne-Sophie Mutter|Mutter, Anne-Sophie|1963-|Mutter, Anne-Sophie (1963-)|Soloist|
";

    #[test]
    fn test_from_reader() {
        let table = ArtistTable::from_reader(Cursor::new(TABLE)).unwrap();
        assert_eq!(table.len(), 4);

        let bach = table.lookup("BACH").unwrap();
        assert_eq!(bach.name, "Johann Sebastian Bach");
        assert_eq!(bach.sort_name, "Bach, Johann Sebastian");
        assert_eq!(bach.dates, "1685-1750");
        assert_eq!(bach.sort_name_with_dates, "Bach, Johann Sebastian (1685-1750)");
        assert_eq!(bach.role, Role::Composer);
        assert_eq!(bach.epoque, "Baroque");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let table = ArtistTable::from_reader(Cursor::new(TABLE)).unwrap();
        let karajan = table.lookup("Karajan, Herbert von").unwrap();
        assert_eq!(karajan.name, "Herbert von Karajan");
        assert_eq!(karajan.role, Role::Conductor);
        assert!(karajan.epoque.is_empty());
    }

    #[test]
    fn test_empty_key_uses_name() {
        let table = ArtistTable::from_reader(Cursor::new(TABLE)).unwrap();
        let orchestra = table.lookup("Berliner Philharmoniker").unwrap();
        assert!(orchestra.has_role(&Role::Orchestra));
    }

    #[test]
    fn test_other_roles_are_kept() {
        let table = ArtistTable::from_reader(Cursor::new(TABLE)).unwrap();
        let mutter = table.lookup("Mutter, Anne-Sophie").unwrap();
        assert_eq!(mutter.role, Role::Other("Soloist".to_string()));
        assert_eq!(mutter.role.to_string(), "Soloist");
    }

    #[test]
    fn test_later_lines_override_earlier_ones() {
        let table = ArtistTable::from_reader(Cursor::new(
            "abbado|Claudio Abbado|Abbado, Claudio|||Composer|\n\
             abbado|Claudio Abbado|Abbado, Claudio|1933-2014|Abbado, Claudio (1933-2014)|Conductor|\n",
        ))
        .unwrap();
        assert_eq!(table.len(), 1);

        let abbado = table.lookup("Abbado").unwrap();
        assert_eq!(abbado.role, Role::Conductor);
        assert_eq!(abbado.dates, "1933-2014");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let table = ArtistTable::from_reader(Cursor::new(
            "solti|Georg Solti|Solti, Georg|1912-1997|Solti, Georg (1912-1997)|Conductor||Chicago|extra\n",
        ))
        .unwrap();

        let solti = table.lookup("Solti").unwrap();
        assert_eq!(solti.name, "Georg Solti");
        assert_eq!(solti.role, Role::Conductor);
        assert!(solti.epoque.is_empty());
    }

    #[test]
    fn test_lookup_is_accent_insensitive() {
        let table = ArtistTable::from_iter([ArtistRecord {
            name: "Antonín Dvořák".to_string(),
            sort_name: "Dvořák, Antonín".to_string(),
            dates: "1841-1904".to_string(),
            sort_name_with_dates: "Dvořák, Antonín (1841-1904)".to_string(),
            role: Role::Composer,
            epoque: "Romantic".to_string(),
        }]);
        assert!(table.lookup("Antonin Dvorak").is_some());
        assert!(table.lookup("antonín dvořák").is_some());
        assert!(table.lookup("Dvorak").is_none());
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();
        let table = ArtistTable::load_from_path(file.path()).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.iter().count(), 4);
    }

    #[test]
    fn test_load_from_missing_path() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let result = ArtistTable::load_from_path(tmp_dir.path().join("missing.csv"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
