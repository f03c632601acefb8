// Copyright (c) 2026 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Normalization of artist names.

use unidecode::unidecode;

/// Characters that are dropped from a name during [`normalize_name`].
const IGNORED_CHARS: [char; 6] = ['-', ' ', '/', '.', '\'', ','];

/// Normalize an artist name so that different spellings of the same name map to the same key.
///
/// Accents are stripped by transliterating the name to ASCII, then punctuation and spaces are
/// removed and the result is converted to lowercase, e.g. `"Dvořák, Antonín"` becomes
/// `"dvorakantonin"`.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let mut value: String = unidecode(name)
        .chars()
        .filter(|c| !IGNORED_CHARS.contains(c))
        .collect();
    value.make_ascii_lowercase();
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_case() {
        assert_eq!(normalize_name("Berliner Philharmoniker"), "berlinerphilharmoniker");
    }

    #[test]
    fn test_normalize_accents() {
        assert_eq!(normalize_name("Dvořák, Antonín"), "dvorakantonin");
        assert_eq!(normalize_name("Saint-Saëns"), "saintsaens");
    }

    #[test]
    fn test_normalize_punctuation() {
        assert_eq!(normalize_name("J.S. Bach"), "jsbach");
        assert_eq!(normalize_name("Orchestre de l'Opéra / Paris"), "orchestredeloperaparis");
        assert_eq!(normalize_name("  "), "");
    }

    #[test]
    fn test_normalize_equivalent_spellings() {
        assert_eq!(
            normalize_name("Herbert von Karajan"),
            normalize_name("Herbert-von Karajan")
        );
        assert_eq!(normalize_name("Sergei Rachmaninoff"), "sergeirachmaninoff");
    }
}
