// Copyright (c) 2026 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Regular expression rewrites for track titles and album names.

use regex::Regex;
use std::borrow::Cow;

/// Built-in rewrite rules as `(pattern, replacement)` pairs, in the order they are applied.
const CLASSICAL_RULES: [(&str, &str); 16] = [
    // "Number 5", "No. 5", "Nr 5", "Nbr. 5" -> "#5"
    (r"\b[Nn][Uu][Mm][Bb][Ee][Rr][ ]*([0-9])", "#${1}"),
    (r"\b[Nn][Oo][.][ ]*([0-9])", "#${1}"),
    (r"\b[Nn][Rr][.]?[ ]*([0-9])", "#${1}"),
    (r"\b[Nn][Bb][Rr][.]?\s([0-9])", "#${1}"),
    (r"\b[Oo][Pp][Uu][Ss][ ]*([0-9])", "Op. ${1}"),
    (r"\b[Ss][Yy][Mm][ |.][ ]*([0-9])", "Symphony ${1}"),
    (
        r"\b[Ss][Yy][Mm][Pp][Hh][Oo][Nn][Ii][Ee][ ]*[#]?([0-9])",
        "Symphony #${1}",
    ),
    // Keys
    (r"\b[Mm][Ii][Nn][.]", "min."),
    (r"\b[Mm][Aa][Jj][.]", "Maj."),
    (r"\b[Mm][Ii][Nn][Ee][Uu][Rr]\b", "min."),
    (r"\b[Mm][Aa][Jj][Ee][Uu][Rr]\b", "Maj."),
    // Catalogues
    (r"\b[Bb][. ]*[Ww][. ]*[Vv][. #]*([0-9])", "BWV ${1}"),
    (r"\b[Hh][ .]?[Oo][. ]?[Bb][ .]?([XxVvIi]*[Aa]?)", "Hob. ${1}"),
    (r"\b[Kk][ .]*([0-9])", "K. ${1}"),
    (r"\b[Aa][Nn][Hh][ .]*([0-9])", "Anh. ${1}"),
    // Collapse whitespace that the rules above may leave behind.
    (r"\s{2,}", " "),
];

/// A single rewrite rule.
#[derive(Debug, Clone)]
pub struct RegexRule {
    /// The compiled pattern.
    pattern: Regex,
    /// The replacement string (may reference capture groups).
    replacement: String,
}

impl RegexRule {
    /// Compile a new rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid regular expression.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> crate::Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| crate::Error::InvalidRule {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: regex,
            replacement: replacement.into(),
        })
    }

    /// The pattern of this rule.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The replacement of this rule.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Replace all matches of the pattern in the text.
    #[must_use]
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(text, self.replacement.as_str())
    }
}

/// An ordered list of rewrite rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet(Vec<RegexRule>);

impl RuleSet {
    /// The built-in rules for classical music.
    ///
    /// # Panics
    ///
    /// Panics if one of the built-in patterns does not compile, which constitutes a programming
    /// error.
    #[must_use]
    pub fn classical() -> Self {
        Self(
            CLASSICAL_RULES
                .iter()
                .map(|(pattern, replacement)| {
                    RegexRule::new(pattern, *replacement).expect("built-in rule must compile")
                })
                .collect(),
        )
    }

    /// Compile a rule set from `(pattern, replacement)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error for the first pattern that is not a valid regular expression.
    pub fn with_rules<I, P, R>(rules: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: Into<String>,
    {
        rules
            .into_iter()
            .map(|(pattern, replacement)| RegexRule::new(pattern.as_ref(), replacement))
            .collect::<crate::Result<Vec<_>>>()
            .map(Self)
    }

    /// Append the rules of another set after the rules of this one.
    #[must_use]
    pub fn extend(mut self, other: RuleSet) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the rules in application order.
    pub fn iter(&self) -> impl Iterator<Item = &RegexRule> {
        self.0.iter()
    }

    /// Apply all rules to the text, in order.
    ///
    /// The input is borrowed if no rule changes it.
    #[must_use]
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut value = Cow::Borrowed(text);
        for rule in &self.0 {
            let rewritten = match rule.apply(&value) {
                Cow::Borrowed(_) => None,
                Cow::Owned(rewritten) => Some(rewritten),
            };

            if let Some(rewritten) = rewritten.filter(|rewritten| rewritten.as_str() != &*value) {
                log::debug!("Rule {:?} rewrote {value:?} to {rewritten:?}", rule.pattern());
                value = Cow::Owned(rewritten);
            }
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! add_rewrite_test {
        ($name:ident, $input:expr, $expected:expr) => {
            #[test]
            fn $name() {
                let rules = RuleSet::classical();
                assert_eq!(rules.apply($input), $expected);
            }
        };
    }

    add_rewrite_test!(test_number, "Piano Sonata Number 14", "Piano Sonata #14");
    add_rewrite_test!(test_no, "Piano Concerto No. 2", "Piano Concerto #2");
    add_rewrite_test!(test_no_without_space, "Nocturne no.20", "Nocturne #20");
    add_rewrite_test!(test_nr, "Sinfonie Nr. 9", "Sinfonie #9");
    add_rewrite_test!(test_nr_without_dot, "Ungarischer Tanz Nr 5", "Ungarischer Tanz #5");
    add_rewrite_test!(test_nbr, "Etude Nbr. 3", "Etude #3");
    add_rewrite_test!(test_opus, "Sonata, Opus 27", "Sonata, Op. 27");
    add_rewrite_test!(test_sym, "Sym. 5 in C min.", "Symphony 5 in C min.");
    add_rewrite_test!(test_symphonie, "Symphonie #3", "Symphony #3");
    add_rewrite_test!(test_symphonie_without_hash, "symphonie 7", "Symphony #7");
    add_rewrite_test!(test_mineur, "Concerto en la mineur", "Concerto en la min.");
    add_rewrite_test!(test_majeur, "Quatuor en ré majeur", "Quatuor en ré Maj.");
    add_rewrite_test!(test_maj, "Trio in B flat MAJ.", "Trio in B flat Maj.");
    add_rewrite_test!(test_bwv, "Toccata and Fugue, bwv565", "Toccata and Fugue, BWV 565");
    add_rewrite_test!(test_bwv_dotted, "Cantata B.W.V. 140", "Cantata BWV 140");
    add_rewrite_test!(test_hob, "Symphony Hob.I:104", "Symphony Hob. I:104");
    add_rewrite_test!(test_hob_spaced, "Trumpet Concerto Hob. VIIe:1", "Trumpet Concerto Hob. VIIe:1");
    add_rewrite_test!(test_koechel, "Eine kleine Nachtmusik, K525", "Eine kleine Nachtmusik, K. 525");
    add_rewrite_test!(test_anh, "Minuet, anh.114", "Minuet, Anh. 114");
    add_rewrite_test!(test_whitespace, "Adagio   molto", "Adagio molto");
    add_rewrite_test!(
        test_combined,
        "Symphony No. 9 in D minor, Opus 125",
        "Symphony #9 in D minor, Op. 125"
    );

    #[test]
    fn test_unchanged_is_borrowed() {
        let rules = RuleSet::classical();
        assert!(matches!(rules.apply("Goldberg Variations"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_classical_is_stable() {
        let rules = RuleSet::classical();
        let once = rules.apply("Piano Concerto No. 21 in C Maj., K. 467").into_owned();
        assert_eq!(once, "Piano Concerto #21 in C Maj., K. 467");
        assert_eq!(rules.apply(&once), once);
    }

    #[test]
    fn test_with_rules_and_extend() {
        let extra = RuleSet::with_rules([(r"\bWoO\s*([0-9])", "WoO ${1}")]).unwrap();
        let rules = RuleSet::classical().extend(extra);
        assert_eq!(rules.len(), CLASSICAL_RULES.len() + 1);
        assert_eq!(rules.apply("Für Elise, WoO59"), "Für Elise, WoO 59");
        assert_eq!(rules.iter().last().unwrap().replacement(), "WoO ${1}");
    }

    #[test]
    fn test_invalid_rule() {
        let result = RuleSet::with_rules([("([0-9]", "$1")]);
        assert!(matches!(
            result,
            Err(crate::Error::InvalidRule { ref pattern, .. }) if pattern == "([0-9]"
        ));
        assert!(RuleSet::default().is_empty());
    }
}
