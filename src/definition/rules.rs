//! Rule tables that drive definition parsing.
//!
//! The tables are plain data. [`DefinitionRules::default`] carries the built-in
//! set; a data set with its own corrections can ship a JSON file instead:
//!
//! ```
//! use qawhaq::definition::DefinitionRules;
//!
//! # fn main() -> qawhaq::Result<()> {
//! let rules = DefinitionRules::from_json_str(r#"{ "guard_prefixes": ["bird "] }"#)?;
//! assert_eq!(rules.guard_prefixes, vec!["bird "]);
//! // Tables missing from the file keep their defaults.
//! assert!(rules.sort_articles.contains(&"the".to_string()));
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// A phrase that forces an explicit sort keyword onto the part containing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKeywordOverride {
    /// Matched case-insensitively as a substring of the part.
    pub phrase: String,
    pub keyword: String,
}

/// Ordered rule lists consulted by [`parse_definition`](super::parse_definition)
/// and [`generate_ek_entries`](super::generate_ek_entries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionRules {
    /// Lower-case prefixes of definitions that are never split. First match wins.
    pub guard_prefixes: Vec<String>,
    /// Prepositions that, inside the first comma piece, announce an item list.
    pub list_prepositions: Vec<String>,
    /// Markers that make a trailing parenthetical apply to every part.
    pub global_markers: Vec<String>,
    /// Two-part definitions whose first part starts with either word are deduplicated.
    pub dedup_pairs: Vec<(String, String)>,
    /// First-part prefixes that disable the three-character dedup check.
    pub dedup_skip_prefixes: Vec<String>,
    /// Leading words dropped before taking the sort key.
    pub sort_articles: Vec<String>,
    pub sort_keyword_overrides: Vec<SortKeywordOverride>,
}

impl Default for DefinitionRules {
    fn default() -> Self {
        DefinitionRules {
            guard_prefixes: strings(&[
                // creature descriptions
                "bird ",
                "a bird ",
                "a creature ",
                "bird with ",
                "bird capable ",
                "a kind of bird",
                "sink for ",
                // interjections
                "good news,",
                "expletive,",
                "stop,",
                "uh,",
                "well,",
                // commas inside brackets
                "end (of stick,",
                "end (of rope,",
                "end (of handle,",
                // would yield redundant "have X, be X" rotations
                "have a tattoo",
                "be positively charged",
                "be negatively charged",
            ]),
            list_prepositions: strings(&[
                "for", "of", "with", "about", "including", "such as", "like",
            ]),
            global_markers: strings(&[
                "e.g.,",
                "i.e.,",
                "used in",
                "referring to",
                "for example",
                "in math",
                "in physics",
                "astronomy",
                "economics",
                "trigonometry",
                "general term",
                "verb type",
            ]),
            dedup_pairs: vec![
                ("be cooperative".to_string(), "cooperate".to_string()),
                ("die".to_string(), "dice".to_string()),
            ],
            dedup_skip_prefixes: strings(&[
                "be ", "in ", "a ", "an ", "the ", "under", "area ", "dis",
            ]),
            sort_articles: strings(&["a", "an", "the", "to"]),
            sort_keyword_overrides: vec![SortKeywordOverride {
                phrase: "travel on a mission".to_string(),
                keyword: "mission".to_string(),
            }],
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl DefinitionRules {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Returns true when `text` starts with a guard prefix (case-insensitive).
    pub fn is_guard_case(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.guard_prefixes.iter().any(|prefix| lower.starts_with(prefix.as_str()))
    }

    /// The explicit sort keyword for a part, if one of the override phrases
    /// occurs in it.
    pub fn sort_keyword_for(&self, part: &str) -> Option<&str> {
        let lower = part.to_lowercase();
        self.sort_keyword_overrides
            .iter()
            .find(|rule| lower.contains(&rule.phrase.to_lowercase()))
            .map(|rule| rule.keyword.as_str())
    }

    pub fn has_global_marker(&self, parenthetical: &str) -> bool {
        let lower = parenthetical.to_lowercase();
        self.global_markers.iter().any(|marker| lower.contains(marker.as_str()))
    }

    pub fn is_sort_article(&self, word: &str) -> bool {
        self.sort_articles.iter().any(|article| article.eq_ignore_ascii_case(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_prefixes() {
        let rules = DefinitionRules::default();
        let test_cases = [
            ("bird capable of mimicking speech", true),
            ("Bird with a long neck, red feathers", true),
            ("expletive, epithet", true),
            ("birdsong", false),
            ("flap, flutter, wave", false),
        ];
        for (text, expected) in test_cases {
            assert_eq!(rules.is_guard_case(text), expected, "guard case for {:?}", text);
        }
    }

    #[test]
    fn test_sort_keyword_override() {
        let rules = DefinitionRules::default();
        assert_eq!(rules.sort_keyword_for("Travel on a mission"), Some("mission"));
        assert_eq!(rules.sort_keyword_for("travel with a purpose"), None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() -> Result<()> {
        let rules = DefinitionRules::from_json_str(
            r#"{ "dedup_pairs": [["sing", "song"]], "sort_keyword_overrides": [] }"#,
        )?;
        assert_eq!(rules.dedup_pairs, vec![("sing".to_string(), "song".to_string())]);
        assert!(rules.sort_keyword_overrides.is_empty());
        assert_eq!(rules.global_markers, DefinitionRules::default().global_markers);
        Ok(())
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(DefinitionRules::from_json_str("{ not json").is_err());
    }
}
