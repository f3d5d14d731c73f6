//! The JSON lexicon dump.
//!
//! The dump is a single object:
//!
//! ```json
//! {
//!   "format_version": "1",
//!   "version": "2024.01",
//!   "locales": {"de": "Deutsch", "en": "English"},
//!   "supported_locales": ["de", "en"],
//!   "qawHaq": {
//!     "Soj:n": {
//!       "entry_name": "Soj",
//!       "part_of_speech": "n",
//!       "definition": {"en": "food", "de": "Essen"},
//!       "search_tags": {"en": ["meal"]}
//!     }
//!   }
//! }
//! ```
//!
//! Records are keyed by their search name (`name:pos[:homophone]`).

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::*;
use serde::{Deserialize, Serialize};

use crate::builder::LexiconLoader;
use crate::storage::{Entry, Lexicon, LexiconInfo, LocalizedText};
use crate::{LexiconError, Result};

/// Dump format understood by [`JsonLoader`].
pub const FORMAT_VERSION: &str = "1";

/// One record of the `qawHaq` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonRecord {
    pub entry_name: String,
    pub part_of_speech: String,
    #[serde(default, skip_serializing_if = "LocalizedText::is_empty")]
    pub definition: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antonyms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub see_also: Option<String>,
    #[serde(default, skip_serializing_if = "LocalizedText::is_empty")]
    pub notes: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<String>,
    #[serde(default, skip_serializing_if = "LocalizedText::is_empty")]
    pub examples: LocalizedText,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub search_tags: IndexMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl JsonRecord {
    pub fn into_entry(self) -> Entry {
        let mut entry = Entry::new(&self.entry_name, &self.part_of_speech);
        entry.definition = self.definition;
        entry.notes = self.notes;
        entry.examples = self.examples;
        entry.search_tags = self.search_tags;
        entry.synonyms = self.synonyms;
        entry.antonyms = self.antonyms;
        entry.see_also = self.see_also;
        entry.components = self.components;
        entry.source = self.source;
        entry.hidden_notes = self.hidden_notes;
        entry
    }

    pub fn from_entry(entry: &Entry) -> Self {
        let part_of_speech = if entry.tags.is_empty() {
            entry.simple_pos.clone()
        } else {
            let flags: Vec<&str> = entry.tags.iter().map(String::as_str).collect();
            format!("{}:{}", entry.simple_pos, flags.join(","))
        };
        JsonRecord {
            entry_name: entry.name.clone(),
            part_of_speech,
            definition: entry.definition.clone(),
            synonyms: entry.synonyms.clone(),
            antonyms: entry.antonyms.clone(),
            see_also: entry.see_also.clone(),
            notes: entry.notes.clone(),
            hidden_notes: entry.hidden_notes.clone(),
            components: entry.components.clone(),
            examples: entry.examples.clone(),
            search_tags: entry.search_tags.clone(),
            source: entry.source.clone(),
        }
    }
}

/// The whole dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonStore {
    #[serde(default = "default_format_version")]
    pub format_version: String,
    #[serde(flatten)]
    pub info: LexiconInfo,
    #[serde(rename = "qawHaq")]
    pub entries: IndexMap<String, JsonRecord>,
}

fn default_format_version() -> String {
    FORMAT_VERSION.to_string()
}

impl JsonStore {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let store: JsonStore = serde_json::from_str(json)?;
        if store.format_version != FORMAT_VERSION {
            return Err(LexiconError::invalid_data_format(format!(
                "unsupported format version {:?}",
                store.format_version
            )));
        }
        Ok(store)
    }

    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        JsonStore {
            format_version: FORMAT_VERSION.to_string(),
            info: lexicon.info().clone(),
            entries: lexicon
                .entries()
                .map(|entry| (entry.id.clone(), JsonRecord::from_entry(entry)))
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Builds the lexicon. A record whose key differs from the id computed
    /// from its name and part of speech is stored under the computed id.
    pub fn into_lexicon(self) -> Result<Lexicon> {
        let entries = self
            .entries
            .into_iter()
            .map(|(key, record)| {
                let entry = record.into_entry();
                if entry.id != key {
                    warn!("Record {} has id {}", key, entry.id);
                }
                entry
            })
            .collect();
        Lexicon::from_parts(self.info, entries)
    }
}

/// Loads a lexicon from a JSON dump file.
///
/// # Examples
///
/// ```no_run
/// use qawhaq::builder::{JsonLoader, LexiconLoader};
///
/// # fn main() -> qawhaq::Result<()> {
/// let lexicon = JsonLoader::new("qawHaq.json").load()?;
/// println!("{} entries", lexicon.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JsonLoader {
    path: PathBuf,
}

impl JsonLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonLoader {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LexiconLoader for JsonLoader {
    fn load(&mut self) -> Result<Lexicon> {
        info!("Loading JSON lexicon from {}", self.path.display());
        let json = fs::read_to_string(&self.path)?;
        JsonStore::from_json_str(&json)?.into_lexicon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"{
        "format_version": "1",
        "version": "2024.01",
        "locales": {"de": "Deutsch", "en": "English"},
        "supported_locales": ["de", "en"],
        "qawHaq": {
            "Soj:n:1": {
                "entry_name": "Soj",
                "part_of_speech": "n:1,food",
                "definition": {"en": "food", "de": "Essen"},
                "search_tags": {"en": ["meal", "dish"]},
                "source": "[1] {TKD:src}"
            },
            "Qap:v": {
                "entry_name": "Qap",
                "part_of_speech": "v:i",
                "definition": {"en": "win"}
            },
            "QapwI':n": {
                "entry_name": "QapwI'",
                "part_of_speech": "n",
                "definition": {"en": "winner"},
                "components": "{Qap:v}, {-wI':v}"
            }
        }
    }"#;

    #[test]
    fn test_load_dump() -> Result<()> {
        let lexicon = JsonStore::from_json_str(DUMP)?.into_lexicon()?;
        assert_eq!(lexicon.len(), 3);
        assert_eq!(lexicon.version(), "2024.01");
        assert_eq!(lexicon.info().supported_locales, vec!["de", "en"]);

        let soj = lexicon.entry("Soj:n:1")?;
        assert!(soj.has_tag("food"));
        assert_eq!(soj.definition.get("de"), Some("Essen"));
        assert_eq!(soj.search_tags_for("en"), ["meal", "dish"]);
        assert_eq!(soj.source.as_deref(), Some("[1] {TKD:src}"));

        let derived: Vec<_> = lexicon.derived_entries("Qap:v").map(|e| e.id.as_str()).collect();
        assert_eq!(derived, vec!["QapwI':n"]);
        assert!(lexicon.operators().get("de").is_some());
        Ok(())
    }

    #[test]
    fn test_round_trip_through_lexicon() -> Result<()> {
        let lexicon = JsonStore::from_json_str(DUMP)?.into_lexicon()?;
        let json = JsonStore::from_lexicon(&lexicon).to_json()?;
        let reloaded = JsonStore::from_json_str(&json)?.into_lexicon()?;
        let ids: Vec<_> = reloaded.entries().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["Soj:n:1", "Qap:v", "QapwI':n"]);
        assert_eq!(reloaded.entry("Soj:n:1")?, lexicon.entry("Soj:n:1")?);
        Ok(())
    }

    #[test]
    fn test_invalid_dumps() {
        let test_cases = [
            r#"{"format_version": "2", "qawHaq": {}}"#,
            r#"{"format_version": "1"}"#,
            r#"{"qawHaq": {"x:n": {"entry_name": "", "part_of_speech": "n"}}}"#,
            "[]",
        ];
        for json in test_cases {
            let result = JsonStore::from_json_str(json).and_then(JsonStore::into_lexicon);
            assert!(result.is_err(), "dump {:?} should be rejected", json);
        }
    }
}
