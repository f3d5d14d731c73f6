//! The in-memory lexicon store.

use indexmap::IndexMap;
use log::*;
use serde::{Deserialize, Serialize};

use crate::query::operators::OperatorTable;
use crate::storage::derived_index::DerivedIndex;
use crate::storage::entry::{ENGLISH, Entry};
use crate::{LexiconError, Result};

/// Metadata that accompanies a lexicon dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexiconInfo {
    /// Version of the database.
    #[serde(default)]
    pub version: String,
    /// Locale code → localized locale name.
    #[serde(default)]
    pub locales: IndexMap<String, String>,
    /// Locales complete enough to be offered by default.
    #[serde(default)]
    pub supported_locales: Vec<String>,
}

/// All entries, keyed by id in load order, plus the state derived from them
/// once at construction: the derived-word index and the query operator table.
///
/// A `Lexicon` is never mutated after it is built.
///
/// # Examples
///
/// ```
/// use qawhaq::storage::{Entry, Lexicon};
///
/// # fn main() -> qawhaq::Result<()> {
/// let lexicon = Lexicon::new(vec![
///     Entry::new("Qap", "v").with_definition("en", "win"),
///     Entry::new("QapwI'", "n").with_definition("en", "winner").with_components("{Qap:v}, {-wI':v}"),
/// ])?;
/// assert_eq!(lexicon.len(), 2);
/// let derived: Vec<_> = lexicon.derived_entries("Qap:v").map(|e| e.name.as_str()).collect();
/// assert_eq!(derived, vec!["QapwI'"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Lexicon {
    info: LexiconInfo,
    entries: IndexMap<String, Entry>,
    derived: DerivedIndex,
    operators: OperatorTable,
}

impl Lexicon {
    /// Builds a lexicon from entries alone; the locales are taken from the
    /// entries' definitions.
    pub fn new(entries: Vec<Entry>) -> Result<Self> {
        Self::from_parts(LexiconInfo::default(), entries)
    }

    /// Builds a lexicon from metadata and entries.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::DuplicateEntry`] if two entries share an id and
    /// [`LexiconError::InvalidParameter`] for an entry with an empty name.
    pub fn from_parts(mut info: LexiconInfo, entries: Vec<Entry>) -> Result<Self> {
        let mut map = IndexMap::with_capacity(entries.len());
        for entry in entries {
            if entry.name.is_empty() {
                return Err(LexiconError::invalid_parameter(format!(
                    "entry {:?} has no name",
                    entry.id
                )));
            }
            if map.contains_key(&entry.id) {
                return Err(LexiconError::duplicate_entry(entry.id));
            }
            map.insert(entry.id.clone(), entry);
        }

        if info.locales.is_empty() {
            info.locales.insert(ENGLISH.to_string(), String::new());
            for entry in map.values() {
                for locale in entry.definition.locales() {
                    if !info.locales.contains_key(locale) {
                        info.locales.insert(locale.to_string(), String::new());
                    }
                }
            }
        }

        let derived = DerivedIndex::build(map.values());
        let operators = OperatorTable::with_locales(info.locales.keys());
        info!(
            "Lexicon built: {} entries, {} referenced components, {} locales",
            map.len(),
            derived.len(),
            info.locales.len()
        );
        Ok(Self {
            info,
            entries: map,
            derived,
            operators,
        })
    }

    pub fn info(&self) -> &LexiconInfo {
        &self.info
    }

    pub fn version(&self) -> &str {
        &self.info.version
    }

    /// Locale codes present in the lexicon.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.info.locales.keys().map(String::as_str)
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    /// Like [`Lexicon::get`], but returns an error for an unknown id.
    pub fn entry(&self, id: &str) -> Result<&Entry> {
        self.get(id).ok_or_else(|| LexiconError::entry_not_found(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Entries in load order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn derived_index(&self) -> &DerivedIndex {
        &self.derived
    }

    /// Entries whose components reference `id`.
    pub fn derived_entries<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.derived
            .derived_ids(id)
            .iter()
            .filter_map(move |derived_id| self.entries.get(derived_id))
    }

    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let result = Lexicon::new(vec![Entry::new("Soj", "n"), Entry::new("Soj", "n:slang")]);
        assert!(matches!(result, Err(LexiconError::DuplicateEntry { .. })));
    }

    #[test]
    fn test_locales_inferred_from_definitions() -> Result<()> {
        let lexicon = Lexicon::new(vec![
            Entry::new("Soj", "n")
                .with_definition("en", "food")
                .with_definition("de", "Essen"),
        ])?;
        assert_eq!(lexicon.locales().collect::<Vec<_>>(), vec!["en", "de"]);
        assert!(lexicon.operators().get("de").is_some());
        assert!(lexicon.operators().get("denotes").is_some());
        Ok(())
    }

    #[test]
    fn test_entry_lookup() -> Result<()> {
        let lexicon = Lexicon::new(vec![Entry::new("Soj", "n:1")])?;
        assert!(lexicon.contains("Soj:n:1"));
        assert_eq!(lexicon.entry("Soj:n:1")?.name, "Soj");
        assert!(lexicon.entry("Soj:n").unwrap_err().is_entry_not_found());
        Ok(())
    }
}
