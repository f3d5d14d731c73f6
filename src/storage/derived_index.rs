//! Reverse index from an entry to the words built from it.

use std::collections::HashMap;

use crate::storage::cross_ref::link_ids;
use crate::storage::entry::Entry;

/// Maps a referenced entry id to the ids of the entries whose `components`
/// field mentions it, in store order.
///
/// An id without a homophone number (`name:pos`) is also registered as
/// `name:pos:1`, so the first homophone lists words that referenced the bare
/// form. Sentence entries are never listed as derived words.
#[derive(Debug, Clone, Default)]
pub struct DerivedIndex {
    links: HashMap<String, Vec<String>>,
}

impl DerivedIndex {
    pub fn build<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut index = Self::default();
        for entry in entries {
            if entry.is_sentence() {
                continue;
            }
            let Some(components) = entry.components.as_deref() else {
                continue;
            };
            for component in link_ids(components) {
                if component.matches(':').count() == 1 {
                    index.push(format!("{}:1", component), &entry.id);
                }
                index.push(component, &entry.id);
            }
        }
        index
    }

    fn push(&mut self, component: String, derived_id: &str) {
        let derived = self.links.entry(component).or_default();
        if !derived.iter().any(|id| id == derived_id) {
            derived.push(derived_id.to_string());
        }
    }

    /// Ids of the entries derived from `id`.
    pub fn derived_ids(&self, id: &str) -> &[String] {
        self.links.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of referenced ids.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<Entry> {
        vec![
            Entry::new("Qap", "v:1"),
            Entry::new("-wI'", "v:suff"),
            Entry::new("QapwI'", "n").with_components("{Qap:v:1}, {-wI':v}"),
            Entry::new("tlhIngan", "n"),
            Entry::new("tlhIngan Hol", "n").with_components("{tlhIngan:n}, {Hol:n}"),
            Entry::new("QapwI' vIlegh", "sen:sen").with_components("{Qap:v:1}"),
        ]
    }

    #[test]
    fn test_derived_direction() {
        let entries = entries();
        let index = DerivedIndex::build(&entries);
        assert_eq!(index.derived_ids("Qap:v:1"), ["QapwI':n".to_string()]);
        assert_eq!(index.derived_ids("-wI':v"), ["QapwI':n".to_string()]);
        assert!(index.derived_ids("QapwI':n").is_empty());
    }

    #[test]
    fn test_bare_id_also_registered_as_first_homophone() {
        let entries = entries();
        let index = DerivedIndex::build(&entries);
        assert_eq!(index.derived_ids("tlhIngan:n"), ["tlhIngan Hol:n".to_string()]);
        assert_eq!(index.derived_ids("tlhIngan:n:1"), ["tlhIngan Hol:n".to_string()]);
        assert!(index.derived_ids("Qap:v:1:1").is_empty());
    }

    #[test]
    fn test_sentences_are_skipped() {
        let entries = entries();
        let index = DerivedIndex::build(&entries);
        assert!(!index.derived_ids("Qap:v:1").iter().any(|id| id.starts_with("QapwI' vIlegh")));
    }
}
