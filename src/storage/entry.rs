//! Lexicon entries and their localized text fields.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Marker left in a localized field by machine translation.
pub const AUTOTRANSLATED_MARKER: &str = "AUTOTRANSLATED";
/// Placeholder for a field that still needs a translation.
pub const TRANSLATE_MARKER: &str = "TRANSLATE";

/// Locale used as the fallback for every localized field.
pub const ENGLISH: &str = "en";

/// Per-locale text of one entry field, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(IndexMap<String, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<L: Into<String>, T: Into<String>>(&mut self, locale: L, text: T) {
        self.0.insert(locale.into(), text.into());
    }

    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0.get(locale).map(String::as_str)
    }

    /// The English text, or an empty string.
    pub fn english(&self) -> &str {
        self.get(ENGLISH).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|text| text.is_empty())
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns true when `locale` has its own usable text.
    pub fn is_translated(&self, locale: &str) -> bool {
        match self.get(locale) {
            None | Some("") => false,
            Some(text) => !text.contains(AUTOTRANSLATED_MARKER) && text != TRANSLATE_MARKER,
        }
    }

    /// Returns the text for `locale`, falling back to English when the locale
    /// is missing, empty, machine translated, or still marked for translation.
    ///
    /// # Examples
    ///
    /// ```
    /// use qawhaq::storage::LocalizedText;
    ///
    /// let mut text = LocalizedText::new();
    /// text.insert("en", "warrior");
    /// text.insert("de", "TRANSLATE");
    /// assert_eq!(text.get_unless_translated("de"), "warrior");
    /// assert_eq!(text.get_unless_translated("fi"), "warrior");
    /// ```
    pub fn get_unless_translated(&self, locale: &str) -> &str {
        if self.is_translated(locale) {
            self.get(locale).unwrap_or("")
        } else {
            self.english()
        }
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(l, t)| (l.into(), t.into())).collect())
    }
}

/// Identifier of an entry: `name:pos` or `name:pos:homophone`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId {
    pub name: String,
    pub pos: String,
    pub homophone: Option<String>,
}

impl EntryId {
    /// Builds the id from an entry name and a full part-of-speech field such as
    /// `v:t_c,2h`. Only the first flag that is a number (with an optional
    /// hidden-homophone `h`) becomes the homophone.
    pub fn from_part_of_speech(name: &str, part_of_speech: &str) -> Self {
        let (pos, flags) = match part_of_speech.split_once(':') {
            Some((pos, flags)) => (pos, flags),
            None => (part_of_speech, ""),
        };
        let homophone = flags
            .split(',')
            .map(|flag| flag.trim_end_matches('h'))
            .find(|flag| !flag.is_empty() && flag.chars().all(|c| c.is_ascii_digit()))
            .map(str::to_string);
        Self {
            name: name.to_string(),
            pos: pos.to_string(),
            homophone,
        }
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.pos)?;
        if let Some(homophone) = &self.homophone {
            write!(f, ":{}", homophone)?;
        }
        Ok(())
    }
}

/// One lexicon record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub simple_pos: String,
    pub tags: BTreeSet<String>,
    pub definition: LocalizedText,
    pub notes: LocalizedText,
    pub examples: LocalizedText,
    pub search_tags: IndexMap<String, Vec<String>>,
    pub synonyms: Option<String>,
    pub antonyms: Option<String>,
    pub see_also: Option<String>,
    pub components: Option<String>,
    pub source: Option<String>,
    pub hidden_notes: Option<String>,
}

impl Entry {
    /// Creates an entry from its name and a part-of-speech field
    /// (`pos[:flag,flag,...]`). The flags become the entry's tags.
    ///
    /// # Examples
    ///
    /// ```
    /// use qawhaq::storage::Entry;
    ///
    /// let entry = Entry::new("Soj", "n:1,slang");
    /// assert_eq!(entry.id, "Soj:n:1");
    /// assert_eq!(entry.simple_pos, "n");
    /// assert!(entry.has_tag("slang"));
    /// ```
    pub fn new(name: &str, part_of_speech: &str) -> Self {
        let id = EntryId::from_part_of_speech(name, part_of_speech);
        let tags = part_of_speech
            .split_once(':')
            .map(|(_, flags)| {
                flags
                    .split(',')
                    .map(str::trim)
                    .filter(|flag| !flag.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            id: id.to_string(),
            name: name.to_string(),
            simple_pos: id.pos,
            tags,
            ..Self::default()
        }
    }

    pub fn with_definition(mut self, locale: &str, text: &str) -> Self {
        self.definition.insert(locale, text);
        self
    }

    pub fn with_notes(mut self, locale: &str, text: &str) -> Self {
        self.notes.insert(locale, text);
        self
    }

    pub fn with_examples(mut self, locale: &str, text: &str) -> Self {
        self.examples.insert(locale, text);
        self
    }

    pub fn with_search_tags(mut self, locale: &str, tags: &[&str]) -> Self {
        self.search_tags
            .insert(locale.to_string(), tags.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn with_components(mut self, components: &str) -> Self {
        self.components = Some(components.to_string());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Stative ("be") verbs carry the `is` tag.
    pub fn is_be_verb(&self) -> bool {
        self.simple_pos == "v" && self.has_tag("is")
    }

    pub fn is_sentence(&self) -> bool {
        self.has_tag("sen") || self.simple_pos == "sen"
    }

    /// Search tags for `locale`, or an empty slice.
    pub fn search_tags_for(&self, locale: &str) -> &[String] {
        self.search_tags.get(locale).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every free-text field that may contain cross-reference tokens.
    pub fn text_fields(&self) -> impl Iterator<Item = &str> {
        let plain = [
            &self.synonyms,
            &self.antonyms,
            &self.see_also,
            &self.components,
            &self.source,
            &self.hidden_notes,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref());
        let localized = [&self.definition, &self.notes, &self.examples]
            .into_iter()
            .flat_map(|text| text.0.values().map(String::as_str));
        plain.chain(localized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_from_part_of_speech() {
        let test_cases = [
            ("Soj", "n", "Soj:n"),
            ("Soj", "n:1", "Soj:n:1"),
            ("ghoS", "v:t_c,2", "ghoS:v:2"),
            ("ghoS", "v:2h,t_c", "ghoS:v:2"),
            ("-pu'", "n:suff", "-pu':n"),
            ("Qapla'", "excl", "Qapla':excl"),
        ];
        for (name, pos, expected) in test_cases {
            assert_eq!(EntryId::from_part_of_speech(name, pos).to_string(), expected);
        }
    }

    #[test]
    fn test_entry_tags_are_a_set() {
        let a = Entry::new("tlhIngan", "n:being,slang");
        let b = Entry::new("tlhIngan", "n:slang,being");
        assert_eq!(a.tags, b.tags);
        assert!(a.has_tag("being"));
        assert!(!a.has_tag("body"));
    }

    #[test]
    fn test_get_unless_translated() {
        let text: LocalizedText = [
            ("en", "warrior"),
            ("de", "Krieger"),
            ("fi", "soturi AUTOTRANSLATED"),
            ("ru", ""),
            ("sv", "TRANSLATE"),
        ]
        .into_iter()
        .collect();
        let test_cases = [
            ("en", "warrior"),
            ("de", "Krieger"),
            ("fi", "warrior"),
            ("ru", "warrior"),
            ("sv", "warrior"),
            ("zh_HK", "warrior"),
        ];
        for (locale, expected) in test_cases {
            assert_eq!(text.get_unless_translated(locale), expected, "locale {}", locale);
            assert_eq!(text.get_unless_translated(locale), expected, "repeated lookup for {}", locale);
        }
    }

    #[test]
    fn test_missing_english_renders_empty() {
        let text = LocalizedText::new();
        assert_eq!(text.get_unless_translated("de"), "");
        assert!(text.is_empty());
    }

    #[test]
    fn test_be_verb_detection() {
        assert!(Entry::new("Qup", "v:is").is_be_verb());
        assert!(!Entry::new("ghoS", "v:t_c").is_be_verb());
    }
}
