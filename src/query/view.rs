//! Rendered entries as returned by the query engine.

use serde::{Deserialize, Serialize};

use crate::storage::Entry;
use crate::utils::LocaleStrings;
use crate::utils::sort_key::{BookKey, book_key};

/// One entry prepared for display. Text fields have their cross-references
/// already rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryView {
    pub name: String,
    /// Name with spaces written as `+`
    pub url_name: String,
    pub wiki_name: String,
    pub graphemes: Vec<String>,
    pub syllables: Vec<String>,
    pub morphemes: Vec<Vec<String>>,
    /// Localized part-of-speech label
    pub pos: String,
    /// Simple part of speech, or `affix` for prefixes and suffixes
    pub simple_pos: String,
    pub raw_tags: Vec<String>,
    /// Localized labels of the usage tags
    pub tags: Vec<String>,
    pub rendered_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homonym: Option<u8>,
    pub definition: String,
    /// Set when a non-English view fell back to the English definition
    pub untranslated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inflections: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antonyms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub see_also: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_notes: Option<String>,
    /// Views of the words built from this entry, one level deep
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub derived: Vec<EntryView>,
}

impl EntryView {
    pub fn book_key(&self) -> BookKey {
        let homonym = self.homonym.map(|n| n.to_string());
        book_key(&self.name, &self.simple_pos, homonym.as_deref())
    }
}

/// Sorts views into Klingon alphabetical order.
pub fn sort_for_book(views: &mut [EntryView]) {
    views.sort_by_cached_key(EntryView::book_key);
}

/// Affixes are shown with their own style whatever their part of speech.
pub fn display_pos(entry: &Entry) -> &str {
    if entry.name.starts_with('-') || entry.name.ends_with('-') || entry.name == "0" {
        "affix"
    } else {
        &entry.simple_pos
    }
}

/// Label key of the entry's part of speech. Verb subtypes are checked in
/// order: stative, transitive, possibly transitive, intransitive, possibly
/// intransitive, prefix, suffix.
pub fn pos_label_key(entry: &Entry) -> &'static str {
    match entry.simple_pos.as_str() {
        "v" => [
            ("is", "adjective"),
            ("t_c", "transitive verb"),
            ("t", "possibly transitive verb"),
            ("i_c", "intransitive verb"),
            ("i", "possibly intransitive verb"),
            ("pref", "verb prefix"),
            ("suff", "verb suffix"),
        ]
        .into_iter()
        .find(|(tag, _)| entry.has_tag(tag))
        .map_or("verb", |(_, key)| key),
        "n" if entry.has_tag("suff") => "noun suffix",
        "n" => "noun",
        "ques" => "question word",
        "adv" => "adverb",
        "conj" => "conjunction",
        "excl" => "exclamation",
        "sen" => "sentence",
        _ => "unknown",
    }
}

const TAG_LABELS: [(&str, &str); 5] = [
    ("slang", "slang"),
    ("reg", "regional"),
    ("archaic", "archaic"),
    ("hyp", "hypothetical"),
    ("extcan", "extracanonical"),
];

pub fn tag_labels(entry: &Entry, strings: &LocaleStrings) -> Vec<String> {
    TAG_LABELS
        .iter()
        .filter(|(tag, _)| entry.has_tag(tag))
        .map(|(_, key)| strings.get(key).to_string())
        .collect()
}

/// Highest homophone number among the tags 1 to 9.
pub fn homonym(entry: &Entry) -> Option<u8> {
    (1..=9u8).rev().find(|n| entry.has_tag(&n.to_string()))
}

/// How a noun inflects, when the entry says so.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inflection<'a> {
    /// Irregular plural listed in the components
    Plural(&'a str),
    /// Irregular singular listed in the components
    Singular(&'a str),
    /// Fixed plural suffixes of body parts or beings
    Suffixes(&'static str),
}

pub fn inflection(entry: &Entry) -> Option<Inflection<'_>> {
    if entry.simple_pos != "n" {
        return None;
    }
    let components = entry.components.as_deref().filter(|c| !c.is_empty());
    match components {
        Some(components) if entry.has_tag("inhps") => return Some(Inflection::Plural(components)),
        Some(components) if entry.has_tag("inhpl") => return Some(Inflection::Singular(components)),
        _ => {}
    }
    if entry.has_tag("suff") || entry.has_tag("inhpl") {
        None
    } else if entry.has_tag("body") {
        Some(Inflection::Suffixes("-Du'"))
    } else if entry.has_tag("being") {
        Some(Inflection::Suffixes("-pu', -mey"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_label_key() {
        let test_cases = [
            ("Doq", "v:is", "adjective"),
            ("legh", "v:t_c", "transitive verb"),
            ("ghoS", "v:t", "possibly transitive verb"),
            ("Qong", "v:i_c", "intransitive verb"),
            ("jatlh", "v:i", "possibly intransitive verb"),
            ("jI-", "v:pref", "verb prefix"),
            ("-pu'", "v:suff", "verb suffix"),
            ("Qap", "v", "verb"),
            ("-mey", "n:suff", "noun suffix"),
            ("Soj", "n", "noun"),
            ("nuq", "ques", "question word"),
            ("vaj", "adv", "adverb"),
            ("'ej", "conj", "conjunction"),
            ("Qapla'", "excl", "exclamation"),
            ("nuqneH", "sen", "sentence"),
            ("?", "punct", "unknown"),
        ];
        for (name, pos, expected) in test_cases {
            assert_eq!(pos_label_key(&Entry::new(name, pos)), expected, "label of {}:{}", name, pos);
        }
    }

    #[test]
    fn test_display_pos() {
        let test_cases = [
            ("-pu'", "v:suff", "affix"),
            ("jI-", "v:pref", "affix"),
            ("0", "v:pref", "affix"),
            ("Soj", "n", "n"),
        ];
        for (name, pos, expected) in test_cases {
            assert_eq!(display_pos(&Entry::new(name, pos)), expected, "pos of {}", name);
        }
    }

    #[test]
    fn test_tag_labels_and_homonym() {
        let strings = LocaleStrings::for_language("en");
        let entry = Entry::new("Soj", "n:2,slang,hyp,1");
        assert_eq!(tag_labels(&entry, &strings), vec!["slang", "hyp."]);
        assert_eq!(homonym(&entry), Some(2));
        assert_eq!(homonym(&Entry::new("Soj", "n")), None);
    }

    #[test]
    fn test_inflection() {
        let plural = Entry::new("be'nI'", "n:inhps").with_components("{be'nI'pu':n}");
        assert!(matches!(inflection(&plural), Some(Inflection::Plural("{be'nI'pu':n}"))));
        let singular = Entry::new("ghu'", "n:inhpl").with_components("{ghu':n}");
        assert!(matches!(inflection(&singular), Some(Inflection::Singular(_))));
        assert!(matches!(inflection(&Entry::new("ghoch", "n:inhpl")), None));
        assert!(matches!(inflection(&Entry::new("DuQ", "n:body")), Some(Inflection::Suffixes("-Du'"))));
        assert!(matches!(inflection(&Entry::new("puq", "n:being")), Some(Inflection::Suffixes("-pu', -mey"))));
        assert!(matches!(inflection(&Entry::new("-pu'", "n:suff,being")), None));
        assert!(matches!(inflection(&Entry::new("legh", "v:body")), None));
    }

    #[test]
    fn test_sort_for_book() {
        let view = |name: &str, homonym: Option<u8>| EntryView {
            name: name.to_string(),
            simple_pos: "n".to_string(),
            homonym,
            ..EntryView::default()
        };
        let mut views = vec![view("Soj", Some(2)), view("chab", None), view("Soj", Some(1)), view("bach", None)];
        sort_for_book(&mut views);
        let order: Vec<_> = views.iter().map(|v| (v.name.as_str(), v.homonym)).collect();
        assert_eq!(order, vec![("bach", None), ("chab", None), ("Soj", Some(1)), ("Soj", Some(2))]);
    }
}
