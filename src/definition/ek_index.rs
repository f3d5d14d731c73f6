//! English→Klingon reverse index.
//!
//! Every multi-part definition is expanded into one rotation per part, so
//! "flap, flutter, wave" can be found under *flap*, *flutter* and *wave*.

use std::collections::{BTreeMap, HashSet};

use lazy_static::lazy_static;
use log::*;
use regex::Regex;
use serde::Serialize;

use crate::Result;
use crate::definition::parser::{BE_VERB_SUBTYPE, DefinitionPart, ParsedDefinition, parse_definition_with};
use crate::definition::rules::DefinitionRules;
use crate::storage::Lexicon;

lazy_static! {
    static ref PARENTHETICAL: Regex = Regex::new(r"\s*\([^)]*\)\s*").unwrap();
}

/// Version written into the JSON output.
pub const FORMAT_VERSION: &str = "1";

/// Sort key of a definition fragment: the first significant word, lower case.
///
/// Parentheticals are ignored, be-verbs lose their leading `be `, and leading
/// articles from `rules` are skipped.
///
/// # Examples
///
/// ```
/// use qawhaq::definition::{DefinitionRules, sort_key};
///
/// let rules = DefinitionRules::default();
/// assert_eq!(sort_key("to (try to) Flee", false, &rules), "flee");
/// assert_eq!(sort_key("be hostile", true, &rules), "hostile");
/// ```
pub fn sort_key(text: &str, is_be_verb: bool, rules: &DefinitionRules) -> String {
    let text = text.trim();
    let stripped = PARENTHETICAL.replace_all(text, " ");
    let stripped = if is_be_verb { strip_be(&stripped) } else { stripped.trim() };
    stripped
        .split_whitespace()
        .find(|word| !rules.is_sort_article(word))
        .map(str::to_lowercase)
        .unwrap_or_else(|| text.to_lowercase())
}

fn part_sort_key(part: &DefinitionPart, is_be_verb: bool, rules: &DefinitionRules) -> String {
    match &part.sort_keyword {
        Some(keyword) => keyword.to_lowercase(),
        None => sort_key(&part.text, is_be_verb, rules),
    }
}

fn strip_be(text: &str) -> &str {
    let text = text.trim();
    match text.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("be ") => &text[3..],
        _ => text,
    }
}

/// Expands a parsed definition into `(sort_key, display)` pairs with the
/// built-in rule tables.
///
/// # Examples
///
/// ```
/// use qawhaq::definition::{generate_ek_entries, parse_definition};
///
/// let entries = generate_ek_entries(&parse_definition("flap, flutter, wave", None), false);
/// assert_eq!(entries[1], ("flutter".to_string(), "flutter, flap, wave".to_string()));
/// ```
pub fn generate_ek_entries(parsed: &ParsedDefinition, is_be_verb: bool) -> Vec<(String, String)> {
    generate_ek_entries_with(parsed, is_be_verb, &DefinitionRules::default())
}

pub fn generate_ek_entries_with(
    parsed: &ParsedDefinition,
    is_be_verb: bool,
    rules: &DefinitionRules,
) -> Vec<(String, String)> {
    if parsed.parts.is_empty() {
        return Vec::new();
    }
    if parsed.no_permute {
        return vec![(sort_key(&parsed.raw_text, is_be_verb, rules), parsed.raw_text.clone())];
    }
    if let [part] = parsed.parts.as_slice() {
        return vec![(part_sort_key(part, is_be_verb, rules), parsed.raw_text.clone())];
    }

    let mut entries = Vec::with_capacity(parsed.parts.len());
    let mut seen = HashSet::new();
    for (i, part) in parsed.parts.iter().enumerate() {
        let key = part_sort_key(part, is_be_verb, rules);
        if !seen.insert(key.clone()) {
            continue;
        }

        let mut display_parts: Vec<&str> = Vec::with_capacity(parsed.parts.len() + 1);
        if is_be_verb {
            display_parts.push(strip_be(&part.text));
        }
        display_parts.push(&part.text);
        display_parts.extend(
            parsed
                .parts
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, other)| other.text.as_str()),
        );
        let mut display = display_parts.join(", ");
        if let Some(global) = &parsed.global_parenthetical {
            display.push_str(&format!(" ({})", global));
        }
        entries.push((key, display));

        if parsed.dedup {
            break;
        }
    }
    entries
}

/// One line of the reverse index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EkEntry {
    #[serde(skip)]
    pub sort_key: String,
    pub display: String,
    pub klingon: String,
    pub pos: String,
    /// Id of the Klingon entry.
    pub slug: String,
}

#[derive(Serialize)]
struct EkIndexJson<'a> {
    format_version: &'a str,
    entry_count: usize,
    entries: BTreeMap<&'a str, Vec<&'a EkEntry>>,
}

/// The reverse index over a whole lexicon, in store order.
#[derive(Debug, Clone, Default)]
pub struct EkIndex {
    entries: Vec<EkEntry>,
}

impl EkIndex {
    /// Parses the English definition of every entry. Empty definitions and
    /// definitions that are only a cross-reference are skipped.
    pub fn build(lexicon: &Lexicon, rules: &DefinitionRules) -> Self {
        let mut entries = Vec::new();
        let mut multi_part = 0;
        let mut guarded = 0;
        let mut deduped = 0;
        for entry in lexicon.entries() {
            let definition = entry.definition.english();
            if definition.is_empty() || definition.starts_with('{') {
                continue;
            }
            let is_be_verb = entry.is_be_verb();
            let subtype = if is_be_verb { Some(BE_VERB_SUBTYPE) } else { None };
            let parsed = parse_definition_with(definition, subtype, rules);
            if parsed.parts.len() > 1 {
                multi_part += 1;
            }
            if parsed.no_permute {
                guarded += 1;
            }
            if parsed.dedup {
                deduped += 1;
            }
            for (sort_key, display) in generate_ek_entries_with(&parsed, is_be_verb, rules) {
                entries.push(EkEntry {
                    sort_key,
                    display,
                    klingon: entry.name.clone(),
                    pos: entry.simple_pos.clone(),
                    slug: entry.id.clone(),
                });
            }
        }
        info!(
            "Reverse index: {} lookups ({} multi-part, {} guarded, {} deduplicated definitions)",
            entries.len(),
            multi_part,
            guarded,
            deduped
        );
        EkIndex { entries }
    }

    pub fn entries(&self) -> &[EkEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries grouped by sort key; keys in sorted order, entries in store order.
    pub fn group_by_sort_key(&self) -> BTreeMap<&str, Vec<&EkEntry>> {
        let mut groups: BTreeMap<&str, Vec<&EkEntry>> = BTreeMap::new();
        for entry in &self.entries {
            groups.entry(entry.sort_key.as_str()).or_default().push(entry);
        }
        groups
    }

    /// Serializes the grouped index as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        let output = EkIndexJson {
            format_version: FORMAT_VERSION,
            entry_count: self.entries.len(),
            entries: self.group_by_sort_key(),
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }
}
