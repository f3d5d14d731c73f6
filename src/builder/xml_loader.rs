//! The XML database fragments.
//!
//! The source database is split into `mem-NN-<section>.xml` files which,
//! concatenated in name order, form one document. Every entry is a
//! `<table name="mem">` whose `<column name="...">` children hold the
//! fields. A localized column carries the locale as a suffix, as in
//! `definition_de` or `notes_zh_HK`; the bare column is English.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use lazy_static::lazy_static;
use log::*;
use quick_xml::events::Event;
use regex::Regex;

use crate::builder::LexiconLoader;
use crate::storage::{ENGLISH, Entry, Lexicon, LexiconInfo};
use crate::{LexiconError, Result};

lazy_static! {
    static ref SEARCH_TAG_SEPARATOR: Regex = Regex::new(", *").unwrap();
}

const LOCALIZED_COLUMNS: [&str; 4] = ["definition", "notes", "examples", "search_tags"];

/// Fragments that hold no entries.
const SKIPPED_FRAGMENTS: [&str; 2] = ["header", "footer"];

/// Splits a localized column name into field and locale.
fn localized_column(column: &str) -> Option<(&str, &str)> {
    LOCALIZED_COLUMNS.iter().find_map(|&field| {
        let rest = column.strip_prefix(field)?;
        if rest.is_empty() {
            Some((field, ENGLISH))
        } else {
            rest.strip_prefix('_').filter(|locale| !locale.is_empty()).map(|locale| (field, locale))
        }
    })
}

fn predefined_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

fn unescape(text: &str) -> Result<String> {
    quick_xml::escape::unescape(text)
        .map(|text| text.into_owned())
        .map_err(|e| LexiconError::invalid_data_format(format!("Invalid XML text {:?}: {}", text, e)))
}

/// Builds an entry from the columns of one table. Tables without an
/// `entry_name` column are not entries.
pub fn entry_from_columns(columns: &IndexMap<String, String>) -> Option<Entry> {
    let name = columns.get("entry_name")?;
    let part_of_speech = columns.get("part_of_speech").map(String::as_str).unwrap_or("");
    let mut entry = Entry::new(name, part_of_speech);
    for (column, value) in columns {
        if value.is_empty() {
            continue;
        }
        if let Some((field, locale)) = localized_column(column) {
            match field {
                "definition" => entry.definition.insert(locale, value.as_str()),
                "notes" => entry.notes.insert(locale, value.as_str()),
                "examples" => entry.examples.insert(locale, value.as_str()),
                _ => {
                    let tags = SEARCH_TAG_SEPARATOR.split(value).map(str::to_string).collect();
                    entry.search_tags.insert(locale.to_string(), tags);
                }
            }
            continue;
        }
        let field = match column.as_str() {
            "synonyms" => &mut entry.synonyms,
            "antonyms" => &mut entry.antonyms,
            "see_also" => &mut entry.see_also,
            "components" => &mut entry.components,
            "source" => &mut entry.source,
            "hidden_notes" => &mut entry.hidden_notes,
            _ => continue,
        };
        *field = Some(value.clone());
    }
    Some(entry)
}

/// Reads every `<table name="mem">` of `xml` as a column map, in document
/// order.
pub fn parse_tables(xml: &str) -> Result<Vec<IndexMap<String, String>>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut tables = Vec::new();
    let mut table: Option<IndexMap<String, String>> = None;
    let mut column: Option<(String, String)> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| LexiconError::invalid_data_format(format!("Failed to parse XML: {}", e)))?;
        match event {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"table" => {
                let name = e.try_get_attribute("name")?;
                if name.is_some_and(|name| name.value.as_ref() == b"mem") {
                    table = Some(IndexMap::new());
                }
            }
            Event::End(e) if e.name().as_ref() == b"table" => {
                if let Some(columns) = table.take() {
                    tables.push(columns);
                }
            }
            Event::Start(e) if e.name().as_ref() == b"column" && table.is_some() => {
                if let Some(name) = e.try_get_attribute("name")? {
                    column = Some((std::str::from_utf8(&name.value)?.to_string(), String::new()));
                }
            }
            Event::Empty(e) if e.name().as_ref() == b"column" => {
                if let (Some(columns), Some(name)) = (table.as_mut(), e.try_get_attribute("name")?) {
                    columns.insert(std::str::from_utf8(&name.value)?.to_string(), String::new());
                }
            }
            Event::End(e) if e.name().as_ref() == b"column" => {
                if let (Some(columns), Some((name, value))) = (table.as_mut(), column.take()) {
                    columns.insert(name, value);
                }
            }
            Event::Text(e) => {
                if let Some((_, value)) = column.as_mut() {
                    value.push_str(&unescape(std::str::from_utf8(&e)?)?);
                }
            }
            Event::CData(e) => {
                if let Some((_, value)) = column.as_mut() {
                    value.push_str(std::str::from_utf8(&e)?);
                }
            }
            Event::GeneralRef(e) => {
                if let Some((_, value)) = column.as_mut() {
                    let name = std::str::from_utf8(&e)?;
                    match predefined_entity(name) {
                        Some(ch) => value.push(ch),
                        None => {
                            return Err(LexiconError::invalid_data_format(format!(
                                "Unknown XML entity &{};",
                                name
                            )));
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(tables)
}

/// Collects entries in order. Entries without a definition are dropped and
/// a later entry with the same id replaces the earlier one; both are logged.
fn collect_entries(tables: &[IndexMap<String, String>]) -> Vec<Entry> {
    let mut entries: IndexMap<String, Entry> = IndexMap::new();
    for entry in tables.iter().filter_map(entry_from_columns) {
        if entry.definition.english().is_empty() {
            warn!("no definition for entry {}", entry.id);
            continue;
        }
        if entries.contains_key(&entry.id) {
            warn!("{} overwrites an existing entry", entry.id);
        }
        entries.insert(entry.id.clone(), entry);
    }
    entries.into_values().collect()
}

/// Loads a lexicon from a directory of `mem-*.xml` fragments, or from one
/// XML file.
///
/// # Examples
///
/// ```no_run
/// use qawhaq::builder::{LexiconLoader, XmlLoader};
///
/// # fn main() -> qawhaq::Result<()> {
/// let lexicon = XmlLoader::new("data").with_version("2024.01").load()?;
/// println!("{} entries", lexicon.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct XmlLoader {
    path: PathBuf,
    info: LexiconInfo,
}

impl XmlLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        XmlLoader {
            path: path.as_ref().to_path_buf(),
            info: LexiconInfo::default(),
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.info.version = version.to_string();
        self
    }

    pub fn with_info(mut self, info: LexiconInfo) -> Self {
        self.info = info;
        self
    }

    /// The fragment files of the directory, in name order.
    pub fn fragments(&self) -> Result<Vec<PathBuf>> {
        if self.path.is_file() {
            return Ok(vec![self.path.clone()]);
        }
        let mut files = Vec::new();
        for dir_entry in fs::read_dir(&self.path)? {
            let path = dir_entry?.path();
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if file_name.starts_with("mem-")
                && file_name.ends_with(".xml")
                && !SKIPPED_FRAGMENTS.iter().any(|skipped| file_name.contains(skipped))
            {
                files.push(path);
            }
        }
        files.sort();
        if files.is_empty() {
            return Err(LexiconError::invalid_parameter(format!(
                "no mem-*.xml fragments in {}",
                self.path.display()
            )));
        }
        Ok(files)
    }
}

impl LexiconLoader for XmlLoader {
    fn load(&mut self) -> Result<Lexicon> {
        let mut tables = Vec::new();
        for file in self.fragments()? {
            debug!("Parsing {}", file.display());
            let xml = fs::read_to_string(&file)?;
            tables.extend(parse_tables(&xml)?);
        }
        info!("Read {} tables from {}", tables.len(), self.path.display());
        Lexicon::from_parts(self.info.clone(), collect_entries(&tables))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<database name="qawHaq">
    <table name="mem">
        <column name="_id"></column>
        <column name="entry_name">Soj</column>
        <column name="part_of_speech">n:1</column>
        <column name="definition">food &amp; drink</column>
        <column name="definition_de">Essen</column>
        <column name="definition_zh_HK">食物</column>
        <column name="synonyms"/>
        <column name="notes">See {Qap:v}.</column>
        <column name="search_tags">meal, dish,snack</column>
        <column name="search_tags_de">Mahlzeit</column>
        <column name="source">[1] {TKD:src}</column>
    </table>
    <table name="mem">
        <column name="entry_name">Qap</column>
        <column name="part_of_speech">v:i</column>
        <column name="definition">win</column>
    </table>
    <table name="other">
        <column name="entry_name">ignored</column>
    </table>
</database>
"#;

    #[test]
    fn test_localized_column() {
        let test_cases = [
            ("definition", Some(("definition", "en"))),
            ("definition_de", Some(("definition", "de"))),
            ("notes_zh_HK", Some(("notes", "zh_HK"))),
            ("search_tags_fi", Some(("search_tags", "fi"))),
            ("definition_", None),
            ("synonyms", None),
            ("definitions", None),
        ];
        for (column, expected) in test_cases {
            assert_eq!(localized_column(column), expected, "column {:?}", column);
        }
    }

    #[test]
    fn test_parse_fragment() -> Result<()> {
        let tables = parse_tables(FRAGMENT)?;
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0]["definition"], "food & drink");
        assert_eq!(tables[0]["synonyms"], "");

        let entries = collect_entries(&tables);
        let soj = &entries[0];
        assert_eq!(soj.id, "Soj:n:1");
        assert_eq!(soj.definition.get("de"), Some("Essen"));
        assert_eq!(soj.definition.get("zh_HK"), Some("食物"));
        assert_eq!(soj.search_tags_for("en"), ["meal", "dish", "snack"]);
        assert_eq!(soj.search_tags_for("de"), ["Mahlzeit"]);
        assert_eq!(soj.notes.english(), "See {Qap:v}.");
        assert_eq!(soj.synonyms, None);
        assert_eq!(soj.source.as_deref(), Some("[1] {TKD:src}"));
        assert_eq!(entries[1].id, "Qap:v");
        Ok(())
    }

    #[test]
    fn test_duplicates_and_missing_definitions() {
        let columns = |name: &str, pos: &str, definition: &str| -> IndexMap<String, String> {
            [("entry_name", name), ("part_of_speech", pos), ("definition", definition)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };
        let tables = vec![
            columns("Soj", "n", "food"),
            columns("Qap", "v", ""),
            columns("Soj", "n", "meal"),
        ];
        let entries = collect_entries(&tables);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].definition.english(), "meal");
    }

    #[test]
    fn test_predefined_entity() {
        let test_cases = [("amp", Some('&')), ("#39", Some('\'')), ("#x263A", Some('☺')), ("nbsp", None)];
        for (name, expected) in test_cases {
            assert_eq!(predefined_entity(name), expected, "entity {:?}", name);
        }
    }
}
