//! Built-in UI label tables.
//!
//! Labels are looked up by a fixed key such as `"noun"` or `"slang"`. A
//! language without a table uses English, and a key missing from a table
//! falls back to the English label and then to the key itself.
//!
//! # Examples
//!
//! ```
//! use qawhaq::utils::LocaleStrings;
//!
//! let strings = LocaleStrings::for_language("fi");
//! assert_eq!(strings.get("noun"), "substantiivi");
//! assert_eq!(LocaleStrings::for_language("xx").get("noun"), "noun");
//! ```

use std::collections::HashMap;

use log::*;
use once_cell::sync::Lazy;

use crate::storage::ENGLISH;

type Table = HashMap<&'static str, &'static str>;

const EN: &[(&str, &str)] = &[
    ("english", "English"),
    ("finnish", "Finnish"),
    ("german", "German"),
    ("russian", "Russian"),
    ("dictionary", "Dictionary"),
    ("unknown", "unknown"),
    ("adjective", "stative verb"),
    ("transitive verb", "tr. verb"),
    ("possibly transitive verb", "possibly tr. verb"),
    ("intransitive verb", "itr. verb"),
    ("possibly intransitive verb", "possibly itr. verb"),
    ("verb prefix", "prefix"),
    ("verb suffix", "verb suffix"),
    ("verb", "verb"),
    ("noun suffix", "noun suffix"),
    ("noun", "noun"),
    ("question word", "ques."),
    ("adverb", "adverb"),
    ("conjunction", "conj."),
    ("exclamation", "excl."),
    ("sentence", "sent."),
    ("plural", "plural"),
    ("singular", "singular"),
    ("slang", "slang"),
    ("regional", "reg."),
    ("archaic", "archaic"),
    ("hypothetical", "hyp."),
    ("extracanonical", "extcan."),
    ("examples", "Examples"),
    ("components", "Components"),
    ("derived", "Derived words"),
    ("synonyms", "Synonyms"),
    ("antonyms", "Antonyms"),
    ("see_also", "See also"),
    ("source", "Sources"),
    ("hidden_notes", "Hidden notes"),
    ("wiki", "Search in the Dictionary of Contemporary Klingon (Klingon Wiki)"),
    ("klingonska", "Search in the Klingonska Archive of Okrandian Canon"),
    ("dictionary_info", "About the dictionary"),
    ("search", "Search"),
];

const FI: &[(&str, &str)] = &[
    ("english", "Englanti"),
    ("finnish", "Suomi"),
    ("german", "Saksa"),
    ("russian", "Venäjä"),
    ("dictionary", "Sanakirja"),
    ("unknown", "tuntematon"),
    ("adjective", "adjektiivi"),
    ("transitive verb", "tr. verbi"),
    ("possibly transitive verb", "todn. tr. verbi"),
    ("intransitive verb", "itr. verbi"),
    ("possibly intransitive verb", "todn. itr. verbi"),
    ("verb prefix", "etuliite"),
    ("verb suffix", "pääte"),
    ("verb", "verbi"),
    ("noun suffix", "liite"),
    ("noun", "substantiivi"),
    ("question word", "kysymyssana"),
    ("adverb", "adverbi"),
    ("conjunction", "konjunktio"),
    ("exclamation", "huudahdus"),
    ("sentence", "esimerkkilause"),
    ("plural", "monikko"),
    ("singular", "yksikkö"),
    ("slang", "slangia"),
    ("regional", "alueell."),
    ("archaic", "vanh."),
    ("hypothetical", "hyp."),
    ("extracanonical", "ekstrakan."),
    ("examples", "Esimerkkejä"),
    ("components", "Osat"),
    ("derived", "Johdetut sanat"),
    ("synonyms", "Synonyymi"),
    ("antonyms", "Antonyymi"),
    ("see_also", "Katso myös"),
    ("source", "Lähteet"),
    ("hidden_notes", "Lisätietoja"),
    ("wiki", "Etsi Klingon Wikin sanakirjasta"),
    ("klingonska", "Etsi Klingonskan kaanonin arkistosta"),
    ("dictionary_info", "Tietoa sanakirjasta"),
    ("search", "Hae"),
];

const DE: &[(&str, &str)] = &[
    ("english", "Englisch"),
    ("finnish", "Finnisch"),
    ("german", "Deutsch"),
    ("russian", "Russisch"),
    ("dictionary", "Wörterbuch"),
    ("unknown", "unbekannt"),
    ("adjective", "Zustandsverb"),
    ("transitive verb", "trans. Verb"),
    ("possibly transitive verb", "mögl. trans. Verb"),
    ("intransitive verb", "intr. Verb"),
    ("possibly intransitive verb", "mögl. itr. Verb"),
    ("verb prefix", "Verbpräfix"),
    ("verb suffix", "Verbsuffix"),
    ("verb", "Verb"),
    ("noun suffix", "Substantivsuffix"),
    ("noun", "Substantiv"),
    ("question word", "Fragewort"),
    ("adverb", "Adverb"),
    ("conjunction", "Bindewort"),
    ("exclamation", "Ausruf"),
    ("sentence", "Satz"),
    ("plural", "Mehrzahl"),
    ("singular", "Einzahl"),
    ("slang", "Slang"),
    ("regional", "regional"),
    ("archaic", "veraltet"),
    ("hypothetical", "hypothet."),
    ("extracanonical", "extrakanon."),
    ("examples", "Beispiele"),
    ("components", "Komponenten"),
    ("derived", "Wortbildungen"),
    ("synonyms", "Synonyme"),
    ("antonyms", "Antonyme"),
    ("see_also", "Siehe auch"),
    ("source", "Quellen"),
    ("hidden_notes", "Versteckte Notizen"),
    ("wiki", "Suche im Klingonisch-Wiki"),
    ("klingonska", "Suche im Klingonska Kanonarchiv"),
    ("dictionary_info", "Über das Wörterbuch"),
    ("search", "Suchen"),
];

const RU: &[(&str, &str)] = &[
    ("english", "английский"),
    ("finnish", "финский"),
    ("german", "немецкий"),
    ("russian", "русский"),
    ("dictionary", "Словарь"),
    ("unknown", "неизвестно"),
    ("adjective", "прилагательное"),
    ("transitive verb", "перех. гл."),
    ("possibly transitive verb", "возможно перех. гл."),
    ("intransitive verb", "неперех. гл."),
    ("possibly intransitive verb", "возможно неперех. гл."),
    ("verb prefix", "префикс гл."),
    ("verb suffix", "суффикс гл."),
    ("verb", "глагол"),
    ("noun suffix", "суффикс сущ."),
    ("noun", "существительное"),
    ("question word", "вопросительное сл."),
    ("adverb", "наречие"),
    ("conjunction", "союз"),
    ("exclamation", "восклицание"),
    ("sentence", "пример предлж."),
    ("plural", "множественное число"),
    ("singular", "единственное число"),
    ("slang", "сленг"),
    ("regional", "региональный"),
    ("archaic", "устаревший"),
    ("hypothetical", "гипотетический"),
    ("extracanonical", "внеканонический"),
    ("examples", "Примеры"),
    ("components", "Компоненты"),
    ("derived", "Производные слова"),
    ("synonyms", "Синонимы"),
    ("antonyms", "Антонимы"),
    ("see_also", "См. также"),
    ("source", "Источники"),
    ("hidden_notes", "Скрытые заметки"),
    ("wiki", "Искать в словаре современного клингона (Klingon Wiki)"),
    ("klingonska", "Искать в архиве канона Klingonska"),
    ("dictionary_info", "О словаре"),
    ("search", "Поиск"),
];

static TABLES: Lazy<HashMap<&'static str, Table>> = Lazy::new(|| {
    [("en", EN), ("fi", FI), ("de", DE), ("ru", RU)]
        .into_iter()
        .map(|(language, pairs)| (language, pairs.iter().copied().collect()))
        .collect()
});

static EMPTY: Lazy<Table> = Lazy::new(HashMap::new);

/// Label table for one UI language.
#[derive(Debug, Clone, Copy)]
pub struct LocaleStrings {
    language: &'static str,
    table: &'static Table,
    fallback: &'static Table,
}

impl LocaleStrings {
    /// Languages with a built-in table.
    pub fn languages() -> impl Iterator<Item = &'static str> {
        ["en", "de", "fi", "ru"].into_iter()
    }

    pub fn for_language(language: &str) -> Self {
        let fallback = TABLES.get(ENGLISH).unwrap_or(&*EMPTY);
        match TABLES.get_key_value(language) {
            Some((&language, table)) => LocaleStrings {
                language,
                table,
                fallback,
            },
            None => {
                debug!("No label table for {:?}, using English", language);
                LocaleStrings {
                    language: ENGLISH,
                    table: fallback,
                    fallback,
                }
            }
        }
    }

    /// Code of the table in use, which is `en` for unknown languages.
    pub fn language(&self) -> &'static str {
        self.language
    }

    pub fn get<'a>(&self, key: &'a str) -> &'a str {
        self.table
            .get(key)
            .or_else(|| self.fallback.get(key))
            .copied()
            .unwrap_or(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let test_cases = [
            ("en", "adjective", "stative verb"),
            ("de", "noun", "Substantiv"),
            ("ru", "slang", "сленг"),
            ("fi", "plural", "monikko"),
            ("sv", "noun", "noun"),
            ("de", "no such key", "no such key"),
        ];
        for (language, key, expected) in test_cases {
            assert_eq!(LocaleStrings::for_language(language).get(key), expected, "{}/{}", language, key);
        }
    }

    #[test]
    fn test_tables_share_keys() {
        let english = &TABLES["en"];
        for language in LocaleStrings::languages() {
            for key in english.keys() {
                assert!(TABLES[language].contains_key(key), "{} lacks {:?}", language, key);
            }
        }
    }

    #[test]
    fn test_unknown_language_reports_english() {
        assert_eq!(LocaleStrings::for_language("tlh").language(), "en");
        assert_eq!(LocaleStrings::for_language("de").language(), "de");
    }
}
