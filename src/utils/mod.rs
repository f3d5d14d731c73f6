// Utility functions and helpers
//
// This module provides Klingon orthography, morphological analysis, book
// ordering, localized UI labels and search URL helpers.

pub mod orthography;
pub mod analyzer;
pub mod locale_strings;
pub mod sort_key;
pub mod url_utils;

pub use orthography::{fix_xifan, split_to_letters, split_to_syllables, wiki_name, LETTERS};
pub use analyzer::{Analysis, LexiconAnalyzer, MorphologicalAnalyzer};
pub use locale_strings::LocaleStrings;
pub use sort_key::{book_key, first_letter, group_by_first_letter, BookKey};
pub use url_utils::{decode_search_href, search_href, search_url};
