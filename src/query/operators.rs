//! Field operators of the query language (`field:value` terms).

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;

use log::*;
use regex::{Regex, RegexBuilder};

use crate::storage::{ENGLISH, Entry};
use crate::utils::orthography::fix_xifan;
use crate::{LexiconError, Result};

/// What a `field:value` term tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOperator {
    /// `tlh`: regex on the entry name.
    Name,
    /// `pos`: every comma-separated value is the simple pos or a tag.
    PartOfSpeech,
    Antonyms,
    Synonyms,
    Components,
    SeeAlso,
    /// `notes`, `<locale>notes`: case-insensitive regex on localized notes.
    Notes { locale: String },
    /// `ex`, `<locale>ex`: regex on localized examples.
    Examples { locale: String },
    /// `<locale>`: regex on the localized definition, or an exact search tag.
    Definition { locale: String },
}

impl FieldOperator {
    /// Operators whose value is typed in Klingon and normalized with
    /// [`fix_xifan`] before matching.
    pub fn uses_klingon_value(&self) -> bool {
        matches!(
            self,
            FieldOperator::Name
                | FieldOperator::Antonyms
                | FieldOperator::Synonyms
                | FieldOperator::Components
                | FieldOperator::SeeAlso
        )
    }

    fn ignores_case(&self) -> bool {
        matches!(self, FieldOperator::Notes { .. })
    }

    fn field<'e>(&self, entry: &'e Entry) -> &'e str {
        match self {
            FieldOperator::Name => &entry.name,
            FieldOperator::PartOfSpeech => &entry.simple_pos,
            FieldOperator::Antonyms => entry.antonyms.as_deref().unwrap_or(""),
            FieldOperator::Synonyms => entry.synonyms.as_deref().unwrap_or(""),
            FieldOperator::Components => entry.components.as_deref().unwrap_or(""),
            FieldOperator::SeeAlso => entry.see_also.as_deref().unwrap_or(""),
            FieldOperator::Notes { locale } => entry.notes.get(locale).unwrap_or(""),
            FieldOperator::Examples { locale } => entry.examples.get(locale).unwrap_or(""),
            FieldOperator::Definition { locale } => entry.definition.get(locale).unwrap_or(""),
        }
    }
}

/// Operator names available for a lexicon, built once with the store.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
    operators: HashMap<String, FieldOperator>,
}

impl OperatorTable {
    /// Registers the fixed operators plus `<locale>`, `<locale>notes` and
    /// `<locale>ex` for each locale. A locale never shadows a fixed operator.
    pub fn with_locales<I, S>(locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = OperatorTable::default();
        for locale in locales {
            table.register_locale(locale.as_ref());
        }
        let fixed = [
            ("tlh", FieldOperator::Name),
            ("pos", FieldOperator::PartOfSpeech),
            ("antonym", FieldOperator::Antonyms),
            ("synonym", FieldOperator::Synonyms),
            ("components", FieldOperator::Components),
            ("see", FieldOperator::SeeAlso),
            ("notes", FieldOperator::Notes { locale: ENGLISH.to_string() }),
            ("ex", FieldOperator::Examples { locale: ENGLISH.to_string() }),
        ];
        for (name, operator) in fixed {
            table.operators.insert(name.to_string(), operator);
        }
        table
    }

    fn register_locale(&mut self, locale: &str) {
        let entries = [
            (locale.to_string(), FieldOperator::Definition { locale: locale.to_string() }),
            (format!("{}notes", locale), FieldOperator::Notes { locale: locale.to_string() }),
            (format!("{}ex", locale), FieldOperator::Examples { locale: locale.to_string() }),
        ];
        self.operators.extend(entries);
    }

    pub fn get(&self, name: &str) -> Option<&FieldOperator> {
        self.operators.get(name)
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

/// A `field:value` term with its operator resolved and its pattern compiled.
///
/// A pattern that fails to compile is kept as the error and returned every
/// time the term is evaluated.
#[derive(Clone)]
pub struct FieldTerm {
    pub field: String,
    pub value: String,
    operator: Option<FieldOperator>,
    pattern: Option<std::result::Result<Regex, regex::Error>>,
    reported: Cell<bool>,
}

impl FieldTerm {
    pub fn new(table: &OperatorTable, field: &str, value: &str) -> Self {
        let operator = table.get(field).cloned();
        let pattern = match &operator {
            None | Some(FieldOperator::PartOfSpeech) => None,
            Some(operator) => {
                let source = if operator.uses_klingon_value() {
                    fix_xifan(value)
                } else {
                    value.to_string()
                };
                Some(RegexBuilder::new(&source).case_insensitive(operator.ignores_case()).build())
            }
        };
        FieldTerm {
            field: field.to_string(),
            value: value.to_string(),
            operator,
            pattern,
            reported: Cell::new(false),
        }
    }

    pub fn operator(&self) -> Option<&FieldOperator> {
        self.operator.as_ref()
    }

    /// Tests the term against one entry. An unregistered field never matches.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::InvalidPattern`] when the value is not a valid
    /// regular expression.
    pub fn matches(&self, entry: &Entry) -> Result<bool> {
        let Some(operator) = &self.operator else {
            return Ok(false);
        };
        if let FieldOperator::PartOfSpeech = operator {
            return Ok(self
                .value
                .split(',')
                .all(|pos| pos == entry.simple_pos || entry.has_tag(pos)));
        }
        let regex = match &self.pattern {
            Some(Ok(regex)) => regex,
            Some(Err(e)) => return Err(LexiconError::invalid_pattern(self.value.as_str(), e)),
            None => return Ok(false),
        };
        if regex.is_match(operator.field(entry)) {
            return Ok(true);
        }
        match operator {
            FieldOperator::Definition { locale } => Ok(entry
                .search_tags_for(locale)
                .iter()
                .any(|tag| *tag == self.value)),
            _ => Ok(false),
        }
    }

    /// Like [`FieldTerm::matches`], but a failing term is a non-match. The
    /// first failure of this term is logged.
    pub fn matches_or_report(&self, entry: &Entry) -> bool {
        match self.matches(entry) {
            Ok(matched) => matched,
            Err(e) => {
                if !self.reported.replace(true) {
                    warn!("Error during executing query term {}:{}: {}", self.field, self.value, e);
                }
                false
            }
        }
    }

    /// Whether evaluating this term has failed at least once.
    pub fn has_failed(&self) -> bool {
        self.reported.get()
    }
}

impl fmt::Debug for FieldTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldTerm")
            .field("field", &self.field)
            .field("value", &self.value)
            .field("operator", &self.operator)
            .finish()
    }
}

impl PartialEq for FieldTerm {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.value == other.value && self.operator == other.operator
    }
}
