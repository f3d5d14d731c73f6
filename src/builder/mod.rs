//! Builder module for loading and checking lexicon data
//!
//! This module reads the lexicon from its JSON dump or from the XML database
//! fragments, writes the JSON dump, and validates the cross-references of a
//! loaded lexicon.

pub mod json_loader;
pub mod xml_loader;
pub mod link_validator;

use crate::Result;
use crate::storage::Lexicon;

/// Common interface of the lexicon sources.
///
/// # Examples
///
/// ```
/// use qawhaq::builder::LexiconLoader;
/// use qawhaq::storage::{Entry, Lexicon};
/// use qawhaq::Result;
///
/// struct Fixed;
///
/// impl LexiconLoader for Fixed {
///     fn load(&mut self) -> Result<Lexicon> {
///         Lexicon::new(vec![Entry::new("Soj", "n").with_definition("en", "food")])
///     }
/// }
///
/// assert_eq!(Fixed.load().unwrap().len(), 1);
/// ```
pub trait LexiconLoader {
    /// Reads the source and builds the lexicon.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or does not describe a
    /// valid lexicon.
    fn load(&mut self) -> Result<Lexicon>;
}

// Re-export commonly used types for convenience
pub use json_loader::{JsonLoader, JsonRecord, JsonStore};
pub use xml_loader::{XmlLoader, entry_from_columns, parse_tables};
pub use link_validator::{BrokenLink, validate_links};
