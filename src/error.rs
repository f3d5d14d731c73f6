//! Error types and result type for the qawhaq crate.
//!
//! Loading a lexicon, reading configuration and compiling rule tables can fail;
//! those operations return [`Result<T>`]. The query and rendering path never
//! surfaces these errors to its caller: a failing term or field degrades to
//! "no match" or an omitted value and is logged instead.
//!
//! # Examples
//!
//! ```
//! use qawhaq::{LexiconError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(LexiconError::invalid_parameter("empty data directory"))
//! }
//!
//! match load() {
//!     Ok(()) => println!("loaded"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! # Error Variants
//!
//! - [`LexiconError::Io`]: I/O errors while reading source files
//! - [`LexiconError::ParserError`]: JSON/XML parsing errors
//! - [`LexiconError::InvalidDataFormat`]: well-formed input with bad content
//! - [`LexiconError::InvalidParameter`]: invalid function parameters
//! - [`LexiconError::EntryNotFound`]: lookup of an unknown entry id
//! - [`LexiconError::DuplicateEntry`]: two entries with the same id
//! - [`LexiconError::InvalidPattern`]: a query regex that does not compile

use std::io;
use snafu::{Backtrace, Snafu};

pub use snafu;

/// Main error type for the qawhaq crate.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum LexiconError {
    /// I/O error occurred while reading a source file.
    #[snafu(display("IO error: {source}"))]
    Io {
        source: io::Error,
        backtrace: Backtrace,
    },

    /// Error parsing JSON, XML or other structured data.
    #[snafu(display("Parser error: {source}"))]
    ParserError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        backtrace: Backtrace,
    },

    /// Source data is syntactically valid but does not describe a lexicon.
    #[snafu(display("Invalid data format: {message}"))]
    InvalidDataFormat {
        message: String,
        backtrace: Backtrace,
    },

    /// Function was called with invalid parameters.
    #[snafu(display("Invalid parameter: {message}"))]
    InvalidParameter {
        message: String,
        backtrace: Backtrace,
    },

    /// No entry with this id exists in the lexicon.
    #[snafu(display("Entry not found: {id}"))]
    EntryNotFound {
        id: String,
        backtrace: Backtrace,
    },

    /// Two entries share the same id.
    #[snafu(display("Duplicate entry id: {id}"))]
    DuplicateEntry {
        id: String,
        backtrace: Backtrace,
    },

    /// A query value could not be compiled as a regular expression.
    #[snafu(display("Invalid pattern {pattern:?}: {message}"))]
    InvalidPattern {
        pattern: String,
        message: String,
        backtrace: Backtrace,
    },
}

impl From<io::Error> for LexiconError {
    fn from(source: io::Error) -> Self {
        Self::Io { source, backtrace: Backtrace::capture() }
    }
}

impl From<quick_xml::Error> for LexiconError {
    fn from(source: quick_xml::Error) -> Self {
        Self::ParserError { source: Box::new(source), backtrace: Backtrace::capture() }
    }
}

impl From<quick_xml::events::attributes::AttrError> for LexiconError {
    fn from(source: quick_xml::events::attributes::AttrError) -> Self {
        Self::ParserError { source: Box::new(source), backtrace: Backtrace::capture() }
    }
}

impl From<serde_json::Error> for LexiconError {
    fn from(source: serde_json::Error) -> Self {
        Self::ParserError { source: Box::new(source), backtrace: Backtrace::capture() }
    }
}

impl From<std::string::FromUtf8Error> for LexiconError {
    fn from(source: std::string::FromUtf8Error) -> Self {
        Self::InvalidDataFormat {
            message: format!("Invalid UTF-8 (String): {}", source),
            backtrace: Backtrace::capture(),
        }
    }
}

impl From<std::str::Utf8Error> for LexiconError {
    fn from(source: std::str::Utf8Error) -> Self {
        Self::InvalidDataFormat {
            message: format!("Invalid UTF-8 (&str): {}", source),
            backtrace: Backtrace::capture(),
        }
    }
}

/// Helper methods for creating errors without context selectors.
impl LexiconError {
    /// Creates an `InvalidParameter` error with the given message.
    ///
    /// # Examples
    ///
    /// ```
    /// use qawhaq::LexiconError;
    ///
    /// let error = LexiconError::invalid_parameter("language code cannot be empty");
    /// assert!(error.to_string().contains("language code"));
    /// ```
    pub fn invalid_parameter<S: Into<String>>(message: S) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidDataFormat` error with the given message.
    pub fn invalid_data_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidDataFormat {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `EntryNotFound` error for the given id.
    pub fn entry_not_found<S: Into<String>>(id: S) -> Self {
        Self::EntryNotFound {
            id: id.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `DuplicateEntry` error for the given id.
    pub fn duplicate_entry<S: Into<String>>(id: S) -> Self {
        Self::DuplicateEntry {
            id: id.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidPattern` error from a regex compilation failure.
    pub fn invalid_pattern<S: Into<String>>(pattern: S, source: &regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: source.to_string(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Checks if this error is an `EntryNotFound` variant.
    pub fn is_entry_not_found(&self) -> bool {
        matches!(self, LexiconError::EntryNotFound { .. })
    }
}

/// A specialized `Result` type for lexicon operations.
pub type Result<T> = std::result::Result<T, LexiconError>;
