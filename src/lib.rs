//! # qawHaq - Klingon Lexicon Engine
//!
//! This crate holds a Klingon-language lexicon in memory and provides the
//! processing needed to publish and search it.
//!
//! ## Features
//!
//! - **Lexicon loading**: Read the lexicon from its JSON dump or from the XML database fragments
//! - **Definition structuring**: Split free-text English definitions into indexable parts
//! - **Reverse index**: Build the sorted English→Klingon index used for typeset books
//! - **Query engine**: Evaluate the `field:value` query language with AND, OR, NOT and parentheses
//! - **Morphological analysis**: Decompose inflected words into their prefix, stem and suffixes
//! - **Link rendering**: Render `{text:type:tags}` cross-references as HTML or LaTeX
//!
//! ## Quick Start
//!
//! ### Searching the lexicon
//!
//! ```
//! use qawhaq::{Entry, Lexicon, QueryConfig, QueryEngine};
//!
//! # fn main() -> qawhaq::Result<()> {
//! let lexicon = Lexicon::new(vec![
//!     Entry::new("Qap", "v").with_definition("en", "win"),
//!     Entry::new("Soj", "n").with_definition("en", "food"),
//! ])?;
//! let engine = QueryEngine::new(&lexicon, QueryConfig::default());
//!
//! let views = engine.execute_query("en:food");
//! assert_eq!(views[0].name, "Soj");
//! # Ok(())
//! # }
//! ```
//!
//! ### Structuring a definition
//!
//! ```
//! use qawhaq::definition::parse_definition;
//!
//! let parsed = parse_definition("be good, be fine", Some("is"));
//! assert_eq!(parsed.parts.len(), 2);
//! ```
//!
//! ## Architecture
//!
//! The crate is organized into several key modules:
//!
//! - **Storage & core types**: [`storage`] for entries, cross-references and the immutable lexicon
//! - **Builder modules**: [`builder`] for loading, dumping and validating lexicon data
//! - **Definitions**: [`definition`] for the definition parser and the reverse index
//! - **Queries**: [`query`] for the query language, the engine and rendered entry views
//! - **Rendering**: [`render`] for HTML and LaTeX link renderers
//! - **Configuration**: [`config`] for query settings
//! - **Utilities**: [`utils`] for orthography, morphology, sorting and URL helpers
//!
//! ## Error Handling
//!
//! All fallible operations return a [`Result<T>`] type, where errors are represented by
//! [`LexiconError`]. The crate uses the `snafu` library for ergonomic error handling with
//! context and backtraces.
//!
//! ```
//! use qawhaq::{Result, LexiconError};
//!
//! fn example() -> Result<String> {
//!     // Operations that may fail return Result<T>
//!     Ok("success".to_string())
//! }
//! ```

pub mod builder;
pub mod config;
pub mod definition;
pub mod error;
pub mod query;
pub mod render;
pub mod storage;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{LinkFormat, QueryConfig};
pub use query::{EntryView, QueryEngine};
pub use storage::{Entry, Lexicon};

// Re-export error types for convenience
pub use error::{LexiconError, Result, snafu};
