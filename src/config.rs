//! Query engine configuration.
//!
//! # Examples
//!
//! ```
//! use qawhaq::config::{LinkFormat, QueryConfig};
//!
//! let config = QueryConfig::from_json_str(r#"{"language": "de", "link_format": "latex"}"#)?;
//! assert_eq!(config.language, "de");
//! assert_eq!(config.link_format, LinkFormat::Latex);
//! assert!(config.include_derived);
//! # Ok::<(), qawhaq::LexiconError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::storage::ENGLISH;
use crate::{LexiconError, Result};

/// Markup produced for cross-references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkFormat {
    /// Search links for the web dictionary
    #[default]
    Html,
    /// `\klingonref` citations for the printed dictionary
    Latex,
}

/// Settings of one query session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Locale of definitions, labels and bare-word matching
    pub language: String,
    /// Markup of rendered cross-references
    pub link_format: LinkFormat,
    /// Whether rendered entries list the words derived from them
    pub include_derived: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            language: ENGLISH.to_string(),
            link_format: LinkFormat::Html,
            include_derived: true,
        }
    }
}

impl QueryConfig {
    pub fn new(language: &str, link_format: LinkFormat) -> Self {
        QueryConfig {
            language: language.to_string(),
            link_format,
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or an empty language code.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: QueryConfig = serde_json::from_str(json)?;
        if config.language.trim().is_empty() {
            return Err(LexiconError::invalid_parameter("language code cannot be empty"));
        }
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() -> Result<()> {
        let test_cases = [
            ("{}", QueryConfig::default()),
            (r#"{"language": "fi"}"#, QueryConfig::new("fi", LinkFormat::Html)),
            (
                r#"{"link_format": "latex", "include_derived": false}"#,
                QueryConfig {
                    language: "en".to_string(),
                    link_format: LinkFormat::Latex,
                    include_derived: false,
                },
            ),
        ];
        for (json, expected) in test_cases {
            assert_eq!(QueryConfig::from_json_str(json)?, expected, "config {:?}", json);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_config() {
        assert!(QueryConfig::from_json_str(r#"{"language": ""}"#).is_err());
        assert!(QueryConfig::from_json_str(r#"{"link_format": "pdf"}"#).is_err());
        assert!(QueryConfig::from_json_str("not json").is_err());
        assert!(QueryConfig::from_file("/nonexistent/qawhaq.json").is_err());
    }
}
