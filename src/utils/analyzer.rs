//! Morphological analysis of Klingon words.
//!
//! The query engine asks an analyzer which lexicon entries a typed word is
//! made of, and the entry renderer asks it for letter, syllable and morpheme
//! breakdowns. [`LexiconAnalyzer`] answers both from the lexicon itself: a
//! word is a known entry, or a verb prefix, a stem and a chain of suffixes
//! that are all entries.

use std::collections::HashMap;

use log::*;

use crate::storage::{Entry, Lexicon};
use crate::utils::orthography;

/// One way of reading a word: the ids of its parts in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub parts: Vec<String>,
}

pub trait MorphologicalAnalyzer {
    /// Every reading of `text`; empty when nothing is recognized.
    fn analyze(&self, text: &str) -> Vec<Analysis>;

    fn split_to_letters(&self, text: &str) -> Vec<String> {
        orthography::split_to_letters(text)
    }

    fn split_to_syllables(&self, text: &str) -> Vec<String> {
        orthography::split_to_syllables(text)
    }

    /// Morphemes of each space-separated word.
    fn split_to_morphemes(&self, text: &str) -> Vec<Vec<String>> {
        text.split_whitespace().map(|word| vec![word.to_string()]).collect()
    }
}

#[derive(Debug, Clone)]
struct Affix {
    form: String,
    id: String,
}

/// Analyzer backed by the entries of a [`Lexicon`].
///
/// # Examples
///
/// ```
/// use qawhaq::storage::{Entry, Lexicon};
/// use qawhaq::utils::{LexiconAnalyzer, MorphologicalAnalyzer};
///
/// # fn main() -> qawhaq::Result<()> {
/// let lexicon = Lexicon::new(vec![
///     Entry::new("Qap", "v"),
///     Entry::new("-wI'", "v:suff"),
/// ])?;
/// let analyzer = LexiconAnalyzer::new(&lexicon);
/// let analyses = analyzer.analyze("QapwI'");
/// assert_eq!(analyses[0].parts, vec!["Qap:v", "-wI':v"]);
/// assert_eq!(analyzer.split_to_morphemes("QapwI'"), vec![vec!["Qap", "wI'"]]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LexiconAnalyzer<'a> {
    lexicon: &'a Lexicon,
    by_name: HashMap<&'a str, Vec<&'a Entry>>,
    prefixes: Vec<Affix>,
    suffixes: HashMap<String, Vec<Affix>>,
}

impl<'a> LexiconAnalyzer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        let mut by_name: HashMap<&str, Vec<&Entry>> = HashMap::new();
        let mut prefixes = Vec::new();
        let mut suffixes: HashMap<String, Vec<Affix>> = HashMap::new();
        for entry in lexicon.entries() {
            by_name.entry(entry.name.as_str()).or_default().push(entry);
            if entry.name.len() < 2 {
                continue;
            }
            if let Some(form) = entry.name.strip_prefix('-') {
                suffixes.entry(entry.simple_pos.clone()).or_default().push(Affix {
                    form: form.to_string(),
                    id: entry.id.clone(),
                });
            } else if let Some(form) = entry.name.strip_suffix('-') {
                if entry.simple_pos == "v" {
                    prefixes.push(Affix {
                        form: form.to_string(),
                        id: entry.id.clone(),
                    });
                }
            }
        }
        debug!(
            "Analyzer: {} names, {} prefixes, {} suffix classes",
            by_name.len(),
            prefixes.len(),
            suffixes.len()
        );
        LexiconAnalyzer {
            lexicon,
            by_name,
            prefixes,
            suffixes,
        }
    }

    pub fn lexicon(&self) -> &'a Lexicon {
        self.lexicon
    }

    fn stems(&self, form: &str) -> impl Iterator<Item = &'a Entry> + '_ {
        self.by_name
            .get(form)
            .into_iter()
            .flatten()
            .copied()
            .filter(|entry| {
                !entry.is_sentence()
                    && !entry.name.starts_with('-')
                    && !entry.name.ends_with('-')
                    && (entry.simple_pos == "n" || entry.simple_pos == "v")
            })
    }

    /// First chain of `pos` suffixes that spells out `rest` exactly.
    fn suffix_chain(&self, rest: &str, pos: &str) -> Option<Vec<&Affix>> {
        if rest.is_empty() {
            return Some(Vec::new());
        }
        for suffix in self.suffixes.get(pos).into_iter().flatten() {
            if let Some(tail) = rest.strip_prefix(suffix.form.as_str()) {
                if let Some(mut chain) = self.suffix_chain(tail, pos) {
                    chain.insert(0, suffix);
                    return Some(chain);
                }
            }
        }
        None
    }

    fn decompose(&self, word: &str) -> Vec<Analysis> {
        let mut analyses = Vec::new();
        let no_prefix = [None];
        let prefixes = no_prefix
            .into_iter()
            .chain(self.prefixes.iter().map(Some))
            .filter(|prefix| prefix.is_none_or(|p| word.starts_with(p.form.as_str())));
        for prefix in prefixes {
            let start = prefix.map_or(0, |p| p.form.len());
            let body = &word[start..];
            for (end, _) in body.char_indices().skip(1).chain([(body.len(), ' ')]) {
                let (stem_form, rest) = body.split_at(end);
                for stem in self.stems(stem_form) {
                    if prefix.is_some() && stem.simple_pos != "v" {
                        continue;
                    }
                    if prefix.is_none() && rest.is_empty() {
                        continue;
                    }
                    let Some(chain) = self.suffix_chain(rest, &stem.simple_pos) else {
                        continue;
                    };
                    let mut parts = Vec::with_capacity(chain.len() + 2);
                    if let Some(prefix) = prefix {
                        parts.push(prefix.id.clone());
                    }
                    parts.push(stem.id.clone());
                    parts.extend(chain.into_iter().map(|suffix| suffix.id.clone()));
                    analyses.push(Analysis { parts });
                }
            }
        }
        analyses
    }
}

impl MorphologicalAnalyzer for LexiconAnalyzer<'_> {
    fn analyze(&self, text: &str) -> Vec<Analysis> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        let mut analyses: Vec<Analysis> = self
            .by_name
            .get(text)
            .into_iter()
            .flatten()
            .map(|entry| Analysis {
                parts: vec![entry.id.clone()],
            })
            .collect();
        if !text.contains(' ') {
            analyses.extend(self.decompose(text));
        }
        analyses
    }

    fn split_to_morphemes(&self, text: &str) -> Vec<Vec<String>> {
        text.split_whitespace()
            .map(|word| {
                let Some(analysis) = self.decompose(word).into_iter().next() else {
                    return vec![word.to_string()];
                };
                analysis
                    .parts
                    .iter()
                    .filter_map(|id| self.lexicon.get(id))
                    .map(|entry| entry.name.trim_matches('-').to_string())
                    .collect()
            })
            .collect()
    }
}
