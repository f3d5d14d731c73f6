//! Query execution and entry rendering.
//!
//! A query runs in two stages. First the text is handed to the morphological
//! analyzer, whole and (when it holds no `field:` term) word by word; every
//! entry it is made of is returned first. Then the text is parsed as a
//! boolean query; each operand of a top-level `OR` is evaluated over the
//! whole lexicon in load order, skipping entries already returned.

use std::collections::{HashMap, HashSet};

use log::*;

use crate::config::{LinkFormat, QueryConfig};
use crate::query::parser::{normalize_query, parse_query};
use crate::query::view::{self, EntryView, Inflection};
use crate::render::{HtmlRenderer, LatexRenderer, LinkRenderer, fix_links};
use crate::storage::{ENGLISH, Entry, Lexicon, LocalizedText};
use crate::utils::analyzer::{Analysis, LexiconAnalyzer, MorphologicalAnalyzer};
use crate::utils::orthography::{fix_xifan, wiki_name};
use crate::utils::LocaleStrings;

/// Answers queries against one lexicon in one language.
///
/// # Examples
///
/// ```
/// use qawhaq::config::QueryConfig;
/// use qawhaq::query::QueryEngine;
/// use qawhaq::storage::{Entry, Lexicon};
///
/// # fn main() -> qawhaq::Result<()> {
/// let lexicon = Lexicon::new(vec![
///     Entry::new("Soj", "n").with_definition("en", "food"),
///     Entry::new("Qap", "v").with_definition("en", "win"),
/// ])?;
/// let engine = QueryEngine::new(&lexicon, QueryConfig::default());
/// let names: Vec<_> = engine.execute_query("en:food").into_iter().map(|v| v.name).collect();
/// assert_eq!(names, vec!["Soj"]);
/// # Ok(())
/// # }
/// ```
pub struct QueryEngine<'a> {
    lexicon: &'a Lexicon,
    config: QueryConfig,
    strings: LocaleStrings,
    analyzer: Box<dyn MorphologicalAnalyzer + 'a>,
    renderer: Box<dyn LinkRenderer + 'a>,
}

impl<'a> QueryEngine<'a> {
    pub fn new(lexicon: &'a Lexicon, config: QueryConfig) -> Self {
        let renderer: Box<dyn LinkRenderer + 'a> = match config.link_format {
            LinkFormat::Html => Box::new(HtmlRenderer::new(lexicon, &config.language)),
            LinkFormat::Latex => Box::new(LatexRenderer),
        };
        QueryEngine {
            lexicon,
            strings: LocaleStrings::for_language(&config.language),
            analyzer: Box::new(LexiconAnalyzer::new(lexicon)),
            renderer,
            config,
        }
    }

    /// Replaces the analyzer used for the word passes and for morpheme
    /// breakdowns.
    pub fn with_analyzer<A: MorphologicalAnalyzer + 'a>(mut self, analyzer: A) -> Self {
        self.analyzer = Box::new(analyzer);
        self
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn language(&self) -> &str {
        &self.config.language
    }

    /// Runs `query` and returns the matching entries rendered. An empty query
    /// returns nothing; errors inside the query only drop the entries they
    /// occur on.
    pub fn execute_query(&self, query: &str) -> Vec<EntryView> {
        let query = normalize_query(query);
        if query.is_empty() {
            return Vec::new();
        }

        let mut parts = fix_analysis_parts(&self.analyzer.analyze(&fix_xifan(&query)));
        if !query.contains(':') {
            let analyses: Vec<Analysis> = query
                .split(' ')
                .flat_map(|word| self.analyzer.analyze(&fix_xifan(word)))
                .collect();
            parts.extend(fix_analysis_parts(&analyses));
        }

        let mut included = HashSet::new();
        let mut views = Vec::new();
        for part in parts {
            if !included.insert(part.clone()) {
                continue;
            }
            match self.lexicon.get(&part) {
                Some(entry) => views.push(self.render_entry(entry, self.config.include_derived)),
                None => warn!("Analysis part {} is not in the lexicon", part),
            }
        }
        debug!("Query {:?}: {} entries from analysis", query, views.len());

        views.extend(self.dsl_query(&query, &included));
        views
    }

    /// Evaluates `query` as a boolean query, leaving out the ids in
    /// `included`. Each operand of a top-level `OR` is evaluated over the
    /// whole lexicon in load order before the next one, so `a OR b` lists
    /// the matches of `a` first and then the remaining matches of `b`.
    pub fn dsl_query(&self, query: &str, included: &HashSet<String>) -> Vec<EntryView> {
        let tree = parse_query(query, self.lexicon.operators());
        let mut emitted = included.clone();
        let mut views = Vec::new();
        for disjunct in tree.disjuncts() {
            for entry in self.lexicon.entries() {
                if emitted.contains(&entry.id) || !disjunct.evaluate(entry, &self.config.language) {
                    continue;
                }
                emitted.insert(entry.id.clone());
                views.push(self.render_entry(entry, self.config.include_derived));
            }
        }
        debug!("Query {:?}: {} entries from evaluation", query, views.len());
        views
    }

    /// Renders every `{...}` reference in `text`.
    pub fn fix_links(&self, text: &str) -> String {
        fix_links(self.renderer.as_ref(), text)
    }

    /// Renders `entry` for display. With `include_derivs` the words built
    /// from it are rendered too, without their own derived words.
    pub fn render_entry(&self, entry: &Entry, include_derivs: bool) -> EntryView {
        let language = self.config.language.as_str();
        let tags: Vec<&str> = entry.tags.iter().map(String::as_str).collect();
        let localized = |text: &LocalizedText| {
            let text = text.get_unless_translated(language);
            (!text.is_empty()).then(|| self.fix_links(text))
        };
        let linked = |field: &Option<String>| {
            field
                .as_deref()
                .filter(|text| !text.is_empty())
                .map(|text| self.fix_links(text))
        };

        let mut view = EntryView {
            name: entry.name.clone(),
            url_name: entry.name.replace(' ', "+"),
            wiki_name: wiki_name(&entry.name),
            graphemes: self.analyzer.split_to_letters(&entry.name),
            syllables: self.analyzer.split_to_syllables(&entry.name),
            morphemes: self.analyzer.split_to_morphemes(&entry.name),
            pos: self.strings.get(view::pos_label_key(entry)).to_string(),
            simple_pos: view::display_pos(entry).to_string(),
            raw_tags: entry.tags.iter().cloned().collect(),
            tags: view::tag_labels(entry, &self.strings),
            rendered_link: self.renderer.render_link(&entry.name, &entry.simple_pos, &tags),
            homonym: view::homonym(entry),
            definition: self.fix_links(entry.definition.get_unless_translated(language)),
            untranslated: language != ENGLISH && !entry.definition.is_translated(language),
            english: (language != ENGLISH).then(|| self.fix_links(entry.definition.english())),
            notes: localized(&entry.notes),
            examples: localized(&entry.examples),
            components: linked(&entry.components),
            synonyms: linked(&entry.synonyms),
            antonyms: linked(&entry.antonyms),
            see_also: linked(&entry.see_also),
            source: linked(&entry.source),
            hidden_notes: linked(&entry.hidden_notes),
            ..EntryView::default()
        };

        view.inflections = view::inflection(entry).map(|inflection| match inflection {
            Inflection::Plural(components) => {
                view.components = None;
                format!("{}: {}", self.strings.get("plural"), self.fix_links(components))
            }
            Inflection::Singular(components) => {
                view.components = None;
                format!("{}: {}", self.strings.get("singular"), self.fix_links(components))
            }
            Inflection::Suffixes(suffixes) => suffixes.to_string(),
        });

        if include_derivs {
            view.derived = self
                .lexicon
                .derived_entries(&entry.id)
                .map(|derived| self.render_entry(derived, false))
                .collect();
        }
        view
    }
}

/// Flattens the parts of `analyses`, drops repeated ids and orders them by
/// the first position at which their name appears.
pub fn fix_analysis_parts(analyses: &[Analysis]) -> Vec<String> {
    let part_name = |part: &str| part.split(':').next().unwrap_or(part).to_string();
    let mut parts: Vec<String> = Vec::new();
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    for (position, part) in analyses.iter().flat_map(|a| a.parts.iter()).enumerate() {
        first_seen.entry(part_name(part)).or_insert(position);
        if !parts.contains(part) {
            parts.push(part.clone());
        }
    }
    parts.sort_by_key(|part| first_seen.get(&part_name(part)).copied().unwrap_or(usize::MAX));
    parts
}
