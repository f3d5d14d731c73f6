//! Query syntax tree and its evaluation.

use crate::query::operators::FieldTerm;
use crate::storage::Entry;
use crate::utils::orthography::fix_xifan;

/// A bare word of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordTerm {
    pub word: String,
    klingon: String,
    lowercase: String,
}

impl WordTerm {
    pub fn new(word: &str) -> Self {
        WordTerm {
            word: word.to_string(),
            klingon: fix_xifan(word),
            lowercase: word.to_lowercase(),
        }
    }

    /// Matches when the normalized word occurs in the entry name, or a
    /// search tag or definition word of `language` starts with it
    /// (case-insensitive).
    pub fn matches(&self, entry: &Entry, language: &str) -> bool {
        if entry.name.contains(&self.klingon) {
            return true;
        }
        let starts_with = |text: &str| text.to_lowercase().starts_with(&self.lowercase);
        if entry.search_tags_for(language).iter().any(|tag| starts_with(tag.as_str())) {
            return true;
        }
        entry
            .definition
            .get(language)
            .unwrap_or("")
            .split_whitespace()
            .any(starts_with)
    }
}

/// Parsed query. Built per query string and evaluated once per entry.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    Or(Box<QueryNode>, Box<QueryNode>),
    And(Box<QueryNode>, Box<QueryNode>),
    Not(Box<QueryNode>),
    Field(FieldTerm),
    Word(WordTerm),
    /// A missing term; matches every entry.
    All,
}

impl QueryNode {
    /// Evaluates the tree against one entry; `language` selects the
    /// localized fields used by bare words.
    ///
    /// A field term that fails to evaluate counts as not matching; the rest
    /// of the tree is evaluated as usual.
    pub fn evaluate(&self, entry: &Entry, language: &str) -> bool {
        match self {
            QueryNode::Or(a, b) => a.evaluate(entry, language) || b.evaluate(entry, language),
            QueryNode::And(a, b) => a.evaluate(entry, language) && b.evaluate(entry, language),
            QueryNode::Not(a) => !a.evaluate(entry, language),
            QueryNode::Field(term) => term.matches_or_report(entry),
            QueryNode::Word(term) => term.matches(entry, language),
            QueryNode::All => true,
        }
    }

    /// The operands of a top-level `OR` chain, left to right. Any other node
    /// is its own single disjunct.
    pub fn disjuncts(&self) -> Vec<&QueryNode> {
        match self {
            QueryNode::Or(a, b) => {
                let mut nodes = a.disjuncts();
                nodes.extend(b.disjuncts());
                nodes
            }
            node => vec![node],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::operators::OperatorTable;

    fn entry() -> Entry {
        Entry::new("tlhIngan Hol", "n")
            .with_definition("en", "Klingon language")
            .with_definition("de", "klingonische Sprache")
            .with_search_tags("en", &["Klingonese"])
    }

    #[test]
    fn test_word_term() {
        let entry = entry();
        let test_cases = [
            ("xifan", "en", true),
            ("hol", "en", true),
            ("LANG", "en", true),
            ("guage", "en", false),
            ("klingonese", "en", true),
            ("sprache", "de", true),
            ("sprache", "en", false),
            ("Hol", "en", true),
            ("qapla", "en", false),
        ];
        for (word, language, expected) in test_cases {
            assert_eq!(WordTerm::new(word).matches(&entry, language), expected, "{} in {}", word, language);
        }
    }

    #[test]
    fn test_evaluate() {
        let table = OperatorTable::with_locales(["en"]);
        let entry = entry();
        let pos_n = || Box::new(QueryNode::Field(FieldTerm::new(&table, "pos", "n")));
        let pos_v = || Box::new(QueryNode::Field(FieldTerm::new(&table, "pos", "v")));

        assert!(QueryNode::Or(pos_v(), pos_n()).evaluate(&entry, "en"));
        assert!(!QueryNode::And(pos_v(), pos_n()).evaluate(&entry, "en"));
        assert!(QueryNode::Not(pos_v()).evaluate(&entry, "en"));
        assert!(QueryNode::All.evaluate(&entry, "en"));
    }

    #[test]
    fn test_failing_term_only_affects_itself() {
        let table = OperatorTable::with_locales(["en"]);
        let entry = entry();
        let broken = || Box::new(QueryNode::Field(FieldTerm::new(&table, "tlh", "[x")));
        let pos_n = || Box::new(QueryNode::Field(FieldTerm::new(&table, "pos", "n")));

        let test_cases = [
            (QueryNode::Not(broken()), true),
            (QueryNode::Or(broken(), pos_n()), true),
            (QueryNode::Or(pos_n(), broken()), true),
            (QueryNode::And(broken(), pos_n()), false),
            (QueryNode::And(Box::new(QueryNode::Not(broken())), pos_n()), true),
        ];
        for (node, expected) in test_cases {
            assert_eq!(node.evaluate(&entry, "en"), expected, "evaluate {:?}", node);
        }
    }

    #[test]
    fn test_disjuncts() {
        let word = |w: &str| Box::new(QueryNode::Word(WordTerm::new(w)));
        let chain = QueryNode::Or(Box::new(QueryNode::Or(word("a"), word("b"))), word("c"));
        let words: Vec<_> = chain
            .disjuncts()
            .into_iter()
            .map(|node| match node {
                QueryNode::Word(term) => term.word.as_str(),
                _ => "?",
            })
            .collect();
        assert_eq!(words, vec!["a", "b", "c"]);

        let and = QueryNode::And(word("a"), Box::new(QueryNode::Or(word("b"), word("c"))));
        assert_eq!(and.disjuncts().len(), 1);
    }
}
