//! Tokenizer and recursive-descent parser of the query language.
//!
//! ```text
//! or   := and (("OR" | "TAI") and)*
//! and  := term (("AND" | "JA")? term)*
//! term := "(" or ")" | ("NOT" | "EI") term | field ":" value | word
//! ```
//!
//! A missing term matches everything, so `a AND` means `a`. Tokens left over
//! after the top-level `or` (an unbalanced `)` for example) are ignored.

use lazy_static::lazy_static;
use log::*;
use regex::Regex;

use crate::query::ast::{QueryNode, WordTerm};
use crate::query::operators::{FieldTerm, OperatorTable};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

const OR_KEYWORDS: [&str; 2] = ["OR", "TAI"];
const AND_KEYWORDS: [&str; 2] = ["AND", "JA"];
const NOT_KEYWORDS: [&str; 2] = ["NOT", "EI"];

/// Replaces typographic quotes and backticks with ASCII quotes, collapses
/// whitespace runs to one space and trims.
///
/// # Examples
///
/// ```
/// use qawhaq::query::normalize_query;
///
/// assert_eq!(normalize_query("  Qapla’   “batlh”  "), "Qapla' \"batlh\"");
/// ```
pub fn normalize_query(query: &str) -> String {
    let replaced: String = query
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '`' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            c => c,
        })
        .collect();
    WHITESPACE.replace_all(&replaced, " ").trim().to_string()
}

/// Splits a normalized query into tokens.
///
/// Outside quotes a space ends a token and each parenthesis is a token of
/// its own. A double quote toggles quoted mode and is dropped. Empty tokens
/// are dropped.
pub fn tokenize(query: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in query.chars() {
        match c {
            '"' => quoted = !quoted,
            ' ' if !quoted => tokens.push(std::mem::take(&mut current)),
            '(' | ')' if !quoted => {
                tokens.push(std::mem::take(&mut current));
                tokens.push(c.to_string());
            }
            c => current.push(c),
        }
    }
    tokens.push(current);
    tokens.retain(|token| !token.is_empty());
    tokens
}

/// Parses a query string into a [`QueryNode`] tree.
///
/// # Examples
///
/// ```
/// use qawhaq::query::{parse_query, OperatorTable, QueryNode};
///
/// let operators = OperatorTable::with_locales(["en"]);
/// let tree = parse_query("NOT pos:nodict AND pos:n", &operators);
/// assert!(matches!(tree, QueryNode::And(..)));
/// ```
pub fn parse_query(query: &str, operators: &OperatorTable) -> QueryNode {
    let tokens = tokenize(query);
    let mut parser = QueryParser::new(&tokens, operators);
    let node = parser.parse_or();
    if parser.pos < tokens.len() {
        debug!("Ignoring trailing query tokens: {:?}", &tokens[parser.pos..]);
    }
    node
}

struct QueryParser<'a> {
    tokens: &'a [String],
    pos: usize,
    operators: &'a OperatorTable,
}

impl<'a> QueryParser<'a> {
    fn new(tokens: &'a [String], operators: &'a OperatorTable) -> Self {
        QueryParser {
            tokens,
            pos: 0,
            operators,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn advance(&mut self) -> Option<&'a str> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_or(&mut self) -> QueryNode {
        let mut node = self.parse_and();
        while self.peek().is_some_and(|t| OR_KEYWORDS.contains(&t)) {
            self.advance();
            let right = self.parse_and();
            node = QueryNode::Or(Box::new(node), Box::new(right));
        }
        node
    }

    fn parse_and(&mut self) -> QueryNode {
        let mut node = self.parse_term();
        while let Some(token) = self.peek() {
            if token == ")" || OR_KEYWORDS.contains(&token) {
                break;
            }
            if AND_KEYWORDS.contains(&token) {
                self.advance();
            }
            let right = self.parse_term();
            node = QueryNode::And(Box::new(node), Box::new(right));
        }
        node
    }

    fn parse_term(&mut self) -> QueryNode {
        let Some(token) = self.advance() else {
            return QueryNode::All;
        };
        if token == "(" {
            let inner = self.parse_or();
            // closing parenthesis
            self.advance();
            return inner;
        }
        if NOT_KEYWORDS.contains(&token) {
            return QueryNode::Not(Box::new(self.parse_term()));
        }
        match token.split_once(':') {
            Some((field, value)) => QueryNode::Field(FieldTerm::new(self.operators, field, value)),
            None => QueryNode::Word(WordTerm::new(token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operators() -> OperatorTable {
        OperatorTable::with_locales(["en"])
    }

    fn field(name: &str, value: &str) -> Box<QueryNode> {
        Box::new(QueryNode::Field(FieldTerm::new(&operators(), name, value)))
    }

    fn word(w: &str) -> Box<QueryNode> {
        Box::new(QueryNode::Word(WordTerm::new(w)))
    }

    #[test]
    fn test_normalize_query() {
        let test_cases = [
            ("Qapla'", "Qapla'"),
            ("  Qapla’  batlh ", "Qapla' batlh"),
            ("‘Iw", "'Iw"),
            ("`Iw", "'Iw"),
            ("tlh:“^Qapla'$”", "tlh:\"^Qapla'$\""),
            ("a\t\tb\nc", "a b c"),
        ];
        for (input, expected) in test_cases {
            assert_eq!(normalize_query(input), expected, "normalize {:?}", input);
        }
    }

    #[test]
    fn test_tokenize() {
        let test_cases: [(&str, Vec<&str>); 6] = [
            ("a b", vec!["a", "b"]),
            ("(a OR b) c", vec!["(", "a", "OR", "b", ")", "c"]),
            ("tlh:\"^Qapla' batlh$\"", vec!["tlh:^Qapla' batlh$"]),
            ("\"(not a group)\"", vec!["(not a group)"]),
            ("a  b", vec!["a", "b"]),
            ("", vec![]),
        ];
        for (input, expected) in test_cases {
            assert_eq!(tokenize(input), expected, "tokens of {:?}", input);
        }
    }

    #[test]
    fn test_precedence() {
        let ops = operators();
        let test_cases = [
            ("a OR b c", QueryNode::Or(word("a"), Box::new(QueryNode::And(word("b"), word("c"))))),
            ("a TAI b", QueryNode::Or(word("a"), word("b"))),
            ("NOT a b", QueryNode::And(Box::new(QueryNode::Not(word("a"))), word("b"))),
            ("EI a JA b", QueryNode::And(Box::new(QueryNode::Not(word("a"))), word("b"))),
            (
                "NOT (a b)",
                QueryNode::Not(Box::new(QueryNode::And(word("a"), word("b")))),
            ),
            (
                "NOT pos:nodict AND pos:n",
                QueryNode::And(Box::new(QueryNode::Not(field("pos", "nodict"))), field("pos", "n")),
            ),
        ];
        for (query, expected) in test_cases {
            assert_eq!(parse_query(query, &ops), expected, "tree of {:?}", query);
        }
    }

    #[test]
    fn test_parenthesized_group_is_transparent() {
        let ops = operators();
        assert_eq!(parse_query("(a AND b)", &ops), parse_query("a AND b", &ops));
        assert_eq!(parse_query("((a))", &ops), parse_query("a", &ops));
    }

    #[test]
    fn test_missing_terms() {
        let ops = operators();
        assert_eq!(parse_query("", &ops), QueryNode::All);
        assert_eq!(parse_query("a AND", &ops), QueryNode::And(word("a"), Box::new(QueryNode::All)));
        assert_eq!(parse_query("NOT", &ops), QueryNode::Not(Box::new(QueryNode::All)));
        assert_eq!(parse_query("(a", &ops), *word("a"));
    }

    #[test]
    fn test_trailing_tokens_ignored() {
        let ops = operators();
        assert_eq!(parse_query("a ) b", &ops), *word("a"));
    }

    #[test]
    fn test_field_value_keeps_later_colons() {
        let ops = operators();
        match parse_query("components:Soj:n", &ops) {
            QueryNode::Field(term) => {
                assert_eq!(term.field, "components");
                assert_eq!(term.value, "Soj:n");
            }
            other => panic!("expected a field term, got {:?}", other),
        }
    }
}
