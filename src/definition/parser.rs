//! Splits free-text English definitions into structured parts.

use log::*;
use serde::{Deserialize, Serialize};

use crate::definition::rules::DefinitionRules;

/// Part-of-speech subtype of stative ("be") verbs.
pub const BE_VERB_SUBTYPE: &str = "is";

/// One semantic unit of a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionPart {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_keyword: Option<String>,
}

impl DefinitionPart {
    pub fn new<S: Into<String>>(text: S) -> Self {
        DefinitionPart {
            text: text.into(),
            sort_keyword: None,
        }
    }
}

/// A definition split into parts, plus the flags the reverse index needs.
///
/// `global_parenthetical` is only ever set when there are at least two parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDefinition {
    pub parts: Vec<DefinitionPart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_parenthetical: Option<String>,
    pub raw_text: String,
    /// Never expanded into rotations.
    #[serde(default)]
    pub no_permute: bool,
    /// Only the first rotation goes into the reverse index.
    #[serde(default)]
    pub dedup: bool,
    /// Text ends in `, etc.` or ` etc.`.
    #[serde(default)]
    pub etc_suffix: bool,
}

impl ParsedDefinition {
    fn single<S: Into<String>>(part: S, raw_text: &str, etc_suffix: bool) -> Self {
        ParsedDefinition {
            parts: vec![DefinitionPart::new(part)],
            raw_text: raw_text.to_string(),
            etc_suffix,
            ..Default::default()
        }
    }
}

/// Parses a definition with the built-in rule tables.
///
/// `pos_subtype` is the entry's verb subtype; `Some("is")` marks a be-verb.
///
/// # Examples
///
/// ```
/// use qawhaq::definition::parse_definition;
///
/// let parsed = parse_definition("fire, energize (e.g., thrusters)", None);
/// let parts: Vec<_> = parsed.parts.iter().map(|p| p.text.as_str()).collect();
/// assert_eq!(parts, vec!["fire", "energize"]);
/// assert_eq!(parsed.global_parenthetical.as_deref(), Some("e.g., thrusters"));
/// ```
pub fn parse_definition(text: &str, pos_subtype: Option<&str>) -> ParsedDefinition {
    parse_definition_with(text, pos_subtype, &DefinitionRules::default())
}

/// Parses a definition with caller-supplied rule tables.
pub fn parse_definition_with(
    text: &str,
    pos_subtype: Option<&str>,
    rules: &DefinitionRules,
) -> ParsedDefinition {
    let text = text.trim();
    if text.is_empty() {
        return ParsedDefinition::default();
    }
    let is_be_verb = pos_subtype == Some(BE_VERB_SUBTYPE);
    let etc_suffix = text.ends_with(", etc.") || text.ends_with(" etc.");

    if rules.is_guard_case(text) {
        debug!("Guard case, not splitting: {}", text);
        return ParsedDefinition {
            no_permute: true,
            ..ParsedDefinition::single(text, text, etc_suffix)
        };
    }

    let is_sentence = text.ends_with(['.', '!', '?']) && !text.contains([',', ';']);
    let is_reference = text.starts_with('{') && text.ends_with('}');
    if is_sentence || is_reference {
        return ParsedDefinition::single(text, text, false);
    }

    let semicolon_parts = split_outside_parens(text, ';');
    let mut raw_parts: Vec<String> = Vec::new();
    for segment in &semicolon_parts {
        let comma_parts = split_outside_parens(segment, ',');
        if comma_parts.len() <= 1
            || looks_like_item_list(&comma_parts, rules)
            || semicolon_parts.len() > 1
        {
            raw_parts.push(segment.to_string());
        } else {
            raw_parts.extend(comma_parts.into_iter().map(str::to_string));
        }
    }

    match raw_parts.len() {
        0 => {
            return ParsedDefinition {
                raw_text: text.to_string(),
                etc_suffix,
                ..Default::default()
            };
        }
        1 => return ParsedDefinition::single(raw_parts.remove(0), text, etc_suffix),
        _ => {}
    }

    let last = raw_parts.len() - 1;
    let promoted = trailing_parenthetical(&raw_parts[last])
        .filter(|(base, inside)| {
            !base.is_empty() && is_global(&raw_parts[..last], base, inside, rules)
        })
        .map(|(base, inside)| (base.to_string(), inside.to_string()));
    let mut global_parenthetical = None;
    if let Some((base, inside)) = promoted {
        raw_parts[last] = base;
        global_parenthetical = Some(inside);
    }

    let parts: Vec<DefinitionPart> = raw_parts
        .into_iter()
        .map(|text| {
            let sort_keyword = rules.sort_keyword_for(&text).map(str::to_string);
            DefinitionPart { text, sort_keyword }
        })
        .collect();
    let dedup = should_dedup(&parts, is_be_verb, rules);
    if dedup {
        debug!("Deduplicating rotations of: {}", text);
    }

    ParsedDefinition {
        parts,
        global_parenthetical,
        raw_text: text.to_string(),
        no_permute: false,
        dedup,
        etc_suffix,
    }
}

/// A trailing parenthetical counts as global when no earlier part has one and
/// either the rest of the last part is a single word or the parenthetical
/// carries a global marker.
fn is_global(earlier: &[String], base: &str, inside: &str, rules: &DefinitionRules) -> bool {
    if earlier.iter().any(|part| part.contains('(') && part.contains(')')) {
        return false;
    }
    !base.contains(' ') || rules.has_global_marker(inside)
}

/// Splits on `delimiter` at parenthesis depth zero. Pieces are trimmed and
/// empty pieces dropped.
pub fn split_outside_parens(text: &str, delimiter: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            c if c == delimiter && depth == 0 => {
                let piece = text[start..i].trim();
                if !piece.is_empty() {
                    pieces.push(piece);
                }
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    let piece = text[start..].trim();
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Comma pieces that enumerate items ("sink for cleaning hands, face, food")
/// rather than list alternatives.
fn looks_like_item_list(pieces: &[&str], rules: &DefinitionRules) -> bool {
    if pieces.len() <= 1 {
        return false;
    }
    let short_pieces = pieces
        .iter()
        .filter(|piece| piece.split_whitespace().count() == 1 && piece.chars().count() < 10)
        .count();
    let first = pieces[0].to_lowercase();
    let preposition_follows = rules
        .list_prepositions
        .iter()
        .any(|prep| first.contains(&format!(" {} ", prep)));
    if preposition_follows && short_pieces + 1 >= pieces.len() {
        return true;
    }
    pieces.iter().any(|piece| piece.to_lowercase().contains("etc"))
}

/// Splits `"base (inside)"` into its trimmed halves. Returns `None` when the
/// text does not end with a balanced parenthetical.
pub fn trailing_parenthetical(text: &str) -> Option<(&str, &str)> {
    let text = text.trim();
    if !text.ends_with(')') {
        return None;
    }
    let mut depth = 0;
    for (i, ch) in text.char_indices().rev() {
        match ch {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    let inside = &text[i + 1..text.len() - 1];
                    return Some((text[..i].trim(), inside.trim()));
                }
            }
            _ => {}
        }
    }
    None
}

fn should_dedup(parts: &[DefinitionPart], is_be_verb: bool, rules: &DefinitionRules) -> bool {
    let [first, second] = parts else {
        return false;
    };
    let p0 = first.text.trim().to_lowercase();
    let p1 = second.text.trim().to_lowercase();

    if rules
        .dedup_pairs
        .iter()
        .any(|(a, b)| p0.starts_with(a.as_str()) || p0.starts_with(b.as_str()))
    {
        return true;
    }

    if is_be_verb || p0.starts_with("be ") {
        shared_prefix(&p0, &p1, 7)
    } else if rules.dedup_skip_prefixes.iter().any(|prefix| p0.starts_with(prefix.as_str())) {
        false
    } else {
        shared_prefix(&p0, &p1, 3)
    }
}

fn shared_prefix(a: &str, b: &str, len: usize) -> bool {
    let a: Vec<char> = a.chars().take(len).collect();
    let b: Vec<char> = b.chars().take(len).collect();
    a.len() == len && a == b
}
