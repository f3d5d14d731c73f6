//! Checks that every cross-reference in the lexicon resolves.

use log::*;

use crate::storage::cross_ref::{NOLINK_TAG, SOURCE_TYPE, Segment, URL_TYPE, segments};
use crate::storage::{EntryId, Lexicon};

/// A reference that names no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    /// Entry whose text contains the reference
    pub entry_id: String,
    /// The reference without braces
    pub token: String,
    /// Set when the name exists as the first of several homophones, so the
    /// reference only lacks a homophone number
    pub homophone_exists: bool,
}

/// Validates the references of every text field of every entry.
///
/// Compound references are checked group by group, `url` and `src` tokens
/// and `nolink` references are skipped, and homophone `0` stands for every
/// homophone of the word.
///
/// # Examples
///
/// ```
/// use qawhaq::builder::validate_links;
/// use qawhaq::storage::{Entry, Lexicon};
///
/// # fn main() -> qawhaq::Result<()> {
/// let lexicon = Lexicon::new(vec![
///     Entry::new("Soj", "n:1").with_notes("en", "see {Soj:n:2}"),
///     Entry::new("Soj", "n:2").with_notes("en", "see {Soj:n:1} and {Sop:v}"),
/// ])?;
/// let broken = validate_links(&lexicon);
/// assert_eq!(broken.len(), 1);
/// assert_eq!(broken[0].token, "Sop:v");
/// # Ok(())
/// # }
/// ```
pub fn validate_links(lexicon: &Lexicon) -> Vec<BrokenLink> {
    let mut broken = Vec::new();
    for entry in lexicon.entries() {
        for text in entry.text_fields() {
            for segment in segments(text) {
                if let Segment::Link(token) = segment {
                    check_token(lexicon, &entry.id, token, &mut broken);
                }
            }
        }
    }
    info!("Link validation: {} broken references", broken.len());
    broken
}

fn check_token(lexicon: &Lexicon, entry_id: &str, token: &str, broken: &mut Vec<BrokenLink>) {
    if let Some((_, components)) = token.split_once("@@") {
        let components = components.split("@@").next().unwrap_or("");
        for term in components.split(',') {
            check_token(lexicon, entry_id, term.trim_matches(' '), broken);
        }
        return;
    }

    let Some((name, part_of_speech)) = token.split_once(':') else {
        return;
    };
    let mut fields = part_of_speech.splitn(2, ':');
    let link_type = fields.next().unwrap_or("");
    if link_type == URL_TYPE || link_type == SOURCE_TYPE {
        return;
    }
    if fields.next().is_some_and(|flags| flags.split(',').any(|flag| flag == NOLINK_TAG)) {
        return;
    }

    let id = EntryId::from_part_of_speech(name, part_of_speech).to_string();
    if lexicon.contains(&id) {
        return;
    }
    let homophone_exists = lexicon.contains(&format!("{}:1", id));
    if !homophone_exists {
        if let Some(base) = id.strip_suffix(":0") {
            if lexicon.contains(&format!("{}:1", base)) {
                return;
            }
        }
    }

    if homophone_exists {
        warn!("no entry for {{{}}} (homophone exists) in {}", token, entry_id);
    } else {
        warn!("no entry for {{{}}} in {}", token, entry_id);
    }
    broken.push(BrokenLink {
        entry_id: entry_id.to_string(),
        token: token.to_string(),
        homophone_exists,
    });
}
