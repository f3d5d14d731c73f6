//! Klingon alphabetical ordering.
//!
//! Printed word lists sort by the Klingon alphabet rather than by code
//! point: `ch` follows `b`, `Q` follows `q`, `'` is the last letter. Entries
//! with the same spelling are ordered by simple part of speech and then by
//! homonym number.
//!
//! # Examples
//!
//! ```
//! use qawhaq::utils::sort_key::book_key;
//!
//! let mut names = vec!["tlhIngan", "chab", "Qapla'", "qagh", "batlh"];
//! names.sort_by_key(|name| book_key(name, "n", None));
//! assert_eq!(names, vec!["batlh", "chab", "qagh", "Qapla'", "tlhIngan"]);
//! ```

use indexmap::IndexMap;

use crate::utils::orthography::{LETTERS, letter_index, split_to_letters};

/// Sort key of one entry in book order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookKey {
    letters: Vec<u32>,
    simple_pos: String,
    homonym: u32,
}

/// Maps each grapheme of `name` to its position in the alphabet. Hyphens and
/// whitespace are ignored; anything that is not a Klingon letter sorts after
/// `'` by code point.
fn letter_ranks(name: &str) -> Vec<u32> {
    split_to_letters(name)
        .iter()
        .filter(|letter| letter.as_str() != "-")
        .map(|letter| match letter_index(letter) {
            Some(index) => index as u32,
            None => LETTERS.len() as u32 + letter.chars().next().map_or(0, u32::from),
        })
        .collect()
}

/// Book-order key for an entry. `homonym` is the homophone number, if any.
pub fn book_key(name: &str, simple_pos: &str, homonym: Option<&str>) -> BookKey {
    BookKey {
        letters: letter_ranks(name),
        simple_pos: simple_pos.to_string(),
        homonym: homonym.and_then(|h| h.parse().ok()).unwrap_or(0),
    }
}

/// First Klingon letter of `name`, skipping a leading hyphen.
pub fn first_letter(name: &str) -> Option<&'static str> {
    split_to_letters(name)
        .iter()
        .find(|letter| letter.as_str() != "-")
        .and_then(|letter| letter_index(letter))
        .map(|index| LETTERS[index])
}

/// Groups `items` by the first letter of their name, keeping the input order
/// inside each group. Items whose name starts with no Klingon letter are
/// grouped under `""`. Groups appear in alphabet order.
pub fn group_by_first_letter<T, F>(items: Vec<T>, name: F) -> IndexMap<&'static str, Vec<T>>
where
    F: Fn(&T) -> &str,
{
    let mut groups: IndexMap<&'static str, Vec<T>> = IndexMap::new();
    for item in items {
        let letter = first_letter(name(&item)).unwrap_or("");
        groups.entry(letter).or_default().push(item);
    }
    let rank = |letter: &str| letter_index(letter).unwrap_or(LETTERS.len());
    groups.sort_by(|a, _, b, _| rank(a).cmp(&rank(b)));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_order() {
        let test_cases = [
            (("a", "v", None), ("b", "v", None)),
            (("bach", "n", None), ("baD", "n", None)),
            (("ngeb", "n", None), ("nguv", "v", None)),
            (("nIn", "n", None), ("ngeb", "n", None)),
            (("qagh", "n", None), ("Qagh", "v", None)),
            (("tuj", "n", None), ("tlhIngan", "n", None)),
            (("ya", "n", None), ("'a", "n", None)),
            (("Soj", "n", Some("1")), ("Soj", "n", Some("2"))),
            (("Qap", "n", None), ("Qap", "v", None)),
            (("-oy'", "n", None), ("pa'", "n", None)),
        ];
        for ((a, a_pos, a_hom), (b, b_pos, b_hom)) in test_cases {
            assert!(
                book_key(a, a_pos, a_hom) < book_key(b, b_pos, b_hom),
                "{:?} should sort before {:?}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_first_letter() {
        let test_cases = [
            ("tlhIngan", Some("tlh")),
            ("chab", Some("ch")),
            ("-pu'", Some("p")),
            ("'op", Some("'")),
            ("", None),
            ("123", None),
            ("1a", None),
        ];
        for (name, expected) in test_cases {
            assert_eq!(first_letter(name), expected, "first letter of {:?}", name);
        }
    }

    #[test]
    fn test_group_by_first_letter() {
        let names = vec!["Soj", "'op", "chab", "SuS", "bach"];
        let groups = group_by_first_letter(names, |name| *name);
        let keys: Vec<_> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["b", "ch", "S", "'"]);
        assert_eq!(groups["S"], vec!["Soj", "SuS"]);
    }
}
