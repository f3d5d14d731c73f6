//! Klingon orthography helpers.
//!
//! Klingon is written with case-sensitive Latin letters and several digraphs
//! (`ch`, `gh`, `ng`) and one trigraph (`tlh`). Users frequently type a
//! simplified spelling, usually called *xifan*, in which every letter is lower
//! case and the multi-letter sounds are replaced by single ASCII letters.
//! [`fix_xifan`] converts that spelling back into the canonical one.
//!
//! # Examples
//!
//! ```
//! use qawhaq::utils::orthography::{fix_xifan, split_to_letters};
//!
//! assert_eq!(fix_xifan("qapla'"), "qapla'");
//! assert_eq!(fix_xifan("xifan hol"), "tlhIngan Hol");
//! assert_eq!(split_to_letters("tlhIngan"), vec!["tlh", "I", "ng", "a", "n"]);
//! ```

/// The Klingon alphabet in dictionary order.
pub const LETTERS: [&str; 26] = [
    "a", "b", "ch", "D", "e", "gh", "H", "I", "j", "l", "m", "n", "ng", "o", "p", "q", "Q",
    "r", "S", "t", "tlh", "u", "v", "w", "y", "'",
];

const VOWELS: [&str; 5] = ["a", "e", "I", "o", "u"];

/// Converts xifan spelling into canonical Klingon orthography.
///
/// The conversion is a single left-to-right scan over the input:
///
/// - `i`, `d`, `s` become `I`, `D`, `S`;
/// - `h` becomes `H` unless it closes `ch`, `gh` or `tlh` (an `l` at the start
///   of the text also keeps a following `h` lower case);
/// - `x` becomes `tlh` and `f` becomes `ng`;
/// - `c` becomes `ch` unless an `h` already follows;
/// - `g` becomes `gh` unless it closes `ng` or an `h` already follows.
///
/// Every decision looks at the unconverted neighbours, so no letter is ever
/// rewritten twice. Text without any of the letters `i d s h x f c g` is
/// returned unchanged.
pub fn fix_xifan(query: &str) -> String {
    let chars: Vec<char> = query.chars().collect();
    let mut out = String::with_capacity(query.len() + 8);
    for (i, &ch) in chars.iter().enumerate() {
        let prev = if i > 0 { Some(chars[i - 1]) } else { None };
        let next = chars.get(i + 1).copied();
        match ch {
            'i' => out.push('I'),
            'd' => out.push('D'),
            's' => out.push('S'),
            'h' => {
                let closes_digraph = match prev {
                    Some('c') | Some('g') => true,
                    Some('l') => i < 2 || chars[i - 2] == 't',
                    _ => false,
                };
                out.push(if closes_digraph { 'h' } else { 'H' });
            }
            'x' => out.push_str("tlh"),
            'f' => out.push_str("ng"),
            'c' => {
                out.push('c');
                if next != Some('h') {
                    out.push('h');
                }
            }
            'g' => {
                out.push('g');
                if !out[..out.len() - 1].ends_with('n') && next != Some('h') {
                    out.push('h');
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Splits a word into Klingon letters, treating `tlh`, `ch`, `gh` and `ng` as
/// single letters (`ngh` is always `n` + `gh`). Whitespace is skipped; any
/// other character that is not a Klingon letter is returned as a letter of its
/// own.
pub fn split_to_letters(word: &str) -> Vec<String> {
    let mut letters = Vec::new();
    let mut rest = word;
    while let Some(ch) = rest.chars().next() {
        if ch.is_whitespace() {
            rest = &rest[ch.len_utf8()..];
            continue;
        }
        let len = if rest.starts_with("ngh") {
            1
        } else {
            ["tlh", "ch", "gh", "ng"]
                .iter()
                .find(|digraph| rest.starts_with(*digraph))
                .map(|digraph| digraph.len())
                .unwrap_or(ch.len_utf8())
        };
        letters.push(rest[..len].to_string());
        rest = &rest[len..];
    }
    letters
}

/// Returns true if `letter` is a Klingon vowel.
pub fn is_vowel(letter: &str) -> bool {
    VOWELS.contains(&letter)
}

/// Splits each space-separated word of `text` into syllables.
///
/// Klingon syllables always start with a consonant followed by a vowel, so a
/// new syllable begins at every consonant that is directly followed by a vowel.
pub fn split_to_syllables(text: &str) -> Vec<String> {
    let mut syllables = Vec::new();
    for word in text.split_whitespace() {
        let letters = split_to_letters(word);
        let mut current = String::new();
        for (i, letter) in letters.iter().enumerate() {
            let starts_syllable = !is_vowel(letter)
                && letters.get(i + 1).is_some_and(|next| is_vowel(next));
            if starts_syllable && !current.is_empty() {
                syllables.push(std::mem::take(&mut current));
            }
            current.push_str(letter);
        }
        if !current.is_empty() {
            syllables.push(current);
        }
    }
    syllables
}

/// Position of a letter in the Klingon alphabet, or `None` for anything else.
pub fn letter_index(letter: &str) -> Option<usize> {
    LETTERS.iter().position(|l| *l == letter)
}

/// Page name used by the Klingon Wiki for an entry name: spaces removed, `q`
/// written as `k`, the apostrophe as `-`, then capitalised.
pub fn wiki_name(name: &str) -> String {
    let joined: String = split_to_letters(name)
        .into_iter()
        .map(|letter| match letter.as_str() {
            "q" => "k".to_string(),
            "'" => "-".to_string(),
            _ => letter,
        })
        .collect();
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_xifan() {
        let test_cases = [
            ("xifan hol", "tlhIngan Hol"),
            ("qapla'", "qapla'"),
            ("cuq", "chuq"),
            ("chuq", "chuq"),
            ("gach", "ghach"),
            ("ghach", "ghach"),
            ("fan", "ngan"),
            ("ngan", "ngan"),
            ("dot", "Dot"),
            ("soj", "Soj"),
            ("hoh", "HoH"),
            ("lh", "lh"),
            ("alh", "alH"),
            ("tlh", "tlh"),
            ("jih", "jIH"),
            ("hh", "HH"),
            ("fg", "nggh"),
            ("", ""),
        ];
        for (input, expected) in test_cases {
            assert_eq!(fix_xifan(input), expected, "fix_xifan({:?})", input);
        }
    }

    #[test]
    fn test_fix_xifan_leaves_text_without_trigger_letters() {
        for text in ["Qapla'", "batlh", "tlhIngan", "Soj", "ngan", "QaD", "mu'tay'", "Huch"] {
            let stripped: String = text.chars().filter(|c| !"idshxfcg".contains(*c)).collect();
            assert_eq!(fix_xifan(&stripped), stripped, "text {:?} should be untouched", stripped);
        }
    }

    #[test]
    fn test_split_to_letters() {
        let test_cases = [
            ("tlhIngan", vec!["tlh", "I", "ng", "a", "n"]),
            ("Qapla'", vec!["Q", "a", "p", "l", "a", "'"]),
            ("ghargh", vec!["gh", "a", "r", "gh"]),
            ("-pu'", vec!["-", "p", "u", "'"]),
            ("Sanghom", vec!["S", "a", "n", "gh", "o", "m"]),
            ("Soj Hol", vec!["S", "o", "j", "H", "o", "l"]),
        ];
        for (input, expected) in test_cases {
            assert_eq!(split_to_letters(input), expected, "split_to_letters({:?})", input);
        }
    }

    #[test]
    fn test_split_to_syllables() {
        let test_cases = [
            ("tlhIngan", vec!["tlhI", "ngan"]),
            ("Qapla'", vec!["Qap", "la'"]),
            ("yIntagh", vec!["yIn", "tagh"]),
            ("tlhIngan Hol", vec!["tlhI", "ngan", "Hol"]),
            ("Sanghom", vec!["San", "ghom"]),
            ("ba'", vec!["ba'"]),
        ];
        for (input, expected) in test_cases {
            assert_eq!(split_to_syllables(input), expected, "split_to_syllables({:?})", input);
        }
    }

    #[test]
    fn test_wiki_name() {
        assert_eq!(wiki_name("Qapla'"), "Qapla-");
        assert_eq!(wiki_name("qagh"), "Kagh");
        assert_eq!(wiki_name("tlhIngan Hol"), "Tlhinganhol");
    }

    #[test]
    fn test_letter_index_follows_alphabet() {
        assert_eq!(letter_index("a"), Some(0));
        assert_eq!(letter_index("ch"), Some(2));
        assert_eq!(letter_index("'"), Some(25));
        assert_eq!(letter_index("x"), None);
    }
}
