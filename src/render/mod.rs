// Cross-reference rendering
//
// Text fields embed `{text:type:tags}` tokens. A `LinkRenderer` turns one
// token into markup; `fix_links` applies it to a whole field. The HTML
// renderer produces search links with tooltips, the LaTeX renderer produces
// `\klingonref` citations for typesetting.

pub mod html;
pub mod latex;

pub use html::HtmlRenderer;
pub use latex::LatexRenderer;

use crate::storage::cross_ref::{Segment, segments};

/// Tag of a hypothetical word.
pub const HYPOTHETICAL_TAG: &str = "hyp";
/// Tag of an extra-canonical word.
pub const EXTRA_CANONICAL_TAG: &str = "extcan";

/// Markup for cross-reference tokens.
pub trait LinkRenderer {
    /// Renders the inside of one `{...}` token.
    fn fix_link(&self, token: &str) -> String;

    /// Renders a full reference to the entry `text:link_type` with `tags`.
    fn render_link(&self, text: &str, link_type: &str, tags: &[&str]) -> String;

    /// Replacement for a newline in rendered text.
    fn line_break(&self) -> &str {
        "<br>"
    }
}

/// Renders every token of `text` with `renderer` and replaces newlines with
/// the renderer's line break. An unterminated `{` is kept as it is.
///
/// # Examples
///
/// ```
/// use qawhaq::render::{LatexRenderer, fix_links};
///
/// let rendered = fix_links(&LatexRenderer, "see {Soj:n:nolink}");
/// assert_eq!(rendered, r"see \klingonref[n]{\klingontext{\mbox{Soj}}}");
/// ```
pub fn fix_links<R: LinkRenderer + ?Sized>(renderer: &R, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in segments(text) {
        match segment {
            Segment::Text(plain) => out.push_str(plain),
            Segment::Link(token) => out.push_str(&renderer.fix_link(token)),
        }
    }
    out.replace('\n', renderer.line_break())
}

/// Homophone number of a reference: the first of 1 to 9 present either as a
/// plain tag (`Some((n, true))`) or as a hidden `nh` tag (`Some((n, false))`).
pub fn homophone_number(tags: &[&str]) -> Option<(u8, bool)> {
    (1..=9u8).find_map(|n| {
        let digit = n.to_string();
        if tags.contains(&digit.as_str()) {
            Some((n, true))
        } else if tags.contains(&format!("{}h", n).as_str()) {
            Some((n, false))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Brackets;

    impl LinkRenderer for Brackets {
        fn fix_link(&self, token: &str) -> String {
            format!("[{}]", token)
        }

        fn render_link(&self, text: &str, _link_type: &str, _tags: &[&str]) -> String {
            text.to_string()
        }
    }

    #[test]
    fn test_fix_links() {
        let test_cases = [
            ("plain", "plain"),
            ("{a:n} and {b:v}", "[a:n] and [b:v]"),
            ("line\nbreak", "line<br>break"),
            ("open {brace", "open {brace"),
            ("{a} {unterminated", "[a] {unterminated"),
        ];
        for (input, expected) in test_cases {
            assert_eq!(fix_links(&Brackets, input), expected, "fix_links of {:?}", input);
        }
    }

    #[test]
    fn test_homophone_number() {
        let test_cases: [(&[&str], Option<(u8, bool)>); 5] = [
            (&[], None),
            (&["2"], Some((2, true))),
            (&["2h"], Some((2, false))),
            (&["nolink", "3h", "1"], Some((1, true))),
            (&["10"], None),
        ];
        for (tags, expected) in test_cases {
            assert_eq!(homophone_number(tags), expected, "homophone of {:?}", tags);
        }
    }
}
