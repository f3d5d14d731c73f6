//! Typeset citations for the printed dictionary.

use crate::render::{EXTRA_CANONICAL_TAG, HYPOTHETICAL_TAG, LinkRenderer, homophone_number};
use crate::storage::cross_ref::{CrossRef, NOLINK_TAG, SENTENCE_TYPE, SOURCE_TYPE, URL_TYPE, link_style};

/// Renders references as `\klingonref[style]{...}` with every Klingon word
/// boxed so it is never hyphenated.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexRenderer;

fn mbox_words(text: &str) -> String {
    text.split(' ')
        .map(|word| format!("\\mbox{{{}}}", word))
        .collect::<Vec<_>>()
        .join(" ")
}

impl LatexRenderer {
    fn render_boxed(&self, boxed: &str, link_type: &str, tags: &[&str]) -> String {
        let marker = if tags.contains(&HYPOTHETICAL_TAG) {
            "$^?$"
        } else if tags.contains(&EXTRA_CANONICAL_TAG) {
            "*"
        } else {
            ""
        };
        let homophone = match homophone_number(tags) {
            Some((number, true)) => format!("$^{}$", number),
            _ => String::new(),
        };
        format!(
            "\\klingonref[{}]{{{}\\klingontext{{{}}}{}}}",
            link_style(boxed, link_type),
            marker,
            boxed,
            homophone
        )
    }
}

impl LinkRenderer for LatexRenderer {
    fn fix_link(&self, token: &str) -> String {
        let link = CrossRef::parse(token);
        let external = link.link_type == SOURCE_TYPE || link.link_type == URL_TYPE;
        let boxed = if external { link.text.to_string() } else { mbox_words(link.text) };
        if link.has_tag(NOLINK_TAG) {
            format!(
                "\\klingonref[{}]{{\\klingontext{{{}}}}}",
                link_style(&boxed, link.link_type),
                boxed
            )
        } else if external {
            format!("\\klingonref[{}]{{{}}}", link.link_type, boxed)
        } else if link.groups.len() == 2 {
            let style = if link.link_type.is_empty() { SENTENCE_TYPE } else { link.link_type };
            format!("\\klingonref[{}]{{\\klingontext{{{}}}}}", style, boxed)
        } else {
            self.render_boxed(&boxed, link.link_type, &link.tags)
        }
    }

    fn render_link(&self, text: &str, link_type: &str, tags: &[&str]) -> String {
        self.render_boxed(&mbox_words(text), link_type, tags)
    }

    fn line_break(&self) -> &str {
        "\\\\\n"
    }
}
