//! Interactive HTML links.

use htmlescape::encode_minimal;
use log::*;

use crate::render::{EXTRA_CANONICAL_TAG, HYPOTHETICAL_TAG, LinkRenderer, homophone_number};
use crate::storage::cross_ref::{CrossRef, NOLINK_TAG, SENTENCE_TYPE, SOURCE_TYPE, URL_TYPE, entry_id, link_style};
use crate::storage::Lexicon;
use crate::utils::url_utils::search_href;

/// Renders references as links into the dictionary search page. Each link
/// carries the referenced entry's definition in `language` as its title.
#[derive(Debug, Clone)]
pub struct HtmlRenderer<'a> {
    lexicon: &'a Lexicon,
    language: String,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(lexicon: &'a Lexicon, language: &str) -> Self {
        HtmlRenderer {
            lexicon,
            language: language.to_string(),
        }
    }
}

impl LinkRenderer for HtmlRenderer<'_> {
    /// # Examples
    ///
    /// ```
    /// use qawhaq::render::{HtmlRenderer, LinkRenderer};
    /// use qawhaq::storage::Lexicon;
    ///
    /// # fn main() -> qawhaq::Result<()> {
    /// let lexicon = Lexicon::new(Vec::new())?;
    /// let renderer = HtmlRenderer::new(&lexicon, "en");
    /// assert_eq!(renderer.fix_link("TKD:src"), "<i>TKD</i>");
    /// assert_eq!(renderer.fix_link("-pu':n:nolink"), "<b class=\"pos-affix\" okrand>-pu'</b>");
    /// # Ok(())
    /// # }
    /// ```
    fn fix_link(&self, token: &str) -> String {
        let link = CrossRef::parse(token);
        if link.has_tag(NOLINK_TAG) {
            format!("<b class=\"pos-{}\" okrand>{}</b>", link.style(), link.text)
        } else if link.link_type == SOURCE_TYPE {
            format!("<i>{}</i>", link.text)
        } else if link.link_type == URL_TYPE {
            format!("<a target=_blank href=\"{}\">{}</a>", link.address(), link.text)
        } else if link.groups.len() == 2 {
            let style = if link.link_type.is_empty() { SENTENCE_TYPE } else { link.link_type };
            format!(
                "<a href=\"{}\" class=\"pos-{}\" okrand>{}</a>",
                search_href(link.text),
                style,
                link.text
            )
        } else {
            self.render_link(link.text, link.link_type, &link.tags)
        }
    }

    fn render_link(&self, text: &str, link_type: &str, tags: &[&str]) -> String {
        let marker = if tags.contains(&HYPOTHETICAL_TAG) {
            "<sup>?</sup>"
        } else if tags.contains(&EXTRA_CANONICAL_TAG) {
            "*"
        } else {
            ""
        };

        let mut homophone = String::new();
        let mut homophone_query = String::new();
        if let Some((number, visible)) = homophone_number(tags) {
            if visible {
                homophone = format!("<sup>{}</sup>", number);
            }
            homophone_query = format!("+pos:{}", number);
        }

        let pos_query = if !link_type.is_empty() && link_type != SENTENCE_TYPE {
            format!("+pos:{}", link_type)
        } else {
            String::new()
        };

        let id = entry_id(text, link_type, tags);
        let title = match self.lexicon.get(&id) {
            Some(entry) => format!(
                " title=\"{}\"",
                encode_minimal(entry.definition.get_unless_translated(&self.language))
            ),
            None => {
                trace!("No entry for link {}", id);
                String::new()
            }
        };

        format!(
            "<a href=\"?q=tlh:&quot;^{}$&quot;{}{}\" class=\"pos-{}\"{}>{}<span okrand>{}</span>{}</a>",
            text.replace(' ', "+"),
            pos_query,
            homophone_query,
            link_style(text, link_type),
            title,
            marker,
            text,
            homophone
        )
    }
}
