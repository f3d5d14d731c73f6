//! Cross-reference tokens embedded in entry text.
//!
//! A token has the shape `{text:type:tag1,tag2}`; type and tags are optional.
//! A compound reference adds `@@`-separated groups, for example
//! `{Qapla' batlh@@Qapla':n, batlh:adv}`.

/// Type of a token that cites a source.
pub const SOURCE_TYPE: &str = "src";
/// Type of a token that points at an external address.
pub const URL_TYPE: &str = "url";
/// Type (and display style) of a sentence.
pub const SENTENCE_TYPE: &str = "sen";
/// Tag that suppresses hyperlinking.
pub const NOLINK_TAG: &str = "nolink";

/// One parsed `{...}` token (without the braces).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossRef<'a> {
    pub text: &'a str,
    pub link_type: &'a str,
    pub tags: Vec<&'a str>,
    /// The `@@`-separated groups of the raw token; the first one is the
    /// `text:type:tags` part.
    pub groups: Vec<&'a str>,
    rest: &'a str,
}

impl<'a> CrossRef<'a> {
    /// Parses the inside of a token.
    ///
    /// # Examples
    ///
    /// ```
    /// use qawhaq::storage::CrossRef;
    ///
    /// let link = CrossRef::parse("Soj:n:1,nolink");
    /// assert_eq!(link.text, "Soj");
    /// assert_eq!(link.link_type, "n");
    /// assert_eq!(link.tags, vec!["1", "nolink"]);
    /// assert_eq!(link.id(), "Soj:n:1");
    /// ```
    pub fn parse(raw: &'a str) -> Self {
        let groups: Vec<&str> = raw.split("@@").collect();
        let mut fields = groups[0].splitn(3, ':');
        let text = fields.next().unwrap_or("");
        let link_type = fields.next().unwrap_or("");
        let rest = fields.next().unwrap_or("");
        let tags = if rest.is_empty() { Vec::new() } else { rest.split(',').collect() };
        Self {
            text,
            link_type,
            tags,
            groups,
            rest,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| *t == tag)
    }

    /// The external address of a `url` token: everything after the type.
    pub fn address(&self) -> &'a str {
        self.rest
    }

    /// Display style: `affix` for text containing a hyphen, otherwise the
    /// link type, otherwise `sen`.
    pub fn style(&self) -> &'a str {
        link_style(self.text, self.link_type)
    }

    /// The entry id this token resolves to.
    pub fn id(&self) -> String {
        entry_id(self.text, self.link_type, &self.tags)
    }

    /// Returns true for token types that can never name an entry.
    pub fn is_external(&self) -> bool {
        self.link_type == SOURCE_TYPE || self.link_type == URL_TYPE
    }
}

/// Display style shared by all renderers.
pub fn link_style<'a>(text: &str, link_type: &'a str) -> &'a str {
    if text.contains('-') {
        "affix"
    } else if !link_type.is_empty() {
        link_type
    } else {
        SENTENCE_TYPE
    }
}

/// Returns true for a homophone tag: digits with an optional trailing `h`.
pub fn is_homophone_tag(tag: &str) -> bool {
    let digits = tag.strip_suffix('h').unwrap_or(tag);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Builds the entry id `text:type[:homophone...]` for a token.
pub fn entry_id<S: AsRef<str>>(text: &str, link_type: &str, tags: &[S]) -> String {
    let mut id = format!("{}:{}", text, link_type);
    for tag in tags {
        let tag: &str = tag.as_ref();
        if is_homophone_tag(tag) {
            id.push(':');
            id.push_str(tag.trim_end_matches('h'));
        }
    }
    id
}

/// A piece of text split at cross-reference tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    /// Inside of a `{...}` token.
    Link(&'a str),
}

/// Splits `text` into plain runs and tokens. An unterminated `{` and what
/// follows it is returned as plain text.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut result = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open + 1..].find('}') else {
            break;
        };
        if open > 0 {
            result.push(Segment::Text(&rest[..open]));
        }
        result.push(Segment::Link(&rest[open + 1..open + 1 + close]));
        rest = &rest[open + 1 + close + 1..];
    }
    if !rest.is_empty() {
        result.push(Segment::Text(rest));
    }
    result
}

/// Ids of every token in `text`, in order of appearance.
pub fn link_ids(text: &str) -> Vec<String> {
    segments(text)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Link(raw) => Some(CrossRef::parse(raw).id()),
            Segment::Text(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cross_ref() {
        let test_cases = [
            ("Soj", "Soj", "", vec![], 1),
            ("Soj:n", "Soj", "n", vec![], 1),
            ("Soj:n:1", "Soj", "n", vec!["1"], 1),
            ("ghoS:v:2h,hyp", "ghoS", "v", vec!["2h", "hyp"], 1),
            ("Qapla' batlh@@Qapla':n, batlh:adv", "Qapla' batlh", "", vec![], 2),
        ];
        for (raw, text, link_type, tags, groups) in test_cases {
            let link = CrossRef::parse(raw);
            assert_eq!(link.text, text, "text of {:?}", raw);
            assert_eq!(link.link_type, link_type, "type of {:?}", raw);
            assert_eq!(link.tags, tags, "tags of {:?}", raw);
            assert_eq!(link.groups.len(), groups, "groups of {:?}", raw);
        }
    }

    #[test]
    fn test_entry_id() {
        let test_cases = [
            ("Soj:n:1", "Soj:n:1"),
            ("Soj:n:1,nolink", "Soj:n:1"),
            ("ghoS:v:2h", "ghoS:v:2"),
            ("Soj:n", "Soj:n"),
            ("Soj", "Soj:"),
            ("-pu':n:suff", "-pu':n"),
        ];
        for (raw, expected) in test_cases {
            assert_eq!(CrossRef::parse(raw).id(), expected, "id of {:?}", raw);
        }
    }

    #[test]
    fn test_url_address_keeps_colons() {
        let link = CrossRef::parse("Klingon Wiki:url:http://klingonwiki.net/");
        assert_eq!(link.address(), "http://klingonwiki.net/");
        assert!(link.is_external());
    }

    #[test]
    fn test_segments() {
        assert_eq!(
            segments("see {Soj:n} and {HoH:v}."),
            vec![
                Segment::Text("see "),
                Segment::Link("Soj:n"),
                Segment::Text(" and "),
                Segment::Link("HoH:v"),
                Segment::Text("."),
            ]
        );
        assert_eq!(segments("broken {Soj:n"), vec![Segment::Text("broken {Soj:n")]);
        assert!(segments("").is_empty());
    }

    #[test]
    fn test_link_ids() {
        assert_eq!(
            link_ids("{Qap:v:1} + {-meH:v:suff}"),
            vec!["Qap:v:1".to_string(), "-meH:v".to_string()]
        );
    }

    #[test]
    fn test_style() {
        assert_eq!(link_style("-pu'", "n"), "affix");
        assert_eq!(link_style("Soj", "n"), "n");
        assert_eq!(link_style("Qapla' batlh", ""), "sen");
    }
}
