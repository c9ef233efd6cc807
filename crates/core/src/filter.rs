//! The `term` query parameter of the records endpoint.
//!
//! A term is whitespace-separated: `tag:<name>` tokens restrict by tag, the
//! last remaining word is the free-text search word. Interpretation lives on
//! the server; this module mirrors it so the console can show and build
//! filters.

const TAG_PREFIX: &str = "tag:";

/// A parsed filter term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterTerm {
    pub search: Option<String>,
    pub tags: Vec<String>,
}

impl FilterTerm {
    /// Parse a raw term the same way the server does.
    ///
    /// `tag:` with an empty name is ignored; when several free-text words
    /// are given the last one wins.
    pub fn parse(term: &str) -> Self {
        let mut parsed = Self::default();
        for word in term.split_whitespace() {
            match word.strip_prefix(TAG_PREFIX) {
                Some("") => {}
                Some(tag) => parsed.tags.push(tag.to_string()),
                None => parsed.search = Some(word.to_string()),
            }
        }
        parsed
    }

    /// Build a term from a search word and a tag list.
    pub fn new(search: Option<&str>, tags: &[String]) -> Self {
        Self {
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            tags: tags.iter().filter(|t| !t.is_empty()).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.tags.is_empty()
    }

    /// Render back to the wire form.
    pub fn to_term(&self) -> String {
        self.search
            .iter()
            .cloned()
            .chain(self.tags.iter().map(|t| format!("{TAG_PREFIX}{t}")))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_search_and_tags() {
        let term = FilterTerm::parse("foo.com tag:is_scope");
        assert_eq!(term.search.as_deref(), Some("foo.com"));
        assert_eq!(term.tags, vec!["is_scope"]);
    }

    #[test]
    fn parse_ignores_empty_tag() {
        let term = FilterTerm::parse("tag: tag:a");
        assert_eq!(term.search, None);
        assert_eq!(term.tags, vec!["a"]);
    }

    #[test]
    fn last_search_word_wins() {
        let term = FilterTerm::parse("first second");
        assert_eq!(term.search.as_deref(), Some("second"));
    }

    #[test]
    fn empty_term() {
        assert!(FilterTerm::parse("   ").is_empty());
        assert_eq!(FilterTerm::default().to_term(), "");
    }

    #[test]
    fn build_from_parts() {
        let term = FilterTerm::new(Some(" example "), &["a".into(), "".into(), "b".into()]);
        assert_eq!(term.to_term(), "example tag:a tag:b");
        assert_eq!(FilterTerm::parse(&term.to_term()), term);
    }
}
