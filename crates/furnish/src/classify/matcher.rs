//! Word-boundary keyword matching.

use regex::Regex;

use crate::error::Result;
use crate::taxonomy::TaxonomyEntry;

/// One compiled keyword and the label it resolves to.
#[derive(Debug, Clone)]
struct KeywordRule {
    keyword: String,
    label: String,
    pattern: Regex,
}

/// Matches lowercased text against keywords as whole words.
///
/// A keyword matches only at word boundaries, optionally followed by a
/// plural "s": `bed` matches "beds" but not "bedside". Rules are tried in
/// the order they were built; see [`KeywordMatcher::longest_first`].
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    rules: Vec<KeywordRule>,
}

impl KeywordMatcher {
    /// Build a matcher that keeps the given rule order.
    pub fn ordered<'a, I>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let rules = rules
            .into_iter()
            .map(|(keyword, label)| KeywordRule::new(keyword, label))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Build a matcher over taxonomy entries, trying the longest keyword
    /// first. Keywords of equal length keep declaration order.
    pub fn longest_first(entries: &[TaxonomyEntry]) -> Result<Self> {
        let mut rules = entries
            .iter()
            .flat_map(|entry| {
                entry
                    .keywords
                    .iter()
                    .map(move |keyword| (keyword.as_str(), entry.name.as_str()))
            })
            .map(|(keyword, label)| KeywordRule::new(keyword, label))
            .collect::<Result<Vec<_>>>()?;

        // Stable sort keeps declaration order among equal lengths.
        rules.sort_by(|a, b| b.keyword.chars().count().cmp(&a.keyword.chars().count()));
        Ok(Self { rules })
    }

    /// Label of the first rule whose keyword occurs in `text_lower`.
    pub fn find(&self, text_lower: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(text_lower))
            .map(|rule| rule.label.as_str())
    }

    /// Keywords in evaluation order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.keyword.as_str())
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the matcher has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl KeywordRule {
    fn new(keyword: &str, label: &str) -> Result<Self> {
        let keyword = keyword.trim().to_lowercase();
        let pattern = Regex::new(&format!(r"\b{}s?\b", regex::escape(&keyword)))?;
        Ok(Self {
            keyword,
            label: label.to_string(),
            pattern,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_boundary() {
        let matcher = KeywordMatcher::ordered([("bed", "Bed")]).unwrap();
        assert_eq!(matcher.find("canopy bed king"), Some("Bed"));
        assert_eq!(matcher.find("twin beds"), Some("Bed"));
        assert_eq!(matcher.find("bedside table"), None);
        assert_eq!(matcher.find("flatbed"), None);
    }

    #[test]
    fn test_multi_word_keyword_plural() {
        let matcher = KeywordMatcher::ordered([("side table", "Side Table")]).unwrap();
        assert_eq!(matcher.find("pair of side tables"), Some("Side Table"));
        assert_eq!(matcher.find("side/table"), None);
    }

    #[test]
    fn test_longest_first_ordering() {
        let entries = vec![
            TaxonomyEntry::new("Table", ["table"]),
            TaxonomyEntry::new("Table Lamp", ["table lamp", "lamp"]),
        ];
        let matcher = KeywordMatcher::longest_first(&entries).unwrap();

        let keywords: Vec<&str> = matcher.keywords().collect();
        assert_eq!(keywords, vec!["table lamp", "table", "lamp"]);
        assert_eq!(matcher.find("brass table lamp"), Some("Table Lamp"));
        assert_eq!(matcher.find("oak table"), Some("Table"));
    }

    #[test]
    fn test_equal_length_keeps_declaration_order() {
        let entries = vec![
            TaxonomyEntry::new("First", ["alpha"]),
            TaxonomyEntry::new("Second", ["gamma"]),
        ];
        let matcher = KeywordMatcher::longest_first(&entries).unwrap();
        assert_eq!(matcher.find("gamma alpha"), Some("First"));
    }

    #[test]
    fn test_metacharacters_are_escaped() {
        let matcher = KeywordMatcher::ordered([("a.b", "Dotted")]).unwrap();
        assert_eq!(matcher.find("a.b"), Some("Dotted"));
        assert_eq!(matcher.find("axb"), None);
    }

    #[test]
    fn test_empty_matcher() {
        let matcher = KeywordMatcher::default();
        assert!(matcher.is_empty());
        assert_eq!(matcher.find("anything"), None);
    }
}
