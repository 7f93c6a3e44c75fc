//! Surface-form generation for glossary terms.
//!
//! A term matches itself plus the fixed `s`/`es` plural suffixes, bounded by
//! word edges, case-insensitively. The surface form actually present in the
//! text is what gets preserved as link display text.

use crate::error::GlossError;
use regex::{Match, Regex};

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A compiled search pattern for one canonical term.
#[derive(Debug, Clone)]
pub struct TermPattern {
    canonical: String,
    regex: Regex,
}

impl TermPattern {
    /// Compile `term` into its searchable pattern.
    ///
    /// The term text is escaped first, so punctuation inside a term (`c++`,
    /// `node.js`) matches literally. Word-boundary assertions are only placed
    /// against edges that are word characters; `\b` next to punctuation would
    /// invert its meaning. Suffix variants are only generated when the term
    /// ends in a word character.
    pub fn compile(term: &str) -> Result<TermPattern, GlossError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(GlossError::Pattern {
                term: String::new(),
                message: "empty term".to_string(),
            });
        }
        let escaped = regex::escape(term);
        let lead = if term.chars().next().is_some_and(is_word_char) {
            r"\b"
        } else {
            ""
        };
        let pattern = if term.chars().last().is_some_and(is_word_char) {
            format!(r"(?i){lead}{escaped}(?:es|s)?\b")
        } else {
            format!(r"(?i){lead}{escaped}")
        };
        let regex = Regex::new(&pattern).map_err(|e| GlossError::Pattern {
            term: term.to_string(),
            message: e.to_string(),
        })?;
        Ok(TermPattern {
            canonical: term.to_string(),
            regex,
        })
    }

    /// The term all surface forms of this pattern resolve to.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// All non-overlapping occurrences in `line`, left to right.
    pub fn find_iter<'r, 'l>(&'r self, line: &'l str) -> impl Iterator<Item = Match<'l>> + 'r
    where
        'l: 'r,
    {
        self.regex.find_iter(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn surfaces(term: &str, line: &str) -> Vec<String> {
        TermPattern::compile(term)
            .unwrap()
            .find_iter(line)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_literal_match() {
        assert_eq!(surfaces("cache", "The cache stores data."), vec!["cache"]);
    }

    #[test]
    fn test_plural_and_case_preserved() {
        assert_eq!(surfaces("cache", "Caches are fast."), vec!["Caches"]);
        assert_eq!(surfaces("class", "two Classes here"), vec!["Classes"]);
    }

    #[test]
    fn test_word_bounded() {
        assert!(surfaces("cache", "cached memcache apache").is_empty());
    }

    #[test]
    fn test_metacharacters_escaped() {
        assert_eq!(surfaces("c++", "I write c++ daily"), vec!["c++"]);
        assert_eq!(surfaces("node.js", "uses node.js here"), vec!["node.js"]);
        // The dot must not act as a wildcard.
        assert!(surfaces("node.js", "nodexjs").is_empty());
    }

    #[test]
    fn test_empty_term_rejected() {
        assert!(matches!(
            TermPattern::compile("   "),
            Err(GlossError::Pattern { .. })
        ));
    }
}
