//! Free-text search across posts and topics.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::content::{ContentValidationError, required_text};
use super::{PostView, TopicSummary};

/// Longest accepted search term.
pub const SEARCH_TERM_MAX: usize = 100;
/// Most results returned per entity kind.
pub const SEARCH_RESULT_LIMIT: u32 = 50;

/// A validated, trimmed search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Validate a raw query string.
    ///
    /// # Errors
    /// Returns [`ContentValidationError`] when the term is blank or too long.
    pub fn new(raw: &str) -> Result<Self, ContentValidationError> {
        required_text(raw, "q", SEARCH_TERM_MAX).map(Self)
    }

    /// SQL `LIKE` pattern matching the term anywhere, with wildcards escaped.
    ///
    /// # Examples
    /// ```
    /// use forum_backend::domain::SearchTerm;
    ///
    /// let term = SearchTerm::new("100%_sure").expect("valid term");
    /// assert_eq!(term.contains_pattern(), r"%100\%\_sure%");
    /// ```
    #[must_use]
    pub fn contains_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for ch in self.0.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

impl AsRef<str> for SearchTerm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Matching posts and topics, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchResults {
    pub posts: Vec<PostView>,
    pub topics: Vec<TopicSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("rust", "%rust%")]
    #[case(" async ", "%async%")]
    #[case(r"a\b", r"%a\\b%")]
    fn builds_escaped_patterns(#[case] raw: &str, #[case] expected: &str) {
        let term = SearchTerm::new(raw).expect("valid term");
        assert_eq!(term.contains_pattern(), expected);
    }

    #[rstest]
    fn rejects_blank_terms() {
        assert_eq!(
            SearchTerm::new(" "),
            Err(ContentValidationError::Empty { field: "q" })
        );
    }
}
