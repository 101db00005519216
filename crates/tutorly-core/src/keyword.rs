//! Case-insensitive partial word matching used by search filters.

use std::fmt;

use crate::error::{Result, TutorlyError};

/// A single search keyword: trimmed, non-empty, no internal whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyword(String);

impl Keyword {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TutorlyError::validation(
                "keyword",
                "keyword must not be empty",
            ));
        }
        if trimmed.split_whitespace().count() != 1 {
            return Err(TutorlyError::validation(
                "keyword",
                format!("'{trimmed}' must be a single word"),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Splits `raw` on whitespace into keywords. Fails if there are none.
    pub fn parse_all(raw: &str) -> Result<Vec<Self>> {
        let keywords: Vec<Self> = raw
            .split_whitespace()
            .map(Self::parse)
            .collect::<Result<_>>()?;
        if keywords.is_empty() {
            return Err(TutorlyError::validation(
                "keyword",
                "at least one keyword is required",
            ));
        }
        Ok(keywords)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if any whitespace-separated word of `sentence`
    /// contains this keyword, ignoring case.
    pub fn matches(&self, sentence: &str) -> bool {
        let needle = self.0.to_lowercase();
        sentence
            .split_whitespace()
            .any(|word| word.to_lowercase().contains(&needle))
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns `true` if some word of `sentence` contains `word`, ignoring case.
///
/// Partial matches count:
///
/// ```
/// use tutorly_core::contains_word_ignore_case;
///
/// assert!(contains_word_ignore_case("ABc def", "abc").unwrap());
/// assert!(contains_word_ignore_case("ABc def", "b").unwrap());
/// assert!(!contains_word_ignore_case("ABc def", "ABcd").unwrap());
/// ```
///
/// # Errors
///
/// Returns [`TutorlyError::Validation`] if `word` is blank or has more than
/// one word in it.
pub fn contains_word_ignore_case(sentence: &str, word: &str) -> Result<bool> {
    Ok(Keyword::parse(word)?.matches(sentence))
}
