//! Invalidation Module
//!
//! Criteria for bulk removal of entries after a write to backing data.

use regex::Regex;

use crate::error::Result;

// == Invalidation Criterion ==
/// Selects which keys an invalidation removes.
#[derive(Debug, Clone)]
pub enum InvalidationCriterion {
    /// Keys starting with this string
    Prefix(String),
    /// Keys the regex matches anywhere
    Pattern(Regex),
}

impl InvalidationCriterion {
    /// Builds a prefix criterion.
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    /// Compiles `pattern` into a pattern criterion.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidPattern`](crate::error::CacheError::InvalidPattern)
    /// if the regex does not compile.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    /// Returns true if `key` is selected by this criterion.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Prefix(prefix) => key.starts_with(prefix.as_str()),
            Self::Pattern(regex) => regex.is_match(key),
        }
    }
}

impl From<&str> for InvalidationCriterion {
    fn from(prefix: &str) -> Self {
        Self::Prefix(prefix.to_string())
    }
}

impl From<String> for InvalidationCriterion {
    fn from(prefix: String) -> Self {
        Self::Prefix(prefix)
    }
}

impl From<Regex> for InvalidationCriterion {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

impl std::fmt::Display for InvalidationCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prefix(prefix) => write!(f, "prefix '{}'", prefix),
            Self::Pattern(regex) => write!(f, "pattern /{}/", regex.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    #[test]
    fn test_prefix_matches_from_start_only() {
        let criterion = InvalidationCriterion::from("p:a");

        assert!(criterion.matches("p:a:1"));
        assert!(criterion.matches("p:a"));
        assert!(!criterion.matches("p:b:1"));
        assert!(!criterion.matches("x:p:a"));
    }

    #[test]
    fn test_empty_prefix_matches_everything() {
        let criterion = InvalidationCriterion::prefix("");
        assert!(criterion.matches("anything"));
        assert!(criterion.matches(""));
    }

    #[test]
    fn test_pattern_matches_anywhere() {
        let criterion = InvalidationCriterion::pattern(":x$").unwrap();

        assert!(criterion.matches("c:x"));
        assert!(criterion.matches("d:x"));
        assert!(!criterion.matches("c:y"));
    }

    #[test]
    fn test_anchored_pattern() {
        let criterion = InvalidationCriterion::from(Regex::new("^c:").unwrap());

        assert!(criterion.matches("c:x"));
        assert!(!criterion.matches("d:c:x"));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = InvalidationCriterion::pattern("[unclosed");
        assert!(matches!(result, Err(CacheError::InvalidPattern(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(InvalidationCriterion::from("users:").to_string(), "prefix 'users:'");
        assert_eq!(
            InvalidationCriterion::pattern("^c:").unwrap().to_string(),
            "pattern /^c:/"
        );
    }
}
