//! Response body evaluation against the configured pattern.

use regex::Regex;

use crate::error::PatternError;

/// A compiled pattern. Matching is an unanchored search.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Evaluate a probe body. No body means the probe failed, so the
    /// pattern is never consulted and the outcome is `false`.
    pub fn evaluate(&self, body: Option<&str>) -> bool {
        match body {
            Some(body) => self.regex.is_match(body),
            None => false,
        }
    }
}
