//! Process-wide probe configuration.
//!
//! The effective pattern is resolved once at startup and never re-read.

use std::env::{self, VarError};
use std::fmt;
use std::time::Duration;

use crate::error::PatternError;
use crate::matcher::Matcher;

/// Environment variable overriding the matching pattern.
pub const PATTERN_ENV: &str = "HYDRO_VERIFY_REGEX";

/// Matches "success" case-insensitively anywhere in the body.
pub const DEFAULT_PATTERN: &str = r"(?i)success";

/// Upper bound on the whole probe request.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Redirects followed before the probe gives up.
pub const MAX_REDIRECTS: usize = 10;

/// Bytes of response body read before the rest is ignored.
pub const MAX_BODY_BYTES: u64 = 10 * 1024 * 1024; // 10MB

/// Where the effective pattern came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSource {
    Flag,
    Env,
    Default,
}

impl fmt::Display for PatternSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => f.write_str("--regex"),
            Self::Env => f.write_str(PATTERN_ENV),
            Self::Default => f.write_str("default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternConfig {
    pattern: String,
    source: PatternSource,
}

impl PatternConfig {
    /// Resolve the pattern from the command-line flag, then the environment,
    /// then the default.
    pub fn resolve(flag: Option<String>) -> Result<Self, PatternError> {
        Self::resolve_with(flag, env::var(PATTERN_ENV))
    }

    /// Resolution against an explicit environment lookup result.
    ///
    /// A variable that is set but empty counts as an explicit pattern.
    pub fn resolve_with(
        flag: Option<String>,
        env_value: Result<String, VarError>,
    ) -> Result<Self, PatternError> {
        if let Some(pattern) = flag {
            return Ok(Self {
                pattern,
                source: PatternSource::Flag,
            });
        }

        match env_value {
            Ok(pattern) => Ok(Self {
                pattern,
                source: PatternSource::Env,
            }),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(_)) => Err(PatternError::NotUnicode { var: PATTERN_ENV }),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn source(&self) -> PatternSource {
        self.source
    }

    pub fn compile(&self) -> Result<Matcher, PatternError> {
        Matcher::new(&self.pattern)
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            source: PatternSource::Default,
        }
    }
}
