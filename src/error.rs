//! Failure kinds for the verification pipeline.
//!
//! Fatal kinds ([`InputError`], [`PatternError`], output failures) abort the
//! run with a non-zero exit status. [`ProbeFailure`] is absorbed by the
//! pipeline and turned into a `verify: false` result.

use std::fmt;
use std::io;

use thiserror::Error;

/// Failures while decoding the request from standard input.
#[derive(Debug, Error)]
pub enum InputError {
    /// Standard input could not be read to the end.
    #[error("failed to read payload from stdin: {0}")]
    Read(#[source] io::Error),

    /// The payload is not valid JSON.
    #[error("invalid JSON from hydr0g3n: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The payload is valid JSON but not an object.
    #[error("invalid payload from hydr0g3n: expected a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    /// The object has no usable `url` field.
    #[error("missing url in hydr0g3n payload")]
    MissingUrl,
}

/// Failures while resolving or compiling the matching pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid regular expression: {0}")]
    InvalidSyntax(#[from] regex::Error),

    #[error("{var} is not valid unicode")]
    NotUnicode { var: &'static str },
}

/// Transport-level failure of the probe request. Never fatal.
#[derive(Debug, Error)]
pub enum ProbeFailure {
    /// Raised while connecting, waiting for headers or reading the body.
    #[error("request timed out: {0}")]
    Timeout(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("connection failed: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("HTTP {code} - {reason}")]
    Status { code: u16, reason: String },

    #[error("failed to read response body: {0}")]
    Body(#[source] io::Error),

    #[error("{0}")]
    Request(#[source] reqwest::Error),
}

impl ProbeFailure {
    /// Classify an I/O error raised while streaming the response body.
    pub fn from_body_error(err: io::Error) -> Self {
        if is_timeout(&err) {
            Self::Timeout(Box::new(err))
        } else {
            Self::Body(err)
        }
    }
}

/// The blocking body reader wraps reqwest's deadline error in an
/// `io::Error` of kind `Other`, so look inside as well as at the kind.
fn is_timeout(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::TimedOut {
        return true;
    }
    err.get_ref()
        .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
        .is_some_and(reqwest::Error::is_timeout)
}

impl From<reqwest::Error> for ProbeFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(Box::new(err))
        } else if err.is_connect() {
            Self::Connect(err)
        } else {
            Self::Request(err)
        }
    }
}

/// A fatal error: the run ends with a diagnostic and a non-zero exit status.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("failed to write verification result: {0}")]
    Output(#[source] io::Error),
}

/// Stable label for each fatal kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalKind {
    InputMalformed,
    InputMissingField,
    PatternInvalidSyntax,
    OutputWrite,
}

impl FatalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InputMalformed => "input.malformed",
            Self::InputMissingField => "input.missing_field",
            Self::PatternInvalidSyntax => "pattern.invalid_syntax",
            Self::OutputWrite => "output.write",
        }
    }
}

impl fmt::Display for FatalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl VerifyError {
    pub fn kind(&self) -> FatalKind {
        match self {
            Self::Input(InputError::MissingUrl) => FatalKind::InputMissingField,
            Self::Input(_) => FatalKind::InputMalformed,
            Self::Pattern(_) => FatalKind::PatternInvalidSyntax,
            Self::Output(_) => FatalKind::OutputWrite,
        }
    }
}
