//! The linear decode → probe → evaluate → encode pipeline.
//!
//! Fatal kinds come back as [`VerifyError`] and nothing is written to the
//! output. A [`ProbeFailure`](crate::error::ProbeFailure) is reported on
//! stderr and evaluated as "no body", which still produces a result.

use std::fmt;
use std::io::{Read, Write};

use crate::config::PatternConfig;
use crate::error::VerifyError;
use crate::input;
use crate::output::VerificationResult;
use crate::probe::Fetcher;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decoding,
    Compiling,
    Probing,
    Evaluating,
    Encoding,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Decoding => "decoding",
            Self::Compiling => "compiling",
            Self::Probing => "probing",
            Self::Evaluating => "evaluating",
            Self::Encoding => "encoding",
        };
        f.write_str(name)
    }
}

fn enter(stage: Stage) {
    tracing::debug!(%stage, "entering stage");
}

/// Run one verification.
///
/// The pattern is compiled before the probe is sent, so an invalid pattern
/// never costs a network request.
pub fn run<R, W, F>(
    input: R,
    output: W,
    config: &PatternConfig,
    fetcher: &F,
) -> Result<VerificationResult, VerifyError>
where
    R: Read,
    W: Write,
    F: Fetcher + ?Sized,
{
    enter(Stage::Decoding);
    let request = input::decode(input)?;
    tracing::debug!(
        url = %request.url,
        method = request.method.as_deref(),
        status_code = request.status_code,
        "decoded verification request"
    );

    enter(Stage::Compiling);
    let matcher = config.compile()?;
    tracing::debug!(pattern = matcher.as_str(), source = %config.source(), "compiled pattern");

    enter(Stage::Probing);
    let body = match fetcher.fetch(&request.url) {
        Ok(body) => Some(body),
        Err(failure) => {
            eprintln!("verification request failed: {failure}");
            tracing::debug!(error = ?failure, "probe failed, forcing verify=false");
            None
        }
    };

    enter(Stage::Evaluating);
    let result = VerificationResult::new(matcher.evaluate(body.as_deref()));

    enter(Stage::Encoding);
    result.write_to(output).map_err(VerifyError::Output)?;
    tracing::debug!(verify = result.verify, "verification result written");

    Ok(result)
}
