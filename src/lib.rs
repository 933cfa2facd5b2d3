pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod matcher;
pub mod output;
pub mod pipeline;
pub mod probe;

pub use config::PatternConfig;
pub use error::VerifyError;
pub use output::VerificationResult;
pub use probe::{Fetcher, HttpProber};
