//! Encoding of the verification result for the host.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;

/// The sole artifact written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub verify: bool,
}

impl VerificationResult {
    pub fn new(verify: bool) -> Self {
        Self { verify }
    }

    /// Serialise as a single line, e.g. `{"verify": true}\n`.
    pub fn to_line(&self) -> serde_json::Result<Vec<u8>> {
        let mut line = Vec::with_capacity(20);
        let mut serializer = serde_json::Serializer::with_formatter(&mut line, SpacedFormatter);
        self.serialize(&mut serializer)?;
        line.push(b'\n');
        Ok(line)
    }

    /// Write the whole line in one call, then flush.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let line = self.to_line().map_err(io::Error::from)?;
        writer.write_all(&line)?;
        writer.flush()
    }
}

/// Compact JSON with `": "` and `", "` separators.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}
