//! Decoding of the verification request from standard input.

use std::io::Read;

use serde_json::Value;

use crate::error::InputError;

/// The URL to re-check, plus whatever hit metadata the host attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub url: String,
    /// Method of the request that produced the original hit.
    pub method: Option<String>,
    /// Status code of the original hit.
    pub status_code: Option<u16>,
}

/// Read the whole payload and decode it.
pub fn decode<R: Read>(mut reader: R) -> Result<VerificationRequest, InputError> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw).map_err(InputError::Read)?;
    decode_slice(&raw)
}

/// Decode an already-buffered payload.
///
/// Unknown fields are ignored. A `url` that is absent, `null`, not a string
/// or empty is reported as missing.
pub fn decode_slice(raw: &[u8]) -> Result<VerificationRequest, InputError> {
    let value: Value = serde_json::from_slice(raw).map_err(InputError::Malformed)?;

    let fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(InputError::NotAnObject {
                found: json_type_name(&other),
            })
        }
    };

    let url = match fields.get("url") {
        Some(Value::String(url)) if !url.is_empty() => url.clone(),
        _ => return Err(InputError::MissingUrl),
    };

    let method = fields
        .get("method")
        .and_then(Value::as_str)
        .map(str::to_string);
    let status_code = fields
        .get("status_code")
        .and_then(Value::as_u64)
        .and_then(|code| u16::try_from(code).ok());

    Ok(VerificationRequest {
        url,
        method,
        status_code,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
