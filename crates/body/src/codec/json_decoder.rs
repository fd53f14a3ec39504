use bytes::Bytes;
use serde_json::Value;
use tracing::trace;

use crate::codec::BodyDecoder;
use crate::protocol::{DecodeError, ParsedBody};

/// Decodes `application/json` bodies with `serde_json`.
///
/// A body holding only the json `null` literal carries no value and is treated as a decode
/// failure, like a body that is not json at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonDecoder;

impl BodyDecoder for JsonDecoder {
    fn decode(&self, body: &Bytes) -> Result<ParsedBody, DecodeError> {
        let value: Value = serde_json::from_slice(body)?;
        if value.is_null() {
            trace!("json body is null");
            return Err(DecodeError::EmptyJson);
        }
        Ok(ParsedBody::Json(value))
    }
}
