use std::collections::HashMap;

use bytes::Bytes;

use crate::codec::BodyDecoder;
use crate::protocol::{DecodeError, ParsedBody};
use crate::utils::ensure;

/// Decodes `application/x-www-form-urlencoded` bodies.
///
/// Decoding is all or nothing: every `&` separated entry must split on `=` into exactly two
/// pieces, otherwise the whole body is rejected. This includes the empty entries produced by a
/// leading, trailing or doubled `&`. Either piece may be empty, and a repeated key keeps its last
/// value. Keys and values are returned as they appear on the wire, without percent-decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlEncodedDecoder;

impl BodyDecoder for UrlEncodedDecoder {
    fn decode(&self, body: &Bytes) -> Result<ParsedBody, DecodeError> {
        let text = std::str::from_utf8(body)?;
        ensure!(!text.is_empty(), DecodeError::EmptyForm);

        let mut form = HashMap::new();
        for entry in text.split('&') {
            let mut pieces = entry.split('=');
            let (Some(key), Some(value), None) = (pieces.next(), pieces.next(), pieces.next()) else {
                return Err(DecodeError::malformed_form(entry));
            };
            form.insert(key.to_string(), value.to_string());
        }

        Ok(ParsedBody::UrlEncoded(form))
    }
}
