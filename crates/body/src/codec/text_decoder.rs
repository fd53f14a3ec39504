use bytes::Bytes;

use crate::codec::BodyDecoder;
use crate::protocol::{DecodeError, ParsedBody};

/// Decodes `text` and `text/*` bodies as utf8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextDecoder;

impl BodyDecoder for TextDecoder {
    fn decode(&self, body: &Bytes) -> Result<ParsedBody, DecodeError> {
        let text = std::str::from_utf8(body)?;
        Ok(ParsedBody::Text(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for text in ["", "hello", "line one\r\nline two", "héllo wörld", "你好，世界", "🦀 emoji"] {
            let body = TextDecoder.decode(&Bytes::from(text)).unwrap();
            assert_eq!(body, ParsedBody::Text(text.to_string()));
        }
    }

    #[test]
    fn test_invalid_utf8() {
        let result = TextDecoder.decode(&Bytes::from_static(b"\xc3\x28"));
        assert!(matches!(result, Err(DecodeError::InvalidUtf8 { .. })));
    }
}
