//! Content type resolution.
//!
//! A content type is matched against an ordered rule list, first match wins:
//!
//! 1. exact essence match: `application/json`, `application/x-www-form-urlencoded`, `text`
//! 2. `text/` prefix
//! 3. `multipart/form-data` prefix, the `boundary` parameter is required
//!
//! The essence is the content type before the first `;`, compared case-sensitively and without
//! trimming. No other wildcard matching is done.

use bytes::Bytes;
use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::codec::{BodyDecoder, Dispatch, JsonDecoder, MultipartDecoder, TextDecoder, UrlEncodedDecoder};
use crate::config::ParserConfig;
use crate::protocol::{DecodeError, ParsedBody};

static RULES: Lazy<[Rule; 5]> = Lazy::new(|| {
    [
        Rule::exact(mime::APPLICATION_JSON.essence_str(), DecoderKind::Json),
        Rule::exact(mime::APPLICATION_WWW_FORM_URLENCODED.essence_str(), DecoderKind::UrlEncoded),
        Rule::exact(mime::TEXT.as_str(), DecoderKind::Text),
        Rule::prefix(&format!("{}/", mime::TEXT.as_str()), DecoderKind::Text),
        Rule::prefix(mime::MULTIPART_FORM_DATA.essence_str(), DecoderKind::Multipart),
    ]
});

#[derive(Debug)]
enum Matcher {
    Exact(String),
    Prefix(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderKind {
    Json,
    UrlEncoded,
    Text,
    Multipart,
}

#[derive(Debug)]
struct Rule {
    matcher: Matcher,
    kind: DecoderKind,
}

impl Rule {
    fn exact(essence: &str, kind: DecoderKind) -> Self {
        Self { matcher: Matcher::Exact(essence.to_string()), kind }
    }

    fn prefix(prefix: &str, kind: DecoderKind) -> Self {
        Self { matcher: Matcher::Prefix(prefix.to_string()), kind }
    }

    fn matches(&self, essence: &str) -> bool {
        match &self.matcher {
            Matcher::Exact(expected) => essence == expected,
            Matcher::Prefix(prefix) => essence.starts_with(prefix.as_str()),
        }
    }
}

/// The decoder selected for a content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoder {
    Json(JsonDecoder),
    UrlEncoded(UrlEncodedDecoder),
    Text(TextDecoder),
    Multipart(MultipartDecoder<ContentTypeDispatcher>),
}

impl BodyDecoder for Decoder {
    fn decode(&self, body: &Bytes) -> Result<ParsedBody, DecodeError> {
        match self {
            Decoder::Json(decoder) => decoder.decode(body),
            Decoder::UrlEncoded(decoder) => decoder.decode(body),
            Decoder::Text(decoder) => decoder.decode(body),
            Decoder::Multipart(decoder) => decoder.decode(body),
        }
    }
}

/// Maps content types to decoders.
///
/// Resolution is a pure lookup, resolving the same content type twice yields equal decoders.
/// A multipart decoder carries a child dispatcher one nesting level deeper, which stops
/// resolving multipart content types once [`ParserConfig::get_max_depth`] is reached.
///
/// # Example
/// ```
/// use bytes::Bytes;
/// use micro_body::{ContentTypeDispatcher, ParsedBody};
///
/// let dispatcher = ContentTypeDispatcher::new();
///
/// let parsed = dispatcher.parse("text/markdown; charset=utf-8", &Bytes::from_static(b"# title"));
/// assert_eq!(parsed, Some(ParsedBody::Text("# title".to_string())));
///
/// assert!(dispatcher.resolve("application/octet-stream").is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentTypeDispatcher {
    config: ParserConfig,
    depth: usize,
}

impl ContentTypeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config, depth: 0 }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Selects the decoder for `content_type`.
    ///
    /// Returns `None` for unsupported content types, for multipart content types without a
    /// usable `boundary` parameter, and for multipart nested deeper than the configured limit.
    pub fn resolve(&self, content_type: &str) -> Option<Decoder> {
        let essence = content_type.split(';').next().unwrap_or_default();
        let rule = RULES.iter().find(|rule| rule.matches(essence))?;

        match rule.kind {
            DecoderKind::Json => Some(Decoder::Json(JsonDecoder)),
            DecoderKind::UrlEncoded => Some(Decoder::UrlEncoded(UrlEncodedDecoder)),
            DecoderKind::Text => Some(Decoder::Text(TextDecoder)),
            DecoderKind::Multipart => self.resolve_multipart(content_type),
        }
    }

    /// Decodes `body` as `content_type`.
    ///
    /// Every failure is reported as `None` and logged at debug level; callers should treat a
    /// missing body as an expected outcome.
    pub fn parse(&self, content_type: &str, body: &Bytes) -> Option<ParsedBody> {
        match self.dispatch(content_type, body) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!(content_type, cause = %e, len = body.len(), "can't decode body");
                None
            }
        }
    }

    fn resolve_multipart(&self, content_type: &str) -> Option<Decoder> {
        let Some(boundary) = boundary_param(content_type) else {
            debug!(content_type, "multipart content type without boundary");
            return None;
        };

        if self.depth >= self.config.get_max_depth() {
            warn!(depth = self.depth, "multipart nesting exceed the limit {}", self.config.get_max_depth());
            return None;
        }

        let nested = Self { config: self.config, depth: self.depth + 1 };
        Some(Decoder::Multipart(MultipartDecoder::new(boundary, nested).max_parts(self.config.get_max_parts())))
    }
}

impl Dispatch for ContentTypeDispatcher {
    fn dispatch(&self, content_type: &str, body: &Bytes) -> Result<ParsedBody, DecodeError> {
        let decoder = self.resolve(content_type).ok_or_else(|| DecodeError::unsupported_content_type(content_type))?;
        decoder.decode(body)
    }
}

/// Returns the `boundary` parameter of a content type, without surrounding quotes.
fn boundary_param(content_type: &str) -> Option<&str> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(mime::BOUNDARY.as_str()))
        .map(|(_, value)| value.trim().trim_matches('"'))
        .filter(|boundary| !boundary.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::HeaderKind;
    use indoc::indoc;
    use serde_json::json;

    fn crlf(body: &str) -> Bytes {
        Bytes::from(body.replace('\n', "\r\n"))
    }

    #[test]
    fn test_exact_match() {
        let dispatcher = ContentTypeDispatcher::new();

        assert_eq!(dispatcher.resolve("application/json"), Some(Decoder::Json(JsonDecoder)));
        assert_eq!(dispatcher.resolve("application/x-www-form-urlencoded"), Some(Decoder::UrlEncoded(UrlEncodedDecoder)));
        assert_eq!(dispatcher.resolve("text"), Some(Decoder::Text(TextDecoder)));
    }

    #[test]
    fn test_parameters_are_stripped() {
        let dispatcher = ContentTypeDispatcher::new();

        assert_eq!(dispatcher.resolve("application/json; charset=UTF-8"), Some(Decoder::Json(JsonDecoder)));
        assert_eq!(dispatcher.resolve("application/x-www-form-urlencoded;charset=utf-8"), Some(Decoder::UrlEncoded(UrlEncodedDecoder)));
    }

    #[test]
    fn test_text_prefix() {
        let dispatcher = ContentTypeDispatcher::new();

        assert_eq!(dispatcher.resolve("text/markdown"), Some(Decoder::Text(TextDecoder)));
        assert_eq!(dispatcher.resolve("text/plain; charset=utf-8"), Some(Decoder::Text(TextDecoder)));
    }

    #[test]
    fn test_unsupported() {
        let dispatcher = ContentTypeDispatcher::new();

        assert!(dispatcher.resolve("application/octet-stream").is_none());
        assert!(dispatcher.resolve("").is_none());
        assert!(dispatcher.resolve("Application/JSON").is_none());
        assert!(dispatcher.resolve("application/json-patch+json").is_none());
        assert!(dispatcher.resolve("texts/plain").is_none());
    }

    #[test]
    fn test_essence_is_not_trimmed() {
        let dispatcher = ContentTypeDispatcher::new();

        assert!(dispatcher.resolve(" application/json").is_none());
        assert!(dispatcher.resolve("application/json ; charset=utf-8").is_none());
        assert!(dispatcher.resolve("text ").is_none());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let dispatcher = ContentTypeDispatcher::new();

        for content_type in ["application/json", "text/html", "multipart/form-data; boundary=abc", "image/png"] {
            assert_eq!(dispatcher.resolve(content_type), dispatcher.resolve(content_type));
        }
    }

    #[test]
    fn test_multipart_boundary() {
        let dispatcher = ContentTypeDispatcher::new();

        let Some(Decoder::Multipart(decoder)) = dispatcher.resolve("multipart/form-data; boundary=----XYZ") else {
            panic!("expect multipart decoder");
        };
        assert_eq!(decoder.boundary(), "----XYZ");

        let Some(Decoder::Multipart(decoder)) = dispatcher.resolve(r#"multipart/form-data; charset=utf-8; boundary="quoted""#) else {
            panic!("expect multipart decoder");
        };
        assert_eq!(decoder.boundary(), "quoted");
    }

    #[test]
    fn test_multipart_without_boundary() {
        let dispatcher = ContentTypeDispatcher::new();

        assert!(dispatcher.resolve("multipart/form-data").is_none());
        assert!(dispatcher.resolve("multipart/form-data; boundary=").is_none());
        assert!(dispatcher.resolve(r#"multipart/form-data; boundary="""#).is_none());
        assert!(dispatcher.resolve("multipart/mixed; boundary=abc").is_none());
    }

    #[test]
    fn test_parse_json() {
        let parsed = ContentTypeDispatcher::new().parse("application/json", &Bytes::from_static(br#"{"id": 1}"#));
        assert_eq!(parsed, Some(ParsedBody::Json(json!({"id": 1}))));
    }

    #[test]
    fn test_parse_failure_is_none() {
        let dispatcher = ContentTypeDispatcher::new();

        assert!(dispatcher.parse("application/json", &Bytes::from_static(b"{")).is_none());
        assert!(dispatcher.parse("text/plain", &Bytes::from_static(b"\xff")).is_none());
        assert!(dispatcher.parse("application/x-www-form-urlencoded", &Bytes::from_static(b"a=1&b")).is_none());
        assert!(dispatcher.parse("image/png", &Bytes::from_static(b"\x89PNG")).is_none());
    }

    #[test]
    fn test_parse_multipart() {
        let body = crlf(indoc! {r#"
            --XYZ
            Content-Disposition: form-data; name="meta"
            Content-Type: application/json

            {"title": "report"}
            --XYZ
            Content-Disposition: form-data; name="form"
            Content-Type: application/x-www-form-urlencoded

            a=1&b=2
            --XYZ
            Content-Disposition: form-data; name="note"
            Content-Type: text/plain; charset=utf-8

            hello
            --XYZ
            Content-Disposition: form-data; name="broken"
            Content-Type: application/json

            {not json
            --XYZ
            Content-Disposition: form-data; name="file"; filename="data.bin"
            Content-Type: application/octet-stream
            Content-Transfer-Encoding: base64

            AAEC
            --XYZ--
        "#});

        let parsed = ContentTypeDispatcher::new().parse("multipart/form-data; boundary=XYZ", &body).unwrap();
        let parts = parsed.as_parts().unwrap();

        assert_eq!(parts.len(), 5);
        assert_eq!(parsed.part("meta").unwrap().body(), &ParsedBody::Json(json!({"title": "report"})));
        assert_eq!(parsed.part("form").unwrap().body().as_form().unwrap().get("b").map(String::as_str), Some("2"));
        assert_eq!(parsed.part("note").unwrap().body().as_text(), Some("hello"));
        assert_eq!(parsed.part("broken").unwrap().body(), &ParsedBody::Raw(Bytes::from_static(b"{not json")));

        let file = parsed.part("file").unwrap();
        assert_eq!(file.filename(), Some("data.bin"));
        assert_eq!(file.header(HeaderKind::TransferEncoding), Some("Content-Transfer-Encoding: base64"));
        assert_eq!(file.body(), &ParsedBody::Raw(Bytes::from_static(b"AAEC")));
    }

    fn nested_body() -> Bytes {
        crlf(indoc! {r#"
            --outer
            Content-Disposition: form-data; name="files"
            Content-Type: multipart/form-data; boundary=inner

            --inner
            first
            --inner
            second
            --inner--
            --outer--
        "#})
    }

    #[test]
    fn test_parse_nested_multipart() {
        let parsed = ContentTypeDispatcher::new().parse("multipart/form-data; boundary=outer", &nested_body()).unwrap();
        let inner = parsed.part("files").unwrap().body().as_parts().unwrap();

        assert_eq!(inner.len(), 2);
        assert_eq!(inner[0].body(), &ParsedBody::Raw(Bytes::from_static(b"first")));
        assert_eq!(inner[1].body(), &ParsedBody::Raw(Bytes::from_static(b"second")));
    }

    #[test]
    fn test_nested_header_line_replaces_part_type() {
        let body = crlf(indoc! {r#"
            --outer
            Content-Disposition: form-data; name="files"
            Content-Type: multipart/form-data; boundary=inner

            --inner
            Content-Type: text/plain

            nested
            --inner--
            --outer--
        "#});

        let parsed = ContentTypeDispatcher::new().parse("multipart/form-data; boundary=outer", &body).unwrap();
        let part = parsed.part("files").unwrap();

        assert_eq!(part.content_type(), Some("text/plain"));
        assert_eq!(part.body().as_text(), Some("--inner\r\nnested\r\n--inner--"));
    }

    #[test]
    fn test_nesting_limit_keeps_raw_part() {
        let dispatcher = ContentTypeDispatcher::with_config(ParserConfig::new().max_depth(1));
        let parsed = dispatcher.parse("multipart/form-data; boundary=outer", &nested_body()).unwrap();

        let raw = parsed.part("files").unwrap().body().as_raw().unwrap();
        assert_eq!(raw.as_ref(), b"--inner\r\nfirst\r\n--inner\r\nsecond\r\n--inner--");
    }

    #[test]
    fn test_zero_depth_rejects_multipart() {
        let dispatcher = ContentTypeDispatcher::with_config(ParserConfig::new().max_depth(0));
        assert!(dispatcher.resolve("multipart/form-data; boundary=abc").is_none());
    }
}
