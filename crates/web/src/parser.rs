//! Attaches a decoded body to an [`http::Request`].

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, Request};
use http_body::Body as HttpBody;
use micro_body::{ContentTypeDispatcher, ParsedBody, ParserConfig};
use tracing::{trace, warn};

use crate::body::{collect_body, BoxError, DEFAULT_BODY_LIMIT};

/// Reads request bodies and decodes them according to their `Content-Type` header.
///
/// The decoded [`ParsedBody`] is stored in the request extensions, see
/// [`ParsedBodyExt`](crate::ParsedBodyExt). A request whose body can't be read or decoded simply
/// carries no parsed body.
///
/// # Example
/// ```
/// use http::Request;
/// use http_body_util::Full;
/// use micro_body_web::{BodyParser, ParsedBodyExt};
///
/// # async fn run() {
/// let request = Request::post("/submit")
///     .header("content-type", "application/x-www-form-urlencoded")
///     .body(Full::new(bytes::Bytes::from("name=zava&zip=310000")))
///     .unwrap();
///
/// let request = BodyParser::new().parse(request).await;
/// let form = request.parsed_body().and_then(|body| body.as_form()).unwrap();
/// assert_eq!(form["name"], "zava");
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BodyParser {
    dispatcher: ContentTypeDispatcher,
    body_limit: usize,
}

impl Default for BodyParser {
    fn default() -> Self {
        Self { dispatcher: ContentTypeDispatcher::new(), body_limit: DEFAULT_BODY_LIMIT }
    }
}

impl BodyParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { dispatcher: ContentTypeDispatcher::with_config(config), ..Self::default() }
    }

    /// Set the maximum number of body bytes read from a request.
    #[must_use]
    pub fn body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    pub fn get_body_limit(&self) -> usize {
        self.body_limit
    }

    /// Buffers the request body and decodes it.
    ///
    /// The returned request holds the buffered bytes as its body. If reading fails the failure is
    /// logged and the body is empty.
    pub async fn parse<B>(&self, request: Request<B>) -> Request<Bytes>
    where
        B: HttpBody,
        B::Error: Into<BoxError>,
    {
        let (mut parts, body) = request.into_parts();

        let bytes = match collect_body(body, self.body_limit).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(cause = %e, uri = %parts.uri, "failed to read request body");
                return Request::from_parts(parts, Bytes::new());
            }
        };

        if let Some(parsed) = self.parse_bytes(&parts.headers, &bytes) {
            trace!(kind = ?parsed.kind(), "attach parsed body");
            parts.extensions.insert(parsed);
        }

        Request::from_parts(parts, bytes)
    }

    /// Decodes an already buffered body using the `Content-Type` in `headers`.
    pub fn parse_bytes(&self, headers: &HeaderMap, body: &Bytes) -> Option<ParsedBody> {
        let Some(content_type) = content_type(headers) else {
            trace!("request without a readable content type");
            return None;
        };
        self.dispatcher.parse(content_type, body)
    }
}

/// Returns the `Content-Type` header value, if present and visible ascii.
pub fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE)?.to_str().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParsedBodyExt;
    use futures::stream;
    use http::HeaderValue;
    use http_body::Frame;
    use http_body_util::{Full, StreamBody};
    use micro_body::protocol::BodyKind;
    use serde::Deserialize;
    use serde_json::json;
    use std::io;

    fn request(content_type: Option<&str>, body: &'static str) -> Request<Full<Bytes>> {
        let mut builder = Request::post("/upload");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder.body(Full::new(Bytes::from(body))).unwrap()
    }

    #[tokio::test]
    async fn test_json() {
        let request = BodyParser::new().parse(request(Some("application/json; charset=utf-8"), r#"{"id": 7}"#)).await;

        assert_eq!(request.parsed_body(), Some(&ParsedBody::Json(json!({"id": 7}))));
        assert_eq!(request.body(), &Bytes::from(r#"{"id": 7}"#));
    }

    #[tokio::test]
    async fn test_form_into_struct() {
        #[derive(Deserialize, Debug)]
        struct Params {
            name: String,
            zip: String,
        }

        let request =
            BodyParser::new().parse(request(Some("application/x-www-form-urlencoded"), "name=zava&zip=310000")).await;
        let params: Params = request.parsed_body().unwrap().deserialize().unwrap();

        assert_eq!(params.name, "zava");
        assert_eq!(params.zip, "310000");
    }

    #[tokio::test]
    async fn test_multipart() {
        let body = "--XYZ\r\n\
                    Content-Disposition: form-data; name=\"note\"\r\n\
                    Content-Type: text/plain\r\n\
                    \r\n\
                    hello\r\n\
                    --XYZ\r\n\
                    Content-Disposition: form-data; name=\"blob\"\r\n\
                    \r\n\
                    raw-bytes\r\n\
                    --XYZ--\r\n";
        let request = BodyParser::new().parse(request(Some("multipart/form-data; boundary=XYZ"), body)).await;
        let parsed = request.parsed_body().unwrap();

        assert_eq!(parsed.kind(), BodyKind::Multipart);
        assert_eq!(parsed.part("note").unwrap().body().as_text(), Some("hello"));
        assert_eq!(parsed.part("blob").unwrap().body().as_raw().unwrap(), &Bytes::from("raw-bytes"));
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let request = BodyParser::new().parse(request(None, "hello")).await;

        assert!(request.parsed_body().is_none());
        assert_eq!(request.body(), &Bytes::from("hello"));
    }

    #[tokio::test]
    async fn test_unsupported_content_type() {
        let request = BodyParser::new().parse(request(Some("application/octet-stream"), "hello")).await;
        assert!(request.parsed_body().is_none());
    }

    #[tokio::test]
    async fn test_decode_failure() {
        let request = BodyParser::new().parse(request(Some("application/json"), "{broken")).await;
        assert!(request.parsed_body().is_none());
    }

    #[tokio::test]
    async fn test_body_too_large() {
        let request = BodyParser::new().body_limit(4).parse(request(Some("text/plain"), "hello world")).await;

        assert!(request.parsed_body().is_none());
        assert!(request.body().is_empty());
    }

    #[tokio::test]
    async fn test_read_failure() {
        let chunks: Vec<Result<Frame<Bytes>, io::Error>> = vec![Err(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"))];
        let request = Request::post("/upload")
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .body(StreamBody::new(stream::iter(chunks)))
            .unwrap();

        let request = BodyParser::new().parse(request).await;
        assert!(request.parsed_body().is_none());
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_content_type() {
        let mut headers = HeaderMap::new();
        assert_eq!(content_type(&headers), None);

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert_eq!(content_type(&headers), Some("text/plain"));

        headers.insert(CONTENT_TYPE, HeaderValue::from_bytes(b"text/\xffplain").unwrap());
        assert_eq!(content_type(&headers), None);
    }
}
