//! Content-type driven decoding of buffered HTTP request bodies
//!
//! This crate turns the raw bytes of a request body into a [`ParsedBody`], choosing the decoder
//! from the request's `Content-Type`:
//!
//! - `application/json` → [`ParsedBody::Json`]
//! - `application/x-www-form-urlencoded` → [`ParsedBody::UrlEncoded`]
//! - `text` and `text/*` → [`ParsedBody::Text`]
//! - `multipart/form-data; boundary=...` → [`ParsedBody::Multipart`], every part decoded again
//!   with its own content type, or kept as [`ParsedBody::Raw`] bytes
//!
//! The whole body must be buffered before decoding; reading it from the connection is left to
//! the caller.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use micro_body::{parse_body, ParsedBody};
//!
//! let body = Bytes::from_static(
//!     b"--XYZ\r\n\
//!       Content-Disposition: form-data; name=\"greeting\"\r\n\
//!       Content-Type: text/plain\r\n\
//!       \r\n\
//!       hello\r\n\
//!       --XYZ\r\n\
//!       Content-Disposition: form-data; name=\"blob\"\r\n\
//!       \r\n\
//!       raw-bytes\r\n\
//!       --XYZ--\r\n",
//! );
//!
//! let parsed = parse_body("multipart/form-data; boundary=XYZ", &body).unwrap();
//!
//! assert_eq!(parsed.part("greeting").unwrap().body().as_text(), Some("hello"));
//! assert_eq!(parsed.part("blob").unwrap().body(), &ParsedBody::Raw(Bytes::from_static(b"raw-bytes")));
//! ```
//!
//! # Error Handling
//!
//! Decoding never fails loudly. Unsupported content types, malformed bodies and multipart bodies
//! without an end boundary all produce `None` from [`parse_body`] and
//! [`ContentTypeDispatcher::parse`]; the reason is logged through `tracing` at debug level.
//! A multipart part that can't be decoded doesn't fail its body: it is kept as
//! [`ParsedBody::Raw`]. [`Dispatch::dispatch`](codec::Dispatch::dispatch) exposes the
//! underlying [`DecodeError`](protocol::DecodeError) for callers that want it.
//!
//! # Limits
//!
//! [`ParserConfig`] bounds multipart nesting depth and the number of parts per multipart body.

pub mod codec;
pub mod protocol;

mod config;
mod dispatch;
mod utils;

pub use config::ParserConfig;
pub use config::DEFAULT_MAX_DEPTH;
pub use config::DEFAULT_MAX_PARTS;
pub use dispatch::ContentTypeDispatcher;
pub use dispatch::Decoder;
pub use protocol::ParsedBody;
pub use protocol::Part;

use bytes::Bytes;

/// Decodes `body` according to `content_type` with the default [`ParserConfig`].
///
/// Returns `None` if the content type is not supported or the body doesn't match it.
pub fn parse_body(content_type: &str, body: &Bytes) -> Option<ParsedBody> {
    ContentTypeDispatcher::new().parse(content_type, body)
}
