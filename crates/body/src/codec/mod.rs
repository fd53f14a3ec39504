//! Body decoders, one per supported encoding.
//!
//! Every decoder works on a fully buffered body and implements [`BodyDecoder`]:
//!
//! - [`JsonDecoder`]: `application/json`
//! - [`UrlEncodedDecoder`]: `application/x-www-form-urlencoded`
//! - [`TextDecoder`]: `text` and `text/*`
//! - [`MultipartDecoder`]: `multipart/form-data`, decoding each part again through a
//!   [`Dispatch`] implementation
//!
//! [`divide`] and [`classify`] are the line level building blocks of the multipart decoder.

use bytes::Bytes;

use crate::protocol::{DecodeError, ParsedBody};

mod header_line;
mod json_decoder;
mod line_splitter;
mod multipart;
mod text_decoder;
mod urlencoded_decoder;

pub use header_line::classify;
pub use header_line::PartHeader;
pub use json_decoder::JsonDecoder;
pub use line_splitter::divide;
pub use line_splitter::CRLF;
pub use multipart::MultipartDecoder;
pub use text_decoder::TextDecoder;
pub use urlencoded_decoder::UrlEncodedDecoder;

/// Decodes a buffered body into a [`ParsedBody`].
pub trait BodyDecoder {
    /// # Errors
    ///
    /// Returns a [`DecodeError`] describing why `body` doesn't match the decoder's format.
    fn decode(&self, body: &Bytes) -> Result<ParsedBody, DecodeError>;
}

/// Decodes a body given its content type.
///
/// The multipart decoder uses this to decode each part with the part's own content type,
/// [`ContentTypeDispatcher`](crate::ContentTypeDispatcher) being the production implementation.
#[cfg_attr(test, mockall::automock)]
pub trait Dispatch {
    /// # Errors
    ///
    /// Returns [`DecodeError::UnsupportedContentType`] if no decoder handles `content_type`, or
    /// the decoder's own error.
    fn dispatch(&self, content_type: &str, body: &Bytes) -> Result<ParsedBody, DecodeError>;
}
