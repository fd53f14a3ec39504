//! HTTP request integration for [`micro_body`]
//!
//! [`BodyParser`] buffers the body of an [`http::Request`], decodes it according to the
//! request's `Content-Type`, and stores the resulting [`ParsedBody`](micro_body::ParsedBody) in
//! the request extensions where [`ParsedBodyExt`] can read it back.
//!
//! Reading the body is bounded by [`BodyParser::body_limit`]. Failing to read or decode a body
//! is never an error for the caller: the request just carries no parsed body, and the reason is
//! logged through `tracing`.

mod body;
mod parser;
mod request;

pub use body::collect_body;
pub use body::BodyError;
pub use body::BoxError;
pub use body::DEFAULT_BODY_LIMIT;
pub use parser::content_type;
pub use parser::BodyParser;
pub use request::ParsedBodyExt;
