//! Decoded body types and errors.
//!
//! - [`ParsedBody`]: the decoded body, one variant per supported encoding plus a raw fallback
//! - [`Part`]: one segment of a multipart body, with its own headers and decoded body
//! - [`DecodeError`]: why a body could not be decoded

mod parsed_body;
pub use parsed_body::BodyKind;
pub use parsed_body::ParsedBody;

mod part;
pub use part::HeaderKind;
pub use part::Part;

mod error;
pub use error::DecodeError;
