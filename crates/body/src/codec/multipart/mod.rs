//! Decoder for `multipart/form-data` bodies.
//!
//! The body is split into CRLF delimited lines which drive a two state machine:
//!
//! - `Preamble`: lines before the first boundary are discarded
//! - `Body`: header lines are recorded wherever they appear in the part, other non-empty lines
//!   accumulate into the current part
//!
//! Each boundary line finalizes the current part, the end boundary finishes the body. A body
//! that runs out of lines before the end boundary is malformed.

mod assembler;
mod decoder;

pub use decoder::MultipartDecoder;
