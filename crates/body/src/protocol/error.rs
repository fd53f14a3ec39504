use std::str::Utf8Error;
use thiserror::Error;

/// Reasons a body could not be turned into a [`ParsedBody`](crate::protocol::ParsedBody).
///
/// None of these are fatal: the public entry points log the reason and report "no parsed body",
/// and multipart sub-parts fall back to [`ParsedBody::Raw`](crate::protocol::ParsedBody::Raw).
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("unsupported content type: {content_type:?}")]
    UnsupportedContentType { content_type: String },

    #[error("body is not utf8: {source}")]
    InvalidUtf8 {
        #[from]
        source: Utf8Error,
    },

    #[error("invalid json: {source}")]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },

    #[error("json body has no value")]
    EmptyJson,

    #[error("malformed form entry: {entry:?}")]
    MalformedForm { entry: String },

    #[error("form body has no entries")]
    EmptyForm,

    #[error("multipart body ended without the end boundary")]
    MissingEndBoundary,

    #[error("multipart part number exceed the limit {max_parts}")]
    TooManyParts { max_parts: usize },

    #[error("can't deserialize body: {reason}")]
    Deserialize { reason: String },
}

impl DecodeError {
    pub fn unsupported_content_type<S: ToString>(content_type: S) -> Self {
        Self::UnsupportedContentType { content_type: content_type.to_string() }
    }

    pub fn malformed_form<S: ToString>(entry: S) -> Self {
        Self::MalformedForm { entry: entry.to_string() }
    }

    pub fn too_many_parts(max_parts: usize) -> Self {
        Self::TooManyParts { max_parts }
    }

    pub fn deserialize<S: ToString>(reason: S) -> Self {
        Self::Deserialize { reason: reason.to_string() }
    }
}
