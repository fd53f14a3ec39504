//! The structured result of decoding a request body.

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::value::MapDeserializer;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::protocol::{DecodeError, Part};

/// A request body decoded according to its declared content type.
///
/// Every variant owns its data, so a `ParsedBody` can outlive the buffer it was decoded from
/// (the [`Raw`](ParsedBody::Raw) variant shares the original allocation through [`Bytes`]).
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    /// `application/json`
    Json(Value),
    /// `application/x-www-form-urlencoded`, the last value wins for a repeated key
    UrlEncoded(HashMap<String, String>),
    /// `text` and `text/*`
    Text(String),
    /// `multipart/form-data`, parts in the order they appear in the body
    Multipart(Vec<Part>),
    /// Bytes no decoder could handle
    Raw(Bytes),
}

/// The variant of a [`ParsedBody`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Json,
    UrlEncoded,
    Text,
    Multipart,
    Raw,
}

impl ParsedBody {
    #[inline]
    pub fn kind(&self) -> BodyKind {
        match self {
            ParsedBody::Json(_) => BodyKind::Json,
            ParsedBody::UrlEncoded(_) => BodyKind::UrlEncoded,
            ParsedBody::Text(_) => BodyKind::Text,
            ParsedBody::Multipart(_) => BodyKind::Multipart,
            ParsedBody::Raw(_) => BodyKind::Raw,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ParsedBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_form(&self) -> Option<&HashMap<String, String>> {
        match self {
            ParsedBody::UrlEncoded(form) => Some(form),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParsedBody::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_parts(&self) -> Option<&[Part]> {
        match self {
            ParsedBody::Multipart(parts) => Some(parts),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&Bytes> {
        match self {
            ParsedBody::Raw(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the first multipart part with the given name.
    ///
    /// Always `None` for bodies that are not [`Multipart`](ParsedBody::Multipart).
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.as_parts()?.iter().find(|part| part.name() == Some(name))
    }

    /// Deserializes a json or form body into `T`.
    ///
    /// Form values are all strings, so the fields of `T` must accept strings.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Deserialize`] if the body is neither json nor form data, or if
    /// its content doesn't fit `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        match self {
            ParsedBody::Json(value) => T::deserialize(value).map_err(DecodeError::deserialize),
            ParsedBody::UrlEncoded(form) => {
                let entries = form.iter().map(|(key, value)| (key.as_str(), value.as_str()));
                let deserializer = MapDeserializer::<_, serde::de::value::Error>::new(entries);
                T::deserialize(deserializer).map_err(DecodeError::deserialize)
            }
            other => Err(DecodeError::deserialize(format!("{:?} body can't be deserialized", other.kind()))),
        }
    }
}
