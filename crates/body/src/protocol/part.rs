//! One segment of a `multipart/form-data` body.

use std::collections::HashMap;

use crate::protocol::ParsedBody;

/// The part headers the multipart decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    /// `Content-Type`
    ContentType,
    /// `Content-Disposition`
    Disposition,
    /// `Content-Transfer-Encoding`, kept but never applied to the body
    TransferEncoding,
}

/// A finalized multipart part.
///
/// Headers are kept as the original line text, e.g. `Content-Type: text/plain`, and are not
/// re-serialized. The body has already been decoded with the part's own content type, or is
/// [`ParsedBody::Raw`] when that was not possible.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    name: Option<String>,
    filename: Option<String>,
    content_type: Option<String>,
    headers: HashMap<HeaderKind, String>,
    body: ParsedBody,
}

impl Part {
    pub(crate) fn new(
        name: Option<String>,
        filename: Option<String>,
        content_type: Option<String>,
        headers: HashMap<HeaderKind, String>,
        body: ParsedBody,
    ) -> Self {
        Self { name, filename, content_type, headers, body }
    }

    /// The `name` parameter of the `Content-Disposition` header.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The `filename` parameter of the `Content-Disposition` header.
    #[inline]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// The value of the part's `Content-Type` header.
    #[inline]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    #[inline]
    pub fn headers(&self) -> &HashMap<HeaderKind, String> {
        &self.headers
    }

    /// Returns the raw header line recorded for `kind`.
    #[inline]
    pub fn header(&self, kind: HeaderKind) -> Option<&str> {
        self.headers.get(&kind).map(String::as_str)
    }

    #[inline]
    pub fn body(&self) -> &ParsedBody {
        &self.body
    }

    pub fn into_body(self) -> ParsedBody {
        self.body
    }

    /// Returns true if the part was uploaded as a file.
    #[inline]
    pub fn is_file(&self) -> bool {
        self.filename.is_some()
    }
}
