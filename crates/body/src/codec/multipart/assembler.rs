use std::collections::HashMap;

use bytes::{Bytes, BytesMut};
use tracing::trace;

use crate::codec::header_line::{classify, PartHeader};
use crate::codec::{Dispatch, CRLF};
use crate::protocol::{HeaderKind, ParsedBody, Part};

/// Accumulates the headers and body bytes of the part currently being read.
///
/// Owned by the multipart state machine; [`finish`](PartAssembler::finish) consumes it, so the
/// next segment always starts from a fresh assembler.
#[derive(Debug)]
pub(crate) struct PartAssembler {
    name: Option<String>,
    filename: Option<String>,
    content_type: Option<String>,
    headers: HashMap<HeaderKind, String>,
    body: BytesMut,
}

impl PartAssembler {
    pub(crate) fn new() -> Self {
        Self {
            name: None,
            filename: None,
            content_type: None,
            headers: HashMap::new(),
            body: BytesMut::new(),
        }
    }

    /// Handles one line that is not a boundary.
    ///
    /// Every line is tried as a header first, wherever it appears in the part. A recognized header
    /// is recorded, replacing an earlier header of the same kind, and never reaches the body.
    /// Other non-empty lines are appended to the body, restoring the CRLF the line splitter
    /// removed between them.
    pub(crate) fn push_line(&mut self, line: &Bytes) {
        if let Some(header) = classify(line) {
            self.record(header);
            return;
        }

        if line.is_empty() {
            return;
        }

        if !self.body.is_empty() {
            self.body.extend_from_slice(CRLF);
        }
        self.body.extend_from_slice(line);
    }

    fn record(&mut self, header: PartHeader) {
        trace!(line = header.line(), "read part header");
        let kind = header.kind();
        let line = match header {
            PartHeader::ContentType { line, content_type } => {
                self.content_type = Some(content_type);
                line
            }
            PartHeader::Disposition { line, name, filename } => {
                self.name = name;
                self.filename = filename;
                line
            }
            PartHeader::TransferEncoding { line } => line,
        };
        self.headers.insert(kind, line);
    }

    /// Finalizes the part, decoding its body with the declared content type.
    ///
    /// Returns `None` when no body bytes were accumulated. A body the dispatcher can't decode is
    /// kept untouched as [`ParsedBody::Raw`].
    pub(crate) fn finish<D: Dispatch + ?Sized>(self, dispatcher: &D) -> Option<Part> {
        if self.body.is_empty() {
            trace!("skip part without body");
            return None;
        }

        let body = self.body.freeze();
        let content_type = self.content_type.as_deref().unwrap_or_default();
        let parsed = match dispatcher.dispatch(content_type, &body) {
            Ok(parsed) => parsed,
            Err(e) => {
                trace!(content_type, cause = %e, len = body.len(), "keep part as raw bytes");
                ParsedBody::Raw(body)
            }
        };

        Some(Part::new(self.name, self.filename, self.content_type, self.headers, parsed))
    }
}
