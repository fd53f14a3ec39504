use bytes::Bytes;
use tracing::{debug, trace};

use crate::codec::multipart::assembler::PartAssembler;
use crate::codec::{divide, BodyDecoder, Dispatch, CRLF};
use crate::config::DEFAULT_MAX_PARTS;
use crate::protocol::{DecodeError, ParsedBody, Part};
use crate::utils::ensure;
use MultipartState::*;

/// A decoder for `multipart/form-data` bodies with a known boundary.
///
/// Each part is decoded again through the injected [`Dispatch`] using the part's own
/// `Content-Type`; a part it can't decode is kept as [`ParsedBody::Raw`].
///
/// # Example
/// ```
/// use bytes::Bytes;
/// use micro_body::codec::{BodyDecoder, MultipartDecoder};
/// use micro_body::ContentTypeDispatcher;
///
/// let decoder = MultipartDecoder::new("XYZ", ContentTypeDispatcher::new());
/// let body = Bytes::from_static(b"--XYZ\r\nContent-Type: text/plain\r\n\r\nhello\r\n--XYZ--\r\n");
///
/// let parsed = decoder.decode(&body).unwrap();
/// assert_eq!(parsed.as_parts().unwrap()[0].body().as_text(), Some("hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartDecoder<D> {
    boundary: Boundary,
    dispatcher: D,
    max_parts: usize,
}

impl<D: Dispatch> MultipartDecoder<D> {
    /// Creates a decoder for `boundary`, the value of the content type's `boundary` parameter
    /// without the leading `--`.
    pub fn new(boundary: &str, dispatcher: D) -> Self {
        Self { boundary: Boundary::new(boundary), dispatcher, max_parts: DEFAULT_MAX_PARTS }
    }

    /// Set the maximum number of parts, decoding fails beyond it.
    #[must_use]
    pub fn max_parts(mut self, max_parts: usize) -> Self {
        self.max_parts = max_parts;
        self
    }

    pub fn boundary(&self) -> &str {
        &self.boundary.value
    }
}

impl<D: Dispatch> BodyDecoder for MultipartDecoder<D> {
    /// Runs the line state machine over `body`.
    ///
    /// # Returns
    /// - `Ok(ParsedBody::Multipart(parts))` once the end boundary is read
    /// - `Err(DecodeError::MissingEndBoundary)` if the lines run out first
    /// - `Err(DecodeError::TooManyParts)` if the part limit is exceeded
    fn decode(&self, body: &Bytes) -> Result<ParsedBody, DecodeError> {
        let mut state = Preamble;
        let mut parts = Vec::new();

        for line in divide(body, CRLF) {
            let (next, part) = state.step(&line, &self.boundary, &self.dispatcher);

            if let Some(part) = part {
                ensure!(parts.len() < self.max_parts, DecodeError::too_many_parts(self.max_parts));
                trace!(name = part.name(), kind = ?part.body().kind(), "read multipart part");
                parts.push(part);
            }

            if next == End {
                trace!(parts = parts.len(), "finished reading multipart body");
                return Ok(ParsedBody::Multipart(parts));
            }
            state = next;
        }

        debug!(boundary = self.boundary(), "multipart body ended without the end boundary");
        Err(DecodeError::MissingEndBoundary)
    }
}

/// The delimiter lines of one multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Boundary {
    value: String,
    /// `--boundary`
    delimiter: Bytes,
    /// `--boundary--`
    close_delimiter: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundaryLine {
    /// Starts the next part
    Delimiter,
    /// Ends the body
    CloseDelimiter,
}

impl Boundary {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            delimiter: Bytes::from(format!("--{value}")),
            close_delimiter: Bytes::from(format!("--{value}--")),
        }
    }

    /// Matches the start of `line` against the delimiters; trailing bytes are tolerated.
    fn match_line(&self, line: &[u8]) -> Option<BoundaryLine> {
        if line.starts_with(&self.close_delimiter) {
            Some(BoundaryLine::CloseDelimiter)
        } else if line.starts_with(&self.delimiter) {
            Some(BoundaryLine::Delimiter)
        } else {
            None
        }
    }
}

#[derive(Debug)]
enum MultipartState {
    /// Discard lines until the first boundary
    Preamble,
    /// Accumulate the current part until the next boundary
    Body(PartAssembler),
    /// The end boundary has been read
    End,
}

impl PartialEq for MultipartState {
    fn eq(&self, other: &Self) -> bool {
        matches!((self, other), (Preamble, Preamble) | (Body(_), Body(_)) | (End, End))
    }
}

impl MultipartState {
    /// Consumes one line, returning the next state and the part the line finalized, if any.
    fn step<D: Dispatch + ?Sized>(self, line: &Bytes, boundary: &Boundary, dispatcher: &D) -> (MultipartState, Option<Part>) {
        match self {
            Preamble => MultipartState::read_preamble(line, boundary),
            Body(assembler) => MultipartState::read_body(assembler, line, boundary, dispatcher),
            End => (End, None),
        }
    }

    /// # State Transitions
    /// - On a delimiter: move to Body with an empty part
    /// - On the close delimiter: move to End, the body has no parts
    /// - On any other line: stay in Preamble
    fn read_preamble(line: &Bytes, boundary: &Boundary) -> (MultipartState, Option<Part>) {
        match boundary.match_line(line) {
            Some(BoundaryLine::Delimiter) => (Body(PartAssembler::new()), None),
            Some(BoundaryLine::CloseDelimiter) => (End, None),
            None => {
                trace!(len = line.len(), "skip preamble line");
                (Preamble, None)
            }
        }
    }

    /// # State Transitions
    /// - On a delimiter: finalize the current part, stay in Body with an empty part
    /// - On the close delimiter: finalize the current part, move to End
    /// - On any other line: add it to the current part, stay in Body
    fn read_body<D: Dispatch + ?Sized>(
        mut assembler: PartAssembler,
        line: &Bytes,
        boundary: &Boundary,
        dispatcher: &D,
    ) -> (MultipartState, Option<Part>) {
        match boundary.match_line(line) {
            Some(BoundaryLine::Delimiter) => (Body(PartAssembler::new()), assembler.finish(dispatcher)),
            Some(BoundaryLine::CloseDelimiter) => (End, assembler.finish(dispatcher)),
            None => {
                assembler.push_line(line);
                (Body(assembler), None)
            }
        }
    }
}
