//! Access to the parsed body attached by [`BodyParser`](crate::BodyParser).

use http::Request;
use micro_body::ParsedBody;

/// Reads the [`ParsedBody`] stored in a request's extensions.
pub trait ParsedBodyExt {
    /// Returns the parsed body, `None` if the body couldn't be decoded.
    fn parsed_body(&self) -> Option<&ParsedBody>;

    /// Removes the parsed body from the request, taking ownership of it.
    fn take_parsed_body(&mut self) -> Option<ParsedBody>;
}

impl<T> ParsedBodyExt for Request<T> {
    #[inline]
    fn parsed_body(&self) -> Option<&ParsedBody> {
        self.extensions().get::<ParsedBody>()
    }

    #[inline]
    fn take_parsed_body(&mut self) -> Option<ParsedBody> {
        self.extensions_mut().remove::<ParsedBody>()
    }
}
