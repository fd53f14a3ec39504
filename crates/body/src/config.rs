//! Limits applied while decoding untrusted bodies.

/// Default maximum multipart nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Default maximum number of parts in one multipart body.
pub const DEFAULT_MAX_PARTS: usize = 1024;

/// Configuration shared by a [`ContentTypeDispatcher`](crate::ContentTypeDispatcher) and every
/// decoder it creates.
///
/// # Example
/// ```
/// use micro_body::{ContentTypeDispatcher, ParserConfig};
///
/// let config = ParserConfig::new().max_depth(2).max_parts(16);
/// let dispatcher = ContentTypeDispatcher::with_config(config);
/// assert_eq!(dispatcher.config().get_max_depth(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// How many multipart bodies may be nested inside each other.
    max_depth: usize,
    /// How many parts a single multipart body may contain.
    max_parts: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, max_parts: DEFAULT_MAX_PARTS }
    }
}

impl ParserConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum multipart nesting depth.
    ///
    /// A top level multipart body has depth 1; a multipart part nested deeper than this limit is
    /// kept as raw bytes instead of being decoded.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the maximum number of parts in one multipart body.
    #[must_use]
    pub fn max_parts(mut self, count: usize) -> Self {
        self.max_parts = count;
        self
    }

    #[must_use]
    pub fn get_max_depth(&self) -> usize {
        self.max_depth
    }

    #[must_use]
    pub fn get_max_parts(&self) -> usize {
        self.max_parts
    }
}
