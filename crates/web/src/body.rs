//! Buffers a request body before decoding.
//!
//! Body decoding needs every byte up front, so the body stream is read to its end here. The
//! read is bounded by a byte limit, which is the only resource bound applied to the transport.

use std::error::Error;

use bytes::Bytes;
use http_body::Body as HttpBody;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use thiserror::Error;
use tracing::trace;

/// The default maximum request body size, 2 MiB.
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

pub type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum BodyError {
    #[error("body size exceed the limit {limit}")]
    TooLarge { limit: usize },

    #[error("failed to read body: {source}")]
    Read { source: BoxError },
}

impl BodyError {
    pub fn too_large(limit: usize) -> Self {
        Self::TooLarge { limit }
    }

    pub fn read<E: Into<BoxError>>(e: E) -> Self {
        Self::Read { source: e.into() }
    }
}

/// Reads `body` to its end, failing once more than `limit` bytes arrive.
///
/// # Errors
///
/// Returns [`BodyError::TooLarge`] when the limit is exceeded and [`BodyError::Read`] when the
/// body itself yields an error.
pub async fn collect_body<B>(body: B, limit: usize) -> Result<Bytes, BodyError>
where
    B: HttpBody,
    B::Error: Into<BoxError>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            trace!(len = bytes.len(), "read request body");
            Ok(bytes)
        }
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => Err(BodyError::too_large(limit)),
        Err(e) => Err(BodyError::read(e)),
    }
}
