//! Raw request body aggregation.
//!
//! Signature verification runs over the exact bytes Stripe signed, so the
//! body is drained into a single buffer before anything parses it.

use axum::body::Bytes;
use futures::{Stream, StreamExt};
use thiserror::Error;

/// One piece of a streamed body.
///
/// Text chunks are taken as their UTF-8 bytes; byte chunks are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyChunk {
    Text(String),
    Bytes(Bytes),
}

impl BodyChunk {
    /// Number of bytes this chunk contributes to the buffer.
    pub fn byte_len(&self) -> usize {
        match self {
            BodyChunk::Text(text) => text.len(),
            BodyChunk::Bytes(bytes) => bytes.len(),
        }
    }

    fn as_bytes(&self) -> &[u8] {
        match self {
            BodyChunk::Text(text) => text.as_bytes(),
            BodyChunk::Bytes(bytes) => bytes,
        }
    }
}

impl From<String> for BodyChunk {
    fn from(text: String) -> Self {
        BodyChunk::Text(text)
    }
}

impl From<&str> for BodyChunk {
    fn from(text: &str) -> Self {
        BodyChunk::Text(text.to_string())
    }
}

impl From<Bytes> for BodyChunk {
    fn from(bytes: Bytes) -> Self {
        BodyChunk::Bytes(bytes)
    }
}

impl From<Vec<u8>> for BodyChunk {
    fn from(bytes: Vec<u8>) -> Self {
        BodyChunk::Bytes(Bytes::from(bytes))
    }
}

/// The body stream yielded an error before it ended.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct BodyError(Box<dyn std::error::Error + Send + Sync>);

impl BodyError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// Drains a chunk stream into one contiguous buffer.
///
/// Consumes the stream exactly once and preserves chunk order. The first
/// stream error aborts aggregation; no partial buffer is returned.
pub async fn aggregate_body<S, C, E>(stream: S) -> Result<Bytes, BodyError>
where
    S: Stream<Item = Result<C, E>>,
    C: Into<BodyChunk>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    futures::pin_mut!(stream);

    let mut buffer = Vec::new();
    while let Some(next) = stream.next().await {
        let chunk: BodyChunk = next.map_err(BodyError::new)?.into();
        buffer.extend_from_slice(chunk.as_bytes());
    }

    Ok(Bytes::from(buffer))
}
