//! Decode errors.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// A fatal problem with the byte stream.
///
/// Every variant records the byte offset at which it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A read or skip would pass the end of the buffer.
    #[error("stream truncated at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedStream {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A chunk's declared end lies before the current position.
    #[error("invalid length {length} for chunk 0x{id:04X} at offset {offset}")]
    InvalidChunkLength { offset: usize, id: u16, length: u32 },

    /// A string ran to the end of the buffer without a nul terminator.
    #[error("unterminated string starting at offset {offset}")]
    MalformedString { offset: usize },
}

/// The kind of a [`DecodeError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TruncatedStream,
    InvalidChunkLength,
    MalformedString,
}

impl DecodeError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TruncatedStream { .. } => ErrorKind::TruncatedStream,
            Self::InvalidChunkLength { .. } => ErrorKind::InvalidChunkLength,
            Self::MalformedString { .. } => ErrorKind::MalformedString,
        }
    }

    /// Byte offset at which the error was detected.
    #[must_use]
    pub fn offset(&self) -> usize {
        match *self {
            Self::TruncatedStream { offset, .. }
            | Self::InvalidChunkLength { offset, .. }
            | Self::MalformedString { offset } => offset,
        }
    }
}
