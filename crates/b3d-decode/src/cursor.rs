//! Positioned little-endian reader over a borrowed byte buffer.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{DecodeError, DecodeResult};

/// Reads little-endian primitives from an immutable buffer.
///
/// The cursor knows nothing about chunks; it only tracks a position and
/// refuses to move past the end of the buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Total length of the underlying buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current absolute position.
    #[must_use]
    pub fn tell(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Bytes left between the position and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Move to an absolute position. Seeking exactly to the end is allowed.
    pub fn seek(&mut self, pos: usize) -> DecodeResult<()> {
        if pos > self.data.len() {
            return Err(DecodeError::TruncatedStream {
                offset: self.pos,
                needed: pos.saturating_sub(self.pos),
                available: self.remaining(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Advance by `n` bytes without interpreting them.
    pub fn skip(&mut self, n: usize) -> DecodeResult<()> {
        self.take(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_f32(&mut self) -> DecodeResult<f32> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    /// Read a nul-terminated string, one byte per character.
    ///
    /// Bytes map directly to the first 256 code points, so arbitrary bytes
    /// never fail to decode. The terminator is consumed but not returned.
    pub fn read_cstring(&mut self) -> DecodeResult<String> {
        let start = self.pos;
        let rest = &self.data[start..];
        let Some(nul) = rest.iter().position(|&b| b == 0) else {
            return Err(DecodeError::MalformedString { offset: start });
        };
        let text = rest[..nul].iter().copied().map(char::from).collect();
        self.pos = start + nul + 1;
        Ok(text)
    }

    fn take(&mut self, n: usize) -> DecodeResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(DecodeError::TruncatedStream {
                offset: self.pos,
                needed: n,
                available: self.remaining(),
            })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }
}
