//! Chunk headers and the chunk ids the decoder interprets.

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};

/// Size of a chunk header: `u16` id followed by `u32` length.
pub const HEADER_LEN: usize = 6;

/// Chunk ids understood by the decoder. Anything else is skipped.
pub mod id {
    pub const MAIN: u16 = 0x4D4D;
    pub const EDITOR: u16 = 0x3D3D;
    pub const KEYFRAMER: u16 = 0xB000;

    pub const MATERIAL: u16 = 0xAFFF;
    pub const MATERIAL_NAME: u16 = 0xA000;
    pub const AMBIENT_COLOR: u16 = 0xA010;
    pub const DIFFUSE_COLOR: u16 = 0xA020;
    pub const SPECULAR_COLOR: u16 = 0xA030;
    pub const TRANSPARENCY: u16 = 0xA050;
    pub const TWO_SIDED: u16 = 0xA081;
    pub const COLOR_MAP: u16 = 0xA200;
    pub const SPECULAR_MAP: u16 = 0xA204;
    pub const MAP_FILENAME: u16 = 0xA300;

    pub const COLOR_F32: u16 = 0x0010;
    pub const COLOR_24: u16 = 0x0011;
    pub const AMOUNT_INT: u16 = 0x0030;

    pub const OBJECT: u16 = 0x4000;
    pub const TRIANGLE_MESH: u16 = 0x4100;
    pub const VERTEX_LIST: u16 = 0x4110;
    pub const FACE_LIST: u16 = 0x4120;
    pub const FACE_MATERIALS: u16 = 0x4130;
    pub const MAPPING_COORDS: u16 = 0x4140;
}

/// A decoded chunk header.
///
/// `length` counts the header itself, so the payload ends at
/// `offset + length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Position of the header's first byte.
    pub offset: usize,
    pub id: u16,
    pub length: u32,
    end: usize,
}

impl ChunkHeader {
    /// Read a header at the cursor position.
    ///
    /// A length shorter than the header itself would put the chunk's end
    /// before the payload start, which is an [`DecodeError::InvalidChunkLength`].
    pub fn read(cursor: &mut ByteCursor<'_>) -> DecodeResult<Self> {
        let offset = cursor.tell();
        let id = cursor.read_u16()?;
        let length = cursor.read_u32()?;

        let invalid = DecodeError::InvalidChunkLength { offset, id, length };
        let end = usize::try_from(length)
            .ok()
            .filter(|&len| len >= HEADER_LEN)
            .and_then(|len| offset.checked_add(len))
            .ok_or(invalid)?;

        Ok(Self {
            offset,
            id,
            length,
            end,
        })
    }

    /// Exclusive end offset of the chunk's payload.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn payload_len(&self) -> usize {
        self.end - self.offset - HEADER_LEN
    }

    /// Move the cursor to the end of this chunk, skipping whatever payload
    /// has not been read yet.
    ///
    /// Fails if the cursor already went past the end, meaning the content
    /// did not fit in the declared length.
    pub fn finish(&self, cursor: &mut ByteCursor<'_>) -> DecodeResult<()> {
        let pos = cursor.tell();
        if pos > self.end {
            return Err(DecodeError::InvalidChunkLength {
                offset: self.offset,
                id: self.id,
                length: self.length,
            });
        }
        cursor.skip(self.end - pos)
    }
}
