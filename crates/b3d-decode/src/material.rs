//! Material records and the builder that reads them from a material chunk.

use crate::chunk::{ChunkHeader, id};
use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::texture::{Texture, TextureCache};

/// A named surface description.
///
/// Colors are packed as `0xRRGGBB`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient_color: Option<u32>,
    pub diffuse_color: Option<u32>,
    pub specular_color: Option<u32>,
    /// Raw integer amount from the stream. Zero when absent or when stored in
    /// an encoding other than the 16-bit integer form. Read after the nested
    /// chunk's full header; legacy loaders read it over the length field.
    pub transparency: u16,
    pub two_sided: bool,
    pub color_map: Option<Texture>,
    pub specular_map: Option<Texture>,
}

/// Split a packed `0xRRGGBB` color into channels.
#[must_use]
pub fn unpack_rgb(color: u32) -> [u8; 3] {
    [(color >> 16) as u8, (color >> 8) as u8, color as u8]
}

fn pack_rgb([r, g, b]: [u8; 3]) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Read material sub-chunks until the cursor reaches `end`.
///
/// Texture maps are registered in `cache` as they are found.
pub(crate) fn parse_material<C: TextureCache + ?Sized>(
    cursor: &mut ByteCursor<'_>,
    end: usize,
    cache: &mut C,
) -> DecodeResult<Material> {
    let mut material = Material::default();

    while cursor.tell() < end {
        let chunk = ChunkHeader::read(cursor)?;
        match chunk.id {
            id::MATERIAL_NAME => material.name = cursor.read_cstring()?,
            id::AMBIENT_COLOR => material.ambient_color = read_color(cursor)?,
            id::DIFFUSE_COLOR => material.diffuse_color = read_color(cursor)?,
            id::SPECULAR_COLOR => material.specular_color = read_color(cursor)?,
            id::TRANSPARENCY => material.transparency = read_amount(cursor)?,
            id::TWO_SIDED => material.two_sided = true,
            id::COLOR_MAP => material.color_map = Some(read_texture(cursor, &chunk, cache)?),
            id::SPECULAR_MAP => material.specular_map = Some(read_texture(cursor, &chunk, cache)?),
            other => tracing::trace!(
                "Skipping material chunk 0x{other:04X} ({} bytes)",
                chunk.payload_len()
            ),
        }
        chunk.finish(cursor)?;
    }

    Ok(material)
}

/// Read one nested color chunk. Unknown encodings leave the color unset.
fn read_color(cursor: &mut ByteCursor<'_>) -> DecodeResult<Option<u32>> {
    let chunk = ChunkHeader::read(cursor)?;
    let rgb = match chunk.id {
        id::COLOR_F32 => Some([
            float_channel(cursor.read_f32()?),
            float_channel(cursor.read_f32()?),
            float_channel(cursor.read_f32()?),
        ]),
        id::COLOR_24 => Some([cursor.read_u8()?, cursor.read_u8()?, cursor.read_u8()?]),
        _ => None,
    };
    chunk.finish(cursor)?;
    Ok(rgb.map(pack_rgb))
}

#[allow(clippy::cast_sign_loss)]
fn float_channel(value: f32) -> u8 {
    // Saturating: out-of-range and NaN inputs clamp into 0..=255.
    (value * 255.0) as u8
}

/// Read one nested amount chunk. Only the 16-bit integer form is understood;
/// anything else yields 0. The caller moves past the enclosing chunk.
fn read_amount(cursor: &mut ByteCursor<'_>) -> DecodeResult<u16> {
    let chunk = ChunkHeader::read(cursor)?;
    if chunk.id == id::AMOUNT_INT {
        cursor.read_u16()
    } else {
        Ok(0)
    }
}

fn read_texture<C: TextureCache + ?Sized>(
    cursor: &mut ByteCursor<'_>,
    map: &ChunkHeader,
    cache: &mut C,
) -> DecodeResult<Texture> {
    let mut texture = Texture::default();
    while cursor.tell() < map.end() {
        let chunk = ChunkHeader::read(cursor)?;
        if chunk.id == id::MAP_FILENAME {
            texture.url = cursor.read_cstring()?;
        }
        chunk.finish(cursor)?;
    }
    cache.insert(texture.clone());
    Ok(texture)
}
