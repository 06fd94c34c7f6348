//! Decode chunked B3D mesh files.
//!
//! A B3D stream is a flat sequence of tagged, length-prefixed chunks. Materials
//! and mesh objects are containers whose sub-chunks follow their header. This
//! crate turns one fully-downloaded buffer into named [`Material`]s and
//! [`Object`]s; fetching the bytes and building a scene from the result are
//! left to the caller.
//!
//! # Design principles
//!
//! - **Synchronous**: No async, no threading primitives
//! - **No I/O**: Works on a borrowed `&[u8]`
//! - **Tolerant**: Unknown chunks are skipped by their declared length
//!
//! # Key items
//!
//! - [`decode`]: Decode a whole buffer into a [`B3dScene`]
//! - [`Decoder`]: Iterate over decoded entities as they complete
//! - [`TextureCache`]: Where texture references discovered in materials go

mod error;
#[cfg(test)]
mod test_util;

pub mod chunk;
pub mod cursor;
pub mod decoder;
pub mod material;
pub mod object;
pub mod texture;

pub use chunk::ChunkHeader;
pub use cursor::ByteCursor;
pub use decoder::{B3dScene, Decoder, Event, PartialDecode, Summary, decode, decode_with_cache};
pub use error::{DecodeError, DecodeResult, ErrorKind};
pub use material::Material;
pub use object::{FaceMaterial, Object, ObjectKind};
pub use texture::{MemoryTextureCache, NoTextureCache, SharedTextureCache, Texture, TextureCache};
