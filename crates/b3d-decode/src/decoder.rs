//! The top-level chunk loop.
//!
//! [`Decoder`] walks the stream one chunk header at a time. Container chunks
//! (main, editor, keyframer, object, mesh, face list) are entered rather than
//! skipped, so their children show up as later entries of the same loop. At
//! most one material or object is open; it is finalized once the cursor
//! reaches its declared end, when another material or object begins, or when
//! the stream runs out.

use std::iter::FusedIterator;

use indexmap::IndexMap;
use thiserror::Error;

use crate::chunk::{ChunkHeader, id};
use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};
use crate::material::{Material, parse_material};
use crate::object::{Object, ObjectKind};
use crate::texture::{MemoryTextureCache, TextureCache};

/// Something the decoder finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Material(Material),
    Object(Object),
    /// End of stream reached. Always the last event of a successful decode.
    Finished(Summary),
}

/// Totals over everything finalized so far.
///
/// These are running totals over every finalized entity, so an object that
/// reuses an earlier name still adds its faces here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub material_count: usize,
    pub object_count: usize,
    pub total_face_count: usize,
}

#[derive(Debug)]
enum ParseState {
    Idle,
    Material { material: Material, end: usize },
    Object { object: Object, end: usize },
}

/// Streaming decoder over one B3D buffer.
///
/// Yields an [`Event`] each time a material or object completes, then a
/// final [`Event::Finished`]. The first error ends the iteration; events
/// already yielded stay valid.
///
/// The decoder hands each entity over as it completes and keeps only counts,
/// so the final event carries a [`Summary`] rather than the name mappings.
/// Use [`decode`] to get the assembled [`B3dScene`].
#[derive(Debug)]
pub struct Decoder<'a, C = MemoryTextureCache> {
    cursor: ByteCursor<'a>,
    cache: C,
    state: ParseState,
    summary: Summary,
    done: bool,
}

impl<'a> Decoder<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_cache(data, MemoryTextureCache::new())
    }
}

impl<'a, C: TextureCache> Decoder<'a, C> {
    /// Create a decoder that registers material textures in `cache`.
    pub fn with_cache(data: &'a [u8], cache: C) -> Self {
        Self {
            cursor: ByteCursor::new(data),
            cache,
            state: ParseState::Idle,
            summary: Summary::default(),
            done: false,
        }
    }

    /// Current byte offset in the stream.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.tell()
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        self.summary
    }

    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn into_cache(self) -> C {
        self.cache
    }

    fn next_event(&mut self) -> DecodeResult<Event> {
        loop {
            if self.open_exhausted() {
                if let Some(event) = self.finalize_open() {
                    return Ok(event);
                }
            }

            if self.cursor.eof() {
                if let Some(event) = self.finalize_open() {
                    return Ok(event);
                }
                tracing::debug!(
                    "Finished B3D stream: {} materials, {} objects, {} faces",
                    self.summary.material_count,
                    self.summary.object_count,
                    self.summary.total_face_count
                );
                return Ok(Event::Finished(self.summary));
            }

            if let Some(event) = self.read_chunk()? {
                return Ok(event);
            }
        }
    }

    fn open_exhausted(&self) -> bool {
        match self.state {
            ParseState::Idle => false,
            ParseState::Material { end, .. } | ParseState::Object { end, .. } => {
                self.cursor.tell() >= end
            }
        }
    }

    fn finalize_open(&mut self) -> Option<Event> {
        match std::mem::replace(&mut self.state, ParseState::Idle) {
            ParseState::Idle => None,
            ParseState::Material { material, .. } => {
                tracing::debug!("Finalized material {:?}", material.name);
                self.summary.material_count += 1;
                Some(Event::Material(material))
            }
            ParseState::Object { object, .. } => {
                tracing::debug!(
                    "Finalized object {:?}: {} vertices, {} faces",
                    object.name,
                    object.vertices.len(),
                    object.face_count()
                );
                self.summary.object_count += 1;
                self.summary.total_face_count += object.face_count();
                Some(Event::Object(object))
            }
        }
    }

    /// Interpret one chunk. Returns an event when the chunk forced the open
    /// entity to close early.
    fn read_chunk(&mut self) -> DecodeResult<Option<Event>> {
        let chunk = ChunkHeader::read(&mut self.cursor)?;

        match chunk.id {
            id::MAIN | id::EDITOR | id::KEYFRAMER => {}
            id::MATERIAL | id::OBJECT if !matches!(self.state, ParseState::Idle) => {
                // Close the open entity and read this header again from Idle.
                self.cursor.seek(chunk.offset)?;
                return Ok(self.finalize_open());
            }
            id::MATERIAL => {
                let material = parse_material(&mut self.cursor, chunk.end(), &mut self.cache)?;
                self.state = ParseState::Material {
                    material,
                    end: chunk.end(),
                };
            }
            id::OBJECT => {
                let name = self.cursor.read_cstring()?;
                self.state = ParseState::Object {
                    object: Object::new(name),
                    end: chunk.end(),
                };
            }
            id::TRIANGLE_MESH => self.with_object(&chunk, |object, _| {
                object.kind = Some(ObjectKind::Mesh);
                Ok(())
            })?,
            // Nested face material chunks follow the faces inside this chunk.
            id::FACE_LIST => self.with_object(&chunk, Object::read_faces)?,
            id::VERTEX_LIST => {
                self.with_object(&chunk, Object::read_vertices)?;
                chunk.finish(&mut self.cursor)?;
            }
            id::MAPPING_COORDS => {
                self.with_object(&chunk, Object::read_uvs)?;
                chunk.finish(&mut self.cursor)?;
            }
            id::FACE_MATERIALS => {
                self.with_object(&chunk, Object::read_face_materials)?;
                chunk.finish(&mut self.cursor)?;
            }
            other => {
                tracing::trace!(
                    "Skipping chunk 0x{other:04X} at offset {} ({} bytes)",
                    chunk.offset,
                    chunk.payload_len()
                );
                chunk.finish(&mut self.cursor)?;
            }
        }

        Ok(None)
    }

    /// Apply `read` to the open object. Without one, the whole chunk is
    /// skipped instead.
    fn with_object<F>(&mut self, chunk: &ChunkHeader, read: F) -> DecodeResult<()>
    where
        F: FnOnce(&mut Object, &mut ByteCursor<'a>) -> DecodeResult<()>,
    {
        if let ParseState::Object { object, .. } = &mut self.state {
            return read(object, &mut self.cursor);
        }
        tracing::warn!(
            "Chunk 0x{:04X} at offset {} is outside any object, skipping",
            chunk.id,
            chunk.offset
        );
        chunk.finish(&mut self.cursor)
    }
}

impl<C: TextureCache> Iterator for Decoder<'_, C> {
    type Item = DecodeResult<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.next_event();
        match &result {
            Ok(Event::Finished(_)) => self.done = true,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("B3D decode stopped: {e}");
                self.done = true;
            }
        }
        Some(result)
    }
}

impl<C: TextureCache> FusedIterator for Decoder<'_, C> {}

/// Everything decoded from one buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct B3dScene {
    /// Materials by name, in first-seen order. A repeated name keeps the last
    /// material.
    pub materials: IndexMap<String, Material>,
    /// Objects by name, same rules as `materials`.
    pub objects: IndexMap<String, Object>,
    /// Faces over the objects in `objects`.
    pub total_face_count: usize,
    /// Textures registered while decoding. Empty for [`decode_with_cache`].
    pub textures: MemoryTextureCache,
}

/// A decode that stopped on an error.
#[derive(Debug, Error)]
#[error("B3D decode stopped at offset {}", .error.offset())]
pub struct PartialDecode {
    /// Entities finalized before the error.
    pub scene: Box<B3dScene>,
    #[source]
    pub error: DecodeError,
}

/// Decode a whole buffer.
pub fn decode(data: &[u8]) -> Result<B3dScene, PartialDecode> {
    let mut textures = MemoryTextureCache::new();
    let result = collect(Decoder::with_cache(data, &mut textures));
    match result {
        Ok(mut scene) => {
            scene.textures = textures;
            Ok(scene)
        }
        Err(mut partial) => {
            partial.scene.textures = textures;
            Err(partial)
        }
    }
}

/// Decode a whole buffer, registering textures in a caller-owned cache.
pub fn decode_with_cache<C: TextureCache + ?Sized>(
    data: &[u8],
    cache: &mut C,
) -> Result<B3dScene, PartialDecode> {
    collect(Decoder::with_cache(data, cache))
}

fn collect<C: TextureCache>(decoder: Decoder<'_, C>) -> Result<B3dScene, PartialDecode> {
    let mut scene = B3dScene::default();
    for event in decoder {
        match event {
            Ok(Event::Material(material)) => {
                scene.materials.insert(material.name.clone(), material);
            }
            Ok(Event::Object(object)) => {
                scene.total_face_count += object.face_count();
                if let Some(replaced) = scene.objects.insert(object.name.clone(), object) {
                    scene.total_face_count -= replaced.face_count();
                }
            }
            Ok(Event::Finished(_)) => {}
            Err(error) => {
                return Err(PartialDecode {
                    scene: Box::new(scene),
                    error,
                });
            }
        }
    }
    Ok(scene)
}
