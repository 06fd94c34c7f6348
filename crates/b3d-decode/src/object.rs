//! Mesh objects and the readers for their sub-chunks.
//!
//! Each reader handles one count-prefixed list. They may be applied in any
//! order; vertex, UV and face lists replace what was there before.

use glam::{Vec2, Vec3};

use crate::cursor::ByteCursor;
use crate::error::DecodeResult;

/// What an object holds. Only triangle meshes are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Mesh,
}

/// Faces of an object drawn with one material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceMaterial {
    pub material: String,
    /// Indices into [`Object::faces`].
    pub faces: Vec<u16>,
}

/// A named mesh object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    pub name: String,
    /// Set once the triangle mesh marker has been seen.
    pub kind: Option<ObjectKind>,
    pub vertices: Vec<Vec3>,
    /// Triangles as indices into `vertices`, in stream order.
    pub faces: Vec<[u16; 3]>,
    /// Texture coordinates, with `v` flipped to `1 - v`.
    pub uvs: Vec<Vec2>,
    /// One entry per face, always zero.
    pub smoothing_groups: Vec<u32>,
    /// Material assignments in stream order. The same material may appear
    /// more than once; entries are never merged.
    pub face_materials: Vec<FaceMaterial>,
}

impl Object {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Names of assigned materials, in assignment order.
    pub fn material_names(&self) -> impl Iterator<Item = &str> {
        self.face_materials.iter().map(|fm| fm.material.as_str())
    }

    /// Every face list assigned to `material`.
    pub fn faces_for<'a>(&'a self, material: &'a str) -> impl Iterator<Item = &'a [u16]> {
        self.face_materials
            .iter()
            .filter(move |fm| fm.material == material)
            .map(|fm| fm.faces.as_slice())
    }

    /// Read a vertex list: `u16` count, then `count` × 3 `f32`.
    pub(crate) fn read_vertices(&mut self, cursor: &mut ByteCursor<'_>) -> DecodeResult<()> {
        let count = usize::from(cursor.read_u16()?);
        let mut vertices = Vec::with_capacity(count);
        for _ in 0..count {
            let x = cursor.read_f32()?;
            let y = cursor.read_f32()?;
            let z = cursor.read_f32()?;
            vertices.push(Vec3::new(x, y, z));
        }
        self.vertices = vertices;
        Ok(())
    }

    /// Read a face list: `u16` count, then per face three `u16` indices and
    /// a 2-byte trailer that is discarded. Resets the smoothing groups.
    pub(crate) fn read_faces(&mut self, cursor: &mut ByteCursor<'_>) -> DecodeResult<()> {
        let count = usize::from(cursor.read_u16()?);
        let mut faces = Vec::with_capacity(count);
        for _ in 0..count {
            let a = cursor.read_u16()?;
            let b = cursor.read_u16()?;
            let c = cursor.read_u16()?;
            cursor.skip(2)?;
            faces.push([a, b, c]);
        }
        self.faces = faces;
        self.smoothing_groups = vec![0; count];
        Ok(())
    }

    /// Read mapping coordinates: `u16` count, then `count` × 2 `f32`.
    pub(crate) fn read_uvs(&mut self, cursor: &mut ByteCursor<'_>) -> DecodeResult<()> {
        let count = usize::from(cursor.read_u16()?);
        let mut uvs = Vec::with_capacity(count);
        for _ in 0..count {
            let u = cursor.read_f32()?;
            let v = cursor.read_f32()?;
            uvs.push(Vec2::new(u, 1.0 - v));
        }
        self.uvs = uvs;
        Ok(())
    }

    /// Read a face material assignment: material name, `u16` count, then
    /// `count` `u16` face indices.
    pub(crate) fn read_face_materials(&mut self, cursor: &mut ByteCursor<'_>) -> DecodeResult<()> {
        let material = cursor.read_cstring()?;
        let count = usize::from(cursor.read_u16()?);
        let mut faces = Vec::with_capacity(count);
        for _ in 0..count {
            faces.push(cursor.read_u16()?);
        }
        self.face_materials.push(FaceMaterial { material, faces });
        Ok(())
    }
}
