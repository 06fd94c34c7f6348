//! Stream builders shared by the integration tests.

#![allow(dead_code)]

use b3d_decode::chunk::id;

#[path = "../../src/test_util.rs"]
mod primitives;

pub use primitives::{chunk, cstr, f32s, u16s};

fn count(len: usize) -> Vec<u8> {
    u16s(&[u16::try_from(len).unwrap()])
}

/// Main + editor containers around `entries`.
pub fn file(entries: &[Vec<u8>]) -> Vec<u8> {
    chunk(id::MAIN, &chunk(id::EDITOR, &entries.concat()))
}

pub fn material(children: &[Vec<u8>]) -> Vec<u8> {
    chunk(id::MATERIAL, &children.concat())
}

pub fn material_name(name: &str) -> Vec<u8> {
    chunk(id::MATERIAL_NAME, &cstr(name))
}

pub fn diffuse_f32(rgb: [f32; 3]) -> Vec<u8> {
    chunk(id::DIFFUSE_COLOR, &chunk(id::COLOR_F32, &f32s(&rgb)))
}

pub fn object(name: &str, children: &[Vec<u8>]) -> Vec<u8> {
    chunk(id::OBJECT, &[cstr(name), children.concat()].concat())
}

pub fn mesh(children: &[Vec<u8>]) -> Vec<u8> {
    chunk(id::TRIANGLE_MESH, &children.concat())
}

pub fn vertices(points: &[[f32; 3]]) -> Vec<u8> {
    let coords: Vec<f32> = points.iter().flatten().copied().collect();
    chunk(id::VERTEX_LIST, &[count(points.len()), f32s(&coords)].concat())
}

/// Face list with a zero trailer after each face, followed by nested chunks.
pub fn faces(faces: &[[u16; 3]], nested: &[Vec<u8>]) -> Vec<u8> {
    let mut body = count(faces.len());
    for face in faces {
        body.extend(u16s(face));
        body.extend_from_slice(&[0, 0]);
    }
    body.extend(nested.concat());
    chunk(id::FACE_LIST, &body)
}

pub fn uvs(coords: &[[f32; 2]]) -> Vec<u8> {
    let flat: Vec<f32> = coords.iter().flatten().copied().collect();
    chunk(id::MAPPING_COORDS, &[count(coords.len()), f32s(&flat)].concat())
}

pub fn face_materials(name: &str, faces: &[u16]) -> Vec<u8> {
    chunk(
        id::FACE_MATERIALS,
        &[cstr(name), count(faces.len()), u16s(faces)].concat(),
    )
}

/// A single-triangle mesh object.
pub fn triangle_object(name: &str) -> Vec<u8> {
    object(
        name,
        &[mesh(&[
            vertices(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            faces(&[[0, 1, 2]], &[]),
        ])],
    )
}
