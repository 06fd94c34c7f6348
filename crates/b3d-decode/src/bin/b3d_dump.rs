//! Decode a `.b3d` file and print what was found as JSON.
//!
//! Run: `cargo run -p b3d-decode --features test-tools --bin b3d_dump -- <file.b3d>`
//!
//! On a decode error the partial result is still printed, followed by the
//! error, and the process exits with status 1.

use std::env;
use std::fs;
use std::process;

use b3d_decode::material::unpack_rgb;
use b3d_decode::{B3dScene, Material, Object, decode};
use serde_json::{Value, json};

fn main() {
    tracing_subscriber::fmt::init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: b3d_dump <file.b3d>");
        process::exit(2);
    };

    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("failed to read {path}: {e}");
            process::exit(2);
        }
    };
    tracing::info!("Read {} bytes from {path}", bytes.len());

    let (scene, error) = match decode(&bytes) {
        Ok(scene) => (scene, None),
        Err(partial) => (*partial.scene, Some(partial.error)),
    };

    let mut report = scene_json(&scene);
    if let Some(error) = error {
        report["error"] = json!({
            "kind": format!("{:?}", error.kind()),
            "offset": error.offset(),
            "message": error.to_string(),
        });
    }

    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("failed to serialize report: {e}");
            process::exit(2);
        }
    }

    if error.is_some() {
        process::exit(1);
    }
}

fn scene_json(scene: &B3dScene) -> Value {
    json!({
        "materials": scene.materials.values().map(material_json).collect::<Vec<_>>(),
        "objects": scene.objects.values().map(object_json).collect::<Vec<_>>(),
        "textures": scene.textures.iter().map(|t| t.url.as_str()).collect::<Vec<_>>(),
        "total_face_count": scene.total_face_count,
    })
}

fn material_json(material: &Material) -> Value {
    let color = |c: Option<u32>| c.map(unpack_rgb);
    json!({
        "name": material.name,
        "ambient": color(material.ambient_color),
        "diffuse": color(material.diffuse_color),
        "specular": color(material.specular_color),
        "transparency": material.transparency,
        "two_sided": material.two_sided,
        "color_map": material.color_map.as_ref().map(|t| t.url.as_str()),
        "specular_map": material.specular_map.as_ref().map(|t| t.url.as_str()),
    })
}

fn object_json(object: &Object) -> Value {
    let assignments: Vec<_> = object
        .face_materials
        .iter()
        .map(|fm| json!({ "material": fm.material, "face_count": fm.faces.len() }))
        .collect();

    json!({
        "name": object.name,
        "mesh": object.kind.is_some(),
        "vertex_count": object.vertices.len(),
        "face_count": object.face_count(),
        "uv_count": object.uvs.len(),
        "first_vertices": object.vertices.iter().take(3).map(|v| [v.x, v.y, v.z]).collect::<Vec<_>>(),
        "first_faces": object.faces.iter().take(3).collect::<Vec<_>>(),
        "material_faces": assignments,
    })
}
