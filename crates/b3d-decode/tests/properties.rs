mod common;

use b3d_decode::{B3dScene, decode};
use common::{chunk, face_materials, faces, file, material, material_name, mesh, object, uvs, vertices};
use proptest::prelude::*;

/// Ids the decoder does not interpret anywhere.
fn unknown_id() -> impl Strategy<Value = u16> {
    any::<u16>().prop_filter("recognized id", |id| {
        ![
            0x4D4D, 0x3D3D, 0xB000, 0xAFFF, 0x4000, 0x4100, 0x4110, 0x4120, 0x4130, 0x4140,
            0xA000, 0xA010, 0xA020, 0xA030, 0xA050, 0xA081, 0xA200, 0xA204, 0xA300,
        ]
        .contains(id)
    })
}

fn face_list() -> impl Strategy<Value = Vec<[u16; 3]>> {
    prop::collection::vec(any::<[u16; 3]>(), 0..20)
}

fn scene_entries(face_sets: &[Vec<[u16; 3]>]) -> Vec<Vec<u8>> {
    let mut entries = vec![material(&[material_name("Base")])];
    for (i, set) in face_sets.iter().enumerate() {
        entries.push(object(
            &format!("obj{i}"),
            &[mesh(&[
                vertices(&[[0.0, 1.0, 2.0]]),
                faces(set, &[face_materials("Base", &[0])]),
            ])],
        ));
    }
    entries
}

/// A material and a mesh object, with `noise` placed inside the container
/// chosen by `slot`:
/// 0 material, 1 object before its mesh, 2 mesh before the vertices,
/// 3 face list before its material assignments.
fn nested_entries(face_set: &[[u16; 3]], noise: Option<(usize, Vec<u8>)>) -> Vec<Vec<u8>> {
    let (slot, noise) = noise.unwrap_or((usize::MAX, Vec::new()));
    let at = |wanted: usize| if slot == wanted { noise.clone() } else { Vec::new() };

    vec![
        material(&[at(0), material_name("Base")]),
        object(
            "obj",
            &[
                at(1),
                mesh(&[
                    at(2),
                    vertices(&[[0.0, 1.0, 2.0]]),
                    faces(face_set, &[at(3), face_materials("Base", &[0])]),
                ]),
            ],
        ),
    ]
}

fn assert_face_invariants(scene: &B3dScene) {
    let mut total = 0;
    for object in scene.objects.values() {
        assert_eq!(object.faces.len(), object.face_count());
        assert_eq!(object.smoothing_groups.len(), object.face_count());
        assert!(object.smoothing_groups.iter().all(|&g| g == 0));
        total += object.face_count();
    }
    assert_eq!(total, scene.total_face_count);
}

proptest! {
    #[test]
    fn face_counts_add_up(face_sets in prop::collection::vec(face_list(), 0..6)) {
        let data = file(&scene_entries(&face_sets));

        let scene = decode(&data).unwrap();
        prop_assert_eq!(scene.objects.len(), face_sets.len());
        assert_face_invariants(&scene);
    }

    #[test]
    fn unknown_chunk_is_skipped(
        face_sets in prop::collection::vec(face_list(), 1..4),
        id in unknown_id(),
        payload in prop::collection::vec(any::<u8>(), 0..64),
        position in any::<prop::sample::Index>(),
    ) {
        let entries = scene_entries(&face_sets);
        let mut noisy = entries.clone();
        noisy.insert(position.index(entries.len() + 1), chunk(id, &payload));

        let clean = decode(&file(&entries)).unwrap();
        let with_noise = decode(&file(&noisy)).unwrap();
        prop_assert_eq!(clean, with_noise);
    }

    #[test]
    fn unknown_chunk_inside_containers_is_skipped(
        face_set in face_list(),
        id in unknown_id(),
        payload in prop::collection::vec(any::<u8>(), 0..64),
        slot in 0..4usize,
    ) {
        let clean = decode(&file(&nested_entries(&face_set, None))).unwrap();
        let noisy = file(&nested_entries(&face_set, Some((slot, chunk(id, &payload)))));
        prop_assert_eq!(clean, decode(&noisy).unwrap());
    }

    #[test]
    fn uv_v_flipped_exactly(coords in prop::collection::vec([-4.0f32..4.0, -4.0f32..4.0], 0..32)) {
        let data = file(&[object("Mapped", &[mesh(&[uvs(&coords)])])]);

        let scene = decode(&data).unwrap();
        let decoded = &scene.objects["Mapped"].uvs;
        prop_assert_eq!(decoded.len(), coords.len());
        for (uv, [u, v]) in decoded.iter().zip(&coords) {
            prop_assert_eq!(uv.x.to_bits(), u.to_bits());
            prop_assert_eq!(uv.y.to_bits(), (1.0 - v).to_bits());
        }
    }

    #[test]
    fn decoding_is_idempotent(face_sets in prop::collection::vec(face_list(), 0..4)) {
        let data = file(&scene_entries(&face_sets));
        prop_assert_eq!(decode(&data).unwrap(), decode(&data).unwrap());
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        match decode(&bytes) {
            Ok(scene) => assert_face_invariants(&scene),
            Err(partial) => {
                prop_assert!(partial.error.offset() <= bytes.len());
                assert_face_invariants(&partial.scene);
            }
        }
    }
}
