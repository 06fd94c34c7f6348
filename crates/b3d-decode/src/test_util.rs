//! Chunk stream writers, shared by the unit and integration tests.

pub fn chunk(id: u16, payload: &[u8]) -> Vec<u8> {
    let length = u32::try_from(payload.len() + 6).unwrap();
    let mut out = id.to_le_bytes().to_vec();
    out.extend_from_slice(&length.to_le_bytes());
    out.extend_from_slice(payload);
    out
}

pub fn cstr(text: &str) -> Vec<u8> {
    let mut out = text.as_bytes().to_vec();
    out.push(0);
    out
}

pub fn f32s(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

pub fn u16s(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}
