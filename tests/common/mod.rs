//! In-memory glTF fixtures with the buffer embedded as a base64 data URI.
#![allow(dead_code)]

use serde_json::json;

pub const TRIANGLES: u32 = 4;
pub const LINES: u32 = 1;

pub enum Indices<'a> {
    None,
    U16(&'a [u16]),
    U32(&'a [u32]),
}

pub const TRIANGLE: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

pub fn triangle_gltf() -> Vec<u8> {
    gltf_bytes(&TRIANGLE, Indices::U32(&[0, 1, 2]), TRIANGLES)
}

pub fn gltf_bytes(positions: &[[f32; 3]], indices: Indices<'_>, mode: u32) -> Vec<u8> {
    let mut data: Vec<u8> = positions
        .iter()
        .flatten()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    let positions_len = data.len();

    let (index_type, index_count) = match indices {
        Indices::None => (None, 0),
        Indices::U16(values) => {
            data.extend(values.iter().flat_map(|v| v.to_le_bytes()));
            (Some(5123), values.len())
        }
        Indices::U32(values) => {
            data.extend(values.iter().flat_map(|v| v.to_le_bytes()));
            (Some(5125), values.len())
        }
    };

    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for p in positions {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }

    let mut buffer_views = vec![json!({
        "buffer": 0,
        "byteOffset": 0,
        "byteLength": positions_len,
    })];
    let mut accessors = vec![json!({
        "bufferView": 0,
        "componentType": 5126,
        "count": positions.len(),
        "type": "VEC3",
        "min": min,
        "max": max,
    })];
    let mut primitive = json!({
        "attributes": { "POSITION": 0 },
        "mode": mode,
    });

    if let Some(component_type) = index_type {
        buffer_views.push(json!({
            "buffer": 0,
            "byteOffset": positions_len,
            "byteLength": data.len() - positions_len,
        }));
        accessors.push(json!({
            "bufferView": 1,
            "componentType": component_type,
            "count": index_count,
            "type": "SCALAR",
        }));
        primitive["indices"] = json!(1);
    }

    let document = json!({
        "asset": { "version": "2.0" },
        "buffers": [{
            "byteLength": data.len(),
            "uri": format!("data:application/octet-stream;base64,{}", base64::encode(&data)),
        }],
        "bufferViews": buffer_views,
        "accessors": accessors,
        "meshes": [{ "name": "fixture", "primitives": [primitive] }],
    });

    serde_json::to_vec(&document).expect("serialize fixture")
}
