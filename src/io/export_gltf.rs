// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! glTF 2.0 / GLB exporter for assembled models

use crate::assembly::{MaterialSpec, Model};
use crate::geometry::Mesh;
use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use nalgebra::Matrix4;
use serde_json::{json, Value};
use std::path::Path;
use tracing::debug;

const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;
const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;
const TRIANGLES: u32 = 4;

const GLB_MAGIC: u32 = 0x46546C67; // "glTF"
const CHUNK_JSON: u32 = 0x4E4F534A;
const CHUNK_BIN: u32 = 0x004E4942;

/// Write a model as `.glb` or `.gltf`, chosen by extension.
///
/// A `.gltf` file is self-contained: buffer and texture travel as base64 data URIs.
pub fn export(model: &Model, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let is_glb = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("glb"));

    let bytes = if is_glb {
        to_glb(model)?
    } else {
        serde_json::to_vec_pretty(&to_gltf(model)?)?
    };
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), "exported glTF");
    Ok(())
}

/// glTF JSON with embedded data URIs
pub fn to_gltf(model: &Model) -> Result<Value> {
    let png = model.texture.to_png_bytes().context("Failed to encode texture")?;
    let mut doc = Document::build(model);

    doc.images.push(json!({
        "uri": format!("data:image/png;base64,{}", STANDARD.encode(&png)),
    }));
    let uri = format!("data:application/octet-stream;base64,{}", STANDARD.encode(&doc.buffer));
    Ok(doc.finish(Some(uri)))
}

/// Binary glTF with the PNG texture stored in the BIN chunk
pub fn to_glb(model: &Model) -> Result<Vec<u8>> {
    let png = model.texture.to_png_bytes().context("Failed to encode texture")?;
    let mut doc = Document::build(model);

    let view = doc.push_view(&png, None);
    doc.images.push(json!({ "bufferView": view, "mimeType": "image/png" }));
    let gltf = doc.finish(None);

    let json_bytes = serde_json::to_vec(&gltf)?;
    let json_len = align4(json_bytes.len());
    let bin_len = align4(doc.buffer.len());
    let total = 12 + 8 + json_len + 8 + bin_len;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());

    out.extend_from_slice(&(json_len as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json_bytes);
    out.resize(out.len() + json_len - json_bytes.len(), b' ');

    out.extend_from_slice(&(bin_len as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    out.extend_from_slice(&doc.buffer);
    out.resize(total, 0);
    Ok(out)
}

fn align4(n: usize) -> usize {
    (n + 3) & !3
}

#[derive(Default)]
struct Document {
    buffer: Vec<u8>,
    views: Vec<Value>,
    accessors: Vec<Value>,
    meshes: Vec<Value>,
    materials: Vec<Value>,
    nodes: Vec<Value>,
    images: Vec<Value>,
    clearcoat: bool,
}

/// Accessor indices for one uploaded vertex set
struct Attributes {
    position: usize,
    normal: usize,
    uv: usize,
}

impl Document {
    fn build(model: &Model) -> Self {
        let mut doc = Self::default();

        let mut meshes = Vec::new();
        for (name, shell) in [("edge", &model.edge), ("core", &model.core)] {
            let attributes = doc.push_vertices(&shell.mesh);
            let primitives: Vec<Value> = shell
                .surfaces
                .iter()
                .map(|surface| {
                    let indices = doc.push_indices(&shell.mesh, surface.triangles.clone());
                    let material = doc.push_material(&surface.material);
                    primitive(&attributes, indices, material)
                })
                .collect();
            meshes.push(doc.push_mesh(name, primitives));
        }
        for part in &model.bindings {
            let attributes = doc.push_vertices(&part.mesh);
            let indices = doc.push_indices(&part.mesh, 0..part.mesh.triangle_count());
            let material = doc.push_material(&part.material);
            meshes.push(doc.push_mesh(&part.name, vec![primitive(&attributes, indices, material)]));
        }

        // Node trees may not share children, so each instance gets its own leaves
        for (i, placement) in model.instances.iter().enumerate() {
            let first_child = doc.nodes.len() + 1;
            let children: Vec<usize> = (first_child..first_child + meshes.len()).collect();
            doc.nodes.push(json!({
                "name": format!("instance_{i}"),
                "matrix": column_major(placement),
                "children": children,
            }));
            for &mesh in &meshes {
                doc.nodes.push(json!({ "mesh": mesh }));
            }
        }
        doc
    }

    fn finish(&self, buffer_uri: Option<String>) -> Value {
        let roots: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.get("children").is_some())
            .map(|(i, _)| i)
            .collect();

        let mut buffer = json!({ "byteLength": self.buffer.len() });
        if let Some(uri) = buffer_uri {
            buffer["uri"] = Value::String(uri);
        }

        let mut gltf = json!({
            "asset": { "generator": "Skiform", "version": "2.0" },
            "scene": 0,
            "scenes": [{ "nodes": roots }],
            "nodes": self.nodes,
            "meshes": self.meshes,
            "materials": self.materials,
            "accessors": self.accessors,
            "bufferViews": self.views,
            "buffers": [buffer],
            "images": self.images,
            "samplers": [{ "wrapS": 33071, "wrapT": 33071 }],
            "textures": [{ "source": 0, "sampler": 0 }],
        });
        if self.clearcoat {
            gltf["extensionsUsed"] = json!(["KHR_materials_clearcoat"]);
        }
        gltf
    }

    fn push_view(&mut self, bytes: &[u8], target: Option<u32>) -> usize {
        let offset = self.buffer.len();
        self.buffer.extend_from_slice(bytes);
        self.buffer.resize(align4(self.buffer.len()), 0);

        let mut view = json!({ "buffer": 0, "byteOffset": offset, "byteLength": bytes.len() });
        if let Some(target) = target {
            view["target"] = json!(target);
        }
        self.views.push(view);
        self.views.len() - 1
    }

    fn push_accessor(&mut self, accessor: Value) -> usize {
        self.accessors.push(accessor);
        self.accessors.len() - 1
    }

    fn push_vertices(&mut self, mesh: &Mesh) -> Attributes {
        let count = mesh.vertex_count();
        let mut positions = Vec::with_capacity(count * 12);
        let mut normals = Vec::with_capacity(count * 12);
        let mut uvs = Vec::with_capacity(count * 8);
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];

        for vertex in &mesh.vertices {
            let p = [
                vertex.position.x as f32,
                vertex.position.y as f32,
                vertex.position.z as f32,
            ];
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
            for value in p {
                positions.extend_from_slice(&value.to_le_bytes());
            }
            for value in [vertex.normal.x, vertex.normal.y, vertex.normal.z] {
                normals.extend_from_slice(&(value as f32).to_le_bytes());
            }
            for value in [vertex.uv.x, vertex.uv.y] {
                uvs.extend_from_slice(&(value as f32).to_le_bytes());
            }
        }
        if count == 0 {
            min = [0.0; 3];
            max = [0.0; 3];
        }

        let view = self.push_view(&positions, Some(ARRAY_BUFFER));
        let position = self.push_accessor(json!({
            "bufferView": view, "componentType": FLOAT, "count": count, "type": "VEC3",
            "min": min, "max": max,
        }));
        let view = self.push_view(&normals, Some(ARRAY_BUFFER));
        let normal = self.push_accessor(json!({
            "bufferView": view, "componentType": FLOAT, "count": count, "type": "VEC3",
        }));
        let view = self.push_view(&uvs, Some(ARRAY_BUFFER));
        let uv = self.push_accessor(json!({
            "bufferView": view, "componentType": FLOAT, "count": count, "type": "VEC2",
        }));
        Attributes {
            position,
            normal,
            uv,
        }
    }

    fn push_indices(&mut self, mesh: &Mesh, triangles: std::ops::Range<usize>) -> usize {
        let mut bytes = Vec::with_capacity(triangles.len() * 12);
        for triangle in &mesh.triangles[triangles.clone()] {
            for index in triangle.indices {
                bytes.extend_from_slice(&(index as u32).to_le_bytes());
            }
        }
        let view = self.push_view(&bytes, Some(ELEMENT_ARRAY_BUFFER));
        self.push_accessor(json!({
            "bufferView": view,
            "componentType": UNSIGNED_INT,
            "count": triangles.len() * 3,
            "type": "SCALAR",
        }))
    }

    fn push_material(&mut self, spec: &MaterialSpec) -> usize {
        let [r, g, b] = spec.color.to_linear_factors();
        let mut pbr = json!({
            "baseColorFactor": [r, g, b, 1.0],
            "metallicFactor": spec.metalness,
            "roughnessFactor": spec.roughness,
        });
        if spec.textured {
            pbr["baseColorFactor"] = json!([1.0, 1.0, 1.0, 1.0]);
            pbr["baseColorTexture"] = json!({ "index": 0 });
        }

        let mut material = json!({
            "name": spec.name,
            "pbrMetallicRoughness": pbr,
            "doubleSided": spec.double_sided,
        });
        if let Some(emissive) = spec.emissive {
            let strength = spec.emissive_intensity.clamp(0.0, 1.0) as f32;
            let [r, g, b] = emissive.to_linear_factors();
            material["emissiveFactor"] = json!([r * strength, g * strength, b * strength]);
        }
        if spec.clearcoat > 0.0 {
            self.clearcoat = true;
            material["extensions"] = json!({
                "KHR_materials_clearcoat": { "clearcoatFactor": spec.clearcoat }
            });
        }
        self.materials.push(material);
        self.materials.len() - 1
    }

    fn push_mesh(&mut self, name: &str, primitives: Vec<Value>) -> usize {
        self.meshes.push(json!({ "name": name, "primitives": primitives }));
        self.meshes.len() - 1
    }
}

fn primitive(attributes: &Attributes, indices: usize, material: usize) -> Value {
    json!({
        "attributes": {
            "POSITION": attributes.position,
            "NORMAL": attributes.normal,
            "TEXCOORD_0": attributes.uv,
        },
        "indices": indices,
        "material": material,
        "mode": TRIANGLES,
    })
}

fn column_major(matrix: &Matrix4<f64>) -> Vec<f64> {
    // nalgebra stores column-major already
    matrix.as_slice().to_vec()
}
