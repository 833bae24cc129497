// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Binary STL export

use crate::geometry::Mesh;
use anyhow::{Context, Result};
use nalgebra::Point3;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use stl_io::{Normal, Triangle, Vertex};

/// Encode a mesh as binary STL
pub fn write_stl<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    let triangles: Vec<Triangle> = mesh
        .triangles
        .iter()
        .map(|tri| {
            let [a, b, c] = tri.indices.map(|i| mesh.vertices[i].position);
            // STL wants the facet normal, not the smoothed vertex normals
            let n = (b - a).cross(&(c - a));
            let n = n.try_normalize(f64::EPSILON).unwrap_or(n);
            Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [vertex(&a), vertex(&b), vertex(&c)],
            }
        })
        .collect();
    stl_io::write_stl(writer, triangles.iter()).context("Failed to encode STL")?;
    Ok(())
}

fn vertex(p: &Point3<f64>) -> Vertex {
    Vertex::new([p.x as f32, p.y as f32, p.z as f32])
}

pub fn export(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_stl(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use nalgebra::Vector3;

    #[test]
    fn test_binary_layout() -> Result<()> {
        let mesh = Primitive::cuboid(Vector3::new(1.0, 2.0, 3.0)).to_mesh();
        let mut bytes = Vec::new();
        write_stl(&mesh, &mut bytes)?;
        // 80 byte header, count, 50 bytes per facet
        assert_eq!(bytes.len(), 84 + 50 * mesh.triangle_count());
        let count = u32::from_le_bytes(bytes[80..84].try_into()?);
        assert_eq!(count as usize, mesh.triangle_count());
        Ok(())
    }
}
