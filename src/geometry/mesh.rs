// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Indexed triangle meshes shared by the shells and binding parts

use super::BoundingBox;
use nalgebra::{Matrix3, Matrix4, Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Vertex with position, normal and texture coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub normal: Vector3<f64>,
    pub uv: Point2<f64>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self::with_uv(position, normal, Point2::origin())
    }

    pub fn with_uv(position: Point3<f64>, normal: Vector3<f64>, uv: Point2<f64>) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// Triangle soup with shared vertices. Winding is counter-clockwise seen from outside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Append a vertex, returning its index
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Apply an affine placement. Normals go through the inverse transpose of
    /// the linear part so non-uniform scales keep them perpendicular.
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        let linear: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let normal_matrix = linear.try_inverse().map_or(linear, |inv| inv.transpose());
        for vertex in &mut self.vertices {
            vertex.position = matrix.transform_point(&vertex.position);
            vertex.normal = (normal_matrix * vertex.normal)
                .try_normalize(f64::EPSILON)
                .unwrap_or(vertex.normal);
        }
    }

    /// Shift all vertices without touching normals
    pub fn translate(&mut self, offset: Vector3<f64>) {
        self.vertices.iter_mut().for_each(|v| v.position += offset);
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_vertices(&self.vertices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Concatenate `other`, re-basing its indices
    pub fn merge(&mut self, other: &Mesh) {
        let base = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|t| Triangle::new(t.indices.map(|i| i + base))),
        );
    }

    /// Smooth normals: area-weighted average of the incident face normals.
    /// Vertices touched only by degenerate faces point up.
    pub fn recompute_normals(&mut self) {
        let mut sums = vec![Vector3::<f64>::zeros(); self.vertices.len()];
        for triangle in &self.triangles {
            let [a, b, c] = triangle.indices.map(|i| self.vertices[i].position);
            // Unnormalized cross product carries twice the face area
            let weighted = (b - a).cross(&(c - a));
            for i in triangle.indices {
                sums[i] += weighted;
            }
        }
        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            vertex.normal = sum.try_normalize(1e-12).unwrap_or_else(Vector3::y);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use nalgebra::Vector3;

    #[test]
    fn test_recompute_normals() {
        let mut mesh = Primitive::cuboid(Vector3::new(10.0, 10.0, 10.0)).to_mesh();

        assert!(!mesh.vertices.is_empty());
        assert!(mesh.vertices.iter().all(|v| v.normal.norm() > 0.0));

        mesh.recompute_normals();

        assert!(mesh.vertices.iter().all(|v| {
            let norm = v.normal.norm();
            norm > 0.9 && norm < 1.1
        }));
    }

    #[test]
    fn test_merge_offsets_indices() {
        let a = Primitive::cuboid(Vector3::new(1.0, 1.0, 1.0)).to_mesh();
        let mut merged = a.clone();
        merged.merge(&a);

        assert_eq!(merged.vertex_count(), a.vertex_count() * 2);
        assert_eq!(merged.triangle_count(), a.triangle_count() * 2);
        let max_index = merged
            .triangles
            .iter()
            .flat_map(|t| t.indices)
            .max()
            .unwrap();
        assert_eq!(max_index, merged.vertex_count() - 1);
    }

    #[test]
    fn test_translate_keeps_normals() {
        let mut mesh = Primitive::cuboid(Vector3::new(2.0, 2.0, 2.0)).to_mesh();
        let normals: Vec<_> = mesh.vertices.iter().map(|v| v.normal).collect();
        mesh.translate(Vector3::new(0.0, 0.5, 0.0));

        let bbox = mesh.bounding_box();
        assert!((bbox.min.y - -0.5).abs() < 1e-12);
        assert!((bbox.max.y - 1.5).abs() < 1e-12);
        assert!(mesh.vertices.iter().zip(normals).all(|(v, n)| v.normal == n));
    }
}
