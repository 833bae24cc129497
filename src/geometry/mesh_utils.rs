// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh validation utilities

use super::Mesh;
use std::collections::HashMap;

/// Edge representation for connectivity checking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Edge {
    v0: usize,
    v1: usize,
}

impl Edge {
    fn new(v0: usize, v1: usize) -> Self {
        // Always store edges with smaller index first for consistent hashing
        if v0 < v1 {
            Self { v0, v1 }
        } else {
            Self { v0: v1, v1: v0 }
        }
    }
}

fn edge_counts(mesh: &Mesh) -> HashMap<Edge, u32> {
    let mut counts: HashMap<Edge, u32> = HashMap::new();

    for triangle in &mesh.triangles {
        let [a, b, c] = triangle.indices;
        for edge in [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)] {
            *counts.entry(edge).or_insert(0) += 1;
        }
    }

    counts
}

/// Check if mesh is manifold (each edge shared by at most 2 triangles)
pub fn is_manifold(mesh: &Mesh) -> bool {
    edge_counts(mesh).values().all(|&count| count <= 2)
}

/// Check if mesh is closed (each edge shared by exactly 2 triangles)
pub fn is_closed(mesh: &Mesh) -> bool {
    !mesh.triangles.is_empty() && edge_counts(mesh).values().all(|&count| count == 2)
}

/// Every index in range and every vertex attribute finite
pub fn is_well_formed(mesh: &Mesh) -> bool {
    let n = mesh.vertices.len();
    mesh.triangles
        .iter()
        .all(|t| t.indices.iter().all(|&i| i < n))
        && mesh.vertices.iter().all(|v| {
            v.position.iter().all(|c| c.is_finite()) && v.normal.iter().all(|c| c.is_finite())
        })
}

/// Signed volume via the divergence theorem; positive for outward-facing winding
pub fn signed_volume(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .map(|t| {
            let a = mesh.vertices[t.indices[0]].position.coords;
            let b = mesh.vertices[t.indices[1]].position.coords;
            let c = mesh.vertices[t.indices[2]].position.coords;
            a.dot(&b.cross(&c)) / 6.0
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;

    #[test]
    fn test_cylinder_volume_is_positive() {
        let mesh = Primitive::cylinder(1.0, 1.0, 2.0, 64).to_mesh();
        let volume = signed_volume(&mesh);
        let expected = std::f64::consts::PI * 2.0;
        assert!(volume > 0.0);
        assert!((volume - expected).abs() / expected < 0.01);
        assert!(is_well_formed(&mesh));
    }

    #[test]
    fn test_empty_mesh_is_not_closed() {
        assert!(!is_closed(&Mesh::new()));
        assert!(is_manifold(&Mesh::new()));
    }
}
