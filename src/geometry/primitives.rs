// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometric primitives generator
//!
//! All primitives are centered on the origin with Y as the vertical axis,
//! which is the frame the binding hardware is laid out in.

use super::{Mesh, Triangle, Vertex};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Geometric primitives
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Cuboid {
        size: Vector3<f64>,
    },
    /// Closed frustum around the Y axis
    Cylinder {
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        segments: u32,
    },
    /// Open-ended frustum wall spanning `theta_length` radians
    ArcShell {
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        segments: u32,
        theta_start: f64,
        theta_length: f64,
    },
}

impl Primitive {
    pub fn cuboid(size: Vector3<f64>) -> Self {
        Self::Cuboid { size }
    }

    pub fn cylinder(radius_top: f64, radius_bottom: f64, height: f64, segments: u32) -> Self {
        let segments = if segments > 2 { segments } else { 32 };
        Self::Cylinder {
            radius_top,
            radius_bottom,
            height,
            segments,
        }
    }

    pub fn arc_shell(
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        segments: u32,
        theta_start: f64,
        theta_length: f64,
    ) -> Self {
        let segments = segments.max(1);
        Self::ArcShell {
            radius_top,
            radius_bottom,
            height,
            segments,
            theta_start,
            theta_length,
        }
    }

    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Cuboid { size } => generate_cuboid_mesh(*size),
            Self::Cylinder {
                radius_top,
                radius_bottom,
                height,
                segments,
            } => generate_cylinder_mesh(*radius_top, *radius_bottom, *height, *segments),
            Self::ArcShell {
                radius_top,
                radius_bottom,
                height,
                segments,
                theta_start,
                theta_length,
            } => generate_arc_shell_mesh(
                *radius_top,
                *radius_bottom,
                *height,
                *segments,
                *theta_start,
                *theta_length,
            ),
        }
    }
}

fn generate_cuboid_mesh(size: Vector3<f64>) -> Mesh {
    let mut mesh = Mesh::with_capacity(36, 12);
    let (hx, hy, hz) = (size.x / 2.0, size.y / 2.0, size.z / 2.0);

    let positions = [
        Point3::new(-hx, -hy, -hz),
        Point3::new(hx, -hy, -hz),
        Point3::new(hx, hy, -hz),
        Point3::new(-hx, hy, -hz),
        Point3::new(-hx, -hy, hz),
        Point3::new(hx, -hy, hz),
        Point3::new(hx, hy, hz),
        Point3::new(-hx, hy, hz),
    ];

    // 6 faces, each with its normal
    let faces = [
        ([4, 5, 6], Vector3::new(0.0, 0.0, 1.0)),
        ([4, 6, 7], Vector3::new(0.0, 0.0, 1.0)),
        ([1, 0, 3], Vector3::new(0.0, 0.0, -1.0)),
        ([1, 3, 2], Vector3::new(0.0, 0.0, -1.0)),
        ([5, 1, 2], Vector3::new(1.0, 0.0, 0.0)),
        ([5, 2, 6], Vector3::new(1.0, 0.0, 0.0)),
        ([0, 4, 7], Vector3::new(-1.0, 0.0, 0.0)),
        ([0, 7, 3], Vector3::new(-1.0, 0.0, 0.0)),
        ([7, 6, 2], Vector3::new(0.0, 1.0, 0.0)),
        ([7, 2, 3], Vector3::new(0.0, 1.0, 0.0)),
        ([0, 1, 5], Vector3::new(0.0, -1.0, 0.0)),
        ([0, 5, 4], Vector3::new(0.0, -1.0, 0.0)),
    ];

    for (indices, normal) in faces {
        let v0 = mesh.add_vertex(Vertex::new(positions[indices[0]], normal));
        let v1 = mesh.add_vertex(Vertex::new(positions[indices[1]], normal));
        let v2 = mesh.add_vertex(Vertex::new(positions[indices[2]], normal));
        mesh.add_triangle(Triangle::new([v0, v1, v2]));
    }

    mesh
}

fn generate_cylinder_mesh(radius_top: f64, radius_bottom: f64, height: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::new();
    let half = height / 2.0;

    let bottom_center_idx = mesh.add_vertex(Vertex::new(
        Point3::new(0.0, -half, 0.0),
        Vector3::new(0.0, -1.0, 0.0),
    ));
    let top_center_idx = mesh.add_vertex(Vertex::new(
        Point3::new(0.0, half, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
    ));

    let mut bottom_indices = Vec::with_capacity(segments as usize);
    let mut top_indices = Vec::with_capacity(segments as usize);

    for i in 0..segments {
        let angle = 2.0 * PI * i as f64 / segments as f64;
        let (sin, cos) = angle.sin_cos();

        bottom_indices.push(mesh.add_vertex(Vertex::new(
            Point3::new(radius_bottom * sin, -half, radius_bottom * cos),
            Vector3::new(sin, 0.0, cos),
        )));
        top_indices.push(mesh.add_vertex(Vertex::new(
            Point3::new(radius_top * sin, half, radius_top * cos),
            Vector3::new(sin, 0.0, cos),
        )));
    }

    for i in 0..segments as usize {
        let next = (i + 1) % segments as usize;
        let (bi, ti) = (bottom_indices[i], top_indices[i]);
        let (bn, tn) = (bottom_indices[next], top_indices[next]);

        // Caps
        mesh.add_triangle(Triangle::new([bottom_center_idx, bn, bi]));
        mesh.add_triangle(Triangle::new([top_center_idx, ti, tn]));

        // Side, reusing rim vertices to keep the mesh manifold
        mesh.add_triangle(Triangle::new([bi, bn, ti]));
        mesh.add_triangle(Triangle::new([ti, bn, tn]));
    }

    mesh.recompute_normals();
    mesh
}

fn generate_arc_shell_mesh(
    radius_top: f64,
    radius_bottom: f64,
    height: f64,
    segments: u32,
    theta_start: f64,
    theta_length: f64,
) -> Mesh {
    let mut mesh = Mesh::new();
    let half = height / 2.0;

    for i in 0..=segments {
        let theta = theta_start + theta_length * i as f64 / segments as f64;
        let (sin, cos) = theta.sin_cos();
        let normal = Vector3::new(sin, 0.0, cos);

        mesh.add_vertex(Vertex::new(
            Point3::new(radius_bottom * sin, -half, radius_bottom * cos),
            normal,
        ));
        mesh.add_vertex(Vertex::new(
            Point3::new(radius_top * sin, half, radius_top * cos),
            normal,
        ));
    }

    for i in 0..segments as usize {
        let b0 = 2 * i;
        let t0 = b0 + 1;
        let b1 = b0 + 2;
        let t1 = b0 + 3;
        mesh.add_triangle(Triangle::new([b0, b1, t0]));
        mesh.add_triangle(Triangle::new([t0, b1, t1]));
    }

    mesh.recompute_normals();
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh_utils::{is_closed, is_manifold};

    #[test]
    fn test_cuboid_generation() {
        let mesh = Primitive::cuboid(Vector3::new(1.6, 0.08, 2.2)).to_mesh();
        assert_eq!(mesh.vertex_count(), 36);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(is_manifold(&mesh));

        let bbox = mesh.bounding_box();
        assert!((bbox.size().x - 1.6).abs() < 1e-12);
        assert!((bbox.center().y).abs() < 1e-12);
    }

    #[test]
    fn test_cylinder_is_closed() {
        let mesh = Primitive::cylinder(0.55, 0.55, 0.02, 32).to_mesh();
        assert!(is_manifold(&mesh), "Cylinder mesh should be manifold");
        assert!(is_closed(&mesh), "Cylinder mesh should be closed");
        assert_eq!(mesh.vertex_count(), 2 + 32 * 2);
    }

    #[test]
    fn test_arc_shell_is_open() {
        let mesh = Primitive::arc_shell(0.7, 0.6, 1.4, 32, -PI / 3.0, 2.0 * PI / 3.0).to_mesh();
        assert_eq!(mesh.vertex_count(), 66);
        assert_eq!(mesh.triangle_count(), 64);
        assert!(is_manifold(&mesh));
        assert!(!is_closed(&mesh));
    }
}
