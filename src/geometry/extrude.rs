// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Beveled extrusion of an outline into a deformed solid
//!
//! The outline plane maps onto the scene as `x -> X` (lateral) and
//! `y -> Z` (longitudinal, tip at -Z); extrusion runs along +Y. The top cap
//! sits at `Y = bevel.thickness` and the bottom cap at
//! `Y = -(thickness + bevel.thickness)` before deformation.

use super::outline::Outline;
use super::profile::ProfileDeformer;
use super::triangulate::triangulate_polygon;
use super::{Mesh, Triangle, Vertex};
use crate::config::BevelSettings;
use crate::error::GeometryError;
use nalgebra::{Point2, Point3, Vector2, Vector3};
use std::f64::consts::FRAC_PI_2;
use tracing::{debug, instrument};

/// Miter length is capped at this multiple of the bevel size
const MAX_MITER: f64 = 4.0;

/// Chamfer rings per bevel
pub const BEVEL_SEGMENTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeSettings {
    /// Body depth between the two bevels
    pub thickness: f64,
    pub bevel: BevelSettings,
    /// Samples per Bézier segment when flattening the outline
    pub curve_segments: usize,
}

impl Default for ExtrudeSettings {
    fn default() -> Self {
        Self {
            thickness: 0.02,
            bevel: BevelSettings::default(),
            curve_segments: 24,
        }
    }
}

impl ExtrudeSettings {
    /// Number of stacked vertex rings
    pub fn ring_count(&self) -> usize {
        2 * BEVEL_SEGMENTS + 2
    }

    /// Expected (vertices, triangles) for an outline flattened to `n` points
    pub fn expected_counts(&self, n: usize) -> (usize, usize) {
        let rings = self.ring_count();
        (rings * n, 2 * (rings - 1) * n + 2 * n.saturating_sub(2))
    }

    /// Height of the top cap before deformation
    pub fn top_height(&self) -> f64 {
        self.bevel.thickness
    }

    /// (lateral offset, height) for each ring, bottom to top
    fn rings(&self) -> Vec<(f64, f64)> {
        let segments = BEVEL_SEGMENTS;
        let bt = self.bevel.thickness;
        let bs = self.bevel.size;
        let mut rings = Vec::with_capacity(self.ring_count());

        for b in 0..segments {
            let t = b as f64 / segments as f64 * FRAC_PI_2;
            rings.push((bs * t.sin(), -self.thickness - bt * t.cos()));
        }

        rings.push((bs, -self.thickness));
        rings.push((bs, 0.0));

        for b in (0..segments).rev() {
            let t = b as f64 / segments as f64 * FRAC_PI_2;
            rings.push((bs * t.sin(), bt * t.cos()));
        }

        rings
    }
}

/// Extrudes outlines into closed, deformed solids
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidExtruder {
    settings: ExtrudeSettings,
}

impl SolidExtruder {
    pub fn new(settings: ExtrudeSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ExtrudeSettings {
        &self.settings
    }

    /// Extrude and apply the longitudinal profile
    #[instrument(skip_all, fields(thickness = self.settings.thickness))]
    pub fn extrude(
        &self,
        outline: &Outline,
        deformer: &ProfileDeformer,
    ) -> Result<Mesh, GeometryError> {
        let mut mesh = self.build_prism(outline)?;
        let half_length = outline.half_length();
        let top = self.settings.top_height();

        for vertex in &mut mesh.vertices {
            let p = if half_length > 0.0 {
                vertex.position.z / half_length
            } else {
                0.0
            };
            let elevation = deformer.elevation(p);
            let depth = top - vertex.position.y;
            vertex.position.y = top - depth * elevation.thickness_scale + elevation.dy;
        }

        mesh.recompute_normals();
        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "extruded shell"
        );
        Ok(mesh)
    }

    /// Extrude without deformation
    pub fn extrude_flat(&self, outline: &Outline) -> Result<Mesh, GeometryError> {
        let mut mesh = self.build_prism(outline)?;
        mesh.recompute_normals();
        Ok(mesh)
    }

    fn build_prism(&self, outline: &Outline) -> Result<Mesh, GeometryError> {
        let points = outline.to_polyline(self.settings.curve_segments);
        let n = points.len();
        let cap = triangulate_polygon(&points)?;
        let offsets = miter_offsets(&points);
        let rings = self.settings.rings();

        let (min, max) = outline.bounds(self.settings.curve_segments);
        let span = |lo: f64, hi: f64, v: f64| if hi > lo { (v - lo) / (hi - lo) } else { 0.0 };

        let (vertex_count, triangle_count) = self.settings.expected_counts(n);
        let mut mesh = Mesh::with_capacity(vertex_count, triangle_count);

        for &(offset, height) in &rings {
            for (point, miter) in points.iter().zip(&offsets) {
                let shifted = point + miter * offset;
                let uv = Point2::new(span(min.x, max.x, point.x), span(min.y, max.y, point.y));
                mesh.add_vertex(Vertex::with_uv(
                    Point3::new(shifted.x, height, shifted.y),
                    Vector3::y(),
                    uv,
                ));
            }
        }

        // Side walls, outward for a counter-clockwise outline
        for r in 0..rings.len() - 1 {
            let lower = r * n;
            let upper = (r + 1) * n;
            for i in 0..n {
                let j = (i + 1) % n;
                let (a, b, c, d) = (lower + i, lower + j, upper + j, upper + i);
                mesh.add_triangle(Triangle::new([a, c, b]));
                mesh.add_triangle(Triangle::new([a, d, c]));
            }
        }

        // Mapping y -> Z mirrors the plane, so counter-clockwise caps face -Y
        for [a, b, c] in &cap {
            mesh.add_triangle(Triangle::new([*a, *b, *c]));
        }
        let top = (rings.len() - 1) * n;
        for [a, b, c] in &cap {
            mesh.add_triangle(Triangle::new([top + a, top + c, top + b]));
        }

        Ok(mesh)
    }
}

/// Per-vertex outward offset directions, scaled so offset edges stay parallel
fn miter_offsets(points: &[Point2<f64>]) -> Vec<Vector2<f64>> {
    let n = points.len();
    let outward = |a: &Point2<f64>, b: &Point2<f64>| {
        let d = b - a;
        let len = d.norm();
        if len > 0.0 {
            Vector2::new(d.y, -d.x) / len
        } else {
            Vector2::zeros()
        }
    };

    (0..n)
        .map(|i| {
            let prev = &points[(i + n - 1) % n];
            let here = &points[i];
            let next = &points[(i + 1) % n];
            let n0 = outward(prev, here);
            let n1 = outward(here, next);
            let bisector = n0 + n1;
            let len = bisector.norm();
            if len < 1e-9 {
                return n0;
            }
            let dir = bisector / len;
            let cos = dir.dot(&n0).max(1.0 / MAX_MITER);
            dir / cos
        })
        .collect()
}
