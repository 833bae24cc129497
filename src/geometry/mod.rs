// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - outline, profile, extrusion and mesh representation

mod bbox;
mod extrude;
mod mesh;
pub mod mesh_utils;
mod outline;
mod primitives;
mod profile;
mod triangulate;

pub use bbox::BoundingBox;
pub use extrude::{ExtrudeSettings, SolidExtruder, BEVEL_SEGMENTS};
pub use mesh::{Mesh, Triangle, Vertex};
pub use outline::{Outline, OutlineBuilder, Segment, LENGTH_UNIT_CM, WIDTH_UNIT_MM};
pub use primitives::Primitive;
pub use profile::{
    base_height, elevation, kick, kick_coefficient, thickness_scale, Elevation, ProfileDeformer,
};
pub use triangulate::triangulate_polygon;
