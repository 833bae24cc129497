// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Model assembly: shells, texture, bindings and materials for one configuration

use super::bindings::{self, Part};
use super::materials::{MaterialSet, MaterialSpec};
use crate::config::{Configuration, EngineSettings, EquipmentKind, ShellSettings};
use crate::error::GeometryError;
use crate::geometry::{
    BoundingBox, ExtrudeSettings, Mesh, OutlineBuilder, ProfileDeformer, SolidExtruder,
};
use crate::texture::{self, RasterImage};
use nalgebra::{Matrix4, Vector3};
use serde::Serialize;
use std::ops::Range;
use tracing::{info, instrument, warn};

/// Lateral spacing of each ski from the centreline
pub const SKI_PAIR_OFFSET: f64 = 1.5;

/// A contiguous triangle range drawn with one material
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Surface {
    pub triangles: Range<usize>,
    pub material: MaterialSpec,
}

/// One extruded shell and its surfaces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shell {
    pub mesh: Mesh,
    pub surfaces: Vec<Surface>,
}

impl Shell {
    fn uniform(mesh: Mesh, material: MaterialSpec) -> Self {
        let triangles = 0..mesh.triangle_count();
        Self {
            mesh,
            surfaces: vec![Surface {
                triangles,
                material,
            }],
        }
    }
}

/// Everything needed to display or export one configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Thin reflective rim at full outline width
    pub edge: Shell,
    /// Textured topsheet body with sidewalls
    pub core: Shell,
    pub texture: RasterImage,
    /// The texture is a flat fill because synthesis failed
    pub texture_fallback: bool,
    pub bindings: Vec<Part>,
    /// Placements of the whole assembly (a pair for skis)
    pub instances: Vec<Matrix4<f64>>,
    pub materials: MaterialSet,
}

impl Model {
    /// Total triangles of one instance
    pub fn triangle_count(&self) -> usize {
        self.edge.mesh.triangle_count()
            + self.core.mesh.triangle_count()
            + self.bindings.iter().map(|p| p.mesh.triangle_count()).sum::<usize>()
    }

    pub fn vertex_count(&self) -> usize {
        self.edge.mesh.vertex_count()
            + self.core.mesh.vertex_count()
            + self.bindings.iter().map(|p| p.mesh.vertex_count()).sum::<usize>()
    }

    /// Bounds of one instance
    pub fn bounding_box(&self) -> BoundingBox {
        std::iter::once(&self.core.mesh)
            .chain(self.bindings.iter().map(|p| &p.mesh))
            .fold(self.edge.mesh.bounding_box(), |bbox, mesh| {
                bbox.union(&mesh.bounding_box())
            })
    }

    /// Edge and core shells merged, e.g. for STL export
    pub fn board_mesh(&self) -> Mesh {
        let mut mesh = self.edge.mesh.clone();
        mesh.merge(&self.core.mesh);
        mesh
    }
}

fn extrude_shell(
    config: &Configuration,
    settings: &EngineSettings,
    shell: &ShellSettings,
) -> Result<(Mesh, usize), GeometryError> {
    let outline = OutlineBuilder::new()
        .with_width_offset(shell.width_offset_mm)
        .with_curve_segments(settings.curve_segments)
        .build(&config.dimensions(), config.tip_shape, config.tail_shape)?;

    let extrude = ExtrudeSettings {
        thickness: shell.thickness,
        bevel: settings.bevel,
        curve_segments: settings.curve_segments,
    };
    let deformer = ProfileDeformer::new(config.camber_profile, config.tail_shape);
    let mut mesh = SolidExtruder::new(extrude).extrude(&outline, &deformer)?;
    if shell.lift != 0.0 {
        mesh.translate(Vector3::new(0.0, shell.lift, 0.0));
    }

    // Side walls come first, caps last
    let n = outline.to_polyline(settings.curve_segments).len();
    let sides = 2 * (extrude.ring_count() - 1) * n;
    Ok((mesh, sides))
}

/// Placements for the assembled equipment
pub fn instances(kind: EquipmentKind) -> Vec<Matrix4<f64>> {
    match kind {
        EquipmentKind::Ski => vec![
            Matrix4::new_translation(&Vector3::new(-SKI_PAIR_OFFSET, 0.0, 0.0)),
            Matrix4::new_translation(&Vector3::new(SKI_PAIR_OFFSET, 0.0, 0.0)),
        ],
        EquipmentKind::Snowboard => vec![Matrix4::identity()],
    }
}

/// Build the full model for a configuration. Pure: no caching, no side effects.
#[instrument(skip_all, fields(kind = config.kind.label(), length = config.length))]
pub fn compute(config: &Configuration, settings: &EngineSettings) -> Result<Model, GeometryError> {
    let materials = MaterialSet::for_config(config);

    let (edge_mesh, _) = extrude_shell(config, settings, &settings.edge_shell)?;
    let (core_mesh, sides) = extrude_shell(config, settings, &settings.core_shell)?;

    let edge = Shell::uniform(edge_mesh, materials.edge.clone());
    let core_triangles = core_mesh.triangle_count();
    let core = Shell {
        mesh: core_mesh,
        surfaces: vec![
            Surface {
                triangles: 0..sides,
                material: materials.sidewall.clone(),
            },
            Surface {
                triangles: sides..core_triangles,
                material: materials.topsheet.clone(),
            },
        ],
    };

    let (texture, texture_fallback) = match texture::render(config, &settings.texture) {
        Ok(image) => (image, false),
        Err(err) => {
            warn!(error = %err, "texture synthesis failed, using flat base color");
            (texture::fallback(config), true)
        }
    };

    let model = Model {
        edge,
        core,
        texture,
        texture_fallback,
        bindings: bindings::build(config),
        instances: instances(config.kind),
        materials,
    };

    info!(
        triangles = model.triangle_count(),
        parts = model.bindings.len(),
        "assembled model"
    );
    Ok(model)
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub failures: usize,
}

/// Keeps the last successfully assembled model and rebuilds it only when
/// the configuration changes. A failed rebuild leaves the previous model in place.
pub struct ModelAssembler {
    settings: EngineSettings,
    current: Option<(Configuration, Model)>,
    stats: CacheStats,
}

impl ModelAssembler {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            current: None,
            stats: CacheStats::default(),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Replace the settings; the cached model is dropped
    pub fn set_settings(&mut self, settings: EngineSettings) {
        self.settings = settings;
        self.current = None;
    }

    /// Model for `config`, rebuilt only if the configuration differs from the cached one
    pub fn update(&mut self, config: &Configuration) -> Result<&Model, GeometryError> {
        let entry = match self.current.take() {
            Some(entry) if entry.0 == *config => {
                self.stats.hits += 1;
                entry
            }
            previous => {
                self.stats.misses += 1;
                match compute(config, &self.settings) {
                    Ok(model) => (config.clone(), model),
                    Err(err) => {
                        self.current = previous;
                        self.stats.failures += 1;
                        warn!(error = %err, "recomputation failed, keeping previous model");
                        return Err(err);
                    }
                }
            }
        };
        Ok(&self.current.insert(entry).1)
    }

    /// Last successfully assembled model
    pub fn model(&self) -> Option<&Model> {
        self.current.as_ref().map(|(_, model)| model)
    }

    /// Configuration the current model was built from
    pub fn configuration(&self) -> Option<&Configuration> {
        self.current.as_ref().map(|(config, _)| config)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for ModelAssembler {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}
