// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Skiform
//!
//! Parametric ski and snowboard synthesis: a configuration record goes in,
//! a textured, deformed solid with bindings comes out. Geometry and texture
//! synthesis are pure and deterministic; the design-assistant client is the
//! only asynchronous part.

pub mod assembly;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod suggest;
pub mod texture;
pub mod utils;

pub use assembly::{CacheStats, Model, ModelAssembler};
pub use config::{Color, Configuration, EngineSettings, EquipmentKind};
pub use error::{ExternalServiceError, GeometryError, TextureError};
pub use geometry::{Mesh, Outline, OutlineBuilder};
pub use io::{export_gltf, export_model, export_png, export_stl};
pub use suggest::{ConfigPatch, SpecGenerator, SuggestionClient, SuggestionOutcome};
pub use texture::RasterImage;

/// Assemble a model with default engine settings
pub fn compute(config: &Configuration) -> Result<Model, GeometryError> {
    assembly::compute(config, &EngineSettings::default())
}

/// Synthesize the topsheet texture at the default resolution
pub fn render_texture(config: &Configuration) -> Result<RasterImage, TextureError> {
    texture::render(config, &EngineSettings::default().texture)
}
