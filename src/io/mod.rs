// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - exporting models, meshes and textures

mod export_gltf;
mod export_stl;

pub use export_gltf::{export as export_gltf, to_glb, to_gltf};
pub use export_stl::{export as export_stl, write_stl};

use crate::assembly::Model;
use crate::texture::RasterImage;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Formats a model can be written as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Gltf,
    Glb,
    Stl,
    Png,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        Ok(match ext.as_str() {
            "gltf" => Self::Gltf,
            "glb" => Self::Glb,
            "stl" => Self::Stl,
            "png" => Self::Png,
            other => bail!("Unsupported export format: {other:?} (expected gltf, glb, stl or png)"),
        })
    }
}

/// Write the topsheet texture as PNG
pub fn export_png(texture: &RasterImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    texture
        .save_png(path)
        .with_context(|| format!("Failed to write texture to {}", path.display()))
}

/// Export a model to `path`, picking the format from the extension.
///
/// STL carries the board shells of one instance only; PNG carries the texture.
pub fn export_model(model: &Model, path: impl AsRef<Path>) -> Result<ExportFormat> {
    let path = path.as_ref();
    let format = ExportFormat::from_path(path)?;
    match format {
        ExportFormat::Gltf | ExportFormat::Glb => export_gltf(model, path)?,
        ExportFormat::Stl => export_stl(&model.board_mesh(), path)?,
        ExportFormat::Png => export_png(&model.texture, path)?,
    }
    Ok(format)
}
