// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Engine settings: resolution, tessellation and shell parameters

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File picked up by [`EngineSettings::load`] from the working directory
pub const SETTINGS_FILE: &str = "skiform.toml";

/// Bevel applied to both extruded shells
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BevelSettings {
    /// Vertical extent of each chamfer
    pub thickness: f64,
    /// Lateral bulge of each chamfer
    pub size: f64,
}

impl Default for BevelSettings {
    fn default() -> Self {
        Self {
            thickness: 0.02,
            size: 0.02,
        }
    }
}

/// Parameters for one extruded shell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShellSettings {
    /// Body thickness in scene units
    pub thickness: f64,
    /// Lateral width offset in mm (negative insets the shell)
    pub width_offset_mm: f64,
    /// Vertical translation applied after deformation
    pub lift: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureSettings {
    pub width: u32,
    pub height: u32,
    /// Refuse to allocate rasters larger than this
    pub max_pixels: u64,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 4096,
            max_pixels: 64 * 1024 * 1024,
        }
    }
}

/// Engine-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub texture: TextureSettings,
    /// Samples per Bézier segment when flattening outlines
    pub curve_segments: usize,
    pub bevel: BevelSettings,
    /// Thin high-reflectance shell at full outline width
    pub edge_shell: ShellSettings,
    /// Thick topsheet shell, inset from the edge
    pub core_shell: ShellSettings,
    /// Deadline for a single suggestion request, in milliseconds
    pub suggestion_timeout_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            texture: TextureSettings::default(),
            curve_segments: 24,
            bevel: BevelSettings::default(),
            edge_shell: ShellSettings {
                thickness: 0.02,
                width_offset_mm: 0.0,
                lift: 0.0,
            },
            core_shell: ShellSettings {
                thickness: 0.15,
                width_offset_mm: -2.0,
                lift: 0.02,
            },
            suggestion_timeout_ms: 30_000,
        }
    }
}

impl EngineSettings {
    /// Load settings from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;
        let settings: EngineSettings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {:?}", path.as_ref()))?;
        Ok(settings)
    }

    /// Load settings with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut settings = if PathBuf::from(SETTINGS_FILE).exists() {
            Self::from_file(SETTINGS_FILE)?
        } else {
            Self::default()
        };

        settings.apply_env_overrides()?;
        Ok(settings)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(width) = std::env::var("SKIFORM_TEXTURE_WIDTH") {
            self.texture.width = width
                .parse()
                .context("Invalid SKIFORM_TEXTURE_WIDTH value")?;
        }

        if let Ok(height) = std::env::var("SKIFORM_TEXTURE_HEIGHT") {
            self.texture.height = height
                .parse()
                .context("Invalid SKIFORM_TEXTURE_HEIGHT value")?;
        }

        if let Ok(segments) = std::env::var("SKIFORM_CURVE_SEGMENTS") {
            self.curve_segments = segments
                .parse()
                .context("Invalid SKIFORM_CURVE_SEGMENTS value")?;
        }

        if let Ok(timeout) = std::env::var("SKIFORM_SUGGESTION_TIMEOUT_MS") {
            self.suggestion_timeout_ms = timeout
                .parse()
                .context("Invalid SKIFORM_SUGGESTION_TIMEOUT_MS value")?;
        }

        Ok(())
    }

    pub fn suggestion_timeout(&self) -> Duration {
        Duration::from_millis(self.suggestion_timeout_ms)
    }

    /// Save settings to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write settings file: {:?}", path.as_ref()))?;
        Ok(())
    }
}
