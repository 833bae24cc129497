// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Configuration module - equipment record, presets and engine settings

mod color;
mod presets;
mod settings;
mod types;

pub use color::{Color, ColorParseError};
pub use presets::DimensionRanges;
pub use settings::{BevelSettings, EngineSettings, ShellSettings, TextureSettings, SETTINGS_FILE};
pub use types::*;
