// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Procedural surface texture synthesis

pub mod patterns;
mod raster;
mod seed;
mod synth;
pub mod text;

pub use raster::{flatten_cubic, Canvas, RasterImage};
pub use seed::{texture_rng, texture_seed};
pub use synth::{
    branding, fallback, render, text_station, TextureSynthesizer, REFERENCE_HEIGHT, REFERENCE_WIDTH,
};
