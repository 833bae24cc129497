// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! The configuration record and its variant axes

use super::color::Color;
use serde::{Deserialize, Serialize};

/// Equipment family. Selects presets and binding layout, never the outline algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentKind {
    Ski,
    Snowboard,
}

impl EquipmentKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ski => "ski",
            Self::Snowboard => "snowboard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipShape {
    Rounded,
    Blunt,
    Pointed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TailShape {
    Flat,
    Twin,
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CamberProfile {
    Camber,
    Rocker,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pattern {
    Solid,
    Carbon,
    Wood,
    Geometric,
    Camo,
    Splatter,
    LinearFade,
    TopoMap,
}

impl Pattern {
    pub const ALL: [Pattern; 8] = [
        Pattern::Solid,
        Pattern::Carbon,
        Pattern::Wood,
        Pattern::Geometric,
        Pattern::Camo,
        Pattern::Splatter,
        Pattern::LinearFade,
        Pattern::TopoMap,
    ];
}

/// Topsheet finish. Changes material reflectance only, except `Metal`
/// which also suppresses the grain layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finish {
    Glossy,
    Matte,
    Satin,
    Metal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Tip,
    Waist,
    Tail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Bold,
    Outline,
    Stencil,
    Handwritten,
    Retro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingMaterial {
    Plastic,
    Aluminum,
    Carbon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrapTexture {
    Rubber,
    Fabric,
    Leather,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WoodCore {
    Paulownia,
    Maple,
    Poplar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMaterial {
    Steel,
    Black,
    Gold,
}

/// Longitudinal and lateral envelope. Length in cm, widths in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub length: f64,
    pub tip_width: f64,
    pub waist_width: f64,
    pub tail_width: f64,
}

/// Complete equipment configuration.
///
/// Treated as an immutable value: edits produce a new record which replaces
/// the old one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(rename = "type")]
    pub kind: EquipmentKind,
    pub length: f64,
    pub tip_width: f64,
    pub waist_width: f64,
    pub tail_width: f64,
    pub camber_profile: CamberProfile,

    pub tail_shape: TailShape,
    pub tip_shape: TipShape,

    pub top_color: Color,
    pub sidewall_color: Color,
    pub logo_color: Color,
    pub binding_color: Color,
    pub binding_material: BindingMaterial,
    pub strap_color: Color,
    pub strap_texture: StrapTexture,
    pub text: String,
    pub text_position: TextPosition,
    pub font_style: FontStyle,

    pub wood_core: WoodCore,
    pub edge_material: EdgeMaterial,

    pub top_finish: Finish,
    pub top_pattern: Pattern,

    /// Explicit texture seed. When absent the seed is derived from the record itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Configuration {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            length: self.length,
            tip_width: self.tip_width,
            waist_width: self.waist_width,
            tail_width: self.tail_width,
        }
    }

    /// Load a configuration from its JSON form
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
