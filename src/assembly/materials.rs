// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Physically-based material descriptions
//!
//! These only describe reflectance; shading is left to whatever consumes the model.

use crate::config::{
    BindingMaterial, Color, Configuration, EdgeMaterial, Finish, StrapTexture, WoodCore,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSpec {
    pub name: String,
    pub color: Color,
    pub metalness: f64,
    pub roughness: f64,
    pub clearcoat: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive: Option<Color>,
    pub emissive_intensity: f64,
    /// Surface carries the synthesized texture as its color map
    pub textured: bool,
    pub double_sided: bool,
}

impl MaterialSpec {
    pub fn new(name: impl Into<String>, color: Color, metalness: f64, roughness: f64) -> Self {
        Self {
            name: name.into(),
            color,
            metalness,
            roughness,
            clearcoat: 0.0,
            emissive: None,
            emissive_intensity: 0.0,
            textured: false,
            double_sided: false,
        }
    }

    pub fn with_clearcoat(mut self, clearcoat: f64) -> Self {
        self.clearcoat = clearcoat;
        self
    }

    pub fn with_emissive(mut self, color: Color, intensity: f64) -> Self {
        self.emissive = Some(color);
        self.emissive_intensity = intensity;
        self
    }

    pub fn textured(mut self) -> Self {
        self.textured = true;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}

/// Topsheet: white base so the texture shows through unmodified
pub fn topsheet(finish: Finish) -> MaterialSpec {
    let (metalness, roughness, clearcoat) = match finish {
        Finish::Metal => (1.0, 0.15, 0.8),
        Finish::Matte => (0.1, 0.9, 0.0),
        Finish::Satin => (0.4, 0.3, 0.4),
        Finish::Glossy => (0.1, 0.05, 1.0),
    };
    MaterialSpec::new("topsheet", Color::WHITE, metalness, roughness)
        .with_clearcoat(clearcoat)
        .textured()
}

pub fn edge(material: EdgeMaterial) -> MaterialSpec {
    match material {
        EdgeMaterial::Gold => MaterialSpec::new("edge", Color::rgb(0xff, 0xd7, 0x00), 1.0, 0.1),
        EdgeMaterial::Black => MaterialSpec::new("edge", Color::rgb(0x11, 0x11, 0x11), 0.5, 0.4),
        EdgeMaterial::Steel => MaterialSpec::new("edge", Color::rgb(0xe5, 0xe7, 0xeb), 0.9, 0.1),
    }
}

pub fn sidewall(color: Color) -> MaterialSpec {
    MaterialSpec::new("sidewall", color, 0.0, 0.5)
}

/// Binding chassis
pub fn chassis(material: BindingMaterial, color: Color) -> MaterialSpec {
    match material {
        BindingMaterial::Aluminum => {
            MaterialSpec::new("chassis", color, 0.8, 0.3).with_clearcoat(0.1)
        }
        BindingMaterial::Carbon => MaterialSpec::new("chassis", Color::rgb(0x1a, 0x1a, 0x1a), 0.4, 0.4)
            .with_clearcoat(0.5)
            .with_emissive(color, 0.05),
        BindingMaterial::Plastic => MaterialSpec::new("chassis", color, 0.0, 0.6),
    }
}

pub fn heelcup(material: BindingMaterial, color: Color) -> MaterialSpec {
    match material {
        BindingMaterial::Carbon => MaterialSpec::new("heelcup", Color::rgb(0x22, 0x22, 0x22), 0.7, 0.4),
        BindingMaterial::Aluminum => MaterialSpec::new("heelcup", color, 0.85, 0.25),
        // Plastic chassis pair with an aluminium heel loop
        BindingMaterial::Plastic => MaterialSpec::new("heelcup", Color::rgb(0x0f, 0x17, 0x2a), 0.8, 0.3),
    }
}

pub fn strap(texture: StrapTexture, color: Color) -> MaterialSpec {
    match texture {
        StrapTexture::Leather => MaterialSpec::new("strap", color, 0.0, 0.4).with_clearcoat(0.2),
        StrapTexture::Fabric => MaterialSpec::new("strap", color, 0.0, 0.9),
        StrapTexture::Rubber => MaterialSpec::new("strap", color, 0.0, 0.6),
    }
}

/// Fixed trim materials used by binding hardware
pub mod trim {
    use super::MaterialSpec;
    use crate::config::Color;

    pub fn disc() -> MaterialSpec {
        MaterialSpec::new("disc", Color::rgb(0x22, 0x22, 0x22), 0.6, 0.7)
    }

    pub fn footbed() -> MaterialSpec {
        MaterialSpec::new("footbed", Color::rgb(0x1a, 0x1a, 0x1a), 0.0, 0.9)
    }

    pub fn adjuster() -> MaterialSpec {
        MaterialSpec::new("adjuster", Color::rgb(0x33, 0x33, 0x33), 0.0, 0.8)
    }

    pub fn buckle() -> MaterialSpec {
        MaterialSpec::new("buckle", Color::rgb(0x88, 0x88, 0x88), 0.9, 0.3)
    }

    pub fn rubber() -> MaterialSpec {
        MaterialSpec::new("rubber", Color::rgb(0x11, 0x11, 0x11), 0.0, 1.0)
    }

    pub fn pad() -> MaterialSpec {
        MaterialSpec::new("pad", Color::BLACK, 0.0, 1.0)
    }

    pub fn lever() -> MaterialSpec {
        MaterialSpec::new("lever", Color::rgb(0x33, 0x33, 0x33), 0.5, 1.0)
    }

    pub fn plate() -> MaterialSpec {
        MaterialSpec::new("plate", Color::rgb(0x11, 0x11, 0x11), 0.8, 0.2)
    }
}

/// Materials for the two shells of one configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSet {
    pub edge: MaterialSpec,
    pub topsheet: MaterialSpec,
    pub sidewall: MaterialSpec,
    /// Reported only; the core is not visible
    pub wood_core: WoodCore,
}

impl MaterialSet {
    pub fn for_config(config: &Configuration) -> Self {
        Self {
            edge: edge(config.edge_material),
            topsheet: topsheet(config.top_finish),
            sidewall: sidewall(config.sidewall_color),
            wood_core: config.wood_core,
        }
    }
}
