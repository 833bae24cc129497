// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Factory presets and per-kind dimension ranges

use super::color::Color;
use super::types::*;
use std::ops::RangeInclusive;

/// Nominal slider ranges for one equipment kind
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionRanges {
    pub length: RangeInclusive<f64>,
    pub tip_width: RangeInclusive<f64>,
    pub waist_width: RangeInclusive<f64>,
    pub tail_width: RangeInclusive<f64>,
}

impl DimensionRanges {
    pub fn contains(&self, dims: &Dimensions) -> bool {
        self.length.contains(&dims.length)
            && self.tip_width.contains(&dims.tip_width)
            && self.waist_width.contains(&dims.waist_width)
            && self.tail_width.contains(&dims.tail_width)
    }
}

impl EquipmentKind {
    /// Preset envelope applied when switching to this kind
    pub fn preset_dimensions(&self) -> Dimensions {
        match self {
            Self::Ski => Dimensions {
                length: 184.0,
                tip_width: 138.0,
                waist_width: 108.0,
                tail_width: 128.0,
            },
            Self::Snowboard => Dimensions {
                length: 156.0,
                tip_width: 298.0,
                waist_width: 254.0,
                tail_width: 298.0,
            },
        }
    }

    /// Branding station applied when switching to this kind
    pub fn preset_text_position(&self) -> TextPosition {
        match self {
            Self::Ski => TextPosition::Tail,
            Self::Snowboard => TextPosition::Waist,
        }
    }

    pub fn dimension_ranges(&self) -> DimensionRanges {
        match self {
            Self::Ski => DimensionRanges {
                length: 145.0..=195.0,
                tip_width: 90.0..=160.0,
                waist_width: 65.0..=130.0,
                tail_width: 80.0..=150.0,
            },
            Self::Snowboard => DimensionRanges {
                length: 135.0..=170.0,
                tip_width: 270.0..=340.0,
                waist_width: 230.0..=290.0,
                tail_width: 270.0..=340.0,
            },
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            kind: EquipmentKind::Ski,
            length: 184.0,
            tip_width: 138.0,
            waist_width: 108.0,
            tail_width: 128.0,
            camber_profile: CamberProfile::Hybrid,
            tail_shape: TailShape::Partial,
            tip_shape: TipShape::Rounded,
            top_color: Color::WHITE,
            sidewall_color: Color::rgb(0x3b, 0x82, 0xf6),
            logo_color: Color::rgb(0x0f, 0x17, 0x2a),
            binding_color: Color::rgb(0x1e, 0x29, 0x3b),
            binding_material: BindingMaterial::Plastic,
            strap_color: Color::rgb(0x0f, 0x17, 0x2a),
            strap_texture: StrapTexture::Fabric,
            text: "SEARL ONE".to_string(),
            text_position: TextPosition::Tail,
            font_style: FontStyle::Bold,
            wood_core: WoodCore::Maple,
            edge_material: EdgeMaterial::Steel,
            top_finish: Finish::Glossy,
            top_pattern: Pattern::Solid,
            seed: None,
        }
    }
}

impl Configuration {
    /// Switch equipment kind, applying that kind's dimension preset and
    /// branding station. Returns an unchanged copy when the kind already matches.
    pub fn with_kind(&self, kind: EquipmentKind) -> Configuration {
        if self.kind == kind {
            return self.clone();
        }

        let dims = kind.preset_dimensions();
        Configuration {
            kind,
            length: dims.length,
            tip_width: dims.tip_width,
            waist_width: dims.waist_width,
            tail_width: dims.tail_width,
            text_position: kind.preset_text_position(),
            ..self.clone()
        }
    }

    /// Factory preset for a kind
    pub fn preset(kind: EquipmentKind) -> Configuration {
        Configuration::default().with_kind(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_to_snowboard() {
        let ski = Configuration::default();
        let board = ski.with_kind(EquipmentKind::Snowboard);

        assert_eq!(board.kind, EquipmentKind::Snowboard);
        assert_eq!(board.length, 156.0);
        assert_eq!(board.tip_width, 298.0);
        assert_eq!(board.waist_width, 254.0);
        assert_eq!(board.tail_width, 298.0);
        assert_eq!(board.text_position, TextPosition::Waist);
        // Unrelated fields survive
        assert_eq!(board.top_color, ski.top_color);
        assert_eq!(board.text, ski.text);
    }

    #[test]
    fn test_switch_back_to_ski() {
        let board = Configuration::preset(EquipmentKind::Snowboard);
        let ski = board.with_kind(EquipmentKind::Ski);
        assert_eq!(ski.dimensions(), EquipmentKind::Ski.preset_dimensions());
        assert_eq!(ski.text_position, TextPosition::Tail);
    }

    #[test]
    fn test_same_kind_is_noop() {
        let mut custom = Configuration::default();
        custom.length = 170.0;
        custom.text_position = TextPosition::Tip;
        assert_eq!(custom.with_kind(EquipmentKind::Ski), custom);
    }

    #[test]
    fn test_presets_lie_within_ranges() {
        for kind in [EquipmentKind::Ski, EquipmentKind::Snowboard] {
            assert!(kind.dimension_ranges().contains(&kind.preset_dimensions()));
        }
    }
}
