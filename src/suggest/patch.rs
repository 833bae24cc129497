// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Partial configurations returned by the design assistant

use crate::config::*;
use crate::error::ExternalServiceError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Any subset of configuration fields, plus the assistant's rationale.
///
/// Unknown keys are ignored. Keys with values that do not parse are dropped
/// individually and listed in `dropped`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    pub kind: Option<EquipmentKind>,
    pub length: Option<f64>,
    pub tip_width: Option<f64>,
    pub waist_width: Option<f64>,
    pub tail_width: Option<f64>,
    pub camber_profile: Option<CamberProfile>,
    pub tail_shape: Option<TailShape>,
    pub tip_shape: Option<TipShape>,
    pub top_color: Option<Color>,
    pub sidewall_color: Option<Color>,
    pub logo_color: Option<Color>,
    pub binding_color: Option<Color>,
    pub binding_material: Option<BindingMaterial>,
    pub strap_color: Option<Color>,
    pub strap_texture: Option<StrapTexture>,
    pub text: Option<String>,
    pub text_position: Option<TextPosition>,
    pub font_style: Option<FontStyle>,
    pub wood_core: Option<WoodCore>,
    pub edge_material: Option<EdgeMaterial>,
    pub top_finish: Option<Finish>,
    pub top_pattern: Option<Pattern>,
    pub reasoning: Option<String>,
    #[serde(skip)]
    pub dropped: Vec<String>,
}

struct Fields<'a> {
    object: &'a Map<String, Value>,
    dropped: Vec<String>,
}

impl Fields<'_> {
    fn get<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let value = self.object.get(key)?;
        if value.is_null() {
            return None;
        }
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!(field = key, %value, error = %err, "dropping invalid suggestion field");
                self.dropped.push(key.to_string());
                None
            }
        }
    }

    fn dimension(&mut self, key: &str) -> Option<f64> {
        let value: f64 = self.get(key)?;
        if value.is_finite() && value > 0.0 {
            Some(value)
        } else {
            warn!(field = key, value, "dropping non-positive dimension");
            self.dropped.push(key.to_string());
            None
        }
    }
}

impl ConfigPatch {
    /// Parse the assistant's JSON text
    pub fn parse(text: &str) -> Result<Self, ExternalServiceError> {
        let body = strip_code_fence(text.trim());
        if body.is_empty() {
            return Err(ExternalServiceError::Empty);
        }
        let value: Value = serde_json::from_str(body)
            .map_err(|err| ExternalServiceError::Malformed(err.to_string()))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, ExternalServiceError> {
        let object = value.as_object().ok_or_else(|| {
            ExternalServiceError::Malformed(format!("expected a JSON object, got {value}"))
        })?;
        let mut f = Fields {
            object,
            dropped: Vec::new(),
        };

        let mut patch = ConfigPatch {
            kind: f.get("type"),
            length: f.dimension("length"),
            tip_width: f.dimension("tipWidth"),
            waist_width: f.dimension("waistWidth"),
            tail_width: f.dimension("tailWidth"),
            camber_profile: f.get("camberProfile"),
            tail_shape: f.get("tailShape"),
            tip_shape: f.get("tipShape"),
            top_color: f.get("topColor"),
            sidewall_color: f.get("sidewallColor"),
            logo_color: f.get("logoColor"),
            binding_color: f.get("bindingColor"),
            binding_material: f.get("bindingMaterial"),
            strap_color: f.get("strapColor"),
            strap_texture: f.get("strapTexture"),
            text: f.get("text"),
            text_position: f.get("textPosition"),
            font_style: f.get("fontStyle"),
            wood_core: f.get("woodCore"),
            edge_material: f.get("edgeMaterial"),
            top_finish: f.get("topFinish"),
            top_pattern: f.get("topPattern"),
            reasoning: f.get("reasoning"),
            dropped: Vec::new(),
        };
        patch.dropped = f.dropped;
        Ok(patch)
    }

    /// True when no configuration field is set (reasoning alone does not count)
    pub fn is_empty(&self) -> bool {
        let mut fields = self.clone();
        fields.reasoning = None;
        fields.dropped.clear();
        fields == Self::default()
    }

    /// Overlay the patch onto `base`, leaving unspecified fields untouched
    pub fn apply(&self, base: &Configuration) -> Configuration {
        let mut config = base.clone();
        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = &self.$field {
                    config.$field = value.clone();
                })*
            };
        }
        overlay!(
            kind,
            length,
            tip_width,
            waist_width,
            tail_width,
            camber_profile,
            tail_shape,
            tip_shape,
            top_color,
            sidewall_color,
            logo_color,
            binding_color,
            binding_material,
            strap_color,
            strap_texture,
            text,
            text_position,
            font_style,
            wood_core,
            edge_material,
            top_finish,
            top_pattern,
        );
        config
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_patch_applies_subset() {
        let patch = ConfigPatch::parse(
            r##"{"waistWidth": 115, "camberProfile": "rocker", "topColor": "#ff6600",
                "reasoning": "Wide and rockered for float.", "modelName": "ignored"}"##,
        )
        .unwrap();
        assert_eq!(patch.reasoning.as_deref(), Some("Wide and rockered for float."));
        assert!(patch.dropped.is_empty());

        let base = Configuration::default();
        let next = patch.apply(&base);
        assert_eq!(next.waist_width, 115.0);
        assert_eq!(next.camber_profile, CamberProfile::Rocker);
        assert_eq!(next.top_color, Color::rgb(0xff, 0x66, 0x00));
        assert_eq!(next.length, base.length);
        assert_eq!(next.text, base.text);
    }

    #[test]
    fn test_invalid_values_are_dropped_individually() {
        let patch = ConfigPatch::parse(
            r##"{"length": -10, "tipWidth": "wide", "topPattern": "plaid", "tailShape": "twin"}"##,
        )
        .unwrap();
        assert_eq!(patch.length, None);
        assert_eq!(patch.tip_width, None);
        assert_eq!(patch.top_pattern, None);
        assert_eq!(patch.tail_shape, Some(TailShape::Twin));
        assert_eq!(patch.dropped, vec!["length", "tipWidth", "topPattern"]);
    }

    #[test]
    fn test_malformed_and_empty() {
        assert!(matches!(
            ConfigPatch::parse("{not json"),
            Err(ExternalServiceError::Malformed(_))
        ));
        assert!(matches!(
            ConfigPatch::parse("[1, 2]"),
            Err(ExternalServiceError::Malformed(_))
        ));
        assert_eq!(ConfigPatch::parse("   "), Err(ExternalServiceError::Empty));
    }

    #[test]
    fn test_fenced_response() {
        let patch = ConfigPatch::parse("```json\n{\"type\": \"snowboard\"}\n```").unwrap();
        assert_eq!(patch.kind, Some(EquipmentKind::Snowboard));
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_reasoning_only_is_empty() {
        let patch = ConfigPatch::parse(r#"{"reasoning": "Nothing to change."}"#).unwrap();
        assert!(patch.is_empty());
        assert_eq!(patch.apply(&Configuration::default()), Configuration::default());
    }
}
