// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Instructions and response schema shipped to the design assistant

use crate::config::EquipmentKind;
use serde_json::{json, Value};

pub const SYSTEM_INSTRUCTION: &str = "\
You are the Chief Design Engineer at SEARL Custom Workshop.
Your job is to translate user desires (terrain, style, aesthetic vibe) into precise manufacturing specifications for Skis or Snowboards.

1. **Identify the Type**: Look for keywords. If the user mentions \"riding\", \"strapping in\", \"park board\", \"knuckle huck\", assume Snowboard. If \"skiing\", \"poles\", \"chutes\", \"touring\", assume Ski.

2. **Ski Dimensions logic**:
   - Powder: Wide waist (110mm+), Rocker, Pointed/Tapered Tip.
   - Park: Narrow waist (85-95mm), Camber, Twin Tip.
   - All Mountain: Mid waist (95-105mm), Hybrid profile.

3. **Snowboard Dimensions logic**:
   - Powder: Directional shape, setback, wide nose, often shorter and fatter (Volume Shift).
   - Park/Jib: True Twin, softer, shorter length.
   - Carving: Stiff, camber, directional.

4. **Aesthetics**:
   - Match the \"vibe\" to colors.
   - \"Stealth\" = Matte Black/Grey, exposed carbon.
   - \"Loud/Retro\" = Neon colors, splatter or geometric patterns.
   - \"Classic/Natural\" = Wood veneer, earth tones.

Return a JSON object with the specs. Include a 'reasoning' field (max 1 sentence) explaining the technical choice.
";

/// JSON schema constraining the assistant's answer
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": { "type": "string", "enum": ["ski", "snowboard"] },
            "length": { "type": "number" },
            "tipWidth": { "type": "number" },
            "waistWidth": { "type": "number" },
            "tailWidth": { "type": "number" },
            "camberProfile": { "type": "string", "enum": ["camber", "rocker", "hybrid"] },
            "tipShape": { "type": "string", "enum": ["rounded", "blunt", "pointed"] },
            "tailShape": { "type": "string", "enum": ["flat", "twin", "partial"] },
            "topColor": { "type": "string" },
            "logoColor": { "type": "string" },
            "sidewallColor": { "type": "string" },
            "woodCore": { "type": "string", "enum": ["maple", "paulownia", "poplar"] },
            "topPattern": { "type": "string" },
            "topFinish": { "type": "string" },
            "reasoning": { "type": "string" }
        }
    })
}

/// Append the equipment tag the assistant keys its logic on
pub fn tag_prompt(prompt: &str, kind: EquipmentKind) -> String {
    match kind {
        EquipmentKind::Ski => format!("{prompt} (Ski)"),
        EquipmentKind::Snowboard => format!("{prompt} (Snowboard)"),
    }
}

/// One-click prompts offered for each kind
pub fn quick_prompts(kind: EquipmentKind) -> &'static [&'static str] {
    match kind {
        EquipmentKind::Ski => &["Big Mountain Powder", "Carving Machine", "Backcountry Touring"],
        EquipmentKind::Snowboard => &[
            "All-Mountain Cruiser",
            "Deep Powder Surfer",
            "Street Rail Specialist",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagging() {
        assert_eq!(tag_prompt("pow day", EquipmentKind::Snowboard), "pow day (Snowboard)");
        assert_eq!(tag_prompt("groomers", EquipmentKind::Ski), "groomers (Ski)");
    }

    #[test]
    fn test_schema_lists_reasoning() {
        let schema = response_schema();
        assert!(schema["properties"]["reasoning"].is_object());
        assert_eq!(schema["properties"]["type"]["enum"][1], "snowboard");
    }
}
