// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::assembly::Model;
use crate::config::Configuration;
use crate::suggest::SuggestionOutcome;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    fn rule() {
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Summary of an assembled model
    pub fn report_model(label: &str, model: &Model, duration: Duration) {
        println!();
        Self::rule();
        println!("{} {}", "Assembled:".bold(), label.cyan());
        Self::rule();

        let bbox = model.bounding_box();
        let size = bbox.size();
        Self::print_field("Instances", &model.instances.len().to_string());
        Self::print_field("Vertices", &model.vertex_count().to_string());
        Self::print_field("Triangles", &model.triangle_count().to_string());
        Self::print_field("Binding parts", &model.bindings.len().to_string());
        Self::print_field(
            "Extent",
            &format!("{:.3} x {:.3} x {:.3}", size.x, size.y, size.z),
        );
        Self::print_field(
            "Texture",
            &format!("{}x{}", model.texture.width(), model.texture.height()),
        );
        if model.texture_fallback {
            println!(
                "  {}",
                "texture synthesis failed; using flat base color".yellow()
            );
        }
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        Self::rule();
    }

    /// Human-readable configuration dump
    pub fn report_configuration(config: &Configuration) {
        println!("{} {}", "Type:".bold(), config.kind.label().cyan());
        Self::print_field(
            "Dimensions",
            &format!(
                "{}cm, {}/{}/{}mm",
                config.length, config.tip_width, config.waist_width, config.tail_width
            ),
        );
        Self::print_field(
            "Shape",
            &format!(
                "{:?} tip, {:?} tail, {:?}",
                config.tip_shape, config.tail_shape, config.camber_profile
            )
            .to_lowercase(),
        );
        Self::print_field(
            "Topsheet",
            &format!("{:?} {} ({:?})", config.top_pattern, config.top_color, config.top_finish)
                .to_lowercase(),
        );
        if !config.text.is_empty() {
            Self::print_field(
                "Text",
                &format!("\"{}\" at {:?}", config.text, config.text_position).to_lowercase(),
            );
        }
    }

    pub fn report_suggestion(outcome: &SuggestionOutcome) {
        match outcome {
            SuggestionOutcome::Applied { id, patch, .. } => {
                Self::success(&format!("Suggestion {id} applied"));
                if let Some(reasoning) = &patch.reasoning {
                    println!("  {} {}", "Reasoning:".bright_black(), reasoning.italic());
                }
                for field in &patch.dropped {
                    Self::report_warning(&format!("ignored invalid value for `{field}`"));
                }
            }
            SuggestionOutcome::Failed { id, error } => {
                Self::report_error(&format!("Suggestion {id}: {}", error.user_message()));
            }
        }
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    fn print_field(name: &str, value: &str) {
        println!("  {} {}", format!("{name}:").bright_black(), value.cyan());
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
