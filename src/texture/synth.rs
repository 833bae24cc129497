// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Texture synthesis: base fill, pattern, grain and branding

use super::patterns;
use super::raster::{Canvas, RasterImage};
use super::seed::texture_rng;
use super::text::{self, Face, TextRun};
use crate::config::{Configuration, Finish, TextPosition, TextureSettings};
use crate::error::TextureError;
use tracing::{debug, instrument};

/// Reference canvas all drawing coordinates are authored against
pub const REFERENCE_WIDTH: f64 = 1024.0;
pub const REFERENCE_HEIGHT: f64 = 4096.0;

const BRAND_SIZE: f64 = 180.0;
const BRAND_SIZE_LONG: f64 = 120.0;
const BRAND_LONG_CHARS: usize = 10;
const SMALL_PRINT_SIZE: f64 = 40.0;
const SMALL_PRINT_OFFSET: f64 = 140.0;
const SMALL_PRINT_Y: f64 = 2000.0;

/// Size of the flat image used when synthesis fails
const FALLBACK_SIZE: (u32, u32) = (4, 16);

/// Reference row the branding is centred on
pub fn text_station(position: TextPosition) -> f64 {
    match position {
        TextPosition::Tip => 600.0,
        TextPosition::Waist => 2048.0,
        TextPosition::Tail => 3500.0,
    }
}

/// Renders configurations into surface textures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSynthesizer {
    settings: TextureSettings,
}

impl TextureSynthesizer {
    pub fn new(settings: TextureSettings) -> Self {
        Self { settings }
    }

    fn validate(&self) -> Result<(), TextureError> {
        let TextureSettings {
            width,
            height,
            max_pixels,
        } = self.settings;
        if width == 0 || height == 0 {
            return Err(TextureError::InvalidResolution { width, height });
        }
        let pixels = width as u64 * height as u64;
        if pixels > max_pixels {
            return Err(TextureError::TooLarge {
                pixels,
                limit: max_pixels,
            });
        }
        Ok(())
    }

    #[instrument(skip_all, fields(pattern = ?config.top_pattern, width = self.settings.width, height = self.settings.height))]
    pub fn render(&self, config: &Configuration) -> Result<RasterImage, TextureError> {
        self.validate()?;

        let mut image = RasterImage::filled(self.settings.width, self.settings.height, config.top_color);
        let mut rng = texture_rng(config);
        {
            let mut canvas = Canvas::new(&mut image, REFERENCE_WIDTH, REFERENCE_HEIGHT);

            patterns::paint(
                config.top_pattern,
                &mut canvas,
                &mut rng,
                config.top_color,
                config.logo_color,
            );

            if config.top_finish != Finish::Metal {
                patterns::grain(&mut canvas, &mut rng);
            }

            for run in branding(config) {
                text::draw(&mut canvas, &run);
            }
        }

        debug!("synthesized texture");
        Ok(image)
    }
}

/// Text runs for a configuration: the display text plus small print away from the waist
pub fn branding(config: &Configuration) -> Vec<TextRun> {
    let center_x = REFERENCE_WIDTH / 2.0;
    let mut runs = Vec::with_capacity(2);

    if !config.text.is_empty() {
        let font_size = if config.text.chars().count() > BRAND_LONG_CHARS {
            BRAND_SIZE_LONG
        } else {
            BRAND_SIZE
        };
        runs.push(TextRun {
            text: config.text.clone(),
            anchor: (center_x, text_station(config.text_position)),
            font_size,
            face: Face::Styled(config.font_style),
            color: config.logo_color,
        });
    }

    if config.text_position != TextPosition::Waist {
        runs.push(TextRun {
            text: format!(
                "SEARL MFG // {}cm // {}",
                config.length,
                config.kind.label().to_uppercase()
            ),
            anchor: (center_x + SMALL_PRINT_OFFSET, SMALL_PRINT_Y),
            font_size: SMALL_PRINT_SIZE,
            face: Face::Plain,
            color: config.logo_color,
        });
    }

    runs
}

/// Synthesize with the given settings
pub fn render(config: &Configuration, settings: &TextureSettings) -> Result<RasterImage, TextureError> {
    TextureSynthesizer::new(*settings).render(config)
}

/// Flat base-color image used when synthesis fails
pub fn fallback(config: &Configuration) -> RasterImage {
    RasterImage::filled(FALLBACK_SIZE.0, FALLBACK_SIZE.1, config.top_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EquipmentKind, Pattern};

    fn small() -> TextureSettings {
        TextureSettings {
            width: 64,
            height: 256,
            ..TextureSettings::default()
        }
    }

    #[test]
    fn test_dimensions_follow_settings() {
        let image = render(&Configuration::default(), &small()).unwrap();
        assert_eq!((image.width(), image.height()), (64, 256));
    }

    #[test]
    fn test_rejects_zero_and_oversized() {
        let zero = TextureSettings {
            width: 0,
            ..small()
        };
        assert_eq!(
            render(&Configuration::default(), &zero).unwrap_err(),
            TextureError::InvalidResolution { width: 0, height: 256 }
        );

        let huge = TextureSettings {
            max_pixels: 100,
            ..small()
        };
        assert!(matches!(
            render(&Configuration::default(), &huge),
            Err(TextureError::TooLarge { pixels: 16384, limit: 100 })
        ));
    }

    #[test]
    fn test_small_print_only_away_from_waist() {
        let mut config = Configuration::default();
        config.text_position = TextPosition::Tail;
        let runs = branding(&config);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].text, "SEARL MFG // 184cm // SKI");

        let board = Configuration::preset(EquipmentKind::Snowboard);
        let runs = branding(&board);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].anchor.1, 2048.0);
    }

    #[test]
    fn test_long_text_uses_smaller_size() {
        let mut config = Configuration::default();
        config.text = "ABCDEFGHIJK".into();
        assert_eq!(branding(&config)[0].font_size, BRAND_SIZE_LONG);
        config.text = "ABCDEFGHIJ".into();
        assert_eq!(branding(&config)[0].font_size, BRAND_SIZE);
    }

    #[test]
    fn test_metal_suppresses_grain() {
        let config = Configuration {
            top_finish: Finish::Metal,
            top_pattern: Pattern::Solid,
            text: String::new(),
            text_position: TextPosition::Waist,
            ..Configuration::default()
        };
        let image = render(&config, &small()).unwrap();
        assert!(image.as_raw().chunks(4).all(|p| p == [255, 255, 255, 255]));
    }

    #[test]
    fn test_fallback_is_flat_base() {
        let mut config = Configuration::default();
        config.top_color = crate::config::Color::rgb(1, 2, 3);
        let image = fallback(&config);
        assert!(image.as_raw().chunks(4).all(|p| p == [1, 2, 3, 255]));
    }
}
