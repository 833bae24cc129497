// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Branding text, set from 8x8 bitmap glyphs
//!
//! Runs are laid out in a local frame (x along the text, y across it, both
//! centred on the anchor) and rotated a quarter turn so they read
//! bottom-to-top along the long axis of the texture.

use super::raster::Canvas;
use crate::config::{Color, FontStyle};
use font8x8::{UnicodeFonts, BASIC_FONTS};

/// Glyph cells per em
const CELLS_PER_EM: f64 = 12.0;
const GLYPH_CELLS: f64 = 8.0;
/// Stroke width of the outline face, in reference pixels
const OUTLINE_STROKE: f64 = 4.0;
/// Spread of the drop shadow, in reference pixels
const SHADOW_SPREAD: f64 = 6.0;
const SHADOW_ALPHA: f64 = 0.1;

/// Glyph treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// Regular weight, used for small print
    Plain,
    Styled(FontStyle),
}

/// A single line of rotated text
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Centre of the run in reference coordinates
    pub anchor: (f64, f64),
    pub font_size: f64,
    pub face: Face,
    pub color: Color,
}

impl TextRun {
    fn glyphs(&self) -> Vec<[u8; 8]> {
        self.text
            .chars()
            .map(|c| BASIC_FONTS.get(c).unwrap_or([0; 8]))
            .collect()
    }

    /// Horizontal and vertical cell size for this face
    fn cell(&self) -> (f64, f64) {
        let cell = self.font_size / CELLS_PER_EM;
        match self.face {
            Face::Styled(FontStyle::Retro) => (cell * 0.7, cell * 1.3),
            _ => (cell, cell),
        }
    }

    /// Half extents of the run in its local frame
    fn half_extents(&self) -> (f64, f64) {
        let (cx, cy) = self.cell();
        let count = self.text.chars().count() as f64;
        (count * GLYPH_CELLS * cx / 2.0, GLYPH_CELLS * cy / 2.0)
    }

    fn has_shadow(&self) -> bool {
        matches!(self.face, Face::Styled(style) if style != FontStyle::Outline)
    }
}

/// Rasterize a run, with its soft shadow for filled faces
pub fn draw(canvas: &mut Canvas<'_>, run: &TextRun) {
    if run.text.is_empty() || run.font_size <= 0.0 {
        return;
    }

    let glyphs = run.glyphs();
    let (cell_x, cell_y) = run.cell();
    let (half_w, half_h) = run.half_extents();
    let layout = Layout {
        glyphs: &glyphs,
        cell_x,
        cell_y,
        origin_x: -half_w,
        face: run.face,
    };

    let (ax, ay) = run.anchor;
    let slant = half_h * 0.5;
    let margin = SHADOW_SPREAD + OUTLINE_STROKE + slant;
    // Rotated bounds: local x runs up the canvas, local y runs right
    let min = (ax - half_h - margin, ay - half_w - margin);
    let max = (ax + half_h + margin, ay + half_w + margin);
    let to_local = |x: f64, y: f64| (ay - y, x - ax);

    if run.has_shadow() {
        canvas.fill_where(min, max, Color::BLACK, SHADOW_ALPHA, |x, y| {
            let (lx, ly) = to_local(x, y);
            layout.covers_spread(lx, ly, SHADOW_SPREAD)
        });
    }

    canvas.fill_where(min, max, run.color, 1.0, |x, y| {
        let (lx, ly) = to_local(x, y);
        layout.covers(lx, ly)
    });
}

struct Layout<'a> {
    glyphs: &'a [[u8; 8]],
    cell_x: f64,
    cell_y: f64,
    origin_x: f64,
    face: Face,
}

impl Layout<'_> {
    fn covers(&self, lx: f64, ly: f64) -> bool {
        match self.face {
            Face::Styled(FontStyle::Outline) => {
                let w = OUTLINE_STROKE;
                self.filled(lx, ly)
                    && !(self.filled(lx - w, ly)
                        && self.filled(lx + w, ly)
                        && self.filled(lx, ly - w)
                        && self.filled(lx, ly + w))
            }
            _ => self.filled(lx, ly),
        }
    }

    fn covers_spread(&self, lx: f64, ly: f64, spread: f64) -> bool {
        [(0.0, 0.0), (spread, 0.0), (-spread, 0.0), (0.0, spread), (0.0, -spread)]
            .iter()
            .any(|(dx, dy)| self.filled(lx + dx, ly + dy))
    }

    /// Solid glyph coverage before outline treatment
    fn filled(&self, lx: f64, ly: f64) -> bool {
        let mut gy = ly / self.cell_y + GLYPH_CELLS / 2.0;
        let mut gx = (lx - self.origin_x) / self.cell_x;

        match self.face {
            Face::Styled(FontStyle::Handwritten) => {
                // Lean the tops of the glyphs forward
                gx -= (GLYPH_CELLS / 2.0 - gy) * 0.25;
            }
            Face::Styled(FontStyle::Stencil) => {
                // Bridge cut through the middle of every stroke
                if (3.5..4.0).contains(&gy) {
                    return false;
                }
            }
            _ => {}
        }

        if gx < 0.0 || !(0.0..GLYPH_CELLS).contains(&gy) {
            return false;
        }
        gy = gy.floor();

        let index = (gx / GLYPH_CELLS).floor() as usize;
        let Some(glyph) = self.glyphs.get(index) else {
            return false;
        };
        let col = (gx - index as f64 * GLYPH_CELLS).floor() as i32;
        let row = gy as usize;

        let bit = |col: i32| (0..8).contains(&col) && glyph[row] >> col & 1 == 1;
        match self.face {
            Face::Styled(FontStyle::Bold) | Face::Styled(FontStyle::Outline) => {
                bit(col) || bit(col - 1)
            }
            _ => bit(col),
        }
    }
}
