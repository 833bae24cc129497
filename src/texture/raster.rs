// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! RGBA raster and a small immediate-mode painter
//!
//! Coverage is sampled at pixel centres. Every primitive blends each covered
//! pixel exactly once with source-over compositing.

use crate::config::Color;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Portrait RGBA8 surface texture
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    image: RgbaImage,
}

impl RasterImage {
    /// Opaque image filled with `color`
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([color.r, color.g, color.b, 255])),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Encode as PNG
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.image.save_with_format(path, ImageFormat::Png)
    }

    /// Source-over blend of `color` at `alpha` onto one pixel; out-of-range is ignored
    pub fn blend(&mut self, x: i64, y: i64, color: Color, alpha: f64) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        let src = color.channels();
        for (dst, src) in pixel.0.iter_mut().take(3).zip(src) {
            let mixed = *dst as f64 * (1.0 - alpha) + src as f64 * alpha;
            *dst = mixed.round().clamp(0.0, 255.0) as u8;
        }
        let dst_alpha = pixel.0[3] as f64 / 255.0;
        pixel.0[3] = ((dst_alpha + alpha * (1.0 - dst_alpha)) * 255.0).round() as u8;
    }
}

/// Draws in a fixed reference coordinate space, scaled onto the raster
pub struct Canvas<'a> {
    target: &'a mut RasterImage,
    sx: f64,
    sy: f64,
    /// Last stroke that touched each pixel, so overlapping stroke pieces blend once
    stamps: Vec<u32>,
    stamp: u32,
}

impl<'a> Canvas<'a> {
    pub fn new(target: &'a mut RasterImage, reference_width: f64, reference_height: f64) -> Self {
        let sx = target.width() as f64 / reference_width;
        let sy = target.height() as f64 / reference_height;
        Self {
            target,
            sx,
            sy,
            stamps: Vec::new(),
            stamp: 0,
        }
    }

    pub fn reference_width(&self) -> f64 {
        self.target.width() as f64 / self.sx
    }

    pub fn reference_height(&self) -> f64 {
        self.target.height() as f64 / self.sy
    }

    fn width(&self) -> i64 {
        self.target.width() as i64
    }

    fn height(&self) -> i64 {
        self.target.height() as i64
    }

    /// Reference-space coordinates of the centre of device pixel (px, py)
    pub fn to_reference(&self, px: i64, py: i64) -> (f64, f64) {
        ((px as f64 + 0.5) / self.sx, (py as f64 + 0.5) / self.sy)
    }

    fn device_x_range(&self, min: f64, max: f64) -> (i64, i64) {
        let lo = ((min * self.sx) - 0.5).ceil().max(0.0) as i64;
        let hi = ((max * self.sx) - 0.5).floor().min(self.width() as f64 - 1.0) as i64;
        (lo, hi)
    }

    fn device_y_range(&self, min: f64, max: f64) -> (i64, i64) {
        let lo = ((min * self.sy) - 0.5).ceil().max(0.0) as i64;
        let hi = ((max * self.sy) - 0.5).floor().min(self.height() as f64 - 1.0) as i64;
        (lo, hi)
    }

    /// Blend every pixel whose centre satisfies `covers` within a reference-space box
    pub fn fill_where(
        &mut self,
        min: (f64, f64),
        max: (f64, f64),
        color: Color,
        alpha: f64,
        covers: impl Fn(f64, f64) -> bool,
    ) {
        let (x0, x1) = self.device_x_range(min.0, max.0);
        let (y0, y1) = self.device_y_range(min.1, max.1);
        for py in y0..=y1 {
            for px in x0..=x1 {
                let (rx, ry) = self.to_reference(px, py);
                if covers(rx, ry) {
                    self.target.blend(px, py, color, alpha);
                }
            }
        }
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, alpha: f64) {
        let (x0, x1) = self.device_x_range(x, x + w);
        let (y0, y1) = self.device_y_range(y, y + h);
        for py in y0..=y1 {
            for px in x0..=x1 {
                self.target.blend(px, py, color, alpha);
            }
        }
    }

    /// Vertical gradient over the whole raster; `stops` are (offset, color), sorted
    pub fn fill_vertical_gradient(&mut self, stops: &[(f64, Color)]) {
        if stops.is_empty() {
            return;
        }
        let height = self.height();
        for py in 0..height {
            let t = (py as f64 + 0.5) / height as f64;
            let color = gradient_at(stops, t);
            for px in 0..self.width() {
                self.target.blend(px, py, color, 1.0);
            }
        }
    }

    /// Scanline fill with the even-odd rule
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color, alpha: f64) {
        if points.len() < 3 {
            return;
        }
        let device: Vec<(f64, f64)> = points.iter().map(|&(x, y)| (x * self.sx, y * self.sy)).collect();
        let min_y = device.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = device.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let y0 = (min_y - 0.5).ceil().max(0.0) as i64;
        let y1 = (max_y - 0.5).floor().min(self.height() as f64 - 1.0) as i64;

        let n = device.len();
        let mut crossings = Vec::with_capacity(8);
        for py in y0..=y1 {
            let cy = py as f64 + 0.5;
            crossings.clear();
            for i in 0..n {
                let (ax, ay) = device[i];
                let (bx, by) = device[(i + 1) % n];
                if (ay <= cy && by > cy) || (by <= cy && ay > cy) {
                    crossings.push(ax + (cy - ay) / (by - ay) * (bx - ax));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                let x0 = (pair[0] - 0.5).ceil().max(0.0) as i64;
                let x1 = (pair[1] - 0.5).floor().min(self.width() as f64 - 1.0) as i64;
                for px in x0..=x1 {
                    self.target.blend(px, py, color, alpha);
                }
            }
        }
    }

    /// Filled disc; elliptical on the device when the scale is anisotropic
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color, alpha: f64) {
        if radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        self.fill_where(
            (cx - radius, cy - radius),
            (cx + radius, cy + radius),
            color,
            alpha,
            |x, y| (x - cx).powi(2) + (y - cy).powi(2) <= r2,
        );
    }

    /// Stroke an open polyline with round joins; `width` in reference pixels
    pub fn stroke_polyline(&mut self, points: &[(f64, f64)], width: f64, color: Color, alpha: f64) {
        if points.len() < 2 || width <= 0.0 {
            return;
        }
        let len = (self.target.width() as usize) * (self.target.height() as usize);
        if self.stamps.len() != len {
            self.stamps = vec![0; len];
        }
        self.stamp = self.stamp.wrapping_add(1).max(1);

        // Stroke geometry is evaluated on the device so thin lines stay visible
        let scale = (self.sx * self.sy).sqrt();
        let half = (width * scale / 2.0).max(0.5);
        let raster_width = self.width();
        for pair in points.windows(2) {
            let a = (pair[0].0 * self.sx, pair[0].1 * self.sy);
            let b = (pair[1].0 * self.sx, pair[1].1 * self.sy);
            let x0 = ((a.0.min(b.0) - half - 0.5).ceil().max(0.0)) as i64;
            let x1 = ((a.0.max(b.0) + half - 0.5).floor().min(raster_width as f64 - 1.0)) as i64;
            let y0 = ((a.1.min(b.1) - half - 0.5).ceil().max(0.0)) as i64;
            let y1 = ((a.1.max(b.1) + half - 0.5).floor().min(self.height() as f64 - 1.0)) as i64;

            for py in y0..=y1 {
                for px in x0..=x1 {
                    let c = (px as f64 + 0.5, py as f64 + 0.5);
                    if distance_to_segment(c, a, b) > half {
                        continue;
                    }
                    let index = (py * raster_width + px) as usize;
                    if self.stamps[index] == self.stamp {
                        continue;
                    }
                    self.stamps[index] = self.stamp;
                    self.target.blend(px, py, color, alpha);
                }
            }
        }
    }
}

/// Flatten a cubic Bézier into `segments` pieces, including both endpoints
pub fn flatten_cubic(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
    segments: usize,
) -> Vec<(f64, f64)> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            let mt = 1.0 - t;
            let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
            (
                p0.0 * a + p1.0 * b + p2.0 * c + p3.0 * d,
                p0.1 * a + p1.1 * b + p2.1 * c + p3.1 * d,
            )
        })
        .collect()
}

fn gradient_at(stops: &[(f64, Color)], t: f64) -> Color {
    let first = stops[0];
    if t <= first.0 {
        return first.1;
    }
    for pair in stops.windows(2) {
        let (o0, c0) = pair[0];
        let (o1, c1) = pair[1];
        if t <= o1 {
            let span = o1 - o0;
            let f = if span > 0.0 { (t - o0) / span } else { 1.0 };
            return c0.lerp(&c1, f);
        }
    }
    stops[stops.len() - 1].1
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    let t = if len2 > 0.0 {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (qx, qy) = (a.0 + dx * t, a.1 + dy * t);
    ((p.0 - qx).powi(2) + (p.1 - qy).powi(2)).sqrt()
}
