// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Pattern overlays, authored against the 1024 x 4096 reference canvas

use super::raster::{flatten_cubic, Canvas};
use crate::config::{Color, Pattern};
use rand::rngs::StdRng;
use rand::Rng;
use std::f64::consts::TAU;

const CARBON_CELL: f64 = 16.0;
const WOOD_LINES: usize = 400;
const GEOMETRIC_TRIANGLES: usize = 50;
const CAMO_BLOBS: usize = 40;
const CAMO_RADIUS: f64 = 150.0;
const SPLATTER_DROPS: usize = 300;
const TOPO_LINES: usize = 30;
const TOPO_STEP: f64 = 20.0;
const GRAIN_DOTS: usize = 5000;

/// Paint `pattern` over the base fill. `accent` is the logo color.
pub fn paint(pattern: Pattern, canvas: &mut Canvas<'_>, rng: &mut StdRng, base: Color, accent: Color) {
    match pattern {
        Pattern::Solid => {}
        Pattern::Carbon => carbon(canvas),
        Pattern::Wood => wood(canvas, rng),
        Pattern::Geometric => geometric(canvas, rng, accent),
        Pattern::Camo => camo(canvas, rng, accent),
        Pattern::Splatter => splatter(canvas, rng, accent),
        Pattern::LinearFade => {
            canvas.fill_vertical_gradient(&[(0.0, base), (0.5, base), (1.0, accent)])
        }
        Pattern::TopoMap => topo_map(canvas, accent),
    }
}

fn carbon(canvas: &mut Canvas<'_>) {
    let cols = (canvas.reference_width() / CARBON_CELL).ceil() as usize;
    let rows = (canvas.reference_height() / CARBON_CELL).ceil() as usize;
    for row in 0..rows {
        for col in 0..cols {
            if (row + col) % 2 == 0 {
                canvas.fill_rect(
                    col as f64 * CARBON_CELL,
                    row as f64 * CARBON_CELL,
                    CARBON_CELL,
                    CARBON_CELL,
                    Color::BLACK,
                    0.15,
                );
            }
        }
    }
}

fn wood(canvas: &mut Canvas<'_>, rng: &mut StdRng) {
    let (width, height) = (canvas.reference_width(), canvas.reference_height());
    for _ in 0..WOOD_LINES {
        let x = rng.gen::<f64>() * width;
        let c1 = x + (rng.gen::<f64>() - 0.5) * 50.0;
        let c2 = x + (rng.gen::<f64>() - 0.5) * 50.0;
        let end = x + (rng.gen::<f64>() - 0.5) * 100.0;
        let grain = flatten_cubic(
            (x, 0.0),
            (c1, height * 0.33),
            (c2, height * 0.66),
            (end, height),
            64,
        );
        canvas.stroke_polyline(&grain, 2.0, Color::BLACK, 0.1);
    }
}

fn geometric(canvas: &mut Canvas<'_>, rng: &mut StdRng, accent: Color) {
    let (width, height) = (canvas.reference_width(), canvas.reference_height());
    for i in 0..GEOMETRIC_TRIANGLES {
        let color = if i % 2 == 0 { accent } else { Color::WHITE };
        let mut corner = || (rng.gen::<f64>() * width, rng.gen::<f64>() * height);
        let triangle = [corner(), corner(), corner()];
        canvas.fill_polygon(&triangle, color, 0.3);
    }
}

fn camo(canvas: &mut Canvas<'_>, rng: &mut StdRng, accent: Color) {
    let (width, height) = (canvas.reference_width(), canvas.reference_height());
    let alpha = f64::from(0x40u8) / 255.0;
    for _ in 0..CAMO_BLOBS {
        let cx = rng.gen::<f64>() * width;
        let cy = rng.gen::<f64>() * height;
        // Fan from the centre through seven jittered rim points
        let mut blob = Vec::with_capacity(8);
        blob.push((cx, cy));
        for i in 0..7 {
            let angle = i as f64 / 6.0 * TAU;
            let radius = CAMO_RADIUS * (0.5 + rng.gen::<f64>() * 0.8);
            blob.push((cx + angle.cos() * radius, cy + angle.sin() * radius));
        }
        canvas.fill_polygon(&blob, accent, alpha);
    }
}

fn splatter(canvas: &mut Canvas<'_>, rng: &mut StdRng, accent: Color) {
    let (width, height) = (canvas.reference_width(), canvas.reference_height());
    for _ in 0..SPLATTER_DROPS {
        let radius = rng.gen::<f64>() * 15.0;
        let color = if rng.gen::<f64>() > 0.5 { accent } else { Color::WHITE };
        let alpha = rng.gen::<f64>() * 0.8;
        let x = rng.gen::<f64>() * width;
        let y = rng.gen::<f64>() * height;
        canvas.fill_circle(x, y, radius, color, alpha);
    }
}

fn topo_map(canvas: &mut Canvas<'_>, accent: Color) {
    let (width, height) = (canvas.reference_width(), canvas.reference_height());
    for i in 0..TOPO_LINES {
        let y = height / TOPO_LINES as f64 * i as f64;
        let mut x = 0.0;
        let mut line = vec![(x, y)];
        while x < width {
            x += TOPO_STEP;
            let noise = (x * 0.01 + i as f64).sin() * 50.0 + (y * 0.01).cos() * 30.0;
            line.push((x, y + noise));
        }
        canvas.stroke_polyline(&line, 2.0, accent, 0.3);
    }
}

/// Fine speckle over everything painted so far
pub fn grain(canvas: &mut Canvas<'_>, rng: &mut StdRng) {
    let (width, height) = (canvas.reference_width(), canvas.reference_height());
    for _ in 0..GRAIN_DOTS {
        let x = rng.gen::<f64>() * width;
        let y = rng.gen::<f64>() * height;
        canvas.fill_rect(x, y, 2.0, 2.0, Color::BLACK, 0.02);
    }
}
