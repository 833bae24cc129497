// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Ear-clipping triangulation for simple polygons

use crate::error::GeometryError;
use crate::utils::math::{orient2d, polygon_signed_area};
use nalgebra::Point2;

const EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy)]
struct Node {
    prev: usize,
    next: usize,
}

/// Triangulate a simple polygon given as a closed ring (last point not repeated).
///
/// Always returns exactly `n - 2` triangles of indices into `points`, wound
/// counter-clockwise in the polygon's plane regardless of input orientation.
/// Collinear runs are tolerated: when no strict ear remains, the least
/// reflex vertex is clipped so every input vertex is used.
pub fn triangulate_polygon(points: &[Point2<f64>]) -> Result<Vec<[usize; 3]>, GeometryError> {
    let n = points.len();
    if n < 3 {
        return Err(GeometryError::Triangulation(format!(
            "polygon has {n} vertices, need at least 3"
        )));
    }
    if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(GeometryError::Triangulation(
            "polygon contains non-finite coordinates".to_string(),
        ));
    }

    let ccw = polygon_signed_area(points) >= 0.0;
    // Orientation-normalized cross product: positive for convex corners
    let turn = |a: usize, b: usize, c: usize| {
        let cross = orient2d(&points[a], &points[b], &points[c]);
        if ccw {
            cross
        } else {
            -cross
        }
    };
    let emit = |a: usize, b: usize, c: usize| if ccw { [a, b, c] } else { [a, c, b] };

    let mut nodes: Vec<Node> = (0..n)
        .map(|i| Node {
            prev: (i + n - 1) % n,
            next: (i + 1) % n,
        })
        .collect();

    let mut triangles = Vec::with_capacity(n - 2);
    let mut remaining = n;
    let mut ear = 0;
    let mut visited = 0;

    while remaining > 3 {
        let prev = nodes[ear].prev;
        let next = nodes[ear].next;

        let clip = if visited < remaining {
            is_ear(prev, ear, next, &nodes, points, &turn)
        } else {
            // Full lap without a strict ear: clip the flattest corner instead
            ear = least_reflex(ear, remaining, &nodes, &turn);
            true
        };

        if clip {
            let (prev, next) = (nodes[ear].prev, nodes[ear].next);
            triangles.push(emit(prev, ear, next));
            nodes[prev].next = next;
            nodes[next].prev = prev;
            remaining -= 1;
            ear = next;
            visited = 0;
        } else {
            ear = next;
            visited += 1;
        }
    }

    let prev = nodes[ear].prev;
    let next = nodes[ear].next;
    triangles.push(emit(prev, ear, next));

    Ok(triangles)
}

fn is_ear(
    prev: usize,
    ear: usize,
    next: usize,
    nodes: &[Node],
    points: &[Point2<f64>],
    turn: &impl Fn(usize, usize, usize) -> f64,
) -> bool {
    if turn(prev, ear, next) <= EPSILON {
        return false;
    }

    // No other remaining vertex may sit strictly inside the candidate
    let mut probe = nodes[next].next;
    while probe != prev {
        let p = probe;
        probe = nodes[probe].next;
        if points[p] == points[prev] || points[p] == points[ear] || points[p] == points[next] {
            continue;
        }
        if turn(prev, ear, p) > EPSILON && turn(ear, next, p) > EPSILON && turn(next, prev, p) > EPSILON {
            return false;
        }
    }

    true
}

fn least_reflex(
    start: usize,
    remaining: usize,
    nodes: &[Node],
    turn: &impl Fn(usize, usize, usize) -> f64,
) -> usize {
    let mut best = start;
    let mut best_turn = f64::NEG_INFINITY;
    let mut current = start;
    for _ in 0..remaining {
        let t = turn(nodes[current].prev, current, nodes[current].next);
        if t > best_turn {
            best_turn = t;
            best = current;
        }
        current = nodes[current].next;
    }
    best
}
