// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar predicates used by outline checks and triangulation

use nalgebra::Point2;

/// Twice the signed area of triangle (a, b, c); positive when counter-clockwise
pub fn orient2d(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Signed area of a closed polygon (shoelace); positive when counter-clockwise
pub fn polygon_signed_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        area += a.x * b.y - b.x * a.y;
    }
    0.5 * area
}

/// Proper or touching intersection between segments (p0, p1) and (q0, q1)
pub fn segments_intersect(
    p0: &Point2<f64>,
    p1: &Point2<f64>,
    q0: &Point2<f64>,
    q1: &Point2<f64>,
    epsilon: f64,
) -> bool {
    let d1 = orient2d(q0, q1, p0);
    let d2 = orient2d(q0, q1, p1);
    let d3 = orient2d(p0, p1, q0);
    let d4 = orient2d(p0, p1, q1);

    if ((d1 > epsilon && d2 < -epsilon) || (d1 < -epsilon && d2 > epsilon))
        && ((d3 > epsilon && d4 < -epsilon) || (d3 < -epsilon && d4 > epsilon))
    {
        return true;
    }

    // Collinear touching cases
    (d1.abs() <= epsilon && on_segment(q0, p0, q1, epsilon))
        || (d2.abs() <= epsilon && on_segment(q0, p1, q1, epsilon))
        || (d3.abs() <= epsilon && on_segment(p0, q0, p1, epsilon))
        || (d4.abs() <= epsilon && on_segment(p0, q1, p1, epsilon))
}

/// Whether `p` lies within the bounding box of segment (a, b)
fn on_segment(a: &Point2<f64>, p: &Point2<f64>, b: &Point2<f64>, epsilon: f64) -> bool {
    p.x <= a.x.max(b.x) + epsilon
        && p.x >= a.x.min(b.x) - epsilon
        && p.y <= a.y.max(b.y) + epsilon
        && p.y >= a.y.min(b.y) - epsilon
}
