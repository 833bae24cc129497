// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar silhouette construction
//!
//! The outline lives in the plane perpendicular to extrusion: `y` runs along
//! the length with the tip at `-y`, `x` runs across the width. Lengths are
//! converted from centimetres and widths from millimetres into a shared scene
//! unit before any curve is laid out.

use crate::config::{Dimensions, TailShape, TipShape};
use crate::error::GeometryError;
use crate::utils::math::{polygon_signed_area, segments_intersect};
use nalgebra::Point2;
use tracing::debug;

/// Centimetres of length per scene unit
pub const LENGTH_UNIT_CM: f64 = 10.0;
/// Millimetres of width per scene unit
pub const WIDTH_UNIT_MM: f64 = 70.0;

/// Fraction of length occupied by each tip/tail cap
const CAP_FRACTION: f64 = 0.1;
/// Longitudinal reach of the flank control points from their anchors
const FLANK_HANDLE: f64 = 0.15;
/// Longitudinal reach of the cap fillet handles
const CAP_HANDLE: f64 = 0.03;
/// Share of the tip width kept flat by the blunt tip
const BLUNT_SPAN: f64 = 0.7;
/// How far the pointed apex overshoots the nominal tip
const POINT_EXTENSION: f64 = 0.02;
/// Lift of the asymmetric partial-tail control point, in scene units
const PARTIAL_TAIL_LIFT: f64 = 0.2;

const CLOSURE_TOLERANCE: f64 = 1e-9;
const INTERSECTION_EPSILON: f64 = 1e-12;

/// One piece of the silhouette
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line {
        from: Point2<f64>,
        to: Point2<f64>,
    },
    Cubic {
        from: Point2<f64>,
        ctrl1: Point2<f64>,
        ctrl2: Point2<f64>,
        to: Point2<f64>,
    },
}

impl Segment {
    pub fn start(&self) -> Point2<f64> {
        match self {
            Self::Line { from, .. } | Self::Cubic { from, .. } => *from,
        }
    }

    pub fn end(&self) -> Point2<f64> {
        match self {
            Self::Line { to, .. } | Self::Cubic { to, .. } => *to,
        }
    }

    /// Evaluate at parameter `t` in [0, 1]
    pub fn point_at(&self, t: f64) -> Point2<f64> {
        match self {
            Self::Line { from, to } => from + (to - from) * t,
            Self::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                let mt = 1.0 - t;
                let a = mt * mt * mt;
                let b = 3.0 * mt * mt * t;
                let c = 3.0 * mt * t * t;
                let d = t * t * t;
                Point2::from(
                    from.coords * a + ctrl1.coords * b + ctrl2.coords * c + to.coords * d,
                )
            }
        }
    }

    /// Append sample points after the start point. Lines contribute their end
    /// point only; cubics contribute `curve_segments` evenly spaced samples.
    fn flatten_into(&self, curve_segments: usize, out: &mut Vec<Point2<f64>>) {
        match self {
            Self::Line { to, .. } => out.push(*to),
            Self::Cubic { .. } => {
                let samples = curve_segments.max(1);
                for i in 1..=samples {
                    out.push(self.point_at(i as f64 / samples as f64));
                }
            }
        }
    }
}

/// Closed silhouette curve
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    segments: Vec<Segment>,
    half_length: f64,
}

impl Outline {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Nominal half length in scene units (tip at `-half_length`)
    pub fn half_length(&self) -> f64 {
        self.half_length
    }

    pub fn start(&self) -> Point2<f64> {
        self.segments.first().map(|s| s.start()).unwrap_or_else(Point2::origin)
    }

    pub fn end(&self) -> Point2<f64> {
        self.segments.last().map(|s| s.end()).unwrap_or_else(Point2::origin)
    }

    /// Distance between the first and last control point
    pub fn closure_gap(&self) -> f64 {
        (self.end() - self.start()).norm()
    }

    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.segments.len() > 1 && self.closure_gap() <= tolerance
    }

    /// Flatten into a closed polygon. The closing point is not repeated.
    pub fn to_polyline(&self, curve_segments: usize) -> Vec<Point2<f64>> {
        let mut points = Vec::with_capacity(self.segments.len() * curve_segments.max(1) + 1);
        points.push(self.start());
        for segment in &self.segments {
            segment.flatten_into(curve_segments, &mut points);
        }

        if points.len() > 1 {
            let last = points[points.len() - 1];
            if (last - points[0]).norm() <= CLOSURE_TOLERANCE {
                points.pop();
            }
        }

        // Drop coincident neighbours (e.g. zero-length spans)
        points.dedup_by(|a, b| (*a - *b).norm() <= CLOSURE_TOLERANCE);
        points
    }

    /// First pair of non-adjacent polygon edges that touch, if any
    pub fn find_self_intersection(&self, curve_segments: usize) -> Option<(usize, usize)> {
        let points = self.to_polyline(curve_segments);
        let n = points.len();
        if n < 4 {
            return None;
        }

        for i in 0..n {
            let a0 = &points[i];
            let a1 = &points[(i + 1) % n];
            for j in (i + 2)..n {
                // Edges n-1 and 0 share the closing vertex
                if i == 0 && j == n - 1 {
                    continue;
                }
                let b0 = &points[j];
                let b1 = &points[(j + 1) % n];
                if segments_intersect(a0, a1, b0, b1, INTERSECTION_EPSILON) {
                    return Some((i, j));
                }
            }
        }

        None
    }

    /// Signed area of the flattened outline; positive (counter-clockwise) for built outlines
    pub fn signed_area(&self, curve_segments: usize) -> f64 {
        polygon_signed_area(&self.to_polyline(curve_segments))
    }

    /// Half the lateral extent of the outline at longitudinal position `y`
    pub fn half_width_at(&self, y: f64, curve_segments: usize) -> Option<f64> {
        let points = self.to_polyline(curve_segments);
        let n = points.len();
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;

        for i in 0..n {
            let a = &points[i];
            let b = &points[(i + 1) % n];
            let (lo, hi) = if a.y <= b.y { (a, b) } else { (b, a) };
            if y < lo.y || y > hi.y {
                continue;
            }

            let x = if (hi.y - lo.y).abs() < f64::EPSILON {
                // Horizontal edge on the query line: both ends count
                min_x = min_x.min(lo.x.min(hi.x));
                max_x = max_x.max(lo.x.max(hi.x));
                continue;
            } else {
                lo.x + (hi.x - lo.x) * (y - lo.y) / (hi.y - lo.y)
            };
            min_x = min_x.min(x);
            max_x = max_x.max(x);
        }

        (min_x <= max_x).then(|| (max_x - min_x) / 2.0)
    }

    /// Axis-aligned extent of the flattened outline as (min, max)
    pub fn bounds(&self, curve_segments: usize) -> (Point2<f64>, Point2<f64>) {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in self.to_polyline(curve_segments) {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }
}

/// Incremental path construction in the style of a 2D canvas
struct PathBuilder {
    cursor: Point2<f64>,
    segments: Vec<Segment>,
}

impl PathBuilder {
    fn move_to(x: f64, y: f64) -> Self {
        Self {
            cursor: Point2::new(x, y),
            segments: Vec::with_capacity(12),
        }
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let to = Point2::new(x, y);
        self.segments.push(Segment::Line {
            from: self.cursor,
            to,
        });
        self.cursor = to;
    }

    fn cubic_to(&mut self, c1: (f64, f64), c2: (f64, f64), to: (f64, f64)) {
        let to = Point2::new(to.0, to.1);
        self.segments.push(Segment::Cubic {
            from: self.cursor,
            ctrl1: Point2::new(c1.0, c1.1),
            ctrl2: Point2::new(c2.0, c2.1),
            to,
        });
        self.cursor = to;
    }
}

/// Builds outlines from dimensions and shape variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineBuilder {
    width_offset_mm: f64,
    curve_segments: usize,
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self {
            width_offset_mm: 0.0,
            curve_segments: 24,
        }
    }
}

impl OutlineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `offset_mm` to every width before conversion (negative insets the outline)
    pub fn with_width_offset(mut self, offset_mm: f64) -> Self {
        self.width_offset_mm = offset_mm;
        self
    }

    /// Sampling density used by the simple-curve check
    pub fn with_curve_segments(mut self, curve_segments: usize) -> Self {
        self.curve_segments = curve_segments.max(1);
        self
    }

    pub fn build(
        &self,
        dims: &Dimensions,
        tip_shape: TipShape,
        tail_shape: TailShape,
    ) -> Result<Outline, GeometryError> {
        validate_positive("length", dims.length)?;
        let tip_w = self.scaled_width("tipWidth", dims.tip_width)?;
        let waist_w = self.scaled_width("waistWidth", dims.waist_width)?;
        let tail_w = self.scaled_width("tailWidth", dims.tail_width)?;

        let len = dims.length / LENGTH_UNIT_CM;
        let half_len = len / 2.0;

        let y_tip = -half_len;
        let y_tip_start = -half_len + len * CAP_FRACTION;
        let y_waist = 0.0;
        let y_tail_start = half_len - len * CAP_FRACTION;
        let y_tail = half_len;
        let handle = len * FLANK_HANDLE;
        let cap = len * CAP_HANDLE;

        // 1. Tip cap, centerline to the right flank
        let mut path = match tip_shape {
            TipShape::Rounded => {
                let mut path = PathBuilder::move_to(0.0, y_tip);
                path.cubic_to(
                    (tip_w / 1.8, y_tip),
                    (tip_w / 2.0, y_tip + cap),
                    (tip_w / 2.0, y_tip_start),
                );
                path
            }
            TipShape::Blunt => {
                let blunt_w = tip_w * BLUNT_SPAN;
                let mut path = PathBuilder::move_to(-blunt_w / 2.0, y_tip);
                path.line_to(blunt_w / 2.0, y_tip);
                path.cubic_to(
                    (tip_w / 2.0, y_tip),
                    (tip_w / 2.0, y_tip + cap),
                    (tip_w / 2.0, y_tip_start),
                );
                path
            }
            TipShape::Pointed => {
                let extension = len * POINT_EXTENSION;
                let mut path = PathBuilder::move_to(0.0, y_tip - extension);
                path.cubic_to(
                    (tip_w * 0.25, y_tip - extension * 0.5),
                    (tip_w * 0.5, y_tip),
                    (tip_w / 2.0, y_tip_start),
                );
                path
            }
        };

        // 2. Right flank: tip -> waist -> tail, handles offset from their own anchors
        path.cubic_to(
            (tip_w / 2.0, y_tip_start + handle),
            (waist_w / 2.0, y_waist - handle),
            (waist_w / 2.0, y_waist),
        );
        path.cubic_to(
            (waist_w / 2.0, y_waist + handle),
            (tail_w / 2.0, y_tail_start - handle),
            (tail_w / 2.0, y_tail_start),
        );

        // 3. Tail cap, right flank to the left flank
        match tail_shape {
            TailShape::Twin => {
                path.cubic_to(
                    (tail_w / 2.0, y_tail - cap),
                    (tail_w / 1.8, y_tail),
                    (0.0, y_tail),
                );
                path.cubic_to(
                    (-tail_w / 1.8, y_tail),
                    (-tail_w / 2.0, y_tail - cap),
                    (-tail_w / 2.0, y_tail_start),
                );
            }
            TailShape::Flat => {
                path.line_to(tail_w / 2.0, y_tail);
                path.line_to(-tail_w / 2.0, y_tail);
                path.line_to(-tail_w / 2.0, y_tail_start);
            }
            TailShape::Partial => {
                path.cubic_to(
                    (tail_w / 2.0, y_tail),
                    (0.0, y_tail + PARTIAL_TAIL_LIFT),
                    (-tail_w / 2.0, y_tail_start),
                );
            }
        }

        // 4. Left flank, the mirror of the right flank traversed backwards
        path.cubic_to(
            (-tail_w / 2.0, y_tail_start - handle),
            (-waist_w / 2.0, y_waist + handle),
            (-waist_w / 2.0, y_waist),
        );
        path.cubic_to(
            (-waist_w / 2.0, y_waist - handle),
            (-tip_w / 2.0, y_tip_start + handle),
            (-tip_w / 2.0, y_tip_start),
        );

        // 5. Close through the mirrored tip cap
        match tip_shape {
            TipShape::Rounded => path.cubic_to(
                (-tip_w / 2.0, y_tip + cap),
                (-tip_w / 1.8, y_tip),
                (0.0, y_tip),
            ),
            TipShape::Blunt => {
                let blunt_w = tip_w * BLUNT_SPAN;
                path.cubic_to(
                    (-tip_w / 2.0, y_tip + cap),
                    (-tip_w / 2.0, y_tip),
                    (-blunt_w / 2.0, y_tip),
                );
            }
            TipShape::Pointed => {
                let extension = len * POINT_EXTENSION;
                path.cubic_to(
                    (-tip_w * 0.5, y_tip),
                    (-tip_w * 0.25, y_tip - extension * 0.5),
                    (0.0, y_tip - extension),
                );
            }
        }

        let outline = Outline {
            segments: path.segments,
            half_length: half_len,
        };

        if !outline.is_closed(CLOSURE_TOLERANCE) {
            return Err(GeometryError::NotClosed {
                gap: outline.closure_gap(),
            });
        }

        if let Some((first, second)) = outline.find_self_intersection(self.curve_segments) {
            return Err(GeometryError::SelfIntersecting { first, second });
        }

        debug!(
            segments = outline.segments.len(),
            half_length = half_len,
            ?tip_shape,
            ?tail_shape,
            "built outline"
        );

        Ok(outline)
    }

    fn scaled_width(&self, field: &'static str, width_mm: f64) -> Result<f64, GeometryError> {
        validate_positive(field, width_mm)?;
        let adjusted = width_mm + self.width_offset_mm;
        if !(adjusted > 0.0) {
            return Err(GeometryError::InvalidDimension {
                field,
                value: adjusted,
            });
        }
        Ok(adjusted / WIDTH_UNIT_MM)
    }
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidDimension { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_dims() -> Dimensions {
        Dimensions {
            length: 184.0,
            tip_width: 138.0,
            waist_width: 108.0,
            tail_width: 128.0,
        }
    }

    const TIPS: [TipShape; 3] = [TipShape::Rounded, TipShape::Blunt, TipShape::Pointed];
    const TAILS: [TailShape; 3] = [TailShape::Flat, TailShape::Twin, TailShape::Partial];

    #[test]
    fn test_every_variant_is_closed_and_simple() {
        let builder = OutlineBuilder::new();
        for tip in TIPS {
            for tail in TAILS {
                let outline = builder.build(&default_dims(), tip, tail).unwrap();
                assert!(outline.is_closed(1e-9), "{tip:?}/{tail:?} not closed");
                assert!(outline.find_self_intersection(24).is_none());
                assert!(outline.signed_area(24) > 0.0, "{tip:?}/{tail:?} not CCW");
            }
        }
    }

    #[test]
    fn test_waist_half_width() {
        let outline = OutlineBuilder::new()
            .build(&default_dims(), TipShape::Rounded, TailShape::Partial)
            .unwrap();
        let half = outline.half_width_at(0.0, 24).unwrap();
        assert_relative_eq!(half, 108.0 / WIDTH_UNIT_MM / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_inset_narrows_waist() {
        let outline = OutlineBuilder::new()
            .with_width_offset(-2.0)
            .build(&default_dims(), TipShape::Rounded, TailShape::Partial)
            .unwrap();
        let half = outline.half_width_at(0.0, 24).unwrap();
        assert_relative_eq!(half, 106.0 / WIDTH_UNIT_MM / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pointed_tip_overshoots() {
        let outline = OutlineBuilder::new()
            .build(&default_dims(), TipShape::Pointed, TailShape::Partial)
            .unwrap();
        let (min, _) = outline.bounds(24);
        let len = 184.0 / LENGTH_UNIT_CM;
        assert_relative_eq!(min.y, -len / 2.0 - len * POINT_EXTENSION, epsilon = 1e-9);
    }

    #[test]
    fn test_flat_tail_is_square() {
        let outline = OutlineBuilder::new()
            .build(&default_dims(), TipShape::Rounded, TailShape::Flat)
            .unwrap();
        let lines = outline
            .segments()
            .iter()
            .filter(|s| matches!(s, Segment::Line { .. }))
            .count();
        assert_eq!(lines, 3);
        let (_, max) = outline.bounds(24);
        assert_relative_eq!(max.y, 184.0 / LENGTH_UNIT_CM / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flanks_are_mirrored() {
        let outline = OutlineBuilder::new()
            .build(&default_dims(), TipShape::Rounded, TailShape::Twin)
            .unwrap();
        for y in [-6.0, -3.0, 0.0, 2.5, 6.0] {
            let points = outline.to_polyline(24);
            let xs: Vec<f64> = points
                .windows(2)
                .filter(|w| (w[0].y - y) * (w[1].y - y) <= 0.0 && w[0].y != w[1].y)
                .map(|w| w[0].x + (w[1].x - w[0].x) * (y - w[0].y) / (w[1].y - w[0].y))
                .collect();
            let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
            assert_relative_eq!(max, -min, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_degenerate_widths_allowed() {
        let dims = Dimensions {
            length: 160.0,
            tip_width: 100.0,
            waist_width: 120.0,
            tail_width: 120.0,
        };
        for tip in TIPS {
            for tail in TAILS {
                assert!(OutlineBuilder::new().build(&dims, tip, tail).is_ok());
            }
        }
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let mut dims = default_dims();
        dims.waist_width = 0.0;
        let err = OutlineBuilder::new()
            .build(&dims, TipShape::Rounded, TailShape::Partial)
            .unwrap_err();
        assert_eq!(
            err,
            GeometryError::InvalidDimension {
                field: "waistWidth",
                value: 0.0
            }
        );

        let mut dims = default_dims();
        dims.length = f64::NAN;
        assert!(matches!(
            OutlineBuilder::new().build(&dims, TipShape::Rounded, TailShape::Partial),
            Err(GeometryError::InvalidDimension { field: "length", .. })
        ));
    }

    #[test]
    fn test_inset_larger_than_width_is_rejected() {
        let mut dims = default_dims();
        dims.tail_width = 1.5;
        let err = OutlineBuilder::new()
            .with_width_offset(-2.0)
            .build(&dims, TipShape::Rounded, TailShape::Partial)
            .unwrap_err();
        assert!(matches!(
            err,
            GeometryError::InvalidDimension { field: "tailWidth", .. }
        ));
    }
}
