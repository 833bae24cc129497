// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Property tests for outline construction and the elevation profile

use proptest::prelude::*;
use skiform::config::{CamberProfile, Dimensions, EquipmentKind, TailShape, TipShape};
use skiform::geometry::{elevation, thickness_scale, OutlineBuilder, WIDTH_UNIT_MM};

const CURVE_SEGMENTS: usize = 12;

fn tip_shape() -> impl Strategy<Value = TipShape> {
    prop_oneof![
        Just(TipShape::Rounded),
        Just(TipShape::Blunt),
        Just(TipShape::Pointed)
    ]
}

fn tail_shape() -> impl Strategy<Value = TailShape> {
    prop_oneof![
        Just(TailShape::Flat),
        Just(TailShape::Twin),
        Just(TailShape::Partial)
    ]
}

fn profile() -> impl Strategy<Value = CamberProfile> {
    prop_oneof![
        Just(CamberProfile::Camber),
        Just(CamberProfile::Rocker),
        Just(CamberProfile::Hybrid)
    ]
}

fn dimensions(kind: EquipmentKind) -> impl Strategy<Value = Dimensions> {
    let ranges = kind.dimension_ranges();
    (
        ranges.length,
        ranges.tip_width,
        ranges.waist_width,
        ranges.tail_width,
    )
        .prop_map(|(length, tip_width, waist_width, tail_width)| Dimensions {
            length,
            tip_width,
            waist_width,
            tail_width,
        })
}

fn any_dimensions() -> impl Strategy<Value = Dimensions> {
    prop_oneof![dimensions(EquipmentKind::Ski), dimensions(EquipmentKind::Snowboard)]
}

proptest! {
    #[test]
    fn outline_closed_and_simple(dims in any_dimensions(), tip in tip_shape(), tail in tail_shape()) {
        let outline = OutlineBuilder::new()
            .with_curve_segments(CURVE_SEGMENTS)
            .build(&dims, tip, tail)
            .unwrap();
        prop_assert!(outline.is_closed(1e-9));
        prop_assert_eq!(outline.find_self_intersection(CURVE_SEGMENTS), None);
        prop_assert!(outline.signed_area(CURVE_SEGMENTS) > 0.0);
    }

    #[test]
    fn waist_half_width_matches(dims in any_dimensions(), tip in tip_shape(), tail in tail_shape()) {
        let outline = OutlineBuilder::new().build(&dims, tip, tail).unwrap();
        let half = outline.half_width_at(0.0, 24).unwrap();
        prop_assert!((half - dims.waist_width / WIDTH_UNIT_MM / 2.0).abs() < 1e-6);
    }

    #[test]
    fn inset_outline_stays_simple(dims in any_dimensions(), tip in tip_shape(), tail in tail_shape()) {
        let outline = OutlineBuilder::new()
            .with_width_offset(-2.0)
            .with_curve_segments(CURVE_SEGMENTS)
            .build(&dims, tip, tail)
            .unwrap();
        prop_assert_eq!(outline.find_self_intersection(CURVE_SEGMENTS), None);
    }

    #[test]
    fn elevation_finite_and_bounded(p in -1.5f64..1.5, profile in profile(), tail in tail_shape()) {
        let e = elevation(p, profile, tail);
        prop_assert!(e.dy.is_finite());
        prop_assert!(e.dy.abs() <= 3.0);
        prop_assert!(e.thickness_scale >= 0.4 - 1e-12 && e.thickness_scale <= 1.0);
    }

    #[test]
    fn elevation_continuous(p in -1.0f64..1.0, profile in profile(), tail in tail_shape()) {
        let h = 1e-7;
        let a = elevation(p, profile, tail).dy;
        let b = elevation((p + h).min(1.0), profile, tail).dy;
        prop_assert!((a - b).abs() < 1e-4, "jump at p = {}: {} vs {}", p, a, b);
    }

    #[test]
    fn taper_non_increasing(a in 0.0f64..1.0, b in 0.0f64..1.0) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(thickness_scale(far) <= thickness_scale(near));
        prop_assert!(thickness_scale(-far) <= thickness_scale(near));
    }
}

#[test]
fn continuity_at_branch_boundaries() {
    for profile in [CamberProfile::Camber, CamberProfile::Rocker, CamberProfile::Hybrid] {
        for tail in [TailShape::Flat, TailShape::Twin, TailShape::Partial] {
            for boundary in [-0.75, -0.7, -0.4, 0.4, 0.7, 0.75] {
                let below = elevation(boundary - 1e-9, profile, tail).dy;
                let above = elevation(boundary + 1e-9, profile, tail).dy;
                assert!(
                    (below - above).abs() < 1e-6,
                    "{profile:?}/{tail:?} discontinuous at {boundary}"
                );
            }
        }
    }
    assert_eq!(thickness_scale(0.0), 1.0);
}
