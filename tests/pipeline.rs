// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end synthesis scenarios

use approx::assert_relative_eq;
use skiform::assembly::{compute, ModelAssembler};
use skiform::config::{
    CamberProfile, Configuration, EngineSettings, EquipmentKind, TailShape, TextPosition,
    TextureSettings,
};
use skiform::geometry::{base_height, elevation, kick, mesh_utils, OutlineBuilder, WIDTH_UNIT_MM};
use skiform::GeometryError;

fn quick_settings() -> EngineSettings {
    EngineSettings {
        texture: TextureSettings {
            width: 32,
            height: 128,
            ..TextureSettings::default()
        },
        curve_segments: 8,
        ..EngineSettings::default()
    }
}

#[test]
fn test_default_waist_and_hybrid_crown() {
    let config = Configuration::default();
    let outline = OutlineBuilder::new()
        .build(&config.dimensions(), config.tip_shape, config.tail_shape)
        .unwrap();
    let half = outline.half_width_at(0.0, 24).unwrap();
    assert_relative_eq!(half, config.waist_width / WIDTH_UNIT_MM / 2.0, epsilon = 1e-9);

    assert_eq!(config.camber_profile, CamberProfile::Hybrid);
    assert_relative_eq!(base_height(0.0, config.camber_profile), 0.2, epsilon = 1e-12);
    assert_eq!(kick(0.0, config.tail_shape), 0.0);
}

#[test]
fn test_camber_tail_station() {
    let e = elevation(0.9, CamberProfile::Camber, TailShape::Flat);
    assert_eq!(base_height(0.9, CamberProfile::Camber), 0.0);
    assert_relative_eq!(e.dy, 0.15 * 0.15 * 2.0, epsilon = 1e-12);

    // Twin tails kick as hard as the tip
    let twin = elevation(0.9, CamberProfile::Camber, TailShape::Twin);
    let tip = elevation(-0.9, CamberProfile::Camber, TailShape::Twin);
    assert_relative_eq!(twin.dy, tip.dy, epsilon = 1e-12);
}

#[test]
fn test_switch_to_snowboard() {
    let ski = Configuration::default();
    let board = ski.with_kind(EquipmentKind::Snowboard);

    assert_eq!(board.dimensions(), EquipmentKind::Snowboard.preset_dimensions());
    assert_eq!(board.text_position, TextPosition::Waist);
    assert_eq!(board.top_color, ski.top_color);
    assert_eq!(board.text, ski.text);

    let model = compute(&board, &quick_settings()).unwrap();
    assert_eq!(model.instances.len(), 1);
    assert_eq!(model.bindings.iter().filter(|p| p.name == "disc").count(), 2);

    // Same kind again is a no-op
    assert_eq!(board.with_kind(EquipmentKind::Snowboard), board);
}

#[test]
fn test_counts_independent_of_profile() {
    let settings = quick_settings();
    let counts: Vec<(usize, usize)> = [CamberProfile::Camber, CamberProfile::Rocker, CamberProfile::Hybrid]
        .into_iter()
        .map(|camber_profile| {
            let config = Configuration {
                camber_profile,
                ..Configuration::default()
            };
            let model = compute(&config, &settings).unwrap();
            (model.vertex_count(), model.triangle_count())
        })
        .collect();
    assert!(counts.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_shells_are_closed_solids() {
    for kind in [EquipmentKind::Ski, EquipmentKind::Snowboard] {
        let model = compute(&Configuration::preset(kind), &quick_settings()).unwrap();
        for shell in [&model.edge, &model.core] {
            assert!(mesh_utils::is_closed(&shell.mesh), "{kind:?}");
            assert!(mesh_utils::signed_volume(&shell.mesh) > 0.0, "{kind:?}");
        }
    }
}

#[test]
fn test_compute_is_deterministic() {
    let config = Configuration::preset(EquipmentKind::Snowboard);
    let a = compute(&config, &quick_settings()).unwrap();
    let b = compute(&config, &quick_settings()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_failed_update_keeps_previous_model() {
    let mut assembler = ModelAssembler::new(quick_settings());
    let good = Configuration::preset(EquipmentKind::Snowboard);
    let before = assembler.update(&good).unwrap().clone();

    let bad = Configuration {
        length: f64::NAN,
        ..good.clone()
    };
    let err = assembler.update(&bad).unwrap_err();
    assert!(matches!(err, GeometryError::InvalidDimension { field: "length", .. }));
    assert_eq!(assembler.model(), Some(&before));
    assert_eq!(assembler.configuration(), Some(&good));

    // Recovery with a valid record recomputes
    let next = good.with_kind(EquipmentKind::Ski);
    assert_eq!(assembler.update(&next).unwrap().instances.len(), 2);
    assert_eq!(assembler.cache_stats().misses, 3);
    assert_eq!(assembler.cache_stats().failures, 1);
}
