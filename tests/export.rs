// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Export tests

use anyhow::Result;
use skiform::assembly::{compute, Model};
use skiform::config::{Configuration, EngineSettings, EquipmentKind, TextureSettings};
use skiform::io::{self, ExportFormat};
use tempfile::TempDir;

fn model(kind: EquipmentKind) -> Model {
    let settings = EngineSettings {
        texture: TextureSettings {
            width: 32,
            height: 128,
            ..TextureSettings::default()
        },
        curve_segments: 6,
        ..EngineSettings::default()
    };
    compute(&Configuration::preset(kind), &settings).unwrap()
}

#[test]
fn test_export_by_extension() -> Result<()> {
    let dir = TempDir::new()?;
    let model = model(EquipmentKind::Ski);

    for (name, format) in [
        ("board.glb", ExportFormat::Glb),
        ("board.gltf", ExportFormat::Gltf),
        ("board.stl", ExportFormat::Stl),
        ("topsheet.png", ExportFormat::Png),
    ] {
        let path = dir.path().join(name);
        assert_eq!(io::export_model(&model, &path)?, format);
        assert!(std::fs::metadata(&path)?.len() > 0, "{name} is empty");
    }
    Ok(())
}

#[test]
fn test_gltf_is_self_contained() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("board.gltf");
    io::export_gltf(&model(EquipmentKind::Snowboard), &path)?;

    let gltf: serde_json::Value = serde_json::from_slice(&std::fs::read(&path)?)?;
    assert_eq!(gltf["asset"]["version"], "2.0");
    assert!(gltf["buffers"][0]["uri"]
        .as_str()
        .is_some_and(|uri| uri.starts_with("data:application/octet-stream;base64,")));
    // No sidecar files
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn test_stl_holds_board_shells() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("board.stl");
    let model = model(EquipmentKind::Ski);
    io::export_stl(&model.board_mesh(), &path)?;

    let bytes = std::fs::read(&path)?;
    let facets = u32::from_le_bytes(bytes[80..84].try_into()?) as usize;
    assert_eq!(
        facets,
        model.edge.mesh.triangle_count() + model.core.mesh.triangle_count()
    );
    Ok(())
}

#[test]
fn test_png_round_trip() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("texture.png");
    let model = model(EquipmentKind::Snowboard);
    io::export_png(&model.texture, &path)?;

    let decoded = image::open(&path)?.to_rgba8();
    assert_eq!(decoded.dimensions(), (32, 128));
    assert_eq!(decoded.as_raw().as_slice(), model.texture.as_raw());
    Ok(())
}

#[test]
fn test_unknown_extension_is_rejected() {
    let model = model(EquipmentKind::Ski);
    let err = io::export_model(&model, "board.obj").unwrap_err();
    assert!(err.to_string().contains("Unsupported export format"));
}
