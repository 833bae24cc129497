// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use skiform::assembly::compute;
use skiform::config::{Configuration, EngineSettings, EquipmentKind, Pattern, TextureSettings};
use skiform::geometry::{ExtrudeSettings, OutlineBuilder, ProfileDeformer, SolidExtruder};
use skiform::texture::TextureSynthesizer;

fn bench_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    let config = Configuration::default();

    group.bench_function("outline", |b| {
        b.iter(|| {
            OutlineBuilder::new()
                .build(black_box(&config.dimensions()), config.tip_shape, config.tail_shape)
                .unwrap()
        });
    });

    let outline = OutlineBuilder::new()
        .build(&config.dimensions(), config.tip_shape, config.tail_shape)
        .unwrap();
    let deformer = ProfileDeformer::new(config.camber_profile, config.tail_shape);
    for segments in [8usize, 24, 48] {
        let extruder = SolidExtruder::new(ExtrudeSettings {
            curve_segments: segments,
            ..ExtrudeSettings::default()
        });
        group.bench_with_input(BenchmarkId::new("extrude", segments), &segments, |b, _| {
            b.iter(|| extruder.extrude(black_box(&outline), &deformer).unwrap());
        });
    }

    group.finish();
}

fn bench_texture(c: &mut Criterion) {
    let mut group = c.benchmark_group("texture");
    group.sample_size(10);

    let synth = TextureSynthesizer::new(TextureSettings {
        width: 256,
        height: 1024,
        ..TextureSettings::default()
    });
    for pattern in Pattern::ALL {
        let config = Configuration {
            top_pattern: pattern,
            ..Configuration::default()
        };
        group.bench_with_input(BenchmarkId::new("render", format!("{pattern:?}")), &config, |b, config| {
            b.iter(|| synth.render(black_box(config)).unwrap());
        });
    }

    group.finish();
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    group.sample_size(10);

    let mut settings = EngineSettings::default();
    settings.texture.width = 256;
    settings.texture.height = 1024;
    for kind in [EquipmentKind::Ski, EquipmentKind::Snowboard] {
        let config = Configuration::preset(kind);
        group.bench_with_input(BenchmarkId::new("model", kind.label()), &config, |b, config| {
            b.iter(|| compute(black_box(config), &settings).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_outline, bench_texture, bench_compute);
criterion_main!(benches);
