use criterion::{criterion_group, criterion_main, Criterion, black_box};

use glimmer::lighting::{
    select_nearest, LightSource, LightingConfig, LightingSystem, MAX_STREAMED_LIGHTS,
};

use glam::Vec3;

/// Scatter `count` point lights around the origin in a ring.
fn scene_lights(count: usize) -> Vec<LightSource> {
    (0..count)
        .map(|i| {
            let angle = i as f32 * 0.37;
            let radius = 20.0 + (i % 97) as f32 * 2.0;
            LightSource::point(
                i as u64,
                Vec3::new(angle.sin() * radius, (i % 16) as f32, angle.cos() * radius),
                [1.0, 0.9, 0.7, 1.0],
                2.0,
                12.0,
            )
        })
        .collect()
}

fn bench_select_256(c: &mut Criterion) {
    let lights = scene_lights(256);

    c.bench_function("select_nearest_256", |b| {
        b.iter(|| {
            select_nearest(
                black_box(&lights),
                black_box(Vec3::ZERO),
                MAX_STREAMED_LIGHTS,
            )
        });
    });
}

fn bench_select_2048(c: &mut Criterion) {
    let lights = scene_lights(2048);

    c.bench_function("select_nearest_2048", |b| {
        b.iter(|| {
            select_nearest(
                black_box(&lights),
                black_box(Vec3::ZERO),
                MAX_STREAMED_LIGHTS,
            )
        });
    });
}

fn bench_full_rebuild_512(c: &mut Criterion) {
    let lights = scene_lights(512);
    let mut system = LightingSystem::new(LightingConfig::default()).expect("default config");

    c.bench_function("rebuild_512", |b| {
        b.iter(|| {
            system.refresh();
            system.rebuild(black_box(&lights))
        });
    });
}

fn bench_clean_tick(c: &mut Criterion) {
    let lights = scene_lights(512);
    let mut system = LightingSystem::new(LightingConfig::default()).expect("default config");
    system.invalidate(Vec3::ZERO);
    system.rebuild(&lights);

    // The per-frame cost when nothing changed: one cell check + one flag read
    c.bench_function("clean_tick_512", |b| {
        b.iter(|| {
            system.invalidate(black_box(Vec3::new(1.0, 1.0, 1.0)));
            system.rebuild(black_box(&lights))
        });
    });
}

criterion_group!(
    benches,
    bench_select_256,
    bench_select_2048,
    bench_full_rebuild_512,
    bench_clean_tick
);
criterion_main!(benches);
