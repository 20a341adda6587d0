//! Render mode lookup and tile rendering benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use blockmap::render::{render_tile, BlockTextures};
use blockmap::rendermode;
use blockmap::world::generate_chunk;

fn bench_resolve(c: &mut Criterion) {
    c.bench_function("resolve_hit", |b| b.iter(|| rendermode::resolve(black_box("cave"))));
    c.bench_function("resolve_miss", |b| b.iter(|| rendermode::resolve(black_box("sunset"))));
    c.bench_function("list_names", |b| b.iter(rendermode::list_names));
}

fn bench_render_tile(c: &mut Criterion) {
    let chunk = generate_chunk(42, 0, 0);
    let textures = BlockTextures::generated(4);

    let mut group = c.benchmark_group("render_tile");
    for name in rendermode::list_names() {
        let mode = rendermode::resolve(name).unwrap();
        group.bench_function(name, |b| b.iter(|| render_tile(mode, black_box(&chunk), &textures)));
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_render_tile);
criterion_main!(benches);
