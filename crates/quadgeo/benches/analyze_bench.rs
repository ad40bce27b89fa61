//! Criterion benchmarks for the analysis and layout hot paths.
//! Inputs: random quads (arbitrary vertices) and seeded per-kind draws.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use quadgeo::layout::{compose_figure, AngleConfig, DiagonalConfig, FigureCfg, SideConfig};
use quadgeo::quad::{
    analyze_quadrilateral, is_self_intersecting, Quad, QuadKind, SideId, VertexId,
};
use quadgeo::rand::{draw_quad, RandomQuadCfg, ReplayToken};
use quadgeo::LayoutCfg;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_quad(seed: u64) -> Quad {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pt = || (rng.gen_range(0.0..400.0), rng.gen_range(0.0..300.0));
    Quad::from_coords([pt(), pt(), pt(), pt()])
}

fn busy_figure() -> FigureCfg {
    FigureCfg {
        sides: SideId::ALL
            .into_iter()
            .map(|side| SideConfig {
                side,
                label: Some(format!("s{side}")),
                equal_marks: 1,
                ..SideConfig::default()
            })
            .collect(),
        angles: VertexId::ALL
            .into_iter()
            .map(|vertex| AngleConfig {
                vertex,
                show_arc: true,
                show_degrees: true,
                ..AngleConfig::default()
            })
            .collect(),
        diagonals: vec![DiagonalConfig {
            from: VertexId::V0,
            to: VertexId::V2,
            bisection_marks: 1,
            color: None,
            style: Default::default(),
            label: None,
        }],
        ..FigureCfg::default()
    }
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    group.bench_function("analyze_quadrilateral/random", |b| {
        let mut seed = 0u64;
        b.iter_batched(
            || {
                seed = seed.wrapping_add(1);
                random_quad(seed)
            },
            |q| {
                let _ = analyze_quadrilateral(&q);
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("is_self_intersecting/random", |b| {
        b.iter_batched(
            || random_quad(17),
            |q| {
                let _ = is_self_intersecting(&q);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_figure(c: &mut Criterion) {
    let mut group = c.benchmark_group("figure");
    let cfg = busy_figure();
    let layout = LayoutCfg::default();
    for kind in [QuadKind::Square, QuadKind::Kite, QuadKind::Concave, QuadKind::Generic] {
        group.bench_with_input(BenchmarkId::new("compose", kind), &kind, |b, &kind| {
            b.iter_batched(
                || draw_quad(kind, RandomQuadCfg::default(), ReplayToken::new(5, 0)).unwrap(),
                |q| {
                    let _ = compose_figure(&q, &cfg, &layout).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.bench_function(BenchmarkId::new("draw_quad", "generic"), |b| {
        b.iter_batched(
            || ReplayToken::new(42, 0),
            |mut tok| {
                tok.index = tok.index.wrapping_add(1);
                let _ = draw_quad(QuadKind::Generic, RandomQuadCfg::default(), tok);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_analyze, bench_figure);
criterion_main!(benches);
