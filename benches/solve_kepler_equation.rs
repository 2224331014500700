use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use planisphere::kepler::{solve_kepler_equation, KeplerSolver};

const SAMPLES: usize = 10_000;

/// `(M, e)` pairs with `M ∈ [0, 2π)` and `e` drawn from `e_range`.
fn cases(rng: &mut StdRng, e_range: std::ops::Range<f64>) -> Vec<(f64, f64)> {
    (0..SAMPLES)
        .map(|_| {
            let m = rng.random::<f64>() * std::f64::consts::TAU;
            let e = rng.random_range(e_range.clone());
            (m, e)
        })
        .collect()
}

fn bench_solver(c: &mut Criterion, label: &str, solver: KeplerSolver, e_range: std::ops::Range<f64>, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);

    c.bench_function(&format!("solve_kepler_equation/{label}"), |b| {
        b.iter_batched(
            || cases(&mut rng, e_range.clone()),
            |cases| {
                for (m, e) in cases {
                    black_box(solve_kepler_equation(black_box(m), black_box(e), solver));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Planetary regime: e ∈ [0, 0.26), Pallas being the most eccentric body of the table.
fn bench_planetary(c: &mut Criterion) {
    bench_solver(c, "fixed_point/planetary", KeplerSolver::FixedPoint, 0.0..0.26, 0xDEADBEEF);
    bench_solver(c, "newton/planetary", KeplerSolver::converged(), 0.0..0.26, 0xDEADBEEF);
}

/// High eccentricity, still elliptic: e ∈ [0.7, 0.95)
fn bench_high_e(c: &mut Criterion) {
    bench_solver(c, "fixed_point/high_e", KeplerSolver::FixedPoint, 0.7..0.95, 0xBADF00D);
    bench_solver(c, "newton/high_e", KeplerSolver::converged(), 0.7..0.95, 0xBADF00D);
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_planetary, bench_high_e
);
criterion_main!(benches);
