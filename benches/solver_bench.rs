//! Benchmarks for the Riemann solvers and the block time step.
//!
//! Run with: `cargo bench --bench solver_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use swe1d::precision::{Bf16Safe, Double, MixedBf16, MixedSingle, PrecisionPolicy, Tolerances};
use swe1d::riemann::{EdgeState, RiemannSolver, SolverKind, create_solver};
use swe1d::scenario::{DamBreak, Scenario, Subcritical};
use swe1d::{CellState, WavePropagationBlock};

/// Edge states with varying heights, momenta and bed steps.
fn generate_edges(n: usize) -> Vec<EdgeState<f64>> {
    (0..n)
        .map(|i| {
            let phase = (i as f64) * 0.1;
            let h_l = 10.0 + 2.0 * phase.sin();
            let h_r = 10.0 + 1.5 * (phase + 0.5).sin();
            let hu_l = h_l * (0.5 + 0.3 * phase.cos());
            let hu_r = h_r * (0.4 + 0.2 * (phase + 0.3).cos());
            let b_l = -h_l + 0.1 * phase.cos();
            let b_r = -h_r + 0.1 * (phase + 0.1).cos();
            EdgeState::new(h_l, h_r, hu_l, hu_r, b_l, b_r)
        })
        .collect()
}

fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("riemann_solvers");
    let edges = generate_edges(1000);

    for kind in SolverKind::ALL {
        let solver = create_solver(kind, Tolerances::<f64>::default()).unwrap();
        group.bench_function(kind.name(), |b| {
            b.iter(|| {
                let mut total = 0.0;
                for edge in &edges {
                    let updates = solver.compute_net_updates(black_box(edge)).unwrap();
                    total += updates.h_left + updates.max_speed;
                }
                total
            });
        });
    }

    group.finish();
}

/// Wet-wet, wet-dry and dry-wet edges.
fn bench_dry_edges(c: &mut Criterion) {
    let mut group = c.benchmark_group("riemann_dry_edges");
    let cases = [
        ("wet_wet", EdgeState::flat(10.0, 8.0, 5.0, 4.0)),
        ("wet_dry", EdgeState::flat(10.0, 0.0, 5.0, 0.0)),
        ("dry_wet", EdgeState::flat(0.0, 10.0, 0.0, 4.0)),
    ];

    for kind in SolverKind::ALL {
        let solver = create_solver(kind, Tolerances::<f64>::default()).unwrap();
        for (label, edge) in &cases {
            group.bench_with_input(BenchmarkId::new(kind.name(), label), edge, |b, edge| {
                b.iter(|| solver.compute_net_updates(black_box(edge)));
            });
        }
    }

    group.finish();
}

fn bench_block_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_step");

    for size in [100, 1000, 10_000] {
        let scenario = DamBreak::new(1000.0, size, 14.0, 3.5, 0.0).unwrap();
        for kind in SolverKind::ALL {
            group.bench_with_input(BenchmarkId::new(kind.name(), size), &size, |b, &size| {
                let mut state = CellState::<f64>::from_scenario(&scenario, size).unwrap();
                let solver = create_solver(kind, Tolerances::default()).unwrap();
                let mut block =
                    WavePropagationBlock::<Double, _>::new(&mut state, scenario.cell_size(), solver).unwrap();
                b.iter(|| black_box(block.step().unwrap()));
            });
        }
    }

    group.finish();
}

fn step_policy<P: PrecisionPolicy>(c: &mut Criterion, size: usize) {
    let scenario = Subcritical::new(size).unwrap();
    c.bench_with_input(BenchmarkId::new("precision_step", P::NAME), &size, |b, &size| {
        let mut state = CellState::<P::Store>::from_scenario(&scenario, size).unwrap();
        let solver = create_solver(SolverKind::FWave, Tolerances::<P::Work>::for_storage::<P::Store>()).unwrap();
        let mut block = WavePropagationBlock::<P, _>::new(&mut state, scenario.cell_size(), solver).unwrap();
        b.iter(|| black_box(block.step().unwrap()));
    });
}

/// Same F-Wave step under every precision policy.
fn bench_precision_policies(c: &mut Criterion) {
    let size = 5000;
    step_policy::<Double>(c, size);
    step_policy::<MixedSingle>(c, size);
    step_policy::<Bf16Safe>(c, size);
    step_policy::<MixedBf16>(c, size);
}

criterion_group!(
    benches,
    bench_solvers,
    bench_dry_edges,
    bench_block_step,
    bench_precision_policies
);
criterion_main!(benches);
