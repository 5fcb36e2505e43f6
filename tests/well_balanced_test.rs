//! Lake-at-rest tests.
//!
//! A flat water surface with zero momentum is a steady state over any bed.
//! F-Wave preserves it up to round-off. Rusanov with hydrostatic
//! reconstruction preserves it exactly.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use swe1d::precision::Double;
use swe1d::riemann::{EdgeState, FWave, RiemannSolver, Rusanov};
use swe1d::scenario::{Scenario, Subcritical};
use swe1d::{BoundaryCondition, CellState, WavePropagationBlock};

const TOL: f64 = 1e-6;

/// Integer depths in `1..=10000` on a bed at `-h`, so the surface sits at 0.
fn random_lake(size: usize, seed: u64) -> CellState<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let h: Vec<f64> = (0..size + 2).map(|_| rng.gen_range(1..=10_000) as f64).collect();
    let b: Vec<f64> = h.iter().map(|h| -h).collect();
    CellState::from_vectors(h, vec![0.0; size + 2], b).unwrap()
}

#[test]
fn test_fwave_single_pass_zero_updates() {
    let state = random_lake(1000, 1234);
    let solver = FWave::<f64>::default();
    for i in 1..state.h().len() {
        let edge = EdgeState::new(
            state.h()[i - 1],
            state.h()[i],
            0.0,
            0.0,
            state.b()[i - 1],
            state.b()[i],
        );
        let u = solver.compute_net_updates(&edge).unwrap();
        assert!(u.h_left.abs() < TOL, "edge {i}: {u:?}");
        assert!(u.h_right.abs() < TOL, "edge {i}: {u:?}");
        assert!(u.hu_left.abs() < TOL, "edge {i}: {u:?}");
        assert!(u.hu_right.abs() < TOL, "edge {i}: {u:?}");
    }
}

#[test]
fn test_fwave_block_stays_at_rest() {
    let mut state = random_lake(1000, 42);
    let initial = state.clone();
    let mut block = WavePropagationBlock::<Double, _>::new(&mut state, 1.0, FWave::default()).unwrap();
    for _ in 0..10 {
        block.step().unwrap();
        assert!(block.net_updates().max_abs() < TOL);
    }
    for (h, h0) in block.state().h().iter().zip(initial.h()).skip(1).take(1000) {
        assert!((h - h0).abs() < TOL);
    }
}

#[test]
fn test_rusanov_is_exactly_balanced() {
    let mut state = random_lake(500, 7);
    let initial = state.clone();
    let mut block = WavePropagationBlock::<Double, _>::new(&mut state, 10.0, Rusanov::default()).unwrap();
    block.set_left_boundary_condition(BoundaryCondition::Reflecting).unwrap();
    for _ in 0..50 {
        block.step().unwrap();
        assert_eq!(block.net_updates().max_abs(), 0.0);
    }
    assert_eq!(&block.state().h()[1..=500], &initial.h()[1..=500]);
    assert!(block.state().hu()[1..=500].iter().all(|&hu| hu == 0.0));
}

#[test]
fn test_fwave_lake_at_rest_over_bump() {
    let scenario = Subcritical::new(200).unwrap();
    let mut state = CellState::<f64>::from_scenario(&scenario, 200).unwrap();
    // drop the inflow to get a lake at rest over the bump
    state.arrays_mut().1.fill(0.0);
    let mut block = WavePropagationBlock::<Double, _>::new(&mut state, scenario.cell_size(), FWave::default()).unwrap();
    for _ in 0..20 {
        block.step().unwrap();
    }
    for i in 1..=200 {
        assert_abs_diff_eq!(block.state().surface(i), 0.0, epsilon = TOL);
        assert_abs_diff_eq!(block.state().hu()[i], 0.0, epsilon = TOL);
    }
}
