//! Property tests shared by all built-in Riemann solvers.

use proptest::prelude::*;

use swe1d::precision::{Bf16, Tolerances};
use swe1d::riemann::{EdgeState, NetUpdates, RiemannSolver, SolverKind, StandardSolver, create_solver};

fn solver(kind: SolverKind) -> StandardSolver<f64> {
    create_solver(kind, Tolerances::default()).unwrap()
}

fn arb_kind() -> impl Strategy<Value = SolverKind> {
    prop::sample::select(SolverKind::ALL.to_vec())
}

fn magnitude(u: &NetUpdates<f64>) -> f64 {
    [u.h_left, u.h_right, u.hu_left, u.hu_right]
        .into_iter()
        .fold(1.0, |acc, v| acc.max(v.abs()))
}

proptest! {
    #[test]
    fn mirrored_edge_swaps_updates(
        kind in arb_kind(),
        h_l in 0.5f64..100.0,
        h_r in 0.5f64..100.0,
        hu_l in -10.0f64..10.0,
        hu_r in -10.0f64..10.0,
    ) {
        let s = solver(kind);
        let edge = EdgeState::flat(h_l, h_r, hu_l, hu_r);
        let original = s.compute_net_updates(&edge).unwrap();
        let mirrored = s.compute_net_updates(&edge.mirrored()).unwrap();
        let tol = 1e-9 * magnitude(&original);

        prop_assert!((mirrored.h_left - original.h_right).abs() < tol, "{kind}: {original:?} vs {mirrored:?}");
        prop_assert!((mirrored.h_right - original.h_left).abs() < tol, "{kind}: {original:?} vs {mirrored:?}");
        prop_assert!((mirrored.hu_left + original.hu_right).abs() < tol, "{kind}: {original:?} vs {mirrored:?}");
        prop_assert!((mirrored.hu_right + original.hu_left).abs() < tol, "{kind}: {original:?} vs {mirrored:?}");
        prop_assert!((mirrored.max_speed - original.max_speed).abs() < 1e-9 * original.max_speed.max(1.0));
    }

    #[test]
    fn equal_states_leave_cells_unchanged(
        kind in arb_kind(),
        h in 0.01f64..1000.0,
        hu in -50.0f64..50.0,
    ) {
        let u = solver(kind).compute_net_updates(&EdgeState::flat(h, h, hu, hu)).unwrap();
        let tol = 1e-10 * magnitude(&u);
        // a cell between two identical edges sees right + left of the same edge
        prop_assert!((u.h_right + u.h_left).abs() < tol, "{kind}: {u:?}");
        prop_assert!((u.hu_right + u.hu_left).abs() < tol, "{kind}: {u:?}");
    }

    #[test]
    fn updates_are_finite_and_speed_non_negative(
        kind in arb_kind(),
        h_l in 0.0f64..500.0,
        h_r in 0.0f64..500.0,
        hu_l in -100.0f64..100.0,
        hu_r in -100.0f64..100.0,
        b_l in -10.0f64..10.0,
        b_r in -10.0f64..10.0,
    ) {
        let u = solver(kind)
            .compute_net_updates(&EdgeState::new(h_l, h_r, hu_l, hu_r, b_l, b_r))
            .unwrap();
        prop_assert!(u.is_finite(), "{kind}: {u:?}");
        prop_assert!(u.max_speed >= 0.0);
    }

    #[test]
    fn dry_cell_receives_no_update(
        kind in arb_kind(),
        h in 0.1f64..100.0,
        hu in -10.0f64..10.0,
    ) {
        let u = solver(kind).compute_net_updates(&EdgeState::flat(h, 0.0, hu, 0.0)).unwrap();
        prop_assert_eq!(u.h_right, 0.0);
        prop_assert_eq!(u.hu_right, 0.0);

        let u = solver(kind).compute_net_updates(&EdgeState::flat(0.0, h, 0.0, hu)).unwrap();
        prop_assert_eq!(u.h_left, 0.0);
        prop_assert_eq!(u.hu_left, 0.0);
    }

    #[test]
    fn bf16_rounding_error_is_bounded(value in -1.0e30f64..1.0e30) {
        prop_assume!(value.abs() > 1e-30);
        let rounded = Bf16::from_f64(value).to_f64();
        // 8 significand bits, round to nearest
        prop_assert!((rounded - value).abs() <= value.abs() * 2f64.powi(-8));
    }
}
