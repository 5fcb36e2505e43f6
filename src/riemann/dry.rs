//! Wet/dry treatment shared by all solvers.
//!
//! A cell is dry when its height is at or below `dry_tol`. Bed elevation has
//! no special meaning here.
//!
//! - both sides dry: no exchange, zero speed
//! - one side dry: the wet state is reflected onto the dry side (same height
//!   and bed, negated momentum), the solver runs on that wall problem, and the
//!   dry cell's updates are discarded
//! - both sides wet: the solver runs on the edge unchanged
//!
//! Limitation: since dryness depends on height alone, an empty cell acts as
//! a wall for as long as it stays empty, and nothing can fill it. A wet
//! front therefore never advances onto a dry bed; water that reaches the
//! front is reflected. Flooding of initially dry land (a moving shoreline)
//! is not modelled.

use crate::precision::Working;

use super::{EdgeState, NetUpdates, RiemannError};

/// Side of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Wet/dry classification of an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Wetting<W> {
    /// Neither side holds water.
    BothDry,
    /// At least one side is wet. `edge` is the problem to solve, with the
    /// dry side (if any) replaced by a reflection of the wet side.
    Wet {
        edge: EdgeState<W>,
        dry_side: Option<Side>,
    },
}

/// Classify an edge and build the wall problem if one side is dry.
pub fn classify<W: Working>(edge: &EdgeState<W>, dry_tol: W) -> Wetting<W> {
    let left_dry = edge.h_l <= dry_tol;
    let right_dry = edge.h_r <= dry_tol;

    match (left_dry, right_dry) {
        (true, true) => Wetting::BothDry,
        (false, false) => Wetting::Wet {
            edge: *edge,
            dry_side: None,
        },
        (false, true) => Wetting::Wet {
            edge: EdgeState::new(edge.h_l, edge.h_l, edge.hu_l, -edge.hu_l, edge.b_l, edge.b_l),
            dry_side: Some(Side::Right),
        },
        (true, false) => Wetting::Wet {
            edge: EdgeState::new(edge.h_r, edge.h_r, -edge.hu_r, edge.hu_r, edge.b_r, edge.b_r),
            dry_side: Some(Side::Left),
        },
    }
}

/// Run `solve` under the wet/dry treatment.
///
/// `solve` only ever sees edges where both heights exceed `dry_tol`.
#[inline]
pub fn with_dry_treatment<W, F>(
    edge: &EdgeState<W>,
    dry_tol: W,
    solve: F,
) -> Result<NetUpdates<W>, RiemannError>
where
    W: Working,
    F: FnOnce(&EdgeState<W>) -> Result<NetUpdates<W>, RiemannError>,
{
    match classify(edge, dry_tol) {
        Wetting::BothDry => Ok(NetUpdates::zero()),
        Wetting::Wet { edge, dry_side } => {
            let mut updates = solve(&edge)?;
            match dry_side {
                Some(Side::Left) => {
                    updates.h_left = W::ZERO;
                    updates.hu_left = W::ZERO;
                }
                Some(Side::Right) => {
                    updates.h_right = W::ZERO;
                    updates.hu_right = W::ZERO;
                }
                None => {}
            }
            Ok(updates)
        }
    }
}
