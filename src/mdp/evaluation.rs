//! Iterative policy evaluation.
//!
//! Repeatedly applies the Bellman expectation backup for a fixed policy to
//! every free cell until the largest change in one sweep is at most `theta`.

use log::{debug, warn};
use ndarray::Array2;
use rayon::prelude::*;

use super::action::Action;
use super::config::{PolicyIterationConfig, SweepMode};
use super::grid::Grid;
use super::transition::action_value;
use crate::error::{MazeError, Result};

/// Outcome of one call to [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Number of full sweeps performed, including the final one that settled
    pub sweeps: usize,
    /// Largest per-cell change in the final sweep
    pub delta: f64,
}

/// Evaluates `policy`, updating `values` in place.
///
/// Only free cells are written; wall and goal entries keep whatever they
/// held. With [`SweepMode::InPlace`] cells are visited in row-major order and
/// each update is visible to the cells after it in the same sweep.
///
/// # Errors
/// Returns [`MazeError::EvaluationDiverged`] if `config.max_sweeps` sweeps
/// pass without the change dropping to `config.theta`.
///
/// # Panics
/// Panics if `policy` or `values` do not have the grid's shape.
pub fn evaluate(
    grid: &Grid,
    policy: &Array2<Action>,
    values: &mut Array2<f64>,
    config: &PolicyIterationConfig,
) -> Result<Evaluation> {
    assert_eq!(policy.dim(), grid.shape(), "policy shape must match grid");
    assert_eq!(values.dim(), grid.shape(), "value shape must match grid");

    let cells: Vec<(usize, usize)> = grid.free_cells().collect();
    for sweeps in 1..=config.max_sweeps {
        let delta = match config.sweep {
            SweepMode::InPlace => sweep_in_place(grid, &cells, policy, values, config.gamma),
            SweepMode::Snapshot => sweep_snapshot(grid, &cells, policy, values, config.gamma),
        };
        if delta <= config.theta {
            debug!("policy evaluation settled after {sweeps} sweeps (delta {delta:.6})");
            return Ok(Evaluation { sweeps, delta });
        }
    }

    warn!(
        "policy evaluation hit the {} sweep cap before reaching theta {}",
        config.max_sweeps, config.theta
    );
    Err(MazeError::EvaluationDiverged {
        sweeps: config.max_sweeps,
    })
}

fn sweep_in_place(
    grid: &Grid,
    cells: &[(usize, usize)],
    policy: &Array2<Action>,
    values: &mut Array2<f64>,
    gamma: f64,
) -> f64 {
    let mut delta = 0.0_f64;
    for &(x, y) in cells {
        let old = values[[y, x]];
        let new = action_value(grid, values, gamma, x, y, policy[[y, x]]);
        values[[y, x]] = new;
        delta = delta.max((old - new).abs());
    }
    delta
}

fn sweep_snapshot(
    grid: &Grid,
    cells: &[(usize, usize)],
    policy: &Array2<Action>,
    values: &mut Array2<f64>,
    gamma: f64,
) -> f64 {
    let previous: &Array2<f64> = values;
    let updates: Vec<f64> = cells
        .par_iter()
        .map(|&(x, y)| action_value(grid, previous, gamma, x, y, policy[[y, x]]))
        .collect();

    let mut delta = 0.0_f64;
    for (&(x, y), new) in cells.iter().zip(updates) {
        delta = delta.max((values[[y, x]] - new).abs());
        values[[y, x]] = new;
    }
    delta
}
