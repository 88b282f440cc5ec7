//! Greedy policy improvement from a value table.

use log::debug;
use ndarray::Array2;

use super::action::Action;
use super::grid::Grid;
use super::transition::action_value;

/// Outcome of one improvement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Improvement {
    /// Free cells whose action differs from the one they held before the pass
    pub changed: usize,
    /// True when no free cell changed its action
    pub converged: bool,
}

/// Look-ahead value of every action from `(x, y)`, indexed by [`Action::code`].
pub fn action_values(
    grid: &Grid,
    values: &Array2<f64>,
    gamma: f64,
    x: usize,
    y: usize,
) -> [f64; 4] {
    Action::ALL.map(|action| action_value(grid, values, gamma, x, y, action))
}

/// The action with the highest look-ahead value.
///
/// Ties keep the earliest action in `Up`, `Right`, `Down`, `Left` order.
pub fn greedy_action(
    grid: &Grid,
    values: &Array2<f64>,
    gamma: f64,
    x: usize,
    y: usize,
) -> Action {
    let q = action_values(grid, values, gamma, x, y);
    let mut best = Action::ALL[0];
    let mut best_q = q[0];
    for (&action, &q_a) in Action::ALL.iter().zip(q.iter()).skip(1) {
        if q_a > best_q {
            best = action;
            best_q = q_a;
        }
    }
    best
}

/// Rewrites `policy` greedily with respect to `values` for every free cell.
///
/// Entries for wall and goal cells are left untouched.
pub fn improve(
    grid: &Grid,
    policy: &mut Array2<Action>,
    values: &Array2<f64>,
    gamma: f64,
) -> Improvement {
    let mut changed = 0;
    for (x, y) in grid.free_cells() {
        let best = greedy_action(grid, values, gamma, x, y);
        if policy[[y, x]] != best {
            changed += 1;
        }
        policy[[y, x]] = best;
    }
    debug!("policy improvement changed {changed} cells");

    Improvement {
        changed,
        converged: changed == 0,
    }
}
