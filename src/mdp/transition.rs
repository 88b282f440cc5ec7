//! Deterministic transition and reward function of the maze MDP.

use ndarray::Array2;

use super::action::Action;
use super::grid::{CellKind, Grid};

/// Reward for the single transition that lands on a goal cell.
pub const GOAL_REWARD: f64 = 1.0;
/// Reward for every other transition, including bumping into a wall or the border.
pub const STEP_REWARD: f64 = -1.0;

/// Result of taking one action from a free cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub x: usize,
    pub y: usize,
    pub reward: f64,
}

/// Moves from the free cell `(x, y)` by `action`.
///
/// Moving off the grid or into a wall leaves the agent where it is. Every
/// transition costs [`STEP_REWARD`] except the one entering a goal, which pays
/// [`GOAL_REWARD`].
///
/// # Examples
///
/// ```
/// use maze_policy::mdp::{step, Action, Grid};
///
/// let grid = Grid::reference();
/// let s = step(&grid, 4, 1, Action::Up);
/// assert_eq!((s.x, s.y, s.reward), (4, 0, 1.0));
/// ```
pub fn step(grid: &Grid, x: usize, y: usize, action: Action) -> Step {
    let (dx, dy) = action.delta();
    let nx = x as isize + dx;
    let ny = y as isize + dy;

    if !grid.in_bounds(nx, ny) || grid.cell_kind(nx as usize, ny as usize) == CellKind::Wall {
        return Step {
            x,
            y,
            reward: STEP_REWARD,
        };
    }

    let (nx, ny) = (nx as usize, ny as usize);
    let reward = if grid.is_goal(nx, ny) {
        GOAL_REWARD
    } else {
        STEP_REWARD
    };
    Step {
        x: nx,
        y: ny,
        reward,
    }
}

/// One-step look-ahead value of taking `action` in `(x, y)`.
///
/// Goal cells are terminal, so entering one is worth its reward alone.
pub fn action_value(
    grid: &Grid,
    values: &Array2<f64>,
    gamma: f64,
    x: usize,
    y: usize,
    action: Action,
) -> f64 {
    let s = step(grid, x, y, action);
    if grid.is_goal(s.x, s.y) {
        s.reward
    } else {
        s.reward + gamma * values[[s.y, s.x]]
    }
}
