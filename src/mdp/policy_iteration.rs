//! Policy iteration driver.
//!
//! Alternates full policy evaluation with greedy improvement until an
//! improvement pass leaves every free cell's action unchanged.

use log::{info, warn};
use ndarray::Array2;
use std::collections::HashSet;

use super::action::Action;
use super::config::PolicyIterationConfig;
use super::evaluation::evaluate;
use super::grid::Grid;
use super::improvement::improve;
use super::transition::{action_value, step};
use crate::error::{MazeError, Result};

/// Lifecycle of a [`PolicyIteration`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Converged,
}

/// What happened in one evaluate/improve round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationReport {
    /// 1-based index of the round
    pub iteration: usize,
    /// Sweeps the evaluation needed
    pub sweeps: usize,
    /// Free cells whose action changed during improvement
    pub changed: usize,
    pub converged: bool,
}

/// Policy iteration over a borrowed grid.
///
/// Owns the value and policy tables and mutates them in place each round.
///
/// # Examples
///
/// ```
/// use maze_policy::mdp::{Action, Grid, PolicyIteration, PolicyIterationConfig};
///
/// let grid = Grid::reference();
/// let solution = PolicyIteration::new(&grid, PolicyIterationConfig::default())
///     .unwrap()
///     .run()
///     .unwrap();
///
/// assert_eq!(solution.action(4, 1), Action::Up);
/// assert_eq!(solution.value(4, 1), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct PolicyIteration<'a> {
    grid: &'a Grid,
    config: PolicyIterationConfig,
    values: Array2<f64>,
    policy: Array2<Action>,
    iterations: usize,
    state: DriverState,
}

impl<'a> PolicyIteration<'a> {
    /// Starts from zero values and [`Action::Up`] everywhere.
    pub fn new(grid: &'a Grid, config: PolicyIterationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            grid,
            config,
            values: Array2::zeros(grid.shape()),
            policy: Array2::from_elem(grid.shape(), Action::default()),
            iterations: 0,
            state: DriverState::Running,
        })
    }

    /// Replaces the starting policy.
    pub fn with_policy(mut self, policy: Array2<Action>) -> Result<Self> {
        if policy.dim() != self.grid.shape() {
            return Err(MazeError::ShapeMismatch {
                expected: self.grid.shape(),
                found: policy.dim(),
            });
        }
        self.policy = policy;
        Ok(self)
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn policy(&self) -> &Array2<Action> {
        &self.policy
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Runs one evaluate/improve round.
    ///
    /// Once converged, further calls do no work and report convergence again.
    pub fn step(&mut self) -> Result<IterationReport> {
        if self.state == DriverState::Converged {
            return Ok(IterationReport {
                iteration: self.iterations,
                sweeps: 0,
                changed: 0,
                converged: true,
            });
        }

        let evaluation = evaluate(self.grid, &self.policy, &mut self.values, &self.config)?;
        let improvement = improve(self.grid, &mut self.policy, &self.values, self.config.gamma);
        self.iterations += 1;
        if improvement.converged {
            self.state = DriverState::Converged;
        }

        Ok(IterationReport {
            iteration: self.iterations,
            sweeps: evaluation.sweeps,
            changed: improvement.changed,
            converged: improvement.converged,
        })
    }

    /// Iterates until the policy is stable.
    pub fn run(self) -> Result<Solution<'a>> {
        self.run_with(|_, _, _| {})
    }

    /// Iterates until the policy is stable, handing the tables to `observer`
    /// after every round.
    ///
    /// # Errors
    /// Propagates evaluation cap errors, and returns
    /// [`MazeError::PolicyUnstable`] after `config.max_iterations` rounds
    /// without convergence.
    pub fn run_with<F>(mut self, mut observer: F) -> Result<Solution<'a>>
    where
        F: FnMut(&IterationReport, &Array2<f64>, &Array2<Action>),
    {
        while self.state == DriverState::Running {
            if self.iterations >= self.config.max_iterations {
                warn!(
                    "policy still changing after {} rounds, giving up",
                    self.iterations
                );
                return Err(MazeError::PolicyUnstable {
                    iterations: self.iterations,
                });
            }
            let report = self.step()?;
            observer(&report, &self.values, &self.policy);
        }

        info!("policy iteration converged after {} rounds", self.iterations);
        Ok(Solution {
            grid: self.grid,
            gamma: self.config.gamma,
            values: self.values,
            policy: self.policy,
            iterations: self.iterations,
        })
    }
}

/// Converged value and policy tables.
#[derive(Debug, Clone)]
pub struct Solution<'a> {
    grid: &'a Grid,
    gamma: f64,
    pub values: Array2<f64>,
    pub policy: Array2<Action>,
    /// Evaluate/improve rounds taken, including the final stable one
    pub iterations: usize,
}

impl Solution<'_> {
    pub fn value(&self, x: usize, y: usize) -> f64 {
        self.values[[y, x]]
    }

    pub fn action(&self, x: usize, y: usize) -> Action {
        self.policy[[y, x]]
    }

    /// Look-ahead value of `action` from `(x, y)` under the final values.
    pub fn q_value(&self, x: usize, y: usize, action: Action) -> f64 {
        action_value(self.grid, &self.values, self.gamma, x, y, action)
    }

    /// Follows the policy from the free cell `start` until it enters a goal.
    ///
    /// The returned path begins with `start` and ends with the goal cell.
    ///
    /// # Errors
    /// [`MazeError::NotFree`] if `start` is not a free cell, and
    /// [`MazeError::PolicyCycle`] if the walk revisits a cell.
    pub fn trace(&self, start: (usize, usize)) -> Result<Vec<(usize, usize)>> {
        let (x, y) = start;
        if !self.grid.in_bounds(x as isize, y as isize) || !self.grid.is_free(x, y) {
            return Err(MazeError::NotFree { x, y });
        }

        let mut path = vec![start];
        let mut visited = HashSet::from([start]);
        let mut current = start;
        loop {
            let s = step(self.grid, current.0, current.1, self.action(current.0, current.1));
            let next = (s.x, s.y);
            if self.grid.is_goal(s.x, s.y) {
                path.push(next);
                return Ok(path);
            }
            if !visited.insert(next) {
                return Err(MazeError::PolicyCycle {
                    start,
                    revisited: next,
                });
            }
            path.push(next);
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdp::config::SweepMode;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reference_maze_converges() {
        let grid = Grid::reference();
        let solution = PolicyIteration::new(&grid, PolicyIterationConfig::default())
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(solution.iterations, 7);
        let codes = solution.policy.mapv(Action::code);
        let expected: Array2<u8> = ndarray::arr2(&[
            [2, 0, 2, 0, 0],
            [2, 0, 2, 0, 0],
            [1, 1, 2, 0, 0],
            [0, 0, 2, 0, 0],
            [0, 0, 1, 1, 0],
        ]);
        assert_eq!(codes, expected);
        assert_eq!(solution.value(4, 1), 1.0);
        assert_abs_diff_eq!(solution.value(0, 0), -6.5481, epsilon = 0.01);
    }

    #[test]
    fn test_step_tracks_state() {
        let grid = Grid::reference();
        let mut driver = PolicyIteration::new(&grid, PolicyIterationConfig::default()).unwrap();
        assert_eq!(driver.state(), DriverState::Running);

        let first = driver.step().unwrap();
        assert_eq!(first.iteration, 1);
        assert!(!first.converged);
        assert!(first.sweeps > 1);

        while driver.state() == DriverState::Running {
            driver.step().unwrap();
        }
        let iterations = driver.iterations();
        let again = driver.step().unwrap();
        assert!(again.converged);
        assert_eq!(again.sweeps, 0);
        assert_eq!(driver.iterations(), iterations);
    }

    #[test]
    fn test_observer_sees_every_round() {
        let grid = Grid::reference();
        let mut rounds = Vec::new();
        let solution = PolicyIteration::new(&grid, PolicyIterationConfig::default())
            .unwrap()
            .run_with(|report, values, policy| {
                assert_eq!(values.dim(), (5, 5));
                assert_eq!(policy.dim(), (5, 5));
                rounds.push(report.iteration);
            })
            .unwrap();

        assert_eq!(rounds, (1..=solution.iterations).collect::<Vec<_>>());
    }

    #[test]
    fn test_iteration_cap_is_reported() {
        let grid = Grid::reference();
        let config = PolicyIterationConfig::default().with_max_iterations(1);
        let err = PolicyIteration::new(&grid, config)
            .unwrap()
            .run()
            .unwrap_err();
        assert_eq!(err, MazeError::PolicyUnstable { iterations: 1 });
    }

    #[test]
    fn test_rejects_invalid_config_and_policy_shape() {
        let grid = Grid::reference();
        let config = PolicyIterationConfig {
            gamma: 1.0,
            ..PolicyIterationConfig::default()
        };
        assert!(matches!(
            PolicyIteration::new(&grid, config),
            Err(MazeError::InvalidDiscount(_))
        ));

        let err = PolicyIteration::new(&grid, PolicyIterationConfig::default())
            .unwrap()
            .with_policy(Array2::from_elem((2, 2), Action::Left))
            .unwrap_err();
        assert_eq!(
            err,
            MazeError::ShapeMismatch {
                expected: (5, 5),
                found: (2, 2)
            }
        );
    }

    #[test]
    fn test_snapshot_mode_reaches_same_policy() {
        let grid = Grid::reference();
        let in_place = PolicyIteration::new(&grid, PolicyIterationConfig::default())
            .unwrap()
            .run()
            .unwrap();
        let config = PolicyIterationConfig::default().with_sweep(SweepMode::Snapshot);
        let snapshot = PolicyIteration::new(&grid, config).unwrap().run().unwrap();

        assert_eq!(in_place.policy, snapshot.policy);
        for (a, b) in in_place.values.iter().zip(snapshot.values.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 0.02);
        }
    }

    #[test]
    fn test_trace_follows_policy_to_goal() {
        let grid = Grid::reference();
        let solution = PolicyIteration::new(&grid, PolicyIterationConfig::default())
            .unwrap()
            .run()
            .unwrap();

        let path = solution.trace((4, 4)).unwrap();
        assert_eq!(path, vec![(4, 4), (4, 3), (4, 2), (4, 1), (4, 0)]);
        assert_eq!(solution.trace((1, 0)), Err(MazeError::NotFree { x: 1, y: 0 }));
    }

    #[test]
    fn test_trace_detects_cycles() {
        let grid = Grid::reference();
        // Unconverged all-up policy: (0, 0) bumps the border forever.
        let driver = PolicyIteration::new(&grid, PolicyIterationConfig::default()).unwrap();
        let solution = Solution {
            grid: &grid,
            gamma: 0.9,
            values: driver.values().clone(),
            policy: driver.policy().clone(),
            iterations: 0,
        };
        assert_eq!(
            solution.trace((0, 2)),
            Err(MazeError::PolicyCycle {
                start: (0, 2),
                revisited: (0, 0)
            })
        );
    }

    #[test]
    fn test_q_value_matches_policy_choice() {
        let grid = Grid::reference();
        let solution = PolicyIteration::new(&grid, PolicyIterationConfig::default())
            .unwrap()
            .run()
            .unwrap();

        let cells: Vec<_> = grid.free_cells().collect();
        for (x, y) in cells {
            let chosen = solution.q_value(x, y, solution.action(x, y));
            for action in Action::ALL {
                assert!(solution.q_value(x, y, action) <= chosen);
            }
        }
    }
}
