//! Policy iteration for deterministic grid mazes.
//!
//! The maze is a Markov decision process whose states are the free cells,
//! whose actions are the four unit moves and whose only positive reward is
//! the one for stepping onto a goal.

pub mod action;
pub mod config;
pub mod evaluation;
pub mod grid;
pub mod improvement;
pub mod policy_iteration;
pub mod render;
pub mod transition;

pub use action::Action;
pub use config::{PolicyIterationConfig, SweepMode};
pub use evaluation::{evaluate, Evaluation};
pub use grid::{CellKind, Grid};
pub use improvement::{action_values, greedy_action, improve, Improvement};
pub use policy_iteration::{DriverState, IterationReport, PolicyIteration, Solution};
pub use render::{policy_table, values_table, PolicyStyle};
pub use transition::{action_value, step, Step, GOAL_REWARD, STEP_REWARD};
