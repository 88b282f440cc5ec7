//! Error types shared by the grid model and the policy-iteration solver.

use thiserror::Error;

/// Errors raised while building a maze or solving it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MazeError {
    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({x}, {y}) has unknown code {code}")]
    UnknownCell { x: usize, y: usize, code: u8 },

    #[error("grid has no free cell")]
    NoFreeCell,

    #[error("grid has no goal cell")]
    NoGoal,

    #[error("discount factor must lie in (0, 1), got {0}")]
    InvalidDiscount(f64),

    #[error("convergence threshold must be finite and positive, got {0}")]
    InvalidThreshold(f64),

    #[error("policy table is {found:?} (height, width), expected {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("policy evaluation did not settle within {sweeps} sweeps")]
    EvaluationDiverged { sweeps: usize },

    #[error("policy still changing after {iterations} improvement rounds")]
    PolicyUnstable { iterations: usize },

    #[error("policy starting at {start:?} loops back to {revisited:?} without reaching a goal")]
    PolicyCycle {
        start: (usize, usize),
        revisited: (usize, usize),
    },

    #[error("cell ({x}, {y}) is not a free cell")]
    NotFree { x: usize, y: usize },

    #[error("invalid grid text: {0}")]
    Parse(String),
}

impl MazeError {
    /// Convenience constructor for textual grid errors.
    pub fn parse(msg: impl Into<String>) -> Self {
        MazeError::Parse(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;
