use crate::error::{MazeError, Result};

/// How a policy-evaluation sweep reads the value table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepMode {
    /// Gauss-Seidel: cells updated earlier in a sweep are read by later cells
    /// of the same sweep.
    #[default]
    InPlace,
    /// Jacobi: every cell reads the previous sweep's values. Cells are updated
    /// in parallel.
    Snapshot,
}

/// Configuration options for policy iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyIterationConfig {
    /// Discount factor, in (0, 1)
    pub gamma: f64,
    /// Evaluation stops once the largest per-cell change in a sweep is at most this
    pub theta: f64,
    /// Upper bound on sweeps per evaluation
    pub max_sweeps: usize,
    /// Upper bound on evaluate/improve rounds
    pub max_iterations: usize,
    pub sweep: SweepMode,
}

impl Default for PolicyIterationConfig {
    fn default() -> Self {
        Self {
            gamma: 0.9,
            theta: 0.001,
            max_sweeps: 100_000,
            max_iterations: 1_000,
            sweep: SweepMode::InPlace,
        }
    }
}

impl PolicyIterationConfig {
    /// Default configuration with the given discount factor.
    pub fn new(gamma: f64) -> Result<Self> {
        let config = Self {
            gamma,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_theta(mut self, theta: f64) -> Self {
        self.theta = theta;
        self
    }

    pub fn with_sweep(mut self, sweep: SweepMode) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Checks that `gamma` lies in the open interval (0, 1) and `theta` is positive.
    pub fn validate(&self) -> Result<()> {
        if !(self.gamma > 0.0 && self.gamma < 1.0) {
            return Err(MazeError::InvalidDiscount(self.gamma));
        }
        if !(self.theta.is_finite() && self.theta > 0.0) {
            return Err(MazeError::InvalidThreshold(self.theta));
        }
        Ok(())
    }
}
