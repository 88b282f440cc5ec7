pub mod error;
pub mod mdp;

pub use error::{MazeError, Result};
pub use mdp::{Grid, PolicyIteration, PolicyIterationConfig, Solution};
