//! Gradually varied flow profiles in prismatic trapezoidal channels.
//!
//! Normal and critical depth are found by Newton-Raphson, the regime picks
//! the integration direction, and the GVF equation is stepped with RK4.

pub mod cli;
pub mod config;
pub mod derivative;
pub mod error;
pub mod geometry;
pub mod integrator;
pub mod io;
pub mod regime;
pub mod routing;
pub mod solver;
pub mod state;

pub use config::{ChannelSpec, Tunables};
pub use error::{GvfError, GvfResult};
pub use integrator::{Termination, solve_profile};
pub use routing::{Boundary, RunOutcome, Scenario, run_scenario, run_sweep};
pub use solver::{DepthSolution, ReferenceDepths};
pub use state::{Profile, ProfilePoint};
