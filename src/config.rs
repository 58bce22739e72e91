use crate::error::{GvfError, GvfResult};

// Header names for the scenario CSV columns
#[derive(Debug, Clone)]
pub struct ColumnConfig {
    pub discharge: String,
    pub n: String,
    pub s0: String,
    pub b: String,
    pub m: String,
    pub y0: String,
    pub x0: String,
    pub length: String,
}

impl ColumnConfig {
    pub fn new() -> Self {
        ColumnConfig {
            discharge: "Q".to_string(),
            n: "n".to_string(),
            s0: "S0".to_string(),
            b: "b".to_string(),
            m: "m".to_string(),
            y0: "y0".to_string(),
            x0: "x0".to_string(),
            length: "length".to_string(),
        }
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self::new()
    }
}

// Output format for a single profile run
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Csv,
    Table,
    Both,
}

/// Trapezoidal prismatic channel carrying a steady discharge.
///
/// Built once per run through [`ChannelSpec::new`] and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSpec {
    /// Discharge Q (m^3/s)
    pub q: f64,
    /// Manning roughness
    pub n: f64,
    /// Bed slope (m/m)
    pub s0: f64,
    /// Bottom width (m)
    pub b: f64,
    /// Side slope, horizontal:vertical
    pub m: f64,
}

impl ChannelSpec {
    pub fn new(q: f64, n: f64, s0: f64, b: f64, m: f64) -> GvfResult<Self> {
        let invalid = |what: String| Err(GvfError::InvalidChannel { what });

        for (name, value) in [("Q", q), ("n", n), ("S0", s0), ("b", b), ("m", m)] {
            if !value.is_finite() {
                return invalid(format!("{name} must be finite, got {value}"));
            }
        }
        if q <= 0.0 {
            return invalid(format!("discharge must be positive, got {q}"));
        }
        if n <= 0.0 {
            return invalid(format!("Manning's n must be positive, got {n}"));
        }
        if b < 0.0 || m < 0.0 {
            return invalid(format!("b and m must be non-negative, got b={b}, m={m}"));
        }
        if b == 0.0 && m == 0.0 {
            return invalid("b and m cannot both be zero".to_string());
        }

        Ok(ChannelSpec { q, n, s0, b, m })
    }
}

/// Numerical thresholds used by the solvers and the integrator.
///
/// Defaults reproduce the reference behaviour; every field can be tuned
/// for channels of unusual scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tunables {
    /// Gravitational acceleration (m/s^2)
    pub gravity: f64,
    /// Newton seed for the normal-depth search (m)
    pub normal_seed: f64,
    /// Newton seed for the critical-depth search (m)
    pub critical_seed: f64,
    /// Forward-difference step for df/dy (m)
    pub fd_step: f64,
    /// Residual tolerance for both root searches
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Replacement for non-positive Newton iterates (m)
    pub depth_floor: f64,
    /// Replacement for non-positive area in the critical residual (m^2)
    pub area_floor: f64,
    /// Depths at or below this yield a zero slope (m)
    pub min_depth: f64,
    /// Half-width of the near-critical band on |1 - Fr^2|
    pub froude_band: f64,
    /// Integration step magnitude (m)
    pub step: f64,
    /// |yn - yc| at or below this classifies the slope as critical (m)
    pub critical_slope_band: f64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            normal_seed: 4.0,
            critical_seed: 2.0,
            fd_step: 1e-5,
            tolerance: 1e-6,
            max_iterations: 100,
            depth_floor: 0.1,
            area_floor: 0.1,
            min_depth: 0.05,
            froude_band: 0.01,
            step: 5.0,
            critical_slope_band: 1e-4,
        }
    }
}
