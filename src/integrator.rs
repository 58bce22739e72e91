//! Fixed-step RK4 integration of the GVF equation.

use crate::config::{ChannelSpec, Tunables};
use crate::derivative::{Slope, dy_dx, evaluate};
use crate::state::Profile;
use tracing::{debug, info};

/// Why an integration run stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Termination {
    /// All requested steps were taken
    Completed,
    /// Proposed depth fell to or below the minimum-depth cap
    DryBed { x: f64 },
    /// Proposed depth entered the near-critical band
    NearCritical { x: f64 },
    /// Slope at the proposed depth evaluated to exactly zero
    ZeroSlope { x: f64 },
}

impl Termination {
    pub fn label(&self) -> &'static str {
        match self {
            Termination::Completed => "completed",
            Termination::DryBed { .. } => "dry bed",
            Termination::NearCritical { .. } => "near critical depth",
            Termination::ZeroSlope { .. } => "zero slope",
        }
    }
}

/// Integrate from (x0, y0) over `length` using the signed step `h`.
///
/// Takes at most `floor(length / |h|)` steps; a zero or non-finite step
/// returns the starting point alone. Before a step is committed
/// the slope is re-evaluated at the current x and the proposed depth; a
/// non-positive depth or a zero slope there ends the run and the profile
/// built so far is returned.
pub fn solve_profile(
    ch: &ChannelSpec,
    tun: &Tunables,
    x0: f64,
    y0: f64,
    length: f64,
    h: f64,
) -> Profile {
    let mut profile = Profile::new(x0, y0, h);
    if h == 0.0 || !h.is_finite() {
        return profile;
    }
    let steps = (length / h.abs()).floor() as usize;

    debug!("Starting integration: x={x0}, y={y0}, dx={h}, steps={steps}");

    let mut x = x0;
    let mut y = y0;
    let f = |x: f64, y: f64| dy_dx(ch, tun, x, y);

    for _ in 0..steps {
        let k1 = f(x, y);
        let k2 = f(x + h / 2.0, y + k1 * h / 2.0);
        let k3 = f(x + h / 2.0, y + k2 * h / 2.0);
        let k4 = f(x + h, y + k3 * h);

        let y_next = y + (h / 6.0) * (k1 + 2.0 * k2 + 2.0 * k3 + k4);

        let stop = if y_next <= 0.0 {
            Some(Termination::DryBed { x })
        } else {
            match evaluate(ch, tun, x, y_next) {
                Slope::DryBed => Some(Termination::DryBed { x }),
                Slope::NearCritical => Some(Termination::NearCritical { x }),
                Slope::Regular(s) if s == 0.0 => Some(Termination::ZeroSlope { x }),
                Slope::Regular(_) => None,
            }
        };

        if let Some(reason) = stop {
            info!("Integration stopped early at x={x:.2} ({})", reason.label());
            profile.termination = reason;
            break;
        }

        x += h;
        y = y_next;
        profile.push(x, y);
    }

    profile
}
