//! Newton-Raphson search for normal and critical depth.

use crate::config::{ChannelSpec, Tunables};
use tracing::debug;

/// Outcome of a single depth search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthSolution {
    /// Last depth estimate (m)
    pub depth: f64,
    /// Residual at the last evaluated depth
    pub residual: f64,
    pub iterations: usize,
    /// False when the iteration budget ran out or the update broke down
    pub converged: bool,
}

/// Normal and critical depth of one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceDepths {
    /// `None` on horizontal or adverse beds, where uniform flow cannot exist
    pub normal: Option<DepthSolution>,
    pub critical: DepthSolution,
}

impl ReferenceDepths {
    pub fn compute(ch: &ChannelSpec, tun: &Tunables) -> Self {
        let normal = (ch.s0 > 0.0).then(|| solve_normal_depth(ch, tun));
        ReferenceDepths {
            normal,
            critical: solve_critical_depth(ch, tun),
        }
    }

    pub fn yn(&self) -> Option<f64> {
        self.normal.map(|s| s.depth)
    }

    pub fn yc(&self) -> f64 {
        self.critical.depth
    }

    pub fn converged(&self) -> bool {
        self.critical.converged && self.normal.is_none_or(|s| s.converged)
    }
}

/// Scalar Newton iteration with a forward-difference derivative.
///
/// Non-positive iterates are replaced by `tun.depth_floor`. The search
/// stops when `|f(y)| < tun.tolerance`, after `tun.max_iterations`
/// updates, or when the update is no longer finite.
pub fn newton_depth<F>(residual: F, seed: f64, tun: &Tunables) -> DepthSolution
where
    F: Fn(f64) -> f64,
{
    let mut y = seed;
    let mut f = f64::NAN;

    for iter in 0..tun.max_iterations {
        f = residual(y);
        if f.abs() < tun.tolerance {
            return DepthSolution {
                depth: y,
                residual: f,
                iterations: iter,
                converged: true,
            };
        }

        let df = (residual(y + tun.fd_step) - f) / tun.fd_step;
        let next = y - f / df;
        if !next.is_finite() {
            debug!("Newton update broke down at y={y}, f={f}, df={df}");
            return DepthSolution {
                depth: y,
                residual: f,
                iterations: iter,
                converged: false,
            };
        }

        y = if next <= 0.0 { tun.depth_floor } else { next };
    }

    DepthSolution {
        depth: y,
        residual: f,
        iterations: tun.max_iterations,
        converged: false,
    }
}

/// Manning discharge at depth `y` minus the design discharge.
pub fn manning_residual(ch: &ChannelSpec, y: f64) -> f64 {
    let area = ch.area(y);
    let r = ch.hydraulic_radius(y);
    (1.0 / ch.n) * area * r.powf(2.0 / 3.0) * ch.s0.sqrt() - ch.q
}

/// Fr^2 - 1 at depth `y`, with non-positive area replaced by `area_floor`.
pub fn critical_residual(ch: &ChannelSpec, y: f64, gravity: f64, area_floor: f64) -> f64 {
    let mut area = ch.area(y);
    if area <= 0.0 {
        area = area_floor;
    }
    (ch.q * ch.q * ch.top_width(y)) / (gravity * area.powi(3)) - 1.0
}

pub fn solve_normal_depth(ch: &ChannelSpec, tun: &Tunables) -> DepthSolution {
    newton_depth(|y| manning_residual(ch, y), tun.normal_seed, tun)
}

pub fn solve_critical_depth(ch: &ChannelSpec, tun: &Tunables) -> DepthSolution {
    newton_depth(
        |y| critical_residual(ch, y, tun.gravity, tun.area_floor),
        tun.critical_seed,
        tun,
    )
}
