use crate::integrator::Termination;
use crate::routing::RunOutcome;
use serde::Serialize;

// One row of the sweep summary CSV
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub scenario: usize,
    pub q: f64,
    pub n: f64,
    pub s0: f64,
    pub b: f64,
    pub m: f64,
    pub yn: Option<f64>,
    pub yc: f64,
    pub converged: bool,
    pub profile_type: String,
    pub direction: String,
    pub points: usize,
    pub x_end: f64,
    pub y_end: f64,
    pub termination: String,
}

impl RunSummary {
    pub fn new(scenario: usize, outcome: &RunOutcome) -> Self {
        let end = outcome.profile.last();
        let ch = &outcome.channel;
        let termination = match outcome.profile.termination {
            Termination::Completed => Termination::Completed.label().to_string(),
            t @ (Termination::DryBed { x }
            | Termination::NearCritical { x }
            | Termination::ZeroSlope { x }) => format!("{} at x={x:.2}", t.label()),
        };

        RunSummary {
            scenario,
            q: ch.q,
            n: ch.n,
            s0: ch.s0,
            b: ch.b,
            m: ch.m,
            yn: outcome.refs.yn(),
            yc: outcome.refs.yc(),
            converged: outcome.refs.converged(),
            profile_type: outcome.profile_type.to_string(),
            direction: format!("{:?}", outcome.direction).to_lowercase(),
            points: outcome.profile.len(),
            x_end: end.x,
            y_end: end.y,
            termination,
        }
    }
}
