use crate::config::{ChannelSpec, Tunables};
use crate::error::{GvfError, GvfResult};
use crate::integrator::solve_profile;
use crate::regime::{Direction, FlowState, ProfileType, SlopeClass};
use crate::solver::ReferenceDepths;
use crate::state::Profile;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{info, warn};

// Control point and reach length for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub x0: f64,
    pub y0: f64,
    pub length: f64,
}

impl Boundary {
    pub fn validate(&self, step: f64) -> GvfResult<()> {
        let invalid = |what: String| Err(GvfError::InvalidRun { what });
        if !self.x0.is_finite() {
            return invalid(format!("starting position must be finite, got {}", self.x0));
        }
        if !(self.y0.is_finite() && self.y0 > 0.0) {
            return invalid(format!("starting depth must be positive, got {}", self.y0));
        }
        if !(self.length.is_finite() && self.length > 0.0) {
            return invalid(format!("length must be positive, got {}", self.length));
        }
        if !step.is_finite() || step == 0.0 {
            return invalid(format!("step must be non-zero, got {step}"));
        }
        Ok(())
    }
}

// One channel and boundary condition in a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub id: usize,
    pub channel: ChannelSpec,
    pub boundary: Boundary,
}

// Everything computed for a single scenario
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub channel: ChannelSpec,
    pub refs: ReferenceDepths,
    pub slope: SlopeClass,
    pub flow: FlowState,
    pub direction: Direction,
    pub profile_type: ProfileType,
    pub profile: Profile,
}

// Reference depths, regime, direction and profile for one channel
pub fn run_scenario(
    channel: &ChannelSpec,
    boundary: &Boundary,
    tun: &Tunables,
) -> GvfResult<RunOutcome> {
    boundary.validate(tun.step)?;

    let refs = ReferenceDepths::compute(channel, tun);
    if let Some(sol) = refs.normal.filter(|s| !s.converged) {
        warn!(
            "Normal depth did not converge after {} iterations (y={:.4}, residual={:.3e})",
            sol.iterations, sol.depth, sol.residual
        );
    }
    if !refs.critical.converged {
        warn!(
            "Critical depth did not converge after {} iterations (y={:.4}, residual={:.3e})",
            refs.critical.iterations, refs.critical.depth, refs.critical.residual
        );
    }

    let slope = SlopeClass::classify(channel, &refs, tun);
    let flow = FlowState::at_depth(boundary.y0, refs.yc());
    let direction = flow.direction();
    let profile_type = ProfileType::classify(slope, boundary.y0, &refs);
    let step = direction.signed_step(tun.step);

    info!("{profile_type} profile, {flow:?} start, integrating {direction:?} with dx={step}");

    let profile = solve_profile(
        channel,
        tun,
        boundary.x0,
        boundary.y0,
        boundary.length,
        step,
    );

    Ok(RunOutcome {
        channel: *channel,
        refs,
        slope,
        flow,
        direction,
        profile_type,
        profile,
    })
}

// Independent scenarios in parallel; results keep input order
pub fn run_sweep(
    scenarios: &[Scenario],
    tun: &Tunables,
    progress: Arc<ProgressBar>,
) -> Vec<GvfResult<RunOutcome>> {
    let results: Vec<_> = scenarios
        .par_iter()
        .map(|scenario| {
            let outcome = run_scenario(&scenario.channel, &scenario.boundary, tun);
            if let Err(e) = &outcome {
                warn!("Scenario {} skipped: {}", scenario.id, e);
            }
            progress.inc(1);
            outcome
        })
        .collect();

    progress.finish();
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::Termination;

    fn sample() -> ChannelSpec {
        ChannelSpec::new(20.0, 0.015, 0.0005, 10.0, 1.5).unwrap()
    }

    #[test]
    fn subcritical_start_goes_upstream() {
        let b = Boundary {
            x0: 0.0,
            y0: 2.5,
            length: 2000.0,
        };
        let out = run_scenario(&sample(), &b, &Tunables::default()).unwrap();
        assert_eq!(out.flow, FlowState::Subcritical);
        assert_eq!(out.direction, Direction::Upstream);
        assert_eq!(out.profile.step, -5.0);
        assert_eq!(out.profile_type.to_string(), "M1");
        assert_eq!(out.profile.termination, Termination::Completed);
    }

    #[test]
    fn supercritical_start_goes_downstream() {
        let b = Boundary {
            x0: 0.0,
            y0: 0.5,
            length: 2000.0,
        };
        let out = run_scenario(&sample(), &b, &Tunables::default()).unwrap();
        assert_eq!(out.direction, Direction::Downstream);
        assert_eq!(out.profile.step, 5.0);
        assert!(out.profile.stopped_early());
    }

    #[test]
    fn rejects_bad_boundary() {
        let tun = Tunables::default();
        for (y0, length) in [(0.0, 100.0), (-1.0, 100.0), (1.0, 0.0), (f64::NAN, 10.0)] {
            let b = Boundary { x0: 0.0, y0, length };
            assert!(run_scenario(&sample(), &b, &tun).is_err());
        }
        let zero_step = Tunables {
            step: 0.0,
            ..Tunables::default()
        };
        let b = Boundary {
            x0: 0.0,
            y0: 1.0,
            length: 10.0,
        };
        assert!(run_scenario(&sample(), &b, &zero_step).is_err());
    }

    #[test]
    fn sweep_matches_serial_runs_in_order() {
        let tun = Tunables::default();
        let scenarios: Vec<Scenario> = [2.5, 0.5, 1.5, 0.9]
            .iter()
            .enumerate()
            .map(|(id, &y0)| Scenario {
                id,
                channel: sample(),
                boundary: Boundary {
                    x0: 0.0,
                    y0,
                    length: 500.0,
                },
            })
            .collect();

        let pb = Arc::new(ProgressBar::hidden());
        let results = run_sweep(&scenarios, &tun, pb.clone());
        assert_eq!(pb.position(), 4);

        for (s, r) in scenarios.iter().zip(results) {
            let serial = run_scenario(&s.channel, &s.boundary, &tun).unwrap();
            assert_eq!(r.unwrap(), serial);
        }
    }
}
