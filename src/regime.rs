//! Channel-slope and flow-regime classification, and the integration
//! direction that follows from them.

use crate::config::{ChannelSpec, Tunables};
use crate::solver::ReferenceDepths;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlopeClass {
    Mild,
    Steep,
    Critical,
    Horizontal,
    Adverse,
}

impl SlopeClass {
    pub fn classify(ch: &ChannelSpec, refs: &ReferenceDepths, tun: &Tunables) -> Self {
        if ch.s0 == 0.0 {
            return SlopeClass::Horizontal;
        }
        if ch.s0 < 0.0 {
            return SlopeClass::Adverse;
        }
        match refs.yn() {
            Some(yn) if (yn - refs.yc()).abs() <= tun.critical_slope_band => SlopeClass::Critical,
            Some(yn) if yn > refs.yc() => SlopeClass::Mild,
            Some(_) => SlopeClass::Steep,
            None => SlopeClass::Horizontal,
        }
    }

    fn prefix(self) -> char {
        match self {
            SlopeClass::Mild => 'M',
            SlopeClass::Steep => 'S',
            SlopeClass::Critical => 'C',
            SlopeClass::Horizontal => 'H',
            SlopeClass::Adverse => 'A',
        }
    }
}

impl fmt::Display for SlopeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlopeClass::Mild => "MILD (M-profile)",
            SlopeClass::Steep => "STEEP (S-profile)",
            SlopeClass::Critical => "CRITICAL (C-profile)",
            SlopeClass::Horizontal => "HORIZONTAL (H-profile)",
            SlopeClass::Adverse => "ADVERSE (A-profile)",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Subcritical,
    Supercritical,
}

impl FlowState {
    /// Subcritical strictly above critical depth; y == yc counts as supercritical.
    pub fn at_depth(y: f64, yc: f64) -> Self {
        if y > yc {
            FlowState::Subcritical
        } else {
            FlowState::Supercritical
        }
    }

    /// Subcritical flow is controlled downstream, so it is computed upstream.
    pub fn direction(self) -> Direction {
        match self {
            FlowState::Subcritical => Direction::Upstream,
            FlowState::Supercritical => Direction::Downstream,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Upstream,
    Downstream,
}

impl Direction {
    pub fn signed_step(self, magnitude: f64) -> f64 {
        match self {
            Direction::Upstream => -magnitude.abs(),
            Direction::Downstream => magnitude.abs(),
        }
    }
}

/// Standard GVF zone label such as M1 or S2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileType {
    pub slope: SlopeClass,
    pub zone: u8,
}

impl ProfileType {
    /// Zone 1 lies above both reference depths, zone 3 below both and
    /// zone 2 between them. Horizontal and adverse beds have no zone 1;
    /// critical beds have no zone 2.
    pub fn classify(slope: SlopeClass, y: f64, refs: &ReferenceDepths) -> Self {
        let yc = refs.yc();
        let zone = match (slope, refs.yn()) {
            (SlopeClass::Horizontal | SlopeClass::Adverse, _) | (_, None) => {
                if y > yc { 2 } else { 3 }
            }
            (SlopeClass::Critical, Some(_)) => {
                if y > yc { 1 } else { 3 }
            }
            (_, Some(yn)) => {
                if y > yn.max(yc) {
                    1
                } else if y > yn.min(yc) {
                    2
                } else {
                    3
                }
            }
        };
        ProfileType { slope, zone }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.slope.prefix(), self.zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivative::friction_slope;

    fn refs_for(ch: &ChannelSpec) -> ReferenceDepths {
        ReferenceDepths::compute(ch, &Tunables::default())
    }

    #[test]
    fn sample_channel_is_mild() {
        let ch = ChannelSpec::new(20.0, 0.015, 0.0005, 10.0, 1.5).unwrap();
        let refs = refs_for(&ch);
        assert_eq!(SlopeClass::classify(&ch, &refs, &Tunables::default()), SlopeClass::Mild);
    }

    #[test]
    fn steep_channel_is_steep() {
        let ch = ChannelSpec::new(20.0, 0.015, 0.01, 10.0, 1.5).unwrap();
        let refs = refs_for(&ch);
        assert_eq!(SlopeClass::classify(&ch, &refs, &Tunables::default()), SlopeClass::Steep);
    }

    #[test]
    fn non_positive_beds() {
        let tun = Tunables::default();
        let flat = ChannelSpec::new(20.0, 0.015, 0.0, 10.0, 1.5).unwrap();
        let adverse = ChannelSpec::new(20.0, 0.015, -0.002, 10.0, 1.5).unwrap();
        assert_eq!(
            SlopeClass::classify(&flat, &refs_for(&flat), &tun),
            SlopeClass::Horizontal
        );
        assert_eq!(
            SlopeClass::classify(&adverse, &refs_for(&adverse), &tun),
            SlopeClass::Adverse
        );
    }

    #[test]
    fn direction_follows_flow_state() {
        assert_eq!(FlowState::at_depth(2.5, 0.71).direction().signed_step(5.0), -5.0);
        assert_eq!(FlowState::at_depth(0.5, 0.71).direction().signed_step(-5.0), 5.0);
        assert_eq!(FlowState::at_depth(0.71, 0.71), FlowState::Supercritical);
    }

    #[test]
    fn critical_and_horizontal_zones() {
        let tun = Tunables::default();
        let sample = ChannelSpec::new(20.0, 0.015, 0.0005, 10.0, 1.5).unwrap();
        let yc = refs_for(&sample).yc();
        let sc = friction_slope(&sample, yc);

        // Bed slope at which uniform flow is exactly critical
        let critical = ChannelSpec::new(20.0, 0.015, sc, 10.0, 1.5).unwrap();
        let refs = refs_for(&critical);
        assert!((refs.yn().unwrap() - refs.yc()).abs() <= tun.critical_slope_band);
        let slope = SlopeClass::classify(&critical, &refs, &tun);
        assert_eq!(slope, SlopeClass::Critical);
        assert_eq!(ProfileType::classify(slope, 2.0, &refs).to_string(), "C1");
        assert_eq!(ProfileType::classify(slope, 0.3, &refs).to_string(), "C3");

        let flat = ChannelSpec::new(20.0, 0.015, 0.0, 10.0, 1.5).unwrap();
        let refs = refs_for(&flat);
        let slope = SlopeClass::classify(&flat, &refs, &tun);
        assert_eq!(ProfileType::classify(slope, 2.0, &refs).to_string(), "H2");
        assert_eq!(ProfileType::classify(slope, 0.3, &refs).to_string(), "H3");
    }

    #[test]
    fn zone_labels() {
        let ch = ChannelSpec::new(20.0, 0.015, 0.0005, 10.0, 1.5).unwrap();
        let refs = refs_for(&ch);
        let label = |y| ProfileType::classify(SlopeClass::Mild, y, &refs).to_string();
        assert_eq!(label(2.5), "M1");
        assert_eq!(label(0.9), "M2");
        assert_eq!(label(0.5), "M3");

        let steep = ChannelSpec::new(20.0, 0.015, 0.01, 10.0, 1.5).unwrap();
        let refs = refs_for(&steep);
        let label = |y| ProfileType::classify(SlopeClass::Steep, y, &refs).to_string();
        assert_eq!(label(2.0), "S1");
        assert_eq!(label(0.6), "S2");
        assert_eq!(label(0.3), "S3");

        let adverse = ChannelSpec::new(20.0, 0.015, -0.002, 10.0, 1.5).unwrap();
        let refs = refs_for(&adverse);
        assert_eq!(ProfileType::classify(SlopeClass::Adverse, 2.0, &refs).to_string(), "A2");
    }
}
