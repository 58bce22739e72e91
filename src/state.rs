use crate::integrator::Termination;

// Depth at one station along the channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    pub x: f64,
    pub y: f64,
}

// Water-surface profile produced by one integration run
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub points: Vec<ProfilePoint>,
    pub step: f64,
    pub termination: Termination,
}

impl Profile {
    pub fn new(x0: f64, y0: f64, step: f64) -> Self {
        Profile {
            points: vec![ProfilePoint { x: x0, y: y0 }],
            step,
            termination: Termination::Completed,
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push(ProfilePoint { x, y });
    }

    pub fn last(&self) -> ProfilePoint {
        // Never empty: the starting point is always present
        self.points[self.points.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn stopped_early(&self) -> bool {
        self.termination != Termination::Completed
    }

    /// Minimum and maximum depth over the profile.
    pub fn depth_range(&self) -> (f64, f64) {
        self.points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profile_holds_start_point() {
        let p = Profile::new(10.0, 2.5, -5.0);
        assert_eq!(p.len(), 1);
        assert_eq!(p.last(), ProfilePoint { x: 10.0, y: 2.5 });
        assert!(!p.stopped_early());
    }

    #[test]
    fn depth_range_spans_points() {
        let mut p = Profile::new(0.0, 2.0, 5.0);
        p.push(5.0, 1.5);
        p.push(10.0, 1.8);
        assert_eq!(p.depth_range(), (1.5, 2.0));
        assert_eq!(p.last(), ProfilePoint { x: 10.0, y: 1.8 });
    }
}
