//! Trapezoidal cross-section properties as functions of depth.

use crate::config::ChannelSpec;

impl ChannelSpec {
    /// Flow area (m^2)
    pub fn area(&self, y: f64) -> f64 {
        (self.b + self.m * y) * y
    }

    /// Wetted perimeter (m)
    pub fn perimeter(&self, y: f64) -> f64 {
        self.b + 2.0 * y * (1.0 + self.m * self.m).sqrt()
    }

    /// Free-surface width (m)
    pub fn top_width(&self, y: f64) -> f64 {
        self.b + 2.0 * self.m * y
    }

    /// Hydraulic radius A/P, zero for a dry triangular section.
    pub fn hydraulic_radius(&self, y: f64) -> f64 {
        let wp = self.perimeter(y);
        if wp > 0.0 { self.area(y) / wp } else { 0.0 }
    }
}
