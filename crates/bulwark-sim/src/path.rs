//! The fixed enemy route — a cubic Bézier across the play field.
//!
//! Movement, placement validation, and snapshots all evaluate the same
//! curve through `Path`; there is exactly one implementation of the math.

use glam::DVec2;

use bulwark_core::constants::{PATH_CONTROL_POINTS, PATH_PROXIMITY, PATH_SAMPLE_STEP};
use bulwark_core::types::Position;

/// The fixed enemy route. `t = 0` is the spawn point, `t = 1` the escape
/// point.
#[derive(Debug, Clone)]
pub struct Path {
    control: [DVec2; 4],
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl Path {
    pub fn new() -> Self {
        Self {
            control: PATH_CONTROL_POINTS.map(|(x, y)| DVec2::new(x, y)),
        }
    }

    /// Evaluate the curve at parameter `t` (Bernstein basis). Defined for
    /// all real `t`; values outside `[0, 1]` extrapolate the curve.
    pub fn position_at(&self, t: f64) -> Position {
        let [p0, p1, p2, p3] = self.control;
        let u = 1.0 - t;
        let point =
            u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3;
        point.into()
    }

    /// True when `(x, y)` lies within the proximity threshold of any
    /// sampled point of the curve. Blocks tower placement on the route.
    pub fn is_near(&self, x: f64, y: f64) -> bool {
        let point = DVec2::new(x, y);
        let mut t = 0.0;
        while t <= 1.0 {
            if self.position_at(t).as_dvec2().distance(point) < PATH_PROXIMITY {
                return true;
            }
            t += PATH_SAMPLE_STEP;
        }
        false
    }
}
