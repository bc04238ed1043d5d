/*!
Planar pose of a rigid body, used both for the true pose of the tracked body
and for the dead-reckoning estimate.
*/

use std::fmt::Display;

use nalgebra::Vector2;
use serde_derive::{Deserialize, Serialize};

use crate::recordable::Recordable;
use crate::utils::geometry::normalize_angle;

/// Position and orientation (radians) in the plane.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub orientation: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, orientation: f64) -> Self {
        Self { x, y, orientation }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.orientation.is_finite()
    }

    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.orientation.is_nan()
    }

    /// Same pose with its orientation mapped into `(-PI, PI]`.
    pub fn normalized(&self) -> Self {
        Self {
            orientation: normalize_angle(self.orientation),
            ..*self
        }
    }
}

impl Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x: {:.3}, y: {:.3}, orientation: {:.4}",
            self.x, self.y, self.orientation
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PoseRecord {
    pub pose: [f64; 3],
}

impl Recordable<PoseRecord> for Pose {
    fn record(&self) -> PoseRecord {
        PoseRecord {
            pose: [self.x, self.y, self.orientation],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::Pose;

    #[test]
    fn normalized_only_touches_orientation() {
        let p = Pose::new(1., -2., 3. * PI).normalized();
        assert_eq!(p.x, 1.);
        assert_eq!(p.y, -2.);
        assert!((p.orientation.abs() - PI).abs() < 1e-12);
    }

    #[test]
    fn finiteness() {
        assert!(Pose::origin().is_finite());
        assert!(!Pose::new(f64::NAN, 0., 0.).is_finite());
        assert!(Pose::new(f64::NAN, 0., 0.).is_nan());
        assert!(!Pose::new(0., 0., f64::INFINITY).is_finite());
        assert!(!Pose::new(0., 0., f64::INFINITY).is_nan());
    }
}
