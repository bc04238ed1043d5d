/*!
Minimal physics of the simulated body.

The odometer only needs to read the true pose of the body, through the
[`PoseProvider`] trait. The [`KinematicBody`](kinematic_body::KinematicBody) is a
holonomic body moved by normalized [`Command`]s.
*/

pub mod kinematic_body;

use serde_derive::{Deserialize, Serialize};

use crate::pose::Pose;

/// Source of the ground truth pose of a body.
pub trait PoseProvider {
    fn true_pose(&self) -> Pose;
}

/// Normalized motion command, each component is clipped to `[-1, 1]`.
///
/// `forward` and `lateral` are expressed in the body frame (x forward, y to the left),
/// `rotation` is counter-clockwise.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct Command {
    pub forward: f64,
    pub lateral: f64,
    pub rotation: f64,
}

impl Command {
    pub fn new(forward: f64, lateral: f64, rotation: f64) -> Self {
        Self {
            forward,
            lateral,
            rotation,
        }
        .clipped()
    }

    pub fn stop() -> Self {
        Self::default()
    }

    pub fn clipped(&self) -> Self {
        Self {
            forward: self.forward.clamp(-1., 1.),
            lateral: self.lateral.clamp(-1., 1.),
            rotation: self.rotation.clamp(-1., 1.),
        }
    }
}
