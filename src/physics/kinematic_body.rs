//! Holonomic body integrating commands on SE(2).

use libm::atan2;
use nalgebra::SMatrix;
use serde_derive::{Deserialize, Serialize};

use crate::{
    constants::{ANGULAR_SPEED_RATIO, LINEAR_SPEED_RATIO},
    errors::{SimError, SimErrorTypes, SimResult},
    pose::Pose,
};

use super::{Command, PoseProvider};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct KinematicBodyConfig {
    /// Distance travelled in one step at full command.
    pub linear_speed_ratio: f64,
    /// Angle (radians) turned in one step at full command.
    pub angular_speed_ratio: f64,
    pub initial_pose: Pose,
}

impl Default for KinematicBodyConfig {
    fn default() -> Self {
        Self {
            linear_speed_ratio: LINEAR_SPEED_RATIO,
            angular_speed_ratio: ANGULAR_SPEED_RATIO,
            initial_pose: Pose::origin(),
        }
    }
}

/// True motion of the body during the last step.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyVelocity {
    /// Distance per step.
    pub linear: f64,
    /// Radians per step.
    pub angular: f64,
}

#[derive(Debug, Clone)]
pub struct KinematicBody {
    linear_speed_ratio: f64,
    angular_speed_ratio: f64,
    initial_pose: Pose,
    pose: Pose,
    velocity: BodyVelocity,
}

impl KinematicBody {
    pub fn from_config(config: &KinematicBodyConfig) -> SimResult<Self> {
        if !config.linear_speed_ratio.is_finite() || !config.angular_speed_ratio.is_finite() {
            return Err(SimError::new(
                SimErrorTypes::ConfigError,
                "Speed ratios of the body should be finite".to_string(),
            ));
        }
        if !config.initial_pose.is_finite() {
            return Err(SimError::new(
                SimErrorTypes::ConfigError,
                format!("Initial pose should be finite, got {}", config.initial_pose),
            ));
        }
        let initial_pose = config.initial_pose.normalized();
        Ok(Self {
            linear_speed_ratio: config.linear_speed_ratio,
            angular_speed_ratio: config.angular_speed_ratio,
            initial_pose,
            pose: initial_pose,
            velocity: BodyVelocity::default(),
        })
    }

    /// Moves the body for one step.
    pub fn apply_command(&mut self, command: &Command) {
        let command = command.clipped();
        let displacement_longitudinal = command.forward * self.linear_speed_ratio;
        let displacement_lateral = command.lateral * self.linear_speed_ratio;
        let rotation = command.rotation * self.angular_speed_ratio;

        // Constant twist during the step: pose * exp(twist^)
        let lie_action = SMatrix::<f64, 3, 3>::new(
            0.,
            -rotation,
            displacement_longitudinal,
            rotation,
            0.,
            displacement_lateral,
            0.,
            0.,
            0.,
        );

        let rot_mat = *nalgebra::Rotation2::new(self.pose.orientation).matrix();
        let mut se2_mat = SMatrix::<f64, 3, 3>::new(
            rot_mat[(0, 0)],
            rot_mat[(0, 1)],
            self.pose.x,
            rot_mat[(1, 0)],
            rot_mat[(1, 1)],
            self.pose.y,
            0.,
            0.,
            1.,
        );
        se2_mat *= lie_action.exp();

        self.pose = Pose {
            x: se2_mat[(0, 2)],
            y: se2_mat[(1, 2)],
            orientation: atan2(se2_mat[(1, 0)], se2_mat[(0, 0)]),
        };
        self.velocity = BodyVelocity {
            linear: (displacement_longitudinal.powi(2) + displacement_lateral.powi(2)).sqrt(),
            angular: rotation,
        };
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn initial_pose(&self) -> Pose {
        self.initial_pose
    }

    pub fn velocity(&self) -> BodyVelocity {
        self.velocity
    }

    /// Teleports the body, used to simulate external disturbances.
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    pub fn reset(&mut self) {
        self.pose = self.initial_pose;
        self.velocity = BodyVelocity::default();
    }
}

impl PoseProvider for KinematicBody {
    fn true_pose(&self) -> Pose {
        self.pose
    }
}
