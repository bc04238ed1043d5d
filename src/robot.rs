/*!
Provides the [`Robot`]: a [`KinematicBody`] carrying an [`OdometrySensor`].

The body holds the ground truth, the odometer only reads it to compute its
displacements. Everything a controller is allowed to use goes through the odometer
accessors (or [`Robot::view`]); [`Robot::true_pose`] is for debugging and evaluation.
*/

use log::info;
use serde_derive::{Deserialize, Serialize};

use crate::{
    constants::TIME_STEP,
    controllers::RobotView,
    errors::SimResult,
    logger::{InternalLog, is_enabled},
    physics::{
        Command,
        kinematic_body::{BodyVelocity, KinematicBody, KinematicBodyConfig},
    },
    pose::{Pose, PoseRecord},
    recordable::Recordable,
    sensors::odometry_sensor::{
        OdometrySensor, OdometrySensorConfig, OdometrySensorRecord, RawDisplacement,
    },
    utils::determinist_random_variable::DeterministRandomVariableFactory,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct RobotConfig {
    pub name: String,
    pub body: KinematicBodyConfig,
    pub odometer: OdometrySensorConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            name: String::from("robot"),
            body: KinematicBodyConfig::default(),
            odometer: OdometrySensorConfig::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RobotRecord {
    pub name: String,
    pub command: Command,
    pub true_pose: PoseRecord,
    pub true_velocity: BodyVelocity,
    pub odometer: OdometrySensorRecord,
}

#[derive(Debug)]
pub struct Robot {
    name: String,
    body: KinematicBody,
    odometer: OdometrySensor,
    last_command: Command,
}

impl Robot {
    /// Builds the robot, the odometer takes the initial pose of the body as reference.
    pub fn from_config(
        config: &RobotConfig,
        va_factory: &DeterministRandomVariableFactory,
    ) -> SimResult<Self> {
        if is_enabled(InternalLog::SetupSteps) {
            info!("Building robot `{}`", config.name);
        }
        let body = KinematicBody::from_config(&config.body)
            .map_err(|e| e.chain(format!("While building the body of `{}`", config.name)))?;
        let odometer = OdometrySensor::from_config(&config.odometer, va_factory)
            .map_err(|e| e.chain(format!("While building the odometer of `{}`", config.name)))?;
        let mut robot = Self {
            name: config.name.clone(),
            body,
            odometer,
            last_command: Command::stop(),
        };
        robot.odometer.update(&robot.body);
        Ok(robot)
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    /// Applies `command` to the body for one step, then updates the odometer.
    pub fn step(&mut self, command: &Command) {
        self.last_command = command.clipped();
        self.body.apply_command(&self.last_command);
        self.odometer.update(&self.body);
    }

    /// Odometer estimate, `None` when disabled.
    pub fn odometer_values(&self) -> Option<Pose> {
        self.odometer.estimate()
    }

    pub fn odometer_is_disabled(&self) -> bool {
        self.odometer.is_disabled()
    }

    pub fn set_odometer_disabled(&mut self, disabled: bool) {
        self.odometer.set_disabled(disabled);
    }

    pub fn odometer_noise_enabled(&self) -> bool {
        self.odometer.is_noise_enabled()
    }

    pub fn set_odometer_noise_enabled(&mut self, enabled: bool) {
        self.odometer.set_noise_enabled(enabled);
    }

    /// Noisy displacement of the last step, `None` when disabled.
    pub fn odometer_last_displacement(&self) -> Option<RawDisplacement> {
        if self.odometer.is_disabled() {
            None
        } else {
            Some(self.odometer.last_raw_displacement())
        }
    }

    /// Distance per step measured by the odometer, 0 when disabled.
    pub fn estimated_linear_speed(&self) -> f64 {
        self.odometer_last_displacement()
            .map(|d| d.dist)
            .unwrap_or(0.)
    }

    /// Radians per step measured by the odometer, 0 when disabled.
    pub fn estimated_angular_speed(&self) -> f64 {
        self.odometer_last_displacement()
            .map(|d| d.theta)
            .unwrap_or(0.)
    }

    /// `(linear, angular)` speeds per step.
    pub fn estimated_velocity(&self) -> (f64, f64) {
        (self.estimated_linear_speed(), self.estimated_angular_speed())
    }

    pub fn estimated_linear_speed_per_second(&self) -> f64 {
        self.estimated_linear_speed() / TIME_STEP
    }

    pub fn estimated_angular_speed_per_second(&self) -> f64 {
        self.estimated_angular_speed() / TIME_STEP
    }

    /// Ground truth pose. Debugging and evaluation only.
    pub fn true_pose(&self) -> Pose {
        self.body.pose()
    }

    pub fn initial_pose(&self) -> Pose {
        self.body.initial_pose()
    }

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    /// Moves the body without any command. The odometer sees the jump at the next step.
    pub fn teleport(&mut self, pose: Pose) {
        self.body.set_pose(pose);
    }

    pub fn view(&self) -> RobotView {
        RobotView {
            odometer: self.odometer_values(),
            last_displacement: self.odometer_last_displacement(),
        }
    }

    pub fn reset(&mut self) {
        self.body.reset();
        self.odometer.reset();
        self.last_command = Command::stop();
        self.odometer.update(&self.body);
    }
}

impl Recordable<RobotRecord> for Robot {
    fn record(&self) -> RobotRecord {
        RobotRecord {
            name: self.name.clone(),
            command: self.last_command,
            true_pose: self.body.pose().record(),
            true_velocity: self.body.velocity(),
            odometer: self.odometer.record(),
        }
    }
}
