/*!
Controllers compute the [`Command`] sent to the body at each step.

A controller never sees the ground truth: it only gets a [`RobotView`], built from the
odometer.
*/

pub mod square_pattern;

use std::fmt::Debug;

use serde_derive::{Deserialize, Serialize};

use crate::{
    errors::SimResult, physics::Command, pose::Pose,
    sensors::odometry_sensor::RawDisplacement,
};

use square_pattern::{SquarePatternController, SquarePatternControllerConfig};

/// What a controller knows about the robot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RobotView {
    /// Odometer estimate, `None` when the odometer is disabled.
    pub odometer: Option<Pose>,
    /// Last noisy displacement, `None` when the odometer is disabled.
    pub last_displacement: Option<RawDisplacement>,
}

pub trait Controller: Debug + Send {
    fn control(&mut self, robot: &RobotView) -> Command;
    fn reset(&mut self);
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
#[serde(deny_unknown_fields)]
pub enum ControllerConfig {
    SquarePattern(SquarePatternControllerConfig),
    Idle,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::SquarePattern(SquarePatternControllerConfig::default())
    }
}

/// Always sends the stop command.
#[derive(Debug, Clone, Default)]
pub struct IdleController {}

impl Controller for IdleController {
    fn control(&mut self, _robot: &RobotView) -> Command {
        Command::stop()
    }

    fn reset(&mut self) {}
}

pub fn make_controller_from_config(config: &ControllerConfig) -> SimResult<Box<dyn Controller>> {
    Ok(match config {
        ControllerConfig::SquarePattern(c) => {
            Box::new(SquarePatternController::from_config(c)?) as Box<dyn Controller>
        }
        ControllerConfig::Idle => Box::new(IdleController::default()) as Box<dyn Controller>,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_controller_config() {
        let config: ControllerConfig = serde_yaml::from_str("type: Idle\n").unwrap();
        assert_eq!(config, ControllerConfig::Idle);
        let mut controller = make_controller_from_config(&config).unwrap();
        assert_eq!(controller.control(&RobotView::default()), Command::stop());

        let config: ControllerConfig =
            serde_yaml::from_str("type: SquarePattern\nforward_steps: 30\n").unwrap();
        match config {
            ControllerConfig::SquarePattern(c) => assert_eq!(c.forward_steps, 30),
            _ => panic!("Expected a SquarePattern controller"),
        }
    }
}
