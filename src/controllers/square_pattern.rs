//! Drives a square using only the odometer.
//!
//! The body goes forward for a fixed number of steps, then turns in place until the
//! odometer reports a quarter turn (or the configured angle), and starts again.

use std::f64::consts::FRAC_PI_2;

use log::debug;
use serde_derive::{Deserialize, Serialize};

use crate::{
    errors::{SimError, SimErrorTypes, SimResult},
    logger::{InternalLog, is_enabled},
    physics::Command,
    utils::geometry::{normalize_angle, smallest_theta_diff},
};

use super::{Controller, RobotView};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct SquarePatternControllerConfig {
    /// Steps of each side.
    pub forward_steps: usize,
    /// Angle (radians) of each corner, positive is counter-clockwise.
    pub turn_angle: f64,
    /// The turn stops when the estimated heading is this close to the target (radians).
    ///
    /// Should be larger than half the rotation of one step, or the turn oscillates.
    pub angle_tolerance: f64,
}

impl Default for SquarePatternControllerConfig {
    fn default() -> Self {
        Self {
            forward_steps: 100,
            turn_angle: FRAC_PI_2,
            angle_tolerance: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Forward { remaining: usize },
    Turning { target: f64 },
}

#[derive(Debug, Clone)]
pub struct SquarePatternController {
    forward_steps: usize,
    turn_angle: f64,
    angle_tolerance: f64,
    phase: Phase,
}

impl SquarePatternController {
    pub fn from_config(config: &SquarePatternControllerConfig) -> SimResult<Self> {
        if !config.turn_angle.is_finite()
            || !config.angle_tolerance.is_finite()
            || config.angle_tolerance <= 0.
        {
            return Err(SimError::new(
                SimErrorTypes::ConfigError,
                "Square pattern angles should be finite, with a positive tolerance".to_string(),
            ));
        }
        Ok(Self {
            forward_steps: config.forward_steps,
            turn_angle: config.turn_angle,
            angle_tolerance: config.angle_tolerance,
            phase: Phase::Forward {
                remaining: config.forward_steps,
            },
        })
    }
}

impl Controller for SquarePatternController {
    /// Stops while the odometer gives no estimate.
    fn control(&mut self, robot: &RobotView) -> Command {
        let estimate = match robot.odometer {
            Some(p) => p,
            None => return Command::stop(),
        };

        if let Phase::Forward { remaining: 0 } = self.phase {
            let target = normalize_angle(estimate.orientation + self.turn_angle);
            if is_enabled(InternalLog::Simulator) {
                debug!("Corner reached at {estimate}, turning to {target:.4}");
            }
            self.phase = Phase::Turning { target };
        }

        match self.phase {
            Phase::Forward { remaining } => {
                self.phase = Phase::Forward {
                    remaining: remaining - 1,
                };
                Command::new(1., 0., 0.)
            }
            Phase::Turning { target } => {
                let diff = smallest_theta_diff(target, estimate.orientation);
                if diff.abs() < self.angle_tolerance || diff.is_nan() {
                    self.phase = Phase::Forward {
                        remaining: self.forward_steps.saturating_sub(1),
                    };
                    if self.forward_steps == 0 {
                        Command::stop()
                    } else {
                        Command::new(1., 0., 0.)
                    }
                } else {
                    Command::new(0., 0., diff.signum())
                }
            }
        }
    }

    fn reset(&mut self) {
        self.phase = Phase::Forward {
            remaining: self.forward_steps,
        };
    }
}
