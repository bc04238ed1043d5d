/*!
Provides the [`OdometrySensor`], a dead-reckoning odometer.

At each step the sensor:
1. computes the raw displacement `(dist, alpha, theta)` between the previous and the
   current true pose of the body:
   - `dist`: distance travelled during the step,
   - `alpha`: heading of the travel vector, relative to the previous orientation,
   - `theta`: orientation change during the step;
2. passes it through a [`NoiseModel`];
3. integrates the noisy displacement into its own pose estimate.

The estimate starts at the origin `(0, 0, 0)`: it is expressed in the frame of the first
observed pose, and never reads the true pose directly. It drifts as the noise accumulates.
*/

use log::{debug, info, warn};
use serde_derive::{Deserialize, Serialize};

use super::noise_models::{
    NoiseModel, NoiseModelConfig, make_noise_model_from_config, motion::MotionNoiseModel,
};

use crate::constants::{ROTATION_EPSILON, TRANSLATION_EPSILON};
use crate::errors::{SimError, SimErrorTypes, SimResult};
use crate::logger::{InternalLog, is_enabled};
use crate::physics::PoseProvider;
use crate::pose::{Pose, PoseRecord};
use crate::recordable::Recordable;
use crate::utils::determinist_random_variable::DeterministRandomVariableFactory;
use crate::utils::geometry::{normalize_angle, smallest_theta_diff};

/// Configuration of the [`OdometrySensor`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct OdometrySensorConfig {
    /// Without noise, the estimate follows the true motion exactly.
    pub noise_enabled: bool,
    pub noise: NoiseModelConfig,
    /// Below this distance, the step has no translation (and no `alpha`).
    pub translation_epsilon: f64,
    /// Below this angle, the step has no rotation.
    pub rotation_epsilon: f64,
}

impl Default for OdometrySensorConfig {
    fn default() -> Self {
        Self {
            noise_enabled: true,
            noise: NoiseModelConfig::default(),
            translation_epsilon: TRANSLATION_EPSILON,
            rotation_epsilon: ROTATION_EPSILON,
        }
    }
}

/// Motion during one step, before integration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct RawDisplacement {
    /// Distance travelled.
    pub dist: f64,
    /// Direction of the travel, relative to the previous orientation.
    pub alpha: f64,
    /// Orientation change.
    pub theta: f64,
}

impl RawDisplacement {
    pub fn is_zero(&self) -> bool {
        self.dist == 0. && self.alpha == 0. && self.theta == 0.
    }
}

/// Computes the raw displacement from `previous` to `current`.
///
/// Negligible translations give `dist = alpha = 0` (the direction of a null vector is
/// undefined), negligible rotations give `theta = 0`. Non finite inputs (NaN or
/// infinite) are never considered negligible, and give NaN components.
pub fn compute_raw_displacement(
    previous: &Pose,
    current: &Pose,
    translation_epsilon: f64,
    rotation_epsilon: f64,
) -> RawDisplacement {
    let travel = current.position() - previous.position();
    let dist = travel.norm();
    let has_translated = !(dist <= translation_epsilon);

    let rotation = smallest_theta_diff(current.orientation, previous.orientation);
    let has_turned = !(rotation.abs() <= rotation_epsilon);

    let (dist, alpha) = if !(travel.x.is_finite() && travel.y.is_finite()) {
        // `atan2` of an infinite travel is finite and would hide the corruption.
        (f64::NAN, f64::NAN)
    } else if has_translated {
        (
            dist,
            normalize_angle(travel.y.atan2(travel.x) - previous.orientation),
        )
    } else {
        (0., 0.)
    };
    let theta = if has_turned { rotation } else { 0. };

    RawDisplacement { dist, alpha, theta }
}

/// Adds the displacement `raw` to the pose `estimate`.
pub fn integrate(estimate: &Pose, raw: &RawDisplacement) -> Pose {
    let heading = raw.alpha + estimate.orientation;
    Pose {
        x: estimate.x + raw.dist * heading.cos(),
        y: estimate.y + raw.dist * heading.sin(),
        orientation: normalize_angle(estimate.orientation + raw.theta),
    }
}

/// Record of the [`OdometrySensor`].
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct OdometrySensorRecord {
    pub initialized: bool,
    pub disabled: bool,
    pub noise_enabled: bool,
    pub estimate: PoseRecord,
    pub last_displacement: RawDisplacement,
}

/// Dead-reckoning odometer.
///
/// The sensor is `Uninitialized` until the first call to [`compute_step`](Self::compute_step),
/// which only stores the pose. It then keeps `Tracking` until [`reset`](Self::reset).
#[derive(Debug)]
pub struct OdometrySensor {
    /// Previous true pose, `None` before the first step.
    prev_pose: Option<Pose>,
    estimate: Pose,
    last_displacement: RawDisplacement,
    noise_model: Box<dyn NoiseModel>,
    noise_enabled: bool,
    disabled: bool,
    translation_epsilon: f64,
    rotation_epsilon: f64,
    warned_non_finite: bool,
}

impl OdometrySensor {
    /// Makes a new [`OdometrySensor`] with the default noise and a random seed.
    pub fn new() -> Self {
        Self::with_noise_model(
            &OdometrySensorConfig::default(),
            Box::new(MotionNoiseModel::new(
                &DeterministRandomVariableFactory::default(),
            )),
        )
    }

    /// Makes a new [`OdometrySensor`] from the given config.
    pub fn from_config(
        config: &OdometrySensorConfig,
        va_factory: &DeterministRandomVariableFactory,
    ) -> SimResult<Self> {
        for (name, value) in [
            ("translation_epsilon", config.translation_epsilon),
            ("rotation_epsilon", config.rotation_epsilon),
        ] {
            if !value.is_finite() || value < 0. {
                return Err(SimError::new(
                    SimErrorTypes::ConfigError,
                    format!("`{name}` of the odometer should be finite and non-negative, got {value}"),
                ));
            }
        }
        let noise_model = make_noise_model_from_config(&config.noise, va_factory)
            .map_err(|e| e.chain("While building the odometer noise model".to_string()))?;
        if is_enabled(InternalLog::SetupSteps) {
            info!(
                "Odometer built with noise {} ({:?})",
                if config.noise_enabled {
                    "enabled"
                } else {
                    "disabled"
                },
                config.noise
            );
        }
        Ok(Self::with_noise_model(config, noise_model))
    }

    /// Makes a new [`OdometrySensor`] using the given noise model instead of `config.noise`.
    pub fn with_noise_model(config: &OdometrySensorConfig, noise_model: Box<dyn NoiseModel>) -> Self {
        Self {
            prev_pose: None,
            estimate: Pose::origin(),
            last_displacement: RawDisplacement::default(),
            noise_model,
            noise_enabled: config.noise_enabled,
            disabled: false,
            translation_epsilon: config.translation_epsilon,
            rotation_epsilon: config.rotation_epsilon,
            warned_non_finite: false,
        }
    }

    /// Reads the true pose once from `provider` and runs one step.
    pub fn update(&mut self, provider: &dyn PoseProvider) {
        let true_pose = provider.true_pose();
        self.compute_step(&true_pose);
    }

    /// Runs one step of the odometer with the current true pose of the body.
    ///
    /// The first call only sets the reference pose. Steps are still computed while the
    /// sensor is disabled, so it resumes consistently when enabled again.
    pub fn compute_step(&mut self, true_pose: &Pose) {
        if !true_pose.is_finite() && !self.warned_non_finite {
            warn!("Odometer received a non finite pose ({true_pose}), the estimate is lost");
            self.warned_non_finite = true;
        }

        let previous = match self.prev_pose {
            Some(p) => p,
            None => {
                self.prev_pose = Some(*true_pose);
                self.last_displacement = RawDisplacement::default();
                return;
            }
        };

        let raw = compute_raw_displacement(
            &previous,
            true_pose,
            self.translation_epsilon,
            self.rotation_epsilon,
        );
        let noisy = if self.noise_enabled {
            self.noise_model.sample(&raw)
        } else {
            raw
        };
        if is_enabled(InternalLog::Odometry) {
            debug!("Odometer raw displacement: {raw:?}, noisy: {noisy:?}");
        }

        self.estimate = integrate(&self.estimate, &noisy);
        self.last_displacement = noisy;
        self.prev_pose = Some(*true_pose);
    }

    /// Integrated pose estimate, `None` while the sensor is disabled.
    pub fn estimate(&self) -> Option<Pose> {
        if self.disabled {
            None
        } else {
            Some(self.estimate)
        }
    }

    /// Noisy displacement of the last step, before integration.
    ///
    /// Meant for debugging and velocity estimation: `dist` and `theta` are the linear and
    /// angular displacement per step.
    pub fn last_raw_displacement(&self) -> RawDisplacement {
        self.last_displacement
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_noise_enabled(&self) -> bool {
        self.noise_enabled
    }

    pub fn set_noise_enabled(&mut self, enabled: bool) {
        self.noise_enabled = enabled;
    }

    /// Whether a reference pose was received.
    pub fn is_initialized(&self) -> bool {
        self.prev_pose.is_some()
    }

    /// Back to the uninitialized state, with the estimate at the origin.
    ///
    /// Must be called between steps.
    pub fn reset(&mut self) {
        self.prev_pose = None;
        self.estimate = Pose::origin();
        self.last_displacement = RawDisplacement::default();
        self.warned_non_finite = false;
        self.noise_model.reset();
    }
}

impl Default for OdometrySensor {
    fn default() -> Self {
        Self::new()
    }
}

impl Recordable<OdometrySensorRecord> for OdometrySensor {
    fn record(&self) -> OdometrySensorRecord {
        OdometrySensorRecord {
            initialized: self.is_initialized(),
            disabled: self.disabled,
            noise_enabled: self.is_noise_enabled(),
            estimate: self.estimate.record(),
            last_displacement: self.last_displacement,
        }
    }
}
