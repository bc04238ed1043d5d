/*!
Noise models applied to the raw displacement of the odometer before integration.

A [`NoiseModel`] maps a raw displacement to a noisy one. Two models are provided:
- [`MotionNoiseModel`](motion::MotionNoiseModel): independent zero-mean Gaussian noise
  whose standard deviation grows with the translation and rotation of the step.
- [`AutoregressiveNoiseModel`](autoregressive::AutoregressiveNoiseModel): temporally
  correlated AR(1) noise on each component.

To add a new model, implement the trait and add a variant to [`NoiseModelConfig`].
*/

pub mod autoregressive;
pub mod motion;

use std::fmt::Debug;

use serde_derive::{Deserialize, Serialize};

use crate::{
    errors::{SimError, SimErrorTypes, SimResult},
    sensors::odometry_sensor::RawDisplacement,
    utils::determinist_random_variable::DeterministRandomVariableFactory,
};

use {
    autoregressive::{AutoregressiveNoiseModel, AutoregressiveNoiseModelConfig},
    motion::{MotionNoiseModel, MotionNoiseModelConfig},
};

pub trait NoiseModel: Debug + Send {
    /// Returns the noisy version of `raw`.
    fn sample(&mut self, raw: &RawDisplacement) -> RawDisplacement;
    /// Restarts the random series and forgets any temporal state.
    fn reset(&mut self);
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
#[serde(deny_unknown_fields)]
pub enum NoiseModelConfig {
    Motion(MotionNoiseModelConfig),
    Autoregressive(AutoregressiveNoiseModelConfig),
}

impl Default for NoiseModelConfig {
    fn default() -> Self {
        Self::Motion(MotionNoiseModelConfig::default())
    }
}

pub fn make_noise_model_from_config(
    config: &NoiseModelConfig,
    va_factory: &DeterministRandomVariableFactory,
) -> SimResult<Box<dyn NoiseModel>> {
    Ok(match config {
        NoiseModelConfig::Motion(c) => {
            Box::new(MotionNoiseModel::from_config(c, va_factory)?) as Box<dyn NoiseModel>
        }
        NoiseModelConfig::Autoregressive(c) => {
            Box::new(AutoregressiveNoiseModel::from_config(c, va_factory)?) as Box<dyn NoiseModel>
        }
    })
}

pub(crate) fn check_coefficient(name: &str, value: f64) -> SimResult<()> {
    if !value.is_finite() || value < 0. {
        return Err(SimError::new(
            SimErrorTypes::ConfigError,
            format!("`{name}` should be a finite non-negative number, got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_motion_model() {
        assert!(matches!(
            NoiseModelConfig::default(),
            NoiseModelConfig::Motion(_)
        ));
    }

    #[test]
    fn yaml_tagged_config() {
        let config: NoiseModelConfig =
            serde_yaml::from_str("type: Motion\nrotation_to_rotation: 0.02\n").unwrap();
        match config {
            NoiseModelConfig::Motion(c) => {
                assert_eq!(c.rotation_to_rotation, 0.02);
                assert_eq!(
                    c.translation_to_translation,
                    MotionNoiseModelConfig::default().translation_to_translation
                );
            }
            _ => panic!("Expected a Motion noise model"),
        }

        let config: NoiseModelConfig =
            serde_yaml::from_str("type: Autoregressive\ndist:\n  std_dev: 0.5\n").unwrap();
        assert!(matches!(config, NoiseModelConfig::Autoregressive(_)));
    }

    #[test]
    fn invalid_coefficients_are_rejected() {
        let factory = DeterministRandomVariableFactory::new(1.);
        let config = NoiseModelConfig::Motion(MotionNoiseModelConfig {
            translation_to_rotation: -0.1,
            ..Default::default()
        });
        let err = make_noise_model_from_config(&config, &factory).unwrap_err();
        assert_eq!(err.error_type(), SimErrorTypes::ConfigError);
    }
}
