//! Temporally correlated odometry noise.
//!
//! Each component of the displacement gets its own first order autoregressive noise:
//! ```text
//! n_k = model_param * n_(k-1) + sqrt(1 - model_param²) * N(0, std_dev)
//! ```
//! so the stationary standard deviation of `n` is `std_dev`. A step without any motion is
//! returned untouched and does not advance the process.

use log::debug;
use serde_derive::{Deserialize, Serialize};

use crate::{
    errors::{SimError, SimErrorTypes, SimResult},
    logger::{InternalLog, is_enabled},
    sensors::odometry_sensor::RawDisplacement,
    utils::{
        determinist_random_variable::DeterministRandomVariableFactory,
        distributions::normal::DeterministNormalRandomVariable, geometry::normalize_angle,
        maths::deg2rad,
    },
};

use super::{NoiseModel, check_coefficient};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct AutoregressiveComponentConfig {
    /// Stationary standard deviation of the noise.
    pub std_dev: f64,
    /// Correlation with the previous step, in `[0, 1)`.
    pub model_param: f64,
}

impl Default for AutoregressiveComponentConfig {
    fn default() -> Self {
        Self {
            std_dev: 0.,
            model_param: 0.2,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct AutoregressiveNoiseModelConfig {
    pub dist: AutoregressiveComponentConfig,
    /// Angles in radians.
    pub alpha: AutoregressiveComponentConfig,
    pub theta: AutoregressiveComponentConfig,
}

impl Default for AutoregressiveNoiseModelConfig {
    fn default() -> Self {
        Self {
            dist: AutoregressiveComponentConfig {
                std_dev: 0.2,
                model_param: 0.2,
            },
            alpha: AutoregressiveComponentConfig {
                std_dev: deg2rad(5.),
                model_param: 0.2,
            },
            theta: AutoregressiveComponentConfig {
                std_dev: deg2rad(0.6),
                model_param: 0.2,
            },
        }
    }
}

#[derive(Debug, Clone)]
struct AutoregressiveNoise {
    std_dev: f64,
    model_param: f64,
    last_noise: f64,
    variable: DeterministNormalRandomVariable,
}

impl AutoregressiveNoise {
    fn from_config(
        name: &str,
        config: &AutoregressiveComponentConfig,
        va_factory: &DeterministRandomVariableFactory,
    ) -> SimResult<Self> {
        check_coefficient(&format!("{name}.std_dev"), config.std_dev)?;
        if !(0. ..1.).contains(&config.model_param) {
            return Err(SimError::new(
                SimErrorTypes::ConfigError,
                format!(
                    "`{name}.model_param` should be in [0, 1), got {}",
                    config.model_param
                ),
            ));
        }
        Ok(Self {
            std_dev: config.std_dev,
            model_param: config.model_param,
            last_noise: 0.,
            variable: va_factory.make_normal(),
        })
    }

    fn next(&mut self) -> f64 {
        let innovation = (1. - self.model_param.powi(2)).sqrt() * self.variable.generate(self.std_dev);
        self.last_noise = self.model_param * self.last_noise + innovation;
        self.last_noise
    }

    fn reset(&mut self) {
        self.last_noise = 0.;
        self.variable.reset();
    }
}

#[derive(Debug, Clone)]
pub struct AutoregressiveNoiseModel {
    dist: AutoregressiveNoise,
    alpha: AutoregressiveNoise,
    theta: AutoregressiveNoise,
}

impl AutoregressiveNoiseModel {
    pub fn from_config(
        config: &AutoregressiveNoiseModelConfig,
        va_factory: &DeterministRandomVariableFactory,
    ) -> SimResult<Self> {
        Ok(Self {
            dist: AutoregressiveNoise::from_config("dist", &config.dist, va_factory)?,
            alpha: AutoregressiveNoise::from_config("alpha", &config.alpha, va_factory)?,
            theta: AutoregressiveNoise::from_config("theta", &config.theta, va_factory)?,
        })
    }
}

impl NoiseModel for AutoregressiveNoiseModel {
    fn sample(&mut self, raw: &RawDisplacement) -> RawDisplacement {
        if raw.is_zero() {
            return *raw;
        }
        let noise = (self.dist.next(), self.alpha.next(), self.theta.next());
        if is_enabled(InternalLog::NoiseModel) {
            debug!("Autoregressive noise: {noise:?}");
        }
        RawDisplacement {
            dist: raw.dist + noise.0,
            alpha: normalize_angle(raw.alpha + noise.1),
            theta: normalize_angle(raw.theta + noise.2),
        }
    }

    fn reset(&mut self) {
        self.dist.reset();
        self.alpha.reset();
        self.theta.reset();
    }
}
