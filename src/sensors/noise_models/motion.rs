//! Motion-dependent (heteroscedastic) Gaussian odometry noise.
//!
//! The standard deviations follow the classical odometry error model:
//! ```text
//! sd_trans = translation_to_translation * dist + rotation_to_translation * |theta|°
//! sd_rot   = translation_to_rotation * dist + rotation_to_rotation * |theta|°   (in degrees)
//! ```
//! `dist` receives `N(0, sd_trans)`, `alpha` and `theta` each receive `N(0, sd_rot)`.
//! A step without motion has null standard deviations and stays exactly null.

use log::debug;
use serde_derive::{Deserialize, Serialize};

use crate::{
    errors::SimResult,
    logger::{InternalLog, is_enabled},
    sensors::odometry_sensor::RawDisplacement,
    utils::{
        determinist_random_variable::DeterministRandomVariableFactory,
        distributions::normal::DeterministNormalRandomVariable,
        geometry::normalize_angle,
        maths::{deg2rad, rad2deg},
    },
};

use super::{NoiseModel, check_coefficient};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct MotionNoiseModelConfig {
    /// Influence of translation on translation (unit/unit).
    pub translation_to_translation: f64,
    /// Influence of rotation on translation (unit/degree).
    pub rotation_to_translation: f64,
    /// Influence of translation on rotation (degree/unit).
    pub translation_to_rotation: f64,
    /// Influence of rotation on rotation (degree/degree).
    pub rotation_to_rotation: f64,
}

impl Default for MotionNoiseModelConfig {
    fn default() -> Self {
        Self {
            translation_to_translation: 0.3,
            rotation_to_translation: 0.1,
            translation_to_rotation: 0.04,
            rotation_to_rotation: 0.01,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MotionNoiseModel {
    translation_to_translation: f64,
    rotation_to_translation: f64,
    translation_to_rotation: f64,
    rotation_to_rotation: f64,
    dist_noise: DeterministNormalRandomVariable,
    alpha_noise: DeterministNormalRandomVariable,
    theta_noise: DeterministNormalRandomVariable,
}

impl MotionNoiseModel {
    pub fn from_config(
        config: &MotionNoiseModelConfig,
        va_factory: &DeterministRandomVariableFactory,
    ) -> SimResult<Self> {
        check_coefficient(
            "translation_to_translation",
            config.translation_to_translation,
        )?;
        check_coefficient("rotation_to_translation", config.rotation_to_translation)?;
        check_coefficient("translation_to_rotation", config.translation_to_rotation)?;
        check_coefficient("rotation_to_rotation", config.rotation_to_rotation)?;
        Ok(Self::build(config, va_factory))
    }

    /// Model with the default coefficients.
    pub fn new(va_factory: &DeterministRandomVariableFactory) -> Self {
        Self::build(&MotionNoiseModelConfig::default(), va_factory)
    }

    fn build(
        config: &MotionNoiseModelConfig,
        va_factory: &DeterministRandomVariableFactory,
    ) -> Self {
        Self {
            translation_to_translation: config.translation_to_translation,
            rotation_to_translation: config.rotation_to_translation,
            translation_to_rotation: config.translation_to_rotation,
            rotation_to_rotation: config.rotation_to_rotation,
            dist_noise: va_factory.make_normal(),
            alpha_noise: va_factory.make_normal(),
            theta_noise: va_factory.make_normal(),
        }
    }

    /// Standard deviations `(translation, rotation in radians)` for the given step.
    pub fn standard_deviations(&self, raw: &RawDisplacement) -> (f64, f64) {
        let dist = raw.dist.abs();
        let rotation_deg = rad2deg(raw.theta.abs());
        let sd_trans =
            self.translation_to_translation * dist + self.rotation_to_translation * rotation_deg;
        let sd_rot = deg2rad(
            self.translation_to_rotation * dist + self.rotation_to_rotation * rotation_deg,
        );
        (sd_trans, sd_rot)
    }
}

impl NoiseModel for MotionNoiseModel {
    fn sample(&mut self, raw: &RawDisplacement) -> RawDisplacement {
        let (sd_trans, sd_rot) = self.standard_deviations(raw);
        if is_enabled(InternalLog::NoiseModel) {
            debug!("Motion noise: sd_trans = {sd_trans}, sd_rot = {sd_rot}");
        }
        RawDisplacement {
            dist: raw.dist + self.dist_noise.generate(sd_trans),
            alpha: normalize_angle(raw.alpha + self.alpha_noise.generate(sd_rot)),
            theta: normalize_angle(raw.theta + self.theta_noise.generate(sd_rot)),
        }
    }

    fn reset(&mut self) {
        self.dist_noise.reset();
        self.alpha_noise.reset();
        self.theta_noise.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(seed: f32) -> MotionNoiseModel {
        MotionNoiseModel::from_config(
            &MotionNoiseModelConfig::default(),
            &DeterministRandomVariableFactory::new(seed),
        )
        .unwrap()
    }

    fn std_dev(values: &[f64]) -> f64 {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.)).sqrt()
    }

    #[test]
    fn no_motion_no_noise() {
        let mut m = model(10.);
        for _ in 0..100 {
            let noisy = m.sample(&RawDisplacement::default());
            assert_eq!(noisy, RawDisplacement::default());
        }
    }

    #[test]
    fn standard_deviations_follow_coefficients() {
        let m = model(10.);
        let (sd_trans, sd_rot) = m.standard_deviations(&RawDisplacement {
            dist: 10.,
            alpha: 0.,
            theta: deg2rad(-20.),
        });
        assert!((sd_trans - (0.3 * 10. + 0.1 * 20.)).abs() < 1e-9);
        assert!((sd_rot - deg2rad(0.04 * 10. + 0.01 * 20.)).abs() < 1e-12);
    }

    #[test]
    fn rotation_noise_grows_with_rotation() {
        let mut m = model(4.);
        let n = 2000;
        let mut previous_std = 0.;
        let mut previous_theta = 0.;
        for theta in [0.05, 0.1, 0.2, 0.4] {
            let raw = RawDisplacement {
                dist: 0.,
                alpha: 0.,
                theta,
            };
            let errors: Vec<f64> = (0..n).map(|_| m.sample(&raw).theta - theta).collect();
            let s = std_dev(&errors);
            let expected = deg2rad(0.01 * rad2deg(theta));
            // Sample standard deviation is within a few percents for 2000 samples.
            assert!(
                (s - expected).abs() < 0.1 * expected,
                "theta = {theta}: std = {s}, expected {expected}"
            );
            assert!(
                s > previous_std,
                "std for {theta} ({s}) should exceed std for {previous_theta} ({previous_std})"
            );
            previous_std = s;
            previous_theta = theta;
        }
    }

    #[test]
    fn pure_rotation_perturbs_translation() {
        let mut m = model(5.);
        let raw = RawDisplacement {
            dist: 0.,
            alpha: 0.,
            theta: 0.1,
        };
        let moved = (0..50).any(|_| m.sample(&raw).dist != 0.);
        assert!(moved);
    }

    #[test]
    fn reset_replays_the_same_noise() {
        let mut m = model(8.);
        let raw = RawDisplacement {
            dist: 3.,
            alpha: 0.1,
            theta: 0.05,
        };
        let first: Vec<RawDisplacement> = (0..10).map(|_| m.sample(&raw)).collect();
        m.reset();
        let second: Vec<RawDisplacement> = (0..10).map(|_| m.sample(&raw)).collect();
        assert_eq!(first, second);
    }
}
