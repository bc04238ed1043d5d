use std::path::Path;

use serde_derive::{Deserialize, Serialize};

use crate::{
    VERSION,
    controllers::ControllerConfig,
    errors::{SimError, SimErrorTypes, SimResult},
    logger::LoggerConfig,
    robot::RobotConfig,
};

/// Root of the simulation configuration.
///
/// ## Example in yaml:
/// ```ignore
/// version: 0.3.0
/// random_seed: 42
/// max_steps: 1000
/// robot:
///   name: robot
///   odometer:
///     noise:
///       type: Motion
///       translation_to_translation: 0.3
/// controller:
///   type: SquarePattern
///   forward_steps: 100
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct SimulatorConfig {
    pub version: String,
    pub log: LoggerConfig,
    /// Pins every noise stream. Random when not given.
    pub random_seed: Option<f32>,
    pub max_steps: usize,
    pub robot: RobotConfig,
    pub controller: ControllerConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            version: VERSION.to_string(),
            log: LoggerConfig::default(),
            random_seed: None,
            max_steps: 1000,
            robot: RobotConfig::default(),
            controller: ControllerConfig::default(),
        }
    }
}

impl SimulatorConfig {
    pub fn load_from_path(path: &Path) -> SimResult<Self> {
        // confy writes a default file when the path does not exist
        if !path.is_file() {
            return Err(SimError::new(
                SimErrorTypes::ConfigError,
                format!("Config file {} not found", path.display()),
            ));
        }
        let mut config: serde_yaml::Value = confy::load_path(path)?;
        config.apply_merge().map_err(|e| {
            SimError::new(
                SimErrorTypes::ConfigError,
                format!("Error from SerdeYAML while merging YAML tags: {}", e),
            )
        })?;
        serde_yaml::from_value(config).map_err(|e| {
            SimError::new(
                SimErrorTypes::ConfigError,
                format!("Error from SerdeYAML while loading SimulatorConfig : {}", e),
            )
        })
    }

    /// Checks that the configuration version is `MAJOR.MINOR[.PATCH]`.
    ///
    /// Returns whether major and minor match the software version.
    pub fn check_version(&self) -> SimResult<bool> {
        let config_version = self
            .version
            .split('.')
            .map(|s| s.parse::<usize>())
            .collect::<Result<Vec<usize>, _>>()
            .map_err(|_| {
                SimError::new(
                    SimErrorTypes::ConfigError,
                    format!("Config version pattern not recognized: `{}`", self.version),
                )
            })?;
        if config_version.len() < 2 {
            return Err(SimError::new(
                SimErrorTypes::ConfigError,
                "Version is expected to be XX.YY at least".to_string(),
            ));
        }
        let software_version = VERSION
            .split('.')
            .filter_map(|s| s.parse::<usize>().ok())
            .collect::<Vec<usize>>();
        Ok(config_version[0..2] == software_version[0..2])
    }
}
