/*!
Dead-reckoning odometer for a simulated planar robot.

The odometer never reads its position directly: at each step it computes the motion of
the body since the previous step, as a distance, a travel direction and a rotation, adds
calibrated noise to it, and integrates the result into its own pose estimate. The estimate
therefore drifts away from the ground truth, like a real wheel odometer.

Main components:
- [`sensors::odometry_sensor`]: the odometer itself, and the [`sensors::noise_models`]
  applied to each displacement.
- [`physics`]: a holonomic body providing the ground truth pose.
- [`controllers`]: command generation from the odometer only.
- [`robot`]: the body and its odometer.
- [`simulator`]: step loop, configuration loading, records and drift evaluation.

For example:
```no_run
use std::path::Path;
use dead_reckoning::{logger::LoggerConfig, simulator::Simulator};

Simulator::init_environment(&LoggerConfig::default());
let mut simulator = Simulator::from_config_path(Path::new("test_config/config.yaml")).unwrap();
simulator.run();
println!("{:?}", simulator.drift());
simulator.save_records(Path::new("records.json")).unwrap();
```
*/

pub mod constants;
pub mod controllers;
pub mod errors;
pub mod logger;
pub mod physics;
pub mod pose;
pub mod recordable;
pub mod robot;
pub mod sensors;
pub mod simulator;
pub mod utils;

#[cfg(test)]
mod integration_tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
