/*!
The [`Simulator`] runs the step loop of one [`Robot`]:
1. the controller computes a [`Command`](crate::physics::Command) from the odometer view,
2. the body moves,
3. the odometer reads the new true pose and integrates its noisy displacement,
4. a [`Record`] is stored.

A run with a given `random_seed` is fully repeatable.
*/

pub mod simulator_config;

pub use simulator_config::SimulatorConfig;

use std::{fs::File, io::Write, path::Path};

use colored::Colorize;
use log::{debug, info, warn};
use serde_derive::{Deserialize, Serialize};

use crate::{
    controllers::{Controller, make_controller_from_config},
    errors::{SimError, SimErrorTypes, SimResult},
    logger::{InternalLog, LoggerConfig, current_step, init_log, is_enabled, set_current_step},
    pose::Pose,
    recordable::Recordable,
    robot::{Robot, RobotRecord},
    utils::{
        determinist_random_variable::DeterministRandomVariableFactory,
        geometry::smallest_theta_diff,
    },
};

/// State of the robot after a step.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Record {
    pub step: usize,
    pub robot: RobotRecord,
}

/// Gap between the odometer estimate and the ground truth, in the start frame.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Drift {
    /// Euclidean distance between estimated and true positions.
    pub distance: f64,
    /// Estimated minus true orientation, in `(-PI, PI]`.
    pub orientation: f64,
}

#[derive(Serialize)]
struct SavedRun<'a> {
    config: &'a SimulatorConfig,
    records: &'a Vec<Record>,
}

#[derive(Debug)]
pub struct Simulator {
    config: SimulatorConfig,
    va_factory: DeterministRandomVariableFactory,
    robot: Robot,
    controller: Box<dyn Controller>,
    step: usize,
    records: Vec<Record>,
}

impl Simulator {
    /// Starts the logging environment: `env_logger` on stdout, with the level of `log_config`.
    pub fn init_environment(log_config: &LoggerConfig) {
        init_log(log_config);
        if env_logger::builder()
            .target(env_logger::Target::Stdout)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{:5}][{}] {}",
                    match record.level() {
                        log::Level::Error => "ERROR".red(),
                        log::Level::Warn => "WARN".yellow(),
                        log::Level::Info => "INFO".green(),
                        log::Level::Debug => "DEBUG".blue(),
                        log::Level::Trace => "TRACE".black(),
                    },
                    current_step(),
                    record.args()
                )
            })
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .filter_level(log_config.log_level.clone().into())
            .try_init()
            .is_err()
        {
            warn!("Logger already initialized!");
        } else {
            println!("Logging initialized at level: {}", log_config.log_level);
        }
    }

    pub fn from_config_path(config_path: &Path) -> SimResult<Self> {
        println!("Load configuration from {:?}", config_path);
        let config = SimulatorConfig::load_from_path(config_path)?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &SimulatorConfig) -> SimResult<Self> {
        init_log(&config.log);
        if !config.check_version()? {
            warn!(
                "Config version ({}) differs from software version ({})",
                config.version,
                crate::VERSION
            );
        }
        let mut config = config.clone();
        let va_factory = match config.random_seed {
            Some(seed) => DeterministRandomVariableFactory::new(seed),
            None => {
                let factory = DeterministRandomVariableFactory::default();
                config.random_seed = Some(factory.global_seed());
                factory
            }
        };
        if is_enabled(InternalLog::SetupSteps) {
            info!("Random seed: {:?}", config.random_seed);
        }
        let robot = Robot::from_config(&config.robot, &va_factory)
            .map_err(|e| e.chain("While building the simulator".to_string()))?;
        let controller = make_controller_from_config(&config.controller)
            .map_err(|e| e.chain("While building the controller".to_string()))?;
        set_current_step(0);
        Ok(Self {
            config,
            va_factory,
            robot,
            controller,
            step: 0,
            records: Vec::new(),
        })
    }

    /// Runs one step and returns its record.
    pub fn step(&mut self) -> &Record {
        self.step += 1;
        set_current_step(self.step);
        let command = self.controller.control(&self.robot.view());
        self.robot.step(&command);
        if is_enabled(InternalLog::Simulator) {
            debug!(
                "Command {:?}, true pose {}, odometer {:?}",
                command,
                self.robot.true_pose(),
                self.robot.odometer_values()
            );
        }
        self.records.push(Record {
            step: self.step,
            robot: self.robot.record(),
        });
        &self.records[self.records.len() - 1]
    }

    /// Runs until `max_steps` steps were done since the last reset.
    pub fn run(&mut self) {
        info!(
            "Running {} steps",
            self.config.max_steps.saturating_sub(self.step)
        );
        while self.step < self.config.max_steps {
            self.step();
        }
        match self.drift() {
            Some(drift) => info!(
                "Done after {} steps: drift of {:.3} (position) and {:.4} rad (orientation)",
                self.step, drift.distance, drift.orientation
            ),
            None => info!("Done after {} steps, odometer disabled", self.step),
        }
    }

    /// Back to the initial state. The next run replays the same noise.
    pub fn reset(&mut self) {
        self.robot.reset();
        self.controller.reset();
        self.step = 0;
        set_current_step(0);
        self.records.clear();
    }

    /// Gap between the odometer and the ground truth, `None` when the odometer is disabled.
    pub fn drift(&self) -> Option<Drift> {
        let estimate = self.robot.odometer_values()?;
        let truth = truth_in_start_frame(&self.robot.initial_pose(), &self.robot.true_pose());
        Some(Drift {
            distance: (estimate.position() - truth.position()).norm(),
            orientation: smallest_theta_diff(estimate.orientation, truth.orientation),
        })
    }

    pub fn records(&self) -> &Vec<Record> {
        &self.records
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn robot_mut(&mut self) -> &mut Robot {
        &mut self.robot
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    /// Configuration used, with the random seed filled in.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn random_seed(&self) -> f32 {
        self.va_factory.global_seed()
    }

    /// Writes the configuration and the records as JSON.
    pub fn save_records(&self, path: &Path) -> SimResult<()> {
        info!("Saving {} records to {}", self.records.len(), path.display());
        let file = File::create(path)
            .map_err(|e| SimError::from(e).chain(format!("While creating {}", path.display())))?;
        serde_json::to_writer(
            &file,
            &SavedRun {
                config: &self.config,
                records: &self.records,
            },
        )
        .map_err(|e| {
            SimError::new(
                SimErrorTypes::IOError,
                format!("Error during json serialization of records: {e}"),
            )
        })
    }
}

/// Expresses `pose` in the frame of `start`.
fn truth_in_start_frame(start: &Pose, pose: &Pose) -> Pose {
    let d = pose.position() - start.position();
    let (sin, cos) = start.orientation.sin_cos();
    Pose {
        x: cos * d.x + sin * d.y,
        y: -sin * d.x + cos * d.y,
        orientation: smallest_theta_diff(pose.orientation, start.orientation),
    }
}
