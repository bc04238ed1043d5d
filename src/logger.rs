use std::{
    fmt::Display,
    sync::{
        RwLock,
        atomic::{AtomicUsize, Ordering},
    },
};

use serde_derive::{Deserialize, Serialize};

static INTERNAL_LOG_LEVEL: RwLock<Vec<InternalLog>> = RwLock::new(Vec::new());
static CURRENT_STEP: AtomicUsize = AtomicUsize::new(0);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "config")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Internal(Vec<InternalLog>),
}

impl From<log::LevelFilter> for LogLevel {
    fn from(level: log::LevelFilter) -> Self {
        match level {
            log::LevelFilter::Off => LogLevel::Off,
            log::LevelFilter::Error => LogLevel::Error,
            log::LevelFilter::Warn => LogLevel::Warn,
            log::LevelFilter::Info => LogLevel::Info,
            log::LevelFilter::Debug => LogLevel::Debug,
            log::LevelFilter::Trace => LogLevel::Debug,
        }
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Internal(_) => log::LevelFilter::Debug,
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Off => write!(f, "Off"),
            LogLevel::Error => write!(f, "Error"),
            LogLevel::Warn => write!(f, "Warn"),
            LogLevel::Info => write!(f, "Info"),
            LogLevel::Debug => write!(f, "Debug"),
            LogLevel::Internal(internals) => {
                let internals_string = internals
                    .iter()
                    .map(|il| format!("{il:?}"))
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "Internal [{}]", internals_string)
            }
        }
    }
}

/// Detailed log categories, only printed when listed in [`LogLevel::Internal`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalLog {
    All,
    /// Raw and noisy displacement at each step.
    Odometry,
    /// Standard deviations computed by the noise models.
    NoiseModel,
    SetupSteps,
    Simulator,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    pub log_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
        }
    }
}

pub fn init_log(config: &LoggerConfig) {
    let mut internals = INTERNAL_LOG_LEVEL.write().unwrap();
    internals.clear();
    if let LogLevel::Internal(v) = &config.log_level {
        internals.clone_from(v);
    }
}

pub fn is_enabled(internal_level: InternalLog) -> bool {
    if let InternalLog::All = internal_level {
        return true;
    }
    let internals = INTERNAL_LOG_LEVEL.read().unwrap();
    internals.contains(&InternalLog::All) || internals.contains(&internal_level)
}

/// Step shown in the log prefix.
pub fn set_current_step(step: usize) {
    CURRENT_STEP.store(step, Ordering::Relaxed);
}

pub fn current_step() -> usize {
    CURRENT_STEP.load(Ordering::Relaxed)
}
