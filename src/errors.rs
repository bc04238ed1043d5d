use std::{
    error::Error,
    fmt::{Debug, Display},
};

#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum SimErrorTypes {
    ConfigError,
    IOError,
}

impl Display for SimErrorTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ConfigError => "ConfigError",
            Self::IOError => "IOError",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone)]
pub struct SimError {
    error_type: SimErrorTypes,
    what: String,
}

impl SimError {
    pub fn new(error_type: SimErrorTypes, what: String) -> Self {
        Self { error_type, what }
    }

    pub fn detailed_error(&self) -> String {
        format!("Simulation Error of type {}: {}", self.error_type, self.what)
    }

    pub fn error_type(&self) -> SimErrorTypes {
        self.error_type.clone()
    }

    pub fn chain(self, what: String) -> Self {
        Self {
            error_type: self.error_type,
            what: format!("{}\n↪ {}", self.what, what),
        }
    }
}

impl Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Simulation Error: {}", self.error_type)
    }
}

impl Debug for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Simulation Error of type {}: {}",
            self.error_type, self.what
        )
    }
}

impl Error for SimError {}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        Self::new(SimErrorTypes::IOError, e.to_string())
    }
}

impl From<confy::ConfyError> for SimError {
    fn from(error: confy::ConfyError) -> Self {
        let what = match error.source() {
            Some(source) => format!("{error}: {source}"),
            None => error.to_string(),
        };
        Self::new(
            SimErrorTypes::ConfigError,
            format!("Error from Confy while loading the config file : {what}"),
        )
    }
}

pub type SimResult<T> = Result<T, SimError>;
