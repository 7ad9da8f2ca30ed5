use thiserror::Error;

use crate::components::plane::ConfigError;

#[derive(Error, Debug)]
pub enum FlightError {
    #[error("No flight configuration bound to plane: {0}")]
    ConfigurationMissing(String),

    #[error("Invalid flight configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
