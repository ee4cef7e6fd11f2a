//! Error types for star_caster

use thiserror::Error;

/// Failures outside the geometry itself. Rays that miss every wall are not errors.
#[derive(Error, Debug)]
pub enum StarCasterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Window error: {0}")]
    Window(String),

    #[error("Surface error: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, StarCasterError>;
