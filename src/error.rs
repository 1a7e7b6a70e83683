//! Error types for picker configuration and the terminal host.

use thiserror::Error;

use crate::widgets::shared::datetime::DateTime;

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("minimum date {minimum} is after maximum date {maximum}")]
    InvertedBounds { minimum: DateTime, maximum: DateTime },

    #[error("minute interval {0} does not divide an hour")]
    InvalidMinuteInterval(u32),

    #[error("unsupported config format: {0}")]
    UnsupportedConfigFormat(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PickerError>;
