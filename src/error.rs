//! Top-level error type for the viewer

use crate::config::ConfigError;
use crate::grid::GridError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// SDL reports failures as plain strings
    #[error("display error: {0}")]
    Display(String),
}

impl AppError {
    pub fn display<T: ToString>(msg: T) -> Self {
        Self::Display(msg.to_string())
    }
}
