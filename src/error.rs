/*
 * Error Module
 *
 * Only configuration can fail. Once a simulation is built, ticking it is
 * infallible: every numeric edge case is handled by a branch guard.
 */

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("world size must be finite and positive, got {width}x{height}")]
    InvalidWorldSize { width: f64, height: f64 },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParam {
        name: &'static str,
        reason: String,
    },

    #[error("failed to read parameter file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse parameters: {0}")]
    Parse(#[from] toml::de::Error),
}
