/*
 * World Bounds Module
 *
 * The tank is the rectangle [0, width) x [0, height) with the origin in the
 * top-left corner and y pointing down.
 */

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f64,
    pub height: f64,
}

impl WorldBounds {
    pub fn new(width: f64, height: f64) -> Result<Self, ConfigError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::InvalidWorldSize { width, height });
        }
        Ok(Self { width, height })
    }
}
