/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct holding every tuning
 * constant of the fish tank. Defaults reproduce the reference tank; any field
 * can be overridden from a TOML file (missing fields fall back to the
 * default) or adjusted live through the viewer panel.
 */

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// Longest wait, in ticks, the boost schedule may ask for
pub const MAX_BOOST_WAIT: i64 = u32::MAX as i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    // Target population; the flock grows one fish per tick until it gets here
    pub fish_count: usize,

    // Perception
    pub neighbor_radius: f64,
    pub separation_radius: f64,
    pub cursor_repulse_radius: f64,
    pub edge_padding: f64,

    // Speed and force limits
    pub max_speed: f64,
    pub min_speed: f64,
    pub max_force: f64,
    pub wander_force: f64,
    pub speed_boost: f64,

    // Rule weights
    pub alignment_weight: f64,
    pub cohesion_weight: f64,
    pub separation_force_scale: f64,
    pub edge_force: f64,
    pub vertical_padding_scale: f64,
    pub repulse_strength: f64,
    pub flee_boost_scale: f64,
    pub wander_jitter: f64,
    pub spawn_velocity_spread: f64,

    // Boost pulse scheduling, in ticks
    pub boost_decay_ticks: u32,
    pub boost_initial_countdown: i64,
    pub boost_interval_min: i64,
    pub boost_interval_jitter: i64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            fish_count: 100,
            neighbor_radius: 100.0,
            separation_radius: 25.0,
            cursor_repulse_radius: 100.0,
            edge_padding: 80.0,
            max_speed: 1.35,
            min_speed: 0.2,
            max_force: 0.03,
            wander_force: 0.01,
            speed_boost: 2.0,
            alignment_weight: 0.8,
            cohesion_weight: 0.6,
            separation_force_scale: 1.4,
            edge_force: 0.0009,
            vertical_padding_scale: 0.6,
            repulse_strength: 0.5,
            flee_boost_scale: 2.0,
            wander_jitter: 0.2,
            spawn_velocity_spread: 1.2,
            boost_decay_ticks: 80,
            boost_initial_countdown: 200,
            boost_interval_min: 400,
            boost_interval_jitter: 400,
        }
    }
}

impl SimulationParams {
    // Parse parameters from TOML text and validate them
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let params: Self = toml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    // Read and validate a TOML parameter file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject values that would feed NaN or infinities into the steering math.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("neighbor_radius", self.neighbor_radius),
            ("separation_radius", self.separation_radius),
            ("cursor_repulse_radius", self.cursor_repulse_radius),
            ("edge_padding", self.edge_padding),
            ("min_speed", self.min_speed),
            ("max_force", self.max_force),
            ("wander_force", self.wander_force),
            ("speed_boost", self.speed_boost),
            ("alignment_weight", self.alignment_weight),
            ("cohesion_weight", self.cohesion_weight),
            ("separation_force_scale", self.separation_force_scale),
            ("edge_force", self.edge_force),
            ("vertical_padding_scale", self.vertical_padding_scale),
            ("repulse_strength", self.repulse_strength),
            ("flee_boost_scale", self.flee_boost_scale),
            ("wander_jitter", self.wander_jitter),
            ("spawn_velocity_spread", self.spawn_velocity_spread),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(name, format!("must be finite and non-negative, got {value}")));
            }
        }

        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Err(invalid(
                "max_speed",
                format!("must be finite and positive, got {}", self.max_speed),
            ));
        }
        if self.min_speed > self.max_speed {
            return Err(invalid(
                "min_speed",
                format!("{} exceeds max_speed {}", self.min_speed, self.max_speed),
            ));
        }
        if self.boost_decay_ticks == 0 {
            return Err(invalid("boost_decay_ticks", "must be at least 1".to_string()));
        }
        if !(0..=MAX_BOOST_WAIT).contains(&self.boost_initial_countdown) {
            return Err(invalid(
                "boost_initial_countdown",
                format!("must be in 0..={MAX_BOOST_WAIT}, got {}", self.boost_initial_countdown),
            ));
        }
        if self.boost_interval_min < 0 || self.boost_interval_jitter < 0 {
            return Err(invalid("boost_interval", "bounds must be non-negative".to_string()));
        }
        let longest = self.boost_interval_min.checked_add(self.boost_interval_jitter);
        if !longest.is_some_and(|ticks| ticks <= MAX_BOOST_WAIT) {
            return Err(invalid(
                "boost_interval",
                format!("min + jitter must not exceed {MAX_BOOST_WAIT} ticks"),
            ));
        }

        Ok(())
    }

    // Amount the global boost loses every tick
    pub fn boost_decay_per_tick(&self) -> f64 {
        self.speed_boost / f64::from(self.boost_decay_ticks)
    }

    // Fastest any fish can move in a single tick: global ceiling, full boost
    // pulse and a flee boost from standing right next to the repulsion point
    pub fn max_displacement_per_tick(&self) -> f64 {
        self.max_speed + self.speed_boost + self.flee_boost_scale
    }

    // Get parameter ranges for UI sliders
    pub fn get_fish_count_range() -> RangeInclusive<usize> {
        1..=1000
    }

    pub fn get_radius_range() -> RangeInclusive<f64> {
        0.0..=300.0
    }

    pub fn get_speed_range() -> RangeInclusive<f64> {
        0.0..=10.0
    }

    pub fn get_force_range() -> RangeInclusive<f64> {
        0.0..=0.5
    }

    pub fn get_weight_range() -> RangeInclusive<f64> {
        0.0..=3.0
    }
}

fn invalid(name: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidParam { name, reason }
}
