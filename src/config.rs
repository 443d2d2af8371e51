//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Geometry values mirror what the view layer would measure from its
//! widgets: a square stick container plus the indicator that moves inside
//! it. They are resolved into [`StickSurface`](crate::stick::StickSurface)
//! geometry once, when the controller view first opens.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub surfaces: SurfacesConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Geometry of the two joystick surfaces
#[derive(Debug, Deserialize, Clone)]
pub struct SurfacesConfig {
    #[serde(default = "default_left_surface")]
    pub left: SurfaceConfig,

    #[serde(default = "default_right_surface")]
    pub right: SurfaceConfig,
}

/// Geometry of one joystick surface
#[derive(Debug, Deserialize, Clone)]
pub struct SurfaceConfig {
    /// Container top-left origin in screen space.
    #[serde(default)]
    pub origin_x: f32,

    #[serde(default)]
    pub origin_y: f32,

    /// Side length of the square container, in pixels.
    #[serde(default = "default_container_size")]
    pub container_size: f32,

    /// Side length of the movable indicator, in pixels.
    #[serde(default = "default_indicator_size")]
    pub indicator_size: f32,
}

/// Relay connection configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RelayConfig {
    /// Attempt the relay connection on startup.
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_relay_address")]
    pub address: String,
}

/// Input pipeline tuning
#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    /// Capacity of the touch intake channel.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

// Default value functions
fn default_container_size() -> f32 {
    160.0
}
fn default_indicator_size() -> f32 {
    40.0
}

fn default_left_surface() -> SurfaceConfig {
    SurfaceConfig {
        origin_x: 40.0,
        origin_y: 280.0,
        container_size: default_container_size(),
        indicator_size: default_indicator_size(),
    }
}

fn default_right_surface() -> SurfaceConfig {
    SurfaceConfig {
        origin_x: 440.0,
        origin_y: 280.0,
        container_size: default_container_size(),
        indicator_size: default_indicator_size(),
    }
}

fn default_relay_address() -> String {
    "ws://192.168.0.106:9001".to_string()
}

fn default_event_capacity() -> usize {
    256
}

impl Default for Config {
    fn default() -> Self {
        Self {
            surfaces: SurfacesConfig::default(),
            relay: RelayConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Default for SurfacesConfig {
    fn default() -> Self {
        Self {
            left: default_left_surface(),
            right: default_right_surface(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: default_relay_address(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            event_capacity: default_event_capacity(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        for (name, surface) in [("left", &self.surfaces.left), ("right", &self.surfaces.right)] {
            if surface.container_size <= 0.0 {
                return Err(crate::error::TouchBridgeError::Config(
                    toml::de::Error::custom(format!(
                        "{} surface container_size must be positive",
                        name
                    )),
                ));
            }

            if surface.indicator_size <= 0.0 {
                return Err(crate::error::TouchBridgeError::Config(
                    toml::de::Error::custom(format!(
                        "{} surface indicator_size must be positive",
                        name
                    )),
                ));
            }

            if surface.indicator_size >= surface.container_size {
                return Err(crate::error::TouchBridgeError::Config(
                    toml::de::Error::custom(format!(
                        "{} surface indicator_size must be smaller than container_size",
                        name
                    )),
                ));
            }
        }

        if self.relay.enabled && self.relay.address.is_empty() {
            return Err(crate::error::TouchBridgeError::Config(
                toml::de::Error::custom("relay address cannot be empty when relay is enabled"),
            ));
        }

        if self.pipeline.event_capacity == 0 {
            return Err(crate::error::TouchBridgeError::Config(
                toml::de::Error::custom("event_capacity must be greater than 0"),
            ));
        }

        Ok(())
    }
}
