//! lipcut Settings Crate
//!
//! Handles the generator settings and their persistence as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{
    GeneratorSettings, DEFAULT_APPROACH_FEED_RATE, DEFAULT_CLEARANCE_HEIGHT, DEFAULT_FEED_RATE,
    DEFAULT_LENGTH_PADDING,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
