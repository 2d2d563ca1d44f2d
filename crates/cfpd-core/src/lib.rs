//! Shared types for the cfpd workspace.
//!
//! Holds the normalized [`Cfp`] record that every provider source produces
//! and the environment-driven [`AppConfig`] consumed by the binary.

pub mod config;
pub mod record;

pub use config::{load_config, load_config_from_env, AppConfig, ConfigError};
pub use record::{Cfp, MAX_DESCRIPTION_CHARS};
