// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # NeuroView Configuration System
//!
//! Type-safe configuration loader for NeuroView with support for:
//! - TOML file parsing
//! - Environment variable overrides
//! - Validation of every section before use
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neuroview_config::{load_config, NeuroviewConfig};
//!
//! // Load configuration with automatic file discovery and overrides
//! let config = load_config(None).expect("Failed to load config");
//!
//! println!("Inference service: {}", config.service.base_url);
//! println!("Normalized side:   {}", config.normalizer.target_side);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;

pub use loader::{apply_environment_overrides, find_config_file, load_config};
pub use types::{LoggingConfig, NeuroviewConfig};

/// Re-export for convenience
pub use serde;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
