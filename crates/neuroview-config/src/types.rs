// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines the root configuration struct that maps to sections in
//! `neuroview.toml`. The per-component sections are the components' own config
//! types, so a loaded file and a hand-built pipeline validate identically.

use neuroview_agent::{ServiceConfig, SessionSettings};
use neuroview_ink::{CanvasConfig, NormalizerConfig};
use neuroview_scene::{LayoutConfig, PruneConfig, RenderConfig};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuroviewConfig {
    pub canvas: CanvasConfig,
    pub normalizer: NormalizerConfig,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub prune: PruneConfig,
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
}

impl NeuroviewConfig {
    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` naming the first offending value
    pub fn validate(&self) -> ConfigResult<()> {
        self.canvas.validate().map_err(as_validation)?;
        self.normalizer.validate().map_err(as_validation)?;
        self.layout.validate().map_err(as_validation)?;
        self.render.validate().map_err(as_validation)?;
        self.prune.validate().map_err(as_validation)?;
        self.service.validate().map_err(as_validation)?;
        self.logging.validate()?;
        Ok(())
    }

    /// Bundles the visualization sections for `Session::new`.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            canvas: self.canvas,
            normalizer: self.normalizer,
            layout: self.layout,
            render: self.render,
            prune: self.prune,
        }
    }
}

fn as_validation<E: std::fmt::Display>(err: E) -> ConfigError {
    ConfigError::ValidationError(err.to_string())
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level emitted: trace, debug, info, warn or error
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    const LEVELS: [&'static str; 5] = ["trace", "debug", "info", "warn", "error"];

    /// Checks that the level names something `tracing` understands.
    pub fn validate(&self) -> ConfigResult<()> {
        if Self::LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            Ok(())
        } else {
            Err(ConfigError::ValidationError(format!(
                "Unknown log level '{}', expected one of {:?}",
                self.log_level,
                Self::LEVELS
            )))
        }
    }
}
