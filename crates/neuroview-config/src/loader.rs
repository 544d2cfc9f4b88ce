// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 2-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)

use crate::{ConfigResult, ConfigError, NeuroviewConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Find the NeuroView configuration file
///
/// Search order:
/// 1. `NEUROVIEW_CONFIG_PATH` environment variable
/// 2. Current working directory: `./neuroview.toml`
/// 3. Ancestor directories (searches up to 5 levels for a workspace root)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    // 1. Check environment variable first
    if let Ok(env_path) = env::var("NEUROVIEW_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by NEUROVIEW_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    // 2. Search in common locations
    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join("neuroview.toml"));

        // Search up to 5 levels for workspace root
        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join("neuroview.toml"));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    // Not found
    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "NeuroView configuration file 'neuroview.toml' not found in any of these locations:\n{}\n\nSet NEUROVIEW_CONFIG_PATH environment variable to specify custom location.",
        search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
///
/// # Returns
///
/// Complete `NeuroviewConfig` with environment overrides applied and validated.
/// When no path is given and the search finds nothing, the built-in defaults
/// are used; a file named explicitly (argument or `NEUROVIEW_CONFIG_PATH`)
/// must exist.
///
/// # Errors
///
/// Returns error if an explicitly named file is missing, the file contains
/// invalid TOML, or the resulting configuration fails validation
pub fn load_config(config_path: Option<&Path>) -> ConfigResult<NeuroviewConfig> {
    let config_file = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => match find_config_file() {
            Ok(path) => Some(path),
            Err(ConfigError::FileNotFound(_)) if env::var("NEUROVIEW_CONFIG_PATH").is_err() => None,
            Err(failure) => return Err(failure),
        },
    };

    let mut config = match &config_file {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str::<NeuroviewConfig>(&content)?
        }
        None => NeuroviewConfig::default(),
    };

    apply_environment_overrides(&mut config);
    config.validate()?;

    match config_file {
        Some(path) => info!("[CONFIG] Loaded configuration from {}", path.display()),
        None => info!("[CONFIG] No neuroview.toml found, using built-in defaults"),
    }
    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `NEUROVIEW_SERVICE_URL` -> `service.base_url`
/// - `NEUROVIEW_SERVICE_TIMEOUT_SECS` -> `service.timeout_secs`
/// - `NEUROVIEW_CANVAS_SIDE` -> `canvas.side`
/// - `NEUROVIEW_TARGET_SIDE` -> `normalizer.target_side`
/// - `NEUROVIEW_TOP_K` -> `prune.top_k`
/// - `NEUROVIEW_LOG_LEVEL` -> `logging.log_level`
///
/// Values that fail to parse are skipped with a warning rather than aborting
/// the load.
pub fn apply_environment_overrides(config: &mut NeuroviewConfig) {
    // Service settings
    if let Ok(value) = env::var("NEUROVIEW_SERVICE_URL") {
        config.service.base_url = value;
    }
    if let Ok(value) = env::var("NEUROVIEW_SERVICE_TIMEOUT_SECS") {
        match value.parse::<f64>() {
            Ok(timeout) => config.service.timeout_secs = timeout,
            Err(_) => warn!("[CONFIG] Ignoring non-numeric NEUROVIEW_SERVICE_TIMEOUT_SECS: {}", value),
        }
    }

    // Canvas and normalization settings
    if let Ok(value) = env::var("NEUROVIEW_CANVAS_SIDE") {
        match value.parse::<u32>() {
            Ok(side) => config.canvas.side = side,
            Err(_) => warn!("[CONFIG] Ignoring non-numeric NEUROVIEW_CANVAS_SIDE: {}", value),
        }
    }
    if let Ok(value) = env::var("NEUROVIEW_TARGET_SIDE") {
        match value.parse::<u32>() {
            Ok(side) => config.normalizer.target_side = side,
            Err(_) => warn!("[CONFIG] Ignoring non-numeric NEUROVIEW_TARGET_SIDE: {}", value),
        }
    }

    // Scene settings
    if let Ok(value) = env::var("NEUROVIEW_TOP_K") {
        match value.parse::<u32>() {
            Ok(top_k) => config.prune.top_k = top_k,
            Err(_) => warn!("[CONFIG] Ignoring non-numeric NEUROVIEW_TOP_K: {}", value),
        }
    }

    // Logging settings
    if let Ok(value) = env::var("NEUROVIEW_LOG_LEVEL") {
        config.logging.log_level = value;
    }
}
