// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Three tiers, later ones winning:
//! 1. TOML file (base values)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::{validate_config, ConfigError, ConfigResult, VoxctlConfig, LOG_TARGET};

const CONFIG_FILE_NAME: &str = "voxctl.toml";

/// Find the voxctl configuration file
///
/// Search order:
/// 1. `VOXCTL_CONFIG_PATH` environment variable
/// 2. Current working directory: `./voxctl.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("VOXCTL_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by VOXCTL_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        search_paths.extend(
            cwd.ancestors()
                .skip(1)
                .take(5)
                .map(|dir| dir.join(CONFIG_FILE_NAME)),
        );
    }

    if let Some(path) = search_paths.iter().find(|p| p.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "voxctl configuration file '{}' not found in any of these locations:\n{}\n\nSet VOXCTL_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Parse a configuration from TOML text, without overrides or validation.
pub fn parse_config(content: &str) -> ConfigResult<VoxctlConfig> {
    Ok(toml::from_str(content)?)
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<VoxctlConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config = parse_config(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    validate_config(&config)?;
    debug!(
        target: LOG_TARGET,
        "Loaded configuration from {}",
        config_file.display()
    );
    Ok(config)
}

/// Parse `value` into `target`, keeping the old value (with a warning) if it does not parse.
fn override_with<T: FromStr>(target: &mut T, source: &str, value: &str) {
    match value.parse::<T>() {
        Ok(parsed) => *target = parsed,
        Err(_) => warn!(
            target: LOG_TARGET,
            "Ignoring {}: cannot parse '{}'", source, value
        ),
    }
}

fn parse_flag(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1" || value == "yes"
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `VOXCTL_STATE_SIZE` -> `controller.state_size`
/// - `VOXCTL_SNN_VARIANT` -> `snn.variant`
/// - `VOXCTL_SNN_ARRAY_SIZE` -> `snn.array_size`
/// - `VOXCTL_SNN_RESET_NETWORK` -> `snn.reset_network`
/// - `VOXCTL_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut VoxctlConfig) {
    if let Ok(value) = env::var("VOXCTL_STATE_SIZE") {
        override_with(&mut config.controller.state_size, "VOXCTL_STATE_SIZE", &value);
    }
    if let Ok(value) = env::var("VOXCTL_SNN_VARIANT") {
        override_with(&mut config.snn.variant, "VOXCTL_SNN_VARIANT", &value);
    }
    if let Ok(value) = env::var("VOXCTL_SNN_ARRAY_SIZE") {
        override_with(&mut config.snn.array_size, "VOXCTL_SNN_ARRAY_SIZE", &value);
    }
    if let Ok(value) = env::var("VOXCTL_SNN_RESET_NETWORK") {
        config.snn.reset_network = parse_flag(&value);
    }
    if let Ok(value) = env::var("VOXCTL_LOG_LEVEL") {
        config.logging.level = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"state_size": "2", "variant": "quantized"}`)
pub fn apply_cli_overrides(config: &mut VoxctlConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("state_size") {
        override_with(&mut config.controller.state_size, "state_size", value);
    }
    if let Some(value) = cli_args.get("variant") {
        override_with(&mut config.snn.variant, "variant", value);
    }
    if let Some(value) = cli_args.get("array_size") {
        override_with(&mut config.snn.array_size, "array_size", value);
    }
    if let Some(value) = cli_args.get("reset_network") {
        config.snn.reset_network = parse_flag(value);
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
}
