// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to one section of `voxctl.toml`. Every field has a default, so a
//! partial (or empty) file is a valid configuration.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use voxctl_snn::{SpikeTrainToValueDescriptor, ValueToSpikeTrainDescriptor};

use crate::ConfigError;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VoxctlConfig {
    pub controller: ControllerConfig,
    pub snn: SnnConfig,
    pub logging: LoggingConfig,
}

/// Distributed controller configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Values each cell broadcasts to each neighbor
    pub state_size: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self { state_size: 1 }
    }
}

/// Which spike train representation the pipelines use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnnVariant {
    #[default]
    Continuous,
    Quantized,
}

impl Display for SnnVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SnnVariant::Continuous => write!(f, "continuous"),
            SnnVariant::Quantized => write!(f, "quantized"),
        }
    }
}

impl FromStr for SnnVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "continuous" => Ok(SnnVariant::Continuous),
            "quantized" => Ok(SnnVariant::Quantized),
            other => Err(ConfigError::InvalidValue(format!(
                "unknown spiking network variant '{}' (expected 'continuous' or 'quantized')",
                other
            ))),
        }
    }
}

/// Converter pipeline configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SnnConfig {
    pub variant: SnnVariant,
    /// Bins per window, quantized variant only
    pub array_size: usize,
    /// Reset the wrapped network together with the pipeline, continuous variant only
    pub reset_network: bool,
    pub encoder: ValueToSpikeTrainDescriptor,
    pub decoder: SpikeTrainToValueDescriptor,
}

impl Default for SnnConfig {
    fn default() -> Self {
        Self {
            variant: SnnVariant::default(),
            array_size: 16,
            reset_network: false,
            encoder: ValueToSpikeTrainDescriptor::default(),
            decoder: SpikeTrainToValueDescriptor::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
