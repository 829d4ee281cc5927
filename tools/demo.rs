// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Runs a distributed sensing controller on a small hard-coded body and prints the
//! control signals of every step as JSON lines.
//!
//! Every voxel gets a spiking pipeline around a pass-through network, built from the
//! `[snn]` section of `voxctl.toml` (or defaults when no file is found).
//!
//! Usage: `voxctl_demo [--steps N] [--set-<key>=<value>]... [--debug-voxctl-snn] [--debug-all]`

use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::info;
use voxctl::config::{
    apply_cli_overrides, apply_environment_overrides, load_config, validate_config, ConfigError,
    SnnConfig, SnnVariant, VoxctlConfig,
};
use voxctl::observability::{debug_flags_help, init_logging, parse_debug_flags};
use voxctl::prelude::*;

const TIME_STEP: f64 = 0.1;
const DEFAULT_STEPS: usize = 20;

/// Voxel with a single touch-like sensor that oscillates with its column.
#[derive(Debug)]
struct DemoVoxel {
    reading: f64,
}

impl SensingVoxel for DemoVoxel {
    fn sensor_domains(&self) -> Vec<usize> {
        vec![1]
    }

    fn sensor_readings(&self) -> Vec<f64> {
        vec![self.reading]
    }
}

/// ```text
/// X X X
/// X . X
/// ```
fn body(t: f64) -> Grid<DemoVoxel> {
    Grid::from_fn(3, 2, |x, y| {
        (y == 0 || x != 1).then(|| DemoVoxel {
            reading: (t + x as f64).sin(),
        })
    })
}

fn cell_function(snn: &SnnConfig, n_of_inputs: usize, n_of_outputs: usize) -> Result<CellFunction> {
    let function = match snn.variant {
        SnnVariant::Continuous => CellFunction::resettable(
            SpikingNetworkWithConverters::from_descriptors(
                PassThroughNetwork::with_dimensions(n_of_inputs, n_of_outputs),
                &snn.encoder,
                &snn.decoder,
            )?
            .with_network_reset(snn.reset_network),
        ),
        SnnVariant::Quantized => CellFunction::resettable(
            QuantizedSpikingNetworkWithConverters::from_descriptors(
                QuantizedPassThroughNetwork::with_dimensions(n_of_inputs, n_of_outputs),
                &snn.encoder,
                &snn.decoder,
                snn.array_size,
            )?,
        ),
    };
    Ok(function)
}

fn parse_cli_args() -> (usize, HashMap<String, String>) {
    let mut steps = DEFAULT_STEPS;
    let mut overrides = HashMap::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--steps" {
            steps = args.next().and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_STEPS);
        } else if let Some((key, value)) = arg.strip_prefix("--set-").and_then(|kv| kv.split_once('=')) {
            overrides.insert(key.to_string(), value.to_string());
        }
    }
    (steps, overrides)
}

fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--help") {
        println!("Usage: voxctl_demo [--steps N] [--set-<key>=<value>]...\n");
        println!("{}", debug_flags_help());
        return Ok(());
    }

    let (steps, overrides) = parse_cli_args();
    let config = match load_config(None, Some(&overrides)) {
        Ok(config) => config,
        Err(ConfigError::FileNotFound(_)) => {
            let mut config = VoxctlConfig::default();
            apply_environment_overrides(&mut config);
            apply_cli_overrides(&mut config, &overrides);
            validate_config(&config)?;
            config
        }
        Err(e) => return Err(e).context("Failed to load voxctl.toml"),
    };

    let debug_flags = parse_debug_flags();
    init_logging(&debug_flags, &config.logging.level)?;
    info!(
        "Running {} steps: state size {}, {} pipelines",
        steps, config.controller.state_size, config.snn.variant
    );

    let state_size = config.controller.state_size;
    let voxels = body(0.0);
    let n_of_outputs = DistributedSensing::n_of_outputs_for(state_size);
    let mut controller = DistributedSensing::new(&voxels, state_size);
    for (x, y, voxel) in voxels.occupied() {
        let n_of_inputs = DistributedSensing::n_of_inputs_for(voxel, state_size);
        controller.set_function(x, y, cell_function(&config.snn, n_of_inputs, n_of_outputs)?)?;
    }

    for step in 0..steps {
        let t = step as f64 * TIME_STEP;
        let signals = controller.compute_control_signals(t, &body(t));
        println!("{}", serde_json::to_string(&signals)?);
    }

    controller.reset();
    info!("Controller reset after {} steps", steps);
    Ok(())
}
