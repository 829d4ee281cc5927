// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # voxctl - Distributed Voxel Controllers
//!
//! Controllers for modular soft robots built from voxels on a 2D grid. Every voxel runs
//! its own transfer function on its sensor readings plus the state its four neighbors
//! broadcast at the previous step; transfer functions can be spiking networks wrapped
//! in value/spike-train converters.
//!
//! ## Usage
//!
//! ```rust
//! use voxctl::prelude::*;
//!
//! #[derive(Debug)]
//! struct Voxel(f64);
//!
//! impl SensingVoxel for Voxel {
//!     fn sensor_domains(&self) -> Vec<usize> {
//!         vec![1]
//!     }
//!
//!     fn sensor_readings(&self) -> Vec<f64> {
//!         vec![self.0]
//!     }
//! }
//!
//! let voxels = Grid::from_fn(2, 1, |x, _| Some(Voxel(x as f64)));
//! let mut controller = DistributedSensing::new(&voxels, 1);
//!
//! let n_in = controller.n_of_inputs(0, 0).unwrap_or(0);
//! let pipeline = SpikingNetworkWithConverters::with_default_converters(
//!     PassThroughNetwork::with_dimensions(n_in, 2),
//! );
//! controller.set_function(0, 0, CellFunction::resettable(pipeline))?;
//!
//! let signals = controller.compute_control_signals(0.1, &voxels);
//! assert_eq!(signals.occupied_count(), 2);
//! # Ok::<(), ConfigurationError>(())
//! ```
//!
//! ## Crates
//!
//! - [`structures`]: grids, directions, configuration errors
//! - [`controllers`]: timed functions and the distributed sensing controller
//! - [`snn`]: spike trains, converters and spiking network pipelines
//! - [`config`]: `voxctl.toml` loading with environment and CLI overrides
//! - [`observability`]: logging initialization and per-crate debug flags

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export foundation
pub use voxctl_config as config;
pub use voxctl_observability as observability;
pub use voxctl_structures as structures;

// Re-export controllers
pub use voxctl_controllers as controllers;
pub use voxctl_snn as snn;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::structures::{ConfigurationError, Direction, Grid};

    pub use crate::controllers::{
        CellFunction, ClosureFunction, Controller, DistributedSensing, Parametrized, Resettable,
        SensingVoxel, TimedRealFunction,
    };

    pub use crate::snn::{
        FrequencyRange, PassThroughNetwork, QuantizedPassThroughNetwork,
        QuantizedSpikingNetwork, QuantizedSpikingNetworkWithConverters,
        SpikeTrainToValueDescriptor, SpikingNetwork, SpikingNetworkWithConverters,
        ValueToSpikeTrainDescriptor,
    };

    pub use crate::config::{SnnVariant, VoxctlConfig};
}
