// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # voxctl spiking-network converters
//!
//! Wraps an opaque spiking network so that it can be used as a plain
//! [`TimedRealFunction`](voxctl_controllers::TimedRealFunction):
//!
//! ```text
//! values ──encode──▶ spike trains ──network──▶ spike trains ──decode──▶ values
//! ```
//!
//! Two variants share this flow:
//! - [`continuous`]: spike trains are sets of real spike times inside the current window
//! - [`quantized`]: spike trains are fixed-length per-bin spike counts
//!
//! Each input and output channel owns an independent converter built from a
//! descriptor ([`ValueToSpikeTrainDescriptor`], [`SpikeTrainToValueDescriptor`]).

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target used by every trace emitted from this crate
pub(crate) const LOG_TARGET: &str = "voxctl-snn";

pub mod coding;
pub mod continuous;
pub mod descriptor;
pub mod network;
pub mod pass_through;
pub mod quantized;
pub mod spike_train;

pub use coding::FrequencyRange;
pub use continuous::SpikingNetworkWithConverters;
pub use descriptor::{SpikeTrainToValueDescriptor, ValueToSpikeTrainDescriptor};
pub use network::{QuantizedSpikingNetwork, SpikeHistory, SpikingNetwork};
pub use pass_through::{PassThroughNetwork, QuantizedPassThroughNetwork};
pub use quantized::QuantizedSpikingNetworkWithConverters;
pub use spike_train::{QuantizedSpikeTrain, SpikeTrain};
