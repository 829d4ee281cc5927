// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Continuous-time variant: spike trains are sets of real spike times.

mod pipeline;
mod spike_to_value;
mod value_to_spike;

pub use pipeline::SpikingNetworkWithConverters;
pub use spike_to_value::{
    AverageFrequencySpikeTrainToValueConverter, MovingAverageSpikeTrainToValueConverter,
    SpikeTrainToValueConverter,
};
pub use value_to_spike::{
    UniformValueToSpikeTrainConverter, UniformWithMemoryValueToSpikeTrainConverter,
    ValueToSpikeTrainConverter,
};
