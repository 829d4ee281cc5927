// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Quantized variant: each window is split into a fixed number of bins and a spike
//! train is the spike count of every bin.

mod pipeline;
mod spike_to_value;
mod value_to_spike;

pub use pipeline::QuantizedSpikingNetworkWithConverters;
pub use spike_to_value::{
    QuantizedAverageFrequencySpikeTrainToValueConverter,
    QuantizedMovingAverageSpikeTrainToValueConverter, QuantizedSpikeTrainToValueConverter,
};
pub use value_to_spike::{
    QuantizedUniformValueToSpikeTrainConverter,
    QuantizedUniformWithMemoryValueToSpikeTrainConverter, QuantizedValueToSpikeTrainConverter,
    DEFAULT_ARRAY_SIZE,
};
