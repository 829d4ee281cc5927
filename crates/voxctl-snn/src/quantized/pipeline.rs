// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::num::NonZeroUsize;

use tracing::{debug, trace};
use voxctl_controllers::{Parametrized, Resettable, TimedRealFunction};
use voxctl_structures::ConfigurationError;

use crate::descriptor::{SpikeTrainToValueDescriptor, ValueToSpikeTrainDescriptor};
use crate::network::{QuantizedSpikingNetwork, SpikeHistory};
use crate::quantized::{
    QuantizedMovingAverageSpikeTrainToValueConverter, QuantizedSpikeTrainToValueConverter,
    QuantizedUniformWithMemoryValueToSpikeTrainConverter, QuantizedValueToSpikeTrainConverter,
    DEFAULT_ARRAY_SIZE,
};
use crate::spike_train::QuantizedSpikeTrain;
use crate::LOG_TARGET;

/// Quantized counterpart of [`SpikingNetworkWithConverters`](crate::SpikingNetworkWithConverters).
///
/// Same encode, network, decode flow; resetting the pipeline always resets the network too.
#[derive(Debug)]
pub struct QuantizedSpikingNetworkWithConverters<N: QuantizedSpikingNetwork> {
    network: N,
    value_to_spike_train_converters: Vec<Box<dyn QuantizedValueToSpikeTrainConverter>>,
    spike_train_to_value_converters: Vec<Box<dyn QuantizedSpikeTrainToValueConverter>>,
    previous_application_time: f64,
}

impl<N: QuantizedSpikingNetwork> QuantizedSpikingNetworkWithConverters<N> {
    /// # Errors
    ///
    /// `DimensionMismatch` if the converter counts differ from the network dimensions, or
    /// if the encoders do not agree on a single array size.
    pub fn new(
        network: N,
        value_to_spike_train_converters: Vec<Box<dyn QuantizedValueToSpikeTrainConverter>>,
        spike_train_to_value_converters: Vec<Box<dyn QuantizedSpikeTrainToValueConverter>>,
    ) -> Result<Self, ConfigurationError> {
        if value_to_spike_train_converters.len() != network.input_dimension() {
            return Err(ConfigurationError::dimension_mismatch(
                "quantized value to spike train converters",
                network.input_dimension(),
                value_to_spike_train_converters.len(),
            ));
        }
        if spike_train_to_value_converters.len() != network.output_dimension() {
            return Err(ConfigurationError::dimension_mismatch(
                "quantized spike train to value converters",
                network.output_dimension(),
                spike_train_to_value_converters.len(),
            ));
        }
        if let Some(first) = value_to_spike_train_converters.first() {
            let array_size = first.array_size();
            if let Some(other) = value_to_spike_train_converters
                .iter()
                .find(|c| c.array_size() != array_size)
            {
                return Err(ConfigurationError::dimension_mismatch(
                    "quantized spike train array size",
                    array_size,
                    other.array_size(),
                ));
            }
        }
        Ok(Self::assemble(
            network,
            value_to_spike_train_converters,
            spike_train_to_value_converters,
        ))
    }

    pub fn from_descriptors(
        network: N,
        value_to_spike_train: &ValueToSpikeTrainDescriptor,
        spike_train_to_value: &SpikeTrainToValueDescriptor,
        array_size: usize,
    ) -> Result<Self, ConfigurationError> {
        let encoders =
            value_to_spike_train.build_quantized_channels(network.input_dimension(), array_size)?;
        let decoders = spike_train_to_value.build_quantized_channels(network.output_dimension())?;
        Self::new(network, encoders, decoders)
    }

    /// Wrap `network` with memory-keeping uniform encoders of `array_size` bins and
    /// moving-average decoders.
    pub fn with_default_converters(network: N, array_size: NonZeroUsize) -> Self {
        let encoders = std::iter::repeat_with(|| {
            Box::new(QuantizedUniformWithMemoryValueToSpikeTrainConverter::new(
                Default::default(),
                array_size,
            )) as Box<dyn QuantizedValueToSpikeTrainConverter>
        })
        .take(network.input_dimension())
        .collect();
        let decoders = std::iter::repeat_with(|| {
            Box::new(QuantizedMovingAverageSpikeTrainToValueConverter::default())
                as Box<dyn QuantizedSpikeTrainToValueConverter>
        })
        .take(network.output_dimension())
        .collect();
        Self::assemble(network, encoders, decoders)
    }

    fn assemble(
        network: N,
        value_to_spike_train_converters: Vec<Box<dyn QuantizedValueToSpikeTrainConverter>>,
        spike_train_to_value_converters: Vec<Box<dyn QuantizedSpikeTrainToValueConverter>>,
    ) -> Self {
        debug!(
            target: LOG_TARGET,
            "Created quantized spiking pipeline with {} inputs and {} outputs",
            value_to_spike_train_converters.len(),
            spike_train_to_value_converters.len()
        );
        let mut pipeline = Self {
            network,
            value_to_spike_train_converters,
            spike_train_to_value_converters,
            previous_application_time: 0.0,
        };
        pipeline.reset();
        pipeline
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    /// Bins per window of the encoded trains; the default size when there are no inputs.
    pub fn array_size(&self) -> usize {
        self.value_to_spike_train_converters
            .first()
            .map(|c| c.array_size())
            .unwrap_or(DEFAULT_ARRAY_SIZE.get())
    }

    pub fn previous_application_time(&self) -> f64 {
        self.previous_application_time
    }

    pub fn set_plot_mode(&mut self, plot_mode: bool) {
        self.network.set_plot_mode(plot_mode);
    }

    pub fn set_spikes_tracker(&mut self, enabled: bool) {
        self.network.set_spikes_tracker(enabled);
    }

    pub fn spikes(&self) -> Option<&SpikeHistory> {
        self.network.spikes()
    }
}

impl<N: QuantizedSpikingNetwork> TimedRealFunction for QuantizedSpikingNetworkWithConverters<N> {
    fn apply(&mut self, t: f64, input: &[f64]) -> Vec<f64> {
        let window_size = t - self.previous_application_time;
        trace!(target: LOG_TARGET, "t={}: quantized window of {}", t, window_size);

        let input_spike_trains: Vec<QuantizedSpikeTrain> = self
            .value_to_spike_train_converters
            .iter_mut()
            .zip(input)
            .map(|(converter, value)| converter.convert(*value, window_size, t))
            .collect();
        let output_spike_trains = self.network.apply(t, &input_spike_trains);
        self.previous_application_time = t;

        self.spike_train_to_value_converters
            .iter_mut()
            .zip(&output_spike_trains)
            .map(|(converter, spike_train)| converter.convert(spike_train, window_size))
            .collect()
    }

    fn input_dimension(&self) -> usize {
        self.network.input_dimension()
    }

    fn output_dimension(&self) -> usize {
        self.network.output_dimension()
    }
}

impl<N: QuantizedSpikingNetwork> Resettable for QuantizedSpikingNetworkWithConverters<N> {
    fn reset(&mut self) {
        self.previous_application_time = 0.0;
        for converter in &mut self.value_to_spike_train_converters {
            converter.reset();
        }
        for converter in &mut self.spike_train_to_value_converters {
            converter.reset();
        }
        self.network.reset();
    }
}

impl<N: QuantizedSpikingNetwork> Parametrized for QuantizedSpikingNetworkWithConverters<N> {
    fn params(&self) -> Vec<f64> {
        self.network.params()
    }

    fn set_params(&mut self, params: &[f64]) -> Result<(), ConfigurationError> {
        self.network.set_params(params)?;
        self.reset();
        Ok(())
    }
}
