// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Continuous-time pipeline: encode, run the network, decode.
//!
//! ```text
//! Δt      = t - previous_application_time
//! trains  = encoder[i].convert(input[i], Δt, t)
//! outputs = network.apply(t, trains)
//! previous_application_time = t
//! value   = decoder[j].convert(outputs[j], Δt)
//! ```
//!
//! Resetting the pipeline clears the converters and the application time. The wrapped
//! network keeps its state unless [`SpikingNetworkWithConverters::with_network_reset`]
//! was enabled.

use tracing::{debug, trace};
use voxctl_controllers::{Parametrized, Resettable, TimedRealFunction};
use voxctl_structures::ConfigurationError;

use crate::continuous::{
    MovingAverageSpikeTrainToValueConverter, SpikeTrainToValueConverter,
    UniformWithMemoryValueToSpikeTrainConverter, ValueToSpikeTrainConverter,
};
use crate::descriptor::{SpikeTrainToValueDescriptor, ValueToSpikeTrainDescriptor};
use crate::network::{SpikeHistory, SpikingNetwork};
use crate::spike_train::SpikeTrain;
use crate::LOG_TARGET;

#[derive(Debug)]
pub struct SpikingNetworkWithConverters<N: SpikingNetwork> {
    network: N,
    value_to_spike_train_converters: Vec<Box<dyn ValueToSpikeTrainConverter>>,
    spike_train_to_value_converters: Vec<Box<dyn SpikeTrainToValueConverter>>,
    previous_application_time: f64,
    reset_network: bool,
}

impl<N: SpikingNetwork> SpikingNetworkWithConverters<N> {
    /// Wrap `network` with one encoder per input and one decoder per output.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the converter counts differ from the network dimensions.
    pub fn new(
        network: N,
        value_to_spike_train_converters: Vec<Box<dyn ValueToSpikeTrainConverter>>,
        spike_train_to_value_converters: Vec<Box<dyn SpikeTrainToValueConverter>>,
    ) -> Result<Self, ConfigurationError> {
        if value_to_spike_train_converters.len() != network.input_dimension() {
            return Err(ConfigurationError::dimension_mismatch(
                "value to spike train converters",
                network.input_dimension(),
                value_to_spike_train_converters.len(),
            ));
        }
        if spike_train_to_value_converters.len() != network.output_dimension() {
            return Err(ConfigurationError::dimension_mismatch(
                "spike train to value converters",
                network.output_dimension(),
                spike_train_to_value_converters.len(),
            ));
        }
        Ok(Self::assemble(
            network,
            value_to_spike_train_converters,
            spike_train_to_value_converters,
        ))
    }

    /// Wrap `network` with converters built from one descriptor per direction.
    pub fn from_descriptors(
        network: N,
        value_to_spike_train: &ValueToSpikeTrainDescriptor,
        spike_train_to_value: &SpikeTrainToValueDescriptor,
    ) -> Result<Self, ConfigurationError> {
        let encoders = value_to_spike_train.build_channels(network.input_dimension())?;
        let decoders = spike_train_to_value.build_channels(network.output_dimension())?;
        Self::new(network, encoders, decoders)
    }

    /// Wrap `network` with memory-keeping uniform encoders and moving-average decoders.
    pub fn with_default_converters(network: N) -> Self {
        let encoders = std::iter::repeat_with(|| {
            Box::new(UniformWithMemoryValueToSpikeTrainConverter::default())
                as Box<dyn ValueToSpikeTrainConverter>
        })
        .take(network.input_dimension())
        .collect();
        let decoders = std::iter::repeat_with(|| {
            Box::new(MovingAverageSpikeTrainToValueConverter::default())
                as Box<dyn SpikeTrainToValueConverter>
        })
        .take(network.output_dimension())
        .collect();
        Self::assemble(network, encoders, decoders)
    }

    fn assemble(
        network: N,
        value_to_spike_train_converters: Vec<Box<dyn ValueToSpikeTrainConverter>>,
        spike_train_to_value_converters: Vec<Box<dyn SpikeTrainToValueConverter>>,
    ) -> Self {
        debug!(
            target: LOG_TARGET,
            "Created spiking pipeline with {} inputs and {} outputs",
            value_to_spike_train_converters.len(),
            spike_train_to_value_converters.len()
        );
        let mut pipeline = Self {
            network,
            value_to_spike_train_converters,
            spike_train_to_value_converters,
            previous_application_time: 0.0,
            reset_network: false,
        };
        pipeline.reset();
        pipeline
    }

    /// Also reset the wrapped network whenever the pipeline is reset.
    pub fn with_network_reset(mut self, reset_network: bool) -> Self {
        self.reset_network = reset_network;
        self
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
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

impl<N: SpikingNetwork> TimedRealFunction for SpikingNetworkWithConverters<N> {
    fn apply(&mut self, t: f64, input: &[f64]) -> Vec<f64> {
        let window_size = t - self.previous_application_time;
        trace!(target: LOG_TARGET, "t={}: window of {}", t, window_size);

        let input_spike_trains: Vec<SpikeTrain> = self
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

impl<N: SpikingNetwork> Resettable for SpikingNetworkWithConverters<N> {
    fn reset(&mut self) {
        self.previous_application_time = 0.0;
        for converter in &mut self.value_to_spike_train_converters {
            converter.reset();
        }
        for converter in &mut self.spike_train_to_value_converters {
            converter.reset();
        }
        if self.reset_network {
            self.network.reset();
        }
    }
}

impl<N: SpikingNetwork> Parametrized for SpikingNetworkWithConverters<N> {
    fn params(&self) -> Vec<f64> {
        self.network.params()
    }

    fn set_params(&mut self, params: &[f64]) -> Result<(), ConfigurationError> {
        self.network.set_params(params)?;
        self.reset();
        Ok(())
    }
}
