// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Parameterless networks that forward every input train to the output of the same
//! index; outputs without a matching input stay silent. Useful to exercise converters
//! and pipelines without any network dynamics.

use voxctl_controllers::{Parametrized, Resettable};
use voxctl_structures::ConfigurationError;

use crate::network::{QuantizedSpikingNetwork, SpikeHistory, SpikingNetwork};
use crate::spike_train::{QuantizedSpikeTrain, SpikeTrain};

fn reject_params(params: &[f64]) -> Result<(), ConfigurationError> {
    if params.is_empty() {
        Ok(())
    } else {
        Err(ConfigurationError::dimension_mismatch(
            "pass-through network parameters",
            0,
            params.len(),
        ))
    }
}

/// Continuous-time network that copies inputs to outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct PassThroughNetwork {
    input_dimension: usize,
    output_dimension: usize,
    plot_mode: bool,
    spikes: Option<SpikeHistory>,
}

impl PassThroughNetwork {
    pub fn new(dimension: usize) -> Self {
        Self::with_dimensions(dimension, dimension)
    }

    pub fn with_dimensions(input_dimension: usize, output_dimension: usize) -> Self {
        Self {
            input_dimension,
            output_dimension,
            plot_mode: false,
            spikes: None,
        }
    }

    pub fn plot_mode(&self) -> bool {
        self.plot_mode
    }
}

impl SpikingNetwork for PassThroughNetwork {
    fn apply(&mut self, _t: f64, inputs: &[SpikeTrain]) -> Vec<SpikeTrain> {
        let mut outputs: Vec<SpikeTrain> =
            inputs.iter().take(self.output_dimension).cloned().collect();
        outputs.resize_with(self.output_dimension, SpikeTrain::new);
        if let Some([layer]) = self.spikes.as_deref_mut() {
            for (neuron, train) in layer.iter_mut().zip(&outputs) {
                neuron.extend_from_slice(train.times());
            }
        }
        outputs
    }

    fn input_dimension(&self) -> usize {
        self.input_dimension
    }

    fn output_dimension(&self) -> usize {
        self.output_dimension
    }

    fn set_plot_mode(&mut self, plot_mode: bool) {
        self.plot_mode = plot_mode;
    }

    fn set_spikes_tracker(&mut self, enabled: bool) {
        self.spikes = enabled.then(|| vec![vec![Vec::new(); self.output_dimension]]);
    }

    fn spikes(&self) -> Option<&SpikeHistory> {
        self.spikes.as_ref()
    }
}

impl Parametrized for PassThroughNetwork {
    fn params(&self) -> Vec<f64> {
        Vec::new()
    }

    fn set_params(&mut self, params: &[f64]) -> Result<(), ConfigurationError> {
        reject_params(params)
    }
}

impl Resettable for PassThroughNetwork {
    fn reset(&mut self) {
        if let Some(layers) = self.spikes.as_mut() {
            layers.iter_mut().flatten().for_each(Vec::clear);
        }
    }
}

/// Quantized network that copies inputs to outputs.
///
/// While tracking, each counted spike is recorded at the end of its bin.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedPassThroughNetwork {
    input_dimension: usize,
    output_dimension: usize,
    plot_mode: bool,
    spikes: Option<SpikeHistory>,
    previous_application_time: f64,
}

impl QuantizedPassThroughNetwork {
    pub fn new(dimension: usize) -> Self {
        Self::with_dimensions(dimension, dimension)
    }

    pub fn with_dimensions(input_dimension: usize, output_dimension: usize) -> Self {
        Self {
            input_dimension,
            output_dimension,
            plot_mode: false,
            spikes: None,
            previous_application_time: 0.0,
        }
    }

    pub fn plot_mode(&self) -> bool {
        self.plot_mode
    }

    fn record(&mut self, t: f64, outputs: &[QuantizedSpikeTrain]) {
        let Some([layer]) = self.spikes.as_deref_mut() else {
            return;
        };
        let window_start = self.previous_application_time;
        for (neuron, train) in layer.iter_mut().zip(outputs) {
            let bin_width = (t - window_start) / train.len().max(1) as f64;
            for (bin, count) in train.bins().iter().enumerate() {
                let time = window_start + bin_width * (bin + 1) as f64;
                neuron.extend(std::iter::repeat(time).take(*count as usize));
            }
        }
    }
}

impl QuantizedSpikingNetwork for QuantizedPassThroughNetwork {
    fn apply(&mut self, t: f64, inputs: &[QuantizedSpikeTrain]) -> Vec<QuantizedSpikeTrain> {
        let array_size = inputs.first().map_or(0, QuantizedSpikeTrain::len);
        let mut outputs: Vec<QuantizedSpikeTrain> =
            inputs.iter().take(self.output_dimension).cloned().collect();
        outputs.resize_with(self.output_dimension, || QuantizedSpikeTrain::new(array_size));
        self.record(t, &outputs);
        self.previous_application_time = t;
        outputs
    }

    fn input_dimension(&self) -> usize {
        self.input_dimension
    }

    fn output_dimension(&self) -> usize {
        self.output_dimension
    }

    fn set_plot_mode(&mut self, plot_mode: bool) {
        self.plot_mode = plot_mode;
    }

    fn set_spikes_tracker(&mut self, enabled: bool) {
        self.spikes = enabled.then(|| vec![vec![Vec::new(); self.output_dimension]]);
    }

    fn spikes(&self) -> Option<&SpikeHistory> {
        self.spikes.as_ref()
    }
}

impl Parametrized for QuantizedPassThroughNetwork {
    fn params(&self) -> Vec<f64> {
        Vec::new()
    }

    fn set_params(&mut self, params: &[f64]) -> Result<(), ConfigurationError> {
        reject_params(params)
    }
}

impl Resettable for QuantizedPassThroughNetwork {
    fn reset(&mut self) {
        self.previous_application_time = 0.0;
        if let Some(layers) = self.spikes.as_mut() {
            layers.iter_mut().flatten().for_each(Vec::clear);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwards_and_pads() {
        let mut network = PassThroughNetwork::new(2);
        let outputs = network.apply(1.0, &[SpikeTrain::from_times([0.5])]);
        assert_eq!(outputs, vec![SpikeTrain::from_times([0.5]), SpikeTrain::new()]);
    }

    #[test]
    fn test_unequal_dimensions() {
        let mut network = QuantizedPassThroughNetwork::with_dimensions(3, 2);
        let inputs = vec![QuantizedSpikeTrain::from_bins(vec![1, 0]); 3];
        assert_eq!(network.apply(1.0, &inputs).len(), 2);

        let mut network = QuantizedPassThroughNetwork::with_dimensions(1, 2);
        let outputs = network.apply(1.0, &[QuantizedSpikeTrain::from_bins(vec![1, 0])]);
        assert_eq!(outputs[1], QuantizedSpikeTrain::new(2));
    }

    #[test]
    fn test_tracking() {
        let mut network = PassThroughNetwork::new(1);
        assert!(network.spikes().is_none());
        network.set_spikes_tracker(true);
        network.apply(1.0, &[SpikeTrain::from_times([0.25, 0.75])]);
        network.apply(2.0, &[SpikeTrain::from_times([1.5])]);
        assert_eq!(network.spikes(), Some(&vec![vec![vec![0.25, 0.75, 1.5]]]));
        network.reset();
        assert_eq!(network.spikes(), Some(&vec![vec![Vec::<f64>::new()]]));
    }

    #[test]
    fn test_quantized_tracking_places_spikes_at_bin_ends() {
        let mut network = QuantizedPassThroughNetwork::new(1);
        network.set_spikes_tracker(true);
        network.apply(1.0, &[QuantizedSpikeTrain::from_bins(vec![0, 2, 0, 1])]);
        assert_eq!(network.spikes(), Some(&vec![vec![vec![0.5, 0.5, 1.0]]]));
    }

    #[test]
    fn test_params_must_be_empty() {
        let mut network = QuantizedPassThroughNetwork::new(3);
        assert!(network.params().is_empty());
        assert!(network.set_params(&[]).is_ok());
        assert!(network.set_params(&[1.0]).is_err());
    }
}
