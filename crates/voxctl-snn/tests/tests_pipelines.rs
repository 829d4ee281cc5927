// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use voxctl_controllers::{Parametrized, Resettable, TimedRealFunction};
use voxctl_snn::continuous::{
    AverageFrequencySpikeTrainToValueConverter, SpikeTrainToValueConverter,
    UniformValueToSpikeTrainConverter, ValueToSpikeTrainConverter,
};
use voxctl_snn::quantized::{
    QuantizedAverageFrequencySpikeTrainToValueConverter, QuantizedSpikeTrainToValueConverter,
    QuantizedUniformValueToSpikeTrainConverter, QuantizedValueToSpikeTrainConverter,
};
use voxctl_snn::{
    FrequencyRange, PassThroughNetwork, QuantizedPassThroughNetwork, QuantizedSpikeTrain,
    QuantizedSpikingNetwork, QuantizedSpikingNetworkWithConverters, SpikeTrain,
    SpikeTrainToValueDescriptor,
    SpikingNetwork, SpikingNetworkWithConverters, ValueToSpikeTrainDescriptor,
};
use voxctl_structures::ConfigurationError;

const STEP: f64 = 0.1;

fn moving_average(window: usize) -> SpikeTrainToValueDescriptor {
    SpikeTrainToValueDescriptor::MovingAverage {
        frequency: FrequencyRange::default(),
        window,
    }
}

/// Apply `function` to a constant input at t = 0, STEP, 2 STEP, ... and collect the outputs.
fn run(function: &mut dyn TimedRealFunction, input: &[f64], steps: usize) -> Vec<Vec<f64>> {
    (0..steps)
        .map(|k| function.apply(k as f64 * STEP, input))
        .collect()
}

/// Network with three weights gating its single channel: silent while they sum below zero.
#[derive(Debug, Default)]
struct WeightedNetwork {
    weights: Vec<f64>,
    resets: usize,
}

impl WeightedNetwork {
    fn with_weights(weights: Vec<f64>) -> Self {
        Self { weights, resets: 0 }
    }
}

impl SpikingNetwork for WeightedNetwork {
    fn apply(&mut self, _t: f64, inputs: &[SpikeTrain]) -> Vec<SpikeTrain> {
        if self.weights.iter().sum::<f64>() < 0.0 {
            return vec![SpikeTrain::new(); inputs.len()];
        }
        inputs.to_vec()
    }

    fn input_dimension(&self) -> usize {
        1
    }

    fn output_dimension(&self) -> usize {
        1
    }
}

impl Parametrized for WeightedNetwork {
    fn params(&self) -> Vec<f64> {
        self.weights.clone()
    }

    fn set_params(&mut self, params: &[f64]) -> Result<(), ConfigurationError> {
        if params.len() != 3 {
            return Err(ConfigurationError::dimension_mismatch(
                "weights",
                3,
                params.len(),
            ));
        }
        self.weights = params.to_vec();
        Ok(())
    }
}

impl Resettable for WeightedNetwork {
    fn reset(&mut self) {
        self.resets += 1;
    }
}

/// Quantized network scaling every bin count by a single gain parameter.
#[derive(Debug)]
struct GainNetwork {
    gain: f64,
}

impl QuantizedSpikingNetwork for GainNetwork {
    fn apply(&mut self, _t: f64, inputs: &[QuantizedSpikeTrain]) -> Vec<QuantizedSpikeTrain> {
        inputs
            .iter()
            .map(|train| {
                let bins = train
                    .bins()
                    .iter()
                    .map(|count| (*count as f64 * self.gain).round() as u32)
                    .collect();
                QuantizedSpikeTrain::from_bins(bins)
            })
            .collect()
    }

    fn input_dimension(&self) -> usize {
        1
    }

    fn output_dimension(&self) -> usize {
        1
    }
}

impl Parametrized for GainNetwork {
    fn params(&self) -> Vec<f64> {
        vec![self.gain]
    }

    fn set_params(&mut self, params: &[f64]) -> Result<(), ConfigurationError> {
        match params {
            [gain] => {
                self.gain = *gain;
                Ok(())
            }
            _ => Err(ConfigurationError::dimension_mismatch("gain", 1, params.len())),
        }
    }
}

impl Resettable for GainNetwork {
    fn reset(&mut self) {}
}

mod test_round_trip {
    use super::*;

    #[test]
    fn test_continuous_pass_through_recovers_input() {
        let mut pipeline = SpikingNetworkWithConverters::from_descriptors(
            PassThroughNetwork::new(2),
            &ValueToSpikeTrainDescriptor::default(),
            &moving_average(20),
        )
        .unwrap();

        let outputs = run(&mut pipeline, &[0.5, -0.2], 100);
        let last = outputs.last().unwrap();
        assert!((last[0] - 0.5).abs() < 0.05, "got {}", last[0]);
        assert!((last[1] + 0.2).abs() < 0.05, "got {}", last[1]);
    }

    #[test]
    fn test_quantized_pass_through_recovers_input() {
        let mut pipeline = QuantizedSpikingNetworkWithConverters::from_descriptors(
            QuantizedPassThroughNetwork::new(1),
            &ValueToSpikeTrainDescriptor::default(),
            &moving_average(20),
            16,
        )
        .unwrap();
        assert_eq!(pipeline.array_size(), 16);

        let outputs = run(&mut pipeline, &[0.5], 100);
        let last = outputs.last().unwrap();
        assert!((last[0] - 0.5).abs() < 0.05, "got {}", last[0]);
    }

    #[test]
    fn test_memoryless_encoding_loses_fractional_spikes() {
        // 37.5 Hz over 0.1 s windows: 3 whole spikes, i.e. 30 Hz
        let mut pipeline = SpikingNetworkWithConverters::from_descriptors(
            PassThroughNetwork::new(1),
            &ValueToSpikeTrainDescriptor::Uniform {
                frequency: FrequencyRange::default(),
            },
            &SpikeTrainToValueDescriptor::AverageFrequency {
                frequency: FrequencyRange::default(),
            },
        )
        .unwrap();

        let outputs = run(&mut pipeline, &[0.5], 10);
        for output in &outputs[1..] {
            assert!((output[0] - 0.2).abs() < 1e-9, "got {}", output[0]);
        }
    }

    #[test]
    fn test_saturated_inputs() {
        let mut pipeline = SpikingNetworkWithConverters::with_default_converters(
            PassThroughNetwork::new(2),
        );
        let outputs = run(&mut pipeline, &[3.0, -3.0], 20);
        let last = outputs.last().unwrap();
        assert!(last[0] > 0.9, "got {}", last[0]);
        assert_eq!(last[1], -1.0);
    }
}

mod test_window {
    use super::*;

    #[test]
    fn test_first_call_at_zero_is_degenerate() {
        let mut pipeline = SpikingNetworkWithConverters::with_default_converters(
            PassThroughNetwork::new(1),
        );
        // No window yet: nothing recorded, decoder reports the value of zero frequency
        assert_eq!(pipeline.apply(0.0, &[1.0]), vec![-1.0]);
        assert_eq!(pipeline.previous_application_time(), 0.0);
    }

    #[test]
    fn test_repeated_time_keeps_moving_average() {
        let mut pipeline = SpikingNetworkWithConverters::with_default_converters(
            PassThroughNetwork::new(1),
        );
        pipeline.apply(0.0, &[1.0]);
        let first = pipeline.apply(1.0, &[1.0]);
        let repeated = pipeline.apply(1.0, &[1.0]);
        assert_eq!(first, repeated);
    }

    #[test]
    fn test_previous_time_advances() {
        let mut pipeline = QuantizedSpikingNetworkWithConverters::with_default_converters(
            QuantizedPassThroughNetwork::new(1),
            std::num::NonZeroUsize::new(4).unwrap(),
        );
        pipeline.apply(0.3, &[0.0]);
        assert_eq!(pipeline.previous_application_time(), 0.3);
        pipeline.reset();
        assert_eq!(pipeline.previous_application_time(), 0.0);
    }
}

mod test_reset {
    use super::*;

    #[test]
    fn test_reset_reproduces_outputs() {
        let mut pipeline = SpikingNetworkWithConverters::with_default_converters(
            PassThroughNetwork::new(1),
        );
        let before = run(&mut pipeline, &[0.3], 15);
        pipeline.reset();
        let after = run(&mut pipeline, &[0.3], 15);
        assert_eq!(before, after);

        let mut quantized = QuantizedSpikingNetworkWithConverters::with_default_converters(
            QuantizedPassThroughNetwork::new(1),
            std::num::NonZeroUsize::new(8).unwrap(),
        );
        let before = run(&mut quantized, &[-0.4], 15);
        quantized.reset();
        let after = run(&mut quantized, &[-0.4], 15);
        assert_eq!(before, after);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut pipeline = SpikingNetworkWithConverters::with_default_converters(
            PassThroughNetwork::new(1),
        );
        run(&mut pipeline, &[0.9], 7);
        pipeline.reset();
        let once = run(&mut pipeline, &[0.9], 7);
        pipeline.reset();
        pipeline.reset();
        let twice = run(&mut pipeline, &[0.9], 7);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_continuous_reset_keeps_network_state_by_default() {
        let mut pipeline = SpikingNetworkWithConverters::with_default_converters(
            PassThroughNetwork::new(1),
        );
        pipeline.set_spikes_tracker(true);
        run(&mut pipeline, &[1.0], 5);
        pipeline.reset();
        let tracked = pipeline.spikes().unwrap();
        assert!(!tracked[0][0].is_empty());

        let mut pipeline = SpikingNetworkWithConverters::with_default_converters(
            PassThroughNetwork::new(1),
        )
        .with_network_reset(true);
        pipeline.set_spikes_tracker(true);
        run(&mut pipeline, &[1.0], 5);
        pipeline.reset();
        assert!(pipeline.spikes().unwrap()[0][0].is_empty());
    }

    #[test]
    fn test_quantized_reset_clears_network_state() {
        let mut pipeline = QuantizedSpikingNetworkWithConverters::from_descriptors(
            QuantizedPassThroughNetwork::new(1),
            &ValueToSpikeTrainDescriptor::default(),
            &SpikeTrainToValueDescriptor::default(),
            4,
        )
        .unwrap();
        pipeline.set_spikes_tracker(true);
        run(&mut pipeline, &[1.0], 5);
        assert!(!pipeline.spikes().unwrap()[0][0].is_empty());
        pipeline.reset();
        assert!(pipeline.spikes().unwrap()[0][0].is_empty());
    }

    #[test]
    fn test_plot_mode_is_forwarded() {
        let mut pipeline = SpikingNetworkWithConverters::with_default_converters(
            PassThroughNetwork::new(1),
        );
        assert!(!pipeline.network().plot_mode());
        pipeline.set_plot_mode(true);
        assert!(pipeline.network().plot_mode());
    }
}

mod test_params {
    use super::*;

    #[test]
    fn test_params_round_trip_and_reset() {
        let mut pipeline =
            SpikingNetworkWithConverters::with_default_converters(WeightedNetwork::default())
                .with_network_reset(true);
        let resets_after_construction = pipeline.network().resets;

        run(&mut pipeline, &[0.5], 3);
        pipeline.set_params(&[0.1, 0.2, 0.3]).unwrap();
        assert_eq!(pipeline.params(), vec![0.1, 0.2, 0.3]);
        assert_eq!(pipeline.previous_application_time(), 0.0);
        assert_eq!(pipeline.network().resets, resets_after_construction + 1);
    }

    #[test]
    fn test_setting_current_params_keeps_continuous_outputs() {
        let mut pipeline = SpikingNetworkWithConverters::with_default_converters(
            WeightedNetwork::with_weights(vec![0.5, -0.25, 1.0]),
        );
        let before = run(&mut pipeline, &[0.6], 9);

        let params = pipeline.params();
        pipeline.set_params(&params).unwrap();
        assert_eq!(pipeline.params(), params);
        assert_eq!(run(&mut pipeline, &[0.6], 9), before);
    }

    #[test]
    fn test_setting_current_params_keeps_quantized_outputs() {
        let mut pipeline = QuantizedSpikingNetworkWithConverters::with_default_converters(
            GainNetwork { gain: 0.5 },
            std::num::NonZeroUsize::new(8).unwrap(),
        );
        let before = run(&mut pipeline, &[0.8], 9);

        let params = pipeline.params();
        pipeline.set_params(&params).unwrap();
        assert_eq!(run(&mut pipeline, &[0.8], 9), before);

        // A different gain does change the decoded values
        pipeline.set_params(&[2.0]).unwrap();
        assert_ne!(run(&mut pipeline, &[0.8], 9), before);
    }

    #[test]
    fn test_weights_change_outputs() {
        let mut pipeline = SpikingNetworkWithConverters::with_default_converters(
            WeightedNetwork::with_weights(vec![0.0, 0.0, 0.0]),
        );
        let open = run(&mut pipeline, &[0.6], 5);
        pipeline.set_params(&[-1.0, 0.0, 0.0]).unwrap();
        let gated = run(&mut pipeline, &[0.6], 5);
        assert_ne!(open, gated);
        assert!(gated.iter().all(|output| output == &vec![-1.0]));
    }

    #[test]
    fn test_backwards_time_after_round_trip_does_not_panic() {
        let mut pipeline = QuantizedSpikingNetworkWithConverters::with_default_converters(
            GainNetwork { gain: 1.0 },
            std::num::NonZeroUsize::new(4).unwrap(),
        );
        run(&mut pipeline, &[0.2], 5);
        let params = pipeline.params();
        pipeline.set_params(&params).unwrap();
        run(&mut pipeline, &[0.2], 5);
        let output = pipeline.apply(0.1, &[0.2]);
        assert_eq!(output.len(), 1);
        assert!((-1.0..=1.0).contains(&output[0]));
    }

    #[test]
    fn test_rejected_params_leave_pipeline_untouched() {
        let mut pipeline =
            SpikingNetworkWithConverters::with_default_converters(WeightedNetwork::default());
        run(&mut pipeline, &[0.5], 3);
        let result = pipeline.set_params(&[1.0]);
        assert_eq!(
            result,
            Err(ConfigurationError::dimension_mismatch("weights", 3, 1))
        );
        assert!((pipeline.previous_application_time() - 0.2).abs() < 1e-12);
        assert!(pipeline.params().is_empty());
    }

    #[test]
    fn test_pass_through_has_no_params() {
        let mut pipeline = QuantizedSpikingNetworkWithConverters::with_default_converters(
            QuantizedPassThroughNetwork::new(2),
            std::num::NonZeroUsize::new(16).unwrap(),
        );
        assert!(pipeline.params().is_empty());
        assert!(pipeline.set_params(&[]).is_ok());
        assert!(pipeline.set_params(&[0.0]).is_err());
    }
}

mod test_construction {
    use super::*;

    #[test]
    fn test_converter_counts_must_match_network() {
        let encoders: Vec<Box<dyn ValueToSpikeTrainConverter>> =
            vec![Box::new(UniformValueToSpikeTrainConverter::default())];
        let decoders: Vec<Box<dyn SpikeTrainToValueConverter>> = vec![
            Box::new(AverageFrequencySpikeTrainToValueConverter::default()),
            Box::new(AverageFrequencySpikeTrainToValueConverter::default()),
        ];
        let result = SpikingNetworkWithConverters::new(PassThroughNetwork::new(2), encoders, decoders);
        assert!(matches!(
            result,
            Err(ConfigurationError::DimensionMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_quantized_array_sizes_must_agree() {
        let encoders: Vec<Box<dyn QuantizedValueToSpikeTrainConverter>> = vec![
            Box::new(QuantizedUniformValueToSpikeTrainConverter::new(
                FrequencyRange::default(),
                std::num::NonZeroUsize::new(8).unwrap(),
            )),
            Box::new(QuantizedUniformValueToSpikeTrainConverter::new(
                FrequencyRange::default(),
                std::num::NonZeroUsize::new(16).unwrap(),
            )),
        ];
        let decoders: Vec<Box<dyn QuantizedSpikeTrainToValueConverter>> = vec![
            Box::new(QuantizedAverageFrequencySpikeTrainToValueConverter::default()),
            Box::new(QuantizedAverageFrequencySpikeTrainToValueConverter::default()),
        ];
        let result = QuantizedSpikingNetworkWithConverters::new(
            QuantizedPassThroughNetwork::new(2),
            encoders,
            decoders,
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::DimensionMismatch {
                expected: 8,
                actual: 16,
                ..
            })
        ));
    }

    #[test]
    fn test_descriptors_from_toml() {
        #[derive(serde::Deserialize)]
        struct Section {
            encoder: ValueToSpikeTrainDescriptor,
            decoder: SpikeTrainToValueDescriptor,
        }

        let section: Section = toml::from_str(
            r#"
            [encoder]
            kind = "uniform"
            frequency = { min_frequency = 5.0, max_frequency = 80.0 }

            [decoder]
            kind = "moving_average"
            "#,
        )
        .unwrap();
        assert_eq!(
            section.encoder,
            ValueToSpikeTrainDescriptor::Uniform {
                frequency: FrequencyRange::new(5.0, 80.0).unwrap()
            }
        );
        assert_eq!(section.decoder, SpikeTrainToValueDescriptor::default());
    }

    #[test]
    fn test_descriptor_json_layout() {
        let json = serde_json::to_value(SpikeTrainToValueDescriptor::AverageFrequency {
            frequency: FrequencyRange::default(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "average_frequency",
                "frequency": { "min_frequency": 0.0, "max_frequency": 50.0 }
            })
        );
    }
}
