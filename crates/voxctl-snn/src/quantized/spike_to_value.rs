// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Debug;

use voxctl_controllers::Resettable;

use crate::coding::{window_frequency, FrequencyRange, MovingFrequencyAverage, DEFAULT_MOVING_AVERAGE_WINDOW};
use crate::spike_train::QuantizedSpikeTrain;

/// Decodes the per-bin counts of one window into a real value.
pub trait QuantizedSpikeTrainToValueConverter: Resettable + Debug + Send {
    fn convert(&mut self, spike_train: &QuantizedSpikeTrain, window_size: f64) -> f64;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuantizedAverageFrequencySpikeTrainToValueConverter {
    frequency: FrequencyRange,
}

impl QuantizedAverageFrequencySpikeTrainToValueConverter {
    pub fn new(frequency: FrequencyRange) -> Self {
        Self { frequency }
    }
}

impl QuantizedSpikeTrainToValueConverter for QuantizedAverageFrequencySpikeTrainToValueConverter {
    fn convert(&mut self, spike_train: &QuantizedSpikeTrain, window_size: f64) -> f64 {
        let observed = window_frequency(spike_train.spike_count(), window_size).unwrap_or(0.0);
        self.frequency.to_value(observed)
    }
}

impl Resettable for QuantizedAverageFrequencySpikeTrainToValueConverter {
    fn reset(&mut self) {}
}

#[derive(Debug, Clone)]
pub struct QuantizedMovingAverageSpikeTrainToValueConverter {
    frequency: FrequencyRange,
    average: MovingFrequencyAverage,
}

impl QuantizedMovingAverageSpikeTrainToValueConverter {
    pub fn new(frequency: FrequencyRange, window: usize) -> Self {
        Self {
            frequency,
            average: MovingFrequencyAverage::new(window),
        }
    }

    pub fn window(&self) -> usize {
        self.average.window()
    }
}

impl Default for QuantizedMovingAverageSpikeTrainToValueConverter {
    fn default() -> Self {
        Self::new(FrequencyRange::default(), DEFAULT_MOVING_AVERAGE_WINDOW)
    }
}

impl QuantizedSpikeTrainToValueConverter for QuantizedMovingAverageSpikeTrainToValueConverter {
    fn convert(&mut self, spike_train: &QuantizedSpikeTrain, window_size: f64) -> f64 {
        if let Some(observed) = window_frequency(spike_train.spike_count(), window_size) {
            self.average.record(observed);
        }
        self.frequency.to_value(self.average.mean().unwrap_or(0.0))
    }
}

impl Resettable for QuantizedMovingAverageSpikeTrainToValueConverter {
    fn reset(&mut self) {
        self.average.clear();
    }
}
