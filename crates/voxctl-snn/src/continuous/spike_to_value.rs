// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Debug;

use voxctl_controllers::Resettable;

use crate::coding::{window_frequency, FrequencyRange, MovingFrequencyAverage};
use crate::spike_train::SpikeTrain;

/// Decodes the spike train of one window into a real value.
pub trait SpikeTrainToValueConverter: Resettable + Debug + Send {
    /// Value for `spike_train`, whose spikes all lie in a window of length `window_size`.
    fn convert(&mut self, spike_train: &SpikeTrain, window_size: f64) -> f64;
}

/// Value of the spike frequency observed in the current window alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AverageFrequencySpikeTrainToValueConverter {
    frequency: FrequencyRange,
}

impl AverageFrequencySpikeTrainToValueConverter {
    pub fn new(frequency: FrequencyRange) -> Self {
        Self { frequency }
    }

    pub fn frequency(&self) -> FrequencyRange {
        self.frequency
    }
}

impl SpikeTrainToValueConverter for AverageFrequencySpikeTrainToValueConverter {
    fn convert(&mut self, spike_train: &SpikeTrain, window_size: f64) -> f64 {
        let observed = window_frequency(spike_train.len() as u64, window_size).unwrap_or(0.0);
        self.frequency.to_value(observed)
    }
}

impl Resettable for AverageFrequencySpikeTrainToValueConverter {
    fn reset(&mut self) {}
}

/// Value of the mean frequency over the last `window` windows.
#[derive(Debug, Clone)]
pub struct MovingAverageSpikeTrainToValueConverter {
    frequency: FrequencyRange,
    average: MovingFrequencyAverage,
}

impl MovingAverageSpikeTrainToValueConverter {
    pub fn new(frequency: FrequencyRange, window: usize) -> Self {
        Self {
            frequency,
            average: MovingFrequencyAverage::new(window),
        }
    }

    pub fn frequency(&self) -> FrequencyRange {
        self.frequency
    }

    pub fn window(&self) -> usize {
        self.average.window()
    }
}

impl Default for MovingAverageSpikeTrainToValueConverter {
    fn default() -> Self {
        Self::new(
            FrequencyRange::default(),
            crate::coding::DEFAULT_MOVING_AVERAGE_WINDOW,
        )
    }
}

impl SpikeTrainToValueConverter for MovingAverageSpikeTrainToValueConverter {
    fn convert(&mut self, spike_train: &SpikeTrain, window_size: f64) -> f64 {
        if let Some(observed) = window_frequency(spike_train.len() as u64, window_size) {
            self.average.record(observed);
        }
        self.frequency.to_value(self.average.mean().unwrap_or(0.0))
    }
}

impl Resettable for MovingAverageSpikeTrainToValueConverter {
    fn reset(&mut self) {
        self.average.clear();
    }
}
