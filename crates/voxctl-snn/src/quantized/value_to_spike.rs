// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Debug;
use std::num::NonZeroUsize;

use voxctl_controllers::Resettable;

use crate::coding::{regular_spike_counts, FrequencyRange};
use crate::spike_train::QuantizedSpikeTrain;

/// Bins per window when none is configured.
pub const DEFAULT_ARRAY_SIZE: NonZeroUsize = match NonZeroUsize::new(16) {
    Some(size) => size,
    None => unreachable!(),
};

/// Encodes one real value per window into per-bin spike counts.
pub trait QuantizedValueToSpikeTrainConverter: Resettable + Debug + Send {
    /// Counts for `value` over `(window_end - window_size, window_end]`, always
    /// [`Self::array_size`] bins long. A non-positive `window_size` yields all zeros.
    fn convert(&mut self, value: f64, window_size: f64, window_end: f64) -> QuantizedSpikeTrain;

    fn array_size(&self) -> usize;
}

fn quantize(frequency: f64, array_size: NonZeroUsize, window_size: f64, phase: &mut f64) -> QuantizedSpikeTrain {
    QuantizedSpikeTrain::from_bins(regular_spike_counts(
        frequency,
        window_size,
        array_size.get(),
        phase,
    ))
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedUniformValueToSpikeTrainConverter {
    frequency: FrequencyRange,
    array_size: NonZeroUsize,
}

impl QuantizedUniformValueToSpikeTrainConverter {
    pub fn new(frequency: FrequencyRange, array_size: NonZeroUsize) -> Self {
        Self {
            frequency,
            array_size,
        }
    }

    pub fn frequency(&self) -> FrequencyRange {
        self.frequency
    }
}

impl Default for QuantizedUniformValueToSpikeTrainConverter {
    fn default() -> Self {
        Self::new(FrequencyRange::default(), DEFAULT_ARRAY_SIZE)
    }
}

impl QuantizedValueToSpikeTrainConverter for QuantizedUniformValueToSpikeTrainConverter {
    fn convert(&mut self, value: f64, window_size: f64, _window_end: f64) -> QuantizedSpikeTrain {
        let frequency = self.frequency.to_frequency(value);
        quantize(frequency, self.array_size, window_size, &mut 0.0)
    }

    fn array_size(&self) -> usize {
        self.array_size.get()
    }
}

impl Resettable for QuantizedUniformValueToSpikeTrainConverter {
    fn reset(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedUniformWithMemoryValueToSpikeTrainConverter {
    frequency: FrequencyRange,
    array_size: NonZeroUsize,
    phase: f64,
}

impl QuantizedUniformWithMemoryValueToSpikeTrainConverter {
    pub fn new(frequency: FrequencyRange, array_size: NonZeroUsize) -> Self {
        Self {
            frequency,
            array_size,
            phase: 0.0,
        }
    }

    pub fn frequency(&self) -> FrequencyRange {
        self.frequency
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }
}

impl Default for QuantizedUniformWithMemoryValueToSpikeTrainConverter {
    fn default() -> Self {
        Self::new(FrequencyRange::default(), DEFAULT_ARRAY_SIZE)
    }
}

impl QuantizedValueToSpikeTrainConverter for QuantizedUniformWithMemoryValueToSpikeTrainConverter {
    fn convert(&mut self, value: f64, window_size: f64, _window_end: f64) -> QuantizedSpikeTrain {
        let frequency = self.frequency.to_frequency(value);
        quantize(frequency, self.array_size, window_size, &mut self.phase)
    }

    fn array_size(&self) -> usize {
        self.array_size.get()
    }
}

impl Resettable for QuantizedUniformWithMemoryValueToSpikeTrainConverter {
    fn reset(&mut self) {
        self.phase = 0.0;
    }
}
