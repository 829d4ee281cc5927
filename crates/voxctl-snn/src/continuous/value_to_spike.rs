// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Debug;

use voxctl_controllers::Resettable;

use crate::coding::{regular_spike_times, FrequencyRange};
use crate::spike_train::SpikeTrain;

/// Encodes one real value per window into a spike train.
pub trait ValueToSpikeTrainConverter: Resettable + Debug + Send {
    /// Spikes for `value` inside `(window_end - window_size, window_end]`.
    ///
    /// A non-positive `window_size` yields an empty train and leaves any memory untouched.
    fn convert(&mut self, value: f64, window_size: f64, window_end: f64) -> SpikeTrain;
}

/// Regular train at the value's frequency, restarted in every window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformValueToSpikeTrainConverter {
    frequency: FrequencyRange,
}

impl UniformValueToSpikeTrainConverter {
    pub fn new(frequency: FrequencyRange) -> Self {
        Self { frequency }
    }

    pub fn frequency(&self) -> FrequencyRange {
        self.frequency
    }
}

impl ValueToSpikeTrainConverter for UniformValueToSpikeTrainConverter {
    fn convert(&mut self, value: f64, window_size: f64, window_end: f64) -> SpikeTrain {
        let frequency = self.frequency.to_frequency(value);
        SpikeTrain::from(regular_spike_times(frequency, window_size, window_end, &mut 0.0))
    }
}

impl Resettable for UniformValueToSpikeTrainConverter {
    fn reset(&mut self) {}
}

/// Regular train whose phase carries over from one window to the next, so that short
/// windows do not lose the fractional spike.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformWithMemoryValueToSpikeTrainConverter {
    frequency: FrequencyRange,
    phase: f64,
}

impl UniformWithMemoryValueToSpikeTrainConverter {
    pub fn new(frequency: FrequencyRange) -> Self {
        Self {
            frequency,
            phase: 0.0,
        }
    }

    pub fn frequency(&self) -> FrequencyRange {
        self.frequency
    }

    /// Fraction of the current inter-spike interval already elapsed, in `[0, 1)`.
    pub fn phase(&self) -> f64 {
        self.phase
    }
}

impl ValueToSpikeTrainConverter for UniformWithMemoryValueToSpikeTrainConverter {
    fn convert(&mut self, value: f64, window_size: f64, window_end: f64) -> SpikeTrain {
        let frequency = self.frequency.to_frequency(value);
        SpikeTrain::from(regular_spike_times(
            frequency,
            window_size,
            window_end,
            &mut self.phase,
        ))
    }
}

impl Resettable for UniformWithMemoryValueToSpikeTrainConverter {
    fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_spike_count_follows_value() {
        let mut converter = UniformValueToSpikeTrainConverter::default();
        assert_eq!(converter.convert(1.0, 1.0, 1.0).len(), 50);
        assert_eq!(converter.convert(0.0, 1.0, 2.0).len(), 25);
        assert!(converter.convert(-1.0, 1.0, 3.0).is_empty());
    }

    #[test]
    fn test_uniform_spikes_inside_window() {
        let mut converter = UniformValueToSpikeTrainConverter::default();
        let train = converter.convert(0.5, 0.2, 3.0);
        assert!(!train.is_empty());
        assert!(train.times().iter().all(|t| *t > 2.8 && *t <= 3.0));
    }

    #[test]
    fn test_memory_recovers_fractional_spikes() {
        // 37.5 Hz over 0.02 s windows is 0.75 spikes per window
        let mut memoryless = UniformValueToSpikeTrainConverter::default();
        let mut with_memory = UniformWithMemoryValueToSpikeTrainConverter::default();
        let mut plain = 0;
        let mut remembered = 0;
        for k in 1..=100 {
            let end = 0.02 * k as f64;
            plain += memoryless.convert(0.5, 0.02, end).len();
            remembered += with_memory.convert(0.5, 0.02, end).len();
        }
        assert_eq!(plain, 0);
        assert!((74..=76).contains(&remembered));
    }

    #[test]
    fn test_degenerate_window_keeps_memory() {
        let mut converter = UniformWithMemoryValueToSpikeTrainConverter::default();
        converter.convert(0.5, 0.01, 0.01);
        let phase = converter.phase();
        assert!(phase > 0.0);
        assert!(converter.convert(0.5, 0.0, 0.01).is_empty());
        assert_eq!(converter.phase(), phase);
        converter.reset();
        assert_eq!(converter.phase(), 0.0);
    }
}
