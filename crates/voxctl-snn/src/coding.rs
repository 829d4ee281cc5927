// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Rate Coding
//!
//! Numerics shared by every converter, continuous or quantized.
//!
//! ```text
//! value ∈ [-1, 1]  ──▶  frequency = min + (max - min) × (value + 1) / 2
//! frequency        ──▶  value     = 2 × clamp((frequency - min) / (max - min), 0, 1) - 1
//! ```
//!
//! A regular train of frequency `f` over a window of length `Δt` is generated by a
//! phase accumulator: the phase (fraction of an inter-spike interval already elapsed)
//! grows by `f × Δt` and a spike is placed at every integer crossing.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use voxctl_structures::ConfigurationError;

/// Lowest value a converter encodes; values below are clipped.
pub const MIN_VALUE: f64 = -1.0;
/// Highest value a converter encodes; values above are clipped.
pub const MAX_VALUE: f64 = 1.0;

pub const DEFAULT_MIN_FREQUENCY: f64 = 0.0;
pub const DEFAULT_MAX_FREQUENCY: f64 = 50.0;

/// Spike frequencies (Hz) that the ends of the value range map to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyRange {
    pub min_frequency: f64,
    pub max_frequency: f64,
}

impl Default for FrequencyRange {
    fn default() -> Self {
        Self {
            min_frequency: DEFAULT_MIN_FREQUENCY,
            max_frequency: DEFAULT_MAX_FREQUENCY,
        }
    }
}

impl FrequencyRange {
    /// Create a validated range.
    pub fn new(min_frequency: f64, max_frequency: f64) -> Result<Self, ConfigurationError> {
        let range = Self {
            min_frequency,
            max_frequency,
        };
        range.validate()?;
        Ok(range)
    }

    /// Requires finite bounds with `0 <= min < max`.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.min_frequency.is_finite() || !self.max_frequency.is_finite() {
            return Err(ConfigurationError::InvalidParameter(format!(
                "frequency range [{}, {}] must be finite",
                self.min_frequency, self.max_frequency
            )));
        }
        if self.min_frequency < 0.0 || self.min_frequency >= self.max_frequency {
            return Err(ConfigurationError::InvalidParameter(format!(
                "frequency range [{}, {}] must satisfy 0 <= min < max",
                self.min_frequency, self.max_frequency
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn to_frequency(&self, value: f64) -> f64 {
        let value = if value.is_nan() {
            MIN_VALUE
        } else {
            value.clamp(MIN_VALUE, MAX_VALUE)
        };
        let normalized = (value - MIN_VALUE) / (MAX_VALUE - MIN_VALUE);
        self.min_frequency + (self.max_frequency - self.min_frequency) * normalized
    }

    #[inline]
    pub fn to_value(&self, frequency: f64) -> f64 {
        let span = self.max_frequency - self.min_frequency;
        if span <= 0.0 || frequency.is_nan() {
            return MIN_VALUE;
        }
        let normalized = ((frequency - self.min_frequency) / span).clamp(0.0, 1.0);
        MIN_VALUE + (MAX_VALUE - MIN_VALUE) * normalized
    }
}

/// Advance `phase` over a window and return the phase at its start with the number of
/// spikes emitted, or `None` for degenerate windows and silent trains.
fn advance_phase(frequency: f64, window_size: f64, phase: &mut f64) -> Option<(f64, f64)> {
    if window_size <= 0.0 || frequency <= 0.0 || !window_size.is_finite() {
        return None;
    }
    let initial_phase = *phase;
    let total = initial_phase + frequency * window_size;
    let count = total.floor();
    *phase = total - count;
    Some((initial_phase, count))
}

/// Spike times of a regular train of `frequency` inside `(window_end - window_size, window_end]`.
///
/// `phase` carries the elapsed fraction of the current inter-spike interval in and out of
/// the call; pass a fresh `0.0` for a memoryless train. Degenerate windows and silent
/// trains leave the phase untouched.
pub(crate) fn regular_spike_times(
    frequency: f64,
    window_size: f64,
    window_end: f64,
    phase: &mut f64,
) -> Vec<f64> {
    let Some((initial_phase, count)) = advance_phase(frequency, window_size, phase) else {
        return Vec::new();
    };
    let window_start = window_end - window_size;
    (1..=count as u64)
        .map(|n| (window_start + (n as f64 - initial_phase) / frequency).min(window_end))
        .collect()
}

/// Per-bin counts of the train [`regular_spike_times`] would emit, with the window split
/// into `array_size` equal bins.
///
/// Runs in `O(array_size)` whatever the number of spikes. Spikes on a bin boundary belong
/// to the later bin; counts saturate at `u32::MAX`.
pub(crate) fn regular_spike_counts(
    frequency: f64,
    window_size: f64,
    array_size: usize,
    phase: &mut f64,
) -> Vec<u32> {
    let mut bins = vec![0; array_size];
    let Some((initial_phase, count)) = advance_phase(frequency, window_size, phase) else {
        return bins;
    };
    let spikes_per_bin = frequency * window_size / array_size as f64;
    let mut emitted = 0.0;
    for (bin, slot) in bins.iter_mut().enumerate() {
        // spike n lies before the end of `bin` iff n < initial_phase + (bin + 1) * spikes_per_bin
        let before_end = if bin + 1 == array_size {
            count
        } else {
            ((initial_phase + (bin + 1) as f64 * spikes_per_bin).ceil() - 1.0).clamp(emitted, count)
        };
        *slot = (before_end - emitted).min(u32::MAX as f64) as u32;
        emitted = before_end;
    }
    bins
}

/// Frequency observed over one window, `None` for degenerate windows.
#[inline]
pub(crate) fn window_frequency(spike_count: u64, window_size: f64) -> Option<f64> {
    if window_size > 0.0 && window_size.is_finite() {
        Some(spike_count as f64 / window_size)
    } else {
        None
    }
}

pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 5;

/// Mean of the last `window` frequency estimates.
#[derive(Debug, Clone)]
pub(crate) struct MovingFrequencyAverage {
    window: usize,
    history: VecDeque<f64>,
}

impl MovingFrequencyAverage {
    pub(crate) fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            history: VecDeque::with_capacity(window),
        }
    }

    pub(crate) fn window(&self) -> usize {
        self.window
    }

    pub(crate) fn record(&mut self, frequency: f64) {
        if self.history.len() == self.window {
            self.history.pop_front();
        }
        self.history.push_back(frequency);
    }

    /// Current mean, `None` before the first estimate.
    pub(crate) fn mean(&self) -> Option<f64> {
        if self.history.is_empty() {
            None
        } else {
            Some(self.history.iter().sum::<f64>() / self.history.len() as f64)
        }
    }

    pub(crate) fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_frequency_mapping() {
        let range = FrequencyRange::default();
        assert_eq!(range.to_frequency(-1.0), 0.0);
        assert_eq!(range.to_frequency(0.0), 25.0);
        assert_eq!(range.to_frequency(1.0), 50.0);
        assert_eq!(range.to_frequency(7.0), 50.0);
        assert_eq!(range.to_frequency(f64::NAN), 0.0);

        assert_eq!(range.to_value(0.0), -1.0);
        assert_eq!(range.to_value(25.0), 0.0);
        assert_eq!(range.to_value(500.0), 1.0);
    }

    #[test]
    fn test_range_validation() {
        assert!(FrequencyRange::new(0.0, 50.0).is_ok());
        assert!(FrequencyRange::new(10.0, 10.0).is_err());
        assert!(FrequencyRange::new(-1.0, 10.0).is_err());
        assert!(FrequencyRange::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_memoryless_train_is_regular() {
        let mut phase = 0.0;
        let times = regular_spike_times(10.0, 0.5, 2.0, &mut phase);
        assert_eq!(times.len(), 5);
        for (i, t) in times.iter().enumerate() {
            assert!((t - (1.5 + 0.1 * (i + 1) as f64)).abs() < 1e-12);
        }
        assert!(phase.abs() < 1e-9);
    }

    #[test]
    fn test_phase_carries_across_windows() {
        // 2.5 spikes per window: 2, 3, 2, 3, ...
        let mut phase = 0.0;
        let counts: Vec<usize> = (1..=4)
            .map(|k| regular_spike_times(25.0, 0.1, 0.1 * k as f64, &mut phase).len())
            .collect();
        assert_eq!(counts, vec![2, 3, 2, 3]);

        // Without memory the half spike is lost every time
        let counts: Vec<usize> = (1..=4)
            .map(|k| regular_spike_times(25.0, 0.1, 0.1 * k as f64, &mut 0.0).len())
            .collect();
        assert_eq!(counts, vec![2, 2, 2, 2]);
    }

    #[test]
    fn test_spikes_stay_inside_window() {
        let mut phase = 0.7;
        let times = regular_spike_times(33.0, 0.2, 5.0, &mut phase);
        assert!(!times.is_empty());
        assert!(times.iter().all(|t| *t > 4.8 && *t <= 5.0));
        assert!(times.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_degenerate_windows() {
        let mut phase = 0.3;
        assert!(regular_spike_times(10.0, 0.0, 1.0, &mut phase).is_empty());
        assert!(regular_spike_times(10.0, -1.0, 1.0, &mut phase).is_empty());
        assert!(regular_spike_times(0.0, 1.0, 1.0, &mut phase).is_empty());
        assert_eq!(phase, 0.3);
        assert_eq!(window_frequency(3, 0.0), None);
        assert_eq!(window_frequency(3, 0.5), Some(6.0));
    }

    #[test]
    fn test_counts_match_binned_times() {
        for (frequency, window_size, window_end, start_phase) in
            [(50.0, 0.25, 1.0, 0.0), (33.0, 0.2, 5.0, 0.55), (7.0, 1.0, 3.0, 0.4)]
        {
            let mut times_phase = start_phase;
            let times = regular_spike_times(frequency, window_size, window_end, &mut times_phase);
            let mut expected = vec![0u32; 8];
            for t in times {
                let offset = (t - (window_end - window_size)) / window_size;
                expected[((offset * 8.0).floor() as usize).min(7)] += 1;
            }

            let mut counts_phase = start_phase;
            let counts = regular_spike_counts(frequency, window_size, 8, &mut counts_phase);
            assert_eq!(counts, expected, "{} Hz over {}", frequency, window_size);
            assert_eq!(counts_phase, times_phase);
        }
    }

    #[test]
    fn test_counts_of_huge_window_do_not_materialize_spikes() {
        let mut phase = 0.0;
        let counts = regular_spike_counts(50.0, 1e8, 16, &mut phase);
        let total: u64 = counts.iter().map(|c| u64::from(*c)).sum();
        assert_eq!(total, 5_000_000_000);
        // bin boundaries fall exactly on spikes, which move to the later bin
        assert_eq!(counts[0], 312_499_999);
        assert!(counts[1..15].iter().all(|c| *c == 312_500_000));
        assert_eq!(counts[15], 312_500_001);

        let mut phase = 0.3;
        assert_eq!(regular_spike_counts(10.0, -1.0, 4, &mut phase), vec![0; 4]);
        assert_eq!(phase, 0.3);
    }

    #[test]
    fn test_moving_average_window() {
        let mut average = MovingFrequencyAverage::new(2);
        assert_eq!(average.mean(), None);
        average.record(10.0);
        average.record(20.0);
        average.record(40.0);
        assert_eq!(average.mean(), Some(30.0));
        average.clear();
        assert_eq!(average.mean(), None);
        assert_eq!(MovingFrequencyAverage::new(0).window(), 1);
    }
}
