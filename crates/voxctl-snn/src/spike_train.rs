// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Spike times of one channel within one window, ascending and without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpikeTrain {
    times: Vec<f64>,
}

impl SpikeTrain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary spike times. NaNs are dropped, the rest is sorted and deduplicated.
    pub fn from_times(times: impl IntoIterator<Item = f64>) -> Self {
        let mut times: Vec<f64> = times.into_iter().filter(|t| !t.is_nan()).collect();
        times.sort_by(f64::total_cmp);
        times.dedup();
        Self { times }
    }

    /// Insert a spike, keeping the order. Returns `false` if it was already present or NaN.
    pub fn insert(&mut self, time: f64) -> bool {
        if time.is_nan() {
            return false;
        }
        match self.times.binary_search_by(|probe| probe.total_cmp(&time)) {
            Ok(_) => false,
            Err(index) => {
                self.times.insert(index, time);
                true
            }
        }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn first(&self) -> Option<f64> {
        self.times.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.times.last().copied()
    }

    /// Number of spikes in `(from, to]`.
    pub fn count_between(&self, from: f64, to: f64) -> usize {
        self.times.iter().filter(|t| **t > from && **t <= to).count()
    }
}

impl From<Vec<f64>> for SpikeTrain {
    fn from(times: Vec<f64>) -> Self {
        Self::from_times(times)
    }
}

/// Per-bin spike counts of one channel: the window is split into `len()` equal bins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuantizedSpikeTrain {
    bins: Vec<u32>,
}

impl QuantizedSpikeTrain {
    /// A silent train of `array_size` bins.
    pub fn new(array_size: usize) -> Self {
        Self {
            bins: vec![0; array_size],
        }
    }

    pub fn from_bins(bins: Vec<u32>) -> Self {
        Self { bins }
    }

    pub fn bins(&self) -> &[u32] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn spike_count(&self) -> u64 {
        self.bins.iter().map(|c| u64::from(*c)).sum()
    }

    /// Add one spike to `bin`. Out-of-range bins are ignored.
    pub fn record(&mut self, bin: usize) {
        if let Some(count) = self.bins.get_mut(bin) {
            *count = count.saturating_add(1);
        }
    }
}
