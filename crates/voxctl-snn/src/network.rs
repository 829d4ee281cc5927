// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Seams to the opaque spiking network wrapped by a pipeline.
//!
//! Network dynamics are not modelled here. A network only has to turn input spike
//! trains into output spike trains for the window ending at `t`, expose its parameters,
//! and be resettable. Plotting and spike tracking are optional diagnostics.

use std::fmt::Debug;

use voxctl_controllers::{Parametrized, Resettable};

use crate::spike_train::{QuantizedSpikeTrain, SpikeTrain};

/// Recorded spike times, indexed by layer then neuron.
pub type SpikeHistory = Vec<Vec<Vec<f64>>>;

/// Network operating on continuous-time spike trains.
pub trait SpikingNetwork: Parametrized + Resettable + Debug + Send {
    /// Output trains for the window ending at `t`, one per output neuron.
    fn apply(&mut self, t: f64, inputs: &[SpikeTrain]) -> Vec<SpikeTrain>;

    fn input_dimension(&self) -> usize;

    fn output_dimension(&self) -> usize;

    fn set_plot_mode(&mut self, _plot_mode: bool) {}

    fn set_spikes_tracker(&mut self, _enabled: bool) {}

    /// Spikes recorded while tracking is enabled, if the network records any.
    fn spikes(&self) -> Option<&SpikeHistory> {
        None
    }
}

/// Network operating on per-bin spike counts.
pub trait QuantizedSpikingNetwork: Parametrized + Resettable + Debug + Send {
    fn apply(&mut self, t: f64, inputs: &[QuantizedSpikeTrain]) -> Vec<QuantizedSpikeTrain>;

    fn input_dimension(&self) -> usize;

    fn output_dimension(&self) -> usize;

    fn set_plot_mode(&mut self, _plot_mode: bool) {}

    fn set_spikes_tracker(&mut self, _enabled: bool) {}

    fn spikes(&self) -> Option<&SpikeHistory> {
        None
    }
}
