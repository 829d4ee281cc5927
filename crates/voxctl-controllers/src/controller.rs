// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use voxctl_structures::Grid;

use crate::function::Resettable;

/// A voxel that carries sensors.
///
/// Readings are reported sensor by sensor; each sensor contributes as many values as
/// it has domains.
pub trait SensingVoxel {
    /// Number of values reported by each attached sensor, in sensor order.
    fn sensor_domains(&self) -> Vec<usize>;

    /// Current readings, concatenated in sensor order.
    fn sensor_readings(&self) -> Vec<f64>;

    fn n_of_sensor_readings(&self) -> usize {
        self.sensor_domains().iter().sum()
    }
}

/// Computes one control signal per voxel, once per simulation step.
pub trait Controller<V>: Resettable {
    /// Control signals for the voxels of `voxels`; positions without a voxel stay empty.
    fn compute_control_signals(&mut self, t: f64, voxels: &Grid<V>) -> Grid<f64>;
}
