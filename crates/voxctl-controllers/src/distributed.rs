// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Distributed Sensing Controller
//!
//! Cellular-automaton-like controller: every voxel owns a transfer function and a
//! state vector of `state_size` values that it broadcasts to its four cardinal
//! neighbors.
//!
//! ## Step Semantics
//!
//! ```text
//! For every occupied cell (x, y):
//!     neighbors = last[N] ++ last[E] ++ last[S] ++ last[W]     (zeros if absent)
//!     input     = sensor_readings ++ neighbors
//!     output    = f(x, y)(t, input)                            (zeros if no f)
//!     signal    = output[0]
//!     current   = output[1..=state_size]
//! -- barrier --
//! For every occupied cell:
//!     last = current
//! ```
//!
//! Only `last` is ever read while functions are evaluated, so the result does not
//! depend on the order in which cells are visited.

use tracing::{debug, trace, warn};
use voxctl_structures::{ConfigurationError, Direction, Grid};

use crate::controller::{Controller, SensingVoxel};
use crate::function::{CellFunction, ClosureFunction, Resettable};
use crate::LOG_TARGET;

#[derive(Debug)]
pub struct DistributedSensing {
    state_size: usize,
    n_of_inputs: Grid<usize>,
    n_of_outputs: Grid<usize>,
    functions: Grid<CellFunction>,
    last_signals: Grid<Vec<f64>>,
    current_signals: Grid<Vec<f64>>,
}

impl DistributedSensing {
    /// Input size of the function of `voxel`: its sensor readings plus one state vector per direction.
    pub fn n_of_inputs_for<V: SensingVoxel + ?Sized>(voxel: &V, state_size: usize) -> usize {
        state_size * Direction::COUNT + voxel.n_of_sensor_readings()
    }

    /// Output size of every cell function: the control signal plus the new state.
    pub fn n_of_outputs_for(state_size: usize) -> usize {
        1 + state_size
    }

    /// Controller for the topology of `voxels`, with an all-zero function at every voxel.
    pub fn new<V: SensingVoxel>(voxels: &Grid<V>, state_size: usize) -> Self {
        let n_of_inputs = voxels.map(|_, _, v| Self::n_of_inputs_for(v, state_size));
        let n_of_outputs = voxels.map(|_, _, _| Self::n_of_outputs_for(state_size));
        let functions = n_of_inputs.map(|_, _, n_in| {
            CellFunction::stateless(ClosureFunction::zeros(
                *n_in,
                Self::n_of_outputs_for(state_size),
            ))
        });
        Self::assemble(state_size, n_of_inputs, n_of_outputs, functions)
    }

    /// Controller from explicit size grids and functions.
    ///
    /// A cell is occupied when it has an entry in `n_of_inputs`. The function grid may be
    /// sparser than the size grids; cells without a function emit zeros.
    ///
    /// # Errors
    ///
    /// - `GridShapeMismatch` if the three grids differ in shape
    /// - `EmptyCell` if the size grids disagree on occupancy, or a function sits on an empty cell
    /// - `DimensionMismatch` if a size or a function dimension does not fit `state_size`
    pub fn from_parts(
        state_size: usize,
        n_of_inputs: Grid<usize>,
        n_of_outputs: Grid<usize>,
        functions: Grid<CellFunction>,
    ) -> Result<Self, ConfigurationError> {
        n_of_inputs.check_same_shape(&n_of_outputs, "output size grid")?;
        n_of_inputs.check_same_shape(&functions, "function grid")?;

        for (x, y, n_in) in n_of_inputs.entries() {
            let n_out = n_of_outputs.get(x, y);
            match (n_in, n_out) {
                (Some(n_in), Some(n_out)) => {
                    Self::check_sizes(state_size, *n_in, *n_out)?;
                }
                (None, None) => {}
                _ => return Err(ConfigurationError::EmptyCell { x, y }),
            }
        }

        for (x, y, function) in functions.occupied() {
            Self::check_function(&n_of_inputs, &n_of_outputs, x, y, function)?;
        }

        Ok(Self::assemble(state_size, n_of_inputs, n_of_outputs, functions))
    }

    fn assemble(
        state_size: usize,
        n_of_inputs: Grid<usize>,
        n_of_outputs: Grid<usize>,
        functions: Grid<CellFunction>,
    ) -> Self {
        let last_signals = n_of_inputs.map(|_, _, _| vec![0.0; state_size]);
        let current_signals = n_of_inputs.map(|_, _, _| vec![0.0; state_size]);
        debug!(
            target: LOG_TARGET,
            "Created distributed controller: {}x{} grid, {} cells, {} functions, state size {}",
            n_of_inputs.width(),
            n_of_inputs.height(),
            n_of_inputs.occupied_count(),
            functions.occupied_count(),
            state_size
        );
        Self {
            state_size,
            n_of_inputs,
            n_of_outputs,
            functions,
            last_signals,
            current_signals,
        }
    }

    fn check_sizes(state_size: usize, n_in: usize, n_out: usize) -> Result<(), ConfigurationError> {
        let neighbor_inputs = state_size * Direction::COUNT;
        if n_in < neighbor_inputs {
            return Err(ConfigurationError::InvalidParameter(format!(
                "cell input size {} cannot hold {} neighbor signals",
                n_in, neighbor_inputs
            )));
        }
        let expected_out = Self::n_of_outputs_for(state_size);
        if n_out != expected_out {
            return Err(ConfigurationError::dimension_mismatch(
                "cell output size",
                expected_out,
                n_out,
            ));
        }
        Ok(())
    }

    fn check_function(
        n_of_inputs: &Grid<usize>,
        n_of_outputs: &Grid<usize>,
        x: i32,
        y: i32,
        function: &CellFunction,
    ) -> Result<(), ConfigurationError> {
        let (n_in, n_out) = match (n_of_inputs.get(x, y), n_of_outputs.get(x, y)) {
            (Some(n_in), Some(n_out)) => (*n_in, *n_out),
            _ if !n_of_inputs.in_bounds(x, y) => {
                return Err(ConfigurationError::OutOfBounds {
                    x,
                    y,
                    width: n_of_inputs.width(),
                    height: n_of_inputs.height(),
                })
            }
            _ => return Err(ConfigurationError::EmptyCell { x, y }),
        };
        if function.input_dimension() != n_in {
            return Err(ConfigurationError::dimension_mismatch(
                format!("input of function at ({}, {})", x, y),
                n_in,
                function.input_dimension(),
            ));
        }
        if function.output_dimension() != n_out {
            return Err(ConfigurationError::dimension_mismatch(
                format!("output of function at ({}, {})", x, y),
                n_out,
                function.output_dimension(),
            ));
        }
        Ok(())
    }

    //region Properties

    pub fn state_size(&self) -> usize {
        self.state_size
    }

    pub fn n_of_inputs(&self, x: i32, y: i32) -> Option<usize> {
        self.n_of_inputs.get(x, y).copied()
    }

    pub fn n_of_outputs(&self, x: i32, y: i32) -> Option<usize> {
        self.n_of_outputs.get(x, y).copied()
    }

    pub fn functions(&self) -> &Grid<CellFunction> {
        &self.functions
    }

    pub fn function_mut(&mut self, x: i32, y: i32) -> Option<&mut CellFunction> {
        self.functions.get_mut(x, y)
    }

    /// Replace the function of an occupied cell, checking its dimensions.
    pub fn set_function(
        &mut self,
        x: i32,
        y: i32,
        function: CellFunction,
    ) -> Result<Option<CellFunction>, ConfigurationError> {
        Self::check_function(&self.n_of_inputs, &self.n_of_outputs, x, y, &function)?;
        self.functions.set(x, y, Some(function))
    }

    /// Detach the function of a cell. The cell keeps emitting zeros.
    pub fn clear_function(&mut self, x: i32, y: i32) -> Result<Option<CellFunction>, ConfigurationError> {
        self.functions.set(x, y, None)
    }

    /// State the cell broadcast at the end of the previous step.
    pub fn last_signals(&self, x: i32, y: i32) -> Option<&[f64]> {
        self.last_signals.get(x, y).map(Vec::as_slice)
    }

    /// Mutable access to the previous-step state, for perturbing a running controller.
    pub fn last_signals_mut(&mut self, x: i32, y: i32) -> Option<&mut [f64]> {
        self.last_signals.get_mut(x, y).map(Vec::as_mut_slice)
    }

    //endregion

    /// Previous-step states of the four neighbors of `(x, y)`, in [`Direction::ALL`] order.
    fn neighbor_signals(last_signals: &Grid<Vec<f64>>, state_size: usize, x: i32, y: i32) -> Vec<f64> {
        let mut values = vec![0.0; state_size * Direction::COUNT];
        if state_size == 0 {
            return values;
        }
        for (chunk, dir) in values.chunks_exact_mut(state_size).zip(Direction::ALL) {
            if let Some(signals) = last_signals.neighbor(x, y, dir) {
                chunk.copy_from_slice(signals);
            }
        }
        values
    }
}

impl<V: SensingVoxel> Controller<V> for DistributedSensing {
    fn compute_control_signals(&mut self, t: f64, voxels: &Grid<V>) -> Grid<f64> {
        let state_size = self.state_size;
        let n_of_inputs = &self.n_of_inputs;
        let last_signals = &self.last_signals;
        let functions = &mut self.functions;
        let current_signals = &mut self.current_signals;

        let control_signals = voxels.filter_map(|x, y, voxel| {
            let Some(current) = current_signals.get_mut(x, y) else {
                warn!(
                    target: LOG_TARGET,
                    "Skipping voxel at ({}, {}): no controller cell at that position", x, y
                );
                return None;
            };

            let mut inputs = voxel.sensor_readings();
            if let Some(&n_in) = n_of_inputs.get(x, y) {
                let n_of_readings = n_in.saturating_sub(state_size * Direction::COUNT);
                if inputs.len() != n_of_readings {
                    warn!(
                        target: LOG_TARGET,
                        "Voxel at ({}, {}) reported {} sensor readings instead of {}, padding or truncating",
                        x,
                        y,
                        inputs.len(),
                        n_of_readings
                    );
                    inputs.resize(n_of_readings, 0.0);
                }
            }
            inputs.extend(Self::neighbor_signals(last_signals, state_size, x, y));

            let outputs = match functions.get_mut(x, y) {
                Some(function) => function.apply(t, &inputs),
                None => vec![0.0; 1 + state_size],
            };

            for (state, value) in current.iter_mut().zip(outputs.iter().skip(1)) {
                *state = *value;
            }
            Some(outputs.first().copied().unwrap_or(0.0))
        });

        // Barrier: every cell has read the previous states, publish the new ones
        for (x, y, _) in voxels.occupied() {
            if let (Some(last), Some(current)) =
                (self.last_signals.get_mut(x, y), self.current_signals.get(x, y))
            {
                last.copy_from_slice(current);
            }
        }

        trace!(
            target: LOG_TARGET,
            "t={}: computed {} control signals",
            t,
            control_signals.occupied_count()
        );
        control_signals
    }
}

impl Resettable for DistributedSensing {
    fn reset(&mut self) {
        for signals in self.last_signals.values_mut() {
            signals.fill(0.0);
        }
        for signals in self.current_signals.values_mut() {
            signals.fill(0.0);
        }
        for function in self.functions.values_mut() {
            function.reset();
        }
        debug!(target: LOG_TARGET, "Distributed controller reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_signals_order_and_edges() {
        // 3x1 row: left=1, middle=2, right=3
        let last = Grid::from_fn(3, 1, |x, _| Some(vec![(x + 1) as f64]));

        // N, E, S, W
        assert_eq!(
            DistributedSensing::neighbor_signals(&last, 1, 1, 0),
            vec![0.0, 3.0, 0.0, 1.0]
        );
        assert_eq!(
            DistributedSensing::neighbor_signals(&last, 1, 0, 0),
            vec![0.0, 2.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_zero_state_size_gives_empty_neighbor_signals() {
        let last: Grid<Vec<f64>> = Grid::from_fn(2, 2, |_, _| Some(Vec::new()));
        assert!(DistributedSensing::neighbor_signals(&last, 0, 0, 0).is_empty());
    }

    #[test]
    fn test_size_helpers() {
        assert_eq!(DistributedSensing::n_of_outputs_for(0), 1);
        assert_eq!(DistributedSensing::n_of_outputs_for(3), 4);
    }
}
