// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Timed Transfer Functions
//!
//! A [`TimedRealFunction`] maps `(time, input vector)` to an output vector and may keep
//! internal state between calls. Whether that state can be cleared is an explicit
//! capability: functions that implement [`Resettable`] are stored as
//! [`CellFunction::Resettable`], everything else as [`CellFunction::Stateless`]. The
//! choice is made once, when the function is handed to a controller.

use std::fmt::{Debug, Formatter};

use voxctl_structures::ConfigurationError;

/// A function of time and a real vector, with fixed input and output sizes.
pub trait TimedRealFunction: Debug + Send {
    /// Evaluate at time `t`. `input.len()` must equal [`Self::input_dimension`], and the
    /// result has [`Self::output_dimension`] elements.
    fn apply(&mut self, t: f64, input: &[f64]) -> Vec<f64>;

    fn input_dimension(&self) -> usize;

    fn output_dimension(&self) -> usize;
}

/// Internal state that can be restored to its just-constructed value.
pub trait Resettable {
    fn reset(&mut self);
}

/// Exposes a flat parameter vector to an external optimizer.
pub trait Parametrized {
    fn params(&self) -> Vec<f64>;

    /// Replace all parameters. The slice must have the same length as [`Self::params`].
    fn set_params(&mut self, params: &[f64]) -> Result<(), ConfigurationError>;
}

/// A transfer function that also carries resettable state.
pub trait ResettableFunction: TimedRealFunction + Resettable {}

impl<T: TimedRealFunction + Resettable + ?Sized> ResettableFunction for T {}

/// Transfer function owned by one grid cell.
#[derive(Debug)]
pub enum CellFunction {
    Stateless(Box<dyn TimedRealFunction>),
    Resettable(Box<dyn ResettableFunction>),
}

impl CellFunction {
    pub fn stateless(function: impl TimedRealFunction + 'static) -> Self {
        CellFunction::Stateless(Box::new(function))
    }

    pub fn resettable(function: impl ResettableFunction + 'static) -> Self {
        CellFunction::Resettable(Box::new(function))
    }

    #[inline]
    pub fn apply(&mut self, t: f64, input: &[f64]) -> Vec<f64> {
        match self {
            CellFunction::Stateless(f) => f.apply(t, input),
            CellFunction::Resettable(f) => f.apply(t, input),
        }
    }

    pub fn input_dimension(&self) -> usize {
        match self {
            CellFunction::Stateless(f) => f.input_dimension(),
            CellFunction::Resettable(f) => f.input_dimension(),
        }
    }

    pub fn output_dimension(&self) -> usize {
        match self {
            CellFunction::Stateless(f) => f.output_dimension(),
            CellFunction::Resettable(f) => f.output_dimension(),
        }
    }

    pub fn is_resettable(&self) -> bool {
        matches!(self, CellFunction::Resettable(_))
    }

    /// Reset the wrapped function if it has the capability; no-op otherwise.
    pub fn reset(&mut self) {
        if let CellFunction::Resettable(f) = self {
            f.reset();
        }
    }
}

type BoxedClosure = Box<dyn FnMut(f64, &[f64]) -> Vec<f64> + Send>;

/// [`TimedRealFunction`] built from a closure and declared dimensions.
pub struct ClosureFunction {
    function: BoxedClosure,
    input_dimension: usize,
    output_dimension: usize,
}

impl ClosureFunction {
    pub fn new<F>(input_dimension: usize, output_dimension: usize, function: F) -> Self
    where
        F: FnMut(f64, &[f64]) -> Vec<f64> + Send + 'static,
    {
        Self {
            function: Box::new(function),
            input_dimension,
            output_dimension,
        }
    }

    /// Function that ignores time.
    pub fn timeless<F>(input_dimension: usize, output_dimension: usize, mut function: F) -> Self
    where
        F: FnMut(&[f64]) -> Vec<f64> + Send + 'static,
    {
        Self::new(input_dimension, output_dimension, move |_, input| {
            function(input)
        })
    }

    /// Function that always returns `output_dimension` zeros.
    pub fn zeros(input_dimension: usize, output_dimension: usize) -> Self {
        Self::new(input_dimension, output_dimension, move |_, _| {
            vec![0.0; output_dimension]
        })
    }
}

impl Debug for ClosureFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureFunction")
            .field("input_dimension", &self.input_dimension)
            .field("output_dimension", &self.output_dimension)
            .finish_non_exhaustive()
    }
}

impl TimedRealFunction for ClosureFunction {
    fn apply(&mut self, t: f64, input: &[f64]) -> Vec<f64> {
        (self.function)(t, input)
    }

    fn input_dimension(&self) -> usize {
        self.input_dimension
    }

    fn output_dimension(&self) -> usize {
        self.output_dimension
    }
}
