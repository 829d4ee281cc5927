// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # voxctl controllers
//!
//! Per-timestep controllers for grids of sensing voxels.
//!
//! - **Functions**: the [`TimedRealFunction`] contract, plus the [`Resettable`] and
//!   [`Parametrized`] capabilities
//! - **Controllers**: the [`Controller`] contract and [`DistributedSensing`], where every
//!   voxel runs its own function on local sensor readings and the signals its four
//!   neighbors emitted at the previous step

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target used by every trace emitted from this crate
pub(crate) const LOG_TARGET: &str = "voxctl-controllers";

pub mod controller;
pub mod distributed;
pub mod function;

pub use controller::{Controller, SensingVoxel};
pub use distributed::DistributedSensing;
pub use function::{
    CellFunction, ClosureFunction, Parametrized, Resettable, ResettableFunction,
    TimedRealFunction,
};
