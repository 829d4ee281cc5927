// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Core data structures shared by every voxctl crate.
//!
//! - [`Grid`]: a 2D addressable map of optional cell payloads with bounds-aware lookup
//! - [`Direction`]: the four cardinal directions in their fixed evaluation order
//! - [`ConfigurationError`]: the construction-time error type

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod direction;
mod error;
mod grid;

pub use direction::Direction;
pub use error::ConfigurationError;
pub use grid::Grid;
