// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # voxctl-observability
//!
//! Console logging for voxctl binaries, with per-crate debug flags.
//!
//! Every voxctl crate logs under a target equal to its crate name, so
//! `--debug-voxctl-snn` (or `VOXCTL_DEBUG=voxctl-snn`) raises exactly that crate to
//! `debug` while the rest stays at the configured level.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known voxctl crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "voxctl-controllers",
    "voxctl-snn",
    "voxctl-config",
];
