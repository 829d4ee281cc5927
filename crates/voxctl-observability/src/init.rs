// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for voxctl binaries

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

/// Build the filter for `default_level` with the debug-enabled crates raised to `debug`.
pub fn build_filter(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<EnvFilter> {
    let filter = debug_flags.to_filter_string(default_level);
    EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter: {}", filter))
}

/// Install a console subscriber as the global default.
///
/// # Errors
///
/// Fails if the filter does not parse or a global subscriber is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<()> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(debug_flags.any_enabled())
        .with_file(false)
        .with_line_number(false)
        .with_filter(build_filter(debug_flags, default_level)?);

    Registry::default()
        .with(console_layer)
        .try_init()
        .context("Failed to install global tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-voxctl-snn".to_string()]);
        assert!(build_filter(&flags, "warn").is_ok());
        assert!(build_filter(&flags, "voxctl-config=loud").is_err());
    }

    #[test]
    fn test_second_init_fails() {
        let flags = CrateDebugFlags::default();
        let first = init_logging(&flags, "info");
        let second = init_logging(&flags, "info");
        assert!(first.is_ok());
        assert!(second.is_err());
    }
}
