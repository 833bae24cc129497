// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for Skiform

pub mod reporter;

pub use reporter::Reporter;

use crate::config::{Configuration, EquipmentKind};
use anyhow::{Context, Result};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "skiform=debug" } else { "skiform=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Read a configuration file, or fall back to the preset for `kind`
pub fn load_configuration(path: Option<&Path>, kind: Option<EquipmentKind>) -> Result<Configuration> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read configuration: {}", path.display()))?;
            Configuration::from_json(&json)
                .with_context(|| format!("Failed to parse configuration: {}", path.display()))
        }
        None => Ok(kind.map(Configuration::preset).unwrap_or_default()),
    }
}
