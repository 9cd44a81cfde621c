// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation.
//!
//! Checks semantic constraints that serde attributes cannot express. Both
//! validators collect every problem instead of stopping at the first.

use std::collections::HashSet;

use optiplan_core::PluginConfig;

use crate::diagnostic::ConfigError;
use crate::model::{RawPluginEntry, UserConfig};

/// Upper bound for `float_precision`; f64 carries no more significant digits.
pub const MAX_FLOAT_PRECISION: u32 = 20;

/// Validate a user configuration before resolution.
pub fn validate_user_config(config: &UserConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Some(precision) = config.float_precision
        && precision > MAX_FLOAT_PRECISION
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "float_precision must be at most {MAX_FLOAT_PRECISION}, got {precision}"
            ),
        });
    }

    let entries = config.plugins.as_deref().unwrap_or_default();

    // Programmatic entries bypass the deserializer's shape checks.
    for (i, entry) in entries.iter().enumerate() {
        if entry.name().trim().is_empty() {
            errors.push(ConfigError::MalformedEntry {
                location: format!("plugins[{i}]"),
                detail: "plugin name must not be empty".to_string(),
            });
        }
    }

    let mut seen_custom = HashSet::new();
    for entry in entries {
        if let RawPluginEntry::Custom(custom) = entry
            && !seen_custom.insert(custom.name.as_str())
        {
            errors.push(ConfigError::DuplicatePlugin {
                name: custom.name.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate that every plugin name in a flattened plan is unique.
pub fn validate_unique_names(plugins: &[PluginConfig]) -> Result<(), Vec<ConfigError>> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut errors = Vec::new();

    for plugin in plugins {
        if !seen.insert(plugin.name.as_str()) && reported.insert(plugin.name.as_str()) {
            errors.push(ConfigError::DuplicatePlugin {
                name: plugin.name.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
