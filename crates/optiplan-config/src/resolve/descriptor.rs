// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns a single raw entry into a normalized `PluginConfig`.

use optiplan_core::PluginConfig;
use optiplan_plugin::PluginLookup;

use crate::diagnostic::{ConfigError, unknown_plugin};
use crate::model::{CustomPlugin, RawPluginEntry};

/// Resolve one raw entry against the registry.
///
/// Named entries must exist in `lookup`. The template is only read; the
/// returned record owns a fresh copy of its params.
pub fn resolve_entry<L: PluginLookup + ?Sized>(
    entry: &RawPluginEntry,
    lookup: &L,
) -> Result<PluginConfig, ConfigError> {
    match entry {
        RawPluginEntry::Custom(custom) => Ok(resolve_custom(custom)),
        RawPluginEntry::ByName(name) => from_template(name, lookup),
        RawPluginEntry::Toggle(name, active) => {
            let mut plugin = from_template(name, lookup)?;
            plugin.active = *active;
            Ok(plugin)
        }
        RawPluginEntry::Patch(name, patch) => {
            let mut plugin = from_template(name, lookup)?;
            plugin.params = plugin.patched_params(patch);
            plugin.active = true;
            Ok(plugin)
        }
    }
}

/// Build the record for a caller-supplied plugin. Always active.
pub fn resolve_custom(custom: &CustomPlugin) -> PluginConfig {
    let mut plugin = PluginConfig::new(
        custom.name.clone(),
        custom.plugin_type.clone(),
        true,
        custom.params.clone().unwrap_or_default(),
    );
    plugin.transform = Some(custom.transform.clone());
    plugin
}

fn from_template<L: PluginLookup + ?Sized>(
    name: &str,
    lookup: &L,
) -> Result<PluginConfig, ConfigError> {
    let template = lookup
        .template(name)
        .ok_or_else(|| unknown_plugin(name, lookup))?;
    Ok(PluginConfig::new(
        name,
        template.plugin_type.clone(),
        template.active,
        template.params.clone(),
    ))
}
