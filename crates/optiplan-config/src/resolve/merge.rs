// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Applies user overrides onto a materialized default list.
//!
//! Named overrides edit matching records in place and never fail: a name
//! missing from the defaults is an inert override. Custom plugins are
//! appended once every named override has been applied.

use optiplan_core::{FLOAT_PRECISION_KEY, Params, PluginConfig};
use optiplan_plugin::PluginLookup;
use serde_json::Value;

use super::descriptor::resolve_custom;
use crate::diagnostic::suggest_key;
use crate::model::{DefaultsDocument, RawPluginEntry, UserConfig};

/// Settings copied from the configuration layers onto the resolved plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassThrough {
    pub multipass: bool,
    pub svg2js: Option<Params>,
    pub js2svg: Option<Params>,
}

/// Merge overrides and the precision override onto `plugins`.
pub fn merge<L: PluginLookup + ?Sized>(
    plugins: Vec<PluginConfig>,
    overrides: Option<&[RawPluginEntry]>,
    precision: Option<u32>,
    lookup: &L,
) -> Vec<PluginConfig> {
    let mut plugins = apply_overrides(plugins, overrides.unwrap_or_default(), lookup);
    if let Some(precision) = precision {
        apply_precision(&mut plugins, precision);
    }
    plugins
}

/// Apply named overrides in place, then append custom plugins in input order.
///
/// `lookup` is only consulted to hint at typos in inert overrides.
pub fn apply_overrides<L: PluginLookup + ?Sized>(
    mut plugins: Vec<PluginConfig>,
    overrides: &[RawPluginEntry],
    lookup: &L,
) -> Vec<PluginConfig> {
    let mut custom = Vec::new();

    for entry in overrides {
        let matched = match entry {
            RawPluginEntry::Custom(descriptor) => {
                custom.push(resolve_custom(descriptor));
                continue;
            }
            RawPluginEntry::ByName(name) => {
                tracing::debug!(plugin = %name, "bare name in overrides carries no change");
                continue;
            }
            RawPluginEntry::Toggle(name, active) => {
                apply_to_named(&mut plugins, name, |plugin| plugin.active = *active)
            }
            RawPluginEntry::Patch(name, patch) => apply_to_named(&mut plugins, name, |plugin| {
                plugin.params = plugin.patched_params(patch);
                plugin.active = true;
            }),
        };

        if matched == 0 {
            let suggestion = suggest_key(entry.name(), &lookup.names());
            tracing::debug!(
                plugin = %entry.name(),
                suggestion = suggestion.as_deref().unwrap_or("-"),
                "override targets a plugin absent from the list, ignoring"
            );
        }
    }

    plugins.extend(custom);
    plugins
}

/// Run `edit` on every plugin called `name`, returning how many matched.
fn apply_to_named(
    plugins: &mut [PluginConfig],
    name: &str,
    mut edit: impl FnMut(&mut PluginConfig),
) -> usize {
    let mut matched = 0;
    for plugin in plugins.iter_mut().filter(|p| p.name == name) {
        edit(plugin);
        matched += 1;
    }
    matched
}

/// Overwrite `floatPrecision` in every plugin that already declares it.
///
/// Plugins without the key are left untouched; the key is never added.
pub fn apply_precision(plugins: &mut [PluginConfig], precision: u32) {
    for plugin in plugins.iter_mut() {
        if let Some(value) = plugin.params.get_mut(FLOAT_PRECISION_KEY) {
            *value = Value::from(precision);
        }
    }
}

/// Combine pass-through settings; user values win over the defaults document.
pub fn pass_through(defaults: Option<&DefaultsDocument>, user: &UserConfig) -> PassThrough {
    PassThrough {
        multipass: user
            .multipass
            .or_else(|| defaults.and_then(|d| d.multipass))
            .unwrap_or(false),
        svg2js: user
            .svg2js
            .clone()
            .or_else(|| defaults.and_then(|d| d.svg2js.clone())),
        js2svg: user
            .js2svg
            .clone()
            .or_else(|| defaults.and_then(|d| d.js2svg.clone())),
    }
}
