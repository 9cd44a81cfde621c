// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin plan resolution.
//!
//! The pipeline runs in four steps: every raw entry is normalized against the
//! registry ([`descriptor`]), the base list is materialized ([`materialize`]),
//! user overrides and the precision override are merged in ([`merge`]), and the
//! final list is split into same-type runs ([`group`]).

pub mod descriptor;
pub mod group;
pub mod materialize;
pub mod merge;

use optiplan_plugin::{PluginLookup, PluginRegistry};

use crate::diagnostic::{ConfigError, figment_to_config_errors};
use crate::loader::{DefaultsSource, EmbeddedDefaults};
use crate::model::{ResolvedConfiguration, UserConfig};
use crate::validation::{validate_unique_names, validate_user_config};

pub use descriptor::resolve_entry;
pub use group::group;
pub use materialize::materialize;
pub use merge::{PassThrough, apply_overrides, apply_precision, merge, pass_through};

/// Resolves user configurations into grouped plugin plans.
///
/// Holds a read-only registry and a defaults source; resolving never
/// modifies either, so one resolver can serve any number of calls.
#[derive(Debug, Clone)]
pub struct Resolver<L, D> {
    lookup: L,
    defaults: D,
}

impl Resolver<PluginRegistry, EmbeddedDefaults> {
    /// Resolver over the built-in catalog and the embedded defaults document.
    pub fn builtin() -> Self {
        Self::new(PluginRegistry::with_builtins(), EmbeddedDefaults)
    }
}

impl<L: PluginLookup, D: DefaultsSource> Resolver<L, D> {
    pub fn new(lookup: L, defaults: D) -> Self {
        Self { lookup, defaults }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Resolve `user` into an executable plan.
    ///
    /// Full configurations are normalized on their own; all others are
    /// layered over the defaults document, which is read once per call.
    pub fn resolve(&self, user: &UserConfig) -> Result<ResolvedConfiguration, Vec<ConfigError>> {
        validate_user_config(user)?;

        let (plugins, settings) = if user.full {
            let entries = user.plugins.as_deref().unwrap_or_default();
            let mut plugins = materialize(entries, &self.lookup).map_err(|e| vec![e])?;
            if let Some(precision) = user.float_precision {
                apply_precision(&mut plugins, precision);
            }
            (plugins, pass_through(None, user))
        } else {
            let document = self
                .defaults
                .load()
                .map_err(|e| figment_to_config_errors(e, &self.defaults.source_text()))?;
            let base = materialize(&document.plugins, &self.lookup).map_err(|e| vec![e])?;
            let plugins = merge(
                base,
                user.plugins.as_deref(),
                user.float_precision,
                &self.lookup,
            );
            (plugins, pass_through(Some(&document), user))
        };

        validate_unique_names(&plugins)?;

        let groups = group(plugins);
        for (i, run) in groups.iter().enumerate() {
            tracing::debug!(
                group = i,
                plugin_type = %run[0].plugin_type,
                size = run.len(),
                "resolved plugin group"
            );
        }

        let resolved = ResolvedConfiguration {
            plugins: groups,
            multipass: settings.multipass,
            svg2js: settings.svg2js,
            js2svg: settings.js2svg,
        };

        tracing::info!(
            full = user.full,
            plugins = resolved.iter_plugins().count(),
            active = resolved.active_plugins().count(),
            groups = resolved.group_count(),
            "plugin plan resolved"
        );

        Ok(resolved)
    }
}
