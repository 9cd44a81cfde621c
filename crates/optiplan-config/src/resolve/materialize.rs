// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Materializes a raw plugin list into normalized records.

use optiplan_core::PluginConfig;
use optiplan_plugin::PluginLookup;

use super::descriptor::resolve_entry;
use crate::diagnostic::ConfigError;
use crate::model::RawPluginEntry;

/// Resolve every entry in order.
///
/// Stops at the first failure; an invalid default or full list is a setup
/// error, so no partial list is ever returned.
pub fn materialize<L: PluginLookup + ?Sized>(
    entries: &[RawPluginEntry],
    lookup: &L,
) -> Result<Vec<PluginConfig>, ConfigError> {
    entries
        .iter()
        .map(|entry| resolve_entry(entry, lookup))
        .collect()
}

#[cfg(test)]
mod tests {
    use optiplan_plugin::PluginRegistry;

    use super::*;

    #[test]
    fn preserves_input_order() {
        let registry = PluginRegistry::with_builtins();
        let entries = vec![
            RawPluginEntry::ByName("removeTitle".into()),
            RawPluginEntry::Toggle("cleanupIDs".into(), false),
            RawPluginEntry::ByName("removeDoctype".into()),
        ];
        let plugins = materialize(&entries, &registry).unwrap();
        let names: Vec<&str> = plugins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["removeTitle", "cleanupIDs", "removeDoctype"]);
        assert!(!plugins[1].active);
    }

    #[test]
    fn unknown_entry_is_fatal() {
        let registry = PluginRegistry::with_builtins();
        let entries = vec![
            RawPluginEntry::ByName("removeTitle".into()),
            RawPluginEntry::ByName("notAPlugin".into()),
            RawPluginEntry::ByName("removeDoctype".into()),
        ];
        let err = materialize(&entries, &registry).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPlugin { ref name, .. } if name == "notAPlugin"));
    }

    #[test]
    fn empty_list_materializes_to_empty() {
        let registry = PluginRegistry::new();
        assert!(materialize(&[], &registry).unwrap().is_empty());
    }
}
