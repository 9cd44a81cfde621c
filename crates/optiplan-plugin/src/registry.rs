// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry for looking up templates by name.
//!
//! The `PluginRegistry` stores `PluginTemplate` records keyed by plugin name.
//! Resolution only ever borrows templates immutably; callers copy whatever
//! they need before modifying it.

use std::collections::HashMap;
use std::path::Path;

use optiplan_core::OptiplanError;

use crate::catalog::builtin_catalog;
use crate::template::{PluginTemplate, parse_plugin_template};

/// Name-to-template lookup consumed by the configuration resolver.
pub trait PluginLookup {
    /// Returns the template registered under `name`, if any.
    fn template(&self, name: &str) -> Option<&PluginTemplate>;

    /// Returns every registered name (used for "did you mean" hints).
    fn names(&self) -> Vec<&str>;
}

/// Registry of plugin templates.
#[derive(Debug, Clone)]
pub struct PluginRegistry {
    entries: HashMap<String, PluginTemplate>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with the built-in catalog.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for template in builtin_catalog() {
            registry.register(template);
        }
        registry
    }

    /// Register a template, returning the one it replaced, if any.
    pub fn register(&mut self, template: PluginTemplate) -> Option<PluginTemplate> {
        let replaced = self.entries.insert(template.name.clone(), template);
        if let Some(previous) = &replaced {
            tracing::debug!(plugin = %previous.name, "replaced registered plugin template");
        }
        replaced
    }

    /// Parse a template file and register it.
    pub fn register_file(&mut self, path: &Path) -> Result<&PluginTemplate, OptiplanError> {
        let content = std::fs::read_to_string(path)?;
        let template = parse_plugin_template(&content).map_err(|e| {
            OptiplanError::Config(format!("{}: {e}", path.display()))
        })?;
        let name = template.name.clone();
        tracing::debug!(plugin = %name, path = %path.display(), "registered plugin template");
        self.register(template);
        self.get(&name)
            .ok_or_else(|| OptiplanError::Internal(format!("template `{name}` vanished after registration")))
    }

    /// Get a template by name.
    pub fn get(&self, name: &str) -> Option<&PluginTemplate> {
        self.entries.get(name)
    }

    /// List all templates, sorted by name.
    pub fn list_all(&self) -> Vec<&PluginTemplate> {
        let mut entries: Vec<&PluginTemplate> = self.entries.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    /// Registered templates whose name or description contains `query`
    /// (case-insensitive), sorted by name. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&PluginTemplate> {
        let query_lower = query.to_lowercase();
        self.list_all()
            .into_iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&query_lower)
                    || t.description.to_lowercase().contains(&query_lower)
            })
            .collect()
    }

    /// Returns the number of registered templates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no templates are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginLookup for PluginRegistry {
    fn template(&self, name: &str) -> Option<&PluginTemplate> {
        self.get(name)
    }

    fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use optiplan_core::{Params, PluginType};
    use serde_json::json;

    use super::*;

    fn test_template(name: &str, plugin_type: &str) -> PluginTemplate {
        PluginTemplate {
            name: name.to_string(),
            plugin_type: PluginType::new(plugin_type),
            active: true,
            description: format!("Test plugin {name}"),
            params: Params::new(),
        }
    }

    #[test]
    fn register_and_get_roundtrip() {
        let mut registry = PluginRegistry::new();
        registry.register(test_template("removeDoctype", "perItem"));

        let template = registry.get("removeDoctype").unwrap();
        assert_eq!(template.name, "removeDoctype");
        assert!(template.active);
        assert!(registry.template("removeDoctype").is_some());
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = PluginRegistry::new();
        assert!(registry.register(test_template("a", "perItem")).is_none());
        let replaced = registry.register(test_template("a", "full")).unwrap();
        assert_eq!(replaced.plugin_type.as_str(), "perItem");
        assert_eq!(registry.get("a").unwrap().plugin_type.as_str(), "full");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn search_matches_name_and_description() {
        let mut registry = PluginRegistry::with_builtins();
        registry.register(test_template("inlineFonts", "full"));

        let names: Vec<&str> = registry.search("FONTS").iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["inlineFonts"]);
        assert!(registry.search("Test plugin").iter().any(|t| t.name == "inlineFonts"));
        assert_eq!(registry.search("").len(), registry.len());
    }

    #[test]
    fn list_all_returns_sorted() {
        let mut registry = PluginRegistry::new();
        registry.register(test_template("zebra", "perItem"));
        registry.register(test_template("alpha", "full"));
        registry.register(test_template("middle", "perItem"));

        let all = registry.list_all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "alpha");
        assert_eq!(all[1].name, "middle");
        assert_eq!(all[2].name, "zebra");
    }

    #[test]
    fn len_and_is_empty() {
        let mut registry = PluginRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);

        registry.register(test_template("test", "perItem"));
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names(), vec!["test"]);
    }

    #[test]
    fn with_builtins_contains_catalog() {
        let registry = PluginRegistry::with_builtins();
        assert_eq!(registry.len(), builtin_catalog().len());
        let template = registry.get("cleanupNumericValues").unwrap();
        assert_eq!(template.params["floatPrecision"], json!(3));
    }

    #[test]
    fn register_file_reads_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugin.toml");
        std::fs::write(
            &path,
            "[plugin]\nname = \"fromDisk\"\ntype = \"full\"\n\n[plugin.params]\nlevel = 2\n",
        )
        .unwrap();

        let mut registry = PluginRegistry::new();
        let template = registry.register_file(&path).unwrap();
        assert_eq!(template.name, "fromDisk");
        assert_eq!(template.params["level"], json!(2));
    }

    #[test]
    fn register_file_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[plugin]\nname = \"\"\ntype = \"full\"\n").unwrap();

        let mut registry = PluginRegistry::new();
        let err = registry.register_file(&path).unwrap_err().to_string();
        assert!(err.contains("broken.toml"));
        assert!(registry.is_empty());
    }
}
