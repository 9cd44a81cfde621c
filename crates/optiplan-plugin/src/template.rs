// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin template parsing from `plugin.toml` files.
//!
//! Templates describe the registry defaults of a plugin. The transform itself
//! lives with the external pipeline; only its configuration shape is known here.

use optiplan_core::{OptiplanError, Params, PluginType};
use serde::{Deserialize, Serialize};

/// Registry-stored default configuration for a named plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginTemplate {
    /// Unique name of the plugin (e.g., "convertColors").
    pub name: String,
    /// Batching type of the plugin.
    #[serde(rename = "type")]
    pub plugin_type: PluginType,
    /// Whether the plugin runs when referenced by bare name.
    pub active: bool,
    /// Human-readable description.
    pub description: String,
    /// Default parameters, copied into every resolved record.
    pub params: Params,
}

/// Intermediate TOML deserialization struct for `plugin.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PluginTemplateFile {
    plugin: PluginSection,
}

/// The `[plugin]` section of a `plugin.toml` file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PluginSection {
    name: String,
    #[serde(rename = "type")]
    plugin_type: String,
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default)]
    description: String,
    #[serde(default)]
    params: Params,
}

fn default_active() -> bool {
    true
}

/// Parse a plugin template from TOML content.
///
/// Validates that name and type are non-empty.
pub fn parse_plugin_template(toml_content: &str) -> Result<PluginTemplate, OptiplanError> {
    let file: PluginTemplateFile = toml::from_str(toml_content)
        .map_err(|e| OptiplanError::Config(format!("invalid plugin template: {e}")))?;

    let section = file.plugin;

    if section.name.trim().is_empty() {
        return Err(OptiplanError::Config(
            "plugin template: name must not be empty".to_string(),
        ));
    }

    if section.plugin_type.trim().is_empty() {
        return Err(OptiplanError::Config(format!(
            "plugin template `{}`: type must not be empty",
            section.name
        )));
    }

    Ok(PluginTemplate {
        name: section.name,
        plugin_type: PluginType::new(section.plugin_type),
        active: section.active,
        description: section.description,
        params: section.params,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_valid_template() {
        let toml = r#"
[plugin]
name = "roundCoordinates"
type = "perItem"
active = false
description = "rounds coordinates"

[plugin.params]
floatPrecision = 2
keepZero = true
"#;
        let template = parse_plugin_template(toml).unwrap();
        assert_eq!(template.name, "roundCoordinates");
        assert_eq!(template.plugin_type.as_str(), "perItem");
        assert!(!template.active);
        assert_eq!(template.params["floatPrecision"], json!(2));
        assert_eq!(template.params["keepZero"], json!(true));
    }

    #[test]
    fn parse_minimal_template() {
        let toml = r#"
[plugin]
name = "minimal"
type = "full"
"#;
        let template = parse_plugin_template(toml).unwrap();
        assert!(template.active);
        assert!(template.params.is_empty());
        assert!(template.description.is_empty());
    }

    #[test]
    fn parse_empty_name() {
        let toml = r#"
[plugin]
name = ""
type = "perItem"
"#;
        let err = parse_plugin_template(toml).unwrap_err().to_string();
        assert!(err.contains("name must not be empty"));
    }

    #[test]
    fn parse_empty_type() {
        let toml = r#"
[plugin]
name = "typeless"
type = " "
"#;
        let err = parse_plugin_template(toml).unwrap_err().to_string();
        assert!(err.contains("type must not be empty"));
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        let toml = r#"
[plugin]
name = "x"
type = "perItem"
actve = true
"#;
        let err = parse_plugin_template(toml).unwrap_err().to_string();
        assert!(err.contains("invalid plugin template"));
    }
}
