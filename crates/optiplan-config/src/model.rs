// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model for plugin plan resolution.
//!
//! Input structs use `#[serde(deny_unknown_fields)]` so misspelled keys are
//! reported at load time instead of being silently ignored.

use std::fmt;
use std::sync::Arc;

use optiplan_core::{Params, PluginConfig, PluginType, Transform};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Caller-supplied configuration layered over the defaults.
///
/// With `full = true` the plugin list is taken as the complete pipeline and
/// the defaults document is never consulted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    /// Treat `plugins` as the complete pipeline instead of overrides.
    #[serde(default)]
    pub full: bool,

    /// Plugin entries: overrides, or the whole list in full mode.
    #[serde(default)]
    pub plugins: Option<Vec<RawPluginEntry>>,

    /// Replaces the `floatPrecision` param of every plugin that declares it.
    #[serde(default)]
    pub float_precision: Option<u32>,

    /// Run the pipeline repeatedly until the output stops shrinking.
    #[serde(default)]
    pub multipass: Option<bool>,

    /// Parser options, passed through untouched.
    #[serde(default)]
    pub svg2js: Option<Params>,

    /// Serializer options, passed through untouched.
    #[serde(default)]
    pub js2svg: Option<Params>,
}

impl UserConfig {
    /// Append a custom plugin to the plugin entries.
    pub fn with_custom_plugin(mut self, custom: CustomPlugin) -> Self {
        self.plugins
            .get_or_insert_with(Vec::new)
            .push(RawPluginEntry::Custom(custom));
        self
    }
}

/// The defaults document: base pipeline and pass-through settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsDocument {
    /// Base pipeline, in execution order.
    pub plugins: Vec<RawPluginEntry>,

    #[serde(default)]
    pub multipass: Option<bool>,

    #[serde(default)]
    pub svg2js: Option<Params>,

    #[serde(default)]
    pub js2svg: Option<Params>,
}

/// A raw plugin entry, classified once at the input boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum RawPluginEntry {
    /// `"name"`: registry defaults.
    ByName(String),
    /// `{ name = true | false }`: explicit activation.
    Toggle(String, bool),
    /// `{ name = { ... } }`: parameter patch, implies activation.
    Patch(String, Params),
    /// Caller-supplied plugin with its own transform.
    Custom(CustomPlugin),
}

impl RawPluginEntry {
    /// The plugin name this entry refers to.
    pub fn name(&self) -> &str {
        match self {
            RawPluginEntry::ByName(name)
            | RawPluginEntry::Toggle(name, _)
            | RawPluginEntry::Patch(name, _) => name,
            RawPluginEntry::Custom(custom) => &custom.name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, RawPluginEntry::Custom(_))
    }
}

/// Error produced when a raw value has none of the accepted entry shapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed plugin entry: {0}")]
pub struct EntryShapeError(pub String);

/// Leading text of every [`EntryShapeError`] message.
pub(crate) const MALFORMED_ENTRY_PREFIX: &str = "malformed plugin entry:";

impl TryFrom<Value> for RawPluginEntry {
    type Error = EntryShapeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(name) if name.trim().is_empty() => {
                Err(EntryShapeError("plugin name must not be empty".to_string()))
            }
            Value::String(name) => Ok(RawPluginEntry::ByName(name)),
            Value::Object(map) => {
                if map.len() != 1 {
                    return Err(EntryShapeError(format!(
                        "expected a table with exactly one plugin name, found {} keys",
                        map.len()
                    )));
                }
                let Some((name, setting)) = map.into_iter().next() else {
                    return Err(EntryShapeError("empty table".to_string()));
                };
                match setting {
                    Value::Bool(active) => Ok(RawPluginEntry::Toggle(name, active)),
                    Value::Object(patch) => Ok(RawPluginEntry::Patch(name, patch)),
                    other => Err(EntryShapeError(format!(
                        "value for `{name}` must be a boolean or a table, found {}",
                        kind_of(&other)
                    ))),
                }
            }
            other => Err(EntryShapeError(format!(
                "expected a plugin name or a single-key table, found {}",
                kind_of(&other)
            ))),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}

/// A plugin defined by the caller rather than the registry.
///
/// Custom plugins declare their own type so they only share a batch with
/// plugins that use the same tag.
#[derive(Clone)]
pub struct CustomPlugin {
    pub name: String,
    pub plugin_type: PluginType,
    pub params: Option<Params>,
    pub transform: Arc<dyn Transform>,
}

impl CustomPlugin {
    pub fn new(
        name: impl Into<String>,
        plugin_type: PluginType,
        transform: impl Transform + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            plugin_type,
            params: None,
            transform: Arc::new(transform),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }
}

impl fmt::Debug for CustomPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomPlugin")
            .field("name", &self.name)
            .field("plugin_type", &self.plugin_type)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// The executable plan handed to the pipeline executor.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfiguration {
    /// Maximal runs of consecutive plugins sharing a type.
    pub plugins: Vec<Vec<PluginConfig>>,

    pub multipass: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg2js: Option<Params>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub js2svg: Option<Params>,
}

impl ResolvedConfiguration {
    /// Iterate every plugin in execution order, ignoring group boundaries.
    pub fn iter_plugins(&self) -> impl Iterator<Item = &PluginConfig> {
        self.plugins.iter().flatten()
    }

    /// Iterate only the plugins the executor will run.
    pub fn active_plugins(&self) -> impl Iterator<Item = &PluginConfig> {
        self.iter_plugins().filter(|p| p.active)
    }

    /// Look up a plugin by name.
    pub fn plugin(&self, name: &str) -> Option<&PluginConfig> {
        self.iter_plugins().find(|p| p.name == name)
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.iter_plugins().map(|p| p.name.as_str()).collect()
    }

    pub fn group_count(&self) -> usize {
        self.plugins.len()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entry(value: Value) -> Result<RawPluginEntry, EntryShapeError> {
        RawPluginEntry::try_from(value)
    }

    #[test]
    fn bare_string_is_by_name() {
        let parsed = entry(json!("removeDoctype")).unwrap();
        assert!(matches!(parsed, RawPluginEntry::ByName(ref n) if n == "removeDoctype"));
        assert_eq!(parsed.name(), "removeDoctype");
    }

    #[test]
    fn boolean_value_is_toggle() {
        let parsed = entry(json!({"cleanupIDs": false})).unwrap();
        assert!(matches!(parsed, RawPluginEntry::Toggle(ref n, false) if n == "cleanupIDs"));
    }

    #[test]
    fn table_value_is_patch() {
        let parsed = entry(json!({"convertColors": {"rgb2hex": false}})).unwrap();
        match parsed {
            RawPluginEntry::Patch(name, patch) => {
                assert_eq!(name, "convertColors");
                assert_eq!(patch["rgb2hex"], json!(false));
            }
            other => panic!("expected patch, got {other:?}"),
        }
    }

    #[test]
    fn multi_key_table_is_malformed() {
        let err = entry(json!({"a": true, "b": false})).unwrap_err();
        assert!(err.to_string().contains("found 2 keys"));
        assert!(err.to_string().starts_with(MALFORMED_ENTRY_PREFIX));
    }

    #[test]
    fn empty_table_is_malformed() {
        let err = entry(json!({})).unwrap_err();
        assert!(err.to_string().contains("found 0 keys"));
    }

    #[test]
    fn scalar_setting_is_malformed() {
        let err = entry(json!({"cleanupIDs": "yes"})).unwrap_err();
        assert!(err.to_string().contains("must be a boolean or a table, found a string"));
    }

    #[test]
    fn non_string_non_table_is_malformed() {
        assert!(entry(json!(42)).unwrap_err().to_string().contains("found a number"));
        assert!(entry(json!(["a"])).unwrap_err().to_string().contains("found an array"));
        assert!(entry(json!("  ")).unwrap_err().to_string().contains("must not be empty"));
    }

    #[test]
    fn user_config_parses_mixed_plugin_list() {
        let toml_str = r#"
float_precision = 2
multipass = true
plugins = [
    "removeTitle",
    { removeDesc = false },
    { convertColors = { shorthex = false } },
]

[js2svg]
pretty = true
"#;
        let config: UserConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.full);
        assert_eq!(config.float_precision, Some(2));
        assert_eq!(config.multipass, Some(true));
        let plugins = config.plugins.unwrap();
        assert_eq!(plugins.len(), 3);
        assert_eq!(plugins[1].name(), "removeDesc");
        assert_eq!(config.js2svg.unwrap()["pretty"], json!(true));
    }

    #[test]
    fn precision_key_is_snake_case() {
        let config: UserConfig = toml::from_str("float_precision = 4").unwrap();
        assert_eq!(config.float_precision, Some(4));
        assert!(toml::from_str::<UserConfig>("floatPrecision = 4").is_err());
    }

    #[test]
    fn user_config_rejects_unknown_keys() {
        assert!(toml::from_str::<UserConfig>("multipas = true").is_err());
    }

    #[test]
    fn user_config_rejects_malformed_entry() {
        let err = toml::from_str::<UserConfig>("plugins = [{ a = 1 }]").unwrap_err();
        assert!(err.to_string().contains(MALFORMED_ENTRY_PREFIX));
    }

    #[test]
    fn with_custom_plugin_appends_entry() {
        let custom = CustomPlugin::new(
            "stamp",
            PluginType::new("custom"),
            |_: &mut Value, _: &Params| -> Result<(), optiplan_core::OptiplanError> { Ok(()) },
        );
        let config = UserConfig::default().with_custom_plugin(custom);
        let plugins = config.plugins.unwrap();
        assert_eq!(plugins.len(), 1);
        assert!(plugins[0].is_custom());
        assert_eq!(plugins[0].name(), "stamp");
    }
}
