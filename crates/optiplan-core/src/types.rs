// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the registry, the resolver, and pipeline executors.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumString};

use crate::traits::Transform;

/// Open key-value map of plugin-specific options.
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Parameter key rewritten by a global precision override.
pub const FLOAT_PRECISION_KEY: &str = "floatPrecision";

/// Opaque classification tag used to batch consecutive plugins.
///
/// Two plugins share a batch only when their tags compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginType(pub String);

impl PluginType {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<StockType> for PluginType {
    fn from(stock: StockType) -> Self {
        Self(stock.to_string())
    }
}

/// Traversal kinds used by the built-in SVG plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum StockType {
    /// Visits every element top-down.
    #[strum(serialize = "perItem")]
    PerItem,
    /// Visits every element bottom-up.
    #[strum(serialize = "perItemReverse")]
    PerItemReverse,
    /// Receives the whole document at once.
    #[strum(serialize = "full")]
    Full,
}

/// A normalized, resolved plugin configuration.
///
/// Records are built fresh for every resolution; `params` is always an
/// independent copy of whatever template or patch it came from.
#[derive(Clone, Serialize)]
pub struct PluginConfig {
    /// Unique name within a resolved plan.
    pub name: String,
    /// Whether the executor should run this plugin.
    pub active: bool,
    /// Batching tag.
    #[serde(rename = "type")]
    pub plugin_type: PluginType,
    /// Plugin-specific options.
    pub params: Params,
    /// Caller-supplied transform; only set for custom plugins.
    #[serde(rename = "custom", serialize_with = "serialize_is_custom")]
    pub transform: Option<Arc<dyn Transform>>,
}

impl PluginConfig {
    pub fn new(name: impl Into<String>, plugin_type: PluginType, active: bool, params: Params) -> Self {
        Self {
            name: name.into(),
            active,
            plugin_type,
            params,
            transform: None,
        }
    }

    /// True when the plugin carries its own transform instead of a registry implementation.
    pub fn is_custom(&self) -> bool {
        self.transform.is_some()
    }

    /// Returns a copy of `params` with `patch` written over it (patch keys win).
    pub fn patched_params(&self, patch: &Params) -> Params {
        let mut params = self.params.clone();
        for (key, value) in patch {
            params.insert(key.clone(), value.clone());
        }
        params
    }
}

impl fmt::Debug for PluginConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginConfig")
            .field("name", &self.name)
            .field("active", &self.active)
            .field("plugin_type", &self.plugin_type)
            .field("params", &self.params)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

fn serialize_is_custom<S: Serializer>(
    transform: &Option<Arc<dyn Transform>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_bool(transform.is_some())
}
