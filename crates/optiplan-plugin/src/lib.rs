// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin template registry, template parser, and built-in catalog.
//!
//! Every plugin the planner can reference by name is described by a
//! `PluginTemplate`: its batching type, default activation, and default
//! parameters. Templates are registered once and treated as read-only by
//! every resolution afterwards.

pub mod catalog;
pub mod registry;
pub mod template;

pub use catalog::{builtin_catalog, search_catalog};
pub use registry::{PluginLookup, PluginRegistry};
pub use template::{PluginTemplate, parse_plugin_template};
