// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered plugin configuration for the Optiplan SVG optimization pipeline.
//!
//! Merges the built-in defaults document, user overrides, and custom plugins
//! into a normalized plugin list, then groups it into same-type runs for the
//! pipeline executor. User configuration is read from TOML files following
//! the XDG hierarchy with `OPTIPLAN_*` environment overrides; failures are
//! reported as miette diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use optiplan_config::load_and_resolve;
//!
//! let plan = load_and_resolve().expect("config errors");
//! for run in &plan.plugins {
//!     println!("{} plugins of type {}", run.len(), run[0].plugin_type);
//! }
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod resolve;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{
    DefaultsSource, EmbeddedDefaults, FileDefaults, load_user_config, load_user_config_from_path,
    load_user_config_from_str,
};
pub use model::{CustomPlugin, DefaultsDocument, RawPluginEntry, ResolvedConfiguration, UserConfig};
pub use resolve::Resolver;

/// Resolve `user` against the built-in catalog and embedded defaults.
pub fn resolve(user: &UserConfig) -> Result<ResolvedConfiguration, Vec<ConfigError>> {
    Resolver::builtin().resolve(user)
}

/// Load user configuration from the XDG hierarchy and resolve it.
///
/// 1. Loads config from TOML files + env vars via Figment
/// 2. On success: validates and resolves against the built-in registry
/// 3. On Figment error: converts to rich miette diagnostics with typo suggestions
pub fn load_and_resolve() -> Result<ResolvedConfiguration, Vec<ConfigError>> {
    match loader::load_user_config() {
        Ok(user) => resolve(&user),
        Err(err) => {
            let toml_sources = collect_toml_sources();
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load user configuration from a TOML string and resolve it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_resolve_str(toml_content: &str) -> Result<ResolvedConfiguration, Vec<ConfigError>> {
    match loader::load_user_config_from_str(toml_content) {
        Ok(user) => resolve(&user),
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
pub fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    // Local config
    if let Ok(content) = std::fs::read_to_string("optiplan.toml") {
        let path = std::env::current_dir()
            .map(|d| d.join("optiplan.toml").display().to_string())
            .unwrap_or_else(|_| "optiplan.toml".to_string());
        sources.push((path, content));
    }

    // XDG user config
    if let Some(path) = loader::user_config_path()
        && let Ok(content) = std::fs::read_to_string(&path)
    {
        sources.push((path.display().to_string(), content));
    }

    // System config
    let system_path = std::path::Path::new("/etc/optiplan/optiplan.toml");
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    sources
}
