// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loaders using Figment for layered config merging.
//!
//! User configuration follows the XDG hierarchy:
//! `./optiplan.toml` > `~/.config/optiplan/optiplan.toml` > `/etc/optiplan/optiplan.toml`
//! with environment variable overrides via the `OPTIPLAN_` prefix.
//!
//! The defaults document is read through a [`DefaultsSource`], at most once
//! per resolution.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};

use crate::model::{DefaultsDocument, UserConfig};

/// Defaults document compiled into the binary.
pub const EMBEDDED_DEFAULTS: &str = include_str!("../defaults.toml");

/// Scalar settings that may be overridden from the environment.
const ENV_KEYS: &[&str] = &["full", "multipass", "float_precision"];

/// Load user configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. `/etc/optiplan/optiplan.toml` (system-wide)
/// 2. `~/.config/optiplan/optiplan.toml` (user XDG config)
/// 3. `./optiplan.toml` (local directory)
/// 4. `OPTIPLAN_*` environment variables
pub fn load_user_config() -> Result<UserConfig, figment::Error> {
    build_figment().extract()
}

/// Load user configuration from a TOML string only (no XDG lookup, no env).
pub fn load_user_config_from_str(toml_content: &str) -> Result<UserConfig, figment::Error> {
    Figment::new().merge(Toml::string(toml_content)).extract()
}

/// Load user configuration from a specific file path with env var overrides.
///
/// Unlike the XDG layers, the file must exist.
pub fn load_user_config_from_path(path: &Path) -> Result<UserConfig, figment::Error> {
    Figment::new()
        .merge(Toml::file_exact(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for XDG config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Toml::file("/etc/optiplan/optiplan.toml"))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file("optiplan.toml"))
        .merge(env_provider())
}

/// Location of the per-user configuration file, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("optiplan/optiplan.toml"))
}

/// Environment provider restricted to the scalar top-level settings.
///
/// `OPTIPLAN_FLOAT_PRECISION` maps to `float_precision`.
fn env_provider() -> Env {
    Env::prefixed("OPTIPLAN_").only(ENV_KEYS)
}

/// Parse a defaults document from TOML content.
pub fn load_defaults_from_str(toml_content: &str) -> Result<DefaultsDocument, figment::Error> {
    Figment::new().merge(Toml::string(toml_content)).extract()
}

/// Source of the defaults document consumed by non-full resolutions.
pub trait DefaultsSource {
    /// Read and parse the defaults document.
    fn load(&self) -> Result<DefaultsDocument, figment::Error>;

    /// `(path, content)` pairs used to attach source spans to load errors.
    fn source_text(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// The defaults document shipped with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedDefaults;

impl DefaultsSource for EmbeddedDefaults {
    fn load(&self) -> Result<DefaultsDocument, figment::Error> {
        load_defaults_from_str(EMBEDDED_DEFAULTS)
    }
}

/// A defaults document read from disk.
#[derive(Debug, Clone)]
pub struct FileDefaults {
    path: PathBuf,
}

impl FileDefaults {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DefaultsSource for FileDefaults {
    fn load(&self) -> Result<DefaultsDocument, figment::Error> {
        Figment::new().merge(Toml::file_exact(&self.path)).extract()
    }

    fn source_text(&self) -> Vec<(String, String)> {
        std::fs::read_to_string(&self.path)
            .map(|content| vec![(self.path.display().to_string(), content)])
            .unwrap_or_default()
    }
}

impl<T: DefaultsSource + ?Sized> DefaultsSource for &T {
    fn load(&self) -> Result<DefaultsDocument, figment::Error> {
        (**self).load()
    }

    fn source_text(&self) -> Vec<(String, String)> {
        (**self).source_text()
    }
}
