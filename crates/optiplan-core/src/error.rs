// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Optiplan plugin planner.

use thiserror::Error;

/// The primary error type used by core operations, the plugin registry, and transforms.
#[derive(Debug, Error)]
pub enum OptiplanError {
    /// Configuration errors (invalid template TOML, empty names, bad types).
    #[error("configuration error: {0}")]
    Config(String),

    /// A plugin transform failed while processing a document.
    #[error("transform `{plugin}` failed: {message}")]
    Transform { plugin: String, message: String },

    /// Filesystem errors while reading templates or configuration.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
