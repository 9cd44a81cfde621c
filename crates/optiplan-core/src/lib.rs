// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Optiplan plugin planner.
//!
//! This crate provides the error type, the normalized plugin record, and the
//! transform trait shared by the registry, the configuration resolver, and
//! any pipeline executor consuming a resolved plan.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::OptiplanError;
pub use traits::Transform;
pub use types::{FLOAT_PRECISION_KEY, Params, PluginConfig, PluginType, StockType};
