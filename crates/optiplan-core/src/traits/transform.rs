// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transform trait carried by custom plugins.

use serde_json::Value;

use crate::error::OptiplanError;
use crate::types::Params;

/// A document transform supplied by the caller for a custom plugin.
///
/// The document is the parsed element tree handed over by the external
/// parser. The planner never invokes transforms itself; it only carries
/// them through to the resolved plan.
pub trait Transform: Send + Sync {
    /// Apply the transform to `document` using the resolved `params`.
    fn apply(&self, document: &mut Value, params: &Params) -> Result<(), OptiplanError>;
}

impl<F> Transform for F
where
    F: Fn(&mut Value, &Params) -> Result<(), OptiplanError> + Send + Sync,
{
    fn apply(&self, document: &mut Value, params: &Params) -> Result<(), OptiplanError> {
        self(document, params)
    }
}
