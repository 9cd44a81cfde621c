// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the planner and external collaborators.

pub mod transform;

pub use transform::Transform;
