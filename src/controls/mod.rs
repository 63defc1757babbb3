//! Controls module - the panel's editable state
//!
//! This module provides:
//! - The layout description the registry is built from
//! - The control registry (identifier -> control)
//! - The display-only scaling table

mod layout;
mod registry;
mod scaling;

pub use layout::{ControlKind, PanelLayout};
pub use registry::ControlRegistry;
pub use scaling::ScalingTable;
