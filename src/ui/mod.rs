//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`layout`]: Block editor geometry, hit testing and drag slots
//! - [`style`]: Colors and styles

pub mod layout;
pub mod style;

mod overlays;
mod render;
mod status;

pub use render::render;

#[cfg(test)]
mod tests;
