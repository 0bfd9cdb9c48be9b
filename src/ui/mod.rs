//! User Interface layer
//!
//! This module contains all UI-related code:
//! - Table model derivation (sorting, padding, tooltips)
//! - Light and dark themes
//! - Reusable widgets
//! - Main render function
//! - Terminal session lifecycle

pub mod render;
pub mod table;
pub mod terminal;
pub mod theme;
pub mod widgets;

pub use render::render;
pub use theme::Theme;
