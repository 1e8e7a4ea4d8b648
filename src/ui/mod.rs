//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Mapping output colors and pane states to terminal styles

pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use render::{render, split_panes};

/// Rows taken by the status bar.
pub const STATUS_ROWS: u16 = 1;
/// Rows taken by a pane's top and bottom border.
pub const BORDER_ROWS: u16 = 2;

/// Lines of content a pane can show in a terminal `height` rows tall.
pub const fn pane_content_height(height: u16) -> u16 {
    height.saturating_sub(STATUS_ROWS + BORDER_ROWS)
}
