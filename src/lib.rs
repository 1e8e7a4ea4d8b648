// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. render::RenderOutcome)
    clippy::module_name_repetitions
)]

//! # Lazyview
//!
//! A terminal live preview for lazy-JSON documents.
//!
//! Lazyview parses the text in an input pane and shows it as a tree of
//! colored badges in an output pane:
//! - Lazy-JSON: JSON plus `//` comments, trailing commas and `let` variables
//! - Tagged node trees from an external parsing engine
//! - Debounced re-rendering while typing
//! - File watching for live preview
//!
//! ## Architecture
//!
//! Lazyview uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! The [`session`] sits between the two panes. Edits arm a debounce timer;
//! when it fires the input is parsed, rendered into a [`render::VisualElement`]
//! tree and mounted on the output pane.
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: Parsing input text into document trees
//! - [`render`]: Document trees to styled visual elements
//! - [`session`]: Debounced edit-parse-render cycle
//! - [`editor`]: The input text buffer
//! - [`ui`]: Terminal UI components
//! - [`watcher`]: File watching
//! - [`config`]: Persisted default flags

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod render;
pub mod session;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{DocumentNode, DocumentParser, ParseError};
    pub use crate::render::{VisualElement, render};
    pub use crate::session::{EditSession, OutputSurface};
    pub use crate::ui::viewport::Viewport;
}
