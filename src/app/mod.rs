//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Focus, Mode, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::document::InputFormat;
use crate::editor::InputBuffer;
use crate::session::DEFAULT_DEBOUNCE_MS;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    input: Option<InputBuffer>,
    format: InputFormat,
    debounce_ms: u64,
    mode: Mode,
    watch_enabled: bool,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create an application editing `text`, loaded from `file_path` if given.
    pub fn new(file_path: Option<PathBuf>, text: &str) -> Self {
        Self {
            file_path,
            input: Some(InputBuffer::from_text(text)),
            format: InputFormat::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            mode: Mode::Edit,
            watch_enabled: false,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Choose how input text is parsed.
    pub const fn with_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    /// Quiet period before re-rendering after an edit.
    pub const fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable file watching.
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    fn take_input(&mut self) -> InputBuffer {
        self.input.take().unwrap_or_else(InputBuffer::empty)
    }
}
