use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::document::InputFormat;
use crate::editor::InputBuffer;
use crate::render::{OutputLine, flatten};
use crate::session::{DEFAULT_DEBOUNCE_MS, EditSession, OutputPane, RenderOutcome};
use crate::ui::viewport::Viewport;

/// How long a toast stays on screen.
const TOAST_MS: u64 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at_ms: u64,
}

/// Which screen layout is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Input and output panes side by side.
    Edit,
    /// Output only, filling the terminal.
    View,
}

/// Which pane receives keys in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Output,
}

/// The complete application state.
pub struct Model {
    /// Input text, parser and render scheduling
    pub session: EditSession<InputFormat>,
    /// Rendered trees mounted by the session
    pub output: OutputPane,
    /// `output` laid out as lines, refreshed when its revision changes
    output_lines: Vec<OutputLine>,
    output_revision: u64,
    pub output_viewport: Viewport,
    pub input_viewport: Viewport,
    /// File the input was loaded from and is saved to
    pub file_path: Option<PathBuf>,
    pub mode: Mode,
    pub focus: Focus,
    pub watch_enabled: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    pub help_visible: bool,
    pub help_scroll_offset: usize,
    toast: Option<Toast>,
    /// Clock reading of the latest tick, in milliseconds since start
    pub now_ms: u64,
    pub should_quit: bool,
    /// Set after a first quit attempt with unsaved edits
    pub quit_confirmed: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("mode", &self.mode)
            .field("focus", &self.focus)
            .field("watch_enabled", &self.watch_enabled)
            .field("output_lines", &self.output_lines.len())
            .finish_non_exhaustive()
    }
}

impl Default for Model {
    fn default() -> Self {
        let session = EditSession::new(
            InputFormat::default(),
            InputBuffer::empty(),
            DEFAULT_DEBOUNCE_MS,
        );
        Self::new(session, None, Mode::Edit, (80, 24))
    }
}

impl Model {
    pub fn new(
        session: EditSession<InputFormat>,
        file_path: Option<PathBuf>,
        mode: Mode,
        terminal_size: (u16, u16),
    ) -> Self {
        let content_height = crate::ui::pane_content_height(terminal_size.1);
        let input_lines = session.input().line_count();
        let focus = match mode {
            Mode::Edit => Focus::Input,
            Mode::View => Focus::Output,
        };
        Self {
            session,
            output: OutputPane::new(),
            output_lines: Vec::new(),
            output_revision: 0,
            output_viewport: Viewport::new(content_height, 0),
            input_viewport: Viewport::new(content_height, input_lines),
            file_path,
            mode,
            focus,
            watch_enabled: false,
            config_global_path: None,
            config_local_path: None,
            help_visible: false,
            help_scroll_offset: 0,
            toast: None,
            now_ms: 0,
            should_quit: false,
            quit_confirmed: false,
        }
    }

    /// The output pane laid out as display lines.
    pub fn output_lines(&self) -> &[OutputLine] {
        &self.output_lines
    }

    /// Whether edits go to the input pane.
    pub fn input_focused(&self) -> bool {
        self.mode == Mode::Edit && self.focus == Focus::Input
    }

    /// Advance the clock: run a due render and expire an old toast.
    ///
    /// Returns true if anything visible changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.now_ms = now_ms;
        let outcome = self.session.poll(now_ms, &mut self.output);
        let rendered = outcome.is_some_and(|outcome| self.after_render(&outcome));
        let expired = self.expire_toast();
        rendered || expired
    }

    /// Render the current input right away.
    pub fn render_now(&mut self) -> RenderOutcome {
        let outcome = self.session.render_now(&mut self.output);
        self.after_render(&outcome);
        outcome
    }

    fn after_render(&mut self, outcome: &RenderOutcome) -> bool {
        if matches!(outcome, RenderOutcome::Stale) {
            return false;
        }
        self.sync_output();
        true
    }

    fn sync_output(&mut self) {
        if self.output.revision() == self.output_revision {
            return;
        }
        self.output_lines = flatten(self.output.children());
        self.output_revision = self.output.revision();
        self.output_viewport.set_total_lines(self.output_lines.len());
    }

    /// Call after editing the input through the session.
    pub(super) fn input_edited(&mut self) {
        self.session.input_changed(self.now_ms);
        self.follow_cursor();
    }

    /// Keep the input viewport in step with the buffer and its cursor.
    pub(super) fn follow_cursor(&mut self) {
        let input = self.session.input();
        self.input_viewport.set_total_lines(input.line_count());
        self.input_viewport.ensure_visible(input.cursor().line);
    }

    pub(super) fn resize(&mut self, height: u16) {
        let content_height = crate::ui::pane_content_height(height);
        self.output_viewport.resize(content_height);
        self.input_viewport.resize(content_height);
        self.follow_cursor();
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at_ms: self.now_ms.saturating_add(TOAST_MS),
        });
    }

    fn expire_toast(&mut self) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at_ms <= self.now_ms)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Reread the input file and hand its content to the session.
    ///
    /// Returns `Ok(false)` when the content was already current.
    pub(super) fn reload_from_disk(&mut self) -> Result<bool> {
        let path = self.require_path()?.to_path_buf();
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let changed = self.session.replace_input(&text, self.now_ms);
        self.follow_cursor();
        Ok(changed)
    }

    /// Write the input to its file.
    pub(super) fn save_to_disk(&mut self) -> Result<PathBuf> {
        let path = self.require_path()?.to_path_buf();
        std::fs::write(&path, self.session.input().text())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        self.session.input_mut().mark_clean();
        Ok(path)
    }

    fn require_path(&self) -> Result<&Path> {
        self.file_path
            .as_deref()
            .context("No file given on the command line")
    }
}
