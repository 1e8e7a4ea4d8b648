use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::session::{Debouncer, EditSession};
use crate::watcher::FileWatcher;

/// Longest the loop sleeps when nothing is scheduled.
const IDLE_POLL_MS: u64 = 250;

/// Holds back terminal resizes until the size stops changing.
pub(super) struct ResizeDebouncer {
    timer: Debouncer,
    size: (u16, u16),
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            timer: Debouncer::new(delay_ms),
            size: (0, 0),
        }
    }

    pub(super) fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.size = (width, height);
        self.timer.queue(now_ms);
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        self.timer.take_ready(now_ms).map(|_| self.size)
    }

    pub(super) fn deadline_ms(&self) -> Option<u64> {
        self.timer.deadline_ms()
    }
}

impl App {
    /// Run the interactive terminal UI until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized or the event
    /// loop hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; lazyview needs an interactive terminal")?;
        let size = terminal.size()?;

        let session = EditSession::new(self.format, self.take_input(), self.debounce_ms);
        let mut model = Model::new(
            session,
            self.file_path.clone(),
            self.mode,
            (size.width, size.height),
        );
        model.watch_enabled = self.watch_enabled;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model.render_now();

        let _ = execute!(stdout(), EnableMouseCapture, EnableBracketedPaste);
        let result = Self::event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let clock = || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut file_watcher: Option<FileWatcher> = None;
        if model.watch_enabled {
            Self::start_watching(model, &mut file_watcher);
        }
        let mut needs_render = true;

        loop {
            let now_ms = clock();
            if model.tick(now_ms) {
                needs_render = true;
            }

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                tracing::debug!(width, height, "resize applied");
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            if model.watch_enabled
                && file_watcher
                    .as_mut()
                    .is_some_and(FileWatcher::take_changed)
            {
                Self::dispatch(model, &mut file_watcher, Message::FileChanged);
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }
            if model.should_quit {
                break;
            }

            // Sleep until the next event or the earliest scheduled deadline.
            let wake_at = [model.session.deadline(), resize_debouncer.deadline_ms()]
                .into_iter()
                .flatten()
                .min();
            let poll_ms = wake_at.map_or(IDLE_POLL_MS, |at| {
                at.saturating_sub(clock()).min(IDLE_POLL_MS)
            });
            if !event::poll(Duration::from_millis(poll_ms))? {
                continue;
            }

            // Drain everything queued so key-repeat bursts cost one draw.
            loop {
                let event_ms = clock();
                model.now_ms = event_ms;
                let msg =
                    Self::handle_event(event::read()?, model, event_ms, &mut resize_debouncer);
                if let Some(msg) = msg {
                    Self::dispatch(model, &mut file_watcher, msg);
                    needs_render = true;
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }
        Ok(())
    }

    fn dispatch(model: &mut Model, file_watcher: &mut Option<FileWatcher>, msg: Message) {
        tracing::trace!(?msg, "message");
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, file_watcher, &side_msg);
    }
}
