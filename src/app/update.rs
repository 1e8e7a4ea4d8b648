use crate::app::Model;
use crate::app::model::{Focus, Mode, ToastLevel};
use crate::editor::Direction;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Output navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    GoToTop,
    GoToBottom,

    // Input editing
    InsertChar(char),
    /// Pasted text
    InsertText(String),
    /// Delete character before cursor (Backspace)
    DeleteBack,
    /// Delete character at cursor (Delete)
    DeleteForward,
    /// Split line at cursor (Enter)
    SplitLine,
    MoveCursor(Direction),
    MoveHome,
    MoveEnd,
    MoveToStart,
    MoveToEnd,
    /// Save the input to its file
    Save,

    // Rendering and files
    /// Clock advanced to this many milliseconds since start
    Tick(u64),
    /// Render immediately instead of waiting for the debounce
    RenderNow,
    /// The watched file changed on disk
    FileChanged,
    /// Reread the input file
    Reload,
    ToggleWatch,

    // Window
    /// Move keyboard focus between input and output
    SwitchFocus,
    ToggleHelp,
    HideHelp,
    HelpScrollUp,
    HelpScrollDown,
    /// Terminal resized
    Resize(u16, u16),
    Quit,
}

impl Message {
    const fn edits_input(&self) -> bool {
        matches!(
            self,
            Self::InsertChar(_)
                | Self::InsertText(_)
                | Self::DeleteBack
                | Self::DeleteForward
                | Self::SplitLine
        )
    }
}

/// Pure state transition for one message.
///
/// File IO and watcher changes happen afterwards in the side-effect pass.
pub fn update(mut model: Model, msg: Message) -> Model {
    if !matches!(msg, Message::Quit | Message::Save | Message::Tick(_)) {
        model.quit_confirmed = false;
    }
    if msg.edits_input() && !model.input_focused() {
        return model;
    }

    match msg {
        Message::ScrollUp(n) => model.output_viewport.scroll_up(n),
        Message::ScrollDown(n) => model.output_viewport.scroll_down(n),
        Message::PageUp => model.output_viewport.page_up(),
        Message::PageDown => model.output_viewport.page_down(),
        Message::HalfPageUp => model.output_viewport.half_page_up(),
        Message::HalfPageDown => model.output_viewport.half_page_down(),
        Message::GoToTop => model.output_viewport.go_to_top(),
        Message::GoToBottom => model.output_viewport.go_to_bottom(),

        Message::InsertChar(ch) => {
            model.session.input_mut().insert_char(ch);
            model.input_edited();
        }
        Message::InsertText(text) => {
            // Terminals paste line breaks as `\r`.
            let text = text.replace("\r\n", "\n").replace('\r', "\n");
            if model.session.input_mut().insert_str(&text) {
                model.input_edited();
            }
        }
        Message::DeleteBack => {
            if model.session.input_mut().delete_back() {
                model.input_edited();
            }
        }
        Message::DeleteForward => {
            if model.session.input_mut().delete_forward() {
                model.input_edited();
            }
        }
        Message::SplitLine => {
            model.session.input_mut().split_line();
            model.input_edited();
        }
        Message::MoveCursor(direction) => {
            model.session.input_mut().move_cursor(direction);
            model.follow_cursor();
        }
        Message::MoveHome => model.session.input_mut().move_home(),
        Message::MoveEnd => model.session.input_mut().move_end(),
        Message::MoveToStart => {
            model.session.input_mut().move_to_start();
            model.follow_cursor();
        }
        Message::MoveToEnd => {
            model.session.input_mut().move_to_end();
            model.follow_cursor();
        }

        Message::Tick(now_ms) => {
            model.tick(now_ms);
        }
        Message::RenderNow => {
            model.render_now();
        }
        Message::ToggleWatch => {
            if model.file_path.is_some() {
                model.watch_enabled = !model.watch_enabled;
            } else {
                model.show_toast(ToastLevel::Warning, "Nothing to watch without a file");
            }
        }

        Message::SwitchFocus => {
            if model.mode == Mode::Edit {
                model.focus = match model.focus {
                    Focus::Input => Focus::Output,
                    Focus::Output => Focus::Input,
                };
            }
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
            model.help_scroll_offset = 0;
        }
        Message::HideHelp => model.help_visible = false,
        Message::HelpScrollUp => {
            model.help_scroll_offset = model.help_scroll_offset.saturating_sub(1);
        }
        Message::HelpScrollDown => model.help_scroll_offset += 1,
        Message::Resize(_, height) => model.resize(height),

        Message::Quit => {
            let unsaved = model.file_path.is_some() && model.session.input().is_dirty();
            if unsaved && !model.quit_confirmed {
                model.quit_confirmed = true;
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes. Quit again to discard, Ctrl-s to save",
                );
            } else {
                model.should_quit = true;
            }
        }

        Message::Save | Message::FileChanged | Message::Reload => {}
    }

    model
}
