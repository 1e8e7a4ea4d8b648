use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Mode, Model};
use crate::session::SessionState;

use super::style;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let failure = model.session.failure_message();
    let bar = Paragraph::new(status_text(model)).style(style::status_bar(failure.is_some()));
    frame.render_widget(bar, area);
}

/// Status line: mode, file, cursor or scroll position, then render state.
pub fn status_text(model: &Model) -> String {
    let filename = model
        .file_path
        .as_ref()
        .and_then(|path| path.file_name())
        .map_or_else(
            || "untitled".to_string(),
            |name| name.to_string_lossy().to_string(),
        );
    let input = model.session.input();
    let dirty = if input.is_dirty() { " [modified]" } else { "" };
    let watching = if model.watch_enabled {
        " [watching]"
    } else {
        ""
    };

    let mut status = match model.mode {
        Mode::Edit => {
            let cursor = input.cursor();
            format!(
                " EDIT  {filename}{dirty}  Ln {}, Col {}{watching}",
                cursor.line + 1,
                cursor.col + 1
            )
        }
        Mode::View => format!(
            " VIEW  {filename}{dirty}  [{}%]{watching}",
            model.output_viewport.scroll_percent()
        ),
    };

    if let Some(message) = model.session.failure_message() {
        status.push_str("  error: ");
        status.push_str(message);
    } else if matches!(model.session.state(), SessionState::PendingRender { .. }) {
        status.push_str("  rendering...");
    }
    status.push_str("  F1:help");
    status
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = style::toast(level);
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
