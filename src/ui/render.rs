use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::{Focus, Mode, Model};
use crate::render::OutputLine;

use super::{STATUS_ROWS, overlays, status, style};

/// Split the pane area into input (left) and output (right) halves.
pub fn split_panes(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let panes_area = Rect {
        height: area.height.saturating_sub(STATUS_ROWS),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(STATUS_ROWS),
        height: STATUS_ROWS.min(area.height),
        ..area
    };

    frame.render_widget(Clear, panes_area);
    match model.mode {
        Mode::Edit => {
            let chunks = split_panes(panes_area);
            render_input(model, frame, chunks[0]);
            render_output(model, frame, chunks[1]);
        }
        Mode::View => render_output(model, frame, panes_area),
    }

    // The toast sits over the bottom border of the panes.
    if model.active_toast().is_some() && panes_area.height > 0 {
        let toast_area = Rect {
            y: panes_area.y + panes_area.height - 1,
            height: 1,
            ..panes_area
        };
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_input(model: &Model, frame: &mut Frame, area: Rect) {
    let input = model.session.input();
    let focused = model.focus == Focus::Input;
    let title = if input.is_dirty() {
        " Input [modified] "
    } else {
        " Input "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style::pane_border(focused, false));

    let total_lines = input.line_count();
    let gutter_width = line_number_width(total_lines) as usize;
    let cursor = input.cursor();

    let content: Vec<Line> = model
        .input_viewport
        .visible_range()
        .map(|line_idx| {
            let line_text = input.line_at(line_idx).unwrap_or_default();
            let line_num = format!("{:>gutter_width$} ", line_idx + 1);
            let mut spans = vec![Span::styled(line_num, style::gutter())];
            if focused && line_idx == cursor.line {
                spans.extend(cursor_spans(&line_text, cursor.col));
            } else {
                spans.push(Span::raw(line_text));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Split a line around the cursor column, which counts characters.
fn cursor_spans(line: &str, col: usize) -> Vec<Span<'static>> {
    let split = line.char_indices().nth(col).map_or(line.len(), |(idx, _)| idx);
    let (before, rest) = line.split_at(split);
    let mut rest_chars = rest.chars();
    let under = rest_chars.next().map_or_else(|| " ".to_string(), String::from);
    let after = rest_chars.as_str();

    let mut spans = Vec::with_capacity(3);
    if !before.is_empty() {
        spans.push(Span::raw(before.to_string()));
    }
    spans.push(Span::styled(under, style::cursor()));
    if !after.is_empty() {
        spans.push(Span::raw(after.to_string()));
    }
    spans
}

fn render_output(model: &Model, frame: &mut Frame, area: Rect) {
    let failed = model.output.error().is_some();
    let focused = model.mode == Mode::View || model.focus == Focus::Output;
    let title = if failed {
        " Output [parse error] "
    } else {
        " Output "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style::pane_border(focused, failed));

    let lines = model.output_lines();
    let range = model.output_viewport.visible_range();
    let end = range.end.min(lines.len());
    let start = range.start.min(end);
    let content: Vec<Line> = lines[start..end].iter().map(output_line).collect();

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn output_line(line: &OutputLine) -> Line<'static> {
    let mut spans = Vec::with_capacity(line.segments.len() + 1);
    if line.indent > 0 {
        spans.push(Span::raw(" ".repeat(line.indent)));
    }
    spans.extend(
        line.segments
            .iter()
            .map(|segment| Span::styled(segment.text.clone(), style::segment_style(segment))),
    );
    Line::from(spans)
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
