use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

/// Key bindings shown in help, grouped by the pane they act on.
const KEY_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Input",
        &[
            ("Type", "Edit the document"),
            ("Arrows, Home/End", "Move the cursor"),
            ("Ctrl-Home/End", "Start / end of input"),
            ("Ctrl-r", "Render now"),
            ("Ctrl-s", "Save file"),
            ("Tab / Esc", "Switch pane"),
        ],
    ),
    (
        "Output",
        &[
            ("j/k or Up/Down", "Scroll"),
            ("Space / b", "Page down / up"),
            ("Ctrl-d / Ctrl-u", "Half page"),
            ("g / G", "Top / bottom"),
            ("r", "Reload file"),
        ],
    ),
    (
        "Other",
        &[
            ("w / Ctrl-w", "Toggle watch"),
            ("q / Ctrl-c / Ctrl-q", "Quit"),
            ("? / F1", "Toggle help"),
        ],
    ),
];

fn help_lines(model: &Model) -> Vec<Line<'static>> {
    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let path_or = |path: Option<&std::path::Path>, missing: &str| {
        path.map_or_else(|| missing.to_string(), |p| p.display().to_string())
    };

    let mut lines = Vec::new();
    for (section, keys) in KEY_SECTIONS {
        lines.push(Line::styled(*section, section_style));
        lines.extend(
            keys.iter()
                .map(|(keys, action)| Line::raw(format!("  {keys:<20}{action}"))),
        );
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!(
        "  Global: {}",
        path_or(model.config_global_path.as_deref(), "<unknown>")
    )));
    lines.push(Line::raw(format!(
        "  Local override: {}",
        path_or(model.config_local_path.as_deref(), "<none>")
    )));
    lines
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup = centered_popup_rect(
        area.width.saturating_sub(12).max(48),
        area.height.saturating_sub(6).max(12),
        area,
    );
    let lines = help_lines(model);

    let block = Block::default()
        .title("Help")
        .title_bottom(Line::styled(
            " j/k scroll, any other key closes ",
            Style::default().fg(Color::Indexed(245)),
        ))
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    let visible = usize::from(block.inner(popup).height);
    let scroll = model
        .help_scroll_offset
        .min(lines.len().saturating_sub(visible));
    let help = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));

    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
