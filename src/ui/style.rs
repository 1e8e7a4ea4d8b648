//! Terminal styles for rendered output and pane chrome.

use ratatui::style::{Color, Modifier, Style};

use crate::app::ToastLevel;
use crate::render::{Rgb, Segment};

pub const fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Style for one run of output text. Badges are bold on their kind color;
/// unstyled text such as object keys keeps the terminal's colors.
pub fn segment_style(segment: &Segment) -> Style {
    let mut style = Style::default();
    if let Some(fg) = segment.foreground {
        style = style.fg(color(fg));
    }
    if let Some(bg) = segment.background {
        style = style.bg(color(bg)).add_modifier(Modifier::BOLD);
    }
    style
}

pub fn pane_border(focused: bool, failed: bool) -> Style {
    if failed {
        Style::default().fg(Color::Red)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn gutter() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn cursor() -> Style {
    Style::default().bg(Color::White).fg(Color::Black)
}

pub fn status_bar(failed: bool) -> Style {
    if failed {
        Style::default().bg(Color::Red).fg(Color::White)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

pub fn toast(level: ToastLevel) -> (&'static str, Style) {
    match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => ("[warn]", Style::default().bg(Color::Yellow).fg(Color::Black)),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::style::{BLACK, ORANGE};

    #[test]
    fn test_badge_segment_is_bold_on_its_color() {
        let segment = Segment {
            text: "[String] \"a\"".into(),
            foreground: Some(BLACK),
            background: Some(ORANGE),
        };
        let style = segment_style(&segment);
        assert_eq!(style.bg, Some(Color::Rgb(255, 165, 0)));
        assert_eq!(style.fg, Some(Color::Rgb(0, 0, 0)));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_plain_segment_is_unstyled() {
        let segment = Segment {
            text: "\"key\"".into(),
            foreground: None,
            background: None,
        };
        assert_eq!(segment_style(&segment), Style::default());
    }
}
