//! Status bar rendering with keybindings and compile state

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Compile state shown in the status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileBadge {
    Ready,
    Compiling,
    Succeeded,
    Failed,
}

impl CompileBadge {
    fn label(self) -> &'static str {
        match self {
            CompileBadge::Ready => " READY ",
            CompileBadge::Compiling => " ⟳ COMPILING ",
            CompileBadge::Succeeded => " ✓ OK ",
            CompileBadge::Failed => " ✗ ERRORS ",
        }
    }

    fn color(self) -> Color {
        match self {
            CompileBadge::Ready => DEFAULT_THEME.primary,
            CompileBadge::Compiling => DEFAULT_THEME.secondary,
            CompileBadge::Succeeded => DEFAULT_THEME.success,
            CompileBadge::Failed => DEFAULT_THEME.error,
        }
    }
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, badge: CompileBadge) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let left_spans = vec![
        Span::styled(
            badge.label(),
            Style::default()
                .bg(badge.color())
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(if badge == CompileBadge::Failed {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.fg
                }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let bindings = [
        ("F5", "compile"),
        ("^O", "sample"),
        ("^L", "clear"),
        ("Tab", "focus"),
        ("Esc", "quit"),
    ];

    let mut right_spans = Vec::new();
    for (index, (key, desc)) in bindings.iter().enumerate() {
        if index > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(format!(" {} ", key), key_style));
        right_spans.push(Span::styled(format!(" {} ", desc), desc_style));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
