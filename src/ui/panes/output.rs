//! Compilation output pane: status, diagnostics, symbol and constant tables

use crate::analyzer::{AnalysisResult, ConstantEntry, ConstantKind, SymbolEntry, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Row, Table},
    Frame,
};
use std::time::Duration;

const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// What the output pane currently has to show
pub enum OutputView<'a> {
    /// Nothing compiled yet
    Idle,
    /// A compile is in flight
    Compiling { elapsed: Duration },
    Finished(&'a AnalysisResult),
}

fn pane_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Render the output pane.
///
/// `scroll_offset` scrolls both tables together and is clamped to the longest
/// one.
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    view: OutputView<'_>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    match view {
        OutputView::Idle => {
            let paragraph = Paragraph::new(vec![
                Line::from("Compile your code to see the results here."),
                Line::from(""),
                Line::from(Span::styled(
                    "F5 / Ctrl-R compile   Ctrl-O load sample   Ctrl-L clear",
                    Style::default().fg(DEFAULT_THEME.comment),
                )),
            ])
            .block(pane_block(" Compilation Output ".to_string(), is_focused))
            .style(Style::default().fg(DEFAULT_THEME.fg));
            frame.render_widget(paragraph, area);
        }
        OutputView::Compiling { elapsed } => {
            let frame_index = (elapsed.as_millis() / 80) as usize % SPINNER.len();
            let paragraph = Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("{} ", SPINNER[frame_index]),
                    Style::default().fg(DEFAULT_THEME.secondary),
                ),
                Span::raw("Analyzing your code..."),
            ]))
            .block(pane_block(" Compiling... ".to_string(), is_focused))
            .style(Style::default().fg(DEFAULT_THEME.fg));
            frame.render_widget(paragraph, area);
        }
        OutputView::Finished(result) => {
            render_result(frame, area, result, is_focused, scroll_offset);
        }
    }
}

fn render_result(
    frame: &mut Frame,
    area: Rect,
    result: &AnalysisResult,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let diagnostics_height = if result.diagnostics.is_empty() {
        0
    } else {
        // two rows per entry plus borders, capped at a third of the pane
        let wanted = result.diagnostics.len().saturating_mul(2).saturating_add(2);
        let cap = area.height / 3;
        u16::try_from(wanted).map_or(cap, |rows| rows.min(cap))
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(diagnostics_height),
            Constraint::Min(0),
        ])
        .split(area);

    render_status_card(frame, rows[0], result, is_focused);

    if !result.diagnostics.is_empty() {
        let items: Vec<ListItem> = result
            .diagnostics
            .iter()
            .map(|diag| {
                let mut lines = vec![Line::from(vec![
                    Span::styled(
                        format!("Line {}: ", diag.line),
                        Style::default()
                            .fg(DEFAULT_THEME.error)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(diag.message.clone(), Style::default().fg(DEFAULT_THEME.fg)),
                ])];
                if let Some(details) = &diag.details {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", details),
                        Style::default().fg(DEFAULT_THEME.comment),
                    )));
                }
                ListItem::new(lines)
            })
            .collect();

        let title = format!(" Errors ({}) ", result.diagnostics.len());
        frame.render_widget(List::new(items).block(pane_block(title, is_focused)), rows[1]);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[2]);

    let visible_height = columns[0].height.saturating_sub(3).max(1) as usize; // borders + header
    let longest = result
        .symbol_table
        .len()
        .max(result.constant_table.len());
    *scroll_offset = (*scroll_offset).min(longest.saturating_sub(visible_height));

    render_symbol_table(frame, columns[0], &result.symbol_table, is_focused, *scroll_offset);
    render_constant_table(frame, columns[1], &result.constant_table, is_focused, *scroll_offset);
}

fn render_status_card(frame: &mut Frame, area: Rect, result: &AnalysisResult, is_focused: bool) {
    let (badge, color) = if result.succeeded {
        (" ✓ Compilation Successful ", DEFAULT_THEME.success)
    } else {
        (" ✗ Compilation Failed ", DEFAULT_THEME.error)
    };

    let line = Line::from(vec![
        Span::styled(
            badge,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            result.summary_message.clone(),
            Style::default().fg(DEFAULT_THEME.fg),
        ),
    ]);

    let paragraph =
        Paragraph::new(line).block(pane_block(" Compilation Status ".to_string(), is_focused));
    frame.render_widget(paragraph, area);
}

fn kind_style(kind: TokenKind) -> Style {
    let color = match kind {
        TokenKind::Identifier => DEFAULT_THEME.primary,
        TokenKind::Keyword => DEFAULT_THEME.keyword,
        TokenKind::Operator => DEFAULT_THEME.operator,
        TokenKind::Constant => DEFAULT_THEME.number,
        TokenKind::String => DEFAULT_THEME.string,
        TokenKind::Punctuator => DEFAULT_THEME.comment,
        TokenKind::Unknown => DEFAULT_THEME.unknown,
    };
    Style::default().fg(color)
}

fn header_row(columns: [&'static str; 3]) -> Row<'static> {
    Row::new(columns).style(
        Style::default()
            .fg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::BOLD),
    )
}

fn render_symbol_table(
    frame: &mut Frame,
    area: Rect,
    entries: &[SymbolEntry],
    is_focused: bool,
    scroll_offset: usize,
) {
    let rows: Vec<Row> = entries
        .iter()
        .skip(scroll_offset)
        .map(|entry| {
            Row::new(vec![
                Span::styled(entry.token.clone(), Style::default().fg(DEFAULT_THEME.fg)),
                Span::styled(entry.kind.as_str(), kind_style(entry.kind)),
                Span::styled(entry.lines_display(), Style::default().fg(DEFAULT_THEME.comment)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
        ],
    )
    .header(header_row(["Token", "Type", "Lines"]))
    .block(pane_block(
        format!(" Symbol Table ({} entries) ", entries.len()),
        is_focused,
    ));

    frame.render_widget(table, area);
}

fn render_constant_table(
    frame: &mut Frame,
    area: Rect,
    entries: &[ConstantEntry],
    is_focused: bool,
    scroll_offset: usize,
) {
    let rows: Vec<Row> = entries
        .iter()
        .skip(scroll_offset)
        .map(|entry| {
            let style = match entry.kind {
                ConstantKind::Numeric => kind_style(TokenKind::Constant),
                ConstantKind::StringLiteral => kind_style(TokenKind::String),
            };
            Row::new(vec![
                Span::styled(entry.value.clone(), Style::default().fg(DEFAULT_THEME.fg)),
                Span::styled(entry.kind.as_str(), style),
                Span::styled(entry.lines_display(), Style::default().fg(DEFAULT_THEME.comment)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(40),
            Constraint::Percentage(25),
        ],
    )
    .header(header_row(["Value", "Type", "Lines"]))
    .block(pane_block(
        format!(" Constant Table ({} entries) ", entries.len()),
        is_focused,
    ));

    frame.render_widget(table, area);
}
