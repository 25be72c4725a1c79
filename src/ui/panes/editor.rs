//! Editor pane rendering with syntax highlighting
//!
//! Displays the editable source buffer with line numbers, a highlighted cursor
//! line and basic C highlighting. The highlighter is a small character scanner
//! of its own so that half-typed code (unterminated strings, stray comment
//! openers) still renders sensibly.

use crate::analyzer::constants::KEYWORDS;
use crate::ui::buffer::EditorBuffer;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of the line-number gutter, including the trailing space
const GUTTER_WIDTH: u16 = 5;

/// Simple syntax highlighting for one line of C code
fn highlight_source_code(line: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Line comments swallow the rest of the line
        if c == '/' && chars.get(i + 1) == Some(&'/') {
            flush_word(&mut spans, &mut current_word, false);
            spans.push(Span::styled(
                chars[i..].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            break;
        }

        // Strings and character literals, unterminated ones run to end of line
        if c == '"' || c == '\'' {
            flush_word(&mut spans, &mut current_word, false);
            let mut end = i + 1;
            while end < chars.len() && chars[end] != c {
                end += 1;
            }
            end = (end + 1).min(chars.len());
            spans.push(Span::styled(
                chars[i..end].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        // Handle non-alphanumeric (delimiters)
        if !c.is_alphanumeric() && c != '_' && c != '.' {
            flush_word(&mut spans, &mut current_word, c == '(');

            let style = match c {
                '{' | '}' | '(' | ')' => Style::default().fg(DEFAULT_THEME.primary),
                '+' | '-' | '*' | '/' | '%' | '=' | '&' | '|' | '!' | '<' | '>' => {
                    Style::default().fg(DEFAULT_THEME.operator)
                }
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word, false);
    spans
}

fn flush_word(spans: &mut Vec<Span<'static>>, word: &mut String, is_function: bool) {
    if word.is_empty() {
        return;
    }
    let style = get_word_style(word, is_function);
    spans.push(Span::styled(std::mem::take(word), style));
}

fn get_word_style(word: &str, is_function: bool) -> Style {
    match word {
        "int" | "float" | "char" | "double" | "void" => Style::default().fg(DEFAULT_THEME.type_name),
        "main" | "printf" | "scanf" => Style::default().fg(DEFAULT_THEME.function),
        w if KEYWORDS.contains(&w) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        w if w.starts_with(|c: char| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ => {
            if is_function {
                Style::default().fg(DEFAULT_THEME.function)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            }
        }
    }
}

/// Render the editor pane
pub fn render_editor_pane(
    frame: &mut Frame,
    area: Rect,
    buffer: &EditorBuffer,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Code Editor ({} lines) ", buffer.line_count()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let (cursor_row, cursor_col) = buffer.cursor();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Keep the cursor row inside the viewport
    if cursor_row < *scroll_offset {
        *scroll_offset = cursor_row;
    } else if cursor_row >= *scroll_offset + visible_height {
        *scroll_offset = cursor_row + 1 - visible_height;
    }

    let lines: Vec<Line> = buffer
        .lines()
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(index, text)| {
            let mut spans = vec![Span::styled(
                format!("{:>4} ", index + 1),
                Style::default().fg(DEFAULT_THEME.comment),
            )];
            spans.extend(highlight_source_code(text));

            let line = Line::from(spans);
            if index == cursor_row {
                line.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                line
            }
        })
        .collect();

    if buffer.line_count() == 1 && buffer.lines()[0].is_empty() {
        let placeholder = Paragraph::new("Enter your C code here...")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(placeholder, area);
    } else {
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    if is_focused {
        // Hide the cursor once it sits past the right border
        let text_width = usize::from(area.width.saturating_sub(2 + GUTTER_WIDTH));
        let visible_row = cursor_row - *scroll_offset;
        if cursor_col < text_width && visible_row < visible_height {
            if let (Ok(col), Ok(row)) = (u16::try_from(cursor_col), u16::try_from(visible_row)) {
                let x = area.x.saturating_add(1 + GUTTER_WIDTH).saturating_add(col);
                let y = area.y.saturating_add(1).saturating_add(row);
                frame.set_cursor_position((x, y));
            }
        }
    }
}
