//! Main TUI application state and logic

use crate::analyzer::{AnalysisResult, Analyzer, PendingAnalysis};
use crate::ui::buffer::EditorBuffer;
use crate::ui::panes::{self, CompileBadge, OutputView};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;

/// Program shown when no file is given
pub const HELLO_PROGRAM: &str = r#"int x;
x = 10;
main() {
    printf("Hello World");
    return 0;
}"#;

/// Program loaded by the "load sample" key
pub const SAMPLE_PROGRAM: &str = r#"#include <stdio.h>

int factorial(int n) {
    if (n <= 1) {
        return 1;
    }
    return n * factorial(n - 1);
}

int main() {
    int num = 5;
    int result = factorial(num);
    printf("Factorial of %d is %d", num, result);
    return 0;
}"#;

/// Rows moved by PageUp/PageDown
const PAGE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Editor,
    Output,
}

impl FocusedPane {
    pub fn toggle(self) -> Self {
        match self {
            FocusedPane::Editor => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Editor,
        }
    }
}

/// A compile that has been started and not yet collected
struct InFlight {
    handle: PendingAnalysis,
    started: Instant,
}

/// The main application state
pub struct App {
    analyzer: Analyzer,
    runtime: Handle,

    /// The source being edited
    pub buffer: EditorBuffer,

    /// Result of the last finished compile
    pub result: Option<AnalysisResult>,

    in_flight: Option<InFlight>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub editor_scroll: usize,
    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app editing `source`.
    ///
    /// Compiles are spawned on `runtime`; the event loop itself never blocks
    /// on them.
    pub fn new(analyzer: Analyzer, runtime: Handle, source: &str) -> Self {
        App {
            analyzer,
            runtime,
            buffer: EditorBuffer::from_text(source),
            result: None,
            in_flight: None,
            focused_pane: FocusedPane::Editor,
            editor_scroll: 0,
            output_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    pub fn is_compiling(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.collect_finished();

            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Poll with a timeout so the spinner keeps moving while compiling
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Start a compile of the current buffer, superseding any pending one
    pub fn compile(&mut self) {
        if self.buffer.is_blank() {
            self.status_message = "Nothing to compile".to_string();
            return;
        }

        if self.in_flight.is_some() {
            log::debug!("superseding the pending compile");
        }

        let handle = self.analyzer.spawn(&self.runtime, self.buffer.text());
        self.in_flight = Some(InFlight {
            handle,
            started: Instant::now(),
        });
        self.status_message = "Compiling...".to_string();
    }

    /// Move a finished compile into `result`
    pub fn collect_finished(&mut self) {
        let ready = self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.handle.is_ready());
        if !ready {
            return;
        }

        let Some(in_flight) = self.in_flight.take() else {
            return;
        };

        match self.runtime.block_on(in_flight.handle.wait()) {
            Ok(result) => {
                self.status_message = result.summary_message.clone();
                self.result = Some(result);
                self.output_scroll = 0;
            }
            Err(e) => {
                log::error!("compile failed: {}", e);
                self.status_message = format!("Error: {}", e);
            }
        }
    }

    /// Empty the editor and forget the last result
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.result = None;
        self.in_flight = None;
        self.editor_scroll = 0;
        self.output_scroll = 0;
        self.status_message = "Cleared".to_string();
    }

    pub fn load_sample(&mut self) {
        self.buffer.set_text(SAMPLE_PROGRAM);
        self.editor_scroll = 0;
        self.status_message = "Sample loaded".to_string();
    }

    fn badge(&self) -> CompileBadge {
        match (&self.in_flight, &self.result) {
            (Some(_), _) => CompileBadge::Compiling,
            (None, Some(result)) if result.succeeded => CompileBadge::Succeeded,
            (None, Some(_)) => CompileBadge::Failed,
            (None, None) => CompileBadge::Ready,
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Two panes side by side, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        panes::render_editor_pane(
            frame,
            columns[0],
            &self.buffer,
            self.focused_pane == FocusedPane::Editor,
            &mut self.editor_scroll,
        );

        let view = match (&self.in_flight, &self.result) {
            (Some(in_flight), _) => OutputView::Compiling {
                elapsed: in_flight.started.elapsed(),
            },
            (None, Some(result)) => OutputView::Finished(result),
            (None, None) => OutputView::Idle,
        };

        panes::render_output_pane(
            frame,
            columns[1],
            view,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        panes::render_status_bar(frame, main_chunks[1], &self.status_message, self.badge());
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::F(5) => self.compile(),
            KeyCode::Char('r') if ctrl => self.compile(),
            KeyCode::Char('l') if ctrl => self.clear(),
            KeyCode::Char('o') if ctrl => self.load_sample(),
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.toggle();
            }
            _ => match self.focused_pane {
                FocusedPane::Editor => self.handle_editor_key(key),
                FocusedPane::Output => self.handle_output_key(key),
            },
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.insert_char(c)
            }
            KeyCode::Enter => self.buffer.insert_newline(),
            KeyCode::Backspace => self.buffer.backspace(),
            KeyCode::Delete => self.buffer.delete(),
            KeyCode::Left => self.buffer.move_left(),
            KeyCode::Right => self.buffer.move_right(),
            KeyCode::Up => self.buffer.move_up(1),
            KeyCode::Down => self.buffer.move_down(1),
            KeyCode::PageUp => self.buffer.move_up(PAGE),
            KeyCode::PageDown => self.buffer.move_down(PAGE),
            KeyCode::Home => self.buffer.move_home(),
            KeyCode::End => self.buffer.move_end(),
            _ => {}
        }
    }

    fn handle_output_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.output_scroll = self.output_scroll.saturating_sub(1),
            KeyCode::Down => self.output_scroll = self.output_scroll.saturating_add(1),
            KeyCode::PageUp => self.output_scroll = self.output_scroll.saturating_sub(PAGE),
            KeyCode::PageDown => self.output_scroll = self.output_scroll.saturating_add(PAGE),
            KeyCode::Home => self.output_scroll = 0,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalyzerConfig;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn app_with(runtime: &tokio::runtime::Runtime, source: &str) -> App {
        let analyzer = Analyzer::new(AnalyzerConfig::new().with_compile_delay(Duration::ZERO));
        App::new(analyzer, runtime.handle().clone(), source)
    }

    fn wait_for_result(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.is_compiling() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
            app.collect_finished();
        }
    }

    #[test]
    fn test_compile_round_trip() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app_with(&runtime, HELLO_PROGRAM);

        app.handle_key_event(press(KeyCode::F(5), KeyModifiers::NONE));
        assert!(app.is_compiling());
        assert_eq!(app.badge(), CompileBadge::Compiling);

        wait_for_result(&mut app);

        let result = app.result.as_ref().unwrap();
        assert!(result.succeeded);
        assert_eq!(app.status_message, "Code compiled successfully!");
        assert_eq!(app.badge(), CompileBadge::Succeeded);
    }

    #[test]
    fn test_newest_compile_wins() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let analyzer =
            Analyzer::new(AnalyzerConfig::new().with_compile_delay(Duration::from_millis(50)));
        let mut app = App::new(analyzer, runtime.handle().clone(), "int x;");

        app.compile();
        app.buffer.set_text(HELLO_PROGRAM);
        app.compile();
        wait_for_result(&mut app);

        let expected = crate::analyzer::analyze(HELLO_PROGRAM);
        assert_eq!(app.result.as_ref(), Some(&expected));
        assert_eq!(app.status_message, expected.summary_message);

        // the superseded compile never lands afterwards
        std::thread::sleep(Duration::from_millis(120));
        app.collect_finished();
        assert_eq!(app.result.as_ref(), Some(&expected));
        assert_eq!(app.badge(), CompileBadge::Succeeded);
    }

    #[test]
    fn test_blank_buffer_is_not_compiled() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app_with(&runtime, "   ");

        app.compile();

        assert!(!app.is_compiling());
        assert_eq!(app.status_message, "Nothing to compile");
    }

    #[test]
    fn test_clear_drops_result_and_text() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app_with(&runtime, "int x;");

        app.compile();
        wait_for_result(&mut app);
        assert!(app.result.is_some());

        app.handle_key_event(press(KeyCode::Char('l'), KeyModifiers::CONTROL));

        assert!(app.result.is_none());
        assert_eq!(app.buffer.text(), "");
        assert_eq!(app.badge(), CompileBadge::Ready);
    }

    #[test]
    fn test_typing_goes_to_editor_only_when_focused() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app_with(&runtime, "");

        app.handle_key_event(press(KeyCode::Char('x'), KeyModifiers::NONE));
        app.handle_key_event(press(KeyCode::Tab, KeyModifiers::NONE));
        app.handle_key_event(press(KeyCode::Char('y'), KeyModifiers::NONE));

        assert_eq!(app.buffer.text(), "x");
        assert_eq!(app.focused_pane, FocusedPane::Output);
    }

    #[test]
    fn test_load_sample() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app_with(&runtime, "");

        app.handle_key_event(press(KeyCode::Char('o'), KeyModifiers::CONTROL));

        assert_eq!(app.buffer.text(), SAMPLE_PROGRAM);
        assert_eq!(app.buffer.line_count(), 15);
    }
}
