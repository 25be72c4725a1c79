//! # Introduction
//!
//! clens simulates the front of a C compile step. It tokenizes a snippet of
//! C-like source, reports a symbol table and a constant table derived from the
//! tokens, and runs a few structural syntax checks over the raw text. Results
//! are shown in a terminal UI built with [ratatui](https://docs.rs/ratatui) or
//! printed as JSON.
//!
//! ## Analysis pipeline
//!
//! ```text
//!          ┌→ Lexer → Table builder ┐
//! Source ──┤                        ├→ AnalysisResult → TUI / JSON
//!          └→ Structural checks ────┘
//! ```
//!
//! 1. [`analyzer::lexer`]: per-line comment stripping and lexeme scanning.
//! 2. [`analyzer::diagnostics`]: brace/parenthesis balance, `main` presence
//!    and `if`/`printf` shape checks.
//! 3. [`analyzer::tables`]: deduplicated, line-indexed symbol and constant
//!    tables.
//! 4. [`analyzer::engine`]: [`analyze`] plus the delayed, non-blocking
//!    [`Analyzer`] front.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! let result = clens::analyze("int main() { return 0; }");
//! assert!(result.succeeded);
//! assert_eq!(result.summary_message, "Code compiled successfully!");
//! ```

pub mod analyzer;
pub mod ui;

pub use analyzer::{analyze, AnalysisResult, Analyzer, AnalyzerConfig};
