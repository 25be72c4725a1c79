//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`editor`]: Editable source with line numbers and syntax highlighting
//! - [`output`]: Compile status, diagnostics, symbol table and constant table
//! - [`status`]: Status bar with keybindings and compile state
//!
//! Each pane module exports a primary `render_*` function. Panes are stateless
//! apart from the scroll offsets the caller passes in.

pub mod editor;
pub mod output;
pub mod status;

// Re-export render functions for convenience
pub use editor::render_editor_pane;
pub use output::{render_output_pane, OutputView};
pub use status::{render_status_bar, CompileBadge};
