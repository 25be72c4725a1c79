//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, the
//!   in-flight compile handle
//! - **[`buffer`]**: the editable source text and cursor
//! - **[`panes`]**: stateless render functions for each visible pane (editor,
//!   output, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with an [`Analyzer`],
//! a tokio runtime handle and the initial source, then call [`App::run`] to
//! start the event loop.
//!
//! [`Analyzer`]: crate::analyzer::Analyzer
//! [`App::run`]: app::App::run

pub mod app;
pub mod buffer;
pub mod panes;
pub mod theme;

pub use app::App;
