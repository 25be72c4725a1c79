//! Analysis orchestration
//!
//! [`analyze`] is the synchronous core: it guards blank input, tokenizes,
//! runs the structural checks and builds both tables. It never fails; every
//! problem with the input is reported as a [`Diagnostic`].
//!
//! [`Analyzer`] wraps the core in a simulated compile step. [`Analyzer::compile`]
//! waits for the configured delay before analyzing, and [`Analyzer::spawn`]
//! runs the same future on a tokio runtime and hands back a
//! [`PendingAnalysis`] the caller can poll without blocking.

use super::constants::{DEFAULT_COMPILE_DELAY, MSG_NO_CODE, MSG_SUCCESS};
use super::diagnostics::{check_source, trim_blank, Diagnostic, DiagnosticCode};
use super::lexer::tokenize;
use super::tables::{build_constant_table, build_symbol_table, ConstantEntry, SymbolEntry};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::{JoinError, JoinHandle};

/// Outcome of one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// True iff `diagnostics` is empty
    pub succeeded: bool,
    pub summary_message: String,
    pub diagnostics: Vec<Diagnostic>,
    pub symbol_table: Vec<SymbolEntry>,
    pub constant_table: Vec<ConstantEntry>,
}

impl AnalysisResult {
    fn empty_input() -> Self {
        AnalysisResult {
            succeeded: false,
            summary_message: MSG_NO_CODE.to_string(),
            diagnostics: vec![Diagnostic::new(1, DiagnosticCode::EmptyInput)],
            symbol_table: Vec::new(),
            constant_table: Vec::new(),
        }
    }
}

/// Analyze `source` and assemble the full result.
pub fn analyze(source: &str) -> AnalysisResult {
    if trim_blank(source).is_empty() {
        log::debug!("blank input, skipping analysis");
        return AnalysisResult::empty_input();
    }

    let tokens = tokenize(source);
    let diagnostics = check_source(source);
    let symbol_table = build_symbol_table(&tokens);
    let constant_table = build_constant_table(&tokens);

    let succeeded = diagnostics.is_empty();
    let summary_message = if succeeded {
        MSG_SUCCESS.to_string()
    } else {
        format!("Found {} error(s)", diagnostics.len())
    };

    log::debug!(
        "analysis done: {} symbol(s), {} constant(s), {} diagnostic(s)",
        symbol_table.len(),
        constant_table.len(),
        diagnostics.len()
    );

    AnalysisResult {
        succeeded,
        summary_message,
        diagnostics,
        symbol_table,
        constant_table,
    }
}

/// Settings for the simulated compile step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Wait applied before each analysis; `Duration::ZERO` disables it
    pub compile_delay: Duration,
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        AnalyzerConfig {
            compile_delay: DEFAULT_COMPILE_DELAY,
        }
    }

    pub fn with_compile_delay(mut self, delay: Duration) -> Self {
        self.compile_delay = delay;
        self
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Failure of a spawned analysis task
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis was cancelled before it finished")]
    Cancelled,

    #[error("analysis task panicked")]
    Panicked,
}

impl From<JoinError> for AnalysisError {
    fn from(err: JoinError) -> Self {
        if err.is_cancelled() {
            AnalysisError::Cancelled
        } else {
            AnalysisError::Panicked
        }
    }
}

/// Entry point for the simulated compile step
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Analyzer { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Wait for the configured compile delay, then analyze `source`.
    pub async fn compile(&self, source: String) -> AnalysisResult {
        let delay = self.config.compile_delay;
        if !delay.is_zero() {
            log::trace!("simulating compile time of {:?}", delay);
            tokio::time::sleep(delay).await;
        }
        analyze(&source)
    }

    /// Start [`compile`](Self::compile) on `runtime` and return immediately.
    ///
    /// Dropping the returned handle aborts the task.
    pub fn spawn(&self, runtime: &Handle, source: String) -> PendingAnalysis {
        let analyzer = self.clone();
        let task = runtime.spawn(async move { analyzer.compile(source).await });
        PendingAnalysis { task: Some(task) }
    }
}

/// An analysis started with [`Analyzer::spawn`] that may still be running
#[derive(Debug)]
pub struct PendingAnalysis {
    task: Option<JoinHandle<AnalysisResult>>,
}

impl PendingAnalysis {
    /// Whether [`wait`](Self::wait) would return without suspending
    pub fn is_ready(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }

    /// Stop the task; a later [`wait`](Self::wait) reports cancellation
    pub fn cancel(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    pub async fn wait(mut self) -> Result<AnalysisResult, AnalysisError> {
        match self.task.take() {
            Some(task) => Ok(task.await?),
            None => Err(AnalysisError::Cancelled),
        }
    }
}

impl Drop for PendingAnalysis {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
