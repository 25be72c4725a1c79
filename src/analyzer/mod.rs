//! Lexical and structural analysis of C-like source text
//!
//! This module turns source text into an [`AnalysisResult`]:
//! - [`lexer`]: Tokenization (source text → classified tokens)
//! - [`diagnostics`]: Line-based structural checks on the raw text
//! - [`tables`]: Symbol and constant tables (tokens → grouped entries)
//! - [`engine`]: Orchestration and the simulated compile step
//!
//! # Scope
//!
//! The analysis is deliberately shallow. There is no parser, no scoping and no
//! type checking; diagnostics come from a handful of line-local heuristics
//! (brace and parenthesis balance, presence of `main`, `if`/`printf` shape).
//!
//! Everything except [`Analyzer::compile`] is a pure synchronous function over
//! the input string.

pub mod constants;
pub mod diagnostics;
pub mod engine;
pub mod lexer;
pub mod tables;

pub use diagnostics::{Diagnostic, DiagnosticCode, Imbalance};
pub use engine::{
    analyze, AnalysisError, AnalysisResult, Analyzer, AnalyzerConfig, PendingAnalysis,
};
pub use lexer::{Token, TokenKind};
pub use tables::{ConstantEntry, ConstantKind, SymbolEntry};
