//! Symbol and constant tables built from the token stream
//!
//! Both tables group tokens by their exact text. Entries keep the order in
//! which their text was first seen, and each entry records the ascending,
//! deduplicated list of lines the text occurs on.

use super::lexer::{Token, TokenKind};
use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Label for a literal in the constant table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantKind {
    Numeric,
    StringLiteral,
}

impl ConstantKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConstantKind::Numeric => "Numeric Constant",
            ConstantKind::StringLiteral => "String Literal",
        }
    }

    fn of(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Constant => Some(ConstantKind::Numeric),
            TokenKind::String => Some(ConstantKind::StringLiteral),
            _ => None,
        }
    }
}

impl fmt::Display for ConstantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConstantKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One row of the symbol table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolEntry {
    pub token: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    #[serde(serialize_with = "serialize_lines")]
    pub lines: Vec<usize>,
}

impl SymbolEntry {
    /// Occurrence lines as shown to the user, e.g. `"1, 3"`
    pub fn lines_display(&self) -> String {
        join_lines(&self.lines)
    }
}

/// One row of the constant table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantEntry {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: ConstantKind,
    #[serde(serialize_with = "serialize_lines")]
    pub lines: Vec<usize>,
}

impl ConstantEntry {
    pub fn lines_display(&self) -> String {
        join_lines(&self.lines)
    }
}

fn join_lines(lines: &[usize]) -> String {
    lines
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn serialize_lines<S: Serializer>(lines: &[usize], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&join_lines(lines))
}

/// Insertion-ordered grouping of tokens by text.
///
/// The first occurrence of a text fixes its label; later occurrences only
/// contribute line numbers.
struct LineIndex<L> {
    entries: Vec<(String, L, Vec<usize>)>,
    positions: FxHashMap<String, usize>,
}

impl<L> LineIndex<L> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: FxHashMap::default(),
        }
    }

    fn record(&mut self, text: &str, label: L, line: usize) {
        match self.positions.get(text) {
            Some(&pos) => {
                let lines = &mut self.entries[pos].2;
                if let Err(at) = lines.binary_search(&line) {
                    lines.insert(at, line);
                }
            }
            None => {
                self.positions.insert(text.to_string(), self.entries.len());
                self.entries.push((text.to_string(), label, vec![line]));
            }
        }
    }

    fn into_entries(self) -> Vec<(String, L, Vec<usize>)> {
        self.entries
    }
}

fn is_symbol(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier | TokenKind::Keyword | TokenKind::Operator | TokenKind::Punctuator
    )
}

/// Group keywords, identifiers, operators and punctuators by text
pub fn build_symbol_table(tokens: &[Token]) -> Vec<SymbolEntry> {
    let mut index = LineIndex::new();

    for token in tokens.iter().filter(|t| is_symbol(t.kind)) {
        index.record(&token.text, token.kind, token.line);
    }

    index
        .into_entries()
        .into_iter()
        .map(|(token, kind, lines)| SymbolEntry { token, kind, lines })
        .collect()
}

/// Group numeric constants and string/char literals by text
pub fn build_constant_table(tokens: &[Token]) -> Vec<ConstantEntry> {
    let mut index = LineIndex::new();

    for token in tokens {
        if let Some(kind) = ConstantKind::of(token.kind) {
            index.record(&token.text, kind, token.line);
        }
    }

    index
        .into_entries()
        .into_iter()
        .map(|(value, kind, lines)| ConstantEntry { value, kind, lines })
        .collect()
}
