//! Line-based structural checks over raw source text
//!
//! The checker never looks at the token stream. It walks the trimmed source
//! lines once, keeping a running brace balance, a running parenthesis balance
//! and a flag recording whether `main` appeared anywhere, and emits
//! [`Diagnostic`]s in a fixed order:
//!
//! 1. per-line shape checks (`if` without a condition, `printf` without
//!    parentheses), in line order
//! 2. missing `main`
//! 3. mismatched braces
//! 4. mismatched parentheses
//!
//! All diagnostics are advisory; none of them stop the analysis.

use serde::Serialize;
use std::fmt;

/// Direction of an unbalanced delimiter count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Imbalance {
    /// More openers than closers
    MissingClosing,
    /// More closers than openers
    ExtraClosing,
}

impl Imbalance {
    /// `None` when the running count ended at zero
    pub fn from_balance(balance: i64) -> Option<Self> {
        match balance {
            0 => None,
            b if b > 0 => Some(Imbalance::MissingClosing),
            _ => Some(Imbalance::ExtraClosing),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Imbalance::MissingClosing => "Missing closing",
            Imbalance::ExtraClosing => "Extra closing",
        }
    }
}

/// Every condition the analyzer can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    EmptyInput,
    MissingIfCondition,
    MissingCallParentheses,
    MissingMain,
    MismatchedBraces(Imbalance),
    MismatchedParentheses(Imbalance),
}

impl DiagnosticCode {
    pub fn message(self) -> &'static str {
        match self {
            DiagnosticCode::EmptyInput => "Empty input",
            DiagnosticCode::MissingIfCondition => "Missing condition in if statement",
            DiagnosticCode::MissingCallParentheses => "Missing parentheses in function call",
            DiagnosticCode::MissingMain => "Missing main function",
            DiagnosticCode::MismatchedBraces(_) => "Mismatched braces",
            DiagnosticCode::MismatchedParentheses(_) => "Mismatched parentheses",
        }
    }

    pub fn details(self) -> String {
        match self {
            DiagnosticCode::EmptyInput => "Please enter some C code to compile".to_string(),
            DiagnosticCode::MissingIfCondition => {
                "If statements require a condition in parentheses".to_string()
            }
            DiagnosticCode::MissingCallParentheses => "Function calls require parentheses".to_string(),
            DiagnosticCode::MissingMain => {
                "C programs require a main function as entry point".to_string()
            }
            DiagnosticCode::MismatchedBraces(direction) => format!("{} brace(s)", direction.label()),
            DiagnosticCode::MismatchedParentheses(direction) => {
                format!("{} parenthesis", direction.label())
            }
        }
    }
}

/// A reported structural defect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub code: DiagnosticCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Diagnostic {
    pub fn new(line: usize, code: DiagnosticCode) -> Self {
        Self {
            line,
            code,
            message: code.message().to_string(),
            details: Some(code.details()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

/// Strip leading and trailing blanks.
///
/// A byte order mark counts as blank and NEL (U+0085) does not, so a file
/// saved with a BOM still reads as empty when it holds nothing else.
pub(crate) fn trim_blank(text: &str) -> &str {
    text.trim_matches(|c: char| c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}'))
}

/// Running state of one scan over the source
#[derive(Debug, Default)]
struct CheckerState {
    brace_balance: i64,
    paren_balance: i64,
    has_main: bool,
    diagnostics: Vec<Diagnostic>,
}

impl CheckerState {
    fn scan_line(&mut self, line_number: usize, line: &str) {
        let trimmed = trim_blank(line);

        if trimmed.contains("main") {
            self.has_main = true;
        }

        for ch in trimmed.chars() {
            match ch {
                '{' => self.brace_balance += 1,
                '}' => self.brace_balance -= 1,
                '(' => self.paren_balance += 1,
                ')' => self.paren_balance -= 1,
                _ => {}
            }
        }

        let has_paren = trimmed.contains('(');

        if trimmed.ends_with('{') && trimmed.contains("if") && !has_paren {
            log::trace!("line {}: if without condition", line_number);
            self.push(line_number, DiagnosticCode::MissingIfCondition);
        }

        if trimmed.contains("printf") && !has_paren {
            log::trace!("line {}: printf without parentheses", line_number);
            self.push(line_number, DiagnosticCode::MissingCallParentheses);
        }
    }

    fn finish(mut self, source: &str, last_line: usize) -> Vec<Diagnostic> {
        if !self.has_main && !trim_blank(source).is_empty() {
            self.push(1, DiagnosticCode::MissingMain);
        }

        if let Some(direction) = Imbalance::from_balance(self.brace_balance) {
            self.push(last_line, DiagnosticCode::MismatchedBraces(direction));
        }

        if let Some(direction) = Imbalance::from_balance(self.paren_balance) {
            self.push(last_line, DiagnosticCode::MismatchedParentheses(direction));
        }

        self.diagnostics
    }

    fn push(&mut self, line: usize, code: DiagnosticCode) {
        self.diagnostics.push(Diagnostic::new(line, code));
    }
}

/// Run every structural check over `source`.
///
/// An empty result means no defects were found. Balance diagnostics are
/// reported on the last line, where the last line counts the empty line after
/// a trailing newline.
pub fn check_source(source: &str) -> Vec<Diagnostic> {
    let mut state = CheckerState::default();
    let mut last_line = 0;

    for (index, line) in source.split('\n').enumerate() {
        last_line = index + 1;
        state.scan_line(last_line, line);
    }

    let diagnostics = state.finish(source, last_line);
    log::debug!("structural check found {} diagnostic(s)", diagnostics.len());
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn messages(source: &str) -> Vec<(usize, String)> {
        check_source(source)
            .into_iter()
            .map(|d| (d.line, d.message))
            .collect()
    }

    #[test]
    fn test_clean_program() {
        let source = "int main() {\n    return 0;\n}";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn test_if_without_condition() {
        let diags = check_source("int main() {\n    if {\n    }\n}");

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, 2);
        assert_eq!(diags[0].code, DiagnosticCode::MissingIfCondition);
        assert_eq!(diags[0].message, "Missing condition in if statement");
        assert_eq!(
            diags[0].details.as_deref(),
            Some("If statements require a condition in parentheses")
        );
    }

    #[test]
    fn test_if_substring_matches_inside_words() {
        // `elif` contains `if`; the check is a plain substring test
        let diags = check_source("main() {\nelif {\n}\n}");
        assert_eq!(diags[0].code, DiagnosticCode::MissingIfCondition);
    }

    #[test]
    fn test_printf_without_parentheses() {
        let diags = check_source("main() {\n    printf Hello;\n}");

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, 2);
        assert_eq!(diags[0].message, "Missing parentheses in function call");
    }

    #[test]
    fn test_missing_main() {
        let diags = check_source("int x;");

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, 1);
        assert_eq!(diags[0].code, DiagnosticCode::MissingMain);
    }

    #[test]
    fn test_missing_closing_brace() {
        let diags = check_source("main() {\n    return 0;\n");

        assert_eq!(diags.len(), 1);
        // the trailing newline adds an empty third line
        assert_eq!(diags[0].line, 3);
        assert_eq!(
            diags[0].code,
            DiagnosticCode::MismatchedBraces(Imbalance::MissingClosing)
        );
        assert_eq!(diags[0].details.as_deref(), Some("Missing closing brace(s)"));
    }

    #[test]
    fn test_extra_closing_brace() {
        let diags = check_source("main() {\n}\n}");

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, 3);
        assert_eq!(diags[0].details.as_deref(), Some("Extra closing brace(s)"));
    }

    #[test]
    fn test_mismatched_parentheses() {
        let missing = check_source("main( {\n}");
        assert_eq!(
            missing[0].code,
            DiagnosticCode::MismatchedParentheses(Imbalance::MissingClosing)
        );
        assert_eq!(
            missing[0].details.as_deref(),
            Some("Missing closing parenthesis")
        );

        let extra = check_source("main()) {\n}");
        assert_eq!(
            extra[0].details.as_deref(),
            Some("Extra closing parenthesis")
        );
    }

    #[test]
    fn test_diagnostic_order() {
        let source = "if {\nprintf x;\n{\n(";

        assert_eq!(
            messages(source),
            vec![
                (1, "Missing condition in if statement".to_string()),
                (2, "Missing parentheses in function call".to_string()),
                (1, "Missing main function".to_string()),
                (4, "Mismatched braces".to_string()),
                (4, "Mismatched parentheses".to_string()),
            ]
        );
    }

    #[test]
    fn test_balance_is_counted_across_lines() {
        // `}` before `{` still nets to zero
        assert!(check_source("main()\n}\n{").is_empty());
    }

    #[test]
    fn test_blank_source_reports_nothing_about_main() {
        assert!(check_source("   \n\t").is_empty());
    }

    #[test]
    fn test_byte_order_mark_is_trimmed() {
        // `{` followed by a BOM still ends the line
        assert_eq!(
            messages("\u{feff}main() {\nif {\u{feff}\n}\n}"),
            vec![(2, "Missing condition in if statement".to_string())]
        );
        assert!(check_source("\u{feff}\n").is_empty());
    }
}
