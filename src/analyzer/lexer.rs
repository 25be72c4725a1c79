//! Lexer (tokenizer) for C-like source text
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the table
//! builder. The source is processed one physical line at a time: comments are
//! stripped from the line, then the remainder is scanned into lexemes which are
//! classified into a [`TokenKind`].
//!
//! Scanning never fails. Characters that cannot start a lexeme (`#`, `.`, `[`,
//! an unterminated quote, ...) are skipped silently.
//!
//! # Known quirks
//!
//! - Operator characters are consumed as a maximal run *before* the run is
//!   looked up in the operator set, so `===` is a single `Unknown` lexeme
//!   rather than `==` followed by `=`.
//! - Block comments are only recognized when `/*` and `*/` sit on the same
//!   line. A comment spanning several lines is tokenized as ordinary text.

use super::constants::{KEYWORDS, OPERATORS, OPERATOR_CHARS, PUNCTUATORS};
use serde::Serialize;
use std::fmt;

/// Classification of a lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Constant,
    String,
    Operator,
    Punctuator,
    Unknown,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Keyword => "Keyword",
            TokenKind::Identifier => "Identifier",
            TokenKind::Constant => "Constant",
            TokenKind::String => "String",
            TokenKind::Operator => "Operator",
            TokenKind::Punctuator => "Punctuator",
            TokenKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified lexeme together with the (1-based) line it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' (line {})", self.kind, self.text, self.line)
    }
}

/// Tokenize the entire source.
///
/// Lines are split on `'\n'` only, so a trailing newline produces a final,
/// empty line and a `'\r'` left over from CRLF input is skipped like any other
/// unrecognized character.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for (index, line) in source.split('\n').enumerate() {
        let stripped = strip_comments(line);
        let mut lexer = Lexer::new(&stripped, index + 1);
        lexer.tokenize_into(&mut tokens);
    }

    log::debug!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
    tokens
}

/// Remove `/* ... */` spans and then a trailing `// ...` from a single line.
///
/// Each block comment is closed by the first `*/` after its opener. An opener
/// without a closer on the same line is left untouched. Comment markers inside
/// string literals are not treated specially.
pub fn strip_comments(line: &str) -> String {
    let mut stripped = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(start) = rest.find("/*") {
        let body = &rest[start + 2..];
        match body.find("*/") {
            Some(end) => {
                stripped.push_str(&rest[..start]);
                rest = &body[end + 2..];
            }
            None => break,
        }
    }
    stripped.push_str(rest);

    if let Some(pos) = stripped.find("//") {
        stripped.truncate(pos);
    }
    stripped
}

/// Classify a lexeme.
///
/// Checks run in a fixed order and the first match wins: keyword, numeric
/// constant, quoted string or character, operator, identifier, punctuator.
/// Anything left over is [`TokenKind::Unknown`].
pub fn classify(lexeme: &str) -> TokenKind {
    if KEYWORDS.contains(&lexeme) {
        TokenKind::Keyword
    } else if is_numeric(lexeme) {
        TokenKind::Constant
    } else if is_quoted(lexeme, '"') || is_quoted(lexeme, '\'') {
        TokenKind::String
    } else if OPERATORS.contains(&lexeme) {
        TokenKind::Operator
    } else if is_identifier(lexeme) {
        TokenKind::Identifier
    } else if is_punctuator(lexeme) {
        TokenKind::Punctuator
    } else {
        TokenKind::Unknown
    }
}

/// Digits, then at most one `.`, then optional digits
fn is_numeric(s: &str) -> bool {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (s, ""),
    };
    !int_part.is_empty()
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit())
}

fn is_quoted(s: &str, quote: char) -> bool {
    s.len() >= 2
        && s.starts_with(quote)
        && s.ends_with(quote)
        && !s[1..s.len() - 1].contains(quote)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_ident_continue),
        _ => false,
    }
}

fn is_punctuator(s: &str) -> bool {
    let mut chars = s.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if PUNCTUATORS.contains(&c))
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_operator_char(c: char) -> bool {
    OPERATOR_CHARS.contains(&c)
}

/// Scanner over one comment-stripped line
struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
}

impl Lexer {
    fn new(input: &str, line: usize) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line,
        }
    }

    /// Scan the whole line, appending classified tokens in source order
    fn tokenize_into(&mut self, tokens: &mut Vec<Token>) {
        while !self.is_at_end() {
            if let Some(lexeme) = self.next_lexeme() {
                log::trace!("line {}: lexeme {:?}", self.line, lexeme);
                tokens.push(Token::new(classify(&lexeme), lexeme, self.line));
            }
        }
    }

    /// Get the next lexeme, or `None` when the current character was skipped
    fn next_lexeme(&mut self) -> Option<String> {
        let start = self.position;
        let ch = self.advance()?;

        match ch {
            // Identifiers and keywords
            c if is_ident_start(c) => self.consume_while(is_ident_continue),

            // Numeric literals
            '0'..='9' => self.number_literal(),

            // String and character literals
            '"' | '\'' => {
                if !self.quoted_literal(ch) {
                    return None;
                }
            }

            // Operator runs, maximal munch
            c if is_operator_char(c) => self.consume_while(is_operator_char),

            c if PUNCTUATORS.contains(&c) => {}

            _ => return None,
        }

        Some(self.input[start..self.position].iter().collect())
    }

    /// Rest of a numeric literal after its first digit
    fn number_literal(&mut self) {
        self.consume_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') {
            self.advance();
            self.consume_while(|c| c.is_ascii_digit());
        }
    }

    /// Consume up to and including the closing `quote`.
    ///
    /// Returns `false` when the line has no closing quote; only the opening
    /// quote has been consumed in that case.
    fn quoted_literal(&mut self, quote: char) -> bool {
        match self.input[self.position..].iter().position(|&c| c == quote) {
            Some(offset) => {
                self.position += offset + 1;
                true
            }
            None => false,
        }
    }

    fn consume_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("int main() { return 0; }");

        assert!(matches!(&tokens[0], Token { kind: TokenKind::Keyword, text, .. } if text == "int"));
        assert!(matches!(&tokens[1], Token { kind: TokenKind::Keyword, text, .. } if text == "main"));
        assert!(matches!(&tokens[2], Token { kind: TokenKind::Punctuator, text, .. } if text == "("));
        assert!(matches!(&tokens[3], Token { kind: TokenKind::Punctuator, text, .. } if text == ")"));
        assert!(matches!(&tokens[4], Token { kind: TokenKind::Punctuator, text, .. } if text == "{"));
        assert!(matches!(&tokens[5], Token { kind: TokenKind::Keyword, text, .. } if text == "return"));
        assert!(matches!(&tokens[6], Token { kind: TokenKind::Constant, text, .. } if text == "0"));
        assert!(matches!(&tokens[7], Token { kind: TokenKind::Punctuator, text, .. } if text == ";"));
        assert!(matches!(&tokens[8], Token { kind: TokenKind::Punctuator, text, .. } if text == "}"));
        assert_eq!(tokens.len(), 9);
    }

    #[test]
    fn test_operators() {
        let tokens = kinds_and_texts("++ -- += -= == != && || <= >=");
        assert_eq!(tokens.len(), 10);
        assert!(tokens.iter().all(|(kind, _)| *kind == TokenKind::Operator));
    }

    #[test]
    fn test_operator_run_is_looked_up_whole() {
        let tokens = kinds_and_texts("a === b; c=-1; d & e");

        assert_eq!(tokens[1], (TokenKind::Unknown, "===".to_string()));
        // `=-` is one run, not `=` followed by `-`
        assert_eq!(tokens[5], (TokenKind::Unknown, "=-".to_string()));
        // a lone `&` is not in the operator set
        assert_eq!(tokens[9], (TokenKind::Unknown, "&".to_string()));
    }

    #[test]
    fn test_comments() {
        let tokens = kinds_and_texts("int x; // comment\nint /* inline */ y;");
        let texts: Vec<&str> = tokens.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, vec!["int", "x", ";", "int", "y", ";"]);
    }

    #[test]
    fn test_block_comment_across_lines_is_not_removed() {
        let tokens = tokenize("int a; /* start\nstill comment */ int b;");

        let still = tokens.iter().find(|t| t.text == "still").unwrap();
        assert_eq!(still.kind, TokenKind::Identifier);
        assert_eq!(still.line, 2);

        let opener = tokens.iter().find(|t| t.text == "/*").unwrap();
        assert_eq!(opener.kind, TokenKind::Unknown);
        assert_eq!(opener.line, 1);
    }

    #[test]
    fn test_strip_comments() {
        assert_eq!(strip_comments("a /* b */ c /* d */ e"), "a  c  e");
        assert_eq!(strip_comments("a /* open"), "a /* open");
        assert_eq!(strip_comments("/* x */ y // z"), " y ");
        assert_eq!(strip_comments("// only"), "");
        assert_eq!(strip_comments("/*/ still */ z"), " z");
    }

    #[test]
    fn test_comment_marker_inside_string_is_not_special() {
        let texts: Vec<String> = tokenize(r#"printf("http://example");"#)
            .into_iter()
            .map(|t| t.text)
            .collect();
        // everything after `//` is gone, the dangling quote is skipped
        assert_eq!(texts, vec!["printf", "(", "http"]);
    }

    #[test]
    fn test_string_and_char_literals() {
        let tokens = kinds_and_texts(r#"printf("Hello World", 'c');"#);

        assert_eq!(tokens[2], (TokenKind::String, "\"Hello World\"".to_string()));
        assert_eq!(tokens[4], (TokenKind::String, "'c'".to_string()));
    }

    #[test]
    fn test_unterminated_quote_is_skipped() {
        let tokens = kinds_and_texts("\"abc");
        assert_eq!(tokens, vec![(TokenKind::Identifier, "abc".to_string())]);
    }

    #[test]
    fn test_numeric_literals() {
        let tokens = kinds_and_texts("3.14 1. 2.5.6");
        let texts: Vec<&str> = tokens.iter().map(|(_, t)| t.as_str()).collect();

        assert_eq!(texts, vec!["3.14", "1.", "2.5", "6"]);
        assert!(tokens.iter().all(|(kind, _)| *kind == TokenKind::Constant));
    }

    #[test]
    fn test_unrecognized_characters_are_skipped() {
        let tokens = kinds_and_texts("#include <stdio.h>");

        assert_eq!(
            tokens,
            vec![
                (TokenKind::Keyword, "include".to_string()),
                (TokenKind::Operator, "<".to_string()),
                (TokenKind::Keyword, "stdio".to_string()),
                (TokenKind::Identifier, "h".to_string()),
                (TokenKind::Operator, ">".to_string()),
            ]
        );
    }

    #[test]
    fn test_line_numbers() {
        let tokens = tokenize("int x;\n\nx = 1;\r\n");

        let lines: Vec<usize> = tokens
            .iter()
            .filter(|t| t.text == "x")
            .map(|t| t.line)
            .collect();
        assert_eq!(lines, vec![1, 3]);
        assert_eq!(tokens.last().map(|t| t.line), Some(3));
    }

    #[test]
    fn test_classify_precedence() {
        assert_eq!(classify("main"), TokenKind::Keyword);
        assert_eq!(classify("printf"), TokenKind::Keyword);
        assert_eq!(classify("42"), TokenKind::Constant);
        assert_eq!(classify("4.2"), TokenKind::Constant);
        assert_eq!(classify("\"s\""), TokenKind::String);
        assert_eq!(classify("'s'"), TokenKind::String);
        assert_eq!(classify("%="), TokenKind::Operator);
        assert_eq!(classify("_tmp1"), TokenKind::Identifier);
        assert_eq!(classify(";"), TokenKind::Punctuator);
        assert_eq!(classify("==="), TokenKind::Unknown);
        assert_eq!(classify("|"), TokenKind::Unknown);
    }
}
