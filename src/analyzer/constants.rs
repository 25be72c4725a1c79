// Fixed vocabularies and messages for the analyzer

use std::time::Duration;

/// Words classified as `Keyword` regardless of position.
pub const KEYWORDS: &[&str] = &[
    "int", "float", "char", "double", "void", "if", "else", "while", "for", "return", "main",
    "printf", "scanf", "include", "stdio",
];

/// Operator lexemes recognized as `Operator`.
/// Any other run of operator characters (e.g. `===`) classifies as `Unknown`.
pub const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "=", "==", "!=", "<", ">", "<=", ">=", "&&", "||", "!", "++", "--",
    "+=", "-=", "*=", "/=", "%=",
];

/// Characters that form operator runs (maximal munch)
pub const OPERATOR_CHARS: &[char] = &['+', '-', '*', '/', '%', '=', '<', '>', '!', '&', '|'];

/// Single-character punctuators
pub const PUNCTUATORS: &[char] = &['(', ')', '{', '}', ';', ','];

/// Simulated compile time before a result is delivered
pub const DEFAULT_COMPILE_DELAY: Duration = Duration::from_millis(800);

pub const MSG_SUCCESS: &str = "Code compiled successfully!";
pub const MSG_NO_CODE: &str = "No code provided";
