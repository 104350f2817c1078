// ABOUTME: Syntax highlighter for the REPL with color support
// Implements rustyline's Highlighter trait to provide ANSI color codes
// for Mica syntax elements while preserving display width

use rustyline::completion::Completer;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;
use std::borrow::Cow;

// ANSI color codes (3-bit/4-bit colors for maximum terminal compatibility)
const COLOR_RESET: &str = "\x1b[0m";
const COLOR_KEYWORD: &str = "\x1b[1;35m"; // Bold magenta
const COLOR_BUILTIN: &str = "\x1b[36m"; // Cyan
const COLOR_NUMBER: &str = "\x1b[33m"; // Yellow
const COLOR_STRING: &str = "\x1b[32m"; // Green
const COLOR_BOOLEAN: &str = "\x1b[33m"; // Yellow

const KEYWORDS: &[&str] = &[
    "fn", "let", "if", "else", "return", "or", "and", "not", "for", "in", "while",
];
const BUILTINS: &[&str] = &["len", "first", "last", "rest", "append"];

/// Rustyline helper providing syntax-aware color highlighting for Mica
pub struct MicaHelper;

impl MicaHelper {
    pub fn new() -> Self {
        MicaHelper
    }
}

impl Default for MicaHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for MicaHelper {}

impl Completer for MicaHelper {
    type Candidate = String;
}

impl Hinter for MicaHelper {
    type Hint = String;
}

impl Validator for MicaHelper {}

impl Highlighter for MicaHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let highlighted = highlight_line(line);
        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        // Re-highlight on every keystroke and cursor movement
        true
    }
}

/// Walk a line and wrap words, numbers and string literals in ANSI colors
fn highlight_line(line: &str) -> String {
    let mut result = String::with_capacity(line.len());
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '"' {
            // String literal: consume through the closing quote or line end
            let start = i;
            i += 1;
            while i < chars.len() && chars[i] != '"' {
                i += 1;
            }
            if i < chars.len() {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            result.push_str(COLOR_STRING);
            result.push_str(&literal);
            result.push_str(COLOR_RESET);
        } else if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            result.push_str(COLOR_NUMBER);
            result.push_str(&literal);
            result.push_str(COLOR_RESET);
        } else if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            if KEYWORDS.contains(&word.as_str()) {
                result.push_str(COLOR_KEYWORD);
                result.push_str(&word);
                result.push_str(COLOR_RESET);
            } else if word == "true" || word == "false" {
                result.push_str(COLOR_BOOLEAN);
                result.push_str(&word);
                result.push_str(COLOR_RESET);
            } else if BUILTINS.contains(&word.as_str()) {
                result.push_str(COLOR_BUILTIN);
                result.push_str(&word);
                result.push_str(COLOR_RESET);
            } else {
                result.push_str(&word);
            }
        } else {
            result.push(c);
            i += 1;
        }
    }

    result
}
