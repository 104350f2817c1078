// ABOUTME: Configuration and constants for the Mica interpreter
// This module contains version info, the REPL prompt, and history settings

pub const VERSION: &str = "1.0.0";
pub const WELCOME_MESSAGE: &str = "Mica Interpreter v1.0";

/// Prompt printed before each REPL line.
pub const PROMPT: &str = ">>";

/// File the REPL persists its line history to, relative to the working directory.
pub const HISTORY_FILE: &str = ".mica_history";
