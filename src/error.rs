// ABOUTME: Error types for evaluation failures in the Mica interpreter

use crate::value::Value;
use thiserror::Error;

/// Runtime errors raised while walking the AST.
///
/// Display forms match the interpreter's user-facing messages exactly; the
/// REPL and script runner prefix them with `Error: `. Parser errors are a
/// separate channel (plain strings accumulated on the parser).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),

    /// Attempted to call a value that is neither a function nor a builtin.
    #[error("not a function: {0}")]
    NotCallable(String),

    /// Operands of an infix operator have no common arithmetic type.
    /// `left` and `right` are inspected values, not type names.
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: String,
        operator: &'static str,
        right: String,
    },

    #[error("unknown operator: {operator}{operand}")]
    UnknownPrefixOperator {
        operator: &'static str,
        operand: String,
    },

    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: String,
        operator: &'static str,
        right: String,
    },

    #[error("index out of range: {0}")]
    IndexOutOfRange(i64),

    #[error("index operator not supported: {left} {index}")]
    IndexNotSupported { left: String, index: String },

    #[error("unusable as hash key: {0}")]
    UnusableHashKey(String),

    /// A builtin received an argument of a kind it does not handle.
    #[error("argument to `{function}` not supported, got {actual}")]
    BadArgument { function: String, actual: String },

    #[error("function {function} expected {expected} arguments, got {actual}")]
    WrongArity {
        function: String,
        expected: usize,
        actual: usize,
    },

    /// `for` loop range evaluated to a non-iterable value.
    #[error("cannot iterate over {0}")]
    NotIterable(String),
}

impl EvalError {
    /// Type mismatch between two infix operands.
    pub fn type_mismatch(left: &Value, operator: &'static str, right: &Value) -> Self {
        EvalError::TypeMismatch {
            left: left.to_string(),
            operator,
            right: right.to_string(),
        }
    }

    pub fn unknown_prefix(operator: &'static str, operand: &Value) -> Self {
        EvalError::UnknownPrefixOperator {
            operator,
            operand: operand.to_string(),
        }
    }

    pub fn unknown_infix(left: &Value, operator: &'static str, right: &Value) -> Self {
        EvalError::UnknownInfixOperator {
            left: left.to_string(),
            operator,
            right: right.to_string(),
        }
    }

    pub fn bad_argument(function: &str, actual: &Value) -> Self {
        EvalError::BadArgument {
            function: function.to_string(),
            actual: actual.type_name().to_string(),
        }
    }

    pub fn wrong_arity(function: &str, expected: usize, actual: usize) -> Self {
        EvalError::WrongArity {
            function: function.to_string(),
            expected,
            actual,
        }
    }
}
