// ABOUTME: Built-in functions reachable as identifiers: len, first, last, rest, append

use crate::error::EvalError;
use crate::value::Value;

/// Resolve a name against the builtin table. Consulted by the evaluator
/// only after the environment chain comes up empty, so user bindings
/// shadow builtins.
pub fn lookup(name: &str) -> Option<Value> {
    match name {
        "len" => Some(Value::Builtin(builtin_len)),
        "first" => Some(Value::Builtin(builtin_first)),
        "last" => Some(Value::Builtin(builtin_last)),
        "rest" => Some(Value::Builtin(builtin_rest)),
        "append" => Some(Value::Builtin(builtin_append)),
        _ => None,
    }
}

/// Length of a string or array
pub fn builtin_len(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::wrong_arity("len", 1, args.len()));
    }

    match &args[0] {
        Value::String(s) => Ok(Value::Integer(s.len() as i64)),
        Value::Array(items) => Ok(Value::Integer(items.len() as i64)),
        other => Err(EvalError::bad_argument("len", other)),
    }
}

/// First element of an array, or first character of a string; null when empty
pub fn builtin_first(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::wrong_arity("first", 1, args.len()));
    }

    match &args[0] {
        Value::Array(items) => Ok(items.first().cloned().unwrap_or(Value::Null)),
        Value::String(s) => match s.chars().next() {
            Some(c) => Ok(Value::String(c.to_string())),
            None => Ok(Value::Null),
        },
        other => Err(EvalError::bad_argument("first", other)),
    }
}

/// Last element of an array, or last character of a string; null when empty
pub fn builtin_last(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::wrong_arity("last", 1, args.len()));
    }

    match &args[0] {
        Value::Array(items) => Ok(items.last().cloned().unwrap_or(Value::Null)),
        Value::String(s) => match s.chars().next_back() {
            Some(c) => Ok(Value::String(c.to_string())),
            None => Ok(Value::Null),
        },
        other => Err(EvalError::bad_argument("last", other)),
    }
}

/// A new array or string without its first element; null when empty.
/// The input is never modified.
pub fn builtin_rest(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::wrong_arity("rest", 1, args.len()));
    }

    match &args[0] {
        Value::Array(items) => {
            if items.is_empty() {
                Ok(Value::Null)
            } else {
                Ok(Value::Array(items[1..].to_vec()))
            }
        }
        Value::String(s) => {
            let mut chars = s.chars();
            if chars.next().is_none() {
                Ok(Value::Null)
            } else {
                Ok(Value::String(chars.as_str().to_string()))
            }
        }
        other => Err(EvalError::bad_argument("rest", other)),
    }
}

/// A new array equal to the input with one value pushed.
/// The input is never modified.
pub fn builtin_append(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::wrong_arity("append", 2, args.len()));
    }

    match &args[0] {
        Value::Array(items) => {
            let mut extended = items.clone();
            extended.push(args[1].clone());
            Ok(Value::Array(extended))
        }
        other => Err(EvalError::bad_argument("append", other)),
    }
}
