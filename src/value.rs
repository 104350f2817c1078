// ABOUTME: Runtime value types produced by the evaluator

use crate::ast::Block;
use crate::env::Environment;
use crate::error::EvalError;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Signature shared by all builtin functions.
pub type BuiltinFn = fn(&[Value]) -> Result<Value, EvalError>;

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Integer(i64),
    Double(f64),
    Boolean(bool),
    String(String),
    Array(Vec<Value>),
    /// Keys are equality-checked `HashKey`s; each entry keeps the original
    /// key value alongside the stored value for display.
    Hash(HashMap<HashKey, (Value, Value)>),
    /// Internal propagation marker for `return`; unwrapped by function
    /// calls and the top-level program evaluator, never user-visible.
    Return(Box<Value>),
    Function {
        params: Vec<String>,
        body: Rc<Block>,
        env: Rc<Environment>,
    },
    Builtin(BuiltinFn),
}

/// Value kinds admissible as hash keys. Doubles key by bit pattern, so
/// `2` and `2.0` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Double(u64),
    Boolean(bool),
    String(String),
}

impl HashKey {
    pub fn from_value(value: &Value) -> Result<HashKey, EvalError> {
        match value {
            Value::Integer(n) => Ok(HashKey::Integer(*n)),
            Value::Double(d) => Ok(HashKey::Double(d.to_bits())),
            Value::Boolean(b) => Ok(HashKey::Boolean(*b)),
            Value::String(s) => Ok(HashKey::String(s.clone())),
            other => Err(EvalError::UnusableHashKey(other.type_name().to_string())),
        }
    }
}

impl Value {
    /// Type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "int",
            Value::Double(_) => "float",
            Value::Boolean(_) => "bool",
            Value::String(_) => "str",
            Value::Array(_) => "array",
            Value::Hash(_) => "hash",
            Value::Return(_) => "return",
            Value::Function { .. } => "function",
            Value::Builtin(_) => "builtin",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a == b,
            (Value::Return(a), Value::Return(b)) => a == b,
            (
                Value::Function {
                    body: body_a,
                    env: env_a,
                    ..
                },
                Value::Function {
                    body: body_b,
                    env: env_b,
                    ..
                },
            ) => Rc::ptr_eq(body_a, body_b) && Rc::ptr_eq(env_a, env_b),
            (Value::Builtin(a), Value::Builtin(b)) => *a as usize == *b as usize,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Double(d) => write!(f, "{}", d),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Array(elements) => {
                let rendered: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", rendered.join(","))
            }
            Value::Hash(map) => {
                // Sort for consistent display
                let mut entries: Vec<String> = map
                    .values()
                    .map(|(k, v)| format!("{}:{}", k, v))
                    .collect();
                entries.sort();
                write!(f, "{{{}}}", entries.join(","))
            }
            Value::Return(inner) => write!(f, "{}", inner),
            Value::Function { params, body, .. } => {
                write!(f, "fn({}) {{{}}}", params.join(","), body)
            }
            Value::Builtin(_) => f.write_str("builtin function"),
        }
    }
}
