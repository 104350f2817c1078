// ABOUTME: Tree-walking evaluator executing Mica ASTs against an environment

use crate::ast::{Block, Expression, Program, Statement};
use crate::builtins;
use crate::env::Environment;
use crate::error::EvalError;
use crate::token::TokenKind;
use crate::value::{HashKey, Value};
use std::collections::HashMap;
use std::rc::Rc;

/// Evaluate a whole program. A `Return` produced by a top-level statement
/// is unwrapped here; inside blocks it propagates (see `eval_block`).
pub fn eval_program(program: &Program, env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut result = Value::Null;
    for statement in &program.statements {
        result = eval_statement(statement, env)?;
        if let Value::Return(value) = result {
            return Ok(*value);
        }
    }
    Ok(result)
}

/// Evaluate a block. Unlike `eval_program`, a `Return` is passed through
/// untouched so the enclosing function call can observe it.
fn eval_block(block: &Block, env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut result = Value::Null;
    for statement in &block.statements {
        result = eval_statement(statement, env)?;
        if matches!(result, Value::Return(_)) {
            return Ok(result);
        }
    }
    Ok(result)
}

fn eval_statement(statement: &Statement, env: &Rc<Environment>) -> Result<Value, EvalError> {
    match statement {
        Statement::Expression(expression) => eval_expression(expression, env),

        Statement::Let { name, value } => {
            let value = eval_expression(value, env)?;
            env.define(name.clone(), value);
            Ok(Value::Null)
        }

        Statement::Return(expression) => {
            let value = eval_expression(expression, env)?;
            Ok(Value::Return(Box::new(value)))
        }

        Statement::Block(block) => eval_block(block, env),

        Statement::Function { name, params, body } => {
            let function = Value::Function {
                params: params.clone(),
                body: body.clone(),
                env: env.clone(),
            };
            env.define(name.clone(), function);
            Ok(Value::Null)
        }

        Statement::While { condition, body } => {
            while is_truthy(&eval_expression(condition, env)?) {
                let result = eval_block(body, env)?;
                if matches!(result, Value::Return(_)) {
                    return Ok(result);
                }
            }
            Ok(Value::Null)
        }

        Statement::For { var, range, body } => eval_for(var, range, body, env),
    }
}

/// Iterate arrays by element and strings by character, binding the loop
/// variable in the current scope each round.
fn eval_for(
    var: &str,
    range: &Expression,
    body: &Block,
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    match eval_expression(range, env)? {
        Value::Array(items) => {
            for item in items {
                env.define(var.to_string(), item);
                let result = eval_block(body, env)?;
                if matches!(result, Value::Return(_)) {
                    return Ok(result);
                }
            }
            Ok(Value::Null)
        }
        Value::String(s) => {
            for c in s.chars() {
                env.define(var.to_string(), Value::String(c.to_string()));
                let result = eval_block(body, env)?;
                if matches!(result, Value::Return(_)) {
                    return Ok(result);
                }
            }
            Ok(Value::Null)
        }
        other => Err(EvalError::NotIterable(other.type_name().to_string())),
    }
}

pub fn eval_expression(expression: &Expression, env: &Rc<Environment>) -> Result<Value, EvalError> {
    match expression {
        Expression::Integer(value) => Ok(Value::Integer(*value)),
        Expression::Double(value) => Ok(Value::Double(*value)),
        Expression::Boolean(value) => Ok(Value::Boolean(*value)),
        Expression::String(value) => Ok(Value::String(value.clone())),

        Expression::Identifier(name) => eval_identifier(name, env),

        Expression::Prefix { operator, right } => {
            let right = eval_expression(right, env)?;
            eval_prefix_expression(*operator, right)
        }

        Expression::Infix {
            operator: TokenKind::Assign,
            left,
            right,
        } if matches!(**left, Expression::Identifier(_)) => {
            let Expression::Identifier(name) = &**left else {
                unreachable!()
            };
            let value = eval_expression(right, env)?;
            env.set(name, value.clone())?;
            Ok(value)
        }

        Expression::Infix {
            operator,
            left,
            right,
        } => {
            let left = eval_expression(left, env)?;
            let right = eval_expression(right, env)?;
            eval_infix_expression(*operator, left, right)
        }

        Expression::If {
            condition,
            consequence,
            alternative,
        } => {
            if is_truthy(&eval_expression(condition, env)?) {
                eval_block(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_expression(alternative, env)
            } else {
                Ok(Value::Null)
            }
        }

        Expression::Array(elements) => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(eval_expression(element, env)?);
            }
            Ok(Value::Array(values))
        }

        Expression::Hash(pairs) => {
            let mut map = HashMap::with_capacity(pairs.len());
            for (key_expr, value_expr) in pairs {
                let key = eval_expression(key_expr, env)?;
                let value = eval_expression(value_expr, env)?;
                let hash_key = HashKey::from_value(&key)?;
                map.insert(hash_key, (key, value));
            }
            Ok(Value::Hash(map))
        }

        Expression::Index { left, index } => {
            let left = eval_expression(left, env)?;
            let index = eval_expression(index, env)?;
            eval_index_expression(left, index)
        }

        Expression::FunctionLiteral { params, body } => Ok(Value::Function {
            params: params.clone(),
            body: body.clone(),
            env: env.clone(),
        }),

        Expression::Call {
            function,
            arguments,
        } => {
            let callee = eval_expression(function, env)?;
            let mut args = Vec::with_capacity(arguments.len());
            for argument in arguments {
                args.push(eval_expression(argument, env)?);
            }
            apply_function(callee, &args, callee_name(function))
        }
    }
}

fn eval_identifier(name: &str, env: &Rc<Environment>) -> Result<Value, EvalError> {
    if let Some(value) = env.get(name) {
        return Ok(value);
    }
    if let Some(builtin) = builtins::lookup(name) {
        return Ok(builtin);
    }
    Err(EvalError::IdentifierNotFound(name.to_string()))
}

fn eval_prefix_expression(operator: TokenKind, right: Value) -> Result<Value, EvalError> {
    match operator {
        TokenKind::Bang | TokenKind::Not => Ok(eval_bang_expression(right)),
        TokenKind::Minus => eval_minus_expression(right),
        other => Err(EvalError::unknown_prefix(other.symbol(), &right)),
    }
}

/// Logical negation: true for false, null, and integer zero;
/// false for everything else (including double zero).
fn eval_bang_expression(value: Value) -> Value {
    match value {
        Value::Boolean(b) => Value::Boolean(!b),
        Value::Null => Value::Boolean(true),
        Value::Integer(0) => Value::Boolean(true),
        _ => Value::Boolean(false),
    }
}

fn eval_minus_expression(value: Value) -> Result<Value, EvalError> {
    match value {
        Value::Integer(n) => Ok(Value::Integer(-n)),
        Value::Double(d) => Ok(Value::Double(-d)),
        other => Err(EvalError::unknown_prefix("-", &other)),
    }
}

fn eval_infix_expression(
    operator: TokenKind,
    left: Value,
    right: Value,
) -> Result<Value, EvalError> {
    match operator {
        TokenKind::Plus | TokenKind::Minus | TokenKind::Asterisk | TokenKind::Slash => {
            eval_arithmetic_expression(operator, left, right)
        }
        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Le
        | TokenKind::Ge
        | TokenKind::Lt
        | TokenKind::Gt
        | TokenKind::Or
        | TokenKind::And => eval_comparison_expression(operator, left, right),
        other => Err(EvalError::unknown_infix(&left, other.symbol(), &right)),
    }
}

/// Result is a double iff either operand is a double; `+` on two strings
/// concatenates. Integer division truncates toward zero (host semantics).
fn eval_arithmetic_expression(
    operator: TokenKind,
    left: Value,
    right: Value,
) -> Result<Value, EvalError> {
    match (&left, &right) {
        (Value::Integer(a), Value::Integer(b)) => {
            Ok(Value::Integer(integer_arithmetic(operator, *a, *b)))
        }
        (Value::Integer(a), Value::Double(b)) => {
            Ok(Value::Double(double_arithmetic(operator, *a as f64, *b)))
        }
        (Value::Double(a), Value::Integer(b)) => {
            Ok(Value::Double(double_arithmetic(operator, *a, *b as f64)))
        }
        (Value::Double(a), Value::Double(b)) => {
            Ok(Value::Double(double_arithmetic(operator, *a, *b)))
        }
        (Value::String(a), Value::String(b)) if operator == TokenKind::Plus => {
            Ok(Value::String(format!("{}{}", a, b)))
        }
        _ => Err(EvalError::type_mismatch(&left, operator.symbol(), &right)),
    }
}

fn integer_arithmetic(operator: TokenKind, a: i64, b: i64) -> i64 {
    match operator {
        TokenKind::Plus => a + b,
        TokenKind::Minus => a - b,
        TokenKind::Asterisk => a * b,
        TokenKind::Slash => a / b,
        _ => unreachable!("non-arithmetic operator"),
    }
}

fn double_arithmetic(operator: TokenKind, a: f64, b: f64) -> f64 {
    match operator {
        TokenKind::Plus => a + b,
        TokenKind::Minus => a - b,
        TokenKind::Asterisk => a * b,
        TokenKind::Slash => a / b,
        _ => unreachable!("non-arithmetic operator"),
    }
}

/// Comparison and logic over int, double and bool operands, yielding a
/// boolean. Bools participate as 0/1; a double on either side widens the
/// comparison to doubles. `and`/`or` test both operands for non-zero.
fn eval_comparison_expression(
    operator: TokenKind,
    left: Value,
    right: Value,
) -> Result<Value, EvalError> {
    fn as_i64(value: &Value) -> Option<i64> {
        match value {
            Value::Integer(n) => Some(*n),
            Value::Boolean(b) => Some(*b as i64),
            _ => None,
        }
    }
    fn as_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Integer(n) => Some(*n as f64),
            Value::Double(d) => Some(*d),
            Value::Boolean(b) => Some(*b as i64 as f64),
            _ => None,
        }
    }

    let widened = matches!(left, Value::Double(_)) || matches!(right, Value::Double(_));
    let result = if widened {
        match (as_f64(&left), as_f64(&right)) {
            (Some(a), Some(b)) => compare(operator, a, b, 0.0),
            _ => return Err(EvalError::type_mismatch(&left, operator.symbol(), &right)),
        }
    } else {
        match (as_i64(&left), as_i64(&right)) {
            (Some(a), Some(b)) => compare(operator, a, b, 0),
            _ => return Err(EvalError::type_mismatch(&left, operator.symbol(), &right)),
        }
    };
    Ok(Value::Boolean(result))
}

fn compare<T: PartialOrd + Copy>(operator: TokenKind, a: T, b: T, zero: T) -> bool {
    match operator {
        TokenKind::Eq => a == b,
        TokenKind::NotEq => a != b,
        TokenKind::Lt => a < b,
        TokenKind::Le => a <= b,
        TokenKind::Gt => a > b,
        TokenKind::Ge => a >= b,
        TokenKind::Or => a != zero || b != zero,
        TokenKind::And => a != zero && b != zero,
        _ => unreachable!("non-comparison operator"),
    }
}

fn eval_index_expression(left: Value, index: Value) -> Result<Value, EvalError> {
    match (&left, &index) {
        (Value::Array(items), Value::Integer(i)) => {
            if *i < 0 || *i as usize >= items.len() {
                return Err(EvalError::IndexOutOfRange(*i));
            }
            Ok(items[*i as usize].clone())
        }
        (Value::Hash(map), key) => {
            let hash_key = HashKey::from_value(key)?;
            Ok(map
                .get(&hash_key)
                .map(|(_, value)| value.clone())
                .unwrap_or(Value::Null))
        }
        _ => Err(EvalError::IndexNotSupported {
            left: left.to_string(),
            index: index.to_string(),
        }),
    }
}

/// Name used in arity errors: the called identifier when there is one,
/// `fn` for anonymous function values.
fn callee_name(function: &Expression) -> &str {
    match function {
        Expression::Identifier(name) => name,
        _ => "fn",
    }
}

fn apply_function(callee: Value, args: &[Value], name: &str) -> Result<Value, EvalError> {
    match callee {
        Value::Function { params, body, env } => {
            if params.len() != args.len() {
                return Err(EvalError::wrong_arity(name, params.len(), args.len()));
            }

            // Fresh scope whose parent is the captured definition env
            let scope = Environment::with_parent(env);
            for (param, arg) in params.iter().zip(args) {
                scope.define(param.clone(), arg.clone());
            }

            match eval_block(&body, &scope)? {
                Value::Return(value) => Ok(*value),
                other => Ok(other),
            }
        }
        Value::Builtin(function) => function(args),
        other => Err(EvalError::NotCallable(other.type_name().to_string())),
    }
}

/// The language's condition predicate, used by `if`, `while`, `and`, `or`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Boolean(b) => *b,
        Value::Integer(n) => *n != 0,
        Value::Double(d) => *d != 0.0,
        _ => false,
    }
}
