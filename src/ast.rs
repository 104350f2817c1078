// ABOUTME: AST node types for Mica programs with a canonical source printer

use crate::token::TokenKind;
use std::fmt;
use std::rc::Rc;

/// A parsed program: an ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// A `{ ... }` statement sequence. Shared (`Rc`) when it is a function
/// body, because closure values keep the body alive past the AST walk.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let {
        name: String,
        value: Expression,
    },
    Return(Expression),
    Expression(Expression),
    Block(Block),
    /// `fn name(params) { body }`, a named function definition.
    Function {
        name: String,
        params: Vec<String>,
        body: Rc<Block>,
    },
    For {
        var: String,
        range: Expression,
        body: Block,
    },
    While {
        condition: Expression,
        body: Block,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    String(String),
    Array(Vec<Expression>),
    /// Key-value pairs in source order; keys are checked for hashability
    /// at evaluation time.
    Hash(Vec<(Expression, Expression)>),
    Prefix {
        operator: TokenKind,
        right: Box<Expression>,
    },
    Infix {
        operator: TokenKind,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// The alternative, when present, is always another `If`; a bare
    /// `else` block is normalized to an `If` with a literal-true condition,
    /// turning else-if chains into a linked list.
    If {
        condition: Box<Expression>,
        consequence: Block,
        alternative: Option<Box<Expression>>,
    },
    FunctionLiteral {
        params: Vec<String>,
        body: Rc<Block>,
    },
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.statements.iter().map(|s| s.to_string()).collect();
        f.write_str(&rendered.join("\n"))
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.statements.iter().map(|s| s.to_string()).collect();
        f.write_str(&rendered.join("\n"))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return(value) => write!(f, "return {};", value),
            Statement::Expression(expr) => write!(f, "{}", expr),
            Statement::Block(block) => write!(f, "{}", block),
            Statement::Function { name, params, body } => {
                write!(f, "fn {}({}){{{}}}", name, params.join(","), body)
            }
            Statement::For { var, range, body } => {
                write!(f, "for({} in {}){{{}}}", var, range, body)
            }
            Statement::While { condition, body } => {
                write!(f, "while({}){{{}}}", condition, body)
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(name) => f.write_str(name),
            Expression::Integer(value) => write!(f, "{}", value),
            Expression::Double(value) => write!(f, "{}", value),
            Expression::Boolean(value) => write!(f, "{}", value),
            Expression::String(value) => write!(f, "\"{}\"", value),
            Expression::Array(elements) => {
                let rendered: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", rendered.join(","))
            }
            Expression::Hash(pairs) => {
                let rendered: Vec<String> =
                    pairs.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
                write!(f, "{{{}}}", rendered.join(","))
            }
            Expression::Prefix { operator, right } => {
                write!(f, "({} {})", operator.symbol(), right)
            }
            Expression::Infix {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator.symbol(), right),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if({}){{{}}}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, "else{{{}}}", alt)?;
                }
                Ok(())
            }
            Expression::FunctionLiteral { params, body } => {
                write!(f, "fn({}) {{{}}}", params.join(","), body)
            }
            Expression::Call {
                function,
                arguments,
            } => {
                let rendered: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", function, rendered.join(","))
            }
            Expression::Index { left, index } => write!(f, "({}[{}])", left, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_let_statement_display() {
        let program = Program {
            statements: vec![Statement::Let {
                name: "myVar".to_string(),
                value: Expression::Identifier("anotherVar".to_string()),
            }],
        };
        assert_eq!(program.to_string(), "let myVar = anotherVar;");
    }

    #[test]
    fn test_infix_display() {
        let expr = Expression::Infix {
            operator: TokenKind::Plus,
            left: Box::new(Expression::Integer(1)),
            right: Box::new(Expression::Infix {
                operator: TokenKind::Asterisk,
                left: Box::new(Expression::Integer(2)),
                right: Box::new(Expression::Integer(3)),
            }),
        };
        assert_eq!(expr.to_string(), "(1 + (2 * 3))");
    }

    #[test]
    fn test_function_literal_display() {
        let expr = Expression::FunctionLiteral {
            params: vec!["x".to_string(), "y".to_string()],
            body: Rc::new(Block {
                statements: vec![Statement::Expression(Expression::Infix {
                    operator: TokenKind::Plus,
                    left: Box::new(Expression::Identifier("x".to_string())),
                    right: Box::new(Expression::Identifier("y".to_string())),
                })],
            }),
        };
        assert_eq!(expr.to_string(), "fn(x,y) {(x + y)}");
    }

    #[test]
    fn test_array_and_index_display() {
        let expr = Expression::Index {
            left: Box::new(Expression::Array(vec![
                Expression::Integer(1),
                Expression::Integer(2),
            ])),
            index: Box::new(Expression::Integer(0)),
        };
        assert_eq!(expr.to_string(), "([1,2][0])");
    }

    #[test]
    fn test_while_display() {
        let stmt = Statement::While {
            condition: Expression::Boolean(true),
            body: Block {
                statements: vec![Statement::Expression(Expression::Integer(1))],
            },
        };
        assert_eq!(stmt.to_string(), "while(true){1}");
    }
}
