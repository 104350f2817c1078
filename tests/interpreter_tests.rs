// ABOUTME: End-to-end tests running Mica source through lexer, parser and evaluator

use mica::env::Environment;
use mica::error::EvalError;
use mica::eval::eval_program;
use mica::lexer::Lexer;
use mica::parser::Parser;
use mica::token::TokenKind;
use mica::value::Value;
use std::rc::Rc;

fn parse(input: &str) -> mica::ast::Program {
    let mut parser = Parser::new(Lexer::new(input));
    let program = parser.parse_program();
    assert!(
        parser.errors.is_empty(),
        "parser errors for {:?}: {:?}",
        input,
        parser.errors
    );
    program
}

fn run(input: &str) -> Result<Value, EvalError> {
    eval_program(&parse(input), &Environment::new())
}

fn run_in(input: &str, env: &Rc<Environment>) -> Result<Value, EvalError> {
    eval_program(&parse(input), env)
}

fn inspect(input: &str) -> String {
    run(input)
        .unwrap_or_else(|e| panic!("eval error for {:?}: {}", input, e))
        .to_string()
}

#[test]
fn test_let_and_arithmetic() {
    assert_eq!(inspect("let a = 5; let b = a * 2; b;"), "10");
}

#[test]
fn test_function_values() {
    assert_eq!(inspect("let add = fn(x, y) { x + y }; add(2, 3);"), "5");
}

#[test]
fn test_closures_capture_definition_environment() {
    assert_eq!(
        inspect("let f = fn(x) { fn(y) { x + y } }; let g = f(10); g(5);"),
        "15"
    );
}

#[test]
fn test_conditionals() {
    assert_eq!(inspect("if (1 < 2) { 10 } else { 20 };"), "10");
    assert_eq!(inspect("if (1 > 2) { 10 } else { 20 };"), "20");
}

#[test]
fn test_append_returns_fresh_array() {
    let env = Environment::new();
    assert_eq!(
        run_in("let a = [1,2,3]; append(a, 4);", &env).unwrap().to_string(),
        "[1,2,3,4]"
    );
    // the original binding is untouched afterwards
    assert_eq!(run_in("a;", &env).unwrap().to_string(), "[1,2,3]");
}

#[test]
fn test_hash_with_mixed_key_kinds() {
    assert_eq!(
        inspect("let h = {\"k\": 1, 2: \"v\"}; h[\"k\"] + len(h[2]);"),
        "2"
    );
}

#[test]
fn test_recursive_factorial() {
    assert_eq!(
        inspect("let fact = fn(n){ if(n<2){1}else{ n*fact(n-1) } }; fact(5);"),
        "120"
    );
}

#[test]
fn test_repl_style_session_keeps_environment() {
    let env = Environment::new();
    run_in("let total = 0;", &env).unwrap();
    run_in("let bump = fn(n) { total = total + n };", &env).unwrap();
    run_in("bump(3); bump(4);", &env).unwrap();
    assert_eq!(run_in("total;", &env).unwrap(), Value::Integer(7));
}

#[test]
fn test_runtime_error_does_not_corrupt_environment() {
    let env = Environment::new();
    run_in("let x = 1;", &env).unwrap();
    assert!(run_in("x + missing;", &env).is_err());
    assert_eq!(run_in("x;", &env).unwrap(), Value::Integer(1));
}

#[test]
fn test_return_at_top_level_is_programs_value() {
    assert_eq!(inspect("return 42; 1;"), "42");
}

#[test]
fn test_arithmetic_type_rule_across_pipeline() {
    // double iff either operand is double
    assert!(matches!(run("1 + 2").unwrap(), Value::Integer(3)));
    assert!(matches!(run("1 + 2.0").unwrap(), Value::Double(_)));
    assert!(matches!(run("1.0 + 2").unwrap(), Value::Double(_)));
    assert!(matches!(run("1.0 + 2.0").unwrap(), Value::Double(_)));
}

#[test]
fn test_lexing_reproduces_source_tokens() {
    // joining token literals with single spaces recovers the source
    // modulo whitespace
    let source = "let add = fn ( x , y ) { x + y } ; add ( 2 , 3.5 ) ;";
    let mut lexer = Lexer::new(source);
    let mut literals = Vec::new();
    loop {
        let token = lexer.next_token();
        if token.kind == TokenKind::End {
            break;
        }
        literals.push(token.literal);
    }
    assert_eq!(literals.join(" "), source);
}

#[test]
fn test_parser_errors_block_evaluation() {
    let mut parser = Parser::new(Lexer::new("let x 5;"));
    parser.parse_program();
    assert_eq!(
        parser.errors,
        vec!["expected next token to be ASSIGN, got INT instead.".to_string()]
    );
}

#[test]
fn test_whole_program_with_loops_and_builtins() {
    let input = "
        fn sum(xs) {
            let total = 0;
            for (x in xs) { total = total + x; }
            total;
        }
        fn range(n) {
            let out = [];
            let i = 0;
            while (i < n) {
                out = append(out, i);
                i = i + 1;
            }
            out;
        }
        sum(range(5));";
    assert_eq!(inspect(input), "10");
}

#[test]
fn test_error_message_catalog() {
    let cases = [
        ("missing;", "identifier not found: missing"),
        ("5(1);", "not a function: int"),
        ("5 + true;", "type mismatch: 5 + true"),
        ("-\"s\";", "unknown operator: -\"s\""),
        ("[1,2][5];", "index out of range: 5"),
        ("5[0];", "index operator not supported: 5 0"),
        ("let h = {[1]: 1};", "unusable as hash key: array"),
        ("len(5);", "argument to `len` not supported, got int"),
        ("len();", "function len expected 1 arguments, got 0"),
    ];
    for (input, expected) in cases {
        match run(input) {
            Err(e) => assert_eq!(e.to_string(), expected, "input: {}", input),
            Ok(v) => panic!("expected error for {:?}, got {}", input, v),
        }
    }
}
