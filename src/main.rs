// ABOUTME: CLI entry point: REPL mode and script-file mode for Mica

mod ast;
mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod highlighter;
mod lexer;
mod parser;
mod token;
mod value;

use clap::Parser as ClapParser;
use env::Environment;
use eval::eval_program;
use highlighter::MicaHelper;
use parser::Parser;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;

/// Tree-walking interpreter for the Mica scripting language
#[derive(ClapParser, Debug)]
#[command(name = "mica")]
#[command(version = config::VERSION)]
#[command(about = "A tree-walking interpreter for the Mica scripting language")]
struct CliArgs {
    /// Script file to execute (optional - if not provided, starts REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    if let Some(script_path) = args.script {
        run_script(&script_path);
        return Ok(());
    }

    run_repl()
}

/// Execute a Mica script file: parser errors print one per line; a clean
/// parse evaluates silently except for runtime errors.
fn run_script(path: &PathBuf) {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => {
            println!("Could not open file: {}", path.display());
            std::process::exit(1);
        }
    };

    let mut parser = Parser::from_source(&contents);
    let program = parser.parse_program();

    if !parser.errors.is_empty() {
        for error in &parser.errors {
            println!("{}", error);
        }
        return;
    }

    let env = Environment::new();
    if let Err(e) = eval_program(&program, &env) {
        println!("Error: {}", e);
    }
}

/// Interactive loop: one line per iteration against a persistent
/// environment. Runtime errors are reported and the session continues.
fn run_repl() -> Result<(), Box<dyn std::error::Error>> {
    let rl_config = Config::builder().auto_add_history(true).build();
    let mut rl =
        Editor::with_config(rl_config).map_err(|e| format!("Failed to initialize REPL: {}", e))?;
    rl.set_helper(Some(MicaHelper::new()));

    // Best effort: a missing history file is fine
    let _ = rl.load_history(config::HISTORY_FILE);

    println!("{}", config::WELCOME_MESSAGE);

    let env = Environment::new();

    loop {
        match rl.readline(config::PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                let mut parser = Parser::from_source(&line);
                let program = parser.parse_program();

                if !parser.errors.is_empty() {
                    for error in &parser.errors {
                        println!("{}", error);
                    }
                    continue;
                }

                match eval_program(&program, &env) {
                    Ok(value::Value::Null) => {}
                    Ok(value) => println!("{}", value),
                    Err(e) => println!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C clears the line, keeps the session
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(config::HISTORY_FILE);

    Ok(())
}
