use std::path::Path;
use std::process::ExitCode;

use monkey_core::lexer::Tokenizer;
use monkey_core::parser::Parser;
use monkey_interpreter::environment::Environment;
use monkey_interpreter::evaluator;
use monkey_interpreter::object::Object;

pub fn execute_file(path: &Path) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{}: {}", path.display(), err);
            return ExitCode::FAILURE;
        }
    };
    execute(&source)
}

pub fn execute(source: &str) -> ExitCode {
    let mut parser = Parser::new(Tokenizer::new(source));
    let (program, errors) = parser.parse_program();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{}", error);
        }
        return ExitCode::FAILURE;
    }

    let mut environment = Environment::new();
    match evaluator::eval_program(&program, &mut environment) {
        Ok(object) => {
            if !matches!(object.as_ref(), Object::Null) {
                println!("{}", object.inspect());
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("ERROR: {}", error);
            ExitCode::FAILURE
        }
    }
}
