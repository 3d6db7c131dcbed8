use monkey_core::ast::Program;
use monkey_core::lexer::Tokenizer;
use monkey_core::parser::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = ">> ";

pub enum ReadOutput {
    Exit,
    Clear,
    Program(Program),
}

pub struct Reader {
    rl: DefaultEditor,
}

impl Reader {
    pub fn new(rl: DefaultEditor) -> Self {
        Self { rl }
    }

    /// Reads one line and parses it. Syntax errors are printed here, one per
    /// indented line, and the line is discarded without being evaluated.
    pub fn read(&mut self) -> ReadOutput {
        let line = match self.rl.readline(PROMPT) {
            Err(ReadlineError::Interrupted) => return ReadOutput::Clear,
            Err(ReadlineError::Eof) => return ReadOutput::Exit,
            Err(err) => {
                println!("read error: {}", err);
                return ReadOutput::Exit;
            }
            Ok(line) => line,
        };
        if line.trim().is_empty() {
            return ReadOutput::Clear;
        }
        let _ = self.rl.add_history_entry(&line);

        let mut parser = Parser::new(Tokenizer::new(&line));
        let (program, errors) = parser.parse_program();
        if errors.is_empty() {
            ReadOutput::Program(program)
        } else {
            for error in errors {
                println!("\t{}", error);
            }
            ReadOutput::Clear
        }
    }
}
