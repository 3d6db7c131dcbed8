mod printer;
mod reader;

use rustyline::DefaultEditor;

use monkey_interpreter::environment::Environment;
use monkey_interpreter::evaluator;
use printer::Printer;
use reader::{ReadOutput, Reader};

struct Repl {
    reader: Reader,
    /// Shared across iterations so `let` bindings persist between lines.
    environment: Environment,
    printer: Printer,
}

impl Repl {
    fn run(mut self) {
        loop {
            match self.reader.read() {
                ReadOutput::Exit => break,
                ReadOutput::Clear => continue,
                ReadOutput::Program(program) => {
                    let result = evaluator::eval_program(&program, &mut self.environment);
                    self.printer.print(result);
                }
            }
        }
    }
}

pub fn start() -> rustyline::Result<()> {
    let rl = DefaultEditor::new()?;

    Repl {
        reader: Reader::new(rl),
        environment: Environment::new(),
        printer: Printer,
    }
    .run();

    Ok(())
}
