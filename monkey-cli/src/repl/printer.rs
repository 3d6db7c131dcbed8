use std::rc::Rc;

use monkey_interpreter::object::{EvaluationError, Object};

pub struct Printer;

impl Printer {
    /// Values and errors go through the same rendering path; errors are
    /// prefixed so they stand out in a scrollback.
    pub fn print(&mut self, result: Result<Rc<Object>, EvaluationError>) {
        match result {
            Ok(object) => println!("{}", object.inspect()),
            Err(error) => println!("ERROR: {}", error),
        }
    }
}
