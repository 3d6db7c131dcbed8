pub mod error;
pub mod expressions;
pub mod statements;

use crate::token::{Token, TokenKind};
pub use error::ParseError;
use statements::parse_statement;

pub struct Parser<'a> {
    pub iter: std::iter::Peekable<crate::lexer::Tokenizer<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(tokenizer: crate::lexer::Tokenizer<'a>) -> Self {
        let iter = tokenizer.peekable();
        Self { iter }
    }

    pub(crate) fn parse_ident(&mut self) -> Result<std::rc::Rc<str>, ParseError> {
        let token = self.iter.next();
        match token {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) => Ok(name),
            _ => Err(ParseError::unexpected_other(
                error::Expected::Identifier,
                token,
            )),
        }
    }

    /// Consumes the next token if it has the given kind. On a mismatch the
    /// offending token is left in the stream so that error recovery can
    /// resynchronize on it.
    pub(crate) fn expect_token(&mut self, token_kind: TokenKind) -> Result<(), ParseError> {
        let found = matches!(self.iter.peek(), Some(Token { kind, .. }) if *kind == token_kind);
        if found {
            self.iter.next();
            Ok(())
        } else {
            Err(ParseError::unexpected_token(
                token_kind,
                self.iter.peek().cloned(),
            ))
        }
    }

    /// Skips tokens up to and including the next `;`, the statement boundary
    /// parsing resumes at after an error.
    fn synchronize(&mut self) {
        for token in self.iter.by_ref() {
            if token.kind == TokenKind::SemiColon {
                break;
            }
        }
    }

    /// Parses the whole token stream into a [`crate::ast::Program`].
    ///
    /// Never gives up on the first problem: every syntax error is recorded
    /// and parsing resumes at the next statement boundary, so a single call
    /// can report several independent faults. The returned program holds
    /// every statement that did parse.
    pub fn parse_program(&mut self) -> (crate::ast::Program, Vec<ParseError>) {
        let mut statements = Vec::new();
        let mut errors = Vec::new();

        while self.iter.peek().is_some() {
            match parse_statement(self) {
                Ok(statement) => {
                    statements.push(statement);
                    // A statement is followed by a `;` or the end of input.
                    match self.iter.peek() {
                        Some(Token {
                            kind: TokenKind::SemiColon,
                            ..
                        }) => {
                            self.iter.next();
                        }
                        None => {}
                        Some(token) => {
                            errors.push(ParseError::UnexpectedToken {
                                expected: error::Expected::Token(TokenKind::SemiColon),
                                got: token.clone(),
                            });
                            self.synchronize();
                        }
                    }
                }
                Err(err) => {
                    errors.push(err);
                    self.synchronize();
                }
            }
        }
        (crate::ast::Program { statements }, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::ParseError;

    fn parse(input: &str) -> (crate::ast::Program, Vec<ParseError>) {
        let tokenizer = crate::lexer::Tokenizer::new(input);
        let mut parser = crate::parser::Parser::new(tokenizer);
        parser.parse_program()
    }

    fn test_parsing(tests: Vec<(&str, &str)>) {
        for (input, expected) in tests {
            let (program, errors) = parse(input);

            assert_eq!(errors, vec![], "unexpected errors for {:?}", input);
            assert_eq!(program.to_string(), expected)
        }
    }

    #[test]
    fn test_operator_precedence() {
        let tests = vec![
            ("-a * b", "((-a) * b);\n"),
            ("!-a", "(!(-a));\n"),
            ("a + b + c", "((a + b) + c);\n"),
            ("a + b - c", "((a + b) - c);\n"),
            ("a * b * c", "((a * b) * c);\n"),
            ("a * b / c", "((a * b) / c);\n"),
            ("a + b / c", "(a + (b / c));\n"),
            (
                "a + b * c + d / e - f",
                "(((a + (b * c)) + (d / e)) - f);\n",
            ),
            ("1 + 2 * 3", "(1 + (2 * 3));\n"),
            ("1 - 2 - 3", "((1 - 2) - 3);\n"),
            ("3 + 4; -5 * 5", "(3 + 4);\n((-5) * 5);\n"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4));\n"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4));\n"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)));\n",
            ),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_grouped_expressions() {
        let tests = vec![
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4);\n"),
            ("(1 + 2) * 3", "((1 + 2) * 3);\n"),
            ("2 / (5 + 5)", "(2 / (5 + 5));\n"),
            ("-(5 + 5)", "(-(5 + 5));\n"),
            ("!(true == true)", "(!(true == true));\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_let_and_return_statements() {
        let tests = vec![
            ("let x = 5;", "let x = 5;\n"),
            ("let y = true;", "let y = true;\n"),
            ("let foobar = y;", "let foobar = y;\n"),
            ("return 5;", "return 5;\n"),
            ("return 2 * 3;", "return (2 * 3);\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_call_expressions() {
        let tests = vec![
            ("a + add(b * c) + d", "((a + add((b * c))) + d);\n"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)));\n",
            ),
            (
                "add(a + b + c * d / f + g)",
                "add((((a + b) + ((c * d) / f)) + g));\n",
            ),
            ("fn(x) { x }(5)", "fn(x) {x;}(5);\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_conditionals() {
        let tests = vec![
            ("if (x < y) { x }", "if (x < y) {x;};\n"),
            (
                "if (x < y) { x } else { y }",
                "if (x < y) {x;} else {y;};\n",
            ),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_function_literals() {
        let tests = vec![
            ("fn() { 1 };", "fn() {1;};\n"),
            ("fn(x) { x };", "fn(x) {x;};\n"),
            ("fn(x, y, z) { x };", "fn(x, y, z) {x;};\n"),
            (
                "let getName = fn(person) { person[\"name\"]; };",
                "let getName = fn(person) {(person[\"name\"]);};\n",
            ),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_array_and_index_expressions() {
        let tests = vec![
            ("[1, 2 * 2, 3 + 3]", "[1, (2 * 2), (3 + 3)];\n"),
            ("myArray[1 + 1]", "(myArray[(1 + 1)]);\n"),
            (
                "a * [1, 2, 3, 4][b * c] * d",
                "((a * ([1, 2, 3, 4][(b * c)])) * d);\n",
            ),
            (
                "add(a * b[2], b[1], 2 * [1, 2][1])",
                "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])));\n",
            ),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_hash_literals() {
        let tests = vec![
            ("{}", "{};\n"),
            ("{\"one\": 1, \"two\": 2}", "{\"one\": 1, \"two\": 2};\n"),
            (
                "{\"one\": 0 + 1, 2: \"two\"}",
                "{\"one\": (0 + 1), 2: \"two\"};\n",
            ),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_missing_prefix_function_is_an_error() {
        let (program, errors) = parse("5 +;");

        assert_eq!(program.statements, vec![]);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ParseError::NoPrefixFunction(_)));
    }

    #[test]
    fn test_unmatched_delimiter_is_an_error() {
        let (_, errors) = parse("(1 + 2;");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "expected ')', got ';' at byte 6");
    }

    #[test]
    fn test_recovery_reports_multiple_errors() {
        // Two independent faults separated by a statement boundary: a
        // missing ')' and a missing prefix operand.
        let (program, errors) = parse("(1 + 2; 5 +; 7;");

        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ParseError::UnexpectedToken { .. }));
        assert!(matches!(errors[1], ParseError::NoPrefixFunction(_)));
        // The well-formed trailing statement still made it into the program.
        assert_eq!(program.to_string(), "7;\n");
    }

    #[test]
    fn test_partial_program_is_kept_alongside_errors() {
        let (program, errors) = parse("let x 5; let y = 2;");

        assert_eq!(errors.len(), 1);
        assert_eq!(program.to_string(), "let y = 2;\n");
    }

    #[test]
    fn test_premature_end_of_input() {
        let (_, errors) = parse("let x =");

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "unexpected end of input, expected an expression"
        );
    }
}
