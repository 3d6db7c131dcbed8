use crate::token::{Span, Token, TokenKind};

// Payload-free stand-in for the keyword kinds so the map can live in a
// `static` (`TokenKind` holds `Rc<str>` and is not `Sync`).
#[derive(Debug, Clone, Copy)]
enum Keyword {
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl Keyword {
    fn token_kind(self) -> TokenKind {
        match self {
            Keyword::Function => TokenKind::Function,
            Keyword::Let => TokenKind::Let,
            Keyword::True => TokenKind::True,
            Keyword::False => TokenKind::False,
            Keyword::If => TokenKind::If,
            Keyword::Else => TokenKind::Else,
            Keyword::Return => TokenKind::Return,
        }
    }
}

static KEYWORDS: phf::Map<&str, Keyword> = phf::phf_map! {
    "fn" => Keyword::Function,
    "let" => Keyword::Let,
    "true" => Keyword::True,
    "false" => Keyword::False,
    "if" => Keyword::If,
    "else" => Keyword::Else,
    "return" => Keyword::Return,
};

/// Streaming tokenizer over one unit of source text. Yields `None` once the
/// input is exhausted, and keeps yielding `None` on every call after that.
#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iter = input.char_indices().peekable();
        Self { input, iter }
    }

    fn is_letter(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn read_identifier(&mut self, start: usize) -> TokenKind {
        while self.iter.next_if(|(_, ch)| Self::is_letter(*ch)).is_some() {}

        let ident = &self.input[start..self.next_idx()];
        KEYWORDS
            .get(ident)
            .map(|keyword| keyword.token_kind())
            .unwrap_or_else(|| TokenKind::Ident(ident.into()))
    }

    fn read_number(&mut self, start: usize) -> TokenKind {
        while self.iter.next_if(|(_, ch)| ch.is_ascii_digit()).is_some() {}

        TokenKind::Int(self.input[start..self.next_idx()].into())
    }

    /// Reads until the closing quote. The surrounding quotes are not part of
    /// the token text.
    fn read_string(&mut self, start: usize) -> TokenKind {
        loop {
            match self.iter.next() {
                Some((idx, '"')) => return TokenKind::Str(self.input[start + 1..idx].into()),
                None => return TokenKind::Illegal("unterminated string".into()),
                _ => {}
            }
        }
    }

    fn next_idx(&mut self) -> usize {
        self.iter
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.iter.next_if(|(_, ch)| ch.is_whitespace()).is_some() {}

        let (start, ch) = self.iter.next()?;
        let kind = match ch {
            '=' => {
                if self.iter.next_if(|(_, ch)| *ch == '=').is_some() {
                    TokenKind::Equal
                } else {
                    TokenKind::Assign
                }
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '!' => {
                if self.iter.next_if(|(_, ch)| *ch == '=').is_some() {
                    TokenKind::NotEqual
                } else {
                    TokenKind::Bang
                }
            }
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            ',' => TokenKind::Comma,
            ';' => TokenKind::SemiColon,
            ':' => TokenKind::Colon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '"' => self.read_string(start),
            c if Self::is_letter(c) => self.read_identifier(start),
            c if c.is_ascii_digit() => self.read_number(start),
            _ => TokenKind::Illegal(ch.to_string().into()),
        };
        let span = Span {
            start,
            end: self.next_idx(),
        };
        Some(Token { kind, span })
    }
}
