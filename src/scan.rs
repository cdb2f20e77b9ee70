use std::fmt;

use log::trace;

use crate::CalcError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Integer,
    Plus,
    Minus,
    Mul,
    Div,
    LParen,
    RParen,
    Eof,
}

impl TokenKind {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            TokenKind::Integer => "an integer",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Mul => "'*'",
            TokenKind::Div => "'/'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn symbol(kind: TokenKind, c: char) -> Token {
        Token {
            kind,
            text: c.to_string(),
        }
    }

    fn eof() -> Token {
        Token {
            kind: TokenKind::Eof,
            text: String::new(),
        }
    }
}

/// Pull-based tokenizer over a single input line.
///
/// The cursor only moves forward; once it has passed the last character,
/// every further `next_token` call returns another EOF token.
pub struct Lexer<'l> {
    line: &'l str,
    pos: usize,
    current: Option<char>,
}

impl<'l> Lexer<'l> {
    pub fn new(line: &'l str) -> Self {
        Lexer {
            line,
            pos: 0,
            current: line.chars().next(),
        }
    }

    fn advance(&mut self) {
        if let Some(c) = self.current {
            self.pos += c.len_utf8();
            self.current = self.line[self.pos..].chars().next();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current, Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    /// Maximal run of decimal digits starting at the cursor.
    fn integer(&mut self) -> String {
        let start = self.pos;
        while matches!(self.current, Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        self.line[start..self.pos].to_string()
    }

    pub fn next_token(&mut self) -> Result<Token, CalcError> {
        while let Some(c) = self.current {
            let token = match c {
                c if c.is_whitespace() => {
                    self.skip_whitespace();
                    continue;
                }
                '0'..='9' => Token {
                    kind: TokenKind::Integer,
                    text: self.integer(),
                },
                '+' => {
                    self.advance();
                    Token::symbol(TokenKind::Plus, c)
                }
                '-' => {
                    self.advance();
                    Token::symbol(TokenKind::Minus, c)
                }
                '*' => {
                    self.advance();
                    Token::symbol(TokenKind::Mul, c)
                }
                '/' => {
                    self.advance();
                    Token::symbol(TokenKind::Div, c)
                }
                '(' => {
                    self.advance();
                    Token::symbol(TokenKind::LParen, c)
                }
                ')' => {
                    self.advance();
                    Token::symbol(TokenKind::RParen, c)
                }
                _ => return Err(CalcError::InvalidCharacter(c)),
            };
            trace!("token: {token:?}");
            return Ok(token);
        }
        Ok(Token::eof())
    }
}

/// Drains a fresh lexer up to (excluding) EOF.
///
/// Inspection and test aid; evaluation pulls tokens one at a time and never
/// buffers the whole sequence.
pub fn scan(line: &str) -> Result<Vec<Token>, CalcError> {
    let mut lexer = Lexer::new(line);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        if token.kind == TokenKind::Eof {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<TokenKind> {
        scan(line)
            .unwrap_or_else(|e| panic!("scanning success on {line:?}: {e}"))
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn scan_digit_run() {
        let tokens = scan("123").unwrap();
        assert_eq!(
            tokens,
            [Token {
                kind: TokenKind::Integer,
                text: String::from("123"),
            }]
        );
    }

    #[test]
    fn scan_symbols() {
        use TokenKind::*;
        assert_eq!(kinds("+-*/()"), [Plus, Minus, Mul, Div, LParen, RParen]);
    }

    #[test]
    fn scan_skips_whitespace() {
        assert_eq!(scan("  12 +  3 ").unwrap(), scan("12+3").unwrap());
        assert_eq!(kinds("\t7 * 8\n"), kinds("7*8"));
    }

    #[test]
    fn scan_only_whitespace() {
        assert!(kinds("   ").is_empty());
        assert!(kinds("\r").is_empty());
    }

    #[test]
    fn scan_does_not_split_digit_runs() {
        let texts: Vec<String> = scan("11 22")
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, ["11", "22"]);
    }

    #[test]
    fn eof_is_terminal() {
        let mut lexer = Lexer::new("7");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Integer);
        for _ in 0..3 {
            assert_eq!(lexer.next_token().unwrap(), Token::eof());
        }
    }

    #[test]
    fn invalid_character() {
        let mut lexer = Lexer::new("1&2");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Integer);
        assert_eq!(
            lexer.next_token().unwrap_err(),
            CalcError::InvalidCharacter('&')
        );
    }
}
