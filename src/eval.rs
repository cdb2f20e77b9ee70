use log::debug;

use crate::scan::{Lexer, Token, TokenKind};
use crate::CalcError;

/// Recursive-descent parser that computes the value of a line while parsing
/// it; no syntax tree is built.
///
/// Grammar, with the usual precedence and left-to-right associativity:
///
/// ```text
/// expr   := term (('+' | '-') term)*
/// term   := factor (('*' | '/') factor)*
/// factor := INTEGER | '(' expr ')'
/// ```
pub struct Evaluator<'l> {
    lexer: Lexer<'l>,
    current: Token,
}

impl<'l> Evaluator<'l> {
    /// Builds a lexer over `line` and primes the one-token lookahead.
    pub fn new(line: &'l str) -> Result<Self, CalcError> {
        let mut lexer = Lexer::new(line);
        let current = lexer.next_token()?;
        Ok(Evaluator { lexer, current })
    }

    /// The only place token mismatches are detected: on a kind match, the
    /// lookahead is replaced with the next token pulled from the lexer, and
    /// the consumed token is handed back.
    fn eat(&mut self, expected: TokenKind) -> Result<Token, CalcError> {
        if self.current.kind != expected {
            return Err(CalcError::SyntaxError {
                expected: expected.describe(),
                found: self.current.kind,
            });
        }
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn factor(&mut self) -> Result<i64, CalcError> {
        match self.current.kind {
            TokenKind::Integer => {
                let token = self.eat(TokenKind::Integer)?;
                token
                    .text
                    .parse()
                    .map_err(|_| CalcError::InvalidInteger(token.text))
            }
            TokenKind::LParen => {
                self.eat(TokenKind::LParen)?;
                let value = self.expr()?;
                self.eat(TokenKind::RParen)?;
                Ok(value)
            }
            found => Err(CalcError::SyntaxError {
                expected: "an integer or '('",
                found,
            }),
        }
    }

    fn term(&mut self) -> Result<i64, CalcError> {
        let mut acc = self.factor()?;
        while let kind @ (TokenKind::Mul | TokenKind::Div) = self.current.kind {
            self.eat(kind)?;
            let rhs = self.factor()?;
            acc = match kind {
                TokenKind::Mul => acc * rhs,
                TokenKind::Div if rhs == 0 => return Err(CalcError::DivisionByZero),
                TokenKind::Div => acc / rhs,
                _ => unreachable!("loop guard admits only '*' and '/'"),
            };
        }
        Ok(acc)
    }

    /// Grammar entry point; the value it returns is the result for the line.
    pub fn expr(&mut self) -> Result<i64, CalcError> {
        let mut acc = self.term()?;
        while let kind @ (TokenKind::Plus | TokenKind::Minus) = self.current.kind {
            self.eat(kind)?;
            let rhs = self.term()?;
            acc = match kind {
                TokenKind::Plus => acc + rhs,
                TokenKind::Minus => acc - rhs,
                _ => unreachable!("loop guard admits only '+' and '-'"),
            };
        }
        Ok(acc)
    }

    /// Requires the whole line to have been consumed.
    fn finish(mut self) -> Result<(), CalcError> {
        self.eat(TokenKind::Eof)?;
        Ok(())
    }
}

/// Evaluates one line to completion.
///
/// Trailing tokens after the top-level expression are rejected rather than
/// silently ignored, so `1+2)` is a syntax error and not `3`.
pub fn eval_line(line: &str) -> Result<i64, CalcError> {
    debug!("evaluating {line:?}");
    let mut evaluator = Evaluator::new(line)?;
    let value = evaluator.expr()?;
    evaluator.finish()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priming_failure_propagates() {
        assert!(matches!(
            Evaluator::new("&"),
            Err(CalcError::InvalidCharacter('&'))
        ));
    }

    #[test]
    fn eat_mismatch_names_both_kinds() {
        let mut evaluator = Evaluator::new("7").unwrap();
        let err = evaluator.eat(TokenKind::Plus).unwrap_err();
        assert_eq!(
            err,
            CalcError::SyntaxError {
                expected: "'+'",
                found: TokenKind::Integer,
            }
        );
    }

    #[test]
    fn eat_hands_back_the_consumed_token() {
        let mut evaluator = Evaluator::new("42+").unwrap();
        let token = evaluator.eat(TokenKind::Integer).unwrap();
        assert_eq!(token.text, "42");
        assert_eq!(evaluator.current.kind, TokenKind::Plus);
    }

    #[test]
    fn expr_leaves_trailing_tokens_for_finish() {
        let mut evaluator = Evaluator::new("1+2)").unwrap();
        assert_eq!(evaluator.expr().unwrap(), 3);
        assert!(matches!(
            evaluator.finish(),
            Err(CalcError::SyntaxError {
                found: TokenKind::RParen,
                ..
            })
        ));
    }
}
