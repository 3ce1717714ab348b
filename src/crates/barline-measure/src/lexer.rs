use crate::span::Span;
use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    // Unsigned; a leading minus is a separate token so "1-1/4" lexes as a subtraction
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,

    Error,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number => write!(f, "number"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Slash => write!(f, "'/'"),
            Token::Error => write!(f, "invalid character"),
        }
    }
}

/// Lexer wrapper with position tracking
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, Token>,
    peeked: Option<Option<(Token, Span)>>,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Lexer {
            inner: Token::lexer(source),
            peeked: None,
        }
    }

    pub fn next_token(&mut self) -> Option<(Token, Span)> {
        if let Some(peeked) = self.peeked.take() {
            return peeked;
        }

        let token = self.inner.next()?;
        let span = Span::from(self.inner.span());
        Some((token.unwrap_or(Token::Error), span))
    }

    pub fn peek_token(&mut self) -> Option<(Token, Span)> {
        if self.peeked.is_none() {
            self.peeked = Some(self.next_token());
        }
        self.peeked.as_ref().and_then(|x| x.clone())
    }

    pub fn source(&self) -> &'source str {
        self.inner.source()
    }

    pub fn slice(&self, span: Span) -> &'source str {
        &self.source()[span.to_range()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        while let Some((token, _)) = lexer.next_token() {
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn test_lex_fraction() {
        assert_eq!(lex("3/4"), vec![Token::Number, Token::Slash, Token::Number]);
    }

    #[test]
    fn test_lex_sum_with_whitespace() {
        assert_eq!(
            lex(" 1/2 + 1-0.25 "),
            vec![
                Token::Number,
                Token::Slash,
                Token::Number,
                Token::Plus,
                Token::Number,
                Token::Minus,
                Token::Number
            ]
        );
    }

    #[test]
    fn test_lex_garbage() {
        assert_eq!(lex("1x"), vec![Token::Number, Token::Error]);
    }

    #[test]
    fn test_lexer_slice_and_peek() {
        let mut lexer = Lexer::new("12/16");

        let (token, span) = lexer.peek_token().unwrap();
        assert_eq!(token, Token::Number);
        assert_eq!(lexer.slice(span), "12");

        let (token, _) = lexer.next_token().unwrap();
        assert_eq!(token, Token::Number);

        let (token, _) = lexer.next_token().unwrap();
        assert_eq!(token, Token::Slash);
    }
}
