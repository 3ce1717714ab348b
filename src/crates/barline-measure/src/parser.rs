//! Recursive-descent parser for measure literals
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := ['-'] number ['/' number]
//! number := [0-9]+ ('.' [0-9]+)?
//! ```

use crate::error::{MeasureError, Result};
use crate::lexer::{Lexer, Token};
use crate::measure::Measure;
use crate::span::Span;

/// Parse a complete measure literal
pub fn parse(source: &str) -> Result<Measure> {
    Parser::new(source).parse()
}

pub struct Parser<'source> {
    lexer: Lexer<'source>,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source str) -> Self {
        Parser {
            lexer: Lexer::new(source),
        }
    }

    /// Parse the whole input; trailing tokens are an error
    pub fn parse(&mut self) -> Result<Measure> {
        if self.lexer.peek_token().is_none() {
            return Err(MeasureError::Empty);
        }

        let value = self.parse_expr()?;

        match self.lexer.next_token() {
            None => Ok(value),
            Some((token, span)) => Err(MeasureError::unexpected_token(
                "'+', '-' or end of input",
                self.describe(&token, span),
                span,
            )),
        }
    }

    fn parse_expr(&mut self) -> Result<Measure> {
        let (mut value, mut span) = self.parse_term()?;

        loop {
            let subtract = match self.lexer.peek_token() {
                Some((Token::Plus, _)) => false,
                Some((Token::Minus, _)) => true,
                _ => return Ok(value),
            };
            self.lexer.next_token();

            let (term, term_span) = self.parse_term()?;
            span = span.to(term_span);
            let next = if subtract {
                value.checked_sub(term)
            } else {
                value.checked_add(term)
            };
            value = next.ok_or(MeasureError::Overflow { span })?;
        }
    }

    /// A signed number or fraction, with the span it covers
    fn parse_term(&mut self) -> Result<(Measure, Span)> {
        let sign = match self.lexer.peek_token() {
            Some((Token::Minus, span)) => {
                self.lexer.next_token();
                Some(span)
            }
            _ => None,
        };

        let (numerator, mut span) = self.parse_number_spanned()?;
        if let Some(sign) = sign {
            span = sign.to(span);
        }

        let value = if let Some((Token::Slash, _)) = self.lexer.peek_token() {
            self.lexer.next_token();
            let (denominator, den_span) = self.parse_number_spanned()?;
            if denominator.is_zero() {
                return Err(MeasureError::ZeroDenominator { span: den_span });
            }
            span = span.to(den_span);
            numerator
                .checked_div(denominator)
                .ok_or(MeasureError::Overflow { span })?
        } else {
            numerator
        };

        // literals are never negative, so negating them cannot overflow
        Ok((if sign.is_some() { -value } else { value }, span))
    }

    fn parse_number_spanned(&mut self) -> Result<(Measure, Span)> {
        match self.lexer.next_token() {
            Some((Token::Number, span)) => {
                let text = self.lexer.slice(span);
                Ok((number_literal(text, span)?, span))
            }
            Some((token, span)) => Err(MeasureError::unexpected_token(
                "number",
                self.describe(&token, span),
                span,
            )),
            None => Err(MeasureError::unexpected_eof("number")),
        }
    }

    fn describe(&self, token: &Token, span: Span) -> String {
        match token {
            Token::Error => format!("'{}'", self.lexer.slice(span)),
            other => other.to_string(),
        }
    }
}

/// Decimal literals are converted exactly: "0.125" becomes 125/1000 = 1/8
fn number_literal(text: &str, span: Span) -> Result<Measure> {
    let invalid = || MeasureError::invalid_number(text, span);

    match text.split_once('.') {
        None => text.parse::<i64>().map(Measure::from_int).map_err(|_| invalid()),
        Some((whole, frac)) => {
            let digits = format!("{}{}", whole, frac);
            let numerator = digits.parse::<i64>().map_err(|_| invalid())?;
            let scale = u32::try_from(frac.len())
                .ok()
                .and_then(|len| 10i64.checked_pow(len))
                .ok_or_else(invalid)?;
            Measure::try_new(numerator, scale).ok_or_else(invalid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(n: i64, d: i64) -> Measure {
        Measure::new(n, d)
    }

    #[test]
    fn test_parse_integers_and_fractions() {
        assert_eq!(parse("0").unwrap(), Measure::ZERO);
        assert_eq!(parse("1").unwrap(), Measure::BAR);
        assert_eq!(parse("3/4").unwrap(), m(3, 4));
        assert_eq!(parse("6/8").unwrap(), m(3, 4));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse("0.25").unwrap(), m(1, 4));
        assert_eq!(parse("1.5/3").unwrap(), m(1, 2));
    }

    #[test]
    fn test_parse_additive() {
        assert_eq!(parse("1/2+1/8").unwrap(), m(5, 8));
        assert_eq!(parse("3/4 - 1/16").unwrap(), m(11, 16));
        assert_eq!(parse("1 + 1/4 + 1/4").unwrap(), m(3, 2));
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!(parse("-1/4").unwrap(), m(-1, 4));
        assert_eq!(parse("1/4 + -1/2").unwrap(), m(-1, 4));
    }

    #[test]
    fn test_parse_errors_are_distinguishable() {
        assert_eq!(parse(""), Err(MeasureError::Empty));
        assert_eq!(parse("   "), Err(MeasureError::Empty));
        assert!(matches!(parse("1/"), Err(MeasureError::UnexpectedEof { .. })));
        assert!(matches!(
            parse("1/0"),
            Err(MeasureError::ZeroDenominator { span }) if span == Span::new(2, 3)
        ));
        assert!(matches!(parse("1 2"), Err(MeasureError::UnexpectedToken { .. })));
        assert!(matches!(parse("abc"), Err(MeasureError::UnexpectedToken { .. })));
        assert!(matches!(
            parse("99999999999999999999"),
            Err(MeasureError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_overflowing_literals_are_errors() {
        assert!(matches!(
            parse("9223372036854775807 + 1"),
            Err(MeasureError::Overflow { span }) if span == Span::new(0, 23)
        ));
        assert!(matches!(
            parse("1 - 9223372036854775807 - 9223372036854775807"),
            Err(MeasureError::Overflow { .. })
        ));
        assert!(matches!(
            parse("2/3 + 1/3037000499 + 1/3037000493"),
            Err(MeasureError::Overflow { span }) if span.start == 0
        ));
        assert!(matches!(
            parse("0.5/9223372036854775807"),
            Err(MeasureError::Overflow { span }) if span == Span::new(0, 23)
        ));

        // wide intermediates that reduce back into range still parse
        assert_eq!(parse("1/3037000499 - 1/3037000499").unwrap(), Measure::ZERO);
        assert_eq!(
            parse("1/3037000499 + 1/3037000493").unwrap(),
            Measure::new(6_074_000_992, 9_223_372_012_704_246_007)
        );
        assert_eq!(
            parse("9223372036854775807 - 9223372036854775807 + 1").unwrap(),
            Measure::BAR
        );
    }

    #[test]
    fn test_error_span_points_at_input() {
        let err = parse("1/4 + x").unwrap_err();
        assert_eq!(err.span(), Some(Span::new(6, 7)));
        assert!(err.to_string().contains("'x'"));
    }
}
