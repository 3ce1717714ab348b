use crate::span::Span;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MeasureError>;

/// Failure to build a [`Measure`](crate::Measure) from text or relations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    #[error("Empty measure literal")]
    Empty,

    #[error("Expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("Invalid number '{value}' at {span}")]
    InvalidNumber { value: String, span: Span },

    #[error("Zero denominator at {span}")]
    ZeroDenominator { span: Span },

    #[error("Value out of range at {span}")]
    Overflow { span: Span },

    #[error("Invalid relations: {0}")]
    InvalidRelations(String),
}

impl MeasureError {
    pub fn unexpected_token(
        expected: impl Into<String>,
        found: impl Into<String>,
        span: Span,
    ) -> Self {
        MeasureError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    pub fn unexpected_eof(expected: impl Into<String>) -> Self {
        MeasureError::UnexpectedEof {
            expected: expected.into(),
        }
    }

    pub fn invalid_number(value: impl Into<String>, span: Span) -> Self {
        MeasureError::InvalidNumber {
            value: value.into(),
            span,
        }
    }

    pub fn invalid_relations(message: impl Into<String>) -> Self {
        MeasureError::InvalidRelations(message.into())
    }

    /// Location of the offending input, where there is one
    pub fn span(&self) -> Option<Span> {
        match self {
            MeasureError::UnexpectedToken { span, .. } => Some(*span),
            MeasureError::InvalidNumber { span, .. } => Some(*span),
            MeasureError::ZeroDenominator { span } | MeasureError::Overflow { span } => {
                Some(*span)
            }
            MeasureError::Empty
            | MeasureError::UnexpectedEof { .. }
            | MeasureError::InvalidRelations(_) => None,
        }
    }
}
