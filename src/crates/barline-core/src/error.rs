use barline_measure::MeasureError;
use thiserror::Error;

/// Errors raised while building a pattern
///
/// Evaluation never fails; everything that can go wrong is caught when the
/// pattern tree is constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    #[error("Invalid measure: {0}")]
    Measure(#[from] MeasureError),

    #[error("At least one pattern required")]
    EmptyRandom,

    #[error("Pattern {index} spans {found} bars, but pattern 0 spans {expected}")]
    BarMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("A sequence needs at least one pattern")]
    EmptySequence,

    #[error("Switch mask must not be empty")]
    EmptyMask,

    #[error("A distribution needs at least one step")]
    ZeroSteps,

    #[error("Exponential distribution needs non-zero bounds of the same sign, got {from} and {to}")]
    InvalidExponentialRange { from: f64, to: f64 },
}

pub type Result<T> = std::result::Result<T, PatternError>;
