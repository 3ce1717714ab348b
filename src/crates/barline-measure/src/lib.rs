//! Bar-relative positions and durations
//!
//! A [`Measure`] is an exact rational number of bars. It is used both as a
//! duration (a fraction of one bar) and as a position (an offset from the
//! start of a bar). Measures can be written as short literals:
//!
//! ```
//! use barline_measure::Measure;
//!
//! let pos: Measure = "1/2 + 1/8".parse().unwrap();
//! assert_eq!(pos, Measure::new(5, 8));
//!
//! let slots = Measure::BAR.scale(&[1.0, 1.0, 2.0]).unwrap();
//! assert_eq!(slots[2], Measure::new(1, 2));
//! ```

pub mod error;
pub mod lexer;
pub mod measure;
pub mod parser;
pub mod span;

pub use error::{MeasureError, Result};
pub use lexer::{Lexer, Token};
pub use measure::Measure;
pub use parser::{parse, Parser};
pub use span::Span;
