//! Pattern combinator algebra for bar-indexed musical timelines
//!
//! A [`Pattern`] answers one question: which events fire where inside bar
//! `n`? Primitive patterns emit single events or distribute event groups over
//! slots; combinators sequence, layer, randomise and gate other patterns; the
//! distributions build parameter and tempo ramps out of those same pieces.
//!
//! # Examples
//!
//! ```
//! use barline_core::{Event, FixedBar, Measure, Mix, Pattern, Sequence, SetTempo, SlotPattern};
//!
//! let drums = SlotPattern::new(&[1.0, 1.0, 1.0, 1.0])
//!     .unwrap()
//!     .set_events([Event::start()]);
//! let tempo = SetTempo::new("0", 96.0).unwrap();
//!
//! let mut song = Sequence::new(vec![
//!     Mix::new(vec![drums.boxed(), tempo.boxed()]).boxed(),
//!     SetTempo::new("1/2", 120.0).unwrap().boxed(),
//! ])
//! .unwrap();
//!
//! assert_eq!(song.num_bars(), 2);
//! let first = song.events(0, &FixedBar::default());
//! assert_eq!(first.get(Measure::ZERO).len(), 2);
//! ```
//!
//! # Main Components
//!
//! - **Measure**: exact bar positions and durations (re-exported from `barline-measure`)
//! - **Event**: note, parameter, tempo and marker events
//! - **Pattern**: the trait every pattern implements, plus the [`PatternFn`] adapter
//! - **Primitives**: [`SlotPattern`], [`End`], [`Start`], [`SetTempo`], [`Change`]
//! - **Combinators**: [`Sequence`], [`Mix`], [`RandomPattern`], [`SeqSwitch`]
//! - **Ramps**: [`TempoSpan`], [`LinearDistribution`], [`ExponentialDistribution`]

pub mod combinators;
pub mod distribution;
pub mod error;
pub mod event;
pub mod pattern;
pub mod primitives;
pub mod slot;
pub mod tempo;
pub mod timeline;
pub mod tracker;


pub use barline_measure::{Measure, MeasureError};
pub use combinators::{Mix, RandomPattern, SeqSwitch, Sequence};
pub use distribution::{
    Distribution, ExponentialDistribution, ExponentialTempoChange, LinearDistribution,
    LinearTempoChange, TempoChange, TEMPO_PARAM,
};
pub use error::{PatternError, Result};
pub use event::{Event, EventKind, Params, Voice};
pub use pattern::{pattern_fn, BoxedPattern, Pattern, PatternFn};
pub use primitives::{Change, End, SetTempo, Start};
pub use slot::{Slot, SlotPattern};
pub use tempo::{step_add, step_multiply, StepFn, TempoReset, TempoSpan, TempoStep};
pub use timeline::Timeline;
pub use tracker::{FixedBar, Tracker};
