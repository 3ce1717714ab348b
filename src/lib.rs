//! Barline: composable patterns that turn bar indices into timed events
//!
//! The workspace is split into three crates, re-exported here:
//! - [`measure`]: rational bar positions and their literal grammar
//! - [`core`]: events, timelines and the pattern combinators
//! - [`player`]: a reference driver that evaluates patterns bar by bar
//!
//! ```
//! use barline::core::{Event, Mix, Pattern, SetTempo, SlotPattern, Voice, Params};
//! use barline::player::Track;
//!
//! let hat = Voice::new("hat");
//! let beat = SlotPattern::new(&[1.0, 1.0, 1.0, 1.0])
//!     .unwrap()
//!     .set_events([Event::on(&hat, Params::new().with("amp", 0.6))]);
//! let mut bar = Mix::new(vec![beat.boxed(), SetTempo::new("0", 128.0).unwrap().boxed()]);
//!
//! let mut track = Track::with_defaults().unwrap();
//! let schedule = track.render(&mut bar).unwrap();
//! assert_eq!(schedule.event_count(), 5);
//! assert_eq!(track.tempo(), 128.0);
//! ```

pub use barline_core as core;
pub use barline_measure as measure;
pub use barline_player as player;

pub use barline_core::{BoxedPattern, Event, Measure, Pattern, PatternError, Timeline, Tracker};
pub use barline_player::{PlayerError, Schedule, Track, TrackConfig};
