//! Running tempo ramps expressed as ordinary tempo-change events

use crate::error::Result;
use crate::{Event, Measure, Pattern, Timeline, Tracker};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Combines the running tempo with the step to produce the next tempo
pub type StepFn = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;

pub fn step_add(current: f64, step: f64) -> f64 {
    current + step
}

pub fn step_multiply(current: f64, step: f64) -> f64 {
    current * step
}

struct TempoState {
    start: f64,
    current: f64,
    step: f64,
    modifier: StepFn,
}

/// A tempo value that moves by one step each time it is played
///
/// The patterns handed out by [`set_tempo`](TempoSpan::set_tempo) and
/// [`reset`](TempoSpan::reset) share this span's state. Every evaluation of a
/// `set_tempo` pattern advances the tempo, so placing it in a sequence that is
/// played bar by bar produces a ramp.
///
/// ```
/// use barline_core::{step_add, Event, FixedBar, Measure, Pattern, TempoSpan};
///
/// let span = TempoSpan::new(100.0, 5.0, step_add);
/// let mut up = span.set_tempo("0").unwrap();
///
/// let tl = up.events(0, &FixedBar::default());
/// assert_eq!(tl.get(Measure::ZERO), &[Event::bpm(105.0)]);
/// ```
#[derive(Clone)]
pub struct TempoSpan {
    state: Arc<Mutex<TempoState>>,
}

impl TempoSpan {
    pub fn new<F>(start: f64, step: f64, modifier: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        TempoSpan {
            state: Arc::new(Mutex::new(TempoState {
                start,
                current: start,
                step,
                modifier: Arc::new(modifier),
            })),
        }
    }

    /// Pattern that steps the tempo and emits it at `position`
    pub fn set_tempo(&self, position: &str) -> Result<TempoStep> {
        Ok(TempoStep {
            state: Arc::clone(&self.state),
            at: Measure::parse(position)?,
        })
    }

    /// Pattern that restores the start tempo and emits it at `position`
    pub fn reset(&self, position: &str) -> Result<TempoReset> {
        Ok(TempoReset {
            state: Arc::clone(&self.state),
            at: Measure::parse(position)?,
        })
    }

    pub fn current(&self) -> f64 {
        self.state.lock().current
    }
}

impl fmt::Debug for TempoSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("TempoSpan")
            .field("start", &state.start)
            .field("current", &state.current)
            .field("step", &state.step)
            .finish()
    }
}

pub struct TempoStep {
    state: Arc<Mutex<TempoState>>,
    at: Measure,
}

impl Pattern for TempoStep {
    fn events(&mut self, bar: usize, _tracker: &dyn Tracker) -> Timeline {
        let bpm = {
            let mut state = self.state.lock();
            let next = (state.modifier)(state.current, state.step);
            state.current = next;
            next
        };
        debug!(bar, bpm, "tempo step");
        Timeline::single(self.at, Event::bpm(bpm))
    }

    fn num_bars(&self) -> usize {
        1
    }
}

pub struct TempoReset {
    state: Arc<Mutex<TempoState>>,
    at: Measure,
}

impl Pattern for TempoReset {
    fn events(&mut self, bar: usize, _tracker: &dyn Tracker) -> Timeline {
        let bpm = {
            let mut state = self.state.lock();
            state.current = state.start;
            state.current
        };
        debug!(bar, bpm, "tempo reset");
        Timeline::single(self.at, Event::bpm(bpm))
    }

    fn num_bars(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedBar;

    fn bpm_at(tl: &Timeline, at: Measure) -> Option<f64> {
        tl.get(at).first().and_then(Event::tempo)
    }

    #[test]
    fn test_additive_ramp_and_reset() {
        let span = TempoSpan::new(100.0, 5.0, step_add);
        let mut up = span.set_tempo("0").unwrap();
        let mut reset = span.reset("0").unwrap();
        let tracker = FixedBar::default();

        let ramp: Vec<_> = (0..3)
            .map(|bar| bpm_at(&up.events(bar, &tracker), Measure::ZERO))
            .collect();
        assert_eq!(ramp, vec![Some(105.0), Some(110.0), Some(115.0)]);

        assert_eq!(bpm_at(&reset.events(3, &tracker), Measure::ZERO), Some(100.0));
        assert_eq!(span.current(), 100.0);
        assert_eq!(bpm_at(&up.events(4, &tracker), Measure::ZERO), Some(105.0));
    }

    #[test]
    fn test_multiplicative_ramp() {
        let span = TempoSpan::new(80.0, 1.5, step_multiply);
        let mut up = span.set_tempo("1/2").unwrap();
        let tracker = FixedBar::default();

        up.events(0, &tracker);
        let tl = up.events(1, &tracker);
        assert_eq!(bpm_at(&tl, Measure::new(1, 2)), Some(180.0));
    }

    #[test]
    fn test_custom_step_shared_between_patterns() {
        let span = TempoSpan::new(120.0, 10.0, |current, step| current - step);
        let mut a = span.set_tempo("0").unwrap();
        let mut b = span.set_tempo("1/4").unwrap();
        let tracker = FixedBar::default();

        a.events(0, &tracker);
        let tl = b.events(0, &tracker);
        assert_eq!(bpm_at(&tl, Measure::new(1, 4)), Some(100.0));
    }

    #[test]
    fn test_bad_position() {
        let span = TempoSpan::new(100.0, 1.0, step_add);
        assert!(span.set_tempo("x").is_err());
        assert!(span.reset("").is_err());
    }
}
