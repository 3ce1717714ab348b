use crate::{Timeline, Tracker};

/// A composable source of bar-indexed events
///
/// `events` is called once per bar by the driver with the bar index relative
/// to this pattern. Implementations may carry cursors (gates, tempo spans,
/// random generators), which is why evaluation takes `&mut self`: calling
/// `events` twice with the same bar index is allowed to give different
/// results.
pub trait Pattern: Send {
    /// Events for bar `bar`, keyed by position within that bar
    fn events(&mut self, bar: usize, tracker: &dyn Tracker) -> Timeline;

    /// Number of bars this pattern spans; always at least 1
    fn num_bars(&self) -> usize;

    fn boxed(self) -> BoxedPattern
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

pub type BoxedPattern = Box<dyn Pattern>;

impl<P: Pattern + ?Sized> Pattern for Box<P> {
    fn events(&mut self, bar: usize, tracker: &dyn Tracker) -> Timeline {
        (**self).events(bar, tracker)
    }

    fn num_bars(&self) -> usize {
        (**self).num_bars()
    }
}

/// Adapter turning a plain function into a one-bar pattern
pub struct PatternFn<F> {
    func: F,
}

impl<F> PatternFn<F>
where
    F: FnMut(usize, &dyn Tracker) -> Timeline + Send,
{
    pub fn new(func: F) -> Self {
        PatternFn { func }
    }
}

impl<F> Pattern for PatternFn<F>
where
    F: FnMut(usize, &dyn Tracker) -> Timeline + Send,
{
    fn events(&mut self, bar: usize, tracker: &dyn Tracker) -> Timeline {
        (self.func)(bar, tracker)
    }

    fn num_bars(&self) -> usize {
        1
    }
}

/// Shorthand for [`PatternFn::new`]
pub fn pattern_fn<F>(func: F) -> PatternFn<F>
where
    F: FnMut(usize, &dyn Tracker) -> Timeline + Send,
{
    PatternFn::new(func)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Event, FixedBar, Measure};

    #[test]
    fn test_pattern_fn_forwards_arguments() {
        let mut pat = pattern_fn(|bar, tracker: &dyn Tracker| {
            Timeline::single(tracker.current_bar() / 2, Event::bpm(bar as f64))
        });

        let tracker = FixedBar(Measure::new(3, 4));
        let tl = pat.events(7, &tracker);

        assert_eq!(pat.num_bars(), 1);
        assert_eq!(tl.get(Measure::new(3, 8)), &[Event::bpm(7.0)]);
    }

    #[test]
    fn test_pattern_fn_can_keep_state() {
        let mut calls = 0;
        let mut pat = pattern_fn(move |_, _: &dyn Tracker| {
            calls += 1;
            Timeline::single(Measure::ZERO, Event::bpm(calls as f64))
        });
        let tracker = FixedBar::default();

        pat.events(0, &tracker);
        let tl = pat.events(0, &tracker);
        assert_eq!(tl.get(Measure::ZERO), &[Event::bpm(2.0)]);
    }

    #[test]
    fn test_boxed_pattern_delegates() {
        let mut boxed =
            pattern_fn(|_, _: &dyn Tracker| Timeline::single(Measure::ZERO, Event::end())).boxed();
        assert_eq!(boxed.num_bars(), 1);
        assert_eq!(boxed.events(0, &FixedBar::default()).event_count(), 1);
    }
}
