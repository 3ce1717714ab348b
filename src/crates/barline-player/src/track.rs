//! Bar-by-bar evaluation of a pattern tree

use crate::schedule::{Schedule, ScheduledBar, ScheduledEvent};
use crate::{Event, Measure, Pattern, PlayerError, Result, TrackConfig, Tracker};
use tracing::{debug, instrument};

/// Drives a pattern one bar at a time and collects what it emits
///
/// `Track` is the [`Tracker`] handed to patterns during evaluation. The bar
/// length can be changed between renders with [`set_bar`](Track::set_bar);
/// tempo events are applied as they are dispatched.
#[derive(Debug, Clone)]
pub struct Track {
    bar: Measure,
    tempo: f64,
    max_bars: usize,
}

impl Track {
    pub fn new(config: TrackConfig) -> Result<Self> {
        let bar = Measure::parse(&config.bar)?;
        Self::check_bar(bar)?;
        Ok(Track {
            bar,
            tempo: config.tempo,
            max_bars: config.max_bars,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(TrackConfig::default())
    }

    fn check_bar(bar: Measure) -> Result<()> {
        if bar.is_negative() || bar.is_zero() {
            return Err(PlayerError::NonPositiveBar(bar));
        }
        Ok(())
    }

    pub fn set_bar(&mut self, bar: Measure) -> Result<()> {
        Self::check_bar(bar)?;
        self.bar = bar;
        Ok(())
    }

    /// Tempo after the last dispatched tempo event
    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    /// Play the pattern once, from bar 0 to the end of its span
    #[instrument(level = "debug", skip_all, fields(bars = pattern.num_bars()))]
    pub fn render<P: Pattern + ?Sized>(&mut self, pattern: &mut P) -> Result<Schedule> {
        let bars = pattern.num_bars();
        self.check_limit(bars)?;
        Ok(self.run(pattern, bars))
    }

    /// Play `bars` bars, starting the pattern over whenever its span runs out
    #[instrument(level = "debug", skip_all, fields(bars = bars))]
    pub fn render_looping<P: Pattern + ?Sized>(
        &mut self,
        pattern: &mut P,
        bars: usize,
    ) -> Result<Schedule> {
        self.check_limit(bars)?;
        Ok(self.run(pattern, bars))
    }

    fn check_limit(&self, requested: usize) -> Result<()> {
        if requested > self.max_bars {
            return Err(PlayerError::TooManyBars {
                requested,
                limit: self.max_bars,
            });
        }
        Ok(())
    }

    fn run<P: Pattern + ?Sized>(&mut self, pattern: &mut P, bars: usize) -> Schedule {
        let mut schedule = Schedule::default();
        let span = pattern.num_bars().max(1);

        for index in 0..bars {
            let (bar, ended) = self.render_bar(pattern, index, index % span);
            schedule.bars.push(bar);
            if ended {
                debug!(index, "end marker reached");
                schedule.ended = true;
                break;
            }
        }

        schedule
    }

    /// Evaluate one bar and dispatch its events in position order
    fn render_bar<P: Pattern + ?Sized>(
        &mut self,
        pattern: &mut P,
        index: usize,
        relative: usize,
    ) -> (ScheduledBar, bool) {
        let tempo = self.tempo;
        let timeline = pattern.events(relative, &*self);
        let mut ended = false;
        let mut events = Vec::with_capacity(timeline.event_count());

        for (position, evts) in timeline {
            for event in evts {
                match &event {
                    Event::Tempo { bpm } => self.tempo = *bpm,
                    Event::End => ended = true,
                    _ => {}
                }
                events.push(ScheduledEvent { position, event });
            }
        }

        debug!(index, relative, events = events.len(), tempo = self.tempo, "rendered bar");

        (
            ScheduledBar {
                index,
                length: self.bar,
                tempo,
                events,
            },
            ended,
        )
    }
}

impl Tracker for Track {
    fn current_bar(&self) -> Measure {
        self.bar
    }
}
