//! One-shot patterns that emit a single event at a fixed position

use crate::error::Result;
use crate::{Event, Measure, Params, Pattern, Timeline, Tracker, Voice};

/// Emits the end marker at a position of every bar it is asked for
#[derive(Debug, Clone, PartialEq)]
pub struct End {
    at: Measure,
}

impl End {
    pub fn new(at: &str) -> Result<Self> {
        Ok(End {
            at: Measure::parse(at)?,
        })
    }
}

impl Pattern for End {
    fn events(&mut self, _bar: usize, _tracker: &dyn Tracker) -> Timeline {
        Timeline::single(self.at, Event::end())
    }

    fn num_bars(&self) -> usize {
        1
    }
}

/// Emits the start marker
#[derive(Debug, Clone, PartialEq)]
pub struct Start {
    at: Measure,
}

impl Start {
    pub fn new(at: &str) -> Result<Self> {
        Ok(Start {
            at: Measure::parse(at)?,
        })
    }
}

impl Pattern for Start {
    fn events(&mut self, _bar: usize, _tracker: &dyn Tracker) -> Timeline {
        Timeline::single(self.at, Event::start())
    }

    fn num_bars(&self) -> usize {
        1
    }
}

/// Emits a tempo change
#[derive(Debug, Clone, PartialEq)]
pub struct SetTempo {
    at: Measure,
    bpm: f64,
}

impl SetTempo {
    pub fn new(at: &str, bpm: f64) -> Result<Self> {
        Ok(Self::from_measure(Measure::parse(at)?, bpm))
    }

    pub fn from_measure(at: Measure, bpm: f64) -> Self {
        SetTempo { at, bpm }
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }
}

impl Pattern for SetTempo {
    fn events(&mut self, _bar: usize, _tracker: &dyn Tracker) -> Timeline {
        Timeline::single(self.at, Event::bpm(self.bpm))
    }

    fn num_bars(&self) -> usize {
        1
    }
}

/// Emits a parameter change for one voice
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    at: Measure,
    template: Event,
}

impl Change {
    pub fn new(at: &str, voice: &Voice, params: Params) -> Result<Self> {
        Ok(Self::from_measure(Measure::parse(at)?, voice, params))
    }

    pub fn from_measure(at: Measure, voice: &Voice, params: Params) -> Self {
        Change {
            at,
            template: Event::change(voice, params),
        }
    }
}

impl Pattern for Change {
    fn events(&mut self, _bar: usize, _tracker: &dyn Tracker) -> Timeline {
        Timeline::single(self.at, self.template.clone())
    }

    fn num_bars(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedBar, PatternError};

    #[test]
    fn test_markers() {
        let tracker = FixedBar::default();

        let mut end = End::new("3/4").unwrap();
        assert_eq!(end.events(0, &tracker).get(Measure::new(3, 4)), &[Event::end()]);
        assert_eq!(end.num_bars(), 1);

        let mut start = Start::new("0").unwrap();
        assert_eq!(start.events(5, &tracker).get(Measure::ZERO), &[Event::start()]);
    }

    #[test]
    fn test_set_tempo() {
        let mut tempo = SetTempo::new("1/2", 96.0).unwrap();
        let tl = tempo.events(0, &FixedBar::default());

        assert_eq!(tl.event_count(), 1);
        assert_eq!(tl.get(Measure::new(1, 2)), &[Event::bpm(96.0)]);
    }

    #[test]
    fn test_change_clones_template() {
        let voice = Voice::new("bass");
        let mut change = Change::new("1/4", &voice, Params::new().with("cutoff", 800.0)).unwrap();
        let tracker = FixedBar::default();

        let mut first = change.events(0, &tracker);
        if let Some(evts) = first.get_mut(Measure::new(1, 4)) {
            evts[0].params_mut().unwrap().set("cutoff", 0.0);
        }

        let second = change.events(1, &tracker);
        assert_eq!(
            second.get(Measure::new(1, 4))[0].params().unwrap().get("cutoff"),
            Some(800.0)
        );
    }

    #[test]
    fn test_malformed_position() {
        assert!(matches!(End::new("1/"), Err(PatternError::Measure(_))));
        assert!(matches!(SetTempo::new("fast", 120.0), Err(PatternError::Measure(_))));
    }
}
