//! Patterns built from other patterns

use crate::error::{PatternError, Result};
use crate::{BoxedPattern, Pattern, Timeline, Tracker};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Concatenate patterns along the bar axis
///
/// Each bar index is answered by exactly one child: the first one whose
/// cumulative span covers it, called with the index relative to its own start.
pub struct Sequence {
    patterns: Vec<BoxedPattern>,
}

impl Sequence {
    pub fn new(patterns: Vec<BoxedPattern>) -> Result<Self> {
        if patterns.is_empty() {
            return Err(PatternError::EmptySequence);
        }
        Ok(Sequence { patterns })
    }
}

impl Pattern for Sequence {
    fn events(&mut self, bar: usize, tracker: &dyn Tracker) -> Timeline {
        let mut offset = 0;

        for pattern in self.patterns.iter_mut() {
            let next = offset + pattern.num_bars();
            if bar < next {
                return pattern.events(bar - offset, tracker);
            }
            offset = next;
        }

        trace!(bar, span = offset, "bar beyond sequence");
        Timeline::new()
    }

    fn num_bars(&self) -> usize {
        self.patterns.iter().map(|p| p.num_bars()).sum()
    }
}

/// Layer patterns so they sound at the same time
///
/// Events of all layers landing on the same position are appended in layer
/// order; no layer shadows another.
#[derive(Default)]
pub struct Mix {
    patterns: Vec<Option<BoxedPattern>>,
}

impl Mix {
    pub fn new(patterns: Vec<BoxedPattern>) -> Self {
        Mix {
            patterns: patterns.into_iter().map(Some).collect(),
        }
    }

    /// Build from layers that may be absent; absent layers are ignored
    pub fn with_optional(patterns: Vec<Option<BoxedPattern>>) -> Self {
        Mix { patterns }
    }

    pub fn push(&mut self, pattern: BoxedPattern) {
        self.patterns.push(Some(pattern));
    }

    /// Number of present layers
    pub fn len(&self) -> usize {
        self.patterns.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Pattern for Mix {
    fn events(&mut self, bar: usize, tracker: &dyn Tracker) -> Timeline {
        let mut res = Timeline::new();
        for pattern in self.patterns.iter_mut().flatten() {
            res.merge(pattern.events(bar, tracker));
        }
        res
    }

    fn num_bars(&self) -> usize {
        self.patterns
            .iter()
            .flatten()
            .map(|p| p.num_bars())
            .fold(1, usize::max)
    }
}

/// Forward each evaluation to one uniformly chosen child
///
/// All children must span the same number of bars, so the span does not
/// depend on the choice. Unchosen children are not evaluated. Each instance
/// owns its generator.
pub struct RandomPattern {
    patterns: Vec<BoxedPattern>,
    rng: StdRng,
}

impl RandomPattern {
    /// Seed from OS entropy
    pub fn new(patterns: Vec<BoxedPattern>) -> Result<Self> {
        Self::with_rng(patterns, StdRng::from_entropy())
    }

    /// Deterministic choices for a given seed
    pub fn with_seed(patterns: Vec<BoxedPattern>, seed: u64) -> Result<Self> {
        Self::with_rng(patterns, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(patterns: Vec<BoxedPattern>, rng: StdRng) -> Result<Self> {
        let expected = match patterns.first() {
            Some(first) => first.num_bars(),
            None => return Err(PatternError::EmptyRandom),
        };

        for (index, pattern) in patterns.iter().enumerate().skip(1) {
            let found = pattern.num_bars();
            if found != expected {
                return Err(PatternError::BarMismatch {
                    index,
                    expected,
                    found,
                });
            }
        }

        Ok(RandomPattern { patterns, rng })
    }
}

impl Pattern for RandomPattern {
    fn events(&mut self, bar: usize, tracker: &dyn Tracker) -> Timeline {
        let choice = self.rng.gen_range(0..self.patterns.len());
        trace!(bar, choice, "random pattern choice");
        self.patterns[choice].events(bar, tracker)
    }

    fn num_bars(&self) -> usize {
        self.patterns[0].num_bars()
    }
}

/// Gate a pattern with a repeating on/off mask
///
/// Every evaluation reads the mask at the cursor and then advances the cursor
/// (wrapping), whether the gate was open or not. Without a wrapped pattern
/// nothing is emitted and the cursor stays put.
pub struct SeqSwitch {
    mask: Vec<bool>,
    position: usize,
    pattern: Option<BoxedPattern>,
}

impl SeqSwitch {
    pub fn new(pattern: Option<BoxedPattern>, mask: Vec<bool>) -> Result<Self> {
        if mask.is_empty() {
            return Err(PatternError::EmptyMask);
        }
        Ok(SeqSwitch {
            mask,
            position: 0,
            pattern,
        })
    }

    /// Index into the mask used by the next evaluation
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }
}

impl Pattern for SeqSwitch {
    fn events(&mut self, bar: usize, tracker: &dyn Tracker) -> Timeline {
        let Some(pattern) = self.pattern.as_mut() else {
            return Timeline::new();
        };

        let open = self.mask[self.position];
        trace!(bar, position = self.position, open, "switch");
        self.position = (self.position + 1) % self.mask.len();

        if open {
            pattern.events(bar, tracker)
        } else {
            Timeline::new()
        }
    }

    fn num_bars(&self) -> usize {
        self.pattern.as_ref().map_or(1, |p| p.num_bars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Event, FixedBar, Measure, PatternFn, SetTempo};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn tempo(bpm: f64) -> BoxedPattern {
        SetTempo::new("0", bpm).unwrap().boxed()
    }

    /// Pattern spanning `bars` bars that reports the relative bar it was asked for
    fn spanning(bars: usize, tag: f64) -> BoxedPattern {
        struct Span {
            bars: usize,
            tag: f64,
        }

        impl Pattern for Span {
            fn events(&mut self, bar: usize, _tracker: &dyn Tracker) -> Timeline {
                Timeline::single(Measure::from_int(bar as i64), Event::bpm(self.tag))
            }

            fn num_bars(&self) -> usize {
                self.bars
            }
        }

        Span { bars, tag }.boxed()
    }

    #[test]
    fn test_sequence_partitions_bars() {
        let mut seq = Sequence::new(vec![spanning(2, 1.0), spanning(3, 2.0)]).unwrap();
        let tracker = FixedBar::default();

        assert_eq!(seq.num_bars(), 5);
        assert_eq!(seq.events(1, &tracker).get(Measure::from_int(1)), &[Event::bpm(1.0)]);
        assert_eq!(seq.events(2, &tracker).get(Measure::ZERO), &[Event::bpm(2.0)]);
        assert_eq!(seq.events(4, &tracker).get(Measure::from_int(2)), &[Event::bpm(2.0)]);
        assert!(seq.events(5, &tracker).is_empty());
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert!(matches!(Sequence::new(vec![]), Err(PatternError::EmptySequence)));
    }

    #[test]
    fn test_mix_appends_at_same_position() {
        let mut mix = Mix::new(vec![tempo(100.0), tempo(110.0), tempo(120.0)]);

        let tl = mix.events(0, &FixedBar::default());

        assert_eq!(
            tl.get(Measure::ZERO),
            &[Event::bpm(100.0), Event::bpm(110.0), Event::bpm(120.0)]
        );
    }

    #[test]
    fn test_mix_span_is_max_and_ignores_absent() {
        let mix = Mix::with_optional(vec![None, Some(spanning(3, 0.0)), Some(spanning(2, 0.0))]);
        assert_eq!(mix.num_bars(), 3);
        assert_eq!(mix.len(), 2);

        let empty = Mix::with_optional(vec![None]);
        assert_eq!(empty.num_bars(), 1);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_random_rejects_empty_and_mismatch() {
        assert!(matches!(RandomPattern::new(vec![]), Err(PatternError::EmptyRandom)));

        let err = RandomPattern::new(vec![spanning(2, 0.0), spanning(2, 0.0), spanning(1, 0.0)]);
        assert!(matches!(
            err,
            Err(PatternError::BarMismatch {
                index: 2,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_random_only_evaluates_choice() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut patterns = Vec::new();
        for tag in 0..3 {
            let calls = Arc::clone(&calls);
            patterns.push(
                PatternFn::new(move |_, _: &dyn Tracker| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Timeline::single(Measure::ZERO, Event::bpm(tag as f64))
                })
                .boxed(),
            );
        }
        let mut random = RandomPattern::with_seed(patterns, 7).unwrap();

        for bar in 0..20 {
            let tl = random.events(bar, &FixedBar::default());
            assert_eq!(tl.event_count(), 1);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 20);
        assert_eq!(random.num_bars(), 1);
    }

    #[test]
    fn test_random_is_deterministic_per_seed() {
        let build = || {
            RandomPattern::with_seed(vec![tempo(1.0), tempo(2.0), tempo(3.0), tempo(4.0)], 42)
                .unwrap()
        };
        let (mut a, mut b) = (build(), build());
        let tracker = FixedBar::default();

        for bar in 0..16 {
            assert_eq!(a.events(bar, &tracker), b.events(bar, &tracker));
        }
    }

    #[test]
    fn test_switch_cycles_mask() {
        let mut switch = SeqSwitch::new(Some(tempo(90.0)), vec![true, false, true]).unwrap();
        let tracker = FixedBar::default();

        assert!(!switch.events(0, &tracker).is_empty());
        assert!(switch.events(0, &tracker).is_empty());
        assert!(!switch.events(0, &tracker).is_empty());
        assert_eq!(switch.position(), 0);
        assert!(!switch.events(0, &tracker).is_empty());
        assert!(switch.events(0, &tracker).is_empty());
    }

    #[test]
    fn test_switch_without_pattern() {
        let mut switch = SeqSwitch::new(None, vec![true]).unwrap();
        assert!(switch.events(0, &FixedBar::default()).is_empty());
        assert_eq!(switch.num_bars(), 1);
        assert_eq!(switch.position(), 0);

        assert!(matches!(SeqSwitch::new(None, vec![]), Err(PatternError::EmptyMask)));
    }

    #[test]
    fn test_switch_reset() {
        let mut switch = SeqSwitch::new(Some(spanning(4, 0.0)), vec![false, true]).unwrap();
        switch.events(0, &FixedBar::default());
        switch.reset();
        assert_eq!(switch.position(), 0);
        assert_eq!(switch.num_bars(), 4);
    }
}
