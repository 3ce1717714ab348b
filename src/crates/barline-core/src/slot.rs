use crate::error::Result;
use crate::{Event, Measure, Pattern, Timeline, Tracker};

/// Contents of one slot of a [`SlotPattern`]
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Slot {
    /// A rest: the slot is skipped and does not advance the position
    #[default]
    Empty,
    Single(Event),
    Group(Vec<Event>),
}

impl Slot {
    /// Fresh copies of the slot's events, or `None` for a rest
    fn instantiate(&self) -> Option<Vec<Event>> {
        match self {
            Slot::Empty => None,
            Slot::Single(event) => Some(vec![event.clone()]),
            Slot::Group(events) => Some(events.clone()),
        }
    }

    fn events_mut(&mut self) -> &mut [Event] {
        match self {
            Slot::Empty => &mut [],
            Slot::Single(event) => std::slice::from_mut(event),
            Slot::Group(events) => events,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

impl From<Event> for Slot {
    fn from(event: Event) -> Self {
        Slot::Single(event)
    }
}

impl From<Vec<Event>> for Slot {
    fn from(events: Vec<Event>) -> Self {
        Slot::Group(events)
    }
}

impl From<Option<Event>> for Slot {
    fn from(event: Option<Event>) -> Self {
        event.map_or(Slot::Empty, Slot::Single)
    }
}

/// Places event groups on slot positions derived from a list of relations
///
/// The relations are scaled onto the base (the tracker's current bar unless
/// [`set_base`](SlotPattern::set_base) was used) to get one offset per slot.
/// If there are at least as many event slots as offsets, the events drive the
/// iteration and the offsets rotate; otherwise the offsets drive it and the
/// events rotate. Rests are skipped without advancing the position.
///
/// ```
/// use barline_core::{Event, FixedBar, Measure, Pattern, SlotPattern};
///
/// let mut pat = SlotPattern::new(&[1.0, 1.0, 1.0])
///     .unwrap()
///     .set_events([Event::bpm(100.0), Event::bpm(120.0)]);
///
/// let tl = pat.events(0, &FixedBar::default());
/// assert_eq!(tl.get(Measure::new(2, 3)), &[Event::bpm(100.0)]);
/// ```
#[derive(Debug, Clone)]
pub struct SlotPattern {
    relations: Vec<f64>,
    /// relations scaled onto one bar
    unit: Vec<Measure>,
    base: Option<Measure>,
    slots: Vec<Slot>,
    at: Measure,
}

impl SlotPattern {
    /// Fails if the relations are empty, negative or sum to zero
    pub fn new(relations: &[f64]) -> Result<Self> {
        let unit = Measure::BAR.scale(relations)?;
        Ok(SlotPattern {
            relations: relations.to_vec(),
            unit,
            base: None,
            slots: Vec::new(),
            at: Measure::ZERO,
        })
    }

    pub fn set_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Slot>,
    {
        self.slots = events.into_iter().map(Into::into).collect();
        self
    }

    /// Put `events` into slot `idx`, padding with rests as needed
    pub fn set_events_at(mut self, idx: usize, events: Vec<Event>) -> Self {
        self.put(idx, Slot::Group(events));
        self
    }

    /// Apply [`set_events_at`](Self::set_events_at) for every entry
    pub fn map_events<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, Slot)>,
    {
        for (idx, slot) in entries {
            self.put(idx, slot);
        }
        self
    }

    /// Override the scaling base with a fixed measure
    pub fn set_base(mut self, base: &str) -> Result<Self> {
        self.base = Some(Measure::parse(base)?);
        Ok(self)
    }

    /// Offset of the first slot inside the bar
    pub fn at(mut self, position: &str) -> Result<Self> {
        self.at = Measure::parse(position)?;
        Ok(self)
    }

    /// Edit the template events of slot `idx` (wrapping around the slot count)
    pub fn change_events_at<F>(&mut self, idx: usize, f: F) -> &mut Self
    where
        F: FnOnce(&mut [Event]),
    {
        let len = self.slots.len();
        if len > 0 {
            f(self.slots[idx % len].events_mut());
        }
        self
    }

    pub fn change_all_events<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(usize, &mut [Event]),
    {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if !slot.is_empty() {
                f(i, slot.events_mut());
            }
        }
        self
    }

    pub fn relations(&self) -> &[f64] {
        &self.relations
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    fn put(&mut self, idx: usize, slot: Slot) {
        if self.slots.len() <= idx {
            self.slots.resize(idx + 1, Slot::Empty);
        }
        self.slots[idx] = slot;
    }

    /// Slot offsets for the given base; equal to `base.scale(relations)`
    fn offsets(&self, base: Measure) -> Vec<Measure> {
        self.unit.iter().map(|u| *u * base).collect()
    }
}

impl Pattern for SlotPattern {
    fn events(&mut self, _bar: usize, tracker: &dyn Tracker) -> Timeline {
        let base = self.base.unwrap_or_else(|| tracker.current_bar());
        let ms = self.offsets(base);
        let mut res = Timeline::new();

        let Some(first) = ms.first() else {
            return res;
        };
        if self.slots.is_empty() {
            return res;
        }

        let mut last = self.at - *first;

        if self.slots.len() >= ms.len() {
            for (i, slot) in self.slots.iter().enumerate() {
                if let Some(events) = slot.instantiate() {
                    last += ms[i % ms.len()];
                    res.extend_at(last, events);
                }
            }
            return res;
        }

        for (i, m) in ms.iter().enumerate() {
            if let Some(events) = self.slots[i % self.slots.len()].instantiate() {
                last += *m;
                res.extend_at(last, events);
            }
        }
        res
    }

    fn num_bars(&self) -> usize {
        1
    }
}
