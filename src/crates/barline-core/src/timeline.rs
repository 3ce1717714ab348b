use crate::{Event, Measure};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Events produced by one pattern evaluation, keyed by position in the bar
///
/// Positions iterate in ascending order. Adding events at a position that is
/// already occupied appends to the existing list; nothing is ever replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    events: BTreeMap<Measure, Vec<Event>>,
}

impl Timeline {
    pub fn new() -> Self {
        Timeline {
            events: BTreeMap::new(),
        }
    }

    /// A timeline holding a single event
    pub fn single(at: Measure, event: Event) -> Self {
        let mut res = Timeline::new();
        res.push(at, event);
        res
    }

    pub fn push(&mut self, at: Measure, event: Event) {
        self.events.entry(at).or_default().push(event);
    }

    pub fn extend_at(&mut self, at: Measure, events: impl IntoIterator<Item = Event>) {
        self.events.entry(at).or_default().extend(events);
    }

    /// Append every event of `other`, keeping the order within each position
    pub fn merge(&mut self, other: Timeline) {
        for (at, events) in other.events {
            self.extend_at(at, events);
        }
    }

    pub fn get(&self, at: Measure) -> &[Event] {
        self.events.get(&at).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_mut(&mut self, at: Measure) -> Option<&mut Vec<Event>> {
        self.events.get_mut(&at)
    }

    pub fn positions(&self) -> impl Iterator<Item = Measure> + '_ {
        self.events.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Measure, &[Event])> {
        self.events.iter().map(|(at, evts)| (*at, evts.as_slice()))
    }

    /// Every event paired with its position, in dispatch order
    pub fn flatten(&self) -> impl Iterator<Item = (Measure, &Event)> {
        self.events
            .iter()
            .flat_map(|(at, evts)| evts.iter().map(move |e| (*at, e)))
    }

    /// Number of distinct positions
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }
}

impl IntoIterator for Timeline {
    type Item = (Measure, Vec<Event>);
    type IntoIter = btree_map::IntoIter<Measure, Vec<Event>>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl FromIterator<(Measure, Event)> for Timeline {
    fn from_iter<I: IntoIterator<Item = (Measure, Event)>>(iter: I) -> Self {
        let mut res = Timeline::new();
        for (at, event) in iter {
            res.push(at, event);
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_appends() {
        let half = Measure::new(1, 2);
        let mut a = Timeline::single(half, Event::start());
        let b = Timeline::single(half, Event::end());

        a.merge(b);

        assert_eq!(a.len(), 1);
        assert_eq!(a.get(half), &[Event::start(), Event::end()]);
    }

    #[test]
    fn test_positions_are_sorted() {
        let tl: Timeline = [
            (Measure::new(3, 4), Event::end()),
            (Measure::ZERO, Event::start()),
            (Measure::new(1, 4), Event::bpm(100.0)),
        ]
        .into_iter()
        .collect();

        let positions: Vec<_> = tl.positions().collect();
        assert_eq!(positions, vec![Measure::ZERO, Measure::new(1, 4), Measure::new(3, 4)]);
        assert_eq!(tl.event_count(), 3);
        assert!(tl.get(Measure::BAR).is_empty());
    }
}
