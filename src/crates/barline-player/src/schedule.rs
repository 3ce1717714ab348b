use crate::{Event, Measure, Result};
use serde::Serialize;

/// One event with its position inside the bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledEvent {
    pub position: Measure,
    pub event: Event,
}

/// Everything dispatched for one bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledBar {
    /// Absolute bar index
    pub index: usize,
    /// Bar length in effect while the bar was evaluated
    pub length: Measure,
    /// Tempo in effect at the start of the bar
    pub tempo: f64,
    /// Events sorted by position; events sharing a position keep pattern order
    pub events: Vec<ScheduledEvent>,
}

impl ScheduledBar {
    pub fn positions(&self) -> Vec<Measure> {
        let mut res: Vec<Measure> = self.events.iter().map(|e| e.position).collect();
        res.dedup();
        res
    }
}

/// Output of a rendering run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schedule {
    pub bars: Vec<ScheduledBar>,
    /// Rendering stopped because an end marker was dispatched
    pub ended: bool,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.bars.iter().map(|b| b.events.len()).sum()
    }

    /// All events in dispatch order as `(bar, position, event)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, Measure, &Event)> {
        self.bars
            .iter()
            .flat_map(|b| b.events.iter().map(move |e| (b.index, e.position, &e.event)))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
