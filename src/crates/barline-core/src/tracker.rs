use crate::Measure;

/// Ambient timing state a pattern may read while it is evaluated
///
/// The tracker is borrowed for a single call only. Bar length can change from
/// one bar to the next, so patterns must not cache it.
pub trait Tracker {
    /// Duration of the bar currently being evaluated
    fn current_bar(&self) -> Measure;
}

/// Tracker with a constant bar length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBar(pub Measure);

impl Default for FixedBar {
    fn default() -> Self {
        FixedBar(Measure::BAR)
    }
}

impl Tracker for FixedBar {
    fn current_bar(&self) -> Measure {
        self.0
    }
}
